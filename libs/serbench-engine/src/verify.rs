use serbench_api::{BenchError, Payload, PayloadCodec};

/// Outcome of one encode→decode→re-encode pass for a single codec.
pub struct CodecResult {
    pub codec: &'static str,
    /// The re-encoded bytes — what the serving endpoint returns.
    pub bytes: Vec<u8>,
    pub size_bytes: usize,
    /// Decode passes performed to produce `bytes`.
    pub round_trips: u32,
    /// Whether the decoded value was structurally equal to the input.
    /// A schema-based codec may legally coerce or drop fields absent
    /// from its schema; that is reported here, never hidden.
    pub lossless: bool,
}

/// Drive a full round trip: encode, decode, encode again.
///
/// The serving path calls this per request on purpose — it proves the
/// codec's advertised fidelity under real load instead of once at
/// startup. Callers that only want transport cost switch the server to
/// its pre-encoded mode rather than skipping steps here.
pub fn verify(codec: &dyn PayloadCodec, payload: &Payload) -> Result<CodecResult, BenchError> {
    let first = codec.encode(payload)?;
    let decoded = codec.decode(&first)?;
    let bytes = codec.encode(&decoded)?;
    let lossless = *payload == decoded;

    Ok(CodecResult {
        codec: codec.name(),
        size_bytes: bytes.len(),
        round_trips: 1,
        lossless,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::generate;
    use serbench_codecs::default_codecs;

    #[test]
    fn every_codec_round_trips_losslessly() {
        let payload = generate(200).unwrap();
        for codec in default_codecs().unwrap() {
            let result = verify(codec.as_ref(), &payload).unwrap();
            assert!(result.lossless, "{} dropped data", result.codec);
            assert_eq!(result.size_bytes, result.bytes.len());
            assert_eq!(result.round_trips, 1);
        }
    }

    #[test]
    fn re_encoding_is_stable() {
        // bytes2 == bytes3: repeated round trips must converge after the
        // first decode, otherwise timing comparisons measure different work
        // per request.
        let payload = generate(100).unwrap();
        for codec in default_codecs().unwrap() {
            let bytes2 = verify(codec.as_ref(), &payload).unwrap().bytes;
            let decoded = codec.decode(&bytes2).unwrap();
            let bytes3 = codec.encode(&decoded).unwrap();
            assert_eq!(bytes2, bytes3, "{} re-encode diverged", codec.name());
        }
    }

    #[test]
    fn decoded_count_matches_generated_count() {
        let payload = generate(1000).unwrap();
        for codec in default_codecs().unwrap() {
            let bytes = codec.encode(&payload).unwrap();
            let decoded = codec.decode(&bytes).unwrap();
            assert_eq!(decoded.records.len(), 1000, "{}", codec.name());
        }
    }

    #[test]
    fn size_ordering_schema_beats_schemaless_beats_text() {
        let payload = generate(1000).unwrap();
        let sizes: Vec<(&str, usize)> = default_codecs()
            .unwrap()
            .iter()
            .map(|codec| {
                let result = verify(codec.as_ref(), &payload).unwrap();
                (result.codec, result.size_bytes)
            })
            .collect();
        let size_of = |name: &str| sizes.iter().find(|(n, _)| *n == name).unwrap().1;
        assert!(size_of("avro") < size_of("msgpack"));
        assert!(size_of("msgpack") < size_of("json"));
    }
}
