use serbench_api::{BenchError, Payload, PayloadCodec};

/// Schema-less text codec. Every value carries its own type tag
/// (quoting, literals), so round trips need no external schema; the
/// price is the largest output of the three formats.
pub struct JsonCodec;

impl PayloadCodec for JsonCodec {
    fn name(&self) -> &'static str {
        "json"
    }

    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn encode(&self, payload: &Payload) -> Result<Vec<u8>, BenchError> {
        serde_json::to_vec(payload).map_err(|e| BenchError::encode("json", e))
    }

    fn decode(&self, bytes: &[u8]) -> Result<Payload, BenchError> {
        serde_json::from_slice(bytes).map_err(|e| BenchError::decode("json", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_payload;

    #[test]
    fn round_trip_preserves_structure() {
        let payload = sample_payload(3);
        let bytes = JsonCodec.encode(&payload).unwrap();
        let decoded = JsonCodec.decode(&bytes).unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn wire_field_names_are_camel_case() {
        let payload = sample_payload(1);
        let text = String::from_utf8(JsonCodec.encode(&payload).unwrap()).unwrap();
        assert!(text.contains("\"generatedAt\""));
        assert!(text.contains("\"records\""));
    }

    #[test]
    fn truncated_input_is_a_decode_error() {
        let payload = sample_payload(2);
        let bytes = JsonCodec.encode(&payload).unwrap();
        let err = JsonCodec.decode(&bytes[..bytes.len() / 2]).unwrap_err();
        assert!(matches!(err, BenchError::Decode { codec: "json", .. }));
    }
}
