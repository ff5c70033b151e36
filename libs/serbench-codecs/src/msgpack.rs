use serbench_api::{BenchError, Payload, PayloadCodec};

/// Schema-less binary codec. Type info is embedded per value and field
/// names travel with the data (`to_vec_named`), so the bytes stay
/// self-describing like MessagePack maps on the wire — smaller than
/// text, larger than a schema-based encoding.
pub struct MsgPackCodec;

impl PayloadCodec for MsgPackCodec {
    fn name(&self) -> &'static str {
        "msgpack"
    }

    fn content_type(&self) -> &'static str {
        "application/msgpack"
    }

    fn encode(&self, payload: &Payload) -> Result<Vec<u8>, BenchError> {
        rmp_serde::to_vec_named(payload).map_err(|e| BenchError::encode("msgpack", e))
    }

    fn decode(&self, bytes: &[u8]) -> Result<Payload, BenchError> {
        rmp_serde::from_slice(bytes).map_err(|e| BenchError::decode("msgpack", e))
    }
}
