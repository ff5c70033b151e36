use crate::error::BenchError;
use crate::record::Payload;

/// A paired encode/decode strategy — performs `Payload ↔ bytes`.
///
/// The three implementations differ in fidelity and size guarantees:
/// a self-describing text form where every value carries its own type
/// tag, a self-describing binary form with per-value type info, and a
/// schema-based binary form whose bytes carry no type tags and only
/// decode correctly against the exact schema that produced them.
pub trait PayloadCodec: Send + Sync {
    /// Short name used for routes and reports (`json`, `msgpack`, `avro`).
    fn name(&self) -> &'static str;

    /// Content type the serving endpoint attaches to responses.
    fn content_type(&self) -> &'static str;

    fn encode(&self, payload: &Payload) -> Result<Vec<u8>, BenchError>;
    fn decode(&self, bytes: &[u8]) -> Result<Payload, BenchError>;
}
