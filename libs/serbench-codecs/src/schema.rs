use std::sync::Arc;

use apache_avro::Schema;

use serbench_api::BenchError;

/// Canonical Avro schema for `Payload`, embedded at build time.
///
/// `generatedAt` is declared as `string`: every codec carries the
/// timestamp as ISO-8601 millisecond text, so the schema-based bytes
/// stay compatible with the self-describing codecs' view of the value.
const PAYLOAD_SCHEMA: &str = include_str!("payload.avsc");

/// Holds the one compiled schema shared by all schema-based codec
/// operations in the process.
///
/// Compilation is the Avro codec's dominant fixed cost — construct the
/// registry once at startup and hand out clones of the inner `Arc`;
/// never rebuild it per call.
pub struct SchemaRegistry {
    schema: Arc<Schema>,
}

impl SchemaRegistry {
    pub fn new() -> Result<Self, BenchError> {
        let schema = Schema::parse_str(PAYLOAD_SCHEMA)
            .map_err(|e| BenchError::InvalidArgument(format!("payload schema: {e}")))?;
        Ok(Self { schema: Arc::new(schema) })
    }

    pub fn payload_schema(&self) -> Arc<Schema> {
        self.schema.clone()
    }
}
