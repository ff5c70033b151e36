pub mod avro;
pub mod json;
pub mod msgpack;
pub mod schema;

pub use avro::AvroCodec;
pub use json::JsonCodec;
pub use msgpack::MsgPackCodec;
pub use schema::SchemaRegistry;

use std::sync::Arc;

use serbench_api::{BenchError, PayloadCodec};

/// Build the full codec set in serving/report order.
///
/// Compiles the Avro schema once; the returned codecs share it for the
/// rest of the process lifetime.
pub fn default_codecs() -> Result<Vec<Arc<dyn PayloadCodec>>, BenchError> {
    let registry = SchemaRegistry::new()?;
    Ok(vec![
        Arc::new(JsonCodec),
        Arc::new(MsgPackCodec),
        Arc::new(AvroCodec::new(&registry)),
    ])
}
