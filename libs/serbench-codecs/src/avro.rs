use std::sync::Arc;

use apache_avro::types::Value;
use apache_avro::Schema;

use serbench_api::{BenchError, Payload, PayloadCodec, Record};

use crate::schema::SchemaRegistry;

/// Schema-based binary codec. The bytes carry no type tags at all:
/// decoding is only meaningful against the exact schema that produced
/// them, so the codec holds the registry's compiled schema for its
/// whole lifetime. Smallest output of the three formats.
pub struct AvroCodec {
    schema: Arc<Schema>,
}

impl AvroCodec {
    pub fn new(registry: &SchemaRegistry) -> Self {
        Self { schema: registry.payload_schema() }
    }
}

impl PayloadCodec for AvroCodec {
    fn name(&self) -> &'static str {
        "avro"
    }

    fn content_type(&self) -> &'static str {
        "application/avro"
    }

    fn encode(&self, payload: &Payload) -> Result<Vec<u8>, BenchError> {
        apache_avro::to_avro_datum(&self.schema, payload_to_avro(payload))
            .map_err(|e| BenchError::encode("avro", e))
    }

    fn decode(&self, bytes: &[u8]) -> Result<Payload, BenchError> {
        let mut reader = bytes;
        let value = apache_avro::from_avro_datum(&self.schema, &mut reader, None)
            .map_err(|e| BenchError::decode("avro", e))?;
        payload_from_avro(value)
    }
}

// ---- Payload → avro Value ----

fn payload_to_avro(payload: &Payload) -> Value {
    Value::Record(vec![
        ("generatedAt".into(), Value::String(payload.generated_at.clone())),
        (
            "records".into(),
            Value::Array(payload.records.iter().map(record_to_avro).collect()),
        ),
    ])
}

fn record_to_avro(record: &Record) -> Value {
    Value::Record(vec![
        ("id".into(), Value::Int(record.id)),
        ("title".into(), Value::String(record.title.clone())),
        ("category".into(), Value::String(record.category.clone())),
        ("score".into(), Value::Int(record.score)),
        ("active".into(), Value::Boolean(record.active)),
    ])
}

// ---- avro Value → Payload ----

fn payload_from_avro(value: Value) -> Result<Payload, BenchError> {
    let mut fields = record_fields(value)?;
    let generated_at = take_string(&mut fields, "generatedAt")?;
    let records = match take_field(&mut fields, "records")? {
        Value::Array(items) => items
            .into_iter()
            .map(record_from_avro)
            .collect::<Result<Vec<_>, _>>()?,
        other => return Err(shape_error("records", "array", &other)),
    };
    Ok(Payload { generated_at, records })
}

fn record_from_avro(value: Value) -> Result<Record, BenchError> {
    let mut fields = record_fields(value)?;
    Ok(Record {
        id: take_int(&mut fields, "id")?,
        title: take_string(&mut fields, "title")?,
        category: take_string(&mut fields, "category")?,
        score: take_int(&mut fields, "score")?,
        active: take_bool(&mut fields, "active")?,
    })
}

fn record_fields(value: Value) -> Result<Vec<(String, Value)>, BenchError> {
    match value {
        Value::Record(fields) => Ok(fields),
        other => Err(shape_error("datum", "record", &other)),
    }
}

fn take_field(fields: &mut Vec<(String, Value)>, name: &str) -> Result<Value, BenchError> {
    let idx = fields
        .iter()
        .position(|(n, _)| n == name)
        .ok_or_else(|| BenchError::decode("avro", format!("missing field '{name}'")))?;
    Ok(fields.swap_remove(idx).1)
}

fn take_string(fields: &mut Vec<(String, Value)>, name: &str) -> Result<String, BenchError> {
    match take_field(fields, name)? {
        Value::String(s) => Ok(s),
        other => Err(shape_error(name, "string", &other)),
    }
}

fn take_int(fields: &mut Vec<(String, Value)>, name: &str) -> Result<i32, BenchError> {
    match take_field(fields, name)? {
        Value::Int(i) => Ok(i),
        other => Err(shape_error(name, "int", &other)),
    }
}

fn take_bool(fields: &mut Vec<(String, Value)>, name: &str) -> Result<bool, BenchError> {
    match take_field(fields, name)? {
        Value::Boolean(b) => Ok(b),
        other => Err(shape_error(name, "boolean", &other)),
    }
}

fn shape_error(field: &str, expected: &str, got: &Value) -> BenchError {
    BenchError::decode("avro", format!("field '{field}': expected {expected}, got {}", value_kind(got)))
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Boolean(_) => "boolean",
        Value::Int(_) => "int",
        Value::Long(_) => "long",
        Value::Float(_) | Value::Double(_) => "float",
        Value::String(_) => "string",
        Value::Bytes(_) => "bytes",
        Value::Array(_) => "array",
        Value::Map(_) => "map",
        Value::Record(_) => "record",
        _ => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_payload;

    fn codec() -> AvroCodec {
        AvroCodec::new(&SchemaRegistry::new().unwrap())
    }

    #[test]
    fn round_trip_preserves_structure() {
        let codec = codec();
        let payload = sample_payload(7);
        let bytes = codec.encode(&payload).unwrap();
        let decoded = codec.decode(&bytes).unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn output_is_smaller_than_msgpack() {
        let payload = sample_payload(50);
        let avro = codec().encode(&payload).unwrap();
        let msgpack = crate::MsgPackCodec.encode(&payload).unwrap();
        assert!(avro.len() < msgpack.len());
    }

    #[test]
    fn truncated_input_is_a_decode_error() {
        let codec = codec();
        let payload = sample_payload(7);
        let bytes = codec.encode(&payload).unwrap();
        let err = codec.decode(&bytes[..bytes.len() / 2]).unwrap_err();
        assert!(matches!(err, BenchError::Decode { codec: "avro", .. }));
    }

    #[test]
    fn garbage_header_is_a_decode_error() {
        let err = codec().decode(&[0xff; 16]).unwrap_err();
        assert!(matches!(err, BenchError::Decode { codec: "avro", .. }));
    }
}
