use serde::{Deserialize, Serialize};

/// A single synthetic record. Immutable once generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// 1-based sequential id, unique within a payload.
    pub id: i32,
    pub title: String,
    /// One of ten deterministic buckets (`Category 0` .. `Category 9`).
    pub category: String,
    /// Always in `[0, 997)`.
    pub score: i32,
    pub active: bool,
}

/// The full dataset that gets encoded, benchmarked and served: a
/// generation timestamp plus an ordered record sequence.
///
/// Record order is significant and must survive every codec round trip.
/// Wire field names are camelCase (`generatedAt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payload {
    /// Wall-clock time of generation, ISO-8601 with millisecond
    /// precision. Carried as text by every codec.
    pub generated_at: String,
    pub records: Vec<Record>,
}
