pub mod codec;
pub mod error;
pub mod record;
pub mod util;

pub use codec::PayloadCodec;
pub use error::BenchError;
pub use record::{Payload, Record};
