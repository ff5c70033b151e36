pub mod bench;
pub mod dataset;
pub mod verify;

pub use bench::{run_trials, OpFailure, OpSample, TrialReport};
pub use dataset::generate;
pub use verify::{verify, CodecResult};
