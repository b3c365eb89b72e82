pub mod frame_writer;
pub mod report;
pub mod sequence;

pub use frame_writer::{ExtractionProgress, FrameWriter};
pub use report::{ConfigSnapshot, InputOutcome, InputStatus, RunReport};
pub use sequence::{BootstrapOutcome, SequenceCounter};
