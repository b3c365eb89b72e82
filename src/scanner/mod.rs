pub mod frame_scanner;
pub mod markers;
pub mod source;

pub use frame_scanner::{Frame, FrameScanner};
pub use source::FrameSource;
