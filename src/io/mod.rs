//! Stream layer
//! - rewind.rs: capture/commit/rewind checkpointing over seekable streams

pub mod rewind;

pub use rewind::{Capture, CaptureError};

use std::io::{BufRead, Seek};

/// Input stream consumed by the parsing pipeline.
///
/// Every source must support line reads and absolute seeking so that
/// speculative parses can be undone.
pub trait Source: BufRead + Seek {}

impl<T: BufRead + Seek + ?Sized> Source for T {}
