//! Version layer
//!
//! - [`types`]: the [`Version`] value and its ordering
//! - [`bump`]: classification of a change as a major, minor or micro bump

pub mod bump;
pub mod types;

pub use bump::{Bump, BumpLevel, DEFAULT_LEVELS, classify_bump};
pub use types::{Component, Version};
