//! Built-in pipeline stages
//! - blocks.rs: CommentBlock and Sections text stages
//! - decoders.rs: JSON, TOML and YAML decoders
//! - detect.rs: decoder auto-detection

pub mod blocks;
pub mod decoders;
pub mod detect;

pub use blocks::{CommentBlock, Sections};
pub use decoders::{JsonFormat, TomlFormat, YamlFormat};
pub use detect::AutoDetectFormat;
