//! Compare two versions of a dependency lockfile
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Source    │────▶│ FormatChain │────▶│   Schema    │
//! │ (BufRead +  │     │  (stages)   │     │ (typed view)│
//! │    Seek)    │     └─────────────┘     └─────────────┘
//! └─────────────┘                                │
//!                                                ▼
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Encoder   │◀────│LockfileDiff │◀────│LockfileInfo │
//! │(text, json) │     │ (5 buckets) │     │(name → ver) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! Stages, schemas and encoders are selected from the [`Registries`]
//! context. Auto-detection tries candidates in registration order and
//! rewinds the source after every failed attempt.
//!
//! # Modules
//!
//! - [`io`]: seekable source trait and rewind captures
//! - [`registry`]: trait-keyed implementation registry
//! - [`parser`]: pipeline stages, format chains and auto-detection
//! - [`schema`]: lockfile schemas (pex, PEX-INFO and PEX apps, pants, coursier, Cargo.lock)
//! - [`version`]: version ordering and bump classification
//! - [`lockfile`]: lockfile snapshots and diffs
//! - [`output`]: text, JSON and YAML encoders
//! - [`git`]: reading lockfiles from git revisions
//! - [`config`]: command line defaults

pub mod config;
pub mod git;
pub mod io;
pub mod lockfile;
pub mod output;
pub mod parser;
pub mod registries;
pub mod registry;
pub mod schema;
pub mod version;

pub use registries::Registries;
