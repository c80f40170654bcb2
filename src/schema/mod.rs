//! Lockfile schemas
//! - traits.rs: InputSchema and LockfileData traits
//! - pex.rs: pex JSON lockfiles
//! - pex_info.rs: PEX-INFO manifests, bare or inside a PEX application
//! - coursier.rs: coursier TOML lockfiles
//! - cargo_lock.rs: Cargo.lock files
//! - pants.rs: pants-wrapped pex and coursier lockfiles
//! - autodetect.rs: schema auto-detection

pub mod autodetect;
pub mod cargo_lock;
pub mod coursier;
pub mod pants;
pub mod pex;
pub mod pex_info;
pub mod traits;

pub use autodetect::AutoDetectSchema;
pub use cargo_lock::CargoLockSchema;
pub use coursier::CoursierLockfileSchema;
pub use pants::PantsLockfileSchema;
pub use pex::PexLockfileSchema;
pub use pex_info::{PexAppSchema, PexInfoSchema};
pub use traits::{InputSchema, LockfileData};
