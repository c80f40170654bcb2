use thiserror::Error;

/// Error type for trait lookups
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// `lookup` was called without any (trait, value) pair
    #[error("Missing trait selection criteria for {kind}")]
    UnknownSelection { kind: &'static str },

    /// No registered implementation matched any of the pairs
    #[error("No {kind} implementation matches {selection}")]
    ImplementationNotFound {
        kind: &'static str,
        selection: String,
    },
}
