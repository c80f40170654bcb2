//! Trait-based implementation registry
//!
//! Implementations are addressed by one or more named traits (e.g. `format`,
//! `schema`). Every implementation is also addressable by its own identity
//! under the implicit `name` trait.
//!
//! ```text
//! let mut formats = TraitRegistry::<dyn InputFormat>::new("formats")
//!     .with_trait("format", |f| f.format().map(str::to_owned));
//! formats.register(Arc::new(JsonFormat));
//! formats.lookup(&[("format", "json")])?;
//! formats.lookup(&[("name", "JSON")])?;
//! ```

pub mod error;

pub use error::RegistryError;

use std::sync::Arc;

use indexmap::IndexMap;

/// Name of the identity trait every registry carries
pub const NAME_TRAIT: &str = "name";

/// Gives an implementation its identity within a registry
pub trait Identify {
    fn identity(&self) -> &str;
}

type Accessor<T> = Box<dyn Fn(&T) -> Option<String> + Send + Sync>;

/// Dispatch table mapping (trait name, trait value) pairs to implementations
pub struct TraitRegistry<T: ?Sized> {
    kind: &'static str,
    accessors: Vec<(&'static str, Accessor<T>)>,
    entries: Vec<Arc<T>>,
    index: IndexMap<String, IndexMap<String, usize>>,
}

impl<T: ?Sized + Identify + 'static> TraitRegistry<T> {
    /// Create an empty registry; `kind` names it in error messages
    pub fn new(kind: &'static str) -> Self {
        let identity: Accessor<T> = Box::new(|implementation: &T| {
            Some(implementation.identity().to_string())
        });
        Self {
            kind,
            accessors: vec![(NAME_TRAIT, identity)],
            entries: Vec::new(),
            index: IndexMap::new(),
        }
    }

    /// Declare a trait whose value is read off each registered implementation
    ///
    /// Implementations for which the accessor returns `None` are not
    /// addressable on that trait.
    pub fn with_trait<F>(mut self, name: &'static str, accessor: F) -> Self
    where
        F: Fn(&T) -> Option<String> + Send + Sync + 'static,
    {
        self.accessors.push((name, Box::new(accessor)));
        self
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Register an implementation under every declared trait
    pub fn register(&mut self, implementation: Arc<T>) -> &mut Self {
        self.register_with(implementation, &[])
    }

    /// Register an implementation under every declared trait plus the given
    /// direct (trait, value) pairs
    pub fn register_with(&mut self, implementation: Arc<T>, traits: &[(&str, &str)]) -> &mut Self {
        let slot = self.entries.len();
        let mut pairs: Vec<(String, String)> = self
            .accessors
            .iter()
            .filter_map(|(name, accessor)| {
                accessor(implementation.as_ref()).map(|value| (name.to_string(), value))
            })
            .collect();
        pairs.extend(
            traits
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string())),
        );

        for (name, value) in pairs {
            self.index.entry(name).or_default().insert(value, slot);
        }
        self.entries.push(implementation);
        self
    }

    /// Return the implementation matching the first (trait, value) pair that
    /// has a registry entry
    pub fn lookup(&self, selection: &[(&str, &str)]) -> Result<Arc<T>, RegistryError> {
        self.find(selection)?
            .ok_or_else(|| RegistryError::ImplementationNotFound {
                kind: self.kind,
                selection: format_selection(selection),
            })
    }

    /// Like [`lookup`](Self::lookup), falling back to `default` when nothing
    /// matches. An empty selection is still an error.
    pub fn lookup_or(
        &self,
        selection: &[(&str, &str)],
        default: Arc<T>,
    ) -> Result<Arc<T>, RegistryError> {
        Ok(self.find(selection)?.unwrap_or(default))
    }

    fn find(&self, selection: &[(&str, &str)]) -> Result<Option<Arc<T>>, RegistryError> {
        if selection.is_empty() {
            return Err(RegistryError::UnknownSelection { kind: self.kind });
        }

        Ok(selection.iter().find_map(|(name, value)| {
            self.index
                .get(*name)
                .and_then(|values| values.get(*value))
                .map(|&slot| Arc::clone(&self.entries[slot]))
        }))
    }

    /// Trait names that have at least one entry, in first-use order
    pub fn traits(&self) -> Vec<&str> {
        self.index.keys().map(String::as_str).collect()
    }

    /// Registered values of one trait, in registration order
    pub fn trait_values(&self, name: &str) -> Vec<&str> {
        self.index
            .get(name)
            .map(|values| values.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Implementations addressable on one trait, in registration order
    pub fn implementations(&self, name: &str) -> Vec<Arc<T>> {
        self.index
            .get(name)
            .map(|values| {
                values
                    .values()
                    .map(|&slot| Arc::clone(&self.entries[slot]))
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn format_selection(selection: &[(&str, &str)]) -> String {
    selection
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join(", ")
}
