//! Composable chain of pipeline stages
//!
//! Each stage is selected from the format registry and parameterised at the
//! use site. The first stage reads the caller's source; every later stage
//! reads the previous stage's output.

use std::sync::Arc;

use tracing::debug;

use crate::io::Source;
use crate::parser::traits::{InputFormat, ParseError};
use crate::parser::types::{ParsedData, Params};
use crate::registries::Registries;
use crate::registry::RegistryError;

struct Stage {
    format: Arc<dyn InputFormat>,
    params: Params,
}

/// Ordered, reusable sequence of pipeline stages
pub struct FormatChain<'r> {
    registries: &'r Registries,
    stages: Vec<Stage>,
}

impl<'r> FormatChain<'r> {
    /// Start a chain with the stage matching `selection`
    pub fn new(
        registries: &'r Registries,
        selection: &[(&str, &str)],
        params: Params,
    ) -> Result<Self, RegistryError> {
        Self {
            registries,
            stages: Vec::new(),
        }
        .chain(selection, params)
    }

    /// Append the stage matching `selection`
    pub fn chain(mut self, selection: &[(&str, &str)], params: Params) -> Result<Self, RegistryError> {
        let format = self.registries.formats.lookup(selection)?;
        self.stages.push(Stage { format, params });
        Ok(self)
    }

    /// Stage names in execution order
    pub fn stages(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.format.name()).collect()
    }

    /// Run every stage in order over `source`
    pub fn parse(&self, source: &mut dyn Source) -> Result<ParsedData, ParseError> {
        let mut stages = self.stages.iter();
        let Some(first) = stages.next() else {
            return Err(ParseError::FormatMismatch("empty format chain".to_string()));
        };

        debug!("Running stage {}", first.format.name());
        let mut data = first.format.parse(source, &first.params, self.registries)?;
        for stage in stages {
            debug!("Running stage {}", stage.format.name());
            let mut input = data.source();
            data = stage.format.parse(&mut input, &stage.params, self.registries)?;
        }
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::{Cursor, Seek};

    const PANTS_HEADER: &str = "\
// This lockfile was autogenerated by Pants.
//
// --- BEGIN PANTS LOCKFILE METADATA: DO NOT EDIT OR REMOVE ---
// {
//   \"version\": 2
// }
// --- END PANTS LOCKFILE METADATA ---
{\"body\": true}
";

    fn metadata_chain(registries: &Registries) -> FormatChain<'_> {
        FormatChain::new(
            registries,
            &[("name", "CommentBlock")],
            Params::new().with("prefix", "//"),
        )
        .unwrap()
        .chain(
            &[("name", "Sections")],
            Params::new().with("delimiter", "^--- ").with("select", 1),
        )
        .unwrap()
        .chain(&[("format", "json")], Params::new())
        .unwrap()
    }

    #[test]
    fn chain_threads_output_through_stages() {
        let registries = Registries::builtin();
        let chain = metadata_chain(&registries);
        let mut source = Cursor::new(PANTS_HEADER);

        let result = chain.parse(&mut source).unwrap();

        assert_eq!(chain.stages(), vec!["CommentBlock", "Sections", "JSON"]);
        assert_eq!(result, ParsedData::Value(json!({"version": 2})));
    }

    #[test]
    fn chain_leaves_source_after_first_stage_input() {
        let registries = Registries::builtin();
        let chain = metadata_chain(&registries);
        let mut source = Cursor::new(PANTS_HEADER);

        chain.parse(&mut source).unwrap();
        let body = ParsedData::Value(json!({"body": true}));
        let rest = FormatChain::new(&registries, &[("format", "json")], Params::new())
            .unwrap()
            .parse(&mut source)
            .unwrap();

        assert_eq!(rest, body);
    }

    #[test]
    fn chain_is_reusable_across_sources() {
        let registries = Registries::builtin();
        let chain = FormatChain::new(&registries, &[("format", "json")], Params::new()).unwrap();

        let first = chain.parse(&mut Cursor::new(r#"{"a": 1}"#)).unwrap();
        let second = chain.parse(&mut Cursor::new(r#"{"b": 2}"#)).unwrap();

        assert_eq!(first, ParsedData::Value(json!({"a": 1})));
        assert_eq!(second, ParsedData::Value(json!({"b": 2})));
    }

    #[test]
    fn unknown_stage_fails_at_build_time() {
        let registries = Registries::builtin();
        let result = FormatChain::new(&registries, &[("format", "xml")], Params::new());

        assert!(matches!(
            result,
            Err(RegistryError::ImplementationNotFound { .. })
        ));
    }

    #[test]
    fn stage_failure_propagates() {
        let registries = Registries::builtin();
        let chain = metadata_chain(&registries);
        let mut source = Cursor::new("{\"no\": \"header\"}\n");

        let result = chain.parse(&mut source);

        assert!(matches!(result, Err(ParseError::NotACommentBlock)));
        assert_eq!(source.stream_position().unwrap(), 0);
    }
}
