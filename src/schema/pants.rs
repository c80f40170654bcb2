//! Pants lockfile schemas
//!
//! Pants wraps a pex or coursier lockfile with a comment header carrying
//! JSON metadata:
//!
//! ```text
//! // This lockfile was autogenerated by Pants. To regenerate, run:
//! //
//! //    ./pants generate-lockfiles --resolve=python-default
//! //
//! // --- BEGIN PANTS LOCKFILE METADATA: DO NOT EDIT OR REMOVE ---
//! // {
//! //   "version": 3
//! // }
//! // --- END PANTS LOCKFILE METADATA ---
//!
//! { ...pex lockfile... }
//! ```
//!
//! The metadata becomes [`LockfileData::raw`]; the body is parsed with the
//! embedded schema, which supplies the package list.

use serde_json::Value;

use crate::io::Source;
use crate::lockfile::LockfileInfo;
use crate::parser::{FormatChain, ParseError, Params};
use crate::registries::{FORMAT_TRAIT, Registries, SCHEMA_TRAIT};
use crate::registry::NAME_TRAIT;
use crate::schema::traits::{InputSchema, LockfileData};

/// Delimiter of the metadata section inside the header
const METADATA_DELIMITER: &str = "^--- ";

#[derive(Debug)]
pub struct PantsLockfileData {
    raw: Value,
    embedded: Box<dyn LockfileData>,
}

impl PantsLockfileData {
    pub fn embedded(&self) -> &dyn LockfileData {
        self.embedded.as_ref()
    }
}

impl LockfileData for PantsLockfileData {
    fn raw(&self) -> &Value {
        &self.raw
    }

    fn info(&self) -> LockfileInfo {
        self.embedded.info()
    }
}

/// Header-wrapped lockfile parsed by an embedded schema
pub struct PantsLockfileSchema {
    name: &'static str,
    schema: &'static str,
    header_prefix: &'static str,
    embedded: &'static str,
}

impl PantsLockfileSchema {
    pub fn pex() -> Self {
        Self {
            name: "PantsPexLockfileSchema",
            schema: "pants-pex",
            header_prefix: "//",
            embedded: "pex",
        }
    }

    pub fn coursier() -> Self {
        Self {
            name: "PantsCoursierLockfileSchema",
            schema: "pants-coursier",
            header_prefix: "#",
            embedded: "coursier",
        }
    }

    fn read_metadata(
        &self,
        source: &mut dyn Source,
        registries: &Registries,
    ) -> Result<Value, ParseError> {
        FormatChain::new(
            registries,
            &[(NAME_TRAIT, "CommentBlock")],
            Params::new().with("prefix", self.header_prefix),
        )?
        .chain(
            &[(NAME_TRAIT, "Sections")],
            Params::new()
                .with("delimiter", METADATA_DELIMITER)
                .with("select", 1),
        )?
        .chain(&[(FORMAT_TRAIT, "json")], Params::new())?
        .parse(source)?
        .into_value()
    }
}

impl InputSchema for PantsLockfileSchema {
    fn name(&self) -> &'static str {
        self.name
    }

    fn schema(&self) -> &'static str {
        self.schema
    }

    fn parse(
        &self,
        source: &mut dyn Source,
        registries: &Registries,
    ) -> Result<Box<dyn LockfileData>, ParseError> {
        let raw = self.read_metadata(source, registries)?;
        let embedded = registries
            .schemas
            .lookup(&[(SCHEMA_TRAIT, self.embedded)])?
            .parse(source, registries)?;

        Ok(Box::new(PantsLockfileData { raw, embedded }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Cursor;

    const PANTS_PEX: &str = r#"// This lockfile was autogenerated by Pants. To regenerate, run:
//
//    ./pants generate-lockfiles --resolve=python-default
//
// --- BEGIN PANTS LOCKFILE METADATA: DO NOT EDIT OR REMOVE ---
// {
//   "version": 3,
//   "valid_for_interpreter_constraints": ["CPython==3.9.*"]
// }
// --- END PANTS LOCKFILE METADATA ---

{
  "pex_version": "2.1.137",
  "locked_resolves": [
    {"locked_requirements": [{"project_name": "ansicolors", "version": "1.1.8"}]}
  ]
}
"#;

    const PANTS_COURSIER: &str = r#"# This lockfile was autogenerated by Pants. To regenerate, run:
#
#    ./pants generate-lockfiles --resolve=jvm-default
#
# --- BEGIN PANTS LOCKFILE METADATA: DO NOT EDIT OR REMOVE ---
# {
#   "version": 1,
#   "generated_with_requirements": []
# }
# --- END PANTS LOCKFILE METADATA ---

[[entries]]
[entries.coord]
group = "junit"
artifact = "junit"
version = "4.13.2"
"#;

    #[test]
    fn pex_header_becomes_raw_and_body_supplies_info() {
        let data = PantsLockfileSchema::pex()
            .parse(&mut Cursor::new(PANTS_PEX), &Registries::builtin())
            .unwrap();

        assert_eq!(
            data.raw(),
            &json!({
                "version": 3,
                "valid_for_interpreter_constraints": ["CPython==3.9.*"]
            })
        );
        assert_eq!(data.info().get("ansicolors").unwrap().to_string(), "1.1.8");
    }

    #[test]
    fn coursier_header_uses_hash_prefix() {
        let data = PantsLockfileSchema::coursier()
            .parse(&mut Cursor::new(PANTS_COURSIER), &Registries::builtin())
            .unwrap();

        assert_eq!(data.raw()["version"], 1);
        assert_eq!(data.info().get("junit").unwrap().to_string(), "4.13.2");
    }

    #[test]
    fn plain_lockfile_has_no_header() {
        let result = PantsLockfileSchema::pex().parse(
            &mut Cursor::new(r#"{"pex_version": "2.1.137", "locked_resolves": []}"#),
            &Registries::builtin(),
        );

        assert!(matches!(result, Err(ParseError::NotACommentBlock)));
    }

    #[test]
    fn header_without_metadata_section_is_rejected() {
        let result = PantsLockfileSchema::coursier().parse(
            &mut Cursor::new("# This file is automatically @generated by Cargo.\nversion = 3\n"),
            &Registries::builtin(),
        );

        assert!(matches!(
            result,
            Err(ParseError::SectionIndex { index: 1, len: 1 })
        ));
    }

    #[test]
    fn missing_embedded_schema_is_a_lookup_error() {
        let mut registries = Registries::builtin();
        registries.schemas = crate::registry::TraitRegistry::<dyn InputSchema>::new("schemas")
            .with_trait(SCHEMA_TRAIT, |s| Some(s.schema().to_owned()));

        let result = PantsLockfileSchema::pex().parse(&mut Cursor::new(PANTS_PEX), &registries);

        assert!(matches!(result, Err(ParseError::Lookup(_))));
    }
}
