//! Text block stages
//!
//! - [`CommentBlock`]: extract a leading comment block and strip its prefix
//! - [`Sections`]: split text into sections at delimiter lines

use regex::Regex;
use serde::Deserialize;

use crate::io::{Capture, Source};
use crate::parser::traits::{InputFormat, ParseError};
use crate::parser::types::{ParsedData, Params};
use crate::registries::Registries;

/// Default comment prefix
pub const DEFAULT_COMMENT_PREFIX: &str = "//";

/// Default section delimiter: an empty line
pub const DEFAULT_SECTION_DELIMITER: &str = "^\n$";

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct CommentBlockParams {
    prefix: String,
}

impl Default for CommentBlockParams {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_COMMENT_PREFIX.to_string(),
        }
    }
}

/// Extracts the leading comment block of a source
///
/// Parameters: `prefix` (default `//`).
pub struct CommentBlock;

impl InputFormat for CommentBlock {
    fn name(&self) -> &'static str {
        "CommentBlock"
    }

    fn parse(
        &self,
        source: &mut dyn Source,
        params: &Params,
        _registries: &Registries,
    ) -> Result<ParsedData, ParseError> {
        let CommentBlockParams { prefix } = params.decode(self.name())?;
        extract_comment_block(source, &prefix).map(ParsedData::Text)
    }
}

/// Read the comment lines starting at the current position and return them
/// with their common prefix removed.
///
/// Whitespace-only lines inside the block are skipped. The first line that
/// does not start with `prefix` ends the block and is left unread.
pub fn extract_comment_block(source: &mut dyn Source, prefix: &str) -> Result<String, ParseError> {
    if prefix.is_empty() {
        return Err(ParseError::NotACommentBlock);
    }

    let mut common: Option<String> = None;
    let mut lines = Vec::new();

    {
        let mut capture = Capture::new(&mut *source)?;
        loop {
            let mut line = String::new();
            if capture.read_line(&mut line)? == 0 {
                break;
            }
            if line.trim().is_empty() {
                capture.commit()?;
                continue;
            }
            if !line.starts_with(prefix) {
                break;
            }
            capture.commit()?;
            common = Some(match common {
                None => line.clone(),
                Some(current) => common_prefix(&current, &line),
            });
            lines.push(line);
        }
    }

    let common = common
        .filter(|c| !c.is_empty())
        .ok_or(ParseError::NotACommentBlock)?;

    // Spaces in the common prefix are optional, so "// " also strips "//".
    let pattern = Regex::new(&format!("^{}", regex::escape(&common).replace(' ', " ?"))).map_err(
        |e| ParseError::InvalidParams {
            stage: "CommentBlock".to_string(),
            message: e.to_string(),
        },
    )?;

    Ok(lines
        .iter()
        .map(|line| pattern.replace(line, ""))
        .collect())
}

/// Longest common leading substring, with a newline in `line` matching any
/// character of `current`
///
/// Only the incoming line's newline is a wildcard. If the block opens with a
/// bare `//\n`, the prefix stays `//` and later lines keep their leading
/// space: `//\n// a\n` yields `"\n a\n"`.
fn common_prefix(current: &str, line: &str) -> String {
    for ((idx, left), right) in current.char_indices().zip(line.chars()) {
        if right == left || right == '\n' {
            continue;
        }
        return current[..idx].to_string();
    }
    current.to_string()
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SectionsParams {
    delimiter: String,
    select: Option<usize>,
}

impl Default for SectionsParams {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_SECTION_DELIMITER.to_string(),
            select: None,
        }
    }
}

/// Splits a source into sections at lines matching a delimiter pattern
///
/// Parameters: `delimiter` (regex, default an empty line) and `select`
/// (index of the single section to return).
pub struct Sections;

impl InputFormat for Sections {
    fn name(&self) -> &'static str {
        "Sections"
    }

    fn parse(
        &self,
        source: &mut dyn Source,
        params: &Params,
        _registries: &Registries,
    ) -> Result<ParsedData, ParseError> {
        let SectionsParams { delimiter, select } = params.decode(self.name())?;
        let delimiter = Regex::new(&delimiter).map_err(|e| ParseError::InvalidParams {
            stage: self.name().to_string(),
            message: e.to_string(),
        })?;

        let mut sections = split_sections(source, &delimiter)?;
        match select {
            None => Ok(ParsedData::Sections(sections)),
            Some(index) if index < sections.len() => {
                Ok(ParsedData::Text(sections.swap_remove(index)))
            }
            Some(index) => Err(ParseError::SectionIndex {
                index,
                len: sections.len(),
            }),
        }
    }
}

/// Split the rest of `source` at lines matching `delimiter`
///
/// Delimiter lines are dropped. A trailing section without a following
/// delimiter is kept.
pub fn split_sections(source: &mut dyn Source, delimiter: &Regex) -> Result<Vec<String>, ParseError> {
    let mut sections = Vec::new();
    let mut current = String::new();

    loop {
        let mut line = String::new();
        if source.read_line(&mut line)? == 0 {
            break;
        }
        if delimiter.is_match(&line) {
            sections.push(std::mem::take(&mut current));
        } else {
            current.push_str(&line);
        }
    }
    if !current.is_empty() {
        sections.push(current);
    }

    Ok(sections)
}
