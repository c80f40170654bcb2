//! Speculative auto-detection over registered implementations
//!
//! Candidates are tried one at a time in registration order. Each attempt
//! runs inside a [`Capture`], so a failed attempt leaves the source exactly
//! where it found it. The first success wins and keeps its stream position.

use tracing::debug;

use crate::io::{Capture, Source};
use crate::parser::traits::{CandidateFailure, ParseError};
use crate::registry::{Identify, TraitRegistry};

/// Try every implementation registered under `trait_name`, except the one
/// whose identity is `exclude`, until one of them parses the source.
///
/// Errors that are not recoverable (see [`ParseError::is_recoverable`])
/// abort the cascade immediately.
pub fn auto_detect<T, R, F>(
    registry: &TraitRegistry<T>,
    trait_name: &str,
    exclude: &str,
    source: &mut dyn Source,
    mut attempt: F,
) -> Result<R, ParseError>
where
    T: ?Sized + Identify + 'static,
    F: FnMut(&T, &mut dyn Source) -> Result<R, ParseError>,
{
    let mut failures = Vec::new();

    for candidate in registry.implementations(trait_name) {
        let name = candidate.identity().to_string();
        if name == exclude {
            continue;
        }

        let mut capture = Capture::new(&mut *source)?;
        match attempt(candidate.as_ref(), &mut *capture) {
            Ok(result) => {
                capture.release();
                debug!("Auto-detected {} '{}'", trait_name, name);
                return Ok(result);
            }
            Err(e) if e.is_recoverable() => {
                debug!("Candidate {} '{}' rejected input: {}", trait_name, name, e);
                failures.push(CandidateFailure {
                    candidate: name,
                    error: e,
                });
            }
            Err(e) => return Err(e),
        }
    }

    Err(ParseError::AutoDetectExhausted { failures })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, Cursor, Read, Seek, SeekFrom};
    use std::sync::Arc;

    use crate::registry::RegistryError;

    /// Candidate that reads some lines and then succeeds or fails
    struct Candidate {
        name: &'static str,
        kind: Option<&'static str>,
        lines: usize,
        outcome: Outcome,
    }

    #[derive(Clone, Copy)]
    enum Outcome {
        Succeed,
        Mismatch,
        LookupFailure,
    }

    impl Identify for Candidate {
        fn identity(&self) -> &str {
            self.name
        }
    }

    impl Candidate {
        fn run(&self, source: &mut dyn Source) -> Result<String, ParseError> {
            for _ in 0..self.lines {
                let mut line = String::new();
                source.read_line(&mut line)?;
            }
            match self.outcome {
                Outcome::Succeed => Ok(self.name.to_string()),
                Outcome::Mismatch => Err(ParseError::FormatMismatch(format!(
                    "{} does not match",
                    self.name
                ))),
                Outcome::LookupFailure => Err(ParseError::Lookup(
                    RegistryError::UnknownSelection { kind: "test" },
                )),
            }
        }
    }

    fn candidate(name: &'static str, lines: usize, outcome: Outcome) -> Arc<Candidate> {
        Arc::new(Candidate {
            name,
            kind: Some("kind"),
            lines,
            outcome,
        })
    }

    fn registry(candidates: Vec<Arc<Candidate>>) -> TraitRegistry<Candidate> {
        let mut registry = TraitRegistry::<Candidate>::new("candidates")
            .with_trait("kind", |c| c.kind.map(str::to_owned));
        for c in candidates {
            registry.register(c);
        }
        registry
    }

    fn source() -> Cursor<&'static str> {
        Cursor::new("one\ntwo\nthree\nfour\n")
    }

    #[test]
    fn first_success_wins_and_keeps_position() {
        let registry = registry(vec![
            candidate("A", 2, Outcome::Mismatch),
            candidate("B", 3, Outcome::Mismatch),
            candidate("C", 1, Outcome::Succeed),
            candidate("D", 0, Outcome::Succeed),
        ]);
        let mut source = source();

        let result = auto_detect(&registry, "kind", "AutoDetect", &mut source, |c, s| c.run(s));

        assert_eq!(result.unwrap(), "C");
        assert_eq!(source.position(), 4);
    }

    #[test]
    fn failed_attempts_are_rolled_back() {
        let registry = registry(vec![
            candidate("A", 2, Outcome::Mismatch),
            candidate("B", 0, Outcome::Succeed),
        ]);
        let mut source = source();
        source.seek(SeekFrom::Start(4)).unwrap();

        let result = auto_detect(&registry, "kind", "AutoDetect", &mut source, |c, s| {
            let name = c.run(s)?;
            let mut rest = String::new();
            s.read_to_string(&mut rest)?;
            Ok((name, rest))
        });

        assert_eq!(
            result.unwrap(),
            ("B".to_string(), "two\nthree\nfour\n".to_string())
        );
    }

    #[test]
    fn own_entry_is_skipped() {
        let registry = registry(vec![
            candidate("AutoDetect", 0, Outcome::Succeed),
            candidate("A", 1, Outcome::Mismatch),
        ]);
        let mut source = source();

        let result = auto_detect(&registry, "kind", "AutoDetect", &mut source, |c, s| c.run(s));

        let Err(ParseError::AutoDetectExhausted { failures }) = result else {
            panic!("expected exhaustion");
        };
        let names: Vec<_> = failures.iter().map(|f| f.candidate.as_str()).collect();
        assert_eq!(names, vec!["A"]);
    }

    #[test]
    fn exhaustion_reports_every_candidate_in_order() {
        let registry = registry(vec![
            candidate("A", 1, Outcome::Mismatch),
            candidate("B", 2, Outcome::Mismatch),
            candidate("C", 3, Outcome::Mismatch),
        ]);
        let mut source = source();

        let result = auto_detect(&registry, "kind", "AutoDetect", &mut source, |c, s| c.run(s));

        let Err(ParseError::AutoDetectExhausted { failures }) = result else {
            panic!("expected exhaustion");
        };
        let names: Vec<_> = failures.iter().map(|f| f.candidate.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert!(
            failures
                .iter()
                .all(|f| matches!(f.error, ParseError::FormatMismatch(_)))
        );
        assert_eq!(source.position(), 0);
    }

    #[test]
    fn unrecoverable_error_stops_the_cascade() {
        let registry = registry(vec![
            candidate("A", 1, Outcome::LookupFailure),
            candidate("B", 0, Outcome::Succeed),
        ]);
        let mut source = source();

        let result = auto_detect(&registry, "kind", "AutoDetect", &mut source, |c, s| c.run(s));

        assert!(matches!(result, Err(ParseError::Lookup(_))));
        assert_eq!(source.position(), 0);
    }

    #[test]
    fn empty_registry_is_exhausted_immediately() {
        let registry = registry(vec![]);
        let mut source = source();

        let result = auto_detect(&registry, "kind", "AutoDetect", &mut source, |c, s| c.run(s));

        assert!(matches!(
            result,
            Err(ParseError::AutoDetectExhausted { ref failures }) if failures.is_empty()
        ));
    }

    #[test]
    fn candidates_without_the_trait_are_not_tried() {
        let mut registry = registry(vec![candidate("A", 1, Outcome::Mismatch)]);
        registry.register(Arc::new(Candidate {
            name: "Hidden",
            kind: None,
            lines: 0,
            outcome: Outcome::Succeed,
        }));
        let mut source = source();

        let result = auto_detect(&registry, "kind", "AutoDetect", &mut source, |c, s| c.run(s));

        assert!(matches!(result, Err(ParseError::AutoDetectExhausted { .. })));
    }
}
