//! Human-readable report
//!
//! ```text
//!
//! ==                    Upgraded dependencies                     ==
//!
//!   requests                       2.28.1      -->    2.31.0
//! ```

use std::collections::BTreeMap;

use colored::{Color, Colorize};

use crate::lockfile::LockfileDiff;
use crate::output::{EncodeError, OutputFormat, Report};
use crate::version::{Bump, BumpLevel, Version};

#[derive(Debug, Clone, Copy, Default)]
struct Style {
    color: Option<Color>,
    underline: bool,
    blink: bool,
}

impl Style {
    fn fg(color: Color) -> Self {
        Self {
            color: Some(color),
            ..Self::default()
        }
    }
}

/// Text encoder; colours can be turned off for plain output
pub struct TextEncoder {
    colorize: bool,
}

impl TextEncoder {
    pub fn new(colorize: bool) -> Self {
        Self { colorize }
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if !self.colorize {
            return text.to_string();
        }
        let mut painted = text.normal();
        if let Some(color) = style.color {
            painted = painted.color(color);
        }
        if style.underline {
            painted = painted.underline();
        }
        if style.blink {
            painted = painted.blink();
        }
        painted.to_string()
    }

    fn title(&self, text: &str) -> String {
        let heading = format!("== {:^60} ==", text);
        let block = format!("{}\n{}\n", " ".repeat(heading.len()), heading);
        self.paint(
            &block,
            Style {
                underline: true,
                ..Style::default()
            },
        )
    }

    fn print_reqs(
        &self,
        lines: &mut Vec<String>,
        heading: &str,
        reqs: &BTreeMap<String, Version>,
        color: Color,
    ) {
        if reqs.is_empty() {
            return;
        }
        lines.push(self.title(heading));
        for (name, version) in reqs {
            let line = format!("  {:30} {}", name, version);
            lines.push(self.paint(&line, Style::fg(color)));
        }
    }

    fn print_changed(
        &self,
        lines: &mut Vec<String>,
        heading: &str,
        reqs: &BTreeMap<String, (Version, Version)>,
    ) {
        if reqs.is_empty() {
            return;
        }
        lines.push(self.title(heading));
        for (name, (prev, curr)) in reqs {
            lines.push(format!(
                "  {} {} {} {}",
                self.paint(&format!("{:30}", name), Style::fg(Color::Yellow)),
                self.paint(&format!("{:10}", prev.to_string()), Style::fg(Color::Cyan)),
                self.bump_cell(prev, curr),
                self.paint(&curr.to_string(), Style::fg(Color::Green)),
            ));
        }
    }

    /// Seven-column bump marker, e.g. `  -->  ` or `  <==  `
    fn bump_cell(&self, prev: &Version, curr: &Version) -> String {
        let (label, style) = match Bump::classify(prev, curr) {
            Bump::Upgrade(level) => {
                let (marker, color) = bump_marker(level);
                (format!("{}>", marker), Style::fg(color))
            }
            Bump::Downgrade(level) => {
                let (marker, color) = bump_marker(level);
                (
                    format!("<{}", marker),
                    Style {
                        blink: true,
                        ..Style::fg(color)
                    },
                )
            }
            Bump::Unknown => ("???".to_string(), Style::fg(Color::Magenta)),
        };
        self.paint(&format!("{:^7}", label), style)
    }

    fn print_diff(&self, diff: &LockfileDiff) -> Vec<String> {
        let mut lines = Vec::new();
        self.print_reqs(&mut lines, "Unchanged dependencies", &diff.unchanged, Color::Blue);
        self.print_changed(&mut lines, "Upgraded dependencies", &diff.upgraded);
        self.print_changed(&mut lines, "Downgraded dependencies", &diff.downgraded);
        self.print_reqs(&mut lines, "Added dependencies", &diff.added, Color::BrightGreen);
        self.print_reqs(&mut lines, "Removed dependencies", &diff.removed, Color::Magenta);
        lines.push(String::new());
        lines
    }
}

fn bump_marker(level: BumpLevel) -> (&'static str, Color) {
    match level {
        BumpLevel::Major => ("==", Color::Red),
        BumpLevel::Minor => ("--", Color::BrightRed),
        BumpLevel::Micro => ("  ", Color::BrightYellow),
    }
}

impl OutputFormat for TextEncoder {
    fn name(&self) -> &'static str {
        "Text"
    }

    fn format(&self) -> &'static str {
        "text"
    }

    fn encode(&self, report: Report<'_>) -> Result<String, EncodeError> {
        let lines = match report {
            Report::Diff(diff) => self.print_diff(diff),
            Report::Info(info) => {
                let mut lines = Vec::new();
                self.print_reqs(&mut lines, "Locked dependencies", info.dists(), Color::Blue);
                lines.push(String::new());
                lines
            }
        };
        Ok(lines.join("\n"))
    }
}
