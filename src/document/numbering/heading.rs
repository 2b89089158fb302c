//! Heading classification and prefix reconciliation
//!
//! Each heading either carries a numeric prefix the author typed or gets
//! one synthesized from the section counters. An author-typed prefix is
//! adopted verbatim the first time it appears at a given depth; a repeat
//! of the same prefix is renumbered from the counters so no two headings
//! share a label. The seen-set is an explicit `(depth, label) -> count`
//! map so renumbering decisions are auditable.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use super::section::{SectionCounters, MAX_DEPTH};

/// Numeric prefix at the start of heading text: `1.`, `2.3`, `2.3.1.`
/// followed by whitespace. Anything deeper or partial does not match and
/// is treated as "no existing number".
static HEADING_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+(?:\.\d+){0,2})(\.?)(\s+)").unwrap());

#[derive(Debug, Clone)]
pub(crate) struct ClassifiedHeading {
    /// Reconciled label, e.g. `1.2`
    pub(crate) label: String,
    /// Plain heading text with the reconciled prefix, set only when the
    /// displayed text changed (synthesized or renumbered prefix)
    pub(crate) display_text: Option<String>,
}

#[derive(Debug, Default)]
pub(crate) struct HeadingClassifier {
    seen: HashMap<(u8, String), u32>,
}

impl HeadingClassifier {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Classify one heading and advance the section counters accordingly
    pub(crate) fn classify(
        &mut self,
        counters: &mut SectionCounters,
        level: u8,
        text: &str,
    ) -> ClassifiedHeading {
        let depth = level.clamp(1, MAX_DEPTH);

        if let Some((parts, label)) = extract_prefix(text) {
            if self.record(depth, &label) == 1 {
                // Fresh at this depth: reuse the author's number verbatim
                counters.adopt(depth, &parts);
                return ClassifiedHeading {
                    label,
                    display_text: None,
                };
            }
            // Duplicate: renumber from the counters
            let fresh = render(&counters.advance(depth));
            self.record(depth, &fresh);
            let display_text = replace_prefix(text, &fresh);
            return ClassifiedHeading {
                label: fresh,
                display_text: Some(display_text),
            };
        }

        let label = render(&counters.advance(depth));
        self.record(depth, &label);
        let display_text = prepend_prefix(text, &label);
        ClassifiedHeading {
            label,
            display_text: Some(display_text),
        }
    }

    /// Count an occurrence of a label at a depth; returns the new count
    fn record(&mut self, depth: u8, label: &str) -> u32 {
        let count = self.seen.entry((depth, label.to_string())).or_insert(0);
        *count += 1;
        *count
    }
}

fn render(components: &[u32]) -> String {
    components
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(".")
}

/// Parse an author-typed numeric prefix into its components and label
fn extract_prefix(text: &str) -> Option<(Vec<u32>, String)> {
    let caps = HEADING_PREFIX.captures(text.trim_start())?;
    let label = caps[1].to_string();
    let parts = label
        .split('.')
        .map(|part| part.parse::<u32>().ok())
        .collect::<Option<Vec<u32>>>()?;
    Some((parts, label))
}

/// Swap a stale prefix for a fresh label, keeping the author's punctuation
fn replace_prefix(text: &str, label: &str) -> String {
    let trimmed = text.trim_start();
    match HEADING_PREFIX.captures(trimmed) {
        Some(caps) => format!(
            "{label}{}{}{}",
            &caps[2],
            &caps[3],
            &trimmed[caps.get(0).unwrap().end()..]
        ),
        None => prepend_prefix(trimmed, label),
    }
}

/// Put a synthesized label in front of unnumbered heading text; top-level
/// labels take a trailing period (`1. Introduction`), deeper labels do not
/// (`1.2 Scope`)
fn prepend_prefix(text: &str, label: &str) -> String {
    if label.contains('.') {
        format!("{label} {}", text.trim_start())
    } else {
        format!("{label}. {}", text.trim_start())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_all(headings: &[(u8, &str)]) -> Vec<ClassifiedHeading> {
        let mut counters = SectionCounters::new();
        let mut classifier = HeadingClassifier::new();
        headings
            .iter()
            .map(|(level, text)| classifier.classify(&mut counters, *level, text))
            .collect()
    }

    #[test]
    fn synthesizes_prefix_for_unnumbered_heading() {
        let classified = classify_all(&[(1, "Introduction")]);
        assert_eq!(classified[0].label, "1");
        assert_eq!(
            classified[0].display_text.as_deref(),
            Some("1. Introduction")
        );
    }

    #[test]
    fn adopts_existing_prefix_verbatim() {
        let classified = classify_all(&[(2, "1.1 Scope")]);
        assert_eq!(classified[0].label, "1.1");
        assert!(
            classified[0].display_text.is_none(),
            "an adopted prefix leaves the text untouched"
        );
    }

    #[test]
    fn renumbers_duplicate_prefix_at_same_level() {
        let classified = classify_all(&[(2, "1.1 Scope"), (2, "1.1 Scope")]);
        assert_eq!(classified[1].label, "1.2");
        assert_eq!(classified[1].display_text.as_deref(), Some("1.2 Scope"));
    }

    #[test]
    fn numbering_continues_after_an_adopted_prefix() {
        let classified = classify_all(&[(1, "2. Background"), (1, "Findings")]);
        assert_eq!(classified[1].label, "3");
        assert_eq!(classified[1].display_text.as_deref(), Some("3. Findings"));
    }

    #[test]
    fn malformed_prefix_is_treated_as_absent() {
        let classified = classify_all(&[(1, "1.2.3.4 Too Deep")]);
        assert_eq!(classified[0].label, "1");
        assert_eq!(
            classified[0].display_text.as_deref(),
            Some("1. 1.2.3.4 Too Deep"),
            "an unparseable prefix gets a fresh synthesized label"
        );
    }

    #[test]
    fn reclassifying_own_output_is_a_fixed_point() {
        let first = classify_all(&[(1, "Overview"), (2, "Scope"), (2, "1.2 Terms")]);
        assert_eq!(first[0].display_text.as_deref(), Some("1. Overview"));
        assert_eq!(first[1].display_text.as_deref(), Some("1.1 Scope"));
        assert!(first[2].display_text.is_none());

        let second = classify_all(&[(1, "1. Overview"), (2, "1.1 Scope"), (2, "1.2 Terms")]);
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.label, b.label, "labels must be stable across re-runs");
        }
        assert!(
            second.iter().all(|c| c.display_text.is_none()),
            "second run must not rewrite any heading"
        );
    }
}
