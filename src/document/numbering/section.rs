//! Section counter state machine
//!
//! Tracks the active section/subsection/subsubsection context while the
//! pipeline walks the document in order. Entering a heading at depth `d`
//! advances or overrides the counter at that depth, resets every deeper
//! counter, and resets the paragraph-in-section counter.

/// Deepest heading depth that owns its own counter; markup levels beyond
/// this share it
pub(crate) const MAX_DEPTH: u8 = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SectionCounters {
    section: u32,
    subsection: u32,
    subsubsection: u32,
    /// 0 until the first heading is seen, then the depth of the most
    /// recent heading (1..=3)
    current_level: u8,
    paragraph: u32,
}

impl SectionCounters {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn section(&self) -> u32 {
        self.section
    }

    pub(crate) fn subsection(&self) -> u32 {
        self.subsection
    }

    pub(crate) fn subsubsection(&self) -> u32 {
        self.subsubsection
    }

    pub(crate) fn current_level(&self) -> u8 {
        self.current_level
    }

    pub(crate) fn paragraph(&self) -> u32 {
        self.paragraph
    }

    pub(crate) fn bump_paragraph(&mut self) -> u32 {
        self.paragraph += 1;
        self.paragraph
    }

    /// Enter a heading with no usable numeric prefix: increment the counter
    /// at `depth`, defaulting missing ancestors to 1 so labels never render
    /// with a leading `0.x`. Returns the label components.
    pub(crate) fn advance(&mut self, depth: u8) -> Vec<u32> {
        let depth = depth.clamp(1, MAX_DEPTH);

        if depth >= 2 && self.section == 0 {
            self.section = 1;
        }
        if depth == 3 && self.subsection == 0 {
            self.subsection = 1;
        }

        match depth {
            1 => self.section += 1,
            2 => self.subsection += 1,
            _ => self.subsubsection += 1,
        }
        self.reset_below(depth);
        self.enter(depth);

        self.label_components(depth)
    }

    /// Enter a heading carrying a fresh explicit prefix: its components
    /// override the counters positionally, deeper counters reset
    pub(crate) fn adopt(&mut self, depth: u8, parts: &[u32]) -> Vec<u32> {
        let depth = depth.clamp(1, MAX_DEPTH);

        self.section = parts.first().copied().unwrap_or(self.section.max(1));
        self.subsection = parts.get(1).copied().unwrap_or(0);
        self.subsubsection = parts.get(2).copied().unwrap_or(0);
        self.enter(depth);

        parts.to_vec()
    }

    fn enter(&mut self, depth: u8) {
        self.current_level = depth;
        self.paragraph = 0;
    }

    fn reset_below(&mut self, depth: u8) {
        if depth <= 1 {
            self.subsection = 0;
        }
        if depth <= 2 {
            self.subsubsection = 0;
        }
    }

    fn label_components(&self, depth: u8) -> Vec<u32> {
        match depth {
            1 => vec![self.section],
            2 => vec![self.section, self.subsection],
            _ => vec![self.section, self.subsection, self.subsubsection],
        }
    }
}
