//! Section assembly: exactly one open section during a linear scan.

use crate::model::{Attributes, Section};

/// Owns the open section and the sections closed so far.
#[derive(Debug)]
pub struct SectionAssembler {
    open: Section,
    closed: Vec<Section>,
    next_sequence: u32,
}

impl SectionAssembler {
    /// Start with a preamble section carrying `attributes`.
    pub fn new(preamble_heading: &str, attributes: Attributes) -> Self {
        Self {
            open: Section::new(preamble_heading, attributes, 0),
            closed: Vec::new(),
            next_sequence: 1,
        }
    }

    /// The section currently receiving body text.
    pub fn current(&self) -> &Section {
        &self.open
    }

    /// Number of sections opened so far, preamble included.
    pub fn opened(&self) -> usize {
        self.closed.len() + 1
    }

    /// Close the open section and open a new one.
    pub fn open_section(&mut self, heading: impl Into<String>, attributes: Attributes) {
        let next = Section::new(heading, attributes, self.next_sequence);
        self.next_sequence += 1;
        let previous = std::mem::replace(&mut self.open, next);
        self.closed.push(previous);
    }

    /// Append body text to the open section.
    pub fn append_body(&mut self, text: &str) {
        self.open.append_body(text);
    }

    /// Close the last section and return the ordered list.
    ///
    /// A leading preamble whose body is blank is dropped.
    pub fn finish(mut self) -> Vec<Section> {
        let last = std::mem::replace(&mut self.open, Section::new("", Attributes::default(), 0));
        self.closed.push(last);

        if self
            .closed
            .first()
            .is_some_and(|s| s.sequence == 0 && s.has_empty_body())
        {
            self.closed.remove(0);
        }
        self.closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Alignment, FontSize};

    fn preamble() -> Attributes {
        Attributes::preamble(FontSize::from_points(10.0), 1)
    }

    #[test]
    fn test_empty_preamble_dropped() {
        let mut asm = SectionAssembler::new("Preamble", preamble());
        asm.open_section("Eligibility", Attributes::synthetic(1));
        asm.append_body("Employees qualify");

        let sections = asm.finish();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].heading, "Eligibility");
        assert_eq!(sections[0].body, "Employees qualify");
        assert_eq!(sections[0].sequence, 1);
    }

    #[test]
    fn test_preamble_with_body_kept() {
        let mut asm = SectionAssembler::new("Preamble", preamble());
        asm.append_body("Welcome to your plan");
        asm.open_section("Eligibility", Attributes::synthetic(2));

        let sections = asm.finish();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].heading, "Preamble");
        assert_eq!(sections[0].sequence, 0);
        assert_eq!(sections[1].page, 2);
    }

    #[test]
    fn test_body_joined_without_trailing_space() {
        let mut asm = SectionAssembler::new("Preamble", preamble());
        asm.append_body("Welcome to");
        asm.append_body("your plan");
        asm.open_section("Eligibility", Attributes::synthetic(1));
        asm.append_body("Employees qualify");

        let sections = asm.finish();
        assert_eq!(sections[0].body, "Welcome to your plan");
        assert_eq!(sections[1].body, "Employees qualify");
    }

    #[test]
    fn test_preamble_attributes() {
        let asm = SectionAssembler::new("Preamble", preamble());
        let attrs = &asm.current().attributes;
        assert_eq!(attrs.size, FontSize::from_points(10.0));
        assert_eq!(attrs.alignment, Alignment::Left);
        assert_eq!(attrs.indentation, 0);
        assert!(attrs.formatting.is_empty());
        assert_eq!(asm.current().page, 1);
    }

    #[test]
    fn test_sequences_increase() {
        let mut asm = SectionAssembler::new("Preamble", preamble());
        for heading in ["One", "Two", "Three"] {
            asm.open_section(heading, Attributes::synthetic(1));
            assert_eq!(asm.current().heading, heading);
        }
        assert_eq!(asm.opened(), 4);

        let sections = asm.finish();
        let seqs: Vec<u32> = sections.iter().map(|s| s.sequence).collect();
        assert_eq!(seqs, vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_document() {
        let asm = SectionAssembler::new("Preamble", preamble());
        assert!(asm.finish().is_empty());
    }
}
