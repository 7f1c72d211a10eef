// src/extractors/section.rs

//! Marker-driven section tracking.
//!
//! Budget reports have no structure beyond the text itself, so a region is
//! recognised by literal marker substrings. Each layout owns one tracker and
//! folds it over the lines of a document with a pure transition function.

use super::line::Line;

/// How a single line relates to the tracked region after the transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// The line carried the opening marker and is consumed by it.
    Opening,
    /// The line carried the closing marker and is consumed by it.
    Closing,
    /// The line is data inside the extractable region.
    Inside,
    /// The line is outside the extractable region.
    Outside,
}

impl Region {
    pub fn is_marker(self) -> bool {
        matches!(self, Region::Opening | Region::Closing)
    }

    pub fn is_inside(self) -> bool {
        self == Region::Inside
    }
}

/// State of an extractable section (Layouts A and B).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Closed,
    Open,
}

/// Opens on one marker, closes on another; both marker lines are consumed.
#[derive(Debug, Clone, Copy)]
pub struct SectionTracker {
    pub open: &'static str,
    pub close: &'static str,
}

impl SectionTracker {
    pub const fn new(open: &'static str, close: &'static str) -> Self {
        Self { open, close }
    }

    pub fn step(&self, state: Section, line: &Line) -> (Section, Region) {
        if line.contains(self.open) {
            return (Section::Open, Region::Opening);
        }
        if line.contains(self.close) {
            return (Section::Closed, Region::Closing);
        }
        match state {
            Section::Open => (state, Region::Inside),
            Section::Closed => (state, Region::Outside),
        }
    }
}

/// State of a summary region that must not be extracted (Layout C).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Summary {
    #[default]
    Extracting,
    Skipping,
}

/// Inverted tracker: the marked region is skipped and everything else is data.
///
/// The opening marker does not consume its line on its own; the line still
/// reaches the closing-marker check, so a line carrying both markers leaves
/// the tracker in [`Summary::Extracting`].
#[derive(Debug, Clone, Copy)]
pub struct SkipTracker {
    pub open: &'static str,
    pub close: &'static str,
}

impl SkipTracker {
    pub const fn new(open: &'static str, close: &'static str) -> Self {
        Self { open, close }
    }

    pub fn step(&self, state: Summary, line: &Line) -> (Summary, Region) {
        let state = if line.contains(self.open) {
            Summary::Skipping
        } else {
            state
        };
        if line.contains(self.close) {
            return (Summary::Extracting, Region::Closing);
        }
        match state {
            Summary::Skipping => (state, Region::Outside),
            Summary::Extracting => (state, Region::Inside),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACKER: SectionTracker = SectionTracker::new("OPEN HERE", "CLOSE HERE");
    const SKIP: SkipTracker = SkipTracker::new("SKIP FROM", "SKIP UNTIL");

    fn line(text: &str) -> Line<'_> {
        Line::normalize(text).unwrap()
    }

    #[test]
    fn test_section_open_and_close_consume_marker_lines() {
        let (state, region) = TRACKER.step(Section::Closed, &line("12345 before"));
        assert_eq!((state, region), (Section::Closed, Region::Outside));

        let (state, region) = TRACKER.step(state, &line("xx OPEN HERE xx"));
        assert_eq!((state, region), (Section::Open, Region::Opening));
        assert!(region.is_marker());

        let (state, region) = TRACKER.step(state, &line("12345 data"));
        assert_eq!((state, region), (Section::Open, Region::Inside));

        let (state, region) = TRACKER.step(state, &line("CLOSE HERE 100"));
        assert_eq!((state, region), (Section::Closed, Region::Closing));

        let (_, region) = TRACKER.step(state, &line("12345 after"));
        assert_eq!(region, Region::Outside);
    }

    #[test]
    fn test_section_opening_marker_wins_over_closing() {
        let (state, region) = TRACKER.step(Section::Open, &line("OPEN HERE and CLOSE HERE"));
        assert_eq!((state, region), (Section::Open, Region::Opening));
    }

    #[test]
    fn test_skip_region_suppresses_lines_until_closing_marker() {
        let (state, region) = SKIP.step(Summary::Extracting, &line("10000 data"));
        assert_eq!((state, region), (Summary::Extracting, Region::Inside));

        let (state, region) = SKIP.step(state, &line("SKIP FROM here"));
        assert_eq!((state, region), (Summary::Skipping, Region::Outside));

        let (state, region) = SKIP.step(state, &line("10000 summary row"));
        assert_eq!((state, region), (Summary::Skipping, Region::Outside));

        let (state, region) = SKIP.step(state, &line("SKIP UNTIL 1,000"));
        assert_eq!((state, region), (Summary::Extracting, Region::Closing));

        let (_, region) = SKIP.step(state, &line("10000 data"));
        assert_eq!(region, Region::Inside);
    }

    #[test]
    fn test_skip_opening_line_falls_through_to_closing_check() {
        let (state, region) = SKIP.step(Summary::Extracting, &line("SKIP FROM x SKIP UNTIL"));
        assert_eq!((state, region), (Summary::Extracting, Region::Closing));
    }

    #[test]
    fn test_closing_marker_outside_skip_region_is_still_consumed() {
        let (state, region) = SKIP.step(Summary::Extracting, &line("SKIP UNTIL"));
        assert_eq!((state, region), (Summary::Extracting, Region::Closing));
    }
}
