// src/extractors/development.rs

//! Development-project ledger ("Maksud Pembangunan").

use super::context::DocumentContext;
use super::line::Line;
use super::pipeline::Layout;
use super::records::DevelopmentRecord;
use super::section::{Region, Section, SectionTracker};

// The opening marker is also the title line of each ledger.
const SECTION: SectionTracker = SectionTracker::new("Maksud Pembangunan", "JUMLAH PEMBANGUNAN");
const CODE_WIDTH: usize = 5;
const MIN_TOKENS: usize = 7;

#[derive(Debug, Clone, Copy, Default)]
pub struct DevelopmentLayout;

impl DevelopmentLayout {
    pub fn is_record_line(line: &Line) -> bool {
        line.len() >= MIN_TOKENS && line.starts_with_code(CODE_WIDTH)
    }
}

impl Layout for DevelopmentLayout {
    type Record = DevelopmentRecord;
    type State = Section;

    fn name(&self) -> &'static str {
        "development"
    }

    fn transition(&self, state: Section, line: &Line) -> (Section, Region) {
        SECTION.step(state, line)
    }

    fn update_context(&self, ctx: &mut DocumentContext, line: &Line, region: Region) -> bool {
        if region == Region::Opening {
            ctx.set_title(line.text);
        }
        false
    }

    // Columns between the project estimate and the direct-method value are
    // prior-year figures and are not captured. The heading runs up to and
    // including the project-estimate token.
    fn extract(&self, mp: &str, ctx: &DocumentContext, line: &Line) -> Option<DevelopmentRecord> {
        if !Self::is_record_line(line) {
            return None;
        }
        Some(DevelopmentRecord {
            mp: mp.to_string(),
            title: ctx.title.clone(),
            item_code: line.first().to_string(),
            heading: line.join_between(1, 5),
            project_estimate: line.from_end(6).to_string(),
            direct_method: line.from_end(2).to_string(),
            loan: line.last().to_string(),
        })
    }
}
