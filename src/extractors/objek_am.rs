// src/extractors/objek_am.rs

//! Object-class summary of the development-expenditure volume
//! ("Anggaran Perbelanjaan Pembangunan ... Objek Am").

use super::context::DocumentContext;
use super::line::Line;
use super::pipeline::Layout;
use super::records::ObjekAmRecord;
use super::section::{Region, Section, SectionTracker};

const SECTION: SectionTracker = SectionTracker::new(
    "ANGGARAN PERBELANJAAN PEMBANGUNAN BAGI TAHUN",
    "JUMLAH ANGGARAN PERBELANJAAN",
);
const TITLE_PREFIX: &str = "Maksud Bekalan/Pembangunan";
const CODE_WIDTH: usize = 5;

#[derive(Debug, Clone, Copy, Default)]
pub struct ObjekAmLayout;

impl ObjekAmLayout {
    pub fn is_record_line(line: &Line) -> bool {
        line.len() >= 2 && line.starts_with_code(CODE_WIDTH)
    }
}

impl Layout for ObjekAmLayout {
    type Record = ObjekAmRecord;
    type State = Section;

    fn name(&self) -> &'static str {
        "objek-am"
    }

    fn transition(&self, state: Section, line: &Line) -> (Section, Region) {
        SECTION.step(state, line)
    }

    // The title is tracked on every non-marker line, inside the section or not.
    fn update_context(&self, ctx: &mut DocumentContext, line: &Line, region: Region) -> bool {
        if !region.is_marker() && line.text.starts_with(TITLE_PREFIX) {
            ctx.set_title(line.text);
        }
        false
    }

    fn extract(&self, mp: &str, ctx: &DocumentContext, line: &Line) -> Option<ObjekAmRecord> {
        if !Self::is_record_line(line) {
            return None;
        }
        Some(ObjekAmRecord {
            mp: mp.to_string(),
            code: line.first().to_string(),
            title: ctx.title.clone(),
            expenditure_type: line.join_between(1, 2),
            estimate: line.last().to_string(),
        })
    }
}
