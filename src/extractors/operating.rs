// src/extractors/operating.rs

//! Operating-budget ledger: program and activity headers followed by
//! object-class ("Objek Am") lines with two years of estimates and,
//! where printed, two years of position counts.

use super::context::{clean_name, name_candidate, DocumentContext};
use super::line::{is_all_digits, Line};
use super::pipeline::Layout;
use super::records::{ObjectClass, OperatingRecord};
use super::section::{Region, SkipTracker, Summary};

// The summary table repeats the object-class rows and must not be extracted.
const SUMMARY: SkipTracker =
    SkipTracker::new("RINGKASAN ANGGARAN PERBELANJAAN", "JUMLAH ANGGARAN PERBELANJAAN");
const TITLE_PREFIX: &str = "Maksud";
const HEADER_CODE_WIDTH: usize = 6;
const DEFAULT_POSITIONS: &str = "0";

/// What a header line turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Header {
    Program { code: String, name: String },
    Activity { code: String, name: String },
    /// A six-digit line whose text is only a number (continuation of a
    /// figure column); it changes nothing.
    Numeric,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OperatingLayout;

impl OperatingLayout {
    /// Classifies program and activity header lines. Returns `None` for any
    /// other line.
    pub fn classify_header(line: &Line) -> Option<Header> {
        if line.len() < 2 || !line.starts_with_code(HEADER_CODE_WIDTH) {
            return None;
        }
        let code = line.first().to_string();
        let candidate = name_candidate(&line.tokens[1..]);

        if line.is_upper() {
            return Some(Header::Program {
                code,
                name: clean_name(&candidate),
            });
        }
        if is_all_digits(&candidate) {
            return Some(Header::Numeric);
        }
        Some(Header::Activity {
            code,
            name: clean_name(&candidate),
        })
    }
}

impl Layout for OperatingLayout {
    type Record = OperatingRecord;
    type State = Summary;

    fn name(&self) -> &'static str {
        "operating"
    }

    fn transition(&self, state: Summary, line: &Line) -> (Summary, Region) {
        SUMMARY.step(state, line)
    }

    fn update_context(&self, ctx: &mut DocumentContext, line: &Line, region: Region) -> bool {
        if !region.is_inside() {
            return false;
        }
        // A title line may also be a header or record line; it does not stop processing.
        if line.text.starts_with(TITLE_PREFIX) {
            ctx.set_title(line.text);
        }

        match Self::classify_header(line) {
            Some(Header::Program { code, name }) => ctx.enter_program(&code, name),
            Some(Header::Activity { code, name }) => ctx.enter_activity(&code, name),
            Some(Header::Numeric) => {
                tracing::trace!("Ignoring numeric header line '{}'", line.text);
            }
            None => return false,
        }
        true
    }

    fn extract(&self, mp: &str, ctx: &DocumentContext, line: &Line) -> Option<OperatingRecord> {
        let object_class = ObjectClass::from_code(line.first())?;

        let (estimate_year1, estimate_year2, positions_year1, positions_year2) = if line.len() > 4 {
            (
                line.from_end(4),
                line.from_end(3),
                line.from_end(2),
                line.from_end(1),
            )
        } else if line.len() > 2 {
            (line.from_end(2), line.from_end(1), DEFAULT_POSITIONS, DEFAULT_POSITIONS)
        } else {
            return None;
        };

        let program = &ctx.program;
        Some(OperatingRecord {
            mp: mp.to_string(),
            title: ctx.title.clone(),
            program_code: program.code.clone(),
            program_name: program.name.clone(),
            activity_code: program.activity_code.clone(),
            activity_name: program.activity_name.clone(),
            object_class,
            estimate_year1: estimate_year1.to_string(),
            estimate_year2: estimate_year2.to_string(),
            positions_year1: positions_year1.to_string(),
            positions_year2: positions_year2.to_string(),
        })
    }
}
