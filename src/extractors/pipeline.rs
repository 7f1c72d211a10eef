// src/extractors/pipeline.rs

//! The shared line-by-line engine.
//!
//! Every layout runs the same loop: normalize a line, step the layout's
//! section tracker, let the layout update its context, and, while the line is
//! inside the extractable region, ask it for a record. Only the layout
//! strategy differs.

use super::context::DocumentContext;
use super::line::Line;
use super::records::TabularRecord;
use super::section::Region;

/// Layout-specific rules plugged into [`extract_document`].
pub trait Layout {
    type Record: TabularRecord;
    type State: Copy + Default + std::fmt::Debug;

    /// Short name used in logs and output metadata.
    fn name(&self) -> &'static str;

    /// Pure section transition for one line.
    fn transition(&self, state: Self::State, line: &Line) -> (Self::State, Region);

    /// Applies context-setting lines. Returns `true` when the line is fully
    /// handled and must not be offered to [`Layout::extract`].
    fn update_context(&self, ctx: &mut DocumentContext, line: &Line, region: Region) -> bool;

    /// Builds a record from a line inside the region, if the line qualifies.
    fn extract(&self, mp: &str, ctx: &DocumentContext, line: &Line) -> Option<Self::Record>;
}

/// When per-document state starts over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContextScope {
    /// Title, program/activity and section state carry across pages.
    #[default]
    Document,
    /// Everything resets at the top of each page.
    Page,
}

/// Runs `layout` over the pages of one document and returns its records in
/// reading order. Pages without text are skipped.
pub fn extract_document<L, I, S>(layout: &L, mp: &str, pages: I, scope: ContextScope) -> Vec<L::Record>
where
    L: Layout,
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    let mut records = Vec::new();
    let mut ctx = DocumentContext::default();
    let mut state = L::State::default();

    for (page_no, page) in pages.into_iter().enumerate() {
        let Some(text) = page else {
            tracing::debug!("{}: page {} has no text, skipping", mp, page_no + 1);
            continue;
        };
        if scope == ContextScope::Page {
            ctx = DocumentContext::default();
            state = L::State::default();
        }

        for raw in text.as_ref().lines() {
            let Some(line) = Line::normalize(raw) else {
                continue;
            };

            let (next, region) = layout.transition(state, &line);
            if region.is_marker() {
                tracing::debug!("{}: {:?} -> {:?} on '{}'", layout.name(), state, next, line.text);
            }
            state = next;

            if layout.update_context(&mut ctx, &line, region) {
                continue;
            }
            if !region.is_inside() {
                continue;
            }
            if let Some(record) = layout.extract(mp, &ctx, &line) {
                records.push(record);
            }
        }
    }

    tracing::debug!("{}: {} records from {}", layout.name(), records.len(), mp);
    records
}
