// src/extractors/context.rs

use super::line::{strip_digits, title_from};

pub const MAX_NAME_CHARS: usize = 50;

/// Per-document state carried from line to line and page to page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentContext {
    /// Current "Maksud Perbelanjaan" title.
    pub title: String,
    pub program: Program,
}

/// Program and activity currently in effect (operating ledger only).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub code: String,
    pub name: String,
    pub activity_code: String,
    pub activity_name: String,
}

impl DocumentContext {
    pub fn set_title(&mut self, text: &str) {
        self.title = title_from(text);
        tracing::trace!("Title now '{}'", self.title);
    }

    /// Replaces the program and clears any activity that belonged to the previous one.
    pub fn enter_program(&mut self, code: &str, name: String) {
        tracing::trace!("Program {} '{}'", code, name);
        self.program = Program {
            code: code.to_string(),
            name,
            ..Program::default()
        };
    }

    pub fn enter_activity(&mut self, code: &str, name: String) {
        tracing::trace!("Activity {} '{}'", code, name);
        self.program.activity_code = code.to_string();
        self.program.activity_name = name;
    }
}

/// Program/activity name cleanup: keep text before the first `.`, drop every
/// digit, trim, then cap at [`MAX_NAME_CHARS`] characters.
pub fn clean_name(candidate: &str) -> String {
    strip_digits(candidate)
        .trim()
        .chars()
        .take(MAX_NAME_CHARS)
        .collect()
}

/// Text before the first `.`, trimmed.
pub fn name_candidate(tokens: &[&str]) -> String {
    let joined = tokens.join(" ");
    match joined.split_once('.') {
        Some((head, _)) => head.trim().to_string(),
        None => joined.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_program_clears_activity() {
        let mut ctx = DocumentContext::default();
        ctx.enter_program("010000", "PENGURUSAN".to_string());
        ctx.enter_activity("010100", "Khidmat Sokongan".to_string());
        assert_eq!(ctx.program.activity_code, "010100");

        ctx.enter_program("020000", "OPERASI".to_string());
        let program = &ctx.program;
        assert_eq!(program.code, "020000");
        assert_eq!(program.name, "OPERASI");
        assert_eq!(program.activity_code, "");
        assert_eq!(program.activity_name, "");
    }

    #[test]
    fn test_activity_without_program_keeps_empty_program() {
        let mut ctx = DocumentContext::default();
        ctx.enter_activity("010100", "Khidmat".to_string());
        assert_eq!(ctx.program.code, "");
        assert_eq!(ctx.program.activity_name, "Khidmat");
    }

    #[test]
    fn test_clean_name_truncates_to_fifty_chars() {
        let long = "A".repeat(80);
        assert_eq!(clean_name(&long).chars().count(), MAX_NAME_CHARS);
        assert_eq!(clean_name("PROGRAM 2 INFRA"), "PROGRAM  INFRA");
        assert_eq!(clean_name(" 12 ABC 34 "), "ABC");
    }

    #[test]
    fn test_name_candidate_cuts_at_first_period() {
        assert_eq!(name_candidate(&["Pengurusan", "Am.", "Lain"]), "Pengurusan Am");
        assert_eq!(name_candidate(&["1.000", "2"]), "1");
        assert_eq!(name_candidate(&["Tanpa", "titik"]), "Tanpa titik");
    }
}
