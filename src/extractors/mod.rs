// src/extractors/mod.rs
pub mod context;
pub mod development;
pub mod line;
pub mod objek_am;
pub mod operating;
pub mod pipeline;
pub mod records;
pub mod section;

// Re-export key extraction types for convenience
pub use development::DevelopmentLayout;
pub use objek_am::ObjekAmLayout;
pub use operating::OperatingLayout;
pub use pipeline::{extract_document, ContextScope, Layout};
pub use records::RecordTable;
