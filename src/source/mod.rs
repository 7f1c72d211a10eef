// src/source/mod.rs
pub mod fetch;
pub mod models;
pub mod pages;

pub use models::Document;
pub use pages::default_sources;
