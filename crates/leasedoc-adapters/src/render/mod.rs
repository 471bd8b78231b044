//! Rendering adapters for text template payloads.

pub mod merge;

pub use merge::{MergeFields, render_html};
