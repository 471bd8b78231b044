//! Repository adapters implementing the `TemplateRepository` port.

pub mod jsonfile;
pub mod memory;

pub use jsonfile::JsonFileRepository;
pub use memory::InMemoryRepository;
