//! Application layer for leasedoc.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (AssociationService, TemplateWorkbench)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    AssociationService,
    RemovalOutcome, // what happened on removal: deleted vs unlinked
    TemplateWorkbench,
};

// Re-export port traits (for adapter implementation)
pub use ports::TemplateRepository;

pub use error::ApplicationError;
