//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish high-level
//! use cases like "save this draft against the selected lease" or "remove
//! this template from the lease's view".

pub mod association_service;
pub mod workbench;

pub use association_service::{AssociationService, RemovalOutcome};
pub use workbench::TemplateWorkbench;
