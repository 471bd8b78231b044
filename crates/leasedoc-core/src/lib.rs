//! leasedoc Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the leasedoc
//! template manager, following hexagonal (ports and adapters) architecture.
//!
//! Templates are reusable documents (free text or uploaded-file descriptors)
//! attached to lease records. One template may be shared by many leases, so
//! saving and removing are association decisions, not plain CRUD: removal
//! deletes a template only when the current lease is its last referrer, and
//! unlinks it otherwise.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          leasedoc-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (AssociationService, TemplateWorkbench) │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │        (Driven: TemplateRepository)     │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    leasedoc-adapters (Infrastructure)   │
//! │  (InMemoryRepository, JsonFileRepo...)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (Template, LinkSet, DraftSlot, ...)    │
//! │        No External Dependencies         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use leasedoc_core::{
//!     application::{AssociationService, TemplateWorkbench},
//!     domain::{ResourceId, TemplateKind},
//! };
//!
//! # fn demo(repository: Box<dyn leasedoc_core::application::TemplateRepository>) {
//! // 1. Wire the service to a repository adapter
//! let service = AssociationService::new(repository);
//! let mut bench = TemplateWorkbench::new(service);
//!
//! // 2. Edit and save against the selected lease
//! let lease = ResourceId::new("L1");
//! bench.open_new(TemplateKind::Text).unwrap();
//! bench.rename(TemplateKind::Text, "welcome letter").unwrap();
//! let saved = bench.save(TemplateKind::Text, Some(&lease)).unwrap();
//! # }
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        AssociationService, RemovalOutcome, TemplateWorkbench, ports::TemplateRepository,
    };
    pub use crate::domain::{
        LinkSet, NewTemplate, ResourceId, Template, TemplateDraft, TemplateId, TemplateKind,
        TemplatePayload,
    };
    pub use crate::error::{LeasedocError, LeasedocResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
