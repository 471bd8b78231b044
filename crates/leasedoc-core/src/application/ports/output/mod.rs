//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `leasedoc-adapters` crate provides implementations.

use crate::domain::{NewTemplate, ResourceId, Template, TemplateId};
use crate::error::LeasedocResult;

/// Port for template storage.
///
/// Implemented by:
/// - `leasedoc_adapters::repository::InMemoryRepository` (testing, demos)
/// - `leasedoc_adapters::repository::JsonFileRepository` (local store file)
///
/// ## Contract
///
/// - `create` assigns the identifier; the echoed entity is the caller's only
///   way to learn it.
/// - A non-success answer from the backing store surfaces as
///   `ApplicationError::PersistenceRejected`; the entity is unchanged.
/// - `delete` is bulk-capable; the association service always passes a
///   single identifier.
/// - The repository is the sole source of truth and serializes writes to a
///   given entity; the core issues one operation per draft at a time.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRepository: Send + Sync {
    /// Persist a new template; the repository assigns its identifier.
    fn create(&self, candidate: &NewTemplate) -> LeasedocResult<Template>;

    /// Overwrite an existing template (full payload, including links).
    fn update(&self, template: &Template) -> LeasedocResult<()>;

    /// Remove templates outright.
    fn delete(&self, ids: &[TemplateId]) -> LeasedocResult<()>;

    /// Fetch one template by identifier.
    fn get(&self, id: &TemplateId) -> LeasedocResult<Template>;

    /// All known templates, in no particular order.
    fn items(&self) -> LeasedocResult<Vec<Template>>;

    /// Templates whose link set contains `resource`.
    fn find_for_resource(&self, resource: &ResourceId) -> LeasedocResult<Vec<Template>>;
}
