//! In-memory template repository.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use uuid::Uuid;

use leasedoc_core::{
    application::{ApplicationError, ports::TemplateRepository},
    domain::{DomainValidator as validator, NewTemplate, ResourceId, Template, TemplateId},
    error::LeasedocResult,
};

/// Thread-safe in-memory template repository.
///
/// The reference collaborator for tests and demos; identifiers are random
/// UUIDs assigned on create.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    inner: Arc<RwLock<HashMap<TemplateId, Template>>>,
}

impl InMemoryRepository {
    /// Create a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-seeded with templates (tests).
    pub fn with_templates(templates: impl IntoIterator<Item = Template>) -> Self {
        let inner = templates.into_iter().map(|t| (t.id.clone(), t)).collect();
        Self {
            inner: Arc::new(RwLock::new(inner)),
        }
    }

    /// Number of stored templates.
    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TemplateRepository for InMemoryRepository {
    fn create(&self, candidate: &NewTemplate) -> LeasedocResult<Template> {
        validator::validate_candidate(candidate)?;

        let template = Template {
            id: TemplateId::new(Uuid::new_v4().to_string()),
            name: candidate.name.clone(),
            payload: candidate.payload.clone(),
            linked_resource_ids: candidate.linked_resource_ids.clone(),
        };

        let mut inner = self.inner.write().map_err(|_| ApplicationError::StoreLockError)?;
        inner.insert(template.id.clone(), template.clone());
        Ok(template)
    }

    fn update(&self, template: &Template) -> LeasedocResult<()> {
        validator::validate_template(template)?;

        let mut inner = self.inner.write().map_err(|_| ApplicationError::StoreLockError)?;
        match inner.get_mut(&template.id) {
            Some(slot) => {
                *slot = template.clone();
                Ok(())
            }
            None => Err(ApplicationError::TemplateNotFound {
                id: template.id.to_string(),
            }
            .into()),
        }
    }

    fn delete(&self, ids: &[TemplateId]) -> LeasedocResult<()> {
        let mut inner = self.inner.write().map_err(|_| ApplicationError::StoreLockError)?;
        // Bulk semantics: identifiers that are already gone are ignored.
        for id in ids {
            inner.remove(id);
        }
        Ok(())
    }

    fn get(&self, id: &TemplateId) -> LeasedocResult<Template> {
        let inner = self.inner.read().map_err(|_| ApplicationError::StoreLockError)?;
        inner
            .get(id)
            .cloned()
            .ok_or_else(|| ApplicationError::TemplateNotFound { id: id.to_string() }.into())
    }

    fn items(&self) -> LeasedocResult<Vec<Template>> {
        let inner = self.inner.read().map_err(|_| ApplicationError::StoreLockError)?;
        Ok(inner.values().cloned().collect())
    }

    fn find_for_resource(&self, resource: &ResourceId) -> LeasedocResult<Vec<Template>> {
        let inner = self.inner.read().map_err(|_| ApplicationError::StoreLockError)?;
        Ok(inner
            .values()
            .filter(|t| t.is_linked_to(resource))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leasedoc_core::domain::{LinkSet, TemplateDraft};

    fn candidate(name: &str, links: &[&str]) -> NewTemplate {
        TemplateDraft::text(name, "Hello", "<p>Hello</p>")
            .into_candidate(links.iter().map(|l| ResourceId::from(*l)).collect())
    }

    #[test]
    fn create_assigns_unique_ids() {
        let repo = InMemoryRepository::new();
        let a = repo.create(&candidate("a", &["L1"])).unwrap();
        let b = repo.create(&candidate("b", &["L1"])).unwrap();

        assert!(!a.id.as_str().is_empty());
        assert_ne!(a.id, b.id);
        assert_eq!(repo.len(), 2);
    }

    #[test]
    fn create_rejects_unnamed_candidate() {
        let repo = InMemoryRepository::new();
        assert!(repo.create(&candidate("", &[])).is_err());
        assert!(repo.is_empty());
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let repo = InMemoryRepository::new();
        let ghost = repo
            .create(&candidate("a", &["L1"]))
            .unwrap()
            .with_links(LinkSet::new());
        repo.delete(std::slice::from_ref(&ghost.id)).unwrap();

        let err = repo.update(&ghost).unwrap_err();
        assert!(matches!(
            err,
            leasedoc_core::error::LeasedocError::Application(
                ApplicationError::TemplateNotFound { .. }
            )
        ));
    }

    #[test]
    fn find_for_resource_filters_by_membership() {
        let repo = InMemoryRepository::new();
        repo.create(&candidate("a", &["L1", "L2"])).unwrap();
        repo.create(&candidate("b", &["L2"])).unwrap();
        repo.create(&candidate("c", &[])).unwrap();

        assert_eq!(repo.find_for_resource(&ResourceId::from("L1")).unwrap().len(), 1);
        assert_eq!(repo.find_for_resource(&ResourceId::from("L2")).unwrap().len(), 2);
        assert!(repo.find_for_resource(&ResourceId::from("L3")).unwrap().is_empty());
    }

    #[test]
    fn delete_ignores_missing_ids() {
        let repo = InMemoryRepository::new();
        let a = repo.create(&candidate("a", &["L1"])).unwrap();
        repo.delete(&[a.id.clone(), TemplateId::from("ghost")]).unwrap();
        assert!(repo.is_empty());
    }
}
