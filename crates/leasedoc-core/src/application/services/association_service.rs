//! Association Service - main application orchestrator.
//!
//! Decides what a "save" and a "remove" mean for a template that may be
//! shared across many leases:
//!
//! 1. Save: create when the draft has no identifier, update otherwise
//! 2. Remove: delete when at most one lease still references the template,
//!    unlink (drop one member from the link set) otherwise
//!
//! It implements the driving port (incoming) and uses the repository as its
//! only driven port (outgoing).

use tracing::{info, instrument, warn};

use crate::{
    application::ports::TemplateRepository,
    domain::{
        DomainError, DomainValidator as validator, LinkSet, ResourceId, Template, TemplateDraft,
        TemplateId,
    },
    error::LeasedocResult,
};

/// What happened to a template on removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// The template had no other referrer and was deleted outright.
    Deleted,
    /// The template is still referenced elsewhere; only the current lease's
    /// link was dropped.
    Unlinked { remaining: LinkSet },
}

/// Main association service.
///
/// Owns the repository handle and the current-lease decision logic; callers
/// never need to know the repository's storage model.
pub struct AssociationService {
    repository: Box<dyn TemplateRepository>,
}

impl AssociationService {
    /// Create a new association service with the given repository adapter.
    pub fn new(repository: Box<dyn TemplateRepository>) -> Self {
        Self { repository }
    }

    /// Persist a draft in the context of `current` (the selected lease).
    ///
    /// - A draft without an identifier issues a *create*; its link set is
    ///   the current lease alone, or empty when there is no lease context
    ///   (an orphaned template, to be linked later).
    /// - A draft with an identifier issues an *update*; the stored entity's
    ///   link set is preserved and the current lease is added to it if not
    ///   already a member.
    ///
    /// Returns the saved entity. Callers replace their draft reference with
    /// the returned value; that is how a create's newly assigned identifier
    /// reaches a subsequent edit of the same document.
    ///
    /// # Errors
    ///
    /// - `KindChangeRejected` when the draft's payload kind differs from the
    ///   stored entity's (checked before any repository call)
    /// - any repository error, unchanged; on failure no entity state may be
    ///   assumed and the caller's draft stays open
    #[instrument(skip_all, fields(kind = %draft.kind(), new = draft.is_new()))]
    pub fn save(
        &self,
        draft: &TemplateDraft,
        current: Option<&ResourceId>,
    ) -> LeasedocResult<Template> {
        validator::validate_draft(draft)?;

        match &draft.id {
            None => {
                let links = match current {
                    Some(resource) => LinkSet::singleton(resource.clone()),
                    None => LinkSet::new(),
                };
                let candidate = draft.clone().into_candidate(links);
                let created = self.repository.create(&candidate)?;
                info!(id = %created.id, "Template created");
                Ok(created)
            }
            Some(id) => {
                let stored = self.repository.get(id)?;
                if stored.kind() != draft.kind() {
                    return Err(DomainError::KindChangeRejected { id: id.to_string() }.into());
                }

                let links = match current {
                    Some(resource) => stored.linked_resource_ids.with(resource.clone()),
                    None => stored.linked_resource_ids.clone(),
                };
                let updated = Template {
                    id: id.clone(),
                    name: draft.name.clone(),
                    payload: draft.payload.clone(),
                    linked_resource_ids: links,
                };
                validator::validate_template(&updated)?;

                self.repository.update(&updated)?;
                info!(id = %updated.id, links = updated.link_count(), "Template updated");
                Ok(updated)
            }
        }
    }

    /// Remove a template from the current lease's view.
    ///
    /// This is a reference-count check, not a straight delete: a template
    /// referenced by more than one lease merely loses the current lease's
    /// link and remains visible everywhere else; a template with at most the
    /// current lease as referrer is deleted from the repository entirely.
    ///
    /// The decision operates on the target entity's own link set. Invoking
    /// removal for a lease that is not actually a member degenerates to a
    /// redundant update; that is logged and tolerated rather than treated as
    /// a failure.
    #[instrument(skip_all, fields(id = %template.id, lease = %current))]
    pub fn remove(
        &self,
        template: &Template,
        current: &ResourceId,
    ) -> LeasedocResult<RemovalOutcome> {
        if template.link_count() <= 1 {
            self.repository
                .delete(std::slice::from_ref(&template.id))?;
            info!("Template deleted (sole referrer)");
            return Ok(RemovalOutcome::Deleted);
        }

        if !template.is_linked_to(current) {
            warn!("Lease is not in the template's link set; issuing a redundant update");
        }

        let remaining = template.linked_resource_ids.without(current);
        let unlinked = template.with_links(remaining.clone());
        self.repository.update(&unlinked)?;

        info!(remaining = remaining.len(), "Template unlinked from lease");
        Ok(RemovalOutcome::Unlinked { remaining })
    }

    /// Templates visible from one lease.
    pub fn templates_for(&self, resource: &ResourceId) -> LeasedocResult<Vec<Template>> {
        self.repository.find_for_resource(resource)
    }

    /// All known templates.
    pub fn all(&self) -> LeasedocResult<Vec<Template>> {
        self.repository.items()
    }

    /// One template by identifier.
    pub fn get(&self, id: &TemplateId) -> LeasedocResult<Template> {
        self.repository.get(id)
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        application::ports::output::MockTemplateRepository,
        domain::{TemplateId, TemplatePayload},
        error::LeasedocError,
    };
    use mockall::predicate::eq;

    fn stored_template(id: &str, links: &[&str]) -> Template {
        Template {
            id: TemplateId::from(id),
            name: "welcome letter".into(),
            payload: TemplatePayload::Text {
                contents: "Hello".into(),
                html: "<p>Hello</p>".into(),
            },
            linked_resource_ids: links.iter().map(|l| ResourceId::from(*l)).collect(),
        }
    }

    fn rejected(operation: &'static str) -> LeasedocError {
        crate::application::ApplicationError::PersistenceRejected {
            operation,
            status: 500,
        }
        .into()
    }

    // ── save: create path ─────────────────────────────────────────────────

    #[test]
    fn create_links_current_lease() {
        // Scenario: save a draft with no id in context L3 → repository
        // receives a create with linked set {L3}.
        let mut repo = MockTemplateRepository::new();
        repo.expect_create()
            .withf(|candidate| {
                candidate.linked_resource_ids.len() == 1
                    && candidate
                        .linked_resource_ids
                        .contains(&ResourceId::from("L3"))
            })
            .returning(|candidate| {
                Ok(Template {
                    id: TemplateId::from("T-new"),
                    name: candidate.name.clone(),
                    payload: candidate.payload.clone(),
                    linked_resource_ids: candidate.linked_resource_ids.clone(),
                })
            });

        let service = AssociationService::new(Box::new(repo));
        let draft = TemplateDraft::text("welcome letter", "Hello", "<p>Hello</p>");
        let saved = service
            .save(&draft, Some(&ResourceId::from("L3")))
            .unwrap();

        // The assigned identifier is non-empty and reaches the caller.
        assert_eq!(saved.id, TemplateId::from("T-new"));
        assert!(!saved.id.as_str().is_empty());
    }

    #[test]
    fn create_without_lease_context_yields_empty_links() {
        // Scenario: no selected lease → create with an empty link set.
        let mut repo = MockTemplateRepository::new();
        repo.expect_create()
            .withf(|candidate| candidate.linked_resource_ids.is_empty())
            .returning(|candidate| {
                Ok(Template {
                    id: TemplateId::from("T-orphan"),
                    name: candidate.name.clone(),
                    payload: candidate.payload.clone(),
                    linked_resource_ids: candidate.linked_resource_ids.clone(),
                })
            });

        let service = AssociationService::new(Box::new(repo));
        let draft = TemplateDraft::file_descriptor("insurance", "signed policy", true);
        let saved = service.save(&draft, None).unwrap();
        assert!(saved.linked_resource_ids.is_empty());
    }

    #[test]
    fn create_failure_propagates_and_assumes_nothing() {
        // Scenario: create answers non-success → no entity is assumed
        // created; the failure reaches the caller.
        let mut repo = MockTemplateRepository::new();
        repo.expect_create().returning(|_| Err(rejected("create")));
        repo.expect_items().never();

        let service = AssociationService::new(Box::new(repo));
        let draft = TemplateDraft::text("welcome letter", "Hello", "");
        let err = service
            .save(&draft, Some(&ResourceId::from("L1")))
            .unwrap_err();
        assert!(matches!(
            err,
            LeasedocError::Application(
                crate::application::ApplicationError::PersistenceRejected { .. }
            )
        ));
    }

    // ── save: update path ─────────────────────────────────────────────────

    #[test]
    fn update_preserves_other_links_and_adds_current() {
        let mut repo = MockTemplateRepository::new();
        repo.expect_get()
            .with(eq(TemplateId::from("T1")))
            .returning(|_| Ok(stored_template("T1", &["L1", "L2"])));
        repo.expect_update()
            .withf(|t| {
                t.link_count() == 3
                    && t.is_linked_to(&ResourceId::from("L1"))
                    && t.is_linked_to(&ResourceId::from("L2"))
                    && t.is_linked_to(&ResourceId::from("L3"))
                    && t.name == "renamed"
            })
            .returning(|_| Ok(()));

        let service = AssociationService::new(Box::new(repo));
        let mut draft = TemplateDraft::from_template(&stored_template("T1", &["L1", "L2"]));
        draft.rename("renamed");

        let saved = service
            .save(&draft, Some(&ResourceId::from("L3")))
            .unwrap();
        assert_eq!(saved.link_count(), 3);
        // Identifier is stable across updates.
        assert_eq!(saved.id, TemplateId::from("T1"));
    }

    #[test]
    fn update_rejects_kind_change_before_any_write() {
        let mut repo = MockTemplateRepository::new();
        repo.expect_get()
            .returning(|_| Ok(stored_template("T1", &["L1"])));
        // update must never be reached
        repo.expect_update().never();

        let service = AssociationService::new(Box::new(repo));
        let draft = TemplateDraft {
            id: Some(TemplateId::from("T1")),
            name: "welcome letter".into(),
            payload: TemplatePayload::FileDescriptor {
                description: "not a text payload".into(),
                has_expiry_date: false,
            },
        };

        let err = service
            .save(&draft, Some(&ResourceId::from("L1")))
            .unwrap_err();
        assert!(matches!(
            err,
            LeasedocError::Domain(DomainError::KindChangeRejected { .. })
        ));
    }

    #[test]
    fn update_failure_propagates() {
        let mut repo = MockTemplateRepository::new();
        repo.expect_get()
            .returning(|_| Ok(stored_template("T1", &["L1"])));
        repo.expect_update().returning(|_| Err(rejected("update")));

        let service = AssociationService::new(Box::new(repo));
        let draft = TemplateDraft::from_template(&stored_template("T1", &["L1"]));
        assert!(service.save(&draft, Some(&ResourceId::from("L1"))).is_err());
    }

    // ── remove: the reference-count decision ──────────────────────────────

    #[test]
    fn remove_shared_template_unlinks_only() {
        // Scenario: T linked to {L1, L2}; remove in context L1 → update with
        // {L2}; T still exists.
        let mut repo = MockTemplateRepository::new();
        repo.expect_delete().never();
        repo.expect_update()
            .withf(|t| {
                t.link_count() == 1 && t.is_linked_to(&ResourceId::from("L2"))
            })
            .returning(|_| Ok(()));

        let service = AssociationService::new(Box::new(repo));
        let template = stored_template("T1", &["L1", "L2"]);
        let outcome = service.remove(&template, &ResourceId::from("L1")).unwrap();

        match outcome {
            RemovalOutcome::Unlinked { remaining } => {
                assert_eq!(remaining.len(), 1);
                assert!(remaining.contains(&ResourceId::from("L2")));
            }
            other => panic!("expected Unlinked, got {other:?}"),
        }
    }

    #[test]
    fn remove_sole_referrer_deletes_entity() {
        // Scenario: T linked to {L1}; remove in context L1 → delete [T.id].
        let mut repo = MockTemplateRepository::new();
        repo.expect_update().never();
        repo.expect_delete()
            .withf(|ids| ids.len() == 1 && ids[0] == TemplateId::from("T1"))
            .returning(|_| Ok(()));

        let service = AssociationService::new(Box::new(repo));
        let template = stored_template("T1", &["L1"]);
        let outcome = service.remove(&template, &ResourceId::from("L1")).unwrap();
        assert_eq!(outcome, RemovalOutcome::Deleted);
    }

    #[test]
    fn remove_orphan_deletes_entity() {
        // Zero links counts as "at most one referrer".
        let mut repo = MockTemplateRepository::new();
        repo.expect_delete().returning(|_| Ok(()));

        let service = AssociationService::new(Box::new(repo));
        let template = stored_template("T1", &[]);
        assert_eq!(
            service.remove(&template, &ResourceId::from("L1")).unwrap(),
            RemovalOutcome::Deleted
        );
    }

    #[test]
    fn remove_with_non_member_lease_is_redundant_update() {
        // The filter is a no-op; the update goes through with the link set
        // unchanged.
        let mut repo = MockTemplateRepository::new();
        repo.expect_update()
            .withf(|t| t.link_count() == 2)
            .returning(|_| Ok(()));

        let service = AssociationService::new(Box::new(repo));
        let template = stored_template("T1", &["L1", "L2"]);
        let outcome = service.remove(&template, &ResourceId::from("L9")).unwrap();
        assert!(matches!(outcome, RemovalOutcome::Unlinked { remaining } if remaining.len() == 2));
    }

    #[test]
    fn remove_delete_failure_propagates() {
        let mut repo = MockTemplateRepository::new();
        repo.expect_delete().returning(|_| Err(rejected("delete")));

        let service = AssociationService::new(Box::new(repo));
        let template = stored_template("T1", &["L1"]);
        assert!(service.remove(&template, &ResourceId::from("L1")).is_err());
    }

    // ── queries ───────────────────────────────────────────────────────────

    #[test]
    fn templates_for_filters_by_membership() {
        let mut repo = MockTemplateRepository::new();
        repo.expect_find_for_resource()
            .with(eq(ResourceId::from("L1")))
            .returning(|_| Ok(vec![stored_template("T1", &["L1", "L2"])]));

        let service = AssociationService::new(Box::new(repo));
        let visible = service.templates_for(&ResourceId::from("L1")).unwrap();
        assert_eq!(visible.len(), 1);
    }
}
