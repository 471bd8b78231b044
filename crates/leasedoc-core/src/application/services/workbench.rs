//! Template Workbench - per-kind draft editing.
//!
//! The workbench is the editing surface on top of the association service:
//! it keeps exactly one in-flight draft per template kind, routes entities
//! to the editor of their own kind, and drives the draft state machine
//! through save and cancel. Separated from `AssociationService` for single
//! responsibility.

use crate::{
    application::services::association_service::AssociationService,
    domain::{
        DomainError, DraftSlot, ResourceId, SaveDisposition, Template, TemplateDraft,
        TemplateKind, TemplatePayload,
    },
    error::LeasedocResult,
};

/// Editing surface holding one draft slot per template kind.
pub struct TemplateWorkbench {
    service: AssociationService,
    text: DraftSlot,
    file_descriptor: DraftSlot,
}

impl TemplateWorkbench {
    /// Create a workbench over an association service.
    pub fn new(service: AssociationService) -> Self {
        Self {
            service,
            text: DraftSlot::new(TemplateKind::Text),
            file_descriptor: DraftSlot::new(TemplateKind::FileDescriptor),
        }
    }

    /// The underlying association service, for queries.
    pub fn service(&self) -> &AssociationService {
        &self.service
    }

    fn slot_mut(&mut self, kind: TemplateKind) -> &mut DraftSlot {
        match kind {
            TemplateKind::Text => &mut self.text,
            TemplateKind::FileDescriptor => &mut self.file_descriptor,
        }
    }

    fn slot(&self, kind: TemplateKind) -> &DraftSlot {
        match kind {
            TemplateKind::Text => &self.text,
            TemplateKind::FileDescriptor => &self.file_descriptor,
        }
    }

    /// The open draft of a kind, if any.
    pub fn draft(&self, kind: TemplateKind) -> Option<&TemplateDraft> {
        self.slot(kind).draft()
    }

    /// Start a fresh, identifier-less draft (the "add" action).
    pub fn open_new(&mut self, kind: TemplateKind) -> Result<(), DomainError> {
        self.slot_mut(kind).open_new().map(|_| ())
    }

    /// Load an existing entity into the editor of its own kind.
    ///
    /// A `text` template never reaches the file-descriptor editor and vice
    /// versa; the slot itself enforces the kind.
    pub fn open_editor(&mut self, template: &Template) -> Result<(), DomainError> {
        self.slot_mut(template.kind()).open_edit(template).map(|_| ())
    }

    /// Rename the open draft of a kind.
    pub fn rename(&mut self, kind: TemplateKind, name: impl Into<String>) -> Result<(), DomainError> {
        self.slot_mut(kind).draft_mut()?.rename(name);
        Ok(())
    }

    /// Replace the payload of the open draft of a kind.
    ///
    /// Rejected when the payload is of the other kind.
    pub fn replace_payload(
        &mut self,
        kind: TemplateKind,
        payload: TemplatePayload,
    ) -> Result<(), DomainError> {
        self.slot_mut(kind).draft_mut()?.replace_payload(payload)
    }

    /// Discard the open draft of a kind without touching the repository.
    pub fn cancel(&mut self, kind: TemplateKind) -> bool {
        self.slot_mut(kind).cancel()
    }

    /// Save the open draft of a kind in the context of `current`.
    ///
    /// Success closes the editor and returns the saved entity (with its
    /// repository-assigned identifier on a create). Failure leaves the
    /// draft open for correction and propagates the error.
    pub fn save(
        &mut self,
        kind: TemplateKind,
        current: Option<&ResourceId>,
    ) -> LeasedocResult<Template> {
        let (draft, ticket) = self.slot_mut(kind).begin_save()?;

        let outcome = self.service.save(&draft, current);

        // Apply the outcome under the ticket issued for this save; if the
        // draft was cancelled meanwhile, the disposition is Stale and the
        // slot is left alone.
        let disposition = self
            .slot_mut(kind)
            .complete_save(ticket, outcome.is_ok());
        debug_assert_ne!(disposition, SaveDisposition::Stale);

        outcome
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
