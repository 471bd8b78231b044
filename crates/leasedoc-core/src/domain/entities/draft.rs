//! Draft editing state machine.
//!
//! Each template kind has at most one in-flight draft at a time. A
//! [`DraftSlot`] tracks that draft through its lifecycle:
//!
//! ```text
//! Closed ──open──▶ Editing ──begin_save──▶ Saving ──success──▶ Closed
//!    ▲               │  ▲                    │
//!    └────cancel─────┘  └──────failure───────┘
//! ```
//!
//! Saves complete asynchronously from the slot's point of view:
//! `begin_save` hands out a [`SaveTicket`] and the eventual repository
//! outcome is applied with `complete_save`. A completion whose ticket does
//! not match the save currently in flight is reported as
//! [`SaveDisposition::Stale`] and changes nothing — a late response for a
//! draft that was cancelled (or superseded by a newer one of the same kind)
//! must not corrupt the newer draft.

use crate::domain::entities::template::{Template, TemplateDraft, TemplateKind};
use crate::domain::error::DomainError;

/// Tag identifying one specific save issued from a slot.
///
/// The serial increases with every `begin_save`, so a ticket uniquely names
/// the draft generation it was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveTicket {
    kind: TemplateKind,
    serial: u64,
}

impl SaveTicket {
    pub fn kind(&self) -> TemplateKind {
        self.kind
    }
}

/// Lifecycle state of a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftState {
    /// No draft open.
    Closed,
    /// A draft is open for editing.
    Editing(TemplateDraft),
    /// A save has been issued and its outcome is pending.
    Saving {
        draft: TemplateDraft,
        ticket: SaveTicket,
    },
}

/// What `complete_save` did with a reported outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveDisposition {
    /// Success applied; the slot is closed.
    Committed,
    /// Failure applied; the draft is open again for correction.
    Reopened,
    /// The ticket did not match the in-flight save; nothing changed.
    Stale,
}

/// Holds the single draft of one template kind.
#[derive(Debug)]
pub struct DraftSlot {
    kind: TemplateKind,
    state: DraftState,
    next_serial: u64,
}

impl DraftSlot {
    pub fn new(kind: TemplateKind) -> Self {
        Self {
            kind,
            state: DraftState::Closed,
            next_serial: 0,
        }
    }

    pub fn kind(&self) -> TemplateKind {
        self.kind
    }

    pub fn state(&self) -> &DraftState {
        &self.state
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.state, DraftState::Closed)
    }

    /// The open draft, if any (editing or saving).
    pub fn draft(&self) -> Option<&TemplateDraft> {
        match &self.state {
            DraftState::Closed => None,
            DraftState::Editing(draft) | DraftState::Saving { draft, .. } => Some(draft),
        }
    }

    /// Open a fresh, identifier-less draft (the "add" action).
    pub fn open_new(&mut self) -> Result<&mut TemplateDraft, DomainError> {
        self.open(TemplateDraft::blank(self.kind))
    }

    /// Open a draft loaded from an existing entity (the "edit" action).
    ///
    /// The entity must be of this slot's kind; routing a template to the
    /// wrong editor is rejected here.
    pub fn open_edit(&mut self, template: &Template) -> Result<&mut TemplateDraft, DomainError> {
        if template.kind() != self.kind {
            return Err(DomainError::KindMismatch {
                expected: self.kind,
                actual: template.kind(),
            });
        }
        self.open(TemplateDraft::from_template(template))
    }

    fn open(&mut self, draft: TemplateDraft) -> Result<&mut TemplateDraft, DomainError> {
        if !self.is_closed() {
            return Err(DomainError::DraftAlreadyOpen { kind: self.kind });
        }
        self.state = DraftState::Editing(draft);
        match &mut self.state {
            DraftState::Editing(draft) => Ok(draft),
            _ => unreachable!("state was just set to Editing"),
        }
    }

    /// Mutable access to the open draft for applying edits.
    pub fn draft_mut(&mut self) -> Result<&mut TemplateDraft, DomainError> {
        match &mut self.state {
            DraftState::Editing(draft) => Ok(draft),
            DraftState::Saving { .. } => Err(DomainError::SaveInFlight { kind: self.kind }),
            DraftState::Closed => Err(DomainError::NoOpenDraft { kind: self.kind }),
        }
    }

    /// Transition `Editing → Saving`, handing back the draft to persist and
    /// the ticket that names this save.
    pub fn begin_save(&mut self) -> Result<(TemplateDraft, SaveTicket), DomainError> {
        let draft = match &self.state {
            DraftState::Editing(draft) => draft.clone(),
            DraftState::Saving { .. } => {
                return Err(DomainError::SaveInFlight { kind: self.kind });
            }
            DraftState::Closed => {
                return Err(DomainError::NoOpenDraft { kind: self.kind });
            }
        };
        draft.validate()?;

        let ticket = SaveTicket {
            kind: self.kind,
            serial: self.next_serial,
        };
        self.next_serial += 1;
        self.state = DraftState::Saving {
            draft: draft.clone(),
            ticket,
        };
        Ok((draft, ticket))
    }

    /// Apply the outcome of the save named by `ticket`.
    ///
    /// Success closes the slot; failure reopens the draft for correction.
    /// A ticket that does not match the in-flight save is stale and ignored.
    pub fn complete_save(&mut self, ticket: SaveTicket, success: bool) -> SaveDisposition {
        match &self.state {
            DraftState::Saving { ticket: current, .. } if *current == ticket => {}
            _ => return SaveDisposition::Stale,
        }

        if success {
            self.state = DraftState::Closed;
            SaveDisposition::Committed
        } else {
            let DraftState::Saving { draft, .. } =
                std::mem::replace(&mut self.state, DraftState::Closed)
            else {
                unreachable!("matched Saving above");
            };
            self.state = DraftState::Editing(draft);
            SaveDisposition::Reopened
        }
    }

    /// Discard the open draft, if any. Returns `true` when something was
    /// discarded.
    ///
    /// Cancelling while a save is in flight is allowed; the eventual
    /// completion for that save will find its ticket stale.
    pub fn cancel(&mut self) -> bool {
        if self.is_closed() {
            return false;
        }
        self.state = DraftState::Closed;
        true
    }
}
