//! Template domain aggregate and link bookkeeping.
//!
//! Templates are the central concept in leasedoc: reusable documents (free
//! text or uploaded-file descriptors) that can be attached to one or more
//! lease records. The same template may be shared by many leases, so the
//! aggregate carries the set of lease identifiers that reference it.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Template Domain                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Template (Aggregate Root)                                  │
//! │  ├── TemplateId (Entity identity, repository-assigned)      │
//! │  ├── TemplatePayload (Value Object) - Text | FileDescriptor │
//! │  └── LinkSet (Value Object) - which leases reference it     │
//! │       └── BTreeSet<ResourceId>                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  NewTemplate  - create candidate, no identity yet           │
//! │  TemplateDraft - UI-local in-progress edit (id optional)    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Decisions
//!
//! ### 1. Why is `kind` derived rather than stored?
//!
//! The two template kinds carry different payload fields, so the payload is
//! an enum and [`TemplateKind`] is computed from the active variant. A kind
//! change on an existing template is therefore not merely *rejected* — it is
//! unrepresentable without replacing the whole payload, which the draft
//! layer guards (see [`TemplateDraft::replace_payload`]).
//!
//! ### 2. Why `BTreeSet` inside `LinkSet`?
//!
//! Link order is meaningless but duplicates are forbidden. A `BTreeSet`
//! makes the no-duplicates rule structural and gives deterministic
//! iteration, which keeps serialized output and test assertions stable.
//!
//! ### 3. Why separate `NewTemplate` from `Template`?
//!
//! Identity is assigned by the repository on first create and is stable
//! afterwards. Encoding "no identifier yet" as a distinct type means the
//! repository's `create` cannot receive an already-persisted entity and
//! `update` cannot receive an identity-less one — the compiler checks what
//! would otherwise be an `Option` convention.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

// ============================================================================
// Identities
// ============================================================================

/// Opaque identifier of a persisted template.
///
/// Assigned by the repository on first successful create; never derived or
/// parsed by the core.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(String);

impl TemplateId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TemplateId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Opaque identifier of a lease (the "resource" a template is linked to).
///
/// The core never inspects the lease itself; only its identifier is
/// consumed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

// ============================================================================
// Kind and payload
// ============================================================================

/// The two template kinds.
///
/// Wire names (`text` / `fileDescriptor`) follow the backing store's
/// document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TemplateKind {
    Text,
    FileDescriptor,
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::FileDescriptor => write!(f, "fileDescriptor"),
        }
    }
}

impl FromStr for TemplateKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "fileDescriptor" | "file" => Ok(Self::FileDescriptor),
            other => Err(DomainError::InvalidTemplate(format!(
                "unknown template kind '{other}' (expected 'text' or 'fileDescriptor')"
            ))),
        }
    }
}

/// Kind-specific payload of a template.
///
/// Exactly one variant is ever meaningful for a given template; the variant
/// is fixed at creation (the kind is write-once).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TemplatePayload {
    /// A free-text document: source markup plus its rendered HTML form.
    Text { contents: String, html: String },

    /// A descriptor for an uploaded file.
    #[serde(rename_all = "camelCase")]
    FileDescriptor {
        description: String,
        has_expiry_date: bool,
    },
}

impl TemplatePayload {
    /// Empty payload of the given kind, for fresh drafts.
    pub fn empty(kind: TemplateKind) -> Self {
        match kind {
            TemplateKind::Text => Self::Text {
                contents: String::new(),
                html: String::new(),
            },
            TemplateKind::FileDescriptor => Self::FileDescriptor {
                description: String::new(),
                has_expiry_date: false,
            },
        }
    }

    pub fn kind(&self) -> TemplateKind {
        match self {
            Self::Text { .. } => TemplateKind::Text,
            Self::FileDescriptor { .. } => TemplateKind::FileDescriptor,
        }
    }
}

// ============================================================================
// LinkSet - the many-to-many association
// ============================================================================

/// The set of lease identifiers referencing a template.
///
/// Unordered, duplicate-free. Mutation methods return new values; a
/// `LinkSet` held by a caller is never changed behind its back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkSet(BTreeSet<ResourceId>);

impl LinkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set containing exactly one lease.
    pub fn singleton(resource: ResourceId) -> Self {
        Self(BTreeSet::from([resource]))
    }

    pub fn contains(&self, resource: &ResourceId) -> bool {
        self.0.contains(resource)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// New set with `resource` added (no-op if already present).
    pub fn with(&self, resource: ResourceId) -> Self {
        let mut links = self.0.clone();
        links.insert(resource);
        Self(links)
    }

    /// New set with `resource` removed (no-op if absent).
    pub fn without(&self, resource: &ResourceId) -> Self {
        let mut links = self.0.clone();
        links.remove(resource);
        Self(links)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceId> {
        self.0.iter()
    }
}

impl FromIterator<ResourceId> for LinkSet {
    fn from_iter<I: IntoIterator<Item = ResourceId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ============================================================================
// Core Template Aggregate
// ============================================================================

/// A persisted template document, shared across the leases in
/// `linked_resource_ids`.
///
/// ## Invariants (enforced by `validate()` and the types themselves)
///
/// 1. `name` is non-empty
/// 2. `id` is non-empty (identity comes from the repository)
/// 3. `linked_resource_ids` contains no duplicates (structural, via
///    [`LinkSet`])
/// 4. the payload kind never changes after creation (structural, via
///    [`TemplatePayload`]; guarded at the draft layer)
///
/// The link set may be empty only for an orphaned template that was created
/// outside any lease context; the removal decision in the association
/// service guarantees a template is deleted rather than left with an empty
/// set once it has been linked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Repository-assigned identity.
    pub id: TemplateId,

    /// Display name.
    pub name: String,

    /// Kind-specific fields (`type` discriminator on the wire).
    #[serde(flatten)]
    pub payload: TemplatePayload,

    /// Leases referencing this template.
    #[serde(default)]
    pub linked_resource_ids: LinkSet,
}

impl Template {
    pub fn kind(&self) -> TemplateKind {
        self.payload.kind()
    }

    /// Number of leases referencing this template.
    pub fn link_count(&self) -> usize {
        self.linked_resource_ids.len()
    }

    pub fn is_linked_to(&self, resource: &ResourceId) -> bool {
        self.linked_resource_ids.contains(resource)
    }

    /// Copy of this template with `resource` added to its link set.
    pub fn with_link(&self, resource: ResourceId) -> Self {
        self.with_links(self.linked_resource_ids.with(resource))
    }

    /// Copy of this template with the link set replaced.
    pub fn with_links(&self, links: LinkSet) -> Self {
        Self {
            linked_resource_ids: links,
            ..self.clone()
        }
    }

    /// Validate aggregate invariants.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.as_str().is_empty() {
            return Err(DomainError::InvalidTemplate(
                "template identifier cannot be empty".into(),
            ));
        }
        if self.name.is_empty() {
            return Err(DomainError::MissingRequiredField { field: "name" });
        }
        Ok(())
    }
}

/// A create candidate: everything a [`Template`] has except identity.
///
/// The repository assigns the identifier and echoes the full entity back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTemplate {
    pub name: String,

    #[serde(flatten)]
    pub payload: TemplatePayload,

    #[serde(default)]
    pub linked_resource_ids: LinkSet,
}

impl NewTemplate {
    pub fn kind(&self) -> TemplateKind {
        self.payload.kind()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.is_empty() {
            return Err(DomainError::MissingRequiredField { field: "name" });
        }
        Ok(())
    }
}

// ============================================================================
// TemplateDraft - the in-progress edit
// ============================================================================

/// An in-progress, possibly unsaved edit of a template.
///
/// A draft without an identifier produces a *create* on save; one with an
/// identifier produces an *update*. Drafts are plain values owned by the
/// editing layer — cancelling an edit simply drops the draft, with no
/// repository involvement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDraft {
    pub id: Option<TemplateId>,
    pub name: String,
    pub payload: TemplatePayload,
}

impl TemplateDraft {
    /// Fresh, identifier-less draft of the given kind.
    pub fn blank(kind: TemplateKind) -> Self {
        Self {
            id: None,
            name: String::new(),
            payload: TemplatePayload::empty(kind),
        }
    }

    /// Fresh text draft.
    pub fn text(
        name: impl Into<String>,
        contents: impl Into<String>,
        html: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            payload: TemplatePayload::Text {
                contents: contents.into(),
                html: html.into(),
            },
        }
    }

    /// Fresh file-descriptor draft.
    pub fn file_descriptor(
        name: impl Into<String>,
        description: impl Into<String>,
        has_expiry_date: bool,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            payload: TemplatePayload::FileDescriptor {
                description: description.into(),
                has_expiry_date,
            },
        }
    }

    /// Draft loaded from an existing entity, for editing.
    pub fn from_template(template: &Template) -> Self {
        Self {
            id: Some(template.id.clone()),
            name: template.name.clone(),
            payload: template.payload.clone(),
        }
    }

    pub fn kind(&self) -> TemplateKind {
        self.payload.kind()
    }

    /// `true` when saving this draft will issue a create.
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Replace the payload, keeping the kind fixed.
    ///
    /// The kind of an existing template is write-once; swapping in a payload
    /// of the other kind is rejected before the repository is ever involved.
    pub fn replace_payload(&mut self, payload: TemplatePayload) -> Result<(), DomainError> {
        if payload.kind() != self.kind() {
            return Err(DomainError::KindMismatch {
                expected: self.kind(),
                actual: payload.kind(),
            });
        }
        self.payload = payload;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.is_empty() {
            return Err(DomainError::MissingRequiredField { field: "name" });
        }
        Ok(())
    }

    /// Turn this draft into a create candidate with the given link set.
    ///
    /// Only meaningful for identifier-less drafts; the association service
    /// decides the link set from the current lease context.
    pub fn into_candidate(self, links: LinkSet) -> NewTemplate {
        NewTemplate {
            name: self.name,
            payload: self.payload,
            linked_resource_ids: links,
        }
    }
}
