// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for leasedoc.
//!
//! This module contains pure business logic with ZERO external dependencies.
//! All I/O and persistence concerns are handled via ports (traits) defined
//! in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No external crates**: Only std library + thiserror + serde derives
//! - **Immutable entities**: All domain objects are Clone + PartialEq
//! - **Rich domain model**: Behavior lives in entities, not services
//!
// Public API - what the world sees
pub mod entities;
pub mod error;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::{
    draft::{DraftSlot, DraftState, SaveDisposition, SaveTicket},
    template::{
        LinkSet, NewTemplate, ResourceId, Template, TemplateDraft, TemplateId, TemplateKind,
        TemplatePayload,
    },
};

pub use error::{DomainError, ErrorCategory};

pub use validation::DomainValidator;

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn text_template(id: &str, links: &[&str]) -> Template {
        Template {
            id: TemplateId::from(id),
            name: format!("template {id}"),
            payload: TemplatePayload::Text {
                contents: "Dear {{tenant}}".into(),
                html: "<p>Dear {{tenant}}</p>".into(),
            },
            linked_resource_ids: links.iter().map(|l| ResourceId::from(*l)).collect(),
        }
    }

    // ========================================================================
    // Kind Tests
    // ========================================================================

    #[test]
    fn kind_parses_correctly() {
        assert_eq!(TemplateKind::from_str("text").unwrap(), TemplateKind::Text);
        assert_eq!(
            TemplateKind::from_str("fileDescriptor").unwrap(),
            TemplateKind::FileDescriptor
        );
        assert!(TemplateKind::from_str("spreadsheet").is_err());
    }

    #[test]
    fn kind_is_derived_from_payload() {
        let text = TemplatePayload::empty(TemplateKind::Text);
        let file = TemplatePayload::empty(TemplateKind::FileDescriptor);
        assert_eq!(text.kind(), TemplateKind::Text);
        assert_eq!(file.kind(), TemplateKind::FileDescriptor);
    }

    // ========================================================================
    // LinkSet Tests
    // ========================================================================

    #[test]
    fn link_set_deduplicates() {
        let links: LinkSet = ["L1", "L1", "L2"]
            .into_iter()
            .map(ResourceId::from)
            .collect();
        assert_eq!(links.len(), 2);
    }

    #[test]
    fn link_set_with_and_without_are_pure() {
        let links = LinkSet::singleton(ResourceId::from("L1"));
        let grown = links.with(ResourceId::from("L2"));
        let shrunk = grown.without(&ResourceId::from("L1"));

        assert_eq!(links.len(), 1);
        assert_eq!(grown.len(), 2);
        assert_eq!(shrunk.len(), 1);
        assert!(shrunk.contains(&ResourceId::from("L2")));
        assert!(!shrunk.contains(&ResourceId::from("L1")));
    }

    #[test]
    fn without_missing_member_is_noop() {
        let links = LinkSet::singleton(ResourceId::from("L1"));
        let same = links.without(&ResourceId::from("L9"));
        assert_eq!(links, same);
    }

    // ========================================================================
    // Template Tests
    // ========================================================================

    #[test]
    fn template_link_queries() {
        let t = text_template("T1", &["L1", "L2"]);
        assert_eq!(t.link_count(), 2);
        assert!(t.is_linked_to(&ResourceId::from("L1")));
        assert!(!t.is_linked_to(&ResourceId::from("L3")));
    }

    #[test]
    fn template_with_link_leaves_original_untouched() {
        let t = text_template("T1", &["L1"]);
        let linked = t.with_link(ResourceId::from("L2"));
        assert_eq!(t.link_count(), 1);
        assert_eq!(linked.link_count(), 2);
        assert_eq!(linked.id, t.id);
    }

    #[test]
    fn template_validates_empty_name() {
        let mut t = text_template("T1", &["L1"]);
        t.name.clear();
        assert_eq!(
            t.validate(),
            Err(DomainError::MissingRequiredField { field: "name" })
        );
    }

    #[test]
    fn template_validates_empty_id() {
        let t = text_template("", &["L1"]);
        assert!(matches!(t.validate(), Err(DomainError::InvalidTemplate(_))));
    }

    // ========================================================================
    // Draft Tests
    // ========================================================================

    #[test]
    fn blank_draft_is_new() {
        let draft = TemplateDraft::blank(TemplateKind::Text);
        assert!(draft.is_new());
        assert_eq!(draft.kind(), TemplateKind::Text);
    }

    #[test]
    fn draft_from_template_carries_id() {
        let t = text_template("T1", &["L1"]);
        let draft = TemplateDraft::from_template(&t);
        assert_eq!(draft.id.as_ref(), Some(&t.id));
        assert!(!draft.is_new());
    }

    #[test]
    fn draft_rejects_payload_kind_swap() {
        let mut draft = TemplateDraft::text("t", "contents", "<p>contents</p>");
        let result =
            draft.replace_payload(TemplatePayload::empty(TemplateKind::FileDescriptor));
        assert!(matches!(result, Err(DomainError::KindMismatch { .. })));
        // Payload untouched after the rejection.
        assert_eq!(draft.kind(), TemplateKind::Text);
    }

    #[test]
    fn draft_accepts_same_kind_payload() {
        let mut draft = TemplateDraft::file_descriptor("insurance", "scan of policy", true);
        draft
            .replace_payload(TemplatePayload::FileDescriptor {
                description: "policy, latest".into(),
                has_expiry_date: true,
            })
            .unwrap();
        assert_eq!(draft.kind(), TemplateKind::FileDescriptor);
    }

    // ========================================================================
    // Draft Slot State Machine
    // ========================================================================

    #[test]
    fn slot_open_edit_rejects_wrong_kind() {
        let mut slot = DraftSlot::new(TemplateKind::FileDescriptor);
        let t = text_template("T1", &["L1"]);
        assert!(matches!(
            slot.open_edit(&t),
            Err(DomainError::KindMismatch { .. })
        ));
        assert!(slot.is_closed());
    }

    #[test]
    fn slot_rejects_double_open() {
        let mut slot = DraftSlot::new(TemplateKind::Text);
        slot.open_new().unwrap();
        assert!(matches!(
            slot.open_new(),
            Err(DomainError::DraftAlreadyOpen { .. })
        ));
    }

    #[test]
    fn slot_save_roundtrip_success() {
        let mut slot = DraftSlot::new(TemplateKind::Text);
        slot.open_new().unwrap().rename("welcome letter");
        let (draft, ticket) = slot.begin_save().unwrap();
        assert_eq!(draft.name, "welcome letter");

        assert_eq!(slot.complete_save(ticket, true), SaveDisposition::Committed);
        assert!(slot.is_closed());
    }

    #[test]
    fn slot_save_failure_reopens_editor() {
        let mut slot = DraftSlot::new(TemplateKind::Text);
        slot.open_new().unwrap().rename("welcome letter");
        let (_, ticket) = slot.begin_save().unwrap();

        assert_eq!(slot.complete_save(ticket, false), SaveDisposition::Reopened);
        assert_eq!(slot.draft().unwrap().name, "welcome letter");
    }

    #[test]
    fn slot_rejects_save_with_empty_name() {
        let mut slot = DraftSlot::new(TemplateKind::Text);
        slot.open_new().unwrap();
        assert!(matches!(
            slot.begin_save(),
            Err(DomainError::MissingRequiredField { field: "name" })
        ));
    }

    #[test]
    fn slot_rejects_concurrent_save() {
        let mut slot = DraftSlot::new(TemplateKind::Text);
        slot.open_new().unwrap().rename("a");
        let _ = slot.begin_save().unwrap();
        assert!(matches!(
            slot.begin_save(),
            Err(DomainError::SaveInFlight { .. })
        ));
    }

    #[test]
    fn late_completion_after_cancel_is_stale() {
        let mut slot = DraftSlot::new(TemplateKind::Text);
        slot.open_new().unwrap().rename("a");
        let (_, ticket) = slot.begin_save().unwrap();

        // User closes the dialog before the response arrives.
        assert!(slot.cancel());

        // The in-flight response lands afterwards; it must not resurrect
        // anything.
        assert_eq!(slot.complete_save(ticket, true), SaveDisposition::Stale);
        assert!(slot.is_closed());
    }

    #[test]
    fn stale_ticket_never_touches_newer_draft() {
        let mut slot = DraftSlot::new(TemplateKind::Text);
        slot.open_new().unwrap().rename("first");
        let (_, old_ticket) = slot.begin_save().unwrap();
        slot.cancel();

        // A newer draft of the same kind is now being edited.
        slot.open_new().unwrap().rename("second");

        assert_eq!(slot.complete_save(old_ticket, false), SaveDisposition::Stale);
        assert_eq!(slot.draft().unwrap().name, "second");
    }

    #[test]
    fn cancel_on_closed_slot_is_noop() {
        let mut slot = DraftSlot::new(TemplateKind::Text);
        assert!(!slot.cancel());
    }

    // ========================================================================
    // Wire Format
    // ========================================================================

    #[test]
    fn template_serializes_with_type_tag() {
        let t = text_template("T1", &["L1"]);
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["id"], "T1");
        assert_eq!(json["linkedResourceIds"][0], "L1");
    }

    #[test]
    fn file_descriptor_round_trips_camel_case() {
        let json = serde_json::json!({
            "id": "T2",
            "name": "insurance",
            "type": "fileDescriptor",
            "description": "signed policy",
            "hasExpiryDate": true,
            "linkedResourceIds": ["L1", "L1"]
        });
        let t: Template = serde_json::from_value(json).unwrap();
        assert_eq!(t.kind(), TemplateKind::FileDescriptor);
        // Duplicate wire entries collapse on deserialize.
        assert_eq!(t.link_count(), 1);

        let back = serde_json::to_value(&t).unwrap();
        assert_eq!(back["hasExpiryDate"], true);
    }
}
