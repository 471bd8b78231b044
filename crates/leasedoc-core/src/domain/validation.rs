use crate::domain::{
    entities::template::{NewTemplate, Template, TemplateDraft},
    error::DomainError,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across entities.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_template(template: &Template) -> Result<(), DomainError> {
        template.validate()
    }

    pub fn validate_candidate(candidate: &NewTemplate) -> Result<(), DomainError> {
        candidate.validate()
    }

    pub fn validate_draft(draft: &TemplateDraft) -> Result<(), DomainError> {
        draft.validate()
    }
}
