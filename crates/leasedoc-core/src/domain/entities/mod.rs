pub mod draft;
pub mod template;

pub use crate::domain::DomainError;
pub use draft::{DraftSlot, DraftState, SaveDisposition, SaveTicket};
pub use template::{Template, TemplateDraft, TemplateId, TemplateKind};
