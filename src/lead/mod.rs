//! Inbound form submission and the CRM lead record it maps into.

pub mod record;
pub mod submission;

pub use record::LeadRecord;
pub use submission::FormSubmission;
