// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::PageAudit;
pub use requests::{ContrastRequest, SuggestRequest, PaletteRequest, HeadingsRequest, PageAuditRequest};
pub use responses::{ContrastResponse, SuggestionResponse, PaletteResponse, HeadingsResponse, IssueView, HealthResponse, ErrorResponse};
