use crate::core::HeadingReport;
use serde::{Deserialize, Serialize};

/// Heading check of a remote page, as stored in the cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageAudit {
    pub url: String,
    /// Final URL after redirects
    #[serde(rename = "resolvedUrl")]
    pub resolved_url: String,
    #[serde(rename = "fetchedAt")]
    pub fetched_at: chrono::DateTime<chrono::Utc>,
    pub report: HeadingReport,
}
