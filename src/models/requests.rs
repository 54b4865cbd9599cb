use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to evaluate a foreground/background pair
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ContrastRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "fg", rename = "foreground")]
    pub foreground: String,
    #[validate(length(min = 1))]
    #[serde(alias = "bg", rename = "background")]
    pub background: String,
}

/// Request for a compliant replacement foreground
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SuggestRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "fg", rename = "foreground")]
    pub foreground: String,
    #[validate(length(min = 1))]
    #[serde(alias = "bg", rename = "background")]
    pub background: String,
    /// aa-normal, aa-large, aaa-normal or aaa-large
    #[serde(default)]
    pub level: Option<String>,
}

/// Request to cross-check a palette
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PaletteRequest {
    #[validate(length(min = 2, max = 16))]
    pub colors: Vec<String>,
}

/// Request to check an inline HTML document
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct HeadingsRequest {
    // 2 MiB
    #[validate(length(max = 2097152))]
    pub html: String,
}

/// Request to fetch and check a remote page
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PageAuditRequest {
    #[validate(url)]
    pub url: String,
    /// Skip the cache and fetch again
    #[serde(default, alias = "force_refresh", rename = "forceRefresh")]
    pub force_refresh: bool,
}
