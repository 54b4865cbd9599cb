use crate::core::{ContrastResult, ContrastSuggestion, HeadingIssue, HeadingReport, HierarchyStatus, WcagCompliance};
use serde::{Deserialize, Serialize};

/// Response for the contrast endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastResponse {
    pub foreground: String,
    pub background: String,
    pub ratio: f64,
    /// Ratio rounded to two decimals, as shown to users
    pub display_ratio: f64,
    pub compliance: WcagCompliance,
}

impl From<ContrastResult> for ContrastResponse {
    fn from(result: ContrastResult) -> Self {
        Self {
            foreground: result.foreground.to_hex(),
            background: result.background.to_hex(),
            ratio: result.ratio,
            display_ratio: crate::core::contrast::round_ratio(result.ratio),
            compliance: result.compliance,
        }
    }
}

/// Response for the suggestion endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionResponse {
    pub original: String,
    pub suggested: String,
    pub background: String,
    pub level: crate::core::ContrastLevel,
    pub ratio: f64,
    pub display_ratio: f64,
    pub achievable: bool,
    pub unchanged: bool,
}

impl From<ContrastSuggestion> for SuggestionResponse {
    fn from(suggestion: ContrastSuggestion) -> Self {
        Self {
            original: suggestion.original.to_hex(),
            suggested: suggestion.suggested.to_hex(),
            background: suggestion.background.to_hex(),
            level: suggestion.level,
            ratio: suggestion.ratio,
            display_ratio: crate::core::contrast::round_ratio(suggestion.ratio),
            achievable: suggestion.achievable,
            unchanged: suggestion.is_unchanged(),
        }
    }
}

/// Response for the palette endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteResponse {
    pub pairs: Vec<ContrastResponse>,
    pub total_pairs: usize,
    /// Pairs passing AA for normal text
    pub aa_normal_pairs: usize,
}

/// One issue as reported over the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueView {
    pub code: String,
    pub message: String,
    pub detail: HeadingIssue,
}

impl From<&HeadingIssue> for IssueView {
    fn from(issue: &HeadingIssue) -> Self {
        Self {
            code: issue.code().to_string(),
            message: issue.message(),
            detail: issue.clone(),
        }
    }
}

/// Response for the heading endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingsResponse {
    pub report_id: String,
    pub url: Option<String>,
    pub headings: Vec<crate::core::Heading>,
    pub issues: Vec<IssueView>,
    pub score: u8,
    pub status: HierarchyStatus,
    pub outline: String,
    pub checked_at: chrono::DateTime<chrono::Utc>,
    pub cached: bool,
}

impl HeadingsResponse {
    pub fn new(
        report: HeadingReport,
        url: Option<String>,
        checked_at: chrono::DateTime<chrono::Utc>,
        cached: bool,
    ) -> Self {
        Self {
            report_id: uuid::Uuid::new_v4().to_string(),
            url,
            outline: report.outline(),
            issues: report.issues.iter().map(IssueView::from).collect(),
            headings: report.headings,
            score: report.score,
            status: report.status,
            checked_at,
            cached,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub cache: String,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}
