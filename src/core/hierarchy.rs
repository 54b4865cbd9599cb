use crate::core::headings::{extract_headings, Heading};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default number of issues that take the score from 100 to 0
pub const DEFAULT_ISSUE_SLOTS: u32 = 5;

/// How issues translate into a 0-100 score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringPolicy {
    /// Issues beyond this many stop lowering the score
    pub issue_slots: u32,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            issue_slots: DEFAULT_ISSUE_SLOTS,
        }
    }
}

impl ScoringPolicy {
    /// `round(max(0, 100 - min(issues, slots) / slots * 100))`
    pub fn score(&self, issue_count: usize) -> u8 {
        let slots = self.issue_slots.max(1) as f64;
        let counted = (issue_count as f64).min(slots);
        (100.0 - counted / slots * 100.0).max(0.0).round() as u8
    }
}

/// A structural problem in the heading outline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HeadingIssue {
    NoHeadingsFound,
    MissingH1,
    MultipleH1 { count: usize },
    SkippedLevel { index: usize, from: u8, to: u8 },
    EmptyHeading { index: usize, level: u8 },
    FirstHeadingNotH1 { level: u8 },
}

impl HeadingIssue {
    pub fn code(&self) -> &'static str {
        match self {
            HeadingIssue::NoHeadingsFound => "no_headings_found",
            HeadingIssue::MissingH1 => "missing_h1",
            HeadingIssue::MultipleH1 { .. } => "multiple_h1",
            HeadingIssue::SkippedLevel { .. } => "skipped_level",
            HeadingIssue::EmptyHeading { .. } => "empty_heading",
            HeadingIssue::FirstHeadingNotH1 { .. } => "first_heading_not_h1",
        }
    }

    pub fn message(&self) -> String {
        match self {
            HeadingIssue::NoHeadingsFound => "No headings found on the page".to_string(),
            HeadingIssue::MissingH1 => "Page has no H1 heading".to_string(),
            HeadingIssue::MultipleH1 { count } => {
                format!("Page has {} H1 headings; use exactly one", count)
            }
            HeadingIssue::SkippedLevel { index, from, to } => format!(
                "Heading #{} skips from H{} to H{}",
                index + 1,
                from,
                to
            ),
            HeadingIssue::EmptyHeading { index, level } => {
                format!("Heading #{} (H{}) has no text", index + 1, level)
            }
            HeadingIssue::FirstHeadingNotH1 { level } => {
                format!("First heading is H{}, expected H1", level)
            }
        }
    }
}

impl fmt::Display for HeadingIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Overall outcome of a hierarchy check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HierarchyStatus {
    Valid,
    HasIssues,
    NoHeadingsFound,
}

/// Headings, issues and score for one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingReport {
    pub headings: Vec<Heading>,
    pub issues: Vec<HeadingIssue>,
    pub score: u8,
    pub status: HierarchyStatus,
}

impl HeadingReport {
    pub fn is_valid(&self) -> bool {
        self.status == HierarchyStatus::Valid
    }

    /// Indented outline, two spaces per level below H1
    pub fn outline(&self) -> String {
        self.headings
            .iter()
            .map(|h| {
                let indent = "  ".repeat(h.level.saturating_sub(1) as usize);
                let text = if h.text.is_empty() { "(empty)" } else { h.text.as_str() };
                format!("{}H{} {}", indent, h.level, text)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Validate an extracted outline
///
/// Rules, in order: exactly one H1; no level increases by more than one;
/// no empty headings; the first heading is an H1.
pub fn check_hierarchy(headings: Vec<Heading>, policy: &ScoringPolicy) -> HeadingReport {
    if headings.is_empty() {
        return HeadingReport {
            headings,
            issues: vec![HeadingIssue::NoHeadingsFound],
            score: 0,
            status: HierarchyStatus::NoHeadingsFound,
        };
    }

    let mut issues = Vec::new();

    match headings.iter().filter(|h| h.level == 1).count() {
        0 => issues.push(HeadingIssue::MissingH1),
        1 => {}
        count => issues.push(HeadingIssue::MultipleH1 { count }),
    }

    for (index, pair) in headings.windows(2).enumerate() {
        let (prev, cur) = (pair[0].level, pair[1].level);
        if cur > prev.saturating_add(1) {
            issues.push(HeadingIssue::SkippedLevel {
                index: index + 1,
                from: prev,
                to: cur,
            });
        }
    }

    for (index, heading) in headings.iter().enumerate() {
        if heading.is_empty() {
            issues.push(HeadingIssue::EmptyHeading {
                index,
                level: heading.level,
            });
        }
    }

    if let Some(first) = headings.first().filter(|h| h.level != 1) {
        issues.push(HeadingIssue::FirstHeadingNotH1 { level: first.level });
    }

    let status = if issues.is_empty() {
        HierarchyStatus::Valid
    } else {
        HierarchyStatus::HasIssues
    };

    HeadingReport {
        score: policy.score(issues.len()),
        headings,
        issues,
        status,
    }
}

/// Extract and validate in one step
pub fn check_html(html: &str, policy: &ScoringPolicy) -> HeadingReport {
    check_hierarchy(extract_headings(html), policy)
}
