use crate::core::{
    color::{parse_hex, ColorError},
    contrast::{evaluate_contrast, palette_matrix, ContrastLevel, ContrastResult},
    hierarchy::{check_html, HeadingReport, ScoringPolicy},
    suggest::{suggest_foreground, ContrastSuggestion},
};

/// Configured entry point for every audit the service runs
///
/// Holds the heading scoring policy and the contrast level used when a
/// suggestion request does not name one.
#[derive(Debug, Clone, Copy)]
pub struct Auditor {
    policy: ScoringPolicy,
    default_level: ContrastLevel,
}

impl Auditor {
    pub fn new(policy: ScoringPolicy, default_level: ContrastLevel) -> Self {
        Self {
            policy,
            default_level,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(ScoringPolicy::default(), ContrastLevel::AaNormal)
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    pub fn default_level(&self) -> ContrastLevel {
        self.default_level
    }

    /// Ratio and compliance flags for a hex pair
    pub fn contrast(&self, foreground: &str, background: &str) -> Result<ContrastResult, ColorError> {
        evaluate_contrast(foreground, background)
    }

    /// Nearest compliant foreground, at `level` or the configured default
    pub fn suggest(
        &self,
        foreground: &str,
        background: &str,
        level: Option<ContrastLevel>,
    ) -> Result<ContrastSuggestion, ColorError> {
        let fg = parse_hex(foreground)?;
        let bg = parse_hex(background)?;

        Ok(suggest_foreground(fg, bg, level.unwrap_or(self.default_level)))
    }

    /// Every pair in a palette
    pub fn palette<S: AsRef<str>>(&self, colors: &[S]) -> Result<Vec<ContrastResult>, ColorError> {
        palette_matrix(colors)
    }

    /// Heading outline check for a raw HTML document
    pub fn headings(&self, html: &str) -> HeadingReport {
        let report = check_html(html, &self.policy);

        tracing::debug!(
            "Heading check: {} headings, {} issues, score {}",
            report.headings.len(),
            report.issues.len(),
            report.score
        );

        report
    }
}

impl Default for Auditor {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hierarchy::HierarchyStatus;

    #[test]
    fn test_suggest_uses_default_level() {
        let auditor = Auditor::new(ScoringPolicy::default(), ContrastLevel::AaaNormal);
        let s = auditor.suggest("#777777", "#FFFFFF", None).unwrap();

        assert_eq!(s.level, ContrastLevel::AaaNormal);
        assert!(s.ratio >= 7.0);
    }

    #[test]
    fn test_suggest_explicit_level_wins() {
        let auditor = Auditor::with_defaults();
        let s = auditor
            .suggest("#777777", "#FFFFFF", Some(ContrastLevel::AaLarge))
            .unwrap();

        assert!(s.is_unchanged());
    }

    #[test]
    fn test_policy_flows_into_headings() {
        let auditor = Auditor::new(ScoringPolicy { issue_slots: 2 }, ContrastLevel::AaNormal);
        let report = auditor.headings("<h2>a</h2>");

        // missing_h1 + first_heading_not_h1 saturates two slots
        assert_eq!(report.issues.len(), 2);
        assert_eq!(report.score, 0);
        assert_eq!(report.status, HierarchyStatus::HasIssues);
    }

    #[test]
    fn test_invalid_color_propagates() {
        let auditor = Auditor::default();
        assert!(matches!(
            auditor.contrast("#12345", "#FFFFFF"),
            Err(ColorError::InvalidColorFormat(_))
        ));
    }
}
