// Core audit exports
pub mod auditor;
pub mod color;
pub mod contrast;
pub mod headings;
pub mod hierarchy;
pub mod suggest;

pub use auditor::Auditor;
pub use color::{parse_hex, ColorError, Rgb};
pub use contrast::{contrast_ratio, evaluate_contrast, palette_matrix, relative_luminance, ContrastLevel, ContrastResult, WcagCompliance};
pub use headings::{extract_headings, Heading};
pub use hierarchy::{check_hierarchy, check_html, HeadingIssue, HeadingReport, HierarchyStatus, ScoringPolicy};
pub use suggest::{suggest_foreground, ContrastSuggestion};
