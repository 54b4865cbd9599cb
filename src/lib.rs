//! Inclusiv Audit - WCAG contrast and heading hierarchy checks
//!
//! This library provides the two self-contained audits behind Inclusiv's
//! free accessibility tools: the contrast ratio evaluator and the heading
//! hierarchy checker, plus the HTTP service that exposes them.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    check_html, contrast_ratio, evaluate_contrast, extract_headings, Auditor, ColorError, ContrastLevel,
    ContrastResult, Heading, HeadingIssue, HeadingReport, HierarchyStatus, Rgb, ScoringPolicy,
};
