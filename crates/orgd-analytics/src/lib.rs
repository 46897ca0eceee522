//! Org-chart analytics for orgd
//!
//! # Overview
//!
//! Read-only analyses of a single [`orgd_store::OrgChart`]:
//! - **Structure**: roots, levels, depth and width of the hierarchy
//! - **Span of control**: direct reports per node and wide-span flags
//! - **Headcount**: filled, vacant and empty nodes; assigned personnel
//! - **Coverage**: which placed-role skills the assigned workforce holds
//! - **Succession**: successor counts and risk for filled nodes
//! - **Diff**: what changes between a factory's current and future chart
//!
//! # Example
//!
//! ```rust
//! use orgd_analytics::{analyze, phase_diff};
//! use orgd_store::{AnalyticsSettings, OrgChart};
//!
//! let chart = OrgChart::new();
//! let report = analyze(&chart, &AnalyticsSettings::default());
//! assert_eq!(report.headcount.nodes, 0);
//! assert!(phase_diff(&chart, &chart).is_empty());
//! ```

pub mod coverage;
pub mod diff;
pub mod headcount;
pub mod report;
pub mod span;
pub mod structure;
pub mod succession;

pub use coverage::{skill_coverage, SkillCoverage};
pub use diff::{phase_diff, DiffStatus, NodeDiff, PersonnelMove, PhaseDiff, RoleDiff};
pub use headcount::{headcount, Headcount};
pub use report::{analyze, OrgReport};
pub use span::{span_of_control, NodeSpan, SpanOfControl, DEFAULT_WIDE_SPAN_THRESHOLD};
pub use structure::{structure, Structure};
pub use succession::{succession_risks, RiskLevel, SuccessionRisk};

/// Version of the analytics crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
