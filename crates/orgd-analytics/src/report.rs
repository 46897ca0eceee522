//! One-call summary of a chart

use crate::coverage::{skill_coverage, SkillCoverage};
use crate::headcount::{headcount, Headcount};
use crate::span::{span_of_control, SpanOfControl};
use crate::structure::{structure, Structure};
use crate::succession::{succession_risks, RiskLevel, SuccessionRisk};
use orgd_store::{AnalyticsSettings, OrgChart};
use serde::Serialize;

/// Every analysis of one chart
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgReport {
    /// Staffing totals
    pub headcount: Headcount,
    /// Hierarchy shape
    pub structure: Structure,
    /// Span of control
    pub span: SpanOfControl,
    /// Skill coverage
    pub coverage: SkillCoverage,
    /// Succession outlook of filled nodes
    pub succession: Vec<SuccessionRisk>,
}

impl OrgReport {
    /// Filled nodes at the given risk
    pub fn at_risk(&self, level: RiskLevel) -> impl Iterator<Item = &SuccessionRisk> {
        self.succession.iter().filter(move |r| r.risk == level)
    }
}

/// Run every analysis
#[must_use]
pub fn analyze(chart: &OrgChart, settings: &AnalyticsSettings) -> OrgReport {
    let report = OrgReport {
        headcount: headcount(chart),
        structure: structure(chart),
        span: span_of_control(chart, settings.wide_span_threshold),
        coverage: skill_coverage(chart),
        succession: succession_risks(chart),
    };
    tracing::debug!(
        nodes = report.headcount.nodes,
        vacant = report.headcount.vacant,
        coverage = report.coverage.percent,
        "analyzed chart"
    );
    report
}
