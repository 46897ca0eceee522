//! Span of control

use crate::structure::reporting_lines;
use orgd_model::NodeId;
use orgd_store::OrgChart;
use serde::Serialize;
use std::collections::BTreeMap;

/// Default span above which a manager is flagged
pub const DEFAULT_WIDE_SPAN_THRESHOLD: usize = 8;

/// Direct reports of one node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSpan {
    /// Node
    pub node: NodeId,
    /// Node title
    pub title: String,
    /// Number of direct reports
    pub direct_reports: usize,
}

/// Span-of-control summary
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpanOfControl {
    /// Every node, in node order
    pub spans: Vec<NodeSpan>,
    /// Nodes with at least one report
    pub managers: usize,
    /// Mean reports per manager (0 without managers)
    pub average: f64,
    /// Largest span
    pub max: usize,
    /// Managers whose span exceeds the threshold
    pub wide: Vec<NodeId>,
}

/// Compute spans of control, flagging spans above `wide_threshold`
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn span_of_control(chart: &OrgChart, wide_threshold: usize) -> SpanOfControl {
    let mut reports: BTreeMap<&NodeId, usize> = BTreeMap::new();
    for (source, _) in reporting_lines(chart) {
        *reports.entry(source).or_default() += 1;
    }

    let spans: Vec<NodeSpan> = chart
        .nodes
        .iter()
        .map(|n| NodeSpan {
            node: n.id.clone(),
            title: n.title.clone(),
            direct_reports: reports.get(&n.id).copied().unwrap_or(0),
        })
        .collect();

    let managers: Vec<&NodeSpan> = spans.iter().filter(|s| s.direct_reports > 0).collect();
    let total: usize = managers.iter().map(|s| s.direct_reports).sum();
    let average = if managers.is_empty() {
        0.0
    } else {
        total as f64 / managers.len() as f64
    };
    let wide = managers
        .iter()
        .filter(|s| s.direct_reports > wide_threshold)
        .map(|s| s.node.clone())
        .collect();

    SpanOfControl {
        managers: managers.len(),
        average,
        max: spans.iter().map(|s| s.direct_reports).max().unwrap_or(0),
        wide,
        spans,
    }
}
