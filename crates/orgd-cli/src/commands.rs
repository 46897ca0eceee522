//! Subcommand handlers

use crate::Session;
use anyhow::Context;
use clap::ArgMatches;
use orgd_analytics::{analyze, phase_diff, DiffStatus, RiskLevel};
use orgd_matching::MatchResult;
use orgd_model::{AvailabilityStatus, ExperienceTier, NodeId, PersonId, Phase, RoleId};
use orgd_store::{check_integrity, selectors, OrgChart, SearchQuery, Snapshot};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

fn write_json<T: Serialize>(out: &mut dyn Write, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn chart(session: &Session, phase: Phase) -> anyhow::Result<&OrgChart> {
    session
        .store
        .chart(&session.factory, phase)
        .with_context(|| format!("no {phase} chart for factory {}", session.factory))
}

fn joined<T: std::fmt::Display>(items: &[T]) -> String {
    if items.is_empty() {
        return "none".to_string();
    }
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn summary(session: &Session, out: &mut dyn Write) -> anyhow::Result<bool> {
    let report = analyze(chart(session, session.phase)?, &session.config.analytics);
    if session.json {
        write_json(out, &report)?;
        return Ok(true);
    }

    let h = &report.headcount;
    writeln!(out, "Factory {} ({})", session.factory, session.phase)?;
    writeln!(
        out,
        "Nodes: {} ({} filled, {} vacant, {} empty), fill rate {}%",
        h.nodes,
        h.filled,
        h.vacant,
        h.empty,
        h.fill_rate()
    )?;
    writeln!(
        out,
        "Personnel: {} ({} assigned, {} unassigned)",
        h.personnel, h.assigned, h.unassigned
    )?;
    writeln!(
        out,
        "Hierarchy: depth {}, width {}, {} roots",
        report.structure.depth,
        report.structure.width,
        report.structure.roots.len()
    )?;
    writeln!(
        out,
        "Span of control: average {:.1}, max {}, wide: {}",
        report.span.average,
        report.span.max,
        joined(&report.span.wide)
    )?;
    writeln!(
        out,
        "Skill coverage: {}% (uncovered: {})",
        report.coverage.percent,
        joined(&report.coverage.uncovered)
    )?;
    writeln!(
        out,
        "Succession risk: {} high, {} medium, {} low",
        report.at_risk(RiskLevel::High).count(),
        report.at_risk(RiskLevel::Medium).count(),
        report.at_risk(RiskLevel::Low).count()
    )?;
    Ok(true)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NodeMatches {
    node: NodeId,
    title: String,
    #[serde(flatten)]
    result: MatchResult,
}

pub(crate) fn matches(
    session: &Session,
    args: &ArgMatches,
    out: &mut dyn Write,
) -> anyhow::Result<bool> {
    let chart = chart(session, session.phase)?;
    let targets: Vec<NodeId> = match args.get_one::<String>("node") {
        Some(id) => {
            let id = NodeId::from(id.as_str());
            anyhow::ensure!(chart.node(&id).is_some(), "unknown node: {id}");
            vec![id]
        }
        None => selectors::vacant_nodes(&session.store, &session.factory, session.phase)
            .into_iter()
            .map(|n| n.id.clone())
            .collect(),
    };

    let results: Vec<NodeMatches> = targets
        .into_iter()
        .map(|id| {
            let title = chart.node(&id).map(|n| n.title.clone()).unwrap_or_default();
            let result = selectors::matches_for_node(&session.store, &session.factory, session.phase, &id);
            NodeMatches {
                node: id,
                title,
                result,
            }
        })
        .collect();

    if session.json {
        write_json(out, &results)?;
        return Ok(true);
    }

    if results.is_empty() {
        writeln!(out, "No vacant nodes")?;
    }
    for entry in &results {
        writeln!(
            out,
            "{} ({}): {} potential matches, requires {}",
            entry.title,
            entry.node,
            entry.result.potential_match_count,
            joined(&entry.result.required_skills)
        )?;
        for m in &entry.result.matched_personnel {
            writeln!(
                out,
                "  {:<24} {:>3}%  score {:>3}  {}/{} skills  {}",
                m.person.name,
                m.match_percentage(),
                m.match_score(),
                m.score.matched_skills_count,
                m.score.total_required_skills,
                m.person.availability
            )?;
        }
    }
    Ok(true)
}

pub(crate) fn gaps(session: &Session, args: &ArgMatches, out: &mut dyn Write) -> anyhow::Result<bool> {
    let person = PersonId::from(
        args.get_one::<String>("person")
            .context("--person is required")?
            .as_str(),
    );
    let role = RoleId::from(
        args.get_one::<String>("role")
            .context("--role is required")?
            .as_str(),
    );

    let plan = selectors::development_plan(&session.store, &session.factory, session.phase, &person, &role)
        .with_context(|| format!("unknown person {person} or role {role}"))?;

    if session.json {
        write_json(out, &plan)?;
        return Ok(true);
    }

    writeln!(
        out,
        "{person} for {role}: {}% ({}/{} requirements met)",
        plan.score_percent, plan.requirements_met, plan.requirements_total
    )?;
    for gap in &plan.gaps {
        writeln!(
            out,
            "  {:<32} level {} of {}{}",
            gap.name,
            gap.current_level,
            gap.required_level,
            if gap.is_essential { "  essential" } else { "" }
        )?;
    }
    Ok(true)
}

pub(crate) fn diff(session: &Session, out: &mut dyn Write) -> anyhow::Result<bool> {
    let diff = phase_diff(chart(session, Phase::Current)?, chart(session, Phase::Future)?);
    if session.json {
        write_json(out, &diff)?;
        return Ok(true);
    }

    if diff.is_empty() {
        writeln!(out, "No changes between current and future")?;
        return Ok(true);
    }
    for node in &diff.nodes {
        let mut line = format!("{:<8} node {} ({})", node.status, node.node, node.title);
        if let Some(previous) = &node.previous_title {
            line.push_str(&format!(", renamed from {previous}"));
        }
        if node.status == DiffStatus::Changed {
            for (label, ids) in [("+roles", &node.roles_added), ("-roles", &node.roles_removed)] {
                if !ids.is_empty() {
                    line.push_str(&format!(", {label} {}", joined(ids)));
                }
            }
            for (label, ids) in [("+people", &node.personnel_added), ("-people", &node.personnel_removed)] {
                if !ids.is_empty() {
                    line.push_str(&format!(", {label} {}", joined(ids)));
                }
            }
        }
        writeln!(out, "{line}")?;
    }
    for role in &diff.roles {
        writeln!(out, "{:<8} role {} ({})", role.status, role.role, role.title)?;
    }
    for person in &diff.moves {
        writeln!(
            out,
            "moved    {} ({}): {} -> {}",
            person.name,
            person.person,
            joined(&person.from),
            joined(&person.to)
        )?;
    }
    Ok(true)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidationEntry {
    chart: String,
    #[serde(flatten)]
    report: orgd_store::IntegrityReport,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Validation {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    charts: Vec<ValidationEntry>,
}

pub(crate) fn validate(args: &ArgMatches, out: &mut dyn Write) -> anyhow::Result<bool> {
    let path = args
        .get_one::<PathBuf>("snapshot")
        .context("snapshot path is required")?;
    let json = args.get_flag("json");
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading snapshot {}", path.display()))?;

    let validation = match Snapshot::parse(&text) {
        Err(err) => Validation {
            valid: false,
            error: Some(err.to_string()),
            version: None,
            charts: Vec::new(),
        },
        Ok(snapshot) => {
            let version = snapshot.version.clone();
            let charts: Vec<ValidationEntry> = snapshot
                .into_charts()
                .iter()
                .map(|(key, chart)| ValidationEntry {
                    chart: key.to_string(),
                    report: check_integrity(chart),
                })
                .filter(|entry| !entry.report.is_clean())
                .collect();
            Validation {
                valid: charts.is_empty(),
                error: None,
                version: Some(version),
                charts,
            }
        }
    };

    if json {
        write_json(out, &validation)?;
        return Ok(validation.valid);
    }

    if let Some(err) = &validation.error {
        writeln!(out, "invalid: {err}")?;
    }
    for entry in &validation.charts {
        writeln!(out, "{}:", entry.chart)?;
        for finding in &entry.report.dangling {
            writeln!(out, "  {finding}")?;
        }
        for id in &entry.report.duplicate_ids {
            writeln!(out, "  duplicate id: {id}")?;
        }
        for node in &entry.report.self_connections {
            writeln!(out, "  node {node} reports to itself")?;
        }
    }
    if validation.valid {
        writeln!(
            out,
            "ok: snapshot version {}",
            validation.version.as_deref().unwrap_or("unknown")
        )?;
    }
    Ok(validation.valid)
}

pub(crate) fn search(session: &Session, args: &ArgMatches, out: &mut dyn Write) -> anyhow::Result<bool> {
    let mut query = SearchQuery::new();
    if let Some(text) = args.get_one::<String>("text") {
        query = query.with_text(text.as_str());
    }
    if let Some(availability) = args.get_one::<AvailabilityStatus>("availability") {
        query = query.with_availability(availability.clone());
    }
    if let Some(experience) = args.get_one::<ExperienceTier>("experience") {
        query = query.with_experience(experience.clone());
    }
    if let Some(department) = args.get_one::<String>("department") {
        query = query.with_department(department.as_str());
    }
    if args.get_flag("vacant") {
        query = query.vacant_only();
    }

    let hits = orgd_store::search::search(&session.store, &session.factory, session.phase, &query);
    if session.json {
        write_json(out, &hits)?;
        return Ok(true);
    }

    for role in &hits.roles {
        writeln!(out, "role   {:<12} {} [{}]", role.id, role.title, joined(&role.skills))?;
    }
    for person in &hits.personnel {
        writeln!(
            out,
            "person {:<12} {} ({}, {})",
            person.id, person.name, person.experience, person.availability
        )?;
    }
    for node in &hits.nodes {
        writeln!(out, "node   {:<12} {}", node.id, node.title)?;
    }
    writeln!(out, "{} results", hits.len())?;
    Ok(true)
}
