//! Candidate pool and suggestions for a vacant node

use crate::cache::MatchCountCache;
use crate::scoring::{requires_leadership, score_candidate, CandidateScore, MatchWeights};
use crate::vacancy::NodeAssignment;
use orgd_model::{Node, Person, Role};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Whether the person may count towards the node's potential matches
fn in_pool(node: &Node, person: &Person, required: &BTreeSet<String>) -> bool {
    !node.has_person(&person.id)
        && (required.is_empty() || person.skills.iter().any(|s| required.contains(s)))
}

fn count_pool(node: &Node, personnel: &[Person], required: &BTreeSet<String>) -> usize {
    personnel.iter().filter(|p| in_pool(node, p, required)).count()
}

/// Number of people not on the node who could fill it
///
/// With no required skills, everybody not on the node counts. Otherwise a
/// person counts if they share at least one required skill.
#[must_use]
pub fn potential_match_count(node: &Node, roles: &[Role], personnel: &[Person]) -> usize {
    let required = NodeAssignment::resolve(node, roles, personnel).required_skills();
    count_pool(node, personnel, &required)
}

/// Match a node with the default weights
#[must_use]
pub fn compute_matches(node: &Node, roles: &[Role], personnel: &[Person]) -> MatchResult {
    MatchEngine::default().compute(node, roles, personnel)
}

/// A scored suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedPerson {
    /// The candidate
    #[serde(flatten)]
    pub person: Person,
    /// The candidate's score
    #[serde(flatten)]
    pub score: CandidateScore,
}

impl MatchedPerson {
    /// Raw score
    #[inline]
    #[must_use]
    pub fn match_score(&self) -> u32 {
        self.score.match_score
    }

    /// Clamped display percentage
    #[inline]
    #[must_use]
    pub fn match_percentage(&self) -> u32 {
        self.score.match_percentage
    }
}

/// Matching output for one node
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// Roles assigned, nobody assigned
    pub has_vacancy: bool,
    /// Badge count, see [`potential_match_count`]
    pub potential_match_count: usize,
    /// Union of the assigned roles' skills
    pub required_skills: Vec<String>,
    /// Assignable candidates, best raw score first
    pub matched_personnel: Vec<MatchedPerson>,
}

impl MatchResult {
    /// Best suggestion, if any
    #[inline]
    #[must_use]
    pub fn best(&self) -> Option<&MatchedPerson> {
        self.matched_personnel.first()
    }
}

/// Matching with configurable weights and a memoized badge count
#[derive(Debug, Clone)]
pub struct MatchEngine {
    weights: MatchWeights,
    cache: MatchCountCache,
}

impl MatchEngine {
    /// Create engine
    #[must_use]
    pub fn new(weights: MatchWeights, cache_capacity: u64) -> Self {
        Self {
            weights,
            cache: MatchCountCache::new(cache_capacity),
        }
    }

    /// Scoring weights
    #[inline]
    #[must_use]
    pub fn weights(&self) -> &MatchWeights {
        &self.weights
    }

    /// Badge-count cache
    #[inline]
    #[must_use]
    pub fn cache(&self) -> &MatchCountCache {
        &self.cache
    }

    /// Score every suggestable person for the node
    ///
    /// Suggestions are drawn from the same pool as the badge count, minus
    /// anyone "Not Available". They are ordered by raw score, highest first;
    /// equal scores keep collection order.
    #[must_use]
    pub fn compute(&self, node: &Node, roles: &[Role], personnel: &[Person]) -> MatchResult {
        let assignment = NodeAssignment::resolve(node, roles, personnel);
        let required = assignment.required_skills();
        let potential_match_count = count_pool(node, personnel, &required);
        let matched_personnel = self.rank(node, &assignment, personnel, &required);

        tracing::debug!(
            node = %node.id,
            required = required.len(),
            potential = potential_match_count,
            suggested = matched_personnel.len(),
            "computed matches"
        );

        MatchResult {
            has_vacancy: assignment.has_vacancy(),
            potential_match_count,
            required_skills: required.into_iter().collect(),
            matched_personnel,
        }
    }

    /// Memoized [`potential_match_count`]
    ///
    /// `revision` identifies the personnel collection: callers must pass a
    /// different value whenever any person in `personnel` changed.
    #[must_use]
    pub fn potential_match_count(
        &self,
        node: &Node,
        roles: &[Role],
        personnel: &[Person],
        revision: u64,
    ) -> usize {
        let required = NodeAssignment::resolve(node, roles, personnel).required_skills();
        self.cache
            .get_or_compute(node, &required, revision, || count_pool(node, personnel, &required))
    }

    fn rank(
        &self,
        node: &Node,
        assignment: &NodeAssignment<'_>,
        personnel: &[Person],
        required: &BTreeSet<String>,
    ) -> Vec<MatchedPerson> {
        let leadership = requires_leadership(assignment.roles.iter().copied());

        let mut ranked: Vec<MatchedPerson> = personnel
            .iter()
            .filter(|p| p.availability.is_assignable() && in_pool(node, p, required))
            .map(|p| MatchedPerson {
                person: p.clone(),
                score: score_candidate(p, required, leadership, &self.weights),
            })
            .collect();

        // Stable: ties keep collection order
        ranked.sort_by(|a, b| b.score.match_score.cmp(&a.score.match_score));
        ranked
    }
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::new(MatchWeights::default(), MatchCountCache::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orgd_model::{AvailabilityStatus, ExperienceTier, NodeId, PersonId, RoleId};
    use pretty_assertions::assert_eq;

    fn roles() -> Vec<Role> {
        vec![
            Role::new(RoleId::from("r-mgr"), "Production Manager").with_skills(["lean", "budget"]),
            Role::new(RoleId::from("r-op"), "Operator").with_skills(["cnc"]),
            Role::new(RoleId::from("r-any"), "Helper"),
        ]
    }

    fn personnel() -> Vec<Person> {
        vec![
            Person::new(PersonId::from("p1"), "Ana")
                .with_skills(["lean"])
                .with_experience(ExperienceTier::MidLevel)
                .with_availability(AvailabilityStatus::Available),
            Person::new(PersonId::from("p2"), "Ben")
                .with_skills(["lean", "budget"])
                .with_experience(ExperienceTier::Management)
                .with_availability(AvailabilityStatus::PartiallyAvailable),
            Person::new(PersonId::from("p3"), "Cy")
                .with_skills(["budget"])
                .with_experience(ExperienceTier::Senior)
                .with_availability(AvailabilityStatus::NotAvailable),
            Person::new(PersonId::from("p4"), "Dee")
                .with_skills(["cnc"])
                .with_experience(ExperienceTier::Junior),
        ]
    }

    #[test]
    fn count_and_suggestions_for_leadership_vacancy() {
        let node = Node::new(NodeId::from("n"), "Plant").with_roles([RoleId::from("r-mgr")]);
        let result = compute_matches(&node, &roles(), &personnel());

        assert!(result.has_vacancy);
        assert_eq!(result.required_skills, vec!["budget", "lean"]);
        // Cy is Not Available but still counts towards the badge
        assert_eq!(result.potential_match_count, 3);

        let ids: Vec<&str> = result.matched_personnel.iter().map(|m| m.person.id.as_str()).collect();
        assert_eq!(ids, vec!["p2", "p1"]);

        // Ben: 40 + 30 + 30 + 5
        assert_eq!(result.matched_personnel[0].match_score(), 105);
        assert_eq!(result.matched_personnel[0].match_percentage(), 100);
        // Ana: 20 + 0 + 15 + 15
        assert_eq!(result.matched_personnel[1].match_score(), 50);
        assert_eq!(result.matched_personnel[1].score.total_required_skills, 2);
    }

    #[test]
    fn empty_required_skills_count_everyone_off_node() {
        let node = Node::new(NodeId::from("n"), "Float")
            .with_roles([RoleId::from("r-any")])
            .with_personnel([PersonId::from("p4")]);
        let personnel = personnel();

        assert_eq!(potential_match_count(&node, &roles(), &personnel), 3);
    }

    #[test]
    fn no_candidate_has_skill() {
        let roles = vec![Role::new(RoleId::from("r"), "Chemist").with_skills(["titration"])];
        let node = Node::new(NodeId::from("n"), "Lab").with_roles([RoleId::from("r")]);
        let result = compute_matches(&node, &roles, &personnel());

        assert_eq!(result.potential_match_count, 0);
        assert!(result.matched_personnel.is_empty());
        assert!(result.best().is_none());
    }

    #[test]
    fn equal_raw_scores_keep_collection_order() {
        let roles = vec![Role::new(RoleId::from("r"), "Operator").with_skills(["cnc"])];
        let personnel = vec![
            Person::new(PersonId::from("a"), "A").with_skills(["cnc"]),
            Person::new(PersonId::from("b"), "B").with_skills(["cnc"]),
            Person::new(PersonId::from("c"), "C").with_skills(["cnc"]),
        ];
        let node = Node::new(NodeId::from("n"), "Cell").with_roles([RoleId::from("r")]);
        let result = compute_matches(&node, &roles, &personnel);

        let ids: Vec<&str> = result.matched_personnel.iter().map(|m| m.person.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn missing_references_degrade_to_empty() {
        let node = Node::new(NodeId::from("n"), "Ghost").with_roles([RoleId::from("nope")]);
        let result = compute_matches(&node, &[], &[]);

        assert_eq!(result, MatchResult::default());
    }

    #[test]
    fn cached_count_agrees_with_direct_count() {
        let engine = MatchEngine::default();
        let node = Node::new(NodeId::from("n"), "Cell").with_roles([RoleId::from("r-op")]);
        let roles = roles();
        let personnel = personnel();

        let direct = potential_match_count(&node, &roles, &personnel);
        assert_eq!(engine.potential_match_count(&node, &roles, &personnel, 1), direct);
        assert_eq!(engine.potential_match_count(&node, &roles, &personnel, 1), direct);
        assert_eq!(engine.cache().stats().hits, 1);
    }

    #[test]
    fn matched_person_serializes_flat() {
        let node = Node::new(NodeId::from("n"), "Cell").with_roles([RoleId::from("r-op")]);
        let result = compute_matches(&node, &roles(), &personnel());
        let json = serde_json::to_value(&result).unwrap();

        let first = &json["matchedPersonnel"][0];
        assert_eq!(first["name"], "Dee");
        assert_eq!(first["matchScore"], 30);
        assert_eq!(first["matchedSkillsCount"], 1);
        assert_eq!(json["potentialMatchCount"], 1);
    }
}
