//! Pattern Builder
//!
//! Classifies active relationships into three groups and renders the
//! `MATCH` section of a query:
//!
//! - **primary**: comma-joined into the leading `MATCH`
//! - **chained**: each its own trailing `MATCH` clause
//! - **optional**: behind a `WITH` hand-off, in one `OPTIONAL MATCH`
//!
//! A relationship without an explicit match type is primary when it is the
//! first enabled relationship and optional otherwise. Enabled relationships
//! with a missing endpoint are not rendered but still count.

use std::collections::HashSet;

use crate::query_builder::{MatchType, QueryNode, QueryRelationship};

use super::common::{node_pattern, relationship_body};
use super::compile_ctx::CompileContext;

/// The match type a relationship compiles with, given its position among
/// enabled relationships.
pub fn effective_match_type(rel: &QueryRelationship, position: usize) -> MatchType {
    rel.match_type.unwrap_or(if position == 0 {
        MatchType::And
    } else {
        MatchType::OptionalMatch
    })
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PatternGroups<'a> {
    pub primary: Vec<&'a QueryRelationship>,
    pub chained: Vec<&'a QueryRelationship>,
    pub optional: Vec<&'a QueryRelationship>,
}

impl<'a> PatternGroups<'a> {
    /// Group `(position, relationship)` pairs, where `position` counts
    /// enabled relationships.
    pub fn classify(active: &[(usize, &'a QueryRelationship)]) -> Self {
        let mut groups = Self::default();
        for &(position, rel) in active {
            match effective_match_type(rel, position) {
                MatchType::And => groups.primary.push(rel),
                MatchType::Match => groups.chained.push(rel),
                MatchType::OptionalMatch => groups.optional.push(rel),
            }
        }
        groups
    }

    /// Node ids bound by the primary or chained group
    fn matched_node_ids(&self) -> HashSet<&'a str> {
        self.primary
            .iter()
            .chain(self.chained.iter())
            .flat_map(|&rel| [rel.from.as_str(), rel.to.as_str()])
            .collect()
    }
}

/// Decides whether a node pattern repeats its label.
pub(crate) enum LabelPolicy<'a> {
    /// Label only the first time a node appears in the query text
    FirstAppearance { bound: HashSet<&'a str> },
    /// Label every node except the given one
    OmitFor { node_id: &'a str },
}

impl<'a> LabelPolicy<'a> {
    pub fn first_appearance() -> Self {
        LabelPolicy::FirstAppearance {
            bound: HashSet::new(),
        }
    }

    fn label_for(&mut self, node: &'a QueryNode) -> Option<&'a str> {
        match self {
            LabelPolicy::FirstAppearance { bound } => {
                if bound.insert(node.id.as_str()) {
                    node.label.as_deref()
                } else {
                    None
                }
            }
            LabelPolicy::OmitFor { node_id } => {
                if node.id == *node_id {
                    None
                } else {
                    node.label.as_deref()
                }
            }
        }
    }
}

/// Render `(alias[:Label])` for a node id.
pub(crate) fn render_node<'a>(
    ctx: &CompileContext<'a>,
    node_id: &str,
    policy: &mut LabelPolicy<'a>,
) -> String {
    match ctx.node(node_id) {
        Some(node) => node_pattern(ctx.alias_of(node_id), policy.label_for(node)),
        None => node_pattern(ctx.alias_of(node_id), None),
    }
}

/// Render `(from)-[rel]->(to)`.
pub(crate) fn render_relationship<'a>(
    ctx: &CompileContext<'a>,
    rel: &QueryRelationship,
    policy: &mut LabelPolicy<'a>,
) -> String {
    let from = render_node(ctx, &rel.from, policy);
    let body = relationship_body(ctx.relationship_alias(rel), rel.rel_type.as_deref());
    let to = render_node(ctx, &rel.to, policy);
    format!("{}-{}->{}", from, body, to)
}

/// Render the rows-mode `MATCH` section as a list of clauses.
pub(crate) fn build_match_clauses(ctx: &CompileContext<'_>) -> Vec<String> {
    if !ctx.has_relationships() {
        return vec![standalone_match(ctx)];
    }

    let groups = &ctx.groups;
    let mut policy = LabelPolicy::first_appearance();
    let mut leading: Vec<String> = Vec::new();
    // Aliases the WITH hand-off must carry into the optional section
    let mut carried: Vec<String> = Vec::new();

    for rel in &groups.primary {
        leading.push(render_relationship(ctx, rel, &mut policy));
        push_unique(&mut carried, ctx.alias_of(&rel.from));
        push_unique(&mut carried, ctx.relationship_alias(rel));
        push_unique(&mut carried, ctx.alias_of(&rel.to));
    }

    let matched = groups.matched_node_ids();
    for node in &ctx.state.nodes {
        if matched.contains(node.id.as_str()) {
            continue;
        }
        leading.push(render_node(ctx, &node.id, &mut policy));
        push_unique(&mut carried, ctx.alias_of(&node.id));
    }

    let mut clauses = Vec::new();
    if !leading.is_empty() {
        clauses.push(format!("MATCH {}", leading.join(", ")));
    }

    if !groups.optional.is_empty() {
        if !carried.is_empty() {
            clauses.push(format!("WITH {}", carried.join(", ")));
        }
        let optional: Vec<String> = groups
            .optional
            .iter()
            .map(|rel| render_relationship(ctx, rel, &mut policy))
            .collect();
        clauses.push(format!("OPTIONAL MATCH {}", optional.join(", ")));
    }

    for rel in &groups.chained {
        clauses.push(format!("MATCH {}", render_relationship(ctx, rel, &mut policy)));
    }

    log::trace!(
        "pattern_builder: {} primary, {} chained, {} optional -> {} clauses",
        groups.primary.len(),
        groups.chained.len(),
        groups.optional.len(),
        clauses.len()
    );

    clauses
}

pub(crate) fn push_unique(aliases: &mut Vec<String>, alias: &str) {
    if !aliases.iter().any(|existing| existing == alias) {
        aliases.push(alias.to_string());
    }
}

/// `MATCH` over every node as an independent pattern, or `(n)` when empty.
fn standalone_match(ctx: &CompileContext<'_>) -> String {
    if ctx.state.nodes.is_empty() {
        return format!("MATCH ({})", ctx.config.fallback_alias);
    }
    let mut policy = LabelPolicy::first_appearance();
    let patterns: Vec<String> = ctx
        .state
        .nodes
        .iter()
        .map(|node| render_node(ctx, &node.id, &mut policy))
        .collect();
    format!("MATCH {}", patterns.join(", "))
}
