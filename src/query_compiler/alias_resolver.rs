//! Alias resolution for builder nodes and relationships
//!
//! Builder nodes carry a *requested* alias and nothing stops two nodes from
//! asking for the same one. This module assigns every node and every active
//! relationship a variable that is unique across the whole query:
//!
//! - relationships are walked in array order, endpoints first (`from`, then
//!   `to`), then the relationship itself
//! - a taken node alias is probed forward by bumping its leading character
//!   (`a` -> `b` -> `c` ...) a bounded number of times; the last probe is kept
//!   even if it still collides
//! - relationship aliases default to `rN` (1-based position among enabled
//!   relationships) and fall back to the first free `r1`, `r2`, ...
//! - nodes no relationship touches are resolved last, in node order, through
//!   the same table, so standalone patterns cannot shadow connected ones

use std::collections::{HashMap, HashSet};

use crate::query_builder::{QueryNode, QueryRelationship};

/// Resolved variables for one compilation.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    /// node id → resolved alias
    node_aliases: HashMap<String, String>,
    /// relationship id → resolved alias
    relationship_aliases: HashMap<String, String>,
    used: HashSet<String>,
}

impl AliasTable {
    /// Resolve aliases for `nodes` and the already-filtered active relationships.
    ///
    /// Each relationship comes paired with its position among enabled
    /// relationships; that position drives the default `rN` alias.
    pub fn resolve(
        nodes: &[QueryNode],
        active: &[(usize, &QueryRelationship)],
        max_probes: u32,
    ) -> Self {
        let by_id: HashMap<&str, &QueryNode> =
            nodes.iter().map(|node| (node.id.as_str(), node)).collect();
        let mut table = Self::default();

        for &(position, rel) in active {
            for endpoint in [rel.from.as_str(), rel.to.as_str()] {
                if let Some(node) = by_id.get(endpoint) {
                    table.bind_node(node, max_probes);
                }
            }
            table.bind_relationship(rel, position);
        }

        for node in nodes {
            table.bind_node(node, max_probes);
        }

        table
    }

    pub fn node_alias(&self, node_id: &str) -> Option<&str> {
        self.node_aliases.get(node_id).map(String::as_str)
    }

    pub fn relationship_alias(&self, rel_id: &str) -> Option<&str> {
        self.relationship_aliases.get(rel_id).map(String::as_str)
    }

    fn bind_node(&mut self, node: &QueryNode, max_probes: u32) {
        if self.node_aliases.contains_key(&node.id) {
            return;
        }
        let alias = probe_alias(&node.alias, &self.used, max_probes);
        if alias != node.alias {
            log::debug!(
                "alias_resolver: node '{}' requested '{}', bound as '{}'",
                node.id,
                node.alias,
                alias
            );
        }
        self.used.insert(alias.clone());
        self.node_aliases.insert(node.id.clone(), alias);
    }

    fn bind_relationship(&mut self, rel: &QueryRelationship, position: usize) {
        let preferred = match rel.alias.as_deref() {
            Some(alias) if !alias.is_empty() => alias.to_string(),
            _ => format!("r{}", position + 1),
        };
        let alias = if self.used.contains(&preferred) {
            let free = (1..)
                .map(|n| format!("r{}", n))
                .find(|candidate| !self.used.contains(candidate))
                .unwrap_or(preferred);
            log::debug!(
                "alias_resolver: relationship '{}' collided, bound as '{}'",
                rel.id,
                free
            );
            free
        } else {
            preferred
        };
        self.used.insert(alias.clone());
        self.relationship_aliases.insert(rel.id.clone(), alias);
    }
}

/// Probe forward from `requested` until a free alias is found or the probe
/// budget runs out.
fn probe_alias(requested: &str, used: &HashSet<String>, max_probes: u32) -> String {
    let mut candidate = requested.to_string();
    let mut attempts = 0;
    while used.contains(&candidate) && attempts < max_probes {
        candidate = bump_leading_char(&candidate);
        attempts += 1;
    }
    candidate
}

fn bump_leading_char(alias: &str) -> String {
    let mut chars = alias.chars();
    match chars.next() {
        Some(first) => {
            let bumped = char::from_u32(first as u32 + 1).unwrap_or(first);
            let mut next = String::with_capacity(alias.len());
            next.push(bumped);
            next.push_str(chars.as_str());
            next
        }
        None => String::new(),
    }
}
