//! Per-compilation context shared by every stage.
//!
//! Built once from a builder snapshot: filters the relationships that take
//! part in compilation, resolves aliases and classifies patterns. Stages only
//! ever read from it.

use std::collections::HashMap;

use crate::config::CompilerConfig;
use crate::query_builder::{QueryBuilderState, QueryNode, QueryRelationship};

use super::alias_resolver::AliasTable;
use super::condition_builder::PropertyFilter;
use super::pattern_builder::PatternGroups;

pub(crate) struct CompileContext<'a> {
    pub state: &'a QueryBuilderState,
    pub config: &'a CompilerConfig,
    /// Enabled relationships whose endpoints both exist, in array order,
    /// each paired with its position among *all* enabled relationships
    pub active: Vec<(usize, &'a QueryRelationship)>,
    pub groups: PatternGroups<'a>,
    pub aliases: AliasTable,
    nodes_by_id: HashMap<&'a str, &'a QueryNode>,
}

impl<'a> CompileContext<'a> {
    pub fn new(state: &'a QueryBuilderState, config: &'a CompilerConfig) -> Self {
        let nodes_by_id: HashMap<&str, &QueryNode> = state
            .nodes
            .iter()
            .map(|node| (node.id.as_str(), node))
            .collect();

        // Positions count every enabled relationship, dangling ones included
        let active: Vec<(usize, &QueryRelationship)> = state
            .relationships
            .iter()
            .filter(|rel| rel.enabled)
            .enumerate()
            .filter(|(_, rel)| {
                let known = nodes_by_id.contains_key(rel.from.as_str())
                    && nodes_by_id.contains_key(rel.to.as_str());
                if !known {
                    log::debug!(
                        "compile: skipping relationship '{}' with unknown endpoint ({} -> {})",
                        rel.id,
                        rel.from,
                        rel.to
                    );
                }
                known
            })
            .collect();

        let aliases = AliasTable::resolve(&state.nodes, &active, config.max_alias_probes);
        let groups = PatternGroups::classify(&active);

        Self {
            state,
            config,
            active,
            groups,
            aliases,
            nodes_by_id,
        }
    }

    pub fn node(&self, id: &str) -> Option<&'a QueryNode> {
        self.nodes_by_id.get(id).copied()
    }

    /// Resolved alias for a node id, or the fallback alias when unknown
    pub fn alias_of(&self, node_id: &str) -> &str {
        self.aliases
            .node_alias(node_id)
            .unwrap_or(self.config.fallback_alias.as_str())
    }

    pub fn relationship_alias<'s>(&'s self, rel: &'s QueryRelationship) -> &'s str {
        self.aliases.relationship_alias(&rel.id).unwrap_or(&rel.id)
    }

    pub fn has_relationships(&self) -> bool {
        !self.active.is_empty()
    }

    /// Resolved aliases of every node, in node order
    pub fn node_aliases(&self) -> Vec<String> {
        self.state
            .nodes
            .iter()
            .map(|node| self.alias_of(&node.id).to_string())
            .collect()
    }

    /// Conditions that can be rendered into `WHERE`, in builder order
    pub fn property_filters(&self) -> Vec<PropertyFilter<'_>> {
        self.state
            .conditions
            .iter()
            .filter_map(|condition| {
                let filter = condition.as_property_filter();
                if filter.is_none() {
                    log::debug!(
                        "compile: dropping incomplete condition '{}' ({:?})",
                        condition.id,
                        condition.condition_type
                    );
                }
                filter
            })
            .map(|(node_id, property, operator, value)| PropertyFilter {
                node_id,
                alias: self.alias_of(node_id),
                known_node: self.node(node_id).is_some(),
                property,
                operator,
                value,
            })
            .collect()
    }

    pub fn separator(&self) -> &'static str {
        if self.config.multiline {
            "\n"
        } else {
            " "
        }
    }
}
