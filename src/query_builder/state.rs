//! Editing operations on a builder snapshot.
//!
//! The builder UI mutates its state one gesture at a time (drop a node, draw
//! a relationship, add a filter row). These helpers keep the cross references
//! consistent while doing so: removing a node takes its relationships,
//! conditions and positional return fields with it, and reordering nodes
//! remaps positional return fields so they keep pointing at the same node.

use super::{IdSequence, MatchType, QueryBuilderState, QueryCondition, QueryNode, QueryRelationship};

impl QueryBuilderState {
    pub fn node(&self, id: &str) -> Option<&QueryNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|node| node.id == id)
    }

    pub fn relationship(&self, id: &str) -> Option<&QueryRelationship> {
        self.relationships.iter().find(|rel| rel.id == id)
    }

    /// Append a node and return its freshly allocated id
    pub fn add_node(
        &mut self,
        ids: &mut IdSequence,
        label: Option<&str>,
        alias: impl Into<String>,
    ) -> String {
        let id = ids.next_node_id();
        self.nodes.push(QueryNode::new(id.clone(), label, alias));
        id
    }

    /// Remove a node together with everything that references it.
    pub fn remove_node(&mut self, id: &str) -> bool {
        let Some(index) = self.node_index(id) else {
            return false;
        };
        let node_count = self.nodes.len();
        self.nodes.remove(index);
        self.relationships.retain(|rel| rel.from != id && rel.to != id);
        self.conditions
            .retain(|condition| condition.node_id.as_deref() != Some(id));

        let fields = std::mem::take(&mut self.return_fields);
        self.return_fields = fields
            .into_iter()
            .filter_map(|field| match positional_field(&field, node_count) {
                Some(position) if position == index => None,
                Some(position) if position > index => Some((position - 1).to_string()),
                _ => Some(field),
            })
            .collect();
        true
    }

    /// Move the node at `from` to position `to`.
    pub fn move_node(&mut self, from: usize, to: usize) -> bool {
        let node_count = self.nodes.len();
        if from >= node_count || to >= node_count {
            return false;
        }
        if from == to {
            return true;
        }

        let node = self.nodes.remove(from);
        self.nodes.insert(to, node);

        // Replay the same move on the positions to learn where each old index went
        let mut positions: Vec<usize> = (0..node_count).collect();
        let moved = positions.remove(from);
        positions.insert(to, moved);

        for field in &mut self.return_fields {
            if let Some(old) = positional_field(field, node_count) {
                if let Some(new) = positions.iter().position(|&p| p == old) {
                    *field = new.to_string();
                }
            }
        }
        true
    }

    /// Connect two existing nodes. Returns `None` if either endpoint is unknown.
    pub fn add_relationship(
        &mut self,
        ids: &mut IdSequence,
        from: &str,
        to: &str,
        rel_type: Option<&str>,
    ) -> Option<String> {
        if self.node(from).is_none() || self.node(to).is_none() {
            log::debug!(
                "add_relationship: unknown endpoint in {} -> {}, ignoring",
                from,
                to
            );
            return None;
        }
        let id = ids.next_relationship_id();
        self.relationships
            .push(QueryRelationship::new(id.clone(), from, to, rel_type));
        Some(id)
    }

    pub fn remove_relationship(&mut self, id: &str) -> bool {
        let before = self.relationships.len();
        self.relationships.retain(|rel| rel.id != id);
        self.relationships.len() != before
    }

    pub fn set_relationship_enabled(&mut self, id: &str, enabled: bool) -> bool {
        self.relationship_mut(id)
            .map(|rel| rel.enabled = enabled)
            .is_some()
    }

    /// Pin the match type, or pass `None` to fall back to the positional default
    pub fn set_match_type(&mut self, id: &str, match_type: Option<MatchType>) -> bool {
        self.relationship_mut(id)
            .map(|rel| rel.match_type = match_type)
            .is_some()
    }

    pub fn add_property_condition(
        &mut self,
        ids: &mut IdSequence,
        node_id: &str,
        property: &str,
        operator: &str,
        value: &str,
    ) -> String {
        let id = ids.next_condition_id();
        self.conditions.push(QueryCondition::property(
            id.clone(),
            node_id,
            property,
            operator,
            value,
        ));
        id
    }

    pub fn remove_condition(&mut self, id: &str) -> bool {
        let before = self.conditions.len();
        self.conditions.retain(|condition| condition.id != id);
        self.conditions.len() != before
    }

    fn relationship_mut(&mut self, id: &str) -> Option<&mut QueryRelationship> {
        self.relationships.iter_mut().find(|rel| rel.id == id)
    }
}

/// Interpret a return field as a node position, if it is one.
pub(crate) fn positional_field(field: &str, node_count: usize) -> Option<usize> {
    field
        .parse::<usize>()
        .ok()
        .filter(|&position| position < node_count)
}
