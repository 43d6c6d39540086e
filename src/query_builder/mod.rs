//! Visual query builder model
//!
//! These types describe a graph query the way the studio's builder edits it:
//! node patterns, relationship patterns, filter conditions, projection fields
//! and a limit policy. They serialize to the same camelCase JSON the builder
//! UI keeps in its state container, so a snapshot can be handed to the
//! compiler (or the CLI) as-is.

use serde::{Deserialize, Serialize};

mod id_sequence;
mod state;

pub use id_sequence::IdSequence;
pub(crate) use state::positional_field;

/// A node pattern in the builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryNode {
    /// Stable caller-assigned identifier (never rendered)
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Requested binding variable; collisions are resolved at compile time
    pub alias: String,
}

impl QueryNode {
    pub fn new(id: impl Into<String>, label: Option<&str>, alias: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.map(str::to_string),
            alias: alias.into(),
        }
    }
}

/// How a relationship joins the query.
///
/// `And` relationships are comma-joined into the leading `MATCH`, `Match`
/// relationships become their own trailing `MATCH` clause and
/// `OptionalMatch` relationships go behind a `WITH` hand-off into an
/// `OPTIONAL MATCH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchType {
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "MATCH")]
    Match,
    #[serde(rename = "OPTIONAL_MATCH")]
    OptionalMatch,
}

/// A directed relationship pattern between two builder nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRelationship {
    pub id: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub rel_type: Option<String>,
    /// Node id of the source endpoint
    pub from: String,
    /// Node id of the target endpoint
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Unset means "use the positional default"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_type: Option<MatchType>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl QueryRelationship {
    pub fn new(
        id: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        rel_type: Option<&str>,
    ) -> Self {
        Self {
            id: id.into(),
            rel_type: rel_type.map(str::to_string),
            from: from.into(),
            to: to.into(),
            alias: None,
            match_type: None,
            enabled: true,
        }
    }

    pub fn with_match_type(mut self, match_type: MatchType) -> Self {
        self.match_type = Some(match_type);
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Kind of a builder condition. Only `Property` conditions reach `WHERE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionType {
    Node,
    Relationship,
    Property,
    Path,
}

/// A filter condition as edited in the builder.
///
/// All payload fields are optional because the builder creates the row
/// before the user fills it in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryCondition {
    pub id: String,
    #[serde(rename = "type")]
    pub condition_type: ConditionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl QueryCondition {
    /// A fully populated property condition
    pub fn property(
        id: impl Into<String>,
        node_id: impl Into<String>,
        property: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            condition_type: ConditionType::Property,
            node_id: Some(node_id.into()),
            property: Some(property.into()),
            operator: Some(operator.into()),
            value: Some(value.into()),
        }
    }

    /// Borrow the payload if this condition can be rendered into `WHERE`.
    ///
    /// Returns `(node_id, property, operator, value)`. Empty strings count as
    /// missing, matching how the builder treats blank inputs.
    pub fn as_property_filter(&self) -> Option<(&str, &str, &str, &str)> {
        match self.condition_type {
            ConditionType::Property => {}
            ConditionType::Node | ConditionType::Relationship | ConditionType::Path => {
                return None
            }
        }
        fn filled(field: &Option<String>) -> Option<&str> {
            field.as_deref().filter(|s| !s.is_empty())
        }
        Some((
            filled(&self.node_id)?,
            filled(&self.property)?,
            filled(&self.operator)?,
            filled(&self.value)?,
        ))
    }
}

/// Which entity the `LIMIT` caps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LimitMode {
    /// Cap result rows with a trailing `LIMIT`
    #[default]
    Rows,
    /// Cap distinct primary entities before expanding relationships
    Nodes,
}

/// Snapshot of the builder handed to the compiler on every compile request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryBuilderState {
    #[serde(default)]
    pub nodes: Vec<QueryNode>,
    #[serde(default)]
    pub relationships: Vec<QueryRelationship>,
    #[serde(default)]
    pub conditions: Vec<QueryCondition>,
    /// Node positions (as decimal strings) or literal aliases
    #[serde(default)]
    pub return_fields: Vec<String>,
    #[serde(default)]
    pub limit: String,
    #[serde(default)]
    pub limit_mode: LimitMode,
}
