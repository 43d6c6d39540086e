//! Update Builder
//!
//! Compiles a builder state plus property assignments into
//! `MATCH ... [WHERE ...] SET alias.prop = value, ... RETURN alias`.
//! The `MATCH`/`WHERE` part is the rows-mode rendering without projection
//! or limit.

use serde::Serialize;
use serde_json::Value;

use super::common::{format_number, quote_string};
use super::compile_ctx::CompileContext;
use super::condition_builder::build_where;
use super::errors::CompileError;
use super::pattern_builder::build_match_clauses;

/// Convert caller-supplied values into JSON values, keeping caller order.
pub(crate) fn collect_updates<I, K, V>(updates: I) -> Result<Vec<(String, Value)>, CompileError>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Serialize,
{
    updates
        .into_iter()
        .map(|(property, value)| {
            let property = property.into();
            match serde_json::to_value(value) {
                Ok(value) => Ok((property, value)),
                Err(e) => Err(CompileError::unserializable_value(property, e)),
            }
        })
        .collect()
}

/// Render a value as a Cypher literal.
pub fn format_value(property: &str, value: &Value) -> Result<String, CompileError> {
    let literal = match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(number) => {
            if let Some(i) = number.as_i64() {
                i.to_string()
            } else if let Some(u) = number.as_u64() {
                u.to_string()
            } else {
                match number.as_f64() {
                    Some(f) => format_number(f),
                    None => number.to_string(),
                }
            }
        }
        Value::String(s) => quote_string(s),
        Value::Array(_) | Value::Object(_) => {
            let json = serde_json::to_string(value)
                .map_err(|e| CompileError::unserializable_value(property, e))?;
            quote_string(&json)
        }
    };
    Ok(literal)
}

/// The update target must be a node alias the `MATCH` section binds.
pub(crate) fn ensure_target_bound(
    ctx: &CompileContext<'_>,
    target_alias: &str,
) -> Result<(), CompileError> {
    let bound = ctx.node_aliases();
    if bound.iter().any(|alias| alias == target_alias) {
        return Ok(());
    }
    log::warn!(
        "update_builder: alias '{}' is not bound (bound: {:?})",
        target_alias,
        bound
    );
    Err(CompileError::target_alias_not_found(target_alias, &bound))
}

pub(crate) fn build_update_query(
    ctx: &CompileContext<'_>,
    target_alias: &str,
    updates: &[(String, Value)],
) -> Result<Vec<String>, CompileError> {
    let filters = ctx.property_filters();
    let mut clauses = build_match_clauses(ctx);
    if let Some(predicate) = build_where(&filters) {
        clauses.push(format!("WHERE {}", predicate));
    }

    let assignments = updates
        .iter()
        .map(|(property, value)| {
            format_value(property, value)
                .map(|literal| format!("{}.{} = {}", target_alias, property, literal))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if assignments.is_empty() {
        log::warn!(
            "update_builder: no properties to set on '{}', emitting read-only query",
            target_alias
        );
    } else {
        clauses.push(format!("SET {}", assignments.join(", ")));
    }
    clauses.push(format!("RETURN {}", target_alias));
    Ok(clauses)
}
