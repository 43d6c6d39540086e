//! Condition Builder
//!
//! Renders builder filter rows into a `WHERE` expression. Literal formatting
//! is inferred from the value text and the operator:
//!
//! 1. numeric comparator with a numeric value casts the property with
//!    `toInteger` / `toFloat` and leaves the value unquoted
//! 2. text operators (`CONTAINS`, `STARTS WITH`, `ENDS WITH`) cast with
//!    `toString` and quote the value
//! 3. any other operator with a numeric value compares unquoted
//! 4. everything else compares against a quoted string
//!
//! Conditions are joined with `AND`; there is no `OR` grouping.

use super::common::{canonical_number, format_number, is_integral, quote_string};

/// A builder condition that has everything needed to render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PropertyFilter<'a> {
    pub node_id: &'a str,
    /// Resolved alias of `node_id` (fallback alias when the node is unknown)
    pub alias: &'a str,
    pub known_node: bool,
    pub property: &'a str,
    pub operator: &'a str,
    pub value: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OperatorKind {
    NumericComparison,
    TextMatch,
    Other,
}

fn classify_operator(operator: &str) -> OperatorKind {
    match operator {
        ">" | "<" | ">=" | "<=" => OperatorKind::NumericComparison,
        "CONTAINS" | "STARTS WITH" | "ENDS WITH" => OperatorKind::TextMatch,
        _ => OperatorKind::Other,
    }
}

/// Render one comparison, e.g. `toInteger(n.age) > 30`.
pub fn render_condition(alias: &str, property: &str, operator: &str, value: &str) -> String {
    let access = format!("{}.{}", alias, property);
    let number = canonical_number(value);

    match (classify_operator(operator), number) {
        (OperatorKind::NumericComparison, Some(number)) => {
            let cast = if is_integral(number) {
                "toInteger"
            } else {
                "toFloat"
            };
            format!("{}({}) {} {}", cast, access, operator, format_number(number))
        }
        (OperatorKind::TextMatch, _) => {
            format!("toString({}) {} {}", access, operator, quote_string(value))
        }
        (_, Some(number)) => format!("{} {} {}", access, operator, format_number(number)),
        (_, None) => format!("{} {} {}", access, operator, quote_string(value)),
    }
}

/// Join filters into a `WHERE` clause body; `None` when there is nothing to filter.
pub(crate) fn build_where<'a, I>(filters: I) -> Option<String>
where
    I: IntoIterator<Item = &'a PropertyFilter<'a>>,
{
    let rendered: Vec<String> = filters
        .into_iter()
        .map(|f| render_condition(f.alias, f.property, f.operator, f.value))
        .collect();

    if rendered.is_empty() {
        None
    } else {
        Some(rendered.join(" AND "))
    }
}
