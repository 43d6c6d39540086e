//! Common utilities for Cypher text generation

/// Render a node pattern `(alias[:Label])`.
pub fn node_pattern(alias: &str, label: Option<&str>) -> String {
    match label.filter(|l| !l.is_empty()) {
        Some(label) => format!("({}:{})", alias, label),
        None => format!("({})", alias),
    }
}

/// Render a relationship body `[alias[:TYPE]]` (without arrows).
pub fn relationship_body(alias: &str, rel_type: Option<&str>) -> String {
    match rel_type.filter(|t| !t.is_empty()) {
        Some(rel_type) => format!("[{}:{}]", alias, rel_type),
        None => format!("[{}]", alias),
    }
}

/// Double-quote a string literal, escaping backslashes and quotes.
///
/// # Examples
/// ```
/// use cypher_studio::query_compiler::common::quote_string;
/// assert_eq!(quote_string("Alice"), "\"Alice\"");
/// assert_eq!(quote_string("say \"hi\""), "\"say \\\"hi\\\"\"");
/// ```
pub fn quote_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            _ => quoted.push(ch),
        }
    }
    quoted.push('"');
    quoted
}

/// Format a finite number the way the studio's UI layer prints numbers.
///
/// Integers print without a fractional part, `-0` prints as `0`, and very
/// large or very small magnitudes switch to exponent notation with an
/// explicit sign (`1e+21`, `1.5e-7`).
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{}", value);
    }
    let exp = format!("{:e}", value);
    match exp.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => exp,
    }
}

/// Parse `text` as a number only if it is already in canonical form.
///
/// A value counts as numeric when formatting the parsed number yields the
/// trimmed input back unchanged. `"5"` and `"-2.5"` qualify; `"05"`, `"5.0"`,
/// `"+5"`, `"1e3"`, `"NaN"` and `"Infinity"` do not.
pub fn canonical_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let value: f64 = trimmed.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    (format_number(value) == trimmed).then_some(value)
}

/// Whether a finite number has no fractional part.
pub fn is_integral(value: f64) -> bool {
    value.fract() == 0.0
}
