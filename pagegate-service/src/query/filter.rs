//! Filter expression grammar seam
//!
//! The filter language itself is an external collaborator: the pipeline
//! only needs a boolean/error contract, expressed here as the
//! [`FilterGrammar`] trait. A grammar checks an expression against a
//! resource's filterable field set and reports every violation it found
//! in one [`FilterViolation`], preserving the offending field name(s).
//!
//! [`ComparisonGrammar`] is the implementation wired in by default: a
//! small checker for `field OP value` conditions joined with `AND`/`OR`.
//! Swap it out by handing the assembler a different grammar.

use std::collections::HashSet;

/// Aggregated violations reported by a filter grammar
///
/// `fields` names the disallowed field(s) when the violation is an
/// allow-list one; it is empty for pure syntax errors. `detail` is a
/// human-readable diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterViolation {
    /// Field names outside the allow-list, in expression order
    pub fields: Vec<String>,
    /// Diagnostic message
    pub detail: String,
}

impl FilterViolation {
    /// A syntax violation with no offending fields
    pub fn syntax(detail: impl Into<String>) -> Self {
        Self {
            fields: Vec::new(),
            detail: detail.into(),
        }
    }

    /// An allow-list violation naming the offending fields
    pub fn disallowed(fields: Vec<String>) -> Self {
        let detail = format!("filter references disallowed field(s): {}", fields.join(", "));
        Self { fields, detail }
    }
}

/// Boolean/error contract for an external filter-expression grammar
pub trait FilterGrammar: Send + Sync {
    /// Validate `expr` against the allowed field set
    ///
    /// Returns `Ok(())` when the expression is syntactically valid and
    /// references only allowed fields. Must be a pure function of its
    /// inputs: identical calls produce identical results.
    fn validate(&self, expr: &str, allowed: &HashSet<String>) -> Result<(), FilterViolation>;
}

/// Default grammar: comparison conditions joined with `AND`/`OR`
///
/// Accepts expressions of the form
/// `field OP value [AND|OR field OP value ...]` where `OP` is one of
/// `=`, `!=`, `>`, `>=`, `<`, `<=` and `value` is a single-quoted string
/// or a bare literal. Connective keywords are case-insensitive and are
/// not recognized inside quoted literals.
///
/// # Example
///
/// ```rust
/// use std::collections::HashSet;
/// use pagegate_service::query::{ComparisonGrammar, FilterGrammar};
///
/// let allowed: HashSet<String> = ["status", "age"].iter().map(|s| s.to_string()).collect();
/// let grammar = ComparisonGrammar;
///
/// assert!(grammar.validate("status='active' AND age>=18", &allowed).is_ok());
/// assert!(grammar.validate("role='admin'", &allowed).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ComparisonGrammar;

impl FilterGrammar for ComparisonGrammar {
    fn validate(&self, expr: &str, allowed: &HashSet<String>) -> Result<(), FilterViolation> {
        let conditions = split_conditions(expr).map_err(FilterViolation::syntax)?;

        let mut disallowed = Vec::new();
        for condition in &conditions {
            let field = parse_condition(condition).map_err(FilterViolation::syntax)?;
            if !allowed.contains(field) && !disallowed.iter().any(|f| f == field) {
                disallowed.push(field.to_string());
            }
        }

        if disallowed.is_empty() {
            Ok(())
        } else {
            Err(FilterViolation::disallowed(disallowed))
        }
    }
}

/// Split an expression into conditions on `AND`/`OR` connectives,
/// respecting single-quoted literals.
fn split_conditions(expr: &str) -> Result<Vec<String>, String> {
    let chars: Vec<char> = expr.chars().collect();
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_quote = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == '\'' {
            in_quote = !in_quote;
            current.push(c);
            i += 1;
            continue;
        }
        if !in_quote && c.is_whitespace() {
            if let Some(width) = connective_at(&chars, i) {
                parts.push(current.trim().to_string());
                current.clear();
                i += width;
                continue;
            }
        }
        current.push(c);
        i += 1;
    }

    if in_quote {
        return Err("unterminated string literal".to_string());
    }
    parts.push(current.trim().to_string());
    Ok(parts)
}

/// If a whitespace-delimited `AND`/`OR` keyword starts at `i`, return
/// the number of characters to skip past it.
fn connective_at(chars: &[char], i: usize) -> Option<usize> {
    let mut j = i;
    while j < chars.len() && chars[j].is_whitespace() {
        j += 1;
    }
    let start = j;
    while j < chars.len() && chars[j].is_alphabetic() {
        j += 1;
    }
    let word: String = chars[start..j].iter().collect::<String>().to_lowercase();
    let followed_by_space = j < chars.len() && chars[j].is_whitespace();
    if (word == "and" || word == "or") && followed_by_space {
        Some(j - i)
    } else {
        None
    }
}

const OPERATORS: &[&str] = &["!=", ">=", "<=", "=", ">", "<"];

/// Parse one `field OP value` condition, returning the field name.
fn parse_condition(condition: &str) -> Result<&str, String> {
    if condition.is_empty() {
        return Err("empty filter condition".to_string());
    }

    let (idx, op) = OPERATORS
        .iter()
        .filter_map(|op| condition.find(op).map(|idx| (idx, *op)))
        .min_by_key(|(idx, _)| *idx)
        .ok_or_else(|| format!("no comparison operator in condition '{condition}'"))?;

    let field = condition[..idx].trim();
    if field.is_empty() {
        return Err(format!("missing field name in condition '{condition}'"));
    }
    if !field
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
    {
        return Err(format!("invalid field name '{field}'"));
    }

    let value = condition[idx + op.len()..].trim();
    if value.is_empty() {
        return Err(format!("missing value in condition '{condition}'"));
    }
    if value.starts_with('\'') && (value.len() < 2 || !value.ends_with('\'')) {
        return Err(format!("unterminated string literal in condition '{condition}'"));
    }

    Ok(field)
}
