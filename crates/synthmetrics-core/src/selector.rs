//! Label selector compilation and matching.
//!
//! Supported requirement forms (comma-separated, all must hold):
//! `key=value`, `key==value`, `key!=value`, `key in (a,b)`, `key notin (a,b)`,
//! `key` (exists) and `!key` (does not exist). The empty selector matches
//! everything.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{MetricsError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equals,
    NotEquals,
    In,
    NotIn,
    Exists,
    DoesNotExist,
}

/// One compiled requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub key: String,
    pub op: Operator,
    /// Sorted, deduplicated. Empty for `Exists`/`DoesNotExist`.
    pub values: Vec<String>,
}

impl Requirement {
    pub fn matches(&self, labels: &BTreeMap<String, String>) -> bool {
        let found = labels.get(&self.key);
        match self.op {
            Operator::Exists => found.is_some(),
            Operator::DoesNotExist => found.is_none(),
            Operator::Equals | Operator::In => found.is_some_and(|v| self.values.contains(v)),
            Operator::NotEquals | Operator::NotIn => !found.is_some_and(|v| self.values.contains(v)),
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let first = self.values.first().map(String::as_str).unwrap_or_default();
        match self.op {
            Operator::Exists => f.write_str(&self.key),
            Operator::DoesNotExist => write!(f, "!{}", self.key),
            Operator::Equals => write!(f, "{}={}", self.key, first),
            Operator::NotEquals => write!(f, "{}!={}", self.key, first),
            Operator::In => write!(f, "{} in ({})", self.key, self.values.join(",")),
            Operator::NotIn => write!(f, "{} notin ({})", self.key, self.values.join(",")),
        }
    }
}

/// Conjunction of label requirements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSelector {
    requirements: Vec<Requirement>,
}

impl LabelSelector {
    /// Selector matching every label set.
    pub fn everything() -> Self {
        Self::default()
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let mut requirements = Vec::new();
        for term in split_terms(raw)? {
            let term = term.trim();
            if term.is_empty() {
                if raw.trim().is_empty() {
                    continue;
                }
                return Err(bad(raw, "empty requirement"));
            }
            requirements.push(compile_requirement(term)?);
        }
        Ok(Self { requirements })
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    pub fn matches(&self, labels: &BTreeMap<String, String>) -> bool {
        self.requirements.iter().all(|r| r.matches(labels))
    }
}

impl FromStr for LabelSelector {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for LabelSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, r) in self.requirements.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{r}")?;
        }
        Ok(())
    }
}

fn bad(raw: &str, why: &str) -> MetricsError {
    MetricsError::BadRequest(format!("invalid label selector {raw:?}: {why}"))
}

/// Split on commas that are not inside a `( ... )` value set.
fn split_terms(raw: &str) -> Result<Vec<&str>> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in raw.char_indices() {
        match c {
            '(' => {
                if depth > 0 {
                    return Err(bad(raw, "nested parentheses"));
                }
                depth += 1;
            }
            ')' => {
                if depth == 0 {
                    return Err(bad(raw, "unbalanced parentheses"));
                }
                depth -= 1;
            }
            ',' if depth == 0 => {
                out.push(&raw[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(bad(raw, "unbalanced parentheses"));
    }
    out.push(&raw[start..]);
    Ok(out)
}

fn compile_requirement(term: &str) -> Result<Requirement> {
    if let Some(key) = term.strip_prefix('!') {
        let key = valid_key(term, key.trim())?;
        return Ok(Requirement { key, op: Operator::DoesNotExist, values: Vec::new() });
    }

    if let Some(open) = term.find('(') {
        // format: "key in (a,b)" or "key notin (a,b)"
        let inner = term[open + 1..]
            .strip_suffix(')')
            .ok_or_else(|| bad(term, "trailing characters after value set"))?;
        let mut head = term[..open].split_whitespace();
        let (key, op) = match (head.next(), head.next(), head.next()) {
            (Some(k), Some("in"), None) => (k, Operator::In),
            (Some(k), Some("notin"), None) => (k, Operator::NotIn),
            _ => return Err(bad(term, "expected `key in (...)` or `key notin (...)`")),
        };
        let mut values = inner
            .split(',')
            .map(|v| valid_value(term, v.trim()))
            .collect::<Result<Vec<_>>>()?;
        if values.iter().all(String::is_empty) {
            return Err(bad(term, "empty value set"));
        }
        if values.iter().any(String::is_empty) {
            return Err(bad(term, "empty member in value set"));
        }
        values.sort();
        values.dedup();
        return Ok(Requirement { key: valid_key(term, key)?, op, values });
    }

    let split = [("!=", Operator::NotEquals), ("==", Operator::Equals), ("=", Operator::Equals)]
        .into_iter()
        .find_map(|(tok, op)| term.split_once(tok).map(|(k, v)| (k, v, op)));

    match split {
        Some((key, value, op)) => Ok(Requirement {
            key: valid_key(term, key.trim())?,
            op,
            values: vec![valid_value(term, value.trim())?],
        }),
        None => Ok(Requirement {
            key: valid_key(term, term)?,
            op: Operator::Exists,
            values: Vec::new(),
        }),
    }
}

fn valid_key(term: &str, key: &str) -> Result<String> {
    let ok = !key.is_empty()
        && key.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/'));
    if !ok {
        return Err(bad(term, "invalid label key"));
    }
    Ok(key.to_string())
}

fn valid_value(term: &str, value: &str) -> Result<String> {
    let ok = value.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if !ok {
        return Err(bad(term, "invalid label value"));
    }
    Ok(value.to_string())
}
