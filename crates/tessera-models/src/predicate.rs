use serde_json::Value;
use std::sync::Arc;

use crate::error::{ModelError, Result};

/// Multipart `when` clause.
#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    Always,
    /// Property equals one of the `|`-separated alternatives.
    Prop { key: String, values: Vec<String> },
    All(Vec<Predicate>),
    Any(Vec<Predicate>),
}

impl Predicate {
    pub fn parse(block: &str, when: Option<&Value>) -> Result<Predicate> {
        match when {
            None | Some(Value::Null) => Ok(Predicate::Always),
            Some(v) => parse_object(block, v),
        }
    }

    pub fn matches(&self, props: &[(Arc<str>, Arc<str>)]) -> bool {
        match self {
            Predicate::Always => true,
            Predicate::Prop { key, values } => props
                .iter()
                .find(|(k, _)| **k == **key)
                .is_some_and(|(_, v)| values.iter().any(|x| **x == **v)),
            Predicate::All(ps) => ps.iter().all(|p| p.matches(props)),
            Predicate::Any(ps) => ps.iter().any(|p| p.matches(props)),
        }
    }
}

fn parse_object(block: &str, v: &Value) -> Result<Predicate> {
    let obj = v.as_object().ok_or_else(|| bad(block, format!("expected object, got {}", v)))?;
    let mut parts = Vec::with_capacity(obj.len());
    for (k, val) in obj {
        let p = match k.as_str() {
            "OR" => Predicate::Any(parse_list(block, val)?),
            "AND" => Predicate::All(parse_list(block, val)?),
            _ => Predicate::Prop {
                key: k.clone(),
                values: scalar(block, k, val)?
                    .split('|')
                    .map(str::to_string)
                    .collect(),
            },
        };
        parts.push(p);
    }
    Ok(if parts.len() == 1 {
        parts.remove(0)
    } else {
        Predicate::All(parts)
    })
}

fn parse_list(block: &str, v: &Value) -> Result<Vec<Predicate>> {
    v.as_array()
        .ok_or_else(|| bad(block, "OR/AND expects a list".to_string()))?
        .iter()
        .map(|p| parse_object(block, p))
        .collect()
}

fn scalar(block: &str, key: &str, v: &Value) -> Result<String> {
    match v {
        Value::String(s) => Ok(s.clone()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(bad(block, format!("`{}` has non-scalar value {}", key, other))),
    }
}

fn bad(block: &str, detail: String) -> ModelError {
    ModelError::Predicate {
        block: block.to_string(),
        detail,
    }
}

/// Parses a variant key such as `facing=north,half=top`. Empty and `normal` match everything.
pub fn parse_variant_key(key: &str) -> Vec<(String, String)> {
    if key.is_empty() || key == "normal" {
        return Vec::new();
    }
    key.split(',')
        .filter_map(|kv| kv.split_once('='))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect()
}

pub fn variant_matches(conds: &[(String, String)], props: &[(Arc<str>, Arc<str>)]) -> bool {
    conds.iter().all(|(k, v)| {
        props
            .iter()
            .any(|(pk, pv)| **pk == **k && **pv == **v)
    })
}
