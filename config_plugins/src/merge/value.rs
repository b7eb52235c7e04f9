//! Merge mechanics for `serde_json::Value` trees.

use serde_json::{Map, Value};

use super::{MergePolicy, MergeRules};
use crate::{ComposeError, ComposeResult, Shape};
use std::sync::Arc;

/// Merge `sources` into a copy of `target`, left to right.
pub(crate) fn merge_values<'a, I>(target: &Value, sources: I, rules: &MergeRules) -> ComposeResult<Value>
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut acc = target.clone();
    for source in sources {
        let Value::Object(incoming) = source else {
            if source.is_null() {
                continue;
            }
            return Err(root_mismatch(&acc, source));
        };
        match &mut acc {
            Value::Object(existing) => {
                merge_object(existing, incoming, Some(rules), &mut Vec::new())?;
            }
            Value::Null => {
                let mut existing = Map::new();
                merge_object(&mut existing, incoming, Some(rules), &mut Vec::new())?;
                acc = Value::Object(existing);
            }
            other => return Err(root_mismatch(other, source)),
        }
    }
    Ok(acc)
}

fn root_mismatch(existing: &Value, incoming: &Value) -> Arc<ComposeError> {
    Arc::new(ComposeError::mismatch(
        String::new(),
        Shape::of(existing),
        Shape::of(incoming),
    ))
}

fn merge_object<'k>(
    target: &mut Map<String, Value>,
    source: &'k Map<String, Value>,
    rules: Option<&MergeRules>,
    path: &mut Vec<&'k str>,
) -> ComposeResult<()> {
    for (key, incoming) in source {
        match MergeRules::policy_of(rules, key) {
            MergePolicy::PreferIncoming => {
                target.insert(key.clone(), incoming.clone());
            }
            MergePolicy::PreferExisting => {
                let keep = target.get(key).is_some_and(|existing| !existing.is_null());
                if !keep {
                    target.insert(key.clone(), incoming.clone());
                }
            }
            MergePolicy::Recurse => {
                let Value::Object(nested) = incoming else {
                    target.insert(key.clone(), incoming.clone());
                    continue;
                };
                let slot = target
                    .entry(key.clone())
                    .or_insert_with(|| Value::Object(Map::new()));
                if slot.is_null() {
                    *slot = Value::Object(Map::new());
                }
                path.push(key);
                match slot {
                    Value::Object(existing) => {
                        let child = rules.and_then(|node| node.child(key));
                        merge_object(existing, nested, child, path)?;
                    }
                    other => {
                        return Err(Arc::new(ComposeError::mismatch(
                            path.join("."),
                            Shape::of(other),
                            Shape::Mapping,
                        )));
                    }
                }
                path.pop();
            }
        }
    }
    Ok(())
}
