//! Object notation (`{ team: { name: "x" } }`) to dollar notation (`{ "$team.name$": "x" }`).

use crate::{
    query_document::{Combinator, QueryObject},
    schema::{EntityId, SchemaGraph},
};
use serde_json::Value;
use tracing::trace;

/// Flattens every association given as a nested object into dollar-wrapped leaf keys.
/// The leaves take the position of the association key they came from. Combinator
/// branches are flattened independently against `entity`.
pub fn flatten_object_notation<S: SchemaGraph>(schema: &S, entity: &EntityId, query: QueryObject) -> QueryObject {
    let mut flattened = QueryObject::new();

    for (key, value) in query {
        match value {
            Value::Array(branches) if Combinator::from_key(&key).is_some() => {
                let branches = branches
                    .into_iter()
                    .map(|branch| match branch {
                        Value::Object(branch) => Value::Object(flatten_object_notation(schema, entity, branch)),
                        other => other,
                    })
                    .collect();

                flattened.insert(key, Value::Array(branches));
            }
            Value::Object(nested) => match schema.association(entity, &key) {
                Some(association) => {
                    let mut leaves = Vec::new();
                    collect_leaves(schema, &association.target, &mut vec![key.as_str()], &nested, &mut leaves);

                    if leaves.is_empty() {
                        flattened.insert(key, Value::Object(nested));
                    } else {
                        trace!(association = key.as_str(), leaves = leaves.len(), "flattened object notation");
                        flattened.extend(leaves);
                    }
                }
                None => {
                    flattened.insert(key, Value::Object(nested));
                }
            },
            other => {
                flattened.insert(key, other);
            }
        }
    }

    flattened
}

/// Walks `nested` below the association path `prefix`, emitting one `$prefix.key$` entry
/// per leaf. Nested objects under further associations extend the prefix.
fn collect_leaves<'a, S: SchemaGraph>(
    schema: &S,
    entity: &EntityId,
    prefix: &mut Vec<&'a str>,
    nested: &'a QueryObject,
    leaves: &mut Vec<(String, Value)>,
) {
    for (key, value) in nested {
        match (schema.association(entity, key), value) {
            (Some(association), Value::Object(deeper)) => {
                prefix.push(key);
                collect_leaves(schema, &association.target, prefix, deeper, leaves);
                prefix.pop();
            }
            _ => {
                let path = format!("${}.{}$", prefix.join("."), key);
                leaves.push((path, value.clone()));
            }
        }
    }
}
