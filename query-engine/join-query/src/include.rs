//! Eager-load include trees handed to the relational query layer.

use crate::schema::EntityId;
use serde::{Deserialize, Serialize};

/// One association to join. Serialized the way the query layer expects it:
/// `{ "model": "teams", "as": "team", "attributes": [], "include": [...] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncludeNode {
    #[serde(rename = "model")]
    pub target: EntityId,

    #[serde(rename = "as")]
    pub alias: String,

    /// Columns to select from the joined entity. Generated nodes select none.
    #[serde(default)]
    pub attributes: Vec<String>,

    #[serde(rename = "include", default, skip_serializing_if = "IncludeTree::is_empty")]
    pub children: IncludeTree,

    /// Options set by application code on includes it supplied itself, e.g. `required`.
    #[serde(flatten)]
    pub options: serde_json::Map<String, serde_json::Value>,
}

impl IncludeNode {
    pub fn new(target: EntityId, alias: impl Into<String>) -> Self {
        Self {
            target,
            alias: alias.into(),
            attributes: Vec::new(),
            children: IncludeTree::default(),
            options: serde_json::Map::new(),
        }
    }

    pub fn with_children(mut self, children: impl Into<IncludeTree>) -> Self {
        self.children = children.into();
        self
    }

    fn is(&self, target: &EntityId, alias: &str) -> bool {
        &self.target == target && self.alias == alias
    }
}

/// Ordered include nodes, at most one per `(target, alias)` pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct IncludeTree(Vec<IncludeNode>);

impl IncludeTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IncludeNode> {
        self.0.iter()
    }

    pub fn find(&self, target: &EntityId, alias: &str) -> Option<&IncludeNode> {
        self.0.iter().find(|node| node.is(target, alias))
    }

    /// The node for `(target, alias)`, appended first if it does not exist yet.
    pub fn find_or_insert(&mut self, target: &EntityId, alias: &str) -> &mut IncludeNode {
        let idx = match self.0.iter().position(|node| node.is(target, alias)) {
            Some(idx) => idx,
            None => {
                self.0.push(IncludeNode::new(target.clone(), alias));
                self.0.len() - 1
            }
        };

        &mut self.0[idx]
    }
}

impl From<Vec<IncludeNode>> for IncludeTree {
    fn from(nodes: Vec<IncludeNode>) -> Self {
        Self(nodes)
    }
}

impl IntoIterator for IncludeTree {
    type Item = IncludeNode;
    type IntoIter = std::vec::IntoIter<IncludeNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Callers may supply a single include or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum ProvidedInclude {
    Many(Vec<IncludeNode>),
    One(Box<IncludeNode>),
}

impl<'de> Deserialize<'de> for IncludeTree {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let nodes = match ProvidedInclude::deserialize(deserializer)? {
            ProvidedInclude::Many(nodes) => nodes,
            ProvidedInclude::One(node) => vec![*node],
        };

        Ok(Self(nodes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn teams() -> EntityId {
        EntityId::from("teams")
    }

    #[test]
    fn find_or_insert_reuses_matching_nodes() {
        let mut tree = IncludeTree::new();

        tree.find_or_insert(&teams(), "team");
        tree.find_or_insert(&teams(), "team").attributes.push("name".into());

        assert_eq!(tree.len(), 1);
        assert_eq!(tree.find(&teams(), "team").unwrap().attributes, ["name"]);
    }

    #[test]
    fn same_target_under_another_alias_is_a_separate_node() {
        let mut tree = IncludeTree::new();

        tree.find_or_insert(&teams(), "team");
        tree.find_or_insert(&teams(), "formerTeam");

        let aliases: Vec<_> = tree.iter().map(|node| node.alias.as_str()).collect();
        assert_eq!(aliases, ["team", "formerTeam"]);
    }

    #[test]
    fn serializes_in_query_layer_shape() {
        let tree = IncludeTree::from(vec![
            IncludeNode::new(EntityId::from("users"), "user")
                .with_children(vec![IncludeNode::new(teams(), "team")]),
        ]);

        assert_eq!(
            serde_json::to_value(&tree).unwrap(),
            json!([{
                "model": "users",
                "as": "user",
                "attributes": [],
                "include": [{ "model": "teams", "as": "team", "attributes": [] }]
            }])
        );
    }

    #[test]
    fn accepts_a_single_provided_include() {
        let tree: IncludeTree =
            serde_json::from_value(json!({ "model": "teams", "as": "team", "required": true })).unwrap();

        let node = tree.find(&teams(), "team").unwrap();
        assert_eq!(tree.len(), 1);
        assert!(node.attributes.is_empty());
        assert_eq!(node.options.get("required"), Some(&json!(true)));
    }

    #[test]
    fn provided_options_survive_a_round_trip() {
        let provided = json!([{ "model": "teams", "as": "team", "attributes": ["name"], "required": false }]);
        let tree: IncludeTree = serde_json::from_value(provided.clone()).unwrap();

        assert_eq!(serde_json::to_value(&tree).unwrap(), provided);
    }
}
