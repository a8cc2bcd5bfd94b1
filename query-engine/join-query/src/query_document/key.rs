use serde_json::Value;
use std::fmt;

const OR: &str = "$or";
const AND: &str = "$and";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    Or,
    And,
}

impl Combinator {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            OR => Some(Self::Or),
            AND => Some(Self::And),
            _ => None,
        }
    }

    pub fn as_key(self) -> &'static str {
        match self {
            Self::Or => OR,
            Self::And => AND,
        }
    }
}

/// A dot separated path such as `team.name` or `$user.team.name$`. Whether its leading
/// segments actually are associations is only known once resolved against the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<String>,
    dollar_wrapped: bool,
}

impl FieldPath {
    pub fn new(segments: Vec<String>, dollar_wrapped: bool) -> Self {
        Self {
            segments,
            dollar_wrapped,
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_dollar_wrapped(&self) -> bool {
        self.dollar_wrapped
    }

    /// The canonical `$a.b.c$` form of the path.
    pub fn to_dollar_key(&self) -> String {
        format!("${}$", self.segments.join("."))
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dollar_wrapped {
            f.write_str(&self.to_dollar_key())
        } else {
            f.write_str(&self.segments.join("."))
        }
    }
}

/// Classification of a single query key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryKey {
    /// A plain field filter, or any key with special meaning to the query layer.
    Field,
    /// A dotted or dollar-wrapped path that may traverse associations.
    Path(FieldPath),
    /// `$or` / `$and` over a list of nested query objects.
    Combinator(Combinator),
}

impl QueryKey {
    /// Classifies `key`. Combinator keys only count as such when their value is a list.
    pub fn parse(key: &str, value: &Value) -> Self {
        if let Some(combinator) = Combinator::from_key(key) {
            return match value {
                Value::Array(_) => Self::Combinator(combinator),
                _ => Self::Field,
            };
        }

        if let Some(inner) = strip_dollars(key) {
            return Self::Path(FieldPath::new(split_segments(inner), true));
        }

        // `$team.name` names the same path as `team.name`.
        let path = key.strip_prefix('$').unwrap_or(key);

        if path.contains('.') {
            return Self::Path(FieldPath::new(split_segments(path), false));
        }

        Self::Field
    }
}

fn strip_dollars(key: &str) -> Option<&str> {
    key.strip_prefix('$')
        .and_then(|rest| rest.strip_suffix('$'))
        .filter(|inner| !inner.is_empty())
}

fn split_segments(path: &str) -> Vec<String> {
    path.split('.').map(ToOwned::to_owned).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(segments: &[&str], dollar_wrapped: bool) -> QueryKey {
        QueryKey::Path(FieldPath::new(
            segments.iter().map(|s| s.to_string()).collect(),
            dollar_wrapped,
        ))
    }

    #[test]
    fn plain_keys_are_fields() {
        assert_eq!(QueryKey::parse("name", &json!("x")), QueryKey::Field);
        assert_eq!(QueryKey::parse("$limit", &json!(10)), QueryKey::Field);
        assert_eq!(QueryKey::parse("$", &json!(1)), QueryKey::Field);
        assert_eq!(QueryKey::parse("$$", &json!(1)), QueryKey::Field);
    }

    #[test]
    fn dotted_and_dollar_keys_are_paths() {
        assert_eq!(QueryKey::parse("team.name", &json!("x")), path(&["team", "name"], false));
        assert_eq!(
            QueryKey::parse("$user.team.name$", &json!({ "$in": ["a"] })),
            path(&["user", "team", "name"], true)
        );
        assert_eq!(QueryKey::parse("$name$", &json!("x")), path(&["name"], true));
    }

    #[test]
    fn a_leading_dollar_alone_does_not_wrap_a_path() {
        let key = QueryKey::parse("$team.name", &json!("x"));

        assert_eq!(key, path(&["team", "name"], false));

        let QueryKey::Path(field_path) = key else {
            unreachable!()
        };
        assert!(!field_path.is_dollar_wrapped());
        assert_eq!(field_path.to_dollar_key(), "$team.name$");
    }

    #[test]
    fn combinators_require_a_list() {
        assert_eq!(
            QueryKey::parse("$or", &json!([{ "a": 1 }])),
            QueryKey::Combinator(Combinator::Or)
        );
        assert_eq!(QueryKey::parse("$and", &json!([])), QueryKey::Combinator(Combinator::And));
        assert_eq!(QueryKey::parse("$or", &json!({ "a": 1 })), QueryKey::Field);
    }

    #[test]
    fn paths_render_in_canonical_form() {
        let path = FieldPath::new(vec!["user".into(), "team".into(), "name".into()], false);

        assert_eq!(path.to_dollar_key(), "$user.team.name$");
        assert_eq!(path.to_string(), "user.team.name");
        assert_eq!(Combinator::And.as_key(), "$and");
    }
}
