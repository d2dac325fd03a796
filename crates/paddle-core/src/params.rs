//! Query parameter normalization.
//!
//! Converts a parameter bag into the query string shape the API expects:
//!
//! - scalars stringify directly
//! - lists join with a literal `,` (`status=active,archived`)
//! - maps expand to bracketed keys (`custom_data[plan]=pro`)
//! - `null` entries are dropped, as are maps with no entries

use serde_json::Value;

/// A single parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Dropped from the output.
    Null,
    /// `true` / `false`.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Float, always printed with a fractional part.
    Float(f64),
    /// String or enumerant name.
    Str(String),
    /// Comma-joined on output.
    List(Vec<ParamValue>),
    /// Expanded into `parent[child]` keys.
    Map(Vec<(String, ParamValue)>),
}

impl ParamValue {
    fn scalar_text(&self) -> Option<String> {
        match self {
            Self::Bool(b) => Some(b.to_string()),
            Self::Int(i) => Some(i.to_string()),
            Self::Float(f) => Some(format_float(*f)),
            Self::Str(s) => Some(s.clone()),
            Self::Null | Self::List(_) | Self::Map(_) => None,
        }
    }
}

fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Int(value.into())
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ParamValue> + Clone> From<&[T]> for ParamValue {
    fn from(values: &[T]) -> Self {
        Self::List(values.iter().cloned().map(Into::into).collect())
    }
}

impl From<QueryParams> for ParamValue {
    fn from(params: QueryParams) -> Self {
        Self::Map(params.entries)
    }
}

impl From<Value> for ParamValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_f64().map(Self::Float))
                .unwrap_or_else(|| Self::Str(n.to_string())),
            Value::String(s) => Self::Str(s),
            Value::Array(items) => Self::List(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => {
                Self::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

/// An ordered parameter bag.
///
/// ```
/// use paddle_core::QueryParams;
///
/// let params = QueryParams::new()
///     .insert("status", vec!["active", "archived"])
///     .insert("per_page", 50);
/// assert_eq!(params.to_query_string(), "status=active,archived&per_page=50");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    entries: Vec<(String, ParamValue)>,
}

impl QueryParams {
    /// Create an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter.
    #[must_use]
    pub fn insert(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.entries.push((key.into(), value.into()));
        self
    }

    /// Whether no parameters were added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the query string (without a leading `?`).
    #[must_use]
    pub fn to_query_string(&self) -> String {
        normalize(&self.entries)
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<Value> for QueryParams {
    /// Objects become parameter bags; any other value yields an empty bag.
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => map.into_iter().collect(),
            _ => Self::new(),
        }
    }
}

/// Normalize ordered key/value pairs into a query string.
#[must_use]
pub fn normalize(entries: &[(String, ParamValue)]) -> String {
    let mut pairs = Vec::new();
    for (key, value) in entries {
        push_pairs(&mut pairs, &urlencoding::encode(key), value);
    }
    pairs.join("&")
}

/// `key` is already percent-encoded; brackets added here stay literal.
fn push_pairs(pairs: &mut Vec<String>, key: &str, value: &ParamValue) {
    match value {
        ParamValue::Null => {}
        ParamValue::List(items) => {
            let joined = items
                .iter()
                .filter_map(list_item_text)
                .map(|text| urlencoding::encode(&text).into_owned())
                .collect::<Vec<_>>()
                .join(",");
            pairs.push(format!("{key}={joined}"));
        }
        ParamValue::Map(children) => {
            for (child, child_value) in children {
                let nested = format!("{key}[{}]", urlencoding::encode(child));
                push_pairs(pairs, &nested, child_value);
            }
        }
        scalar => {
            if let Some(text) = scalar.scalar_text() {
                pairs.push(format!("{key}={}", urlencoding::encode(&text)));
            }
        }
    }
}

/// Nested lists flatten into the same comma-joined list; maps inside a list
/// have no query representation and are skipped.
fn list_item_text(item: &ParamValue) -> Option<String> {
    match item {
        ParamValue::List(inner) => {
            let parts: Vec<String> = inner.iter().filter_map(list_item_text).collect();
            (!parts.is_empty()).then(|| parts.join(","))
        }
        other => other.scalar_text(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_params() {
        assert_eq!(QueryParams::new().to_query_string(), "");
        assert_eq!(QueryParams::from(json!({})).to_query_string(), "");
    }

    #[test]
    fn scalars() {
        let params = QueryParams::new()
            .insert("active", true)
            .insert("count", 3)
            .insert("ratio", 1.5)
            .insert("whole", 2.0)
            .insert("name", "hello world");
        assert_eq!(
            params.to_query_string(),
            "active=true&count=3&ratio=1.5&whole=2.0&name=hello%20world"
        );
    }

    #[test]
    fn lists_keep_literal_commas() {
        let params = QueryParams::new().insert("status", vec!["active", "archived"]);
        assert_eq!(params.to_query_string(), "status=active,archived");

        let params = QueryParams::new().insert("q", vec!["a,b", "c&d"]);
        assert_eq!(params.to_query_string(), "q=a%2Cb,c%26d");
    }

    #[test]
    fn nested_maps_expand_to_brackets() {
        let filter = QueryParams::new()
            .insert("x", "y")
            .insert("ids", vec!["pro_1", "pro_2"]);
        let params = QueryParams::new().insert("filter", filter);
        assert_eq!(
            params.to_query_string(),
            "filter[x]=y&filter[ids]=pro_1,pro_2"
        );
    }

    #[test]
    fn deeper_maps_recurse() {
        let params = QueryParams::from(json!({ "a": { "b": { "c": 1 } } }));
        assert_eq!(params.to_query_string(), "a[b][c]=1");
    }

    #[test]
    fn empty_nested_map_is_dropped() {
        let params = QueryParams::new()
            .insert("filter", QueryParams::new())
            .insert("status", "active");
        assert_eq!(params.to_query_string(), "status=active");
    }

    #[test]
    fn nulls_are_dropped() {
        let params = QueryParams::new()
            .insert("after", Option::<String>::None)
            .insert("status", Some("active"));
        assert_eq!(params.to_query_string(), "status=active");
    }

    #[test]
    fn empty_list_keeps_key() {
        let params = QueryParams::new().insert("ids", Vec::<String>::new());
        assert_eq!(params.to_query_string(), "ids=");
    }

    #[test]
    fn json_object_matches_pairs() {
        let from_json = QueryParams::from(json!({
            "status": ["active", "archived"],
            "filter": { "x": "y" }
        }));
        let query = from_json.to_query_string();
        assert!(query.contains("status=active,archived"));
        assert!(query.contains("filter[x]=y"));
    }

    #[test]
    fn pair_iterator_matches_builder() {
        let pairs: QueryParams = vec![("a", "1"), ("b", "2")].into_iter().collect();
        let built = QueryParams::new().insert("a", "1").insert("b", "2");
        assert_eq!(pairs.to_query_string(), built.to_query_string());
    }

    #[test]
    fn keys_and_values_are_encoded() {
        let params = QueryParams::new().insert("na me", "ä/b?c=d");
        assert_eq!(params.to_query_string(), "na%20me=%C3%A4%2Fb%3Fc%3Dd");
    }

    #[test]
    fn unreserved_characters_pass_through() {
        let params = QueryParams::new().insert("id", "pro_01H-x.y~z");
        assert_eq!(params.to_query_string(), "id=pro_01H-x.y~z");
    }
}
