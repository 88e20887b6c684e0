//! Font request configuration and synonym lookup (made by FontLab https://www.fontlab.com/)
//!
//! A [`FontRequest`] is an open bag of JSON fields. Providers never read keys
//! directly; they ask for a semantic [`Field`], and the field knows which keys
//! may carry it and in which order. The first key holding a present value wins.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Semantic configuration fields and the keys that may spell them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Google family name.
    GoogleName,
    /// Bunny family name.
    BunnyFamily,
    Weight,
    Style,
    Subset,
    /// Bunny variant list; falls back to the plural weight key.
    Variant,
    Display,
    /// `font-display` mirrored onto a bound selector.
    BindingDisplay,
    Url,
    Css,
    /// Source URL for a self-hosted face.
    Source,
    /// Source URL for a local face.
    LocalSource,
    LocalName,
    /// Family name for a self-hosted face.
    FaceName,
    KitId,
    FontshareId,
    Version,
    Format,
    /// Selector or class token to bind once the font is in place.
    Use,
}

impl Field {
    pub const ALL: [Field; 19] = [
        Field::GoogleName,
        Field::BunnyFamily,
        Field::Weight,
        Field::Style,
        Field::Subset,
        Field::Variant,
        Field::Display,
        Field::BindingDisplay,
        Field::Url,
        Field::Css,
        Field::Source,
        Field::LocalSource,
        Field::LocalName,
        Field::FaceName,
        Field::KitId,
        Field::FontshareId,
        Field::Version,
        Field::Format,
        Field::Use,
    ];

    /// Accepted keys, highest priority first.
    pub const fn keys(self) -> &'static [&'static str] {
        match self {
            Field::GoogleName => &["name", "family"],
            Field::BunnyFamily => &["family", "bunnyFontFamily"],
            Field::Weight => &["weight", "weights", "fontWeight"],
            Field::Style => &["style", "styles", "fontStyle"],
            Field::Subset => &["subset", "subsets"],
            Field::Variant => &["variants", "variant", "weights"],
            Field::Display => &["display", "fontDisplay"],
            Field::BindingDisplay => &["fontDisplay"],
            Field::Url => &["url"],
            Field::Css => &["css"],
            Field::Source => &["src", "localSrc"],
            Field::LocalSource => &["localSrc", "src"],
            Field::LocalName => &["localFontName", "name"],
            Field::FaceName => &["name"],
            Field::KitId => &["projectId", "kitId"],
            Field::FontshareId => &["id", "fontshareId"],
            Field::Version => &["version"],
            Field::Format => &["format"],
            Field::Use => &["use"],
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.keys().join(" or "))
    }
}

/// Configuration for a single font load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontRequest {
    fields: Map<String, Value>,
}

impl FontRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object into a request.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Value under `key`, if present.
    ///
    /// `null`, `false` and the empty string count as absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|value| is_present(value))
    }

    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// True when `key` holds exactly the string `expected`.
    pub fn key_equals(&self, key: &str, expected: &str) -> bool {
        matches!(self.get(key), Some(Value::String(s)) if s == expected)
    }

    /// First present value among the field's keys.
    pub fn field(&self, field: Field) -> Option<&Value> {
        field.keys().iter().find_map(|key| self.get(key))
    }

    pub fn has_field(&self, field: Field) -> bool {
        self.field(field).is_some()
    }

    /// The field as a single value (string or number, or a one-item list).
    ///
    /// Keys whose value cannot be read as one value are skipped, so a later
    /// synonym still gets its turn.
    pub fn text(&self, field: Field) -> Option<String> {
        field
            .keys()
            .iter()
            .find_map(|key| self.get(key).and_then(single_text))
    }

    /// The field as a list; a scalar becomes a one-item list.
    pub fn list(&self, field: Field) -> Option<Vec<String>> {
        match self.field(field)? {
            Value::Array(items) => Some(items.iter().filter_map(scalar_text).collect()),
            other => scalar_text(other).map(|item| vec![item]),
        }
    }
}

impl From<Map<String, Value>> for FontRequest {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl TryFrom<Value> for FontRequest {
    type Error = serde_json::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        serde_json::from_value(value)
    }
}

impl<K, V> FromIterator<(K, V)> for FontRequest
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let fields = iter
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self { fields }
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

fn single_text(value: &Value) -> Option<String> {
    match value {
        Value::Array(items) if items.len() == 1 => scalar_text(&items[0]),
        other => scalar_text(other),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn every_field_prefers_its_first_present_key() {
        for field in Field::ALL {
            let keys = field.keys();
            for (winner, key) in keys.iter().enumerate() {
                let mut request = FontRequest::new();
                for (idx, later) in keys.iter().enumerate().skip(winner) {
                    request.insert(*later, format!("value-{idx}"));
                }
                assert_eq!(
                    request.text(field),
                    Some(format!("value-{winner}")),
                    "{field:?} should read `{key}` first"
                );
            }
        }
    }

    #[test]
    fn falsy_values_fall_through_to_later_keys() {
        let request = FontRequest::new()
            .with("name", "")
            .with("family", "Inter");
        assert_eq!(request.text(Field::GoogleName).as_deref(), Some("Inter"));

        let request = FontRequest::new()
            .with("weight", Value::Null)
            .with("weights", false)
            .with("fontWeight", 600);
        assert_eq!(request.text(Field::Weight).as_deref(), Some("600"));
    }

    #[test]
    fn multi_item_lists_do_not_block_later_keys() {
        let request = FontRequest::new()
            .with("name", json!(["A", "B"]))
            .with("family", "Roboto");
        assert_eq!(request.text(Field::GoogleName).as_deref(), Some("Roboto"));
        assert_eq!(request.list(Field::GoogleName), Some(vec!["A".into(), "B".into()]));

        let request = FontRequest::new().with("name", json!(["Solo"]));
        assert_eq!(request.text(Field::GoogleName).as_deref(), Some("Solo"));
    }

    #[test]
    fn list_accepts_scalars_and_arrays() {
        let request = FontRequest::new().with("weights", json!([400, "700"]));
        assert_eq!(
            request.list(Field::Weight),
            Some(vec!["400".to_string(), "700".to_string()])
        );

        let request = FontRequest::new().with("subset", "latin");
        assert_eq!(request.list(Field::Subset), Some(vec!["latin".to_string()]));
    }

    #[test]
    fn text_rejects_multi_item_lists() {
        let request = FontRequest::new().with("weight", json!(["400", "700"]));
        assert_eq!(request.text(Field::Weight), None);

        let request = FontRequest::new().with("weight", json!(["700"]));
        assert_eq!(request.text(Field::Weight).as_deref(), Some("700"));
    }

    #[test]
    fn parses_json_objects_only() {
        let request = FontRequest::from_json(r#"{"family": "Roboto", "use": ".x"}"#).expect("parse");
        assert!(request.has("family"));
        assert!(request.key_equals("use", ".x"));

        assert!(FontRequest::from_json("[1, 2]").is_err());
    }

    #[test]
    fn field_display_lists_keys() {
        assert_eq!(Field::KitId.to_string(), "projectId or kitId");
    }
}
