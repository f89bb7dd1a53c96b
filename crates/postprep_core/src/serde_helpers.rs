//! Lenient readers for fields that older project files wrote loosely.

use serde::{Deserialize, Deserializer};

/// Treat an explicit `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum KeywordsRepr {
    Joined(String),
    List(Vec<String>),
}

/// Keywords arrive either as `"a, b"` or `["a", "b"]`.
pub(crate) fn keywords<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let keywords = match Option::<KeywordsRepr>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(KeywordsRepr::Joined(joined)) => split_keywords(&joined),
        Some(KeywordsRepr::List(list)) => normalize_keywords(list),
    };
    Ok(keywords)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Text(String),
    Number(serde_json::Number),
}

impl From<IdRepr> for String {
    fn from(value: IdRepr) -> Self {
        match value {
            IdRepr::Text(text) => text,
            IdRepr::Number(number) => number.to_string(),
        }
    }
}

/// Platform ids arrive as strings or bare numbers; both load as a string.
pub(crate) fn optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<IdRepr>::deserialize(deserializer)?.map(String::from))
}

/// Split a comma-joined keyword string, trimming and dropping blanks.
pub fn split_keywords(joined: &str) -> Vec<String> {
    normalize_keywords(joined.split(',').map(str::to_string))
}

/// Trim, drop blanks and drop duplicates while keeping first-seen order.
pub(crate) fn normalize_keywords(keywords: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for keyword in keywords {
        let keyword = keyword.trim();
        if !keyword.is_empty() && !out.iter().any(|k| k == keyword) {
            out.push(keyword.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_trims_and_dedups() {
        assert_eq!(
            split_keywords(" sunset, beach ,, sunset ,"),
            vec!["sunset".to_string(), "beach".to_string()]
        );
    }

    #[test]
    fn split_empty_string() {
        assert!(split_keywords("").is_empty());
    }

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "optional_id")]
        id: Option<String>,
    }

    #[test]
    fn ids_accept_numbers_and_strings() {
        let number: Holder = serde_json::from_str(r#"{"id": 110843418940484}"#).unwrap();
        assert_eq!(number.id.as_deref(), Some("110843418940484"));
        let text: Holder = serde_json::from_str(r#"{"id": "abc"}"#).unwrap();
        assert_eq!(text.id.as_deref(), Some("abc"));
        let missing: Holder = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.id, None);
        let null: Holder = serde_json::from_str(r#"{"id": null}"#).unwrap();
        assert_eq!(null.id, None);
    }
}
