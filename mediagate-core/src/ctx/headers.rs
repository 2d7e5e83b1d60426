use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// A single header value as the CDN records it: original-case name plus value.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct HeaderEntry {
    /// Optional on the wire; absent keys read as empty.
    #[serde(default)]
    pub key: String,
    pub value: String,
}

impl HeaderEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Header multimap keyed by lowercase name.
///
/// A `null` map or `null` lists in the wire format deserialize to absent names.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct Headers(BTreeMap<String, Vec<HeaderEntry>>);

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value, keeping any earlier values for the same name.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        self.0
            .entry(key.to_ascii_lowercase())
            .or_default()
            .push(HeaderEntry::new(key, value));
    }

    /// Builder form of [`Headers::append`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.append(key, value);
        self
    }

    pub fn get_all(&self, name: &str) -> &[HeaderEntry] {
        self.0
            .get(&name.to_ascii_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// First value recorded for `name`, if any.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.get_all(name).first().map(|e| e.value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &HeaderEntry> {
        self.0.values().flatten()
    }
}

impl<'de> Deserialize<'de> for Headers {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<BTreeMap<String, Option<Vec<HeaderEntry>>>> =
            Option::deserialize(deserializer)?;

        Ok(Headers(
            raw.unwrap_or_default()
                .into_iter()
                .filter_map(|(name, entries)| {
                    entries
                        .filter(|e| !e.is_empty())
                        .map(|e| (name.to_ascii_lowercase(), e))
                })
                .collect(),
        ))
    }
}
