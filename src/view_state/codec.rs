//! Query-string codec for view state.
//!
//! The query string is the only store of view state. [`decode`] derives a
//! [`ViewState`] from it and never fails; [`encode`] and [`remove_keys`]
//! produce the next query string for a navigation.
//!
//! Keys and values use `application/x-www-form-urlencoded` encoding.

use super::types::{
    DataState, ItemsPerPage, PageNumber, ParamKey, SortSpec, ViewDefaults, ViewState,
};
use std::fmt;
use tracing::{debug, warn};
use url::form_urlencoded;

// ===== QueryString =====

/// Ordered list of query-string pairs.
///
/// Preserves the order and any keys it does not understand, so a
/// navigation only ever touches the keys it names.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryString {
    pairs: Vec<(String, String)>,
}

impl QueryString {
    /// Parse a raw query string. A leading `?` is ignored.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let pairs = form_urlencoded::parse(raw.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self { pairs }
    }

    /// Value of the first occurrence of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether `key` is present at all.
    pub fn contains(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Set `key` to `value`, keeping every other pair.
    ///
    /// The first occurrence is replaced in place and later duplicates are
    /// dropped. An absent key is appended.
    pub fn with(&self, key: &str, value: &str) -> Self {
        let mut pairs = Vec::with_capacity(self.pairs.len() + 1);
        let mut replaced = false;
        for (k, v) in &self.pairs {
            if k == key {
                if !replaced {
                    pairs.push((k.clone(), value.to_string()));
                    replaced = true;
                }
            } else {
                pairs.push((k.clone(), v.clone()));
            }
        }
        if !replaced {
            pairs.push((key.to_string(), value.to_string()));
        }
        Self { pairs }
    }

    /// Drop every occurrence of each listed key, keeping everything else.
    pub fn without<K: AsRef<str>>(&self, keys: &[K]) -> Self {
        let pairs = self
            .pairs
            .iter()
            .filter(|(k, _)| !keys.iter().any(|key| key.as_ref() == k))
            .cloned()
            .collect();
        Self { pairs }
    }

    /// Iterate over the pairs in order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Whether there are no pairs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Decode the view state this query string describes.
    pub fn view_state(&self, defaults: &ViewDefaults) -> ViewState {
        ViewState {
            data_state: decode_data_state(self.get(ParamKey::DataState.as_str())),
            user_filter: decode_filter(self.get(ParamKey::User.as_str())),
            action_filter: decode_filter(self.get(ParamKey::Action.as_str())),
            sort: decode_sort(self.get(ParamKey::Sort.as_str())),
            page: decode_positive(self.get(ParamKey::Page.as_str()))
                .and_then(PageNumber::new)
                .unwrap_or_default(),
            items_per_page: decode_positive(self.get(ParamKey::Items.as_str()))
                .and_then(ItemsPerPage::new)
                .unwrap_or(defaults.items_per_page),
        }
    }
}

impl fmt::Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs())
            .finish();
        f.write_str(&encoded)
    }
}

impl From<&str> for QueryString {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<&ViewState> for QueryString {
    /// Canonical query string for a state: every parameter, in canonical order.
    fn from(state: &ViewState) -> Self {
        let mut pairs = vec![(
            ParamKey::DataState.as_str().to_string(),
            state.data_state.as_str().to_string(),
        )];
        if let Some(user) = &state.user_filter {
            pairs.push((ParamKey::User.as_str().to_string(), user.clone()));
        }
        if let Some(action) = &state.action_filter {
            pairs.push((ParamKey::Action.as_str().to_string(), action.clone()));
        }
        if let Some(sort) = &state.sort {
            pairs.push((ParamKey::Sort.as_str().to_string(), sort.to_param()));
        }
        pairs.push((ParamKey::Page.as_str().to_string(), state.page.to_string()));
        pairs.push((
            ParamKey::Items.as_str().to_string(),
            state.items_per_page.to_string(),
        ));
        Self { pairs }
    }
}

// ===== Field decoders =====

fn decode_data_state(raw: Option<&str>) -> DataState {
    match raw {
        None => DataState::default(),
        Some(value) => DataState::parse(value).unwrap_or_else(|| {
            warn!(value, "Unrecognized data-state, falling back to success");
            DataState::Success
        }),
    }
}

fn decode_filter(raw: Option<&str>) -> Option<String> {
    raw.filter(|v| !v.is_empty()).map(str::to_string)
}

fn decode_sort(raw: Option<&str>) -> Option<SortSpec> {
    let value = raw?;
    let spec = SortSpec::parse(value);
    if spec.is_none() {
        debug!(value, "Ignoring malformed sort parameter");
    }
    spec
}

/// Parse a positive integer. Zero, negatives and non-numbers are `None`.
fn decode_positive(raw: Option<&str>) -> Option<usize> {
    raw?.trim().parse::<usize>().ok().filter(|n| *n > 0)
}

// ===== Free-function API =====

/// Decode a query string with the built-in defaults.
pub fn decode(query: &str) -> ViewState {
    decode_with(query, &ViewDefaults::default())
}

/// Decode a query string with explicit defaults.
pub fn decode_with(query: &str, defaults: &ViewDefaults) -> ViewState {
    QueryString::parse(query).view_state(defaults)
}

/// Set one key, preserving all others. Returns the new query string.
pub fn encode(query: &str, name: &str, value: &str) -> String {
    QueryString::parse(query).with(name, value).to_string()
}

/// Delete the listed keys, preserving all others. Returns the new query string.
pub fn remove_keys<K: AsRef<str>>(query: &str, names: &[K]) -> String {
    QueryString::parse(query).without(names).to_string()
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod tests;
