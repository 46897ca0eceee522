//! Serde helpers for hand-edited snapshot data

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

/// Deserialize a list, treating `null`, a missing value or any non-array as empty
///
/// Use with `#[serde(default, deserialize_with = "lenient_vec")]`.
pub fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ListOrAnything<T> {
        List(Vec<T>),
        Other(IgnoredAny),
    }

    Ok(match ListOrAnything::<T>::deserialize(deserializer)? {
        ListOrAnything::List(items) => items,
        ListOrAnything::Other(_) => Vec::new(),
    })
}

/// Deserialize a free-form label, treating `null` or any non-string as absent
pub(crate) fn lenient_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum LabelOrAnything {
        Label(String),
        Other(IgnoredAny),
    }

    Ok(match LabelOrAnything::deserialize(deserializer)? {
        LabelOrAnything::Label(label) => Some(label),
        LabelOrAnything::Other(_) => None,
    })
}
