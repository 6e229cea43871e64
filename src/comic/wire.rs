//! JSON wire shape of the `info.0.json` document.

use serde::{Deserialize, Deserializer};

/// The payload exactly as the API sends it.
///
/// Every field defaults to its zero value when the key is missing or `null`;
/// unknown keys (such as `link`) are ignored.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct WireComic {
    #[serde(default, deserialize_with = "null_as_default")]
    pub num: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub day: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub month: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub year: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub safe_title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub transcript: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub alt: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub img: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub news: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
