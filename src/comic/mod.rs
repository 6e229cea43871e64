//! Comic record parsing and validation.
//!
//! This module turns the raw `info.0.json` payload into a [`Comic`]:
//! - Deserializes the loosely-typed wire document
//! - Validates the string-encoded `year`, `month` and `day` as integers
//! - Derives the UTC publication timestamp from them
//!
//! Parsing is a pure function of its input bytes; no clock or other ambient
//! state is consulted.

mod date;
mod wire;


use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error_handling::XkcdError;
use wire::WireComic;

/// A validated xkcd comic.
///
/// Built only by [`parse_comic`] (directly or through the fetchers). The date
/// components are held as validated integers and `published_at` is always
/// derived from them, so the two can never disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comic {
    id: u32,
    day: i32,
    month: i32,
    year: i32,
    title: String,
    safe_title: String,
    transcript: String,
    alt: String,
    img: String,
    news: String,
    published_at: DateTime<Utc>,
}

impl Comic {
    /// Comic number (`num` on the wire).
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Day of month as published (not normalized).
    pub fn day(&self) -> i32 {
        self.day
    }

    /// Month as published (not normalized).
    pub fn month(&self) -> i32 {
        self.month
    }

    /// Year as published.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Display title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Alternative title (`safe_title` on the wire).
    pub fn safe_title(&self) -> &str {
        &self.safe_title
    }

    /// Textual description of the comic; may contain newlines.
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// Hover text shown over the image.
    pub fn alt(&self) -> &str {
        &self.alt
    }

    /// URL of the comic image. Not validated.
    pub fn img(&self) -> &str {
        &self.img
    }

    /// Announcement text, usually empty.
    pub fn news(&self) -> &str {
        &self.news
    }

    /// Midnight UTC of the (normalized) publication date.
    pub fn published_at(&self) -> DateTime<Utc> {
        self.published_at
    }

    /// Publication date as `month/day/year`, e.g. `3/2/2012`.
    pub fn date_label(&self) -> String {
        format!("{}/{}/{}", self.month, self.day, self.year)
    }

    /// Indented, human-readable dump of every field, for logs and test output.
    pub fn to_pretty_string(&self) -> String {
        format!("{:#?}", self)
    }

    fn from_wire(wire: WireComic) -> Result<Self, XkcdError> {
        // year, then month, then day: the first bad one is reported
        let year = date::parse_component("year", &wire.year)?;
        let month = date::parse_component("month", &wire.month)?;
        let day = date::parse_component("day", &wire.day)?;

        let published_at = date::midnight_utc(year, month, day)
            .ok_or(XkcdError::DateOutOfRange { year, month, day })?;

        Ok(Comic {
            id: wire.num,
            day,
            month,
            year,
            title: wire.title,
            safe_title: wire.safe_title,
            transcript: wire.transcript,
            alt: wire.alt,
            img: wire.img,
            news: wire.news,
            published_at,
        })
    }
}

/// Parses an `info.0.json` body into a validated [`Comic`].
///
/// # Errors
///
/// - `XkcdError::MalformedJson` if the bytes are not a JSON object, or a
///   known key holds a value of the wrong JSON type
/// - `XkcdError::InvalidDateComponent` for the first of `year`, `month`,
///   `day` that is not base-10 integer text
/// - `XkcdError::DateOutOfRange` if the date cannot be represented
///
/// # Example
///
/// ```
/// let body = br#"{"num": 1, "year": "2006", "month": "1", "day": "1", "title": "Barrel - Part 1"}"#;
/// let comic = xkcd_client::parse_comic(body)?;
/// assert_eq!(comic.title(), "Barrel - Part 1");
/// assert_eq!(comic.published_at().to_rfc3339(), "2006-01-01T00:00:00+00:00");
/// # Ok::<(), xkcd_client::XkcdError>(())
/// ```
pub fn parse_comic(body: &[u8]) -> Result<Comic, XkcdError> {
    let value: serde_json::Value = serde_json::from_slice(body)?;
    if !value.is_object() {
        return Err(XkcdError::MalformedJson(serde::de::Error::custom(
            "expected a JSON object",
        )));
    }
    let wire = WireComic::deserialize(value)?;
    Comic::from_wire(wire)
}
