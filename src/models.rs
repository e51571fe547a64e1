//! Data models for articles as the news API returns them.
//!
//! Two shapes matter here:
//! - [`Article`]: one article record, kept as close to the wire form as
//!   possible so the final JSON file reproduces what the API sent
//! - [`EverythingResponse`]: the envelope around the article list in a
//!   successful `everything` response

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single article record from the news API.
///
/// Only `title` and `description` are interpreted by this program (the
/// relevance filter reads them); both are nullable on the wire and so are
/// optional here. Every other field the API sends (`source`, `author`,
/// `url`, `publishedAt`, and whatever else a given plan returns) is captured
/// untouched in the flattened `extra` bag, so serializing an `Article` back
/// out reproduces the record the API delivered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// The article headline, when present.
    pub title: Option<String>,
    /// The article summary/teaser, when present.
    pub description: Option<String>,
    /// All remaining API-provided fields, passed through verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A successful response body from the `everything` endpoint.
///
/// `articles` tolerates being absent entirely; an envelope without the field
/// deserializes to an empty list rather than an error.
#[derive(Debug, Deserialize)]
pub struct EverythingResponse {
    /// How many articles matched server-side, across all pages.
    #[serde(rename = "totalResults")]
    pub total_results: Option<u64>,
    /// The records on this page.
    #[serde(default)]
    pub articles: Vec<Article>,
}
