//! Post view model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::document::ApiDocument;
use super::richtext::RichText;

/// Reading speed assumed by the reading-time estimate
const WORDS_PER_MINUTE: usize = 200;

/// A blog post, normalized from a raw content document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// URL slug (the document uid)
    pub slug: String,

    /// First publication timestamp, if the document has been published
    pub first_publication_date: Option<DateTime<Utc>>,

    /// Post title
    pub title: String,

    /// Banner image URL
    pub banner_url: String,

    /// Author display name
    pub author: String,

    /// Ordered content sections
    pub content: Vec<Section>,
}

/// One content section of a post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub heading: String,
    pub body: RichText,
}

impl Post {
    /// Build the view model from a raw document
    ///
    /// Sections keep their original order. The subtitle is fetched with
    /// the document but not carried into the view.
    pub fn from_document(doc: ApiDocument) -> Self {
        let content = doc
            .data
            .content
            .into_iter()
            .map(|s| Section {
                heading: s.heading,
                body: s.body,
            })
            .collect();

        Self {
            slug: doc.uid,
            first_publication_date: doc.first_publication_date,
            title: doc.data.title,
            banner_url: doc.data.banner.url,
            author: doc.data.author,
            content,
        }
    }

    /// Estimated reading time in whole minutes, at 200 words per minute
    ///
    /// Headings and body text are concatenated in section order with no
    /// added separator, then split on runs of whitespace. The word count
    /// floors at one token, so the estimate is always at least a minute.
    pub fn reading_time(&self) -> usize {
        let mut text = String::new();
        for section in &self.content {
            text.push_str(&section.heading);
            text.push_str(&section.body.as_text());
        }

        let words = text.split_whitespace().count().max(1);
        words.div_ceil(WORDS_PER_MINUTE)
    }
}
