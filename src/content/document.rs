//! Raw content documents as returned by the content backend

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::richtext::RichText;

/// A raw document from the content backend, as deserialized from the
/// query API. The field layout mirrors the Prismic document envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiDocument {
    /// Unique identifier (doubles as the URL slug)
    pub uid: String,

    /// First publication timestamp, absent for unpublished previews
    #[serde(default)]
    pub first_publication_date: Option<DateTime<Utc>>,

    /// Typed document payload
    #[serde(default)]
    pub data: DocumentData,
}

/// Payload of a post document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentData {
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub banner: Banner,
    pub content: Vec<RawSection>,
}

/// Banner image reference
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Banner {
    pub url: String,
}

/// One content section: a heading plus a rich-text body. Any other
/// fields the backend attaches to a section are dropped here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSection {
    pub heading: String,
    pub body: RichText,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_document_json() {
        let json = r#"{
            "uid": "how-to-use-hooks",
            "first_publication_date": "2021-05-19T12:00:00Z",
            "data": {
                "title": "Criando um app do zero",
                "subtitle": "Tudo sobre como criar a sua primeira aplicação",
                "author": "Joseph Oliveira",
                "banner": { "url": "https://images.example.com/banner.png" },
                "content": [
                    {
                        "heading": "Proin et varius",
                        "body": [
                            { "type": "paragraph", "text": "Lorem ipsum dolor sit amet", "spans": [] }
                        ]
                    }
                ]
            }
        }"#;

        let doc: ApiDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.uid, "how-to-use-hooks");
        assert!(doc.first_publication_date.is_some());
        assert_eq!(doc.data.author, "Joseph Oliveira");
        assert_eq!(doc.data.banner.url, "https://images.example.com/banner.png");
        assert_eq!(doc.data.content.len(), 1);
        assert_eq!(doc.data.content[0].heading, "Proin et varius");
    }

    #[test]
    fn test_parse_document_without_publication_date() {
        let json = r#"{ "uid": "draft-post", "first_publication_date": null }"#;
        let doc: ApiDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.uid, "draft-post");
        assert!(doc.first_publication_date.is_none());
        assert!(doc.data.content.is_empty());
    }
}
