//! Rich text structure and serialization
//!
//! The content backend delivers post bodies as structured rich text: an
//! ordered list of typed block nodes, each carrying plain text plus
//! inline spans addressed by character offsets. This module owns the two
//! serializations the renderer needs: plain text for the reading-time
//! estimate, and HTML for the page body.
//!
//! Text content is HTML-escaped during serialization, so markup
//! injection is limited to URLs supplied by the (trusted) backend.

use serde::{Deserialize, Serialize};

/// An ordered rich-text body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RichText(pub Vec<RichTextNode>);

/// One block-level rich-text node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RichTextNode {
    #[serde(rename = "type")]
    pub kind: NodeKind,

    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub spans: Vec<Span>,

    /// Image nodes carry their URL at the top level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

/// Block node types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    #[serde(rename = "paragraph")]
    Paragraph,
    #[serde(rename = "heading1")]
    Heading1,
    #[serde(rename = "heading2")]
    Heading2,
    #[serde(rename = "heading3")]
    Heading3,
    #[serde(rename = "heading4")]
    Heading4,
    #[serde(rename = "heading5")]
    Heading5,
    #[serde(rename = "heading6")]
    Heading6,
    #[serde(rename = "list-item")]
    ListItem,
    #[serde(rename = "o-list-item")]
    OrderedListItem,
    #[serde(rename = "preformatted")]
    Preformatted,
    #[serde(rename = "image")]
    Image,
    #[serde(other)]
    Other,
}

/// An inline span over a node's text, addressed by character offsets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,

    #[serde(rename = "type")]
    pub kind: SpanKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<SpanData>,
}

/// Inline span types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpanKind {
    #[serde(rename = "strong")]
    Strong,
    #[serde(rename = "em")]
    Em,
    #[serde(rename = "hyperlink")]
    Hyperlink,
    #[serde(other)]
    Other,
}

/// Extra data carried by a span (hyperlink target)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpanData {
    pub url: Option<String>,
}

impl RichText {
    /// Flatten to plain text
    ///
    /// Node texts are concatenated with no added separator; word
    /// boundaries rely on the whitespace already present in the text.
    pub fn as_text(&self) -> String {
        self.0.iter().map(|n| n.text.as_str()).collect()
    }

    /// Serialize to an HTML string
    ///
    /// Consecutive `list-item` / `o-list-item` nodes are grouped into a
    /// single `<ul>` / `<ol>` element.
    pub fn as_html(&self) -> String {
        let mut out = String::new();
        let mut open_list: Option<&str> = None;

        for node in &self.0 {
            let list_tag = match node.kind {
                NodeKind::ListItem => Some("ul"),
                NodeKind::OrderedListItem => Some("ol"),
                _ => None,
            };

            if open_list != list_tag {
                if let Some(tag) = open_list {
                    out.push_str(&format!("</{}>", tag));
                }
                if let Some(tag) = list_tag {
                    out.push_str(&format!("<{}>", tag));
                }
                open_list = list_tag;
            }

            out.push_str(&render_node(node));
        }

        if let Some(tag) = open_list {
            out.push_str(&format!("</{}>", tag));
        }

        out
    }
}

/// Render a single block node
fn render_node(node: &RichTextNode) -> String {
    let inner = || render_spans(&node.text, &node.spans);

    match node.kind {
        NodeKind::Paragraph => format!("<p>{}</p>", inner()),
        NodeKind::Heading1 => format!("<h1>{}</h1>", inner()),
        NodeKind::Heading2 => format!("<h2>{}</h2>", inner()),
        NodeKind::Heading3 => format!("<h3>{}</h3>", inner()),
        NodeKind::Heading4 => format!("<h4>{}</h4>", inner()),
        NodeKind::Heading5 => format!("<h5>{}</h5>", inner()),
        NodeKind::Heading6 => format!("<h6>{}</h6>", inner()),
        NodeKind::ListItem | NodeKind::OrderedListItem => format!("<li>{}</li>", inner()),
        NodeKind::Preformatted => format!("<pre>{}</pre>", inner()),
        NodeKind::Image => {
            let url = node.url.as_deref().unwrap_or_default();
            let alt = node.alt.as_deref().unwrap_or_default();
            format!(
                r#"<p class="block-img"><img src="{}" alt="{}"></p>"#,
                escape(url),
                escape(alt)
            )
        }
        // Unknown block types degrade to paragraphs
        NodeKind::Other => format!("<p>{}</p>", inner()),
    }
}

/// Apply inline spans to a node's text
///
/// Tags open and close at span boundaries; spans ending at a position
/// close before spans starting there, and longer spans open first so
/// overlaps nest.
fn render_spans(text: &str, spans: &[Span]) -> String {
    if spans.is_empty() {
        return escape(text);
    }

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + spans.len() * 16);

    for i in 0..=chars.len() {
        let mut closing: Vec<&Span> = spans.iter().filter(|s| s.end == i && s.start < i).collect();
        closing.sort_by(|a, b| b.start.cmp(&a.start));
        for span in closing {
            out.push_str(close_tag(span));
        }

        let mut opening: Vec<&Span> = spans.iter().filter(|s| s.start == i && s.end > i).collect();
        opening.sort_by(|a, b| b.end.cmp(&a.end));
        for span in opening {
            out.push_str(&open_tag(span));
        }

        if let Some(c) = chars.get(i) {
            push_escaped(&mut out, *c);
        }
    }

    out
}

fn open_tag(span: &Span) -> String {
    match span.kind {
        SpanKind::Strong => "<strong>".to_string(),
        SpanKind::Em => "<em>".to_string(),
        SpanKind::Hyperlink => {
            let url = span
                .data
                .as_ref()
                .and_then(|d| d.url.as_deref())
                .unwrap_or_default();
            format!(r#"<a href="{}">"#, escape(url))
        }
        SpanKind::Other => String::new(),
    }
}

fn close_tag(span: &Span) -> &'static str {
    match span.kind {
        SpanKind::Strong => "</strong>",
        SpanKind::Em => "</em>",
        SpanKind::Hyperlink => "</a>",
        SpanKind::Other => "",
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        push_escaped(&mut out, c);
    }
    out
}

fn push_escaped(out: &mut String, c: char) {
    match c {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&#39;"),
        _ => out.push(c),
    }
}
