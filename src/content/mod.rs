//! Content module - raw documents, rich text, and the post view model

mod document;
mod post;
pub mod richtext;

pub use document::{ApiDocument, Banner, DocumentData, RawSection};
pub use post::{Post, Section};
pub use richtext::RichText;
