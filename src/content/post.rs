//! Post metadata model

use chrono::{DateTime, Local};
use serde::Serialize;

/// Metadata extracted from a single post resource
///
/// Built fresh for every lookup; nothing is cached between requests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostMetadata {
    /// Post id, taken from the caller
    pub id: u32,

    /// Value of `postTitle`, empty if not declared
    pub title: String,

    /// Value of `postAuthor`, empty if not declared
    pub author: String,

    /// Value of `postImageUrl`
    pub image_url: Option<String>,

    /// Text of the paragraph under the Summary heading
    pub summary: String,

    /// Load time shifted by the configured offset
    pub published_at: DateTime<Local>,
}

impl PostMetadata {
    /// A record with every text field empty
    pub fn empty(id: u32, published_at: DateTime<Local>) -> Self {
        Self {
            id,
            title: String::new(),
            author: String::new(),
            image_url: None,
            summary: String::new(),
            published_at,
        }
    }

    /// A post only counts as existing when it declares a title
    pub fn has_title(&self) -> bool {
        !self.title.is_empty()
    }
}
