//! Pattern-based metadata extraction
//!
//! Post resources are markup files that declare their metadata as
//! variable assignments, e.g.
//!
//! ```text
//! @{
//!     var postTitle = "Hello World";
//!     var postAuthor = "Jane";
//!     var postImageUrl = "hello.png";
//! }
//! <h3>Summary</h3>
//! <p>A short teaser.</p>
//! ```
//!
//! Every field is matched independently; a missing match is never an error.

use chrono::{DateTime, Local};
use lazy_static::lazy_static;
use regex::Regex;

use super::PostMetadata;

lazy_static! {
    static ref TITLE_RE: Regex = declaration("postTitle");
    static ref AUTHOR_RE: Regex = declaration("postAuthor");
    static ref IMAGE_URL_RE: Regex = declaration("postImageUrl");
    static ref SUMMARY_RE: Regex =
        Regex::new(r"(?s)<h3>Summary</h3>\s*<p>(.*?)</p>").expect("summary pattern");
    static ref CODE_BLOCK_RE: Regex = Regex::new(r"@\{[^{}]*\}").expect("code block pattern");
}

/// `var <name> = "<value>";` on a single line, value captured lazily
fn declaration(name: &str) -> Regex {
    Regex::new(&format!(r#"\bvar\s+{}\s*=\s*"(.*?)"\s*;"#, regex::escape(name)))
        .expect("declaration pattern")
}

/// Metadata variables a post resource may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Author,
    ImageUrl,
}

impl Field {
    /// Variable name as written in the resource
    pub fn variable(&self) -> &'static str {
        match self {
            Field::Title => "postTitle",
            Field::Author => "postAuthor",
            Field::ImageUrl => "postImageUrl",
        }
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            Field::Title => &TITLE_RE,
            Field::Author => &AUTHOR_RE,
            Field::ImageUrl => &IMAGE_URL_RE,
        }
    }
}

/// Value of the first declaration of `field`, trimmed
pub fn extract_var(content: &str, field: Field) -> Option<String> {
    field
        .pattern()
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Inner text of the first paragraph that follows a Summary heading, trimmed
pub fn extract_summary(content: &str) -> Option<String> {
    SUMMARY_RE
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Build a metadata record from resource text
pub fn parse_metadata(id: u32, content: &str, published_at: DateTime<Local>) -> PostMetadata {
    PostMetadata {
        id,
        title: extract_var(content, Field::Title).unwrap_or_default(),
        author: extract_var(content, Field::Author).unwrap_or_default(),
        image_url: extract_var(content, Field::ImageUrl).filter(|url| !url.is_empty()),
        summary: extract_summary(content).unwrap_or_default(),
        published_at,
    }
}

/// Metadata and page body built from one copy of the resource text
pub fn parse_post(
    id: u32,
    content: &str,
    published_at: DateTime<Local>,
) -> (PostMetadata, String) {
    (
        parse_metadata(id, content, published_at),
        strip_declarations(content),
    )
}

/// Resource markup with the metadata declarations removed, ready to embed in a page
pub fn strip_declarations(content: &str) -> String {
    let without_blocks = CODE_BLOCK_RE.replace_all(content, "");
    let mut body = without_blocks.into_owned();
    for field in [Field::Title, Field::Author, Field::ImageUrl] {
        body = field.pattern().replace_all(&body, "").into_owned();
    }
    body.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"@{
    ViewData["Title"] = "Ignored";
    var postTitle = "  Getting Started  ";
    var postAuthor = "Jane Doe";
    var postImageUrl = "start.png";
}
<article>
  <h3>Summary</h3>
  <p>
    How this blog is put together.
  </p>
  <h3>Body</h3>
  <p>Second paragraph.</p>
</article>
"#;

    #[test]
    fn test_extract_all_fields() {
        let now = Local::now();
        let post = parse_metadata(1, SAMPLE, now);
        assert_eq!(post.id, 1);
        assert_eq!(post.title, "Getting Started");
        assert_eq!(post.author, "Jane Doe");
        assert_eq!(post.image_url, Some("start.png".to_string()));
        assert_eq!(post.summary, "How this blog is put together.");
        assert_eq!(post.published_at, now);
    }

    #[test]
    fn test_teaser_example() {
        let content = "var postTitle = \"Hello World\";\n<h3>Summary</h3>\n<p> A short teaser. </p>";
        let post = parse_metadata(1, content, Local::now());
        assert_eq!(post.title, "Hello World");
        assert_eq!(post.summary, "A short teaser.");
        assert_eq!(post.author, "");
        assert_eq!(post.image_url, None);
    }

    #[test]
    fn test_empty_content() {
        let post = parse_metadata(2, "", Local::now());
        assert_eq!(post.title, "");
        assert_eq!(post.author, "");
        assert_eq!(post.summary, "");
        assert_eq!(post.image_url, None);
    }

    #[test]
    fn test_first_match_wins() {
        let content = r#"var postTitle = "One"; var postTitle = "Two";"#;
        assert_eq!(extract_var(content, Field::Title), Some("One".to_string()));
    }

    #[test]
    fn test_fields_are_order_insensitive() {
        let content = r#"
<h3>Summary</h3><p>Teaser</p>
var postImageUrl = "a.jpg";
var postAuthor = "Bob";
var postTitle = "Late Title";
"#;
        let post = parse_metadata(3, content, Local::now());
        assert_eq!(post.title, "Late Title");
        assert_eq!(post.author, "Bob");
        assert_eq!(post.image_url, Some("a.jpg".to_string()));
        assert_eq!(post.summary, "Teaser");
    }

    #[test]
    fn test_field_names_are_exact() {
        let content = r#"var postTitles = "Nope"; var posttitle = "Nope";"#;
        assert_eq!(extract_var(content, Field::Title), None);
    }

    #[test]
    fn test_declaration_keyword_is_a_whole_word() {
        assert_eq!(extract_var(r#"myvar postTitle = "X";"#, Field::Title), None);
        assert_eq!(
            extract_var(r#"(var postTitle = "Y";)"#, Field::Title),
            Some("Y".to_string())
        );
    }

    #[test]
    fn test_commented_declaration_still_matches() {
        let content = r#"// var postTitle = "Commented";"#;
        assert_eq!(
            extract_var(content, Field::Title),
            Some("Commented".to_string())
        );
    }

    #[test]
    fn test_parse_post_uses_same_content() {
        let now = Local::now();
        let (post, body) = parse_post(1, SAMPLE, now);
        assert_eq!(post, parse_metadata(1, SAMPLE, now));
        assert_eq!(body, strip_declarations(SAMPLE));
        assert_eq!(post.title, "Getting Started");
        assert!(body.contains("Second paragraph."));
    }

    #[test]
    fn test_unterminated_declaration_does_not_match() {
        let content = "var postTitle = \"Dangling\"\n<p>x</p>";
        assert_eq!(extract_var(content, Field::Title), None);
    }

    #[test]
    fn test_empty_image_url_is_absent() {
        let content = r#"var postImageUrl = "  ";"#;
        let post = parse_metadata(1, content, Local::now());
        assert_eq!(post.image_url, None);
    }

    #[test]
    fn test_summary_requires_paragraph_after_heading() {
        let content = "<h3>Summary</h3>\n<div>not a paragraph</div>\n<p>Later</p>";
        assert_eq!(extract_summary(content), None);
    }

    #[test]
    fn test_summary_spans_lines() {
        let content = "<h3>Summary</h3>\n\n  <p>\n line one\n line two \n</p>";
        assert_eq!(
            extract_summary(content),
            Some("line one\n line two".to_string())
        );
    }

    #[test]
    fn test_strip_declarations() {
        let body = strip_declarations(SAMPLE);
        assert!(!body.contains("postTitle"));
        assert!(!body.contains("ViewData"));
        assert!(body.starts_with("<article>"));
        assert!(body.contains("Second paragraph."));
    }

    #[test]
    fn test_strip_bare_declarations() {
        let content = "var postTitle = \"T\";\n<p>Body</p>";
        assert_eq!(strip_declarations(content), "<p>Body</p>");
    }

    #[test]
    fn test_field_variable_names() {
        assert_eq!(Field::Title.variable(), "postTitle");
        assert_eq!(Field::Author.variable(), "postAuthor");
        assert_eq!(Field::ImageUrl.variable(), "postImageUrl");
    }
}
