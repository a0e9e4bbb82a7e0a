//! List the posts shown on the index page

use anyhow::Result;

use crate::content::PostMetadata;
use crate::Blog;

/// Print the index listing
pub fn run(blog: &Blog) -> Result<()> {
    let posts = blog.loader().list_index();
    println!("Posts ({}):", posts.len());
    for post in &posts {
        println!("  {}", format_line(post));
    }
    Ok(())
}

/// One listing line: id, title and author
pub fn format_line(post: &PostMetadata) -> String {
    let title = if post.has_title() {
        post.title.as_str()
    } else {
        "(untitled)"
    };

    if post.author.is_empty() {
        format!("{:>4}  {}", post.id, title)
    } else {
        format!("{:>4}  {} - {}", post.id, title, post.author)
    }
}
