//! Show the metadata of a single post

use anyhow::Result;

use crate::templates::format_date;
use crate::Blog;

/// Print a post's metadata, or fail with the lookup error
pub fn run(blog: &Blog, id: i64) -> Result<()> {
    let post = blog.loader().get_detail(id)?;

    println!("Id:        {}", post.id);
    println!("Title:     {}", post.title);
    println!("Author:    {}", post.author);
    println!("Image:     {}", post.image_url.as_deref().unwrap_or("-"));
    println!("Summary:   {}", post.summary);
    let published = format_date(&post.published_at, &blog.config.date_format)
        .unwrap_or_else(|| post.published_at.to_rfc3339());
    println!("Published: {}", published);

    Ok(())
}
