//! Create a new post resource

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::content::loader::validate_id;
use crate::Blog;

/// Metadata written into a freshly scaffolded post
pub struct NewPost<'a> {
    pub id: i64,
    pub title: &'a str,
    pub author: Option<&'a str>,
    pub image_url: Option<&'a str>,
}

/// Write `Post{id}` with its metadata declarations and an empty summary
pub fn create_post(blog: &Blog, post: &NewPost<'_>) -> Result<PathBuf> {
    let id = validate_id(post.id)?;
    if post.title.trim().is_empty() {
        anyhow::bail!("A post needs a title");
    }
    for value in [Some(post.title), post.author, post.image_url].into_iter().flatten() {
        if value.contains('"') || value.contains('\n') {
            anyhow::bail!("Metadata values cannot contain quotes or newlines: {:?}", value);
        }
    }

    let file_path = blog.loader().resource_path(id);
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    fs::create_dir_all(&blog.post_dir)?;
    fs::write(&file_path, scaffold(post))?;

    println!("Created: {:?}", file_path);

    Ok(file_path)
}

fn scaffold(post: &NewPost<'_>) -> String {
    let mut content = String::from("@{\n");
    content.push_str(&format!("    var postTitle = \"{}\";\n", post.title));
    content.push_str(&format!(
        "    var postAuthor = \"{}\";\n",
        post.author.unwrap_or_default()
    ));
    if let Some(image_url) = post.image_url {
        content.push_str(&format!("    var postImageUrl = \"{}\";\n", image_url));
    }
    content.push_str("}\n\n<h3>Summary</h3>\n<p></p>\n");
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    fn post(id: i64, title: &str) -> NewPost<'_> {
        NewPost {
            id,
            title,
            author: Some("Jane"),
            image_url: Some("cover.png"),
        }
    }

    #[test]
    fn test_create_post_round_trips_through_loader() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::with_config(dir.path(), SiteConfig::default());

        let path = create_post(&blog, &post(3, "Fresh Post")).unwrap();
        assert_eq!(path, blog.loader().resource_path(3));

        let meta = blog.loader().get_detail(3).unwrap();
        assert_eq!(meta.title, "Fresh Post");
        assert_eq!(meta.author, "Jane");
        assert_eq!(meta.image_url, Some("cover.png".to_string()));
        assert_eq!(meta.summary, "");
    }

    #[test]
    fn test_create_post_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::with_config(dir.path(), SiteConfig::default());

        create_post(&blog, &post(1, "One")).unwrap();
        assert!(create_post(&blog, &post(1, "Again")).is_err());
        assert_eq!(blog.loader().load_metadata(1).title, "One");
    }

    #[test]
    fn test_create_post_rejects_bad_input() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::with_config(dir.path(), SiteConfig::default());

        assert!(create_post(&blog, &post(0, "Zero")).is_err());
        assert!(create_post(&blog, &post(2, "  ")).is_err());
        assert!(create_post(&blog, &post(2, "Say \"hi\"")).is_err());
        assert!(!blog.loader().resource_path(2).exists());
    }
}
