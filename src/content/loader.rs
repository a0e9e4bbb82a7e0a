//! Post loader - resolves `Post{id}` resources and reads their metadata

use chrono::{DateTime, Duration, Local};
use std::fs;
use std::path::PathBuf;
use walkdir::WalkDir;

use super::{parse_metadata, parse_post, PostMetadata};
use crate::config::DEFAULT_PUBLISH_OFFSET_HOURS;
use crate::{Blog, BlogError};

/// File name prefix shared by every post resource
const POST_PREFIX: &str = "Post";

/// Loads post metadata from the post directory
pub struct PostLoader<'a> {
    blog: &'a Blog,
}

impl<'a> PostLoader<'a> {
    /// Create a new post loader
    pub fn new(blog: &'a Blog) -> Self {
        Self { blog }
    }

    /// Path of the resource for `id`
    pub fn resource_path(&self, id: u32) -> PathBuf {
        self.blog.post_dir.join(resource_name(id, &self.blog.config.post_ext))
    }

    /// Publication timestamp stamped on every record
    ///
    /// An offset too large to represent falls back to the default one.
    pub fn published_at(&self) -> DateTime<Local> {
        let now = Local::now();
        let hours = self.blog.config.publish_offset_hours;
        shift_hours(now, hours).unwrap_or_else(|| {
            tracing::warn!(
                "publish_offset_hours {} is out of range, using {}",
                hours,
                DEFAULT_PUBLISH_OFFSET_HOURS
            );
            shift_hours(now, DEFAULT_PUBLISH_OFFSET_HOURS).unwrap_or(now)
        })
    }

    /// Metadata for `id`; a missing or unreadable resource yields an empty record
    pub fn load_metadata(&self, id: u32) -> PostMetadata {
        let published_at = self.published_at();
        match self.read_resource(id) {
            Some(content) => parse_metadata(id, &content, published_at),
            None => PostMetadata::empty(id, published_at),
        }
    }

    /// Ids shown on the index page, in display order
    pub fn index_ids(&self) -> Vec<u32> {
        if self.blog.config.index.scan {
            self.scan_ids()
        } else {
            self.blog.config.index.ids.clone()
        }
    }

    /// Metadata for every post on the index page
    pub fn list_index(&self) -> Vec<PostMetadata> {
        self.index_ids()
            .into_iter()
            .map(|id| self.load_metadata(id))
            .collect()
    }

    /// Metadata for a detail page
    ///
    /// Non-positive ids are rejected before any lookup. A post without a
    /// title is reported as missing.
    pub fn get_detail(&self, id: i64) -> Result<PostMetadata, BlogError> {
        self.load_post(id).map(|(post, _)| post)
    }

    /// Metadata and page body for a detail page, from a single read
    ///
    /// Same checks as [`PostLoader::get_detail`]; the body is the resource
    /// markup without its metadata declarations.
    pub fn load_post(&self, id: i64) -> Result<(PostMetadata, String), BlogError> {
        let id = validate_id(id)?;
        let content = self.read_resource(id).ok_or(BlogError::NotFound(id))?;
        let (post, body) = parse_post(id, &content, self.published_at());
        if post.has_title() {
            Ok((post, body))
        } else {
            Err(BlogError::NotFound(id))
        }
    }

    /// Ids of all `Post{id}` resources in the post directory, ascending
    pub fn scan_ids(&self) -> Vec<u32> {
        let post_dir = &self.blog.post_dir;
        if !post_dir.exists() {
            return Vec::new();
        }

        let mut ids: Vec<u32> = WalkDir::new(post_dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| {
                e.file_name()
                    .to_str()
                    .and_then(|name| parse_resource_name(name, &self.blog.config.post_ext))
            })
            .collect();

        ids.sort_unstable();
        ids.dedup();
        ids
    }

    fn read_resource(&self, id: u32) -> Option<String> {
        let path = self.resource_path(id);
        if !path.is_file() {
            tracing::debug!("No resource for post {} at {:?}", id, path);
            return None;
        }

        match fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(e) => {
                tracing::warn!("Failed to read post {:?}: {}", path, e);
                None
            }
        }
    }
}

fn shift_hours(time: DateTime<Local>, hours: i64) -> Option<DateTime<Local>> {
    Duration::try_hours(hours).and_then(|offset| time.checked_add_signed(offset))
}

/// Check a caller-supplied id; only positive values that fit a post id pass
pub fn validate_id(id: i64) -> Result<u32, BlogError> {
    if id <= 0 {
        return Err(BlogError::InvalidId(id));
    }
    u32::try_from(id).map_err(|_| BlogError::InvalidId(id))
}

/// `Post{id}.{ext}`, or `Post{id}` when no extension is configured
pub fn resource_name(id: u32, ext: &str) -> String {
    if ext.is_empty() {
        format!("{}{}", POST_PREFIX, id)
    } else {
        format!("{}{}.{}", POST_PREFIX, id, ext)
    }
}

fn parse_resource_name(name: &str, ext: &str) -> Option<u32> {
    let stem = if ext.is_empty() {
        name
    } else {
        name.strip_suffix(ext)?.strip_suffix('.')?
    };
    let digits = stem.strip_prefix(POST_PREFIX)?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u32>().ok().filter(|id| *id > 0)
}
