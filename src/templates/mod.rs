//! Built-in views using the Tera template engine
//!
//! Templates are embedded in the binary so the server needs nothing but the
//! post directory at runtime.

use anyhow::Result;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::PostMetadata;

/// Template renderer with the embedded views
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all views loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("views/layout.html")),
            ("index.html", include_str!("views/index.html")),
            ("details.html", include_str!("views/details.html")),
        ])?;

        tera.register_filter("date_format", date_format_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    /// Render the post listing
    pub fn render_index(&self, config: &SiteConfig, posts: &[PostMetadata]) -> Result<String> {
        let mut context = base_context(config);
        context.insert("posts", posts);
        self.render("index.html", &context)
    }

    /// Render a single post with its markup body
    pub fn render_details(
        &self,
        config: &SiteConfig,
        post: &PostMetadata,
        body: &str,
    ) -> Result<String> {
        let mut context = base_context(config);
        context.insert("post", post);
        context.insert("body", body);
        self.render("details.html", &context)
    }
}

/// Site-wide values every view can use
#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub date_format: String,
}

impl From<&SiteConfig> for SiteData {
    fn from(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            subtitle: config.subtitle.clone(),
            author: config.author.clone(),
            date_format: config.date_format.clone(),
        }
    }
}

fn base_context(config: &SiteConfig) -> Context {
    let mut context = Context::new();
    context.insert("site", &SiteData::from(config));
    context.insert("now", &Local::now());
    context
}

/// Format a date with a chrono format string; `None` if the format is invalid
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>, format: &str) -> Option<String>
where
    Tz::Offset: std::fmt::Display,
{
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return None;
    }
    Some(date.format(format).to_string())
}

/// Tera filter: reformat an RFC 3339 timestamp with a chrono format string
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "%Y-%m-%d".to_string(),
    };

    let date = match DateTime::parse_from_rfc3339(&s) {
        Ok(date) => date,
        // Not a timestamp; leave it untouched
        Err(_) => return Ok(tera::Value::String(s)),
    };

    format_date(&date, &format)
        .map(tera::Value::String)
        .ok_or_else(|| {
            tera::Error::msg(format!(
                "Filter `date_format` received an invalid format: {}",
                format
            ))
        })
}
