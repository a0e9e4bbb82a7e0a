//! Content module - post resources and the metadata declared inside them

mod extract;
pub mod loader;
mod post;

pub use extract::{
    extract_summary, extract_var, parse_metadata, parse_post, strip_declarations, Field,
};
pub use loader::PostLoader;
pub use post::PostMetadata;
