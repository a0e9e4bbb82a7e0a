//! Configuration module

mod site;

pub use site::IndexConfig;
pub use site::SiteConfig;
pub use site::DEFAULT_PUBLISH_OFFSET_HOURS;
