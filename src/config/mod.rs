//! Configuration module

mod content;
mod site;

pub use content::ContentConfig;
pub use site::HighlightConfig;
pub use site::SiteConfig;
pub use site::CONFIG_FILES;
