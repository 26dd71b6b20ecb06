//! Configuration module

mod site;

pub use site::BrandConfig;
pub use site::SiteConfig;
pub use site::CONFIG_FILE_NAME;
