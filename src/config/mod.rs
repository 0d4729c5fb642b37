//! Configuration module

mod site;

pub use site::BackendConfig;
pub use site::SiteConfig;
