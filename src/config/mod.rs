//! Configuration module

mod content;

pub use content::ContentConfig;
