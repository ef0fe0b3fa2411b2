pub mod analyzer;
pub mod credentials;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod scoring;
pub mod sections;
pub mod skills;
pub mod timeline;
pub mod validation;
