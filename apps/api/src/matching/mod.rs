pub mod fit_scoring;
pub mod handlers;
pub mod jd_parser;
pub mod matcher;
pub mod models;
pub mod prompts;
