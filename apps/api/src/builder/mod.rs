pub mod coach;
pub mod handlers;
pub mod improve;
pub mod models;
pub mod prompts;
pub mod render;
pub mod tailor;
