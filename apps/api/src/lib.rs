//! Resume analyzer service and client.
//!
//! The `resume-api` binary serves the HTTP API built by [`routes::build_router`];
//! the `resume-cli` binary drives it through [`client::AnalyzerClient`].

pub mod analysis;
pub mod builder;
pub mod client;
pub mod config;
pub mod errors;
pub mod llm_client;
pub mod matching;
pub mod pdf;
pub mod routes;
pub mod state;
