use std::sync::Arc;

use tracing::info;

use crate::analysis::analyzer::{HeuristicAnalyzer, LlmAnalyzer, ResumeAnalyzer};
use crate::builder::coach::{HeuristicCoach, LlmCoach, ResumeCoach};
use crate::config::Config;
use crate::llm_client::{self, LlmClient, LlmError};
use crate::matching::matcher::{JobMatcher, KeywordJobMatcher, LlmJobMatcher};
use crate::pdf::{PdfTextExtractor, TextExtractor};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// PDF text extractor. Tests swap in a stub so no real PDFs are needed.
    pub extractor: Arc<dyn TextExtractor>,
    pub analyzer: Arc<dyn ResumeAnalyzer>,
    pub matcher: Arc<dyn JobMatcher>,
    pub coach: Arc<dyn ResumeCoach>,
}

impl AppState {
    /// Heuristic backends everywhere, LLM backends when an API key is configured.
    pub fn from_config(config: Config) -> Result<Self, LlmError> {
        let extractor: Arc<dyn TextExtractor> = Arc::new(PdfTextExtractor);

        let state = match config.anthropic_api_key.clone() {
            Some(api_key) => {
                let llm = LlmClient::new(api_key, config.llm_api_url.clone())?;
                info!("LLM backends enabled (model: {})", llm_client::MODEL);
                AppState {
                    extractor,
                    analyzer: Arc::new(LlmAnalyzer::new(llm.clone())),
                    matcher: Arc::new(LlmJobMatcher::new(llm.clone())),
                    coach: Arc::new(LlmCoach::new(llm)),
                    config,
                }
            }
            None => {
                info!("ANTHROPIC_API_KEY not set, using heuristic backends");
                Self::heuristic(config, extractor)
            }
        };
        Ok(state)
    }

    pub fn heuristic(config: Config, extractor: Arc<dyn TextExtractor>) -> Self {
        AppState {
            config,
            extractor,
            analyzer: Arc::new(HeuristicAnalyzer),
            matcher: Arc::new(KeywordJobMatcher),
            coach: Arc::new(HeuristicCoach),
        }
    }
}
