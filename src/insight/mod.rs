//! LLM insight boundary
//!
//! Wraps a third-party text-generation API behind the narrow
//! [`TextGenerator`] trait so everything above it can be tested with a
//! stub. The engine only formats prompts and passes generated text
//! through opaquely; nothing in the interpreter depends on this module
//! succeeding.

pub mod client;
mod prompts;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::query::QueryResult;
use crate::schema::GraphSchema;

#[derive(Error, Debug)]
pub enum InsightError {
    #[error("LLM API error: {0}")]
    Api(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}

pub type InsightResult<T> = Result<T, InsightError>;

/// Supported hosted/local LLM backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LlmProvider {
    OpenAI,
    Ollama,
    Gemini,
}

/// Configuration for the outbound text-generation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub provider: LlmProvider,
    /// Model name, e.g. "gpt-4o-mini" or "llama3".
    pub model: String,
    /// API key; optional for local providers.
    pub api_key: Option<String>,
    /// Override the provider's default endpoint.
    pub api_base_url: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Hard upper bound on the whole HTTP exchange. A slow or hung
    /// endpoint surfaces as an error instead of blocking the caller.
    pub timeout_secs: u64,
}

impl LlmConfig {
    pub fn new(provider: LlmProvider, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            api_key: None,
            api_base_url: None,
            temperature: 0.7,
            max_tokens: 800,
            timeout_secs: 60,
        }
    }

    /// OpenAI configuration with the key taken from `OPENAI_API_KEY`,
    /// the demo's configuration path.
    pub fn openai_from_env() -> InsightResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| InsightError::Config("OPENAI_API_KEY is not set".to_string()))?;
        let mut config = Self::new(LlmProvider::OpenAI, "gpt-4o-mini");
        config.api_key = Some(api_key);
        Ok(config)
    }
}

/// The seam between prompt construction and the remote model.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate free text for a system/user prompt pair.
    async fn generate_text(&self, system_prompt: &str, prompt: &str) -> InsightResult<String>;
}

/// Everything the prompt templates need about the current session.
#[derive(Debug, Clone)]
pub struct InsightContext<'a> {
    pub schema: &'a GraphSchema,
    /// The query as the user typed it.
    pub query: &'a str,
    pub result: &'a QueryResult,
}

/// Prompt-template front end over a [`TextGenerator`].
pub struct InsightEngine<G> {
    generator: G,
}

impl<G: TextGenerator> InsightEngine<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Actionable business insights over the current query results.
    pub async fn business_insights(&self, ctx: &InsightContext<'_>) -> InsightResult<String> {
        self.generator
            .generate_text(prompts::BUSINESS_SYSTEM, &prompts::business_insights(ctx))
            .await
    }

    /// Distribution/correlation/anomaly analysis of the results.
    pub async fn pattern_analysis(&self, ctx: &InsightContext<'_>) -> InsightResult<String> {
        self.generator
            .generate_text(prompts::ANALYST_SYSTEM, &prompts::pattern_analysis(ctx))
            .await
    }

    /// Concrete next-step recommendations.
    pub async fn recommendations(&self, ctx: &InsightContext<'_>) -> InsightResult<String> {
        self.generator
            .generate_text(prompts::BUSINESS_SYSTEM, &prompts::recommendations(ctx))
            .await
    }

    /// Product-roadmap suggestions, optionally building on earlier
    /// generated insights.
    pub async fn roadmap_suggestions(
        &self,
        ctx: &InsightContext<'_>,
        prior_insights: Option<&str>,
    ) -> InsightResult<String> {
        self.generator
            .generate_text(
                prompts::STRATEGY_SYSTEM,
                &prompts::roadmap_suggestions(ctx, prior_insights),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{DatasetSizes, MockDataset};
    use crate::query::interpret;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    struct CapturingStub {
        captured: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl TextGenerator for CapturingStub {
        async fn generate_text(&self, system: &str, prompt: &str) -> InsightResult<String> {
            self.captured
                .lock()
                .unwrap()
                .push((system.to_string(), prompt.to_string()));
            Ok("stubbed insight".to_string())
        }
    }

    struct FailingStub;

    #[async_trait]
    impl TextGenerator for FailingStub {
        async fn generate_text(&self, _system: &str, _prompt: &str) -> InsightResult<String> {
            Err(InsightError::Network("connection refused".to_string()))
        }
    }

    fn context_parts() -> (GraphSchema, QueryResult) {
        let as_of = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let ds = MockDataset::generate_at(42, &DatasetSizes::default(), as_of);
        let result = interpret("FIND Orders placed in the last 30 days", &ds)
            .as_result()
            .expect("template query must match")
            .clone();
        (GraphSchema::example(), result)
    }

    #[tokio::test]
    async fn test_prompt_carries_schema_query_and_results() {
        let (schema, result) = context_parts();
        let query = "FIND Orders placed in the last 30 days";
        let ctx = InsightContext {
            schema: &schema,
            query,
            result: &result,
        };
        let stub = CapturingStub {
            captured: Mutex::new(Vec::new()),
        };
        let engine = InsightEngine::new(stub);

        let text = engine.business_insights(&ctx).await.unwrap();
        assert_eq!(text, "stubbed insight");

        let captured = engine.generator.captured.lock().unwrap();
        let (system, prompt) = &captured[0];
        assert!(system.contains("business intelligence"));
        assert!(prompt.contains(query));
        assert!(prompt.contains("Customer -> Order"));
        assert!(prompt.contains(&result.summary));
    }

    #[tokio::test]
    async fn test_roadmap_includes_prior_insights() {
        let (schema, result) = context_parts();
        let ctx = InsightContext {
            schema: &schema,
            query: "q",
            result: &result,
        };
        let stub = CapturingStub {
            captured: Mutex::new(Vec::new()),
        };
        let engine = InsightEngine::new(stub);

        engine
            .roadmap_suggestions(&ctx, Some("earlier findings"))
            .await
            .unwrap();
        let captured = engine.generator.captured.lock().unwrap();
        assert!(captured[0].1.contains("earlier findings"));
    }

    #[tokio::test]
    async fn test_generator_errors_pass_through() {
        let (schema, result) = context_parts();
        let ctx = InsightContext {
            schema: &schema,
            query: "q",
            result: &result,
        };
        let engine = InsightEngine::new(FailingStub);
        let err = engine.pattern_analysis(&ctx).await.unwrap_err();
        assert!(matches!(err, InsightError::Network(_)));
    }
}
