//! Prediction client — crowd prediction and demand forecast over Gemini.
//!
//! Both operations are total: a missing generator, a failed call or an
//! unparsable reply all degrade to a fixed default. Failures are logged and
//! never returned to the caller.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::llm_client::{LlmError, TextGenerator};
use crate::prediction::models::{default_demand_items, PredictionResult};
use crate::prediction::prompts::{crowd_prompt, crowd_response_schema, demand_prompt};

/// Holds the optional generator handle. `None` means no API key was
/// configured; the client stays in degraded mode for its whole lifetime.
#[derive(Clone)]
pub struct PredictionClient {
    generator: Option<Arc<dyn TextGenerator>>,
    model: String,
}

impl PredictionClient {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>, model: impl Into<String>) -> Self {
        Self {
            generator,
            model: model.into(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.generator.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Predicts crowd level and wait time for `module` on `day` at `time`.
    pub async fn predict_crowd(
        &self,
        module: &str,
        day: &str,
        time: &str,
        context: &str,
    ) -> PredictionResult {
        let Some(generator) = &self.generator else {
            return PredictionResult::not_configured();
        };

        match self
            .request_prediction(generator.as_ref(), module, day, time, context)
            .await
        {
            Ok(result) => result,
            Err(e) => {
                warn!("Crowd prediction for {module} on {day} at {time} failed, using fallback: {e}");
                PredictionResult::fallback()
            }
        }
    }

    /// Lists high-demand canteen items for `day`. Not clamped to five items.
    pub async fn forecast_demand(&self, day: &str) -> Vec<String> {
        let Some(generator) = &self.generator else {
            return default_demand_items();
        };

        let prompt = demand_prompt(day);
        match generator.generate_content(&self.model, &prompt, None).await {
            Ok(text) => {
                let items = parse_demand_items(&text);
                debug!("Demand forecast for {day}: {} items", items.len());
                items
            }
            Err(e) => {
                warn!("Demand forecast for {day} failed, using default items: {e}");
                default_demand_items()
            }
        }
    }

    async fn request_prediction(
        &self,
        generator: &dyn TextGenerator,
        module: &str,
        day: &str,
        time: &str,
        context: &str,
    ) -> Result<PredictionResult, LlmError> {
        let prompt = crowd_prompt(module, day, time, context);
        let schema = crowd_response_schema();
        let text = generator
            .generate_content(&self.model, &prompt, Some(&schema))
            .await?;
        parse_prediction(&text)
    }
}

/// Parses the structured reply. An empty reply is read as `{}`, which fails.
fn parse_prediction(text: &str) -> Result<PredictionResult, LlmError> {
    let text = if text.is_empty() { "{}" } else { text };
    Ok(serde_json::from_str(text)?)
}

/// Splits a comma-separated reply into trimmed, non-empty items.
fn parse_demand_items(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::Value;

    use super::*;
    use crate::prediction::models::{CrowdLevel, DEFAULT_DEMAND_ITEMS, FALLBACK_REASONING};

    /// Replies with a canned result and records what it was asked.
    struct FakeGenerator {
        reply: Result<String, u16>,
        calls: Mutex<Vec<(String, String, Option<Value>)>>,
    }

    impl FakeGenerator {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.to_string()),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn failing(status: u16) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(status),
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for FakeGenerator {
        async fn generate_content(
            &self,
            model: &str,
            prompt: &str,
            schema: Option<&Value>,
        ) -> Result<String, LlmError> {
            self.calls.lock().unwrap().push((
                model.to_string(),
                prompt.to_string(),
                schema.cloned(),
            ));
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(LlmError::Api {
                    status: *status,
                    message: "upstream failure".to_string(),
                }),
            }
        }
    }

    fn client_with(generator: Arc<FakeGenerator>) -> PredictionClient {
        let generator: Arc<dyn TextGenerator> = generator;
        PredictionClient::new(Some(generator), "gemini-1.5-flash")
    }

    fn unconfigured() -> PredictionClient {
        PredictionClient::new(None, "gemini-1.5-flash")
    }

    #[tokio::test]
    async fn test_predict_crowd_without_key_returns_not_configured_default() {
        let client = unconfigured();
        for (module, day, time) in [("Canteen", "Monday", "12:30"), ("", "", "")] {
            let result = client.predict_crowd(module, day, time, "").await;
            assert_eq!(
                result,
                PredictionResult {
                    crowd_level: CrowdLevel::Medium,
                    estimated_wait_minutes: 15.0,
                    confidence: 0.5,
                    reasoning: "API key not configured. Using default prediction based on typical weekday patterns."
                        .to_string(),
                }
            );
        }
        assert!(!client.is_configured());
    }

    #[tokio::test]
    async fn test_forecast_demand_without_key_returns_default_items() {
        let items = unconfigured().forecast_demand("Tuesday").await;
        assert_eq!(
            items,
            vec![
                "South Indian Thali",
                "Hyderabadi Biryani",
                "Butter Masala Dosa",
                "Filtered Coffee",
                "Fresh Fruit Bowl"
            ]
        );
    }

    #[tokio::test]
    async fn test_predict_crowd_parses_well_formed_reply_verbatim() {
        let generator = FakeGenerator::replying(
            r#"{"crowdLevel": "High", "estimatedWaitMinutes": 42.5, "confidence": 1.7, "reasoning": "Lunch rush."}"#,
        );
        let client = client_with(generator.clone());

        let result = client
            .predict_crowd("Canteen", "Friday", "13:00", "fest day")
            .await;

        assert_eq!(result.crowd_level, CrowdLevel::High);
        assert_eq!(result.estimated_wait_minutes, 42.5);
        // Out of range, but not clamped
        assert_eq!(result.confidence, 1.7);
        assert_eq!(result.reasoning, "Lunch rush.");

        let calls = generator.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (model, prompt, schema) = &calls[0];
        assert_eq!(model, "gemini-1.5-flash");
        assert!(prompt.contains("Canteen at CMRIT campus on Friday at 13:00. Context: fest day."));
        assert_eq!(schema.as_ref().unwrap()["required"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_predict_crowd_keeps_unknown_crowd_level() {
        let client = client_with(FakeGenerator::replying(
            r#"{"crowdLevel": "Packed", "estimatedWaitMinutes": 30, "confidence": 0.8, "reasoning": "r"}"#,
        ));
        let result = client.predict_crowd("Library", "Monday", "10:00", "").await;
        assert_eq!(result.crowd_level, CrowdLevel::Other("Packed".to_string()));
        assert_eq!(result.estimated_wait_minutes, 30.0);
    }

    #[tokio::test]
    async fn test_predict_crowd_upstream_error_returns_fallback() {
        let client = client_with(FakeGenerator::failing(503));
        let result = client.predict_crowd("Canteen", "Monday", "12:30", "").await;
        assert_eq!(result, PredictionResult::fallback());
        assert_eq!(result.reasoning, FALLBACK_REASONING);
    }

    #[tokio::test]
    async fn test_predict_crowd_unparsable_reply_returns_fallback() {
        for reply in ["not json", "", "{}", r#"{"crowdLevel": "Low"}"#, "[1, 2]"] {
            let client = client_with(FakeGenerator::replying(reply));
            let result = client.predict_crowd("Canteen", "Monday", "12:30", "").await;
            assert_eq!(result, PredictionResult::fallback(), "reply: {reply:?}");
        }
    }

    #[tokio::test]
    async fn test_forecast_demand_splits_trims_and_drops_empty() {
        let generator = FakeGenerator::replying("Idli, Dosa ,  , Coffee");
        let client = client_with(generator.clone());

        let items = client.forecast_demand("Monday").await;
        assert_eq!(items, vec!["Idli", "Dosa", "Coffee"]);

        let calls = generator.calls.lock().unwrap();
        assert!(calls[0].1.contains("university canteen on Monday"));
        assert!(calls[0].2.is_none());
    }

    #[tokio::test]
    async fn test_forecast_demand_is_not_clamped_to_five() {
        let client = client_with(FakeGenerator::replying("A, B, C, D, E, F, G"));
        assert_eq!(client.forecast_demand("Saturday").await.len(), 7);

        let client = client_with(FakeGenerator::replying(""));
        assert!(client.forecast_demand("Sunday").await.is_empty());
    }

    #[tokio::test]
    async fn test_forecast_demand_upstream_error_returns_default_items() {
        let client = client_with(FakeGenerator::failing(401));
        let items = client.forecast_demand("Monday").await;
        assert_eq!(items, DEFAULT_DEMAND_ITEMS.to_vec());
    }

    #[test]
    fn test_parse_prediction_treats_empty_as_empty_object() {
        let err = parse_prediction("").unwrap_err();
        assert!(matches!(err, LlmError::Parse(_)));
    }

    #[test]
    fn test_parse_demand_items_handles_newlines_and_whitespace() {
        assert_eq!(
            parse_demand_items("  Idli\n, Vada ,Poori  "),
            vec!["Idli", "Vada", "Poori"]
        );
        assert!(parse_demand_items(" , ,").is_empty());
    }
}
