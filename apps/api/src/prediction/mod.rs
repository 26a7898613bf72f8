// Campus crowd prediction and canteen demand forecasting.
// All LLM calls go through llm_client — no direct Gemini HTTP calls here.

pub mod handlers;
pub mod models;
pub mod predictor;
pub mod prompts;
