// All LLM prompt templates for the Prediction module.

use serde_json::Value;

use crate::llm_client::prompts::required_object_schema;

/// Crowd prediction prompt for a campus module at a given day and time.
pub fn crowd_prompt(module: &str, day: &str, time: &str, context: &str) -> String {
    format!(
        "Predict the crowd and demand for {module} at CMRIT campus on {day} at {time}. \
         Context: {context}. Return a JSON object with: crowdLevel (Low/Medium/High), \
         estimatedWaitMinutes (number), confidence (0-1 float), and reasoning (short string)."
    )
}

/// Canteen demand forecast prompt. The model answers in free text.
pub fn demand_prompt(day: &str) -> String {
    format!(
        "List 5 high-demand food items for a university canteen on {day} considering \
         student preferences and typical college schedules. \
         Return as a plain comma-separated list."
    )
}

/// Response schema for the crowd prediction: four required fields.
pub fn crowd_response_schema() -> Value {
    required_object_schema(&[
        ("crowdLevel", "STRING"),
        ("estimatedWaitMinutes", "NUMBER"),
        ("confidence", "NUMBER"),
        ("reasoning", "STRING"),
    ])
}
