use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_MODEL_PROVIDER: &str = "openai";

// Range accepted by OpenAI-compatible completion endpoints
const TEMPERATURE_RANGE: std::ops::RangeInclusive<f64> = 0.0..=2.0;

// selects the system message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TaskType {
    #[default]
    General,
    Analysis,
    Creative,
    Technical,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::General => "general",
            TaskType::Analysis => "analysis",
            TaskType::Creative => "creative",
            TaskType::Technical => "technical",
        }
    }
}

impl From<&str> for TaskType {
    fn from(label: &str) -> Self {
        match label {
            "analysis" => TaskType::Analysis,
            "creative" => TaskType::Creative,
            "technical" => TaskType::Technical,
            // "general" and anything we don't know about
            _ => TaskType::General,
        }
    }
}

// POST /ai request body
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct QueryRequest {
    pub text: String,
    #[serde(default)]
    pub task_type: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub model_provider: Option<String>,
    #[serde(default)]
    pub temperature: Option<f64>,
}

// validated request with every default applied
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub text: String,
    pub task_type: TaskType,
    pub context: Option<String>,
    pub model_provider: String,
    pub temperature: f64,
}

impl Query {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            task_type: TaskType::General,
            context: None,
            model_provider: DEFAULT_MODEL_PROVIDER.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_task_type(mut self, task_type: TaskType) -> Self {
        self.task_type = task_type;
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        let context = context.into();
        self.context = (!context.is_empty()).then_some(context);
        self
    }

    pub fn with_model_provider(mut self, provider: impl Into<String>) -> Self {
        self.model_provider = provider.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }
}

impl TryFrom<QueryRequest> for Query {
    type Error = AppError;

    fn try_from(req: QueryRequest) -> Result<Self, Self::Error> {
        if req.text.trim().is_empty() {
            return Err(AppError::Validation("text must not be empty".to_string()));
        }

        let temperature = req.temperature.unwrap_or(DEFAULT_TEMPERATURE);
        if !TEMPERATURE_RANGE.contains(&temperature) {
            return Err(AppError::Validation(format!(
                "temperature must be between {} and {}, got {}",
                TEMPERATURE_RANGE.start(),
                TEMPERATURE_RANGE.end(),
                temperature
            )));
        }

        Ok(Query {
            text: req.text,
            task_type: req.task_type.as_deref().map(TaskType::from).unwrap_or_default(),
            context: req.context.filter(|c| !c.is_empty()),
            model_provider: req
                .model_provider
                .unwrap_or_else(|| DEFAULT_MODEL_PROVIDER.to_string()),
            temperature,
        })
    }
}

// POST /ai response body
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct AiResponse {
    pub generated_text: String,
    pub cache_hit: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(text: &str) -> QueryRequest {
        QueryRequest {
            text: text.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn unknown_task_type_falls_back_to_general() {
        assert_eq!(TaskType::from("unknown_type"), TaskType::General);
        assert_eq!(TaskType::from("General"), TaskType::General);
        assert_eq!(TaskType::from("technical"), TaskType::Technical);
    }

    #[test]
    fn defaults_are_applied() {
        let query = Query::try_from(request("hi")).unwrap();
        assert_eq!(query.task_type, TaskType::General);
        assert_eq!(query.context, None);
        assert_eq!(query.model_provider, "openai");
        assert_eq!(query.temperature, 0.7);
    }

    #[test]
    fn empty_context_is_treated_as_absent() {
        let mut req = request("hi");
        req.context = Some(String::new());
        assert_eq!(Query::try_from(req).unwrap().context, None);
    }

    #[test]
    fn blank_text_is_rejected() {
        for text in ["", "   ", "\n\t"] {
            let err = Query::try_from(request(text)).unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "{text:?}");
        }
    }

    #[test]
    fn out_of_range_temperature_is_rejected() {
        let mut req = request("hi");
        req.temperature = Some(2.5);
        assert!(matches!(
            Query::try_from(req),
            Err(AppError::Validation(_))
        ));

        let mut req = request("hi");
        req.temperature = Some(-0.1);
        assert!(Query::try_from(req).is_err());
    }

    #[test]
    fn payload_deserializes_with_optional_fields_missing() {
        let req: QueryRequest = serde_json::from_str(r#"{"text":"hi","task_type":"general"}"#).unwrap();
        assert_eq!(req.task_type.as_deref(), Some("general"));
        assert_eq!(req.temperature, None);
    }
}
