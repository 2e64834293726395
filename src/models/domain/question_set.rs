use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub question_text: String,
    pub options: Vec<String>,
}

/// The questions generated for one quiz attempt. Written once, never updated.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSet {
    pub custom_id: String,
    pub questions: Vec<Question>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl QuestionSet {
    pub fn new(custom_id: &str, questions: Vec<Question>) -> Self {
        QuestionSet {
            custom_id: custom_id.to_string(),
            questions,
            created_at: Some(Utc::now()),
        }
    }
}
