use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnswerInput {
    #[validate(length(min = 1, max = 1000))]
    pub question_text: String,

    #[validate(length(min = 1, max = 1000))]
    pub selected_option: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitAnswersRequest {
    #[validate(length(min = 1, max = 50, message = "answers must be a non-empty array"), nested)]
    pub answers: Vec<AnswerInput>,
}
