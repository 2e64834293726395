use serde_json::{json, Map, Value};

use crate::models::{
    domain::{Question, QuestionSet, QuizSchema},
    dto::request::AnswerInput,
};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// A question set with `count` questions of `options` options each.
    pub fn question_set(custom_id: &str, count: usize, options: usize) -> QuestionSet {
        let questions = (1..=count)
            .map(|q| Question {
                question_text: format!("Question {q}?"),
                options: (1..=options).map(|o| format!("Option {q}.{o}")).collect(),
            })
            .collect();
        QuestionSet::new(custom_id, questions)
    }

    /// Model-shaped `{ "questions": [...] }` payload.
    pub fn questions_payload(count: usize, options: usize) -> Value {
        let questions: Vec<Value> = (1..=count)
            .map(|q| {
                json!({
                    "questionText": format!("Question {q}?"),
                    "options": (1..=options).map(|o| format!("Option {q}.{o}")).collect::<Vec<_>>(),
                })
            })
            .collect();
        json!({ "questions": questions })
    }

    /// Model-shaped personality payload filling every key any schema version
    /// asks for.
    pub fn personality_payload(creature: &str, roast: &str) -> Value {
        let mut object = Map::new();
        for key in QuizSchema::v2().required_result_keys {
            object.insert(key.to_string(), json!(format!("{key} value")));
        }
        object.insert("pokemonName".to_string(), json!(creature));
        object.insert("roast".to_string(), json!(roast));
        Value::Object(object)
    }

    pub fn answers(count: usize) -> Vec<AnswerInput> {
        (1..=count)
            .map(|i| AnswerInput {
                question_text: format!("Question {i}?"),
                selected_option: format!("Option {i}.1"),
            })
            .collect()
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_question_set_shape() {
        let set = question_set("abc", 15, 8);
        assert_eq!(set.questions.len(), 15);
        assert!(set.questions.iter().all(|q| q.options.len() == 8));
    }

    #[test]
    fn test_fixtures_personality_payload_overrides() {
        let payload = personality_payload("Mew", "tiny roast");
        assert_eq!(payload["pokemonName"], "Mew");
        assert_eq!(payload["roast"], "tiny roast");
        assert_eq!(payload["planet"], "planet value");
    }

    #[test]
    fn test_fixtures_answers() {
        let answers = answers(3);
        assert_eq!(answers.len(), 3);
        assert_eq!(answers[2].selected_option, "Option 3.1");
    }
}
