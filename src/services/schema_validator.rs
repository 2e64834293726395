use serde_json::{Map, Value};

use crate::{
    errors::{AppError, AppResult},
    models::domain::{PersonalityTraits, Question, QuizSchema},
};

fn incomplete(message: impl Into<String>) -> AppError {
    AppError::IncompleteAiResult(message.into())
}

fn non_blank_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Checks a parsed question payload against `schema`. Any defect rejects
/// the whole payload.
pub fn validate_questions(payload: &Value, schema: &QuizSchema) -> AppResult<Vec<Question>> {
    let items = payload
        .get("questions")
        .and_then(Value::as_array)
        .ok_or_else(|| incomplete("missing 'questions' array"))?;

    if items.len() != schema.question_count {
        return Err(incomplete(format!(
            "expected {} questions, got {}",
            schema.question_count,
            items.len()
        )));
    }

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let question_text = non_blank_str(item.get("questionText"))
                .ok_or_else(|| incomplete(format!("question {} has no text", index + 1)))?;

            let options = item
                .get("options")
                .and_then(Value::as_array)
                .ok_or_else(|| incomplete(format!("question {} has no options", index + 1)))?;

            if options.len() != schema.option_count {
                return Err(incomplete(format!(
                    "question {} has {} options, expected {}",
                    index + 1,
                    options.len(),
                    schema.option_count
                )));
            }

            let options = options
                .iter()
                .map(|option| {
                    non_blank_str(Some(option)).map(str::to_string).ok_or_else(|| {
                        incomplete(format!("question {} has a blank option", index + 1))
                    })
                })
                .collect::<AppResult<Vec<_>>>()?;

            Ok(Question {
                question_text: question_text.to_string(),
                options,
            })
        })
        .collect()
}

const CREATURE_KEY: &str = "pokemonName";
const LEGACY_CREATURE_KEY: &str = "pokemon";

/// Folds the legacy `pokemon` key into `pokemonName`. A non-blank
/// `pokemonName` always wins.
fn normalize_creature_key(object: &mut Map<String, Value>) {
    let Some(legacy) = object.remove(LEGACY_CREATURE_KEY) else {
        return;
    };
    if non_blank_str(object.get(CREATURE_KEY)).is_none() {
        object.insert(CREATURE_KEY.to_string(), legacy);
    }
}

/// Checks that every key the schema requires is a non-blank string, then
/// reads the full trait set.
pub fn validate_personality(payload: &Value, schema: &QuizSchema) -> AppResult<PersonalityTraits> {
    let mut object = payload
        .as_object()
        .cloned()
        .ok_or_else(|| incomplete("result is not a JSON object"))?;
    normalize_creature_key(&mut object);

    let missing: Vec<&str> = schema
        .required_result_keys
        .iter()
        .copied()
        .filter(|key| non_blank_str(object.get(*key)).is_none())
        .collect();

    if !missing.is_empty() {
        return Err(incomplete(format!("missing fields: {}", missing.join(", "))));
    }

    serde_json::from_value(Value::Object(object))
        .map_err(|err| incomplete(format!("unreadable trait fields: {}", err)))
}
