use serde_json::{json, Value};

use crate::{
    constants::prompts::{
        QUESTION_PROMPT_GUIDELINES, QUESTION_PROMPT_INTRO, RESULT_PROMPT_INTRO,
        RESULT_PROMPT_KEY_NOTES, RESULT_PROMPT_OUTRO, VIBE_TAXONOMY,
    },
    models::{domain::QuizSchema, dto::request::AnswerInput},
};

/// Prompt asking the model for a fresh question set shaped by `schema`.
pub fn question_prompt(schema: &QuizSchema) -> String {
    let questions = schema.question_count;
    let options = schema.option_count;

    let option_lines = (0..options)
        .map(|i| {
            let letter = char::from(b'A' + (i % 26) as u8);
            format!("        \"string\"   // option {letter}")
        })
        .collect::<Vec<_>>()
        .join(",\n");

    format!(
        "{QUESTION_PROMPT_INTRO} Your task is to return a JSON object containing exactly {questions} questions. \
Each question must include a \"questionText\" and an \"options\" array of exactly {options} multiple choice answers. \
Use the provided structure strictly.

Return the data in the following JSON format:

{{
  \"questions\": [
    {{
      \"questionText\": \"string\",
      \"options\": [
{option_lines}
      ]
    }},
    ...
  ]
}}

STRICTLY: there must be exactly {questions} questions, each with exactly {options} options.

The vibe types you must use as the inspiration for the personality traits behind each option are:

{VIBE_TAXONOMY}

{QUESTION_PROMPT_GUIDELINES}"
    )
}

/// Prompt asking the model to analyse `answers` and fill every key the
/// schema requires.
pub fn result_prompt(answers: &[AnswerInput], schema: &QuizSchema) -> String {
    let serialized = Value::Array(
        answers
            .iter()
            .map(|answer| {
                json!({
                    "questionText": answer.question_text,
                    "selectedOption": answer.selected_option,
                })
            })
            .collect(),
    );

    let key_list = schema
        .required_result_keys
        .iter()
        .map(|key| match *key {
            "briefDescription" => format!(
                "- briefDescription: a {}-word summary of the user's overall personality",
                schema.brief_description_words
            ),
            other => format!("- {other}"),
        })
        .collect::<Vec<_>>()
        .join("\n");

    let description_rule = if schema.wants_trait_descriptions() {
        "Every *Description key holds a 1-sentence explanation of how the matching trait relates to the user's personality. Use emojis where appropriate to enhance the tone."
    } else {
        "Keep every trait value short; the briefDescription carries the explanation."
    };

    format!(
        "{RESULT_PROMPT_INTRO}

{serialized:#}

Based only on the user's selected answers, analyze their personality and return the following insights as a JSON object with these exact keys:

{key_list}

{description_rule}

{RESULT_PROMPT_KEY_NOTES}

{RESULT_PROMPT_OUTRO}"
    )
}
