use std::fmt;

use crate::errors::{AppError, AppResult};

/// Keys every schema version requires on a personality result.
pub const CORE_RESULT_KEYS: &[&str] = &["briefDescription", "pokemonName", "roast"];

const V1_RESULT_KEYS: &[&str] = &[
    "briefDescription",
    "corePersonalityArchetype",
    "element",
    "pokemonName",
    "country",
    "aestheticStyle",
    "planet",
    "timeOfDay",
    "fictionalCharacter",
    "zodiacAlignment",
    "roast",
];

const V2_RESULT_KEYS: &[&str] = &[
    "briefDescription",
    "corePersonalityArchetype",
    "corePersonalityArchetypeDescription",
    "element",
    "elementDescription",
    "pokemonName",
    "pokemonDescription",
    "country",
    "countryDescription",
    "aestheticStyle",
    "aestheticStyleDescription",
    "planet",
    "planetDescription",
    "timeOfDay",
    "timeOfDayDescription",
    "fictionalCharacter",
    "fictionalCharacterDescription",
    "zodiacAlignment",
    "zodiacAlignmentDescription",
    "roast",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaVersion {
    V1,
    V2,
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaVersion::V1 => write!(f, "1"),
            SchemaVersion::V2 => write!(f, "2"),
        }
    }
}

/// The contract the model output must satisfy. Shared by the prompt builder
/// and the validator so the two can never disagree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizSchema {
    pub version: SchemaVersion,
    pub question_count: usize,
    pub option_count: usize,
    pub brief_description_words: u16,
    pub required_result_keys: &'static [&'static str],
}

impl QuizSchema {
    /// 12 questions with 4 options each, trait names without descriptions.
    pub fn v1() -> Self {
        Self {
            version: SchemaVersion::V1,
            question_count: 12,
            option_count: 4,
            brief_description_words: 200,
            required_result_keys: V1_RESULT_KEYS,
        }
    }

    /// 15 questions with 8 options each, every trait paired with a description.
    pub fn v2() -> Self {
        Self {
            version: SchemaVersion::V2,
            question_count: 15,
            option_count: 8,
            brief_description_words: 100,
            required_result_keys: V2_RESULT_KEYS,
        }
    }

    pub fn from_version(version: &str) -> AppResult<Self> {
        match version.trim().trim_start_matches(['v', 'V']) {
            "1" => Ok(Self::v1()),
            "2" => Ok(Self::v2()),
            other => Err(AppError::ValidationError(format!(
                "Unknown quiz schema version '{}'",
                other
            ))),
        }
    }

    /// Whether the schema asks for a one-line description next to each trait.
    pub fn wants_trait_descriptions(&self) -> bool {
        self.required_result_keys
            .iter()
            .any(|key| key.ends_with("Description") && *key != "briefDescription")
    }
}

impl Default for QuizSchema {
    fn default() -> Self {
        Self::v2()
    }
}
