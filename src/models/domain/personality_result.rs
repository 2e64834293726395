use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The trait fields the model fills in. Keys follow the JSON the model is
/// asked to produce; fields the active schema does not require default to
/// empty strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalityTraits {
    pub brief_description: String,
    pub core_personality_archetype: String,
    pub core_personality_archetype_description: String,
    pub element: String,
    pub element_description: String,
    #[serde(rename = "pokemonName", alias = "pokemon")]
    pub creature_name: String,
    #[serde(rename = "pokemonDescription")]
    pub creature_description: String,
    pub country: String,
    pub country_description: String,
    pub aesthetic_style: String,
    pub aesthetic_style_description: String,
    pub planet: String,
    pub planet_description: String,
    pub time_of_day: String,
    pub time_of_day_description: String,
    pub fictional_character: String,
    pub fictional_character_description: String,
    pub zodiac_alignment: String,
    pub zodiac_alignment_description: String,
    pub roast: String,
}

/// Stored result for one quiz attempt. Replaced wholesale on every
/// successful generation for the same id.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalityResult {
    pub custom_id: String,
    #[serde(flatten)]
    pub traits: PersonalityTraits,
    #[serde(rename = "pokemonImage")]
    pub creature_image: String,
    #[serde(rename = "pokemonSlug")]
    pub creature_slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl PersonalityResult {
    pub fn new(
        custom_id: &str,
        traits: PersonalityTraits,
        creature_image: &str,
        creature_slug: &str,
    ) -> Self {
        PersonalityResult {
            custom_id: custom_id.to_string(),
            traits,
            creature_image: creature_image.to_string(),
            creature_slug: creature_slug.to_string(),
            created_at: Some(Utc::now()),
        }
    }
}
