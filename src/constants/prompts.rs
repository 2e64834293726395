pub const VIBE_TAXONOMY: &str = "🌿 Chill Zen – calm, peaceful, introspective
🔥 Chaotic Energy – spontaneous, loud, fun, unpredictable
🌌 Mysterious Dreamer – imaginative, deep thinker, introverted
🎨 Creative Soul – expressive, artsy, idea-oriented
🧠 Analytical Strategist – logical, planner, sharp
😎 Confident Charmer – social, smooth, magnetic
💖 Wholesome Angel – kind-hearted, supportive, warm
🌪️ Rebellious Spirit – edgy, nonconformist, bold
🌞 Golden Retriever Energy – loyal, enthusiastic, happy-go-lucky
🌧️ Melancholic Poet – sensitive, thoughtful, emotional depth";

pub const QUESTION_PROMPT_INTRO: &str = "You are an API that generates a list of personality quiz questions designed to determine a person's \"vibe\".";

pub const QUESTION_PROMPT_GUIDELINES: &str = "Guidelines:
- All questions must be casual, fun, and personality-revealing.
- Each question should cover one or more of the above personality types through its options.
- Each option must reflect a different vibe from the list above.
- Do NOT assign vibe labels in the JSON, just make sure the answers are clearly aligned in tone.
- Don't ask direct questions like \"What is your vibe?\" or \"How do you feel?\". Use creative scenarios or metaphors to draw the vibes out instead.
- The questions should be relatable and engaging, like \"If you were a character in a movie, which one would you be?\" or \"What would your ideal weekend look like?\"
- Vary the elemental associations used in the answers. Do not always pick \"air\"; fire, water, ice, dust and soil must also show up in different responses.
- Do not include explanations, markdown, comments, or extra text. Respond with only the raw JSON object.";

pub const RESULT_PROMPT_INTRO: &str = "You will receive a list of personality quiz responses as JSON objects in the following format:";

pub const RESULT_PROMPT_KEY_NOTES: &str = "Notes on specific keys:
- pokemonName: only the lowercase name of a real Pokémon, e.g. \"pikachu\".
- roast: a 10-sentence clever, slightly savage and sarcastic takedown of the user's character. Exaggerate their flaws humorously, reflect deeper psychological insights and mirror real-life behaviour with brutal honesty. Make it smart, edgy and entertaining.";

pub const RESULT_PROMPT_OUTRO: &str = "Respond with **only** the JSON object and nothing else.

RESPOND USING SIMPLE LANGUAGE ONLY, NO HIGH LEVEL VOCABULARY, NO COMPLEX SENTENCES, AND NO TECHNICAL TERMS.";
