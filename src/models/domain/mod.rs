pub mod personality_result;
pub mod question_set;
pub mod quiz_schema;
pub use personality_result::{PersonalityResult, PersonalityTraits};
pub use question_set::{Question, QuestionSet};
pub use quiz_schema::{QuizSchema, SchemaVersion};
