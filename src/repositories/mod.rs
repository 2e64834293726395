pub mod personality_result_repository;
pub mod question_set_repository;

pub use personality_result_repository::{
    MongoPersonalityResultRepository, PersonalityResultRepository,
};
pub use question_set_repository::{MongoQuestionSetRepository, QuestionSetRepository};
