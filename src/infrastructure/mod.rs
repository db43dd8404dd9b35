pub mod question_store;

pub use question_store::QuestionStore;
