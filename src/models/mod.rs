pub mod question;
pub mod session;
pub mod submission;

pub use question::{Direction, Question};
pub use session::{InstructorSession, StudentSession};
pub use submission::{coerce_answers, AnswerValue, Submission};
