mod answers;
mod field;
mod phase;
mod program;

pub(crate) use answers::Assignment;
pub use answers::Answers;
pub use field::{AnswerError, AnswerValue, FieldName};
pub use phase::{Choice, Phase, Question};
pub use program::{DrugType, InsuranceType, ProgramPath, RwPrimaryStatus};
