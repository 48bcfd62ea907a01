//! Experience submission domain: the form snapshot, per-step validation,
//! collection editing, two-phase list fields, and prefill decoding.

pub mod fields;
pub mod prefill;
pub mod rounds;
pub mod types;
pub mod validator;

pub use fields::CommaListField;
pub use rounds::QuestionKind;
pub use types::{
    BehavioralQuestion, CompanyInfo, Difficulty, ExperienceForm, FinalResult, FormStep,
    McqSection, QuestionCategory, Round, RoundResult, RoundType, TechnicalQuestion,
};
pub use validator::{step_requirement_message, validate_step};
