//! Experience Form Domain Types
//!
//! Defines the core domain types for the guided experience-submission form:
//! - [`ExperienceForm`]: the single in-progress submission snapshot
//! - [`Round`] and its question collections
//! - [`FormStep`]: the four-step navigation state
//!
//! # Architecture
//!
//! The form uses a state machine pattern where each step collects specific
//! data and transitions forward only when the current step validates (see
//! [`crate::core::experience::validator`]). The [`ExperienceForm`] accumulates
//! data from all steps and is the unit of draft persistence: both save paths
//! in [`crate::core::draft`] serialize the whole snapshot.
//!
//! # Serialization
//!
//! All types implement `Serialize` and `Deserialize` for draft persistence
//! and the submission payload transform.

use serde::{Deserialize, Serialize};

use super::fields::CommaListField;

// ============================================================================
// Company Step Types
// ============================================================================

/// Company and position details collected in step 1.
///
/// The first seven fields are required (non-blank) for the step to validate;
/// `city`, `stipend`, and `currency` are optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub company_name: String,
    pub role: String,
    pub department: String,
    pub internship_type: String,
    pub duration: String,
    pub location: String,
    pub application_date: String,
    pub city: Option<String>,
    pub stipend: Option<String>,
    pub currency: Option<String>,
}

// ============================================================================
// Round Types
// ============================================================================

/// Kind of interview round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundType {
    OnlineAssessment,
    Technical,
    SystemDesign,
    Hr,
    GroupDiscussion,
    Managerial,
}

impl RoundType {
    pub const ALL: [RoundType; 6] = [
        RoundType::OnlineAssessment,
        RoundType::Technical,
        RoundType::SystemDesign,
        RoundType::Hr,
        RoundType::GroupDiscussion,
        RoundType::Managerial,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RoundType::OnlineAssessment => "Online Assessment",
            RoundType::Technical => "Technical",
            RoundType::SystemDesign => "System Design",
            RoundType::Hr => "HR",
            RoundType::GroupDiscussion => "Group Discussion",
            RoundType::Managerial => "Managerial",
        }
    }
}

/// Question difficulty rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Medium
    }
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Category of a behavioral question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionCategory {
    Leadership,
    Teamwork,
    ConflictResolution,
    ProblemSolving,
    Situational,
    Personal,
}

impl Default for QuestionCategory {
    fn default() -> Self {
        QuestionCategory::Personal
    }
}

impl QuestionCategory {
    pub const ALL: [QuestionCategory; 6] = [
        QuestionCategory::Leadership,
        QuestionCategory::Teamwork,
        QuestionCategory::ConflictResolution,
        QuestionCategory::ProblemSolving,
        QuestionCategory::Situational,
        QuestionCategory::Personal,
    ];

    pub fn label(self) -> &'static str {
        match self {
            QuestionCategory::Leadership => "Leadership",
            QuestionCategory::Teamwork => "Teamwork",
            QuestionCategory::ConflictResolution => "Conflict Resolution",
            QuestionCategory::ProblemSolving => "Problem Solving",
            QuestionCategory::Situational => "Situational",
            QuestionCategory::Personal => "Personal",
        }
    }
}

/// Outcome of a single round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundResult {
    Selected,
    Rejected,
    Pending,
    Waitlisted,
}

impl RoundResult {
    pub const ALL: [RoundResult; 4] = [
        RoundResult::Selected,
        RoundResult::Rejected,
        RoundResult::Pending,
        RoundResult::Waitlisted,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RoundResult::Selected => "Selected",
            RoundResult::Rejected => "Rejected",
            RoundResult::Pending => "Pending",
            RoundResult::Waitlisted => "Waitlisted",
        }
    }
}

/// Final outcome of the whole process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalResult {
    Selected,
    Rejected,
    Pending,
    Withdrew,
}

impl FinalResult {
    pub const ALL: [FinalResult; 4] = [
        FinalResult::Selected,
        FinalResult::Rejected,
        FinalResult::Pending,
        FinalResult::Withdrew,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FinalResult::Selected => "Selected",
            FinalResult::Rejected => "Rejected",
            FinalResult::Pending => "Pending",
            FinalResult::Withdrew => "Withdrew",
        }
    }
}

/// A coding/technical question asked in a round.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TechnicalQuestion {
    pub question: String,
    pub difficulty: Difficulty,
    pub topics: CommaListField,
    pub leetcode_link: Option<String>,
    pub solution: Option<String>,
    pub time_given_minutes: Option<u32>,
}

/// A behavioral/HR question asked in a round.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BehavioralQuestion {
    pub question: String,
    pub category: QuestionCategory,
    pub your_answer: Option<String>,
}

/// Optional MCQ/aptitude section attached to a round.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct McqSection {
    pub total_questions: Option<u32>,
    pub time_limit_minutes: Option<u32>,
    pub topics: CommaListField,
    pub difficulty: Difficulty,
    pub cutoff: Option<String>,
}

/// One interview round.
///
/// `round_number` always equals the round's 1-based position in
/// [`ExperienceForm::rounds`]; it is re-derived whenever a round is removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub round_number: u32,
    pub round_type: Option<RoundType>,
    pub duration_minutes: Option<u32>,
    pub platform: Option<String>,
    pub technical_questions: Vec<TechnicalQuestion>,
    pub behavioral_questions: Vec<BehavioralQuestion>,
    pub mcq_section: Option<McqSection>,
    pub round_result: Option<RoundResult>,
    /// Rating of the round, 1-5.
    pub overall_experience: Option<u8>,
    pub tips: String,
    pub feedback: Option<String>,
}

impl Round {
    /// A fresh round at the given 1-based position.
    pub fn numbered(number: u32) -> Self {
        Self {
            round_number: number,
            round_type: None,
            duration_minutes: None,
            platform: None,
            technical_questions: Vec::new(),
            behavioral_questions: Vec::new(),
            mcq_section: None,
            round_result: None,
            overall_experience: None,
            tips: String::new(),
            feedback: None,
        }
    }
}

// ============================================================================
// ExperienceForm - The Snapshot
// ============================================================================

/// The single source of truth for an in-progress submission.
///
/// Every mutation goes through this snapshot; the draft manager serializes
/// it wholesale on both save paths, and the validator reads it without
/// side effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceForm {
    pub company: CompanyInfo,
    /// Never empty; see [`Round::round_number`] for the ordering invariant.
    pub rounds: Vec<Round>,
    /// Overall rating of the whole process, 1-5.
    pub overall_rating: Option<u8>,
    /// Free-text narrative of the overall experience.
    pub overall_experience: String,
    pub final_result: Option<FinalResult>,
    pub would_recommend: Option<bool>,
    /// Preparation time in weeks; zero is a valid answer, absent is not.
    pub preparation_time_weeks: Option<u32>,
    pub resources_used: CommaListField,
    pub key_tips: String,
    pub mistakes_to_avoid: String,
    pub is_anonymous: bool,
}

impl Default for ExperienceForm {
    fn default() -> Self {
        Self {
            company: CompanyInfo::default(),
            rounds: vec![Round::numbered(1)],
            overall_rating: None,
            overall_experience: String::new(),
            final_result: None,
            would_recommend: None,
            preparation_time_weeks: None,
            resources_used: CommaListField::default(),
            key_tips: String::new(),
            mistakes_to_avoid: String::new(),
            is_anonymous: false,
        }
    }
}

impl ExperienceForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit every two-phase list field, as happens before submission.
    pub fn commit_list_fields(&mut self) {
        self.resources_used.commit();
        for round in &mut self.rounds {
            for question in &mut round.technical_questions {
                question.topics.commit();
            }
            if let Some(mcq) = &mut round.mcq_section {
                mcq.topics.commit();
            }
        }
    }
}

// ============================================================================
// FormStep - Navigation State
// ============================================================================

/// The four steps of the guided form.
///
/// Navigation is monotone: forward transitions are gated by the step
/// validator, backward transitions are always allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormStep {
    Company,
    Rounds,
    Reflection,
    Review,
}

impl FormStep {
    pub const ALL: [FormStep; 4] = [
        FormStep::Company,
        FormStep::Rounds,
        FormStep::Reflection,
        FormStep::Review,
    ];

    /// 1-based step number for display.
    pub fn number(self) -> u8 {
        match self {
            FormStep::Company => 1,
            FormStep::Rounds => 2,
            FormStep::Reflection => 3,
            FormStep::Review => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormStep::Company => "Company & Role",
            FormStep::Rounds => "Interview Rounds",
            FormStep::Reflection => "Overall Reflection",
            FormStep::Review => "Review & Submit",
        }
    }

    pub fn next(self) -> Option<FormStep> {
        match self {
            FormStep::Company => Some(FormStep::Rounds),
            FormStep::Rounds => Some(FormStep::Reflection),
            FormStep::Reflection => Some(FormStep::Review),
            FormStep::Review => None,
        }
    }

    pub fn previous(self) -> Option<FormStep> {
        match self {
            FormStep::Company => None,
            FormStep::Rounds => Some(FormStep::Company),
            FormStep::Reflection => Some(FormStep::Rounds),
            FormStep::Review => Some(FormStep::Reflection),
        }
    }
}

/// Cycle through an enum's values: `None` selects the first entry, the last
/// entry wraps to the first.
pub fn cycle<T: Copy + PartialEq>(all: &[T], current: Option<T>, forward: bool) -> Option<T> {
    if all.is_empty() {
        return None;
    }
    let idx = match current.and_then(|c| all.iter().position(|&v| v == c)) {
        Some(i) if forward => (i + 1) % all.len(),
        Some(i) => (i + all.len() - 1) % all.len(),
        None if forward => 0,
        None => all.len() - 1,
    };
    Some(all[idx])
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_form_has_one_round() {
        let form = ExperienceForm::default();
        assert_eq!(form.rounds.len(), 1);
        assert_eq!(form.rounds[0].round_number, 1);
    }

    #[test]
    fn test_step_navigation_order() {
        assert_eq!(FormStep::Company.next(), Some(FormStep::Rounds));
        assert_eq!(FormStep::Review.next(), None);
        assert_eq!(FormStep::Company.previous(), None);
        assert_eq!(FormStep::Review.previous(), Some(FormStep::Reflection));
    }

    #[test]
    fn test_step_numbers_are_one_based() {
        for (i, step) in FormStep::ALL.iter().enumerate() {
            assert_eq!(step.number() as usize, i + 1);
        }
    }

    #[test]
    fn test_cycle_from_none_selects_ends() {
        assert_eq!(
            cycle(&Difficulty::ALL, None, true),
            Some(Difficulty::Easy)
        );
        assert_eq!(
            cycle(&Difficulty::ALL, None, false),
            Some(Difficulty::Hard)
        );
    }

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(
            cycle(&Difficulty::ALL, Some(Difficulty::Hard), true),
            Some(Difficulty::Easy)
        );
        assert_eq!(
            cycle(&Difficulty::ALL, Some(Difficulty::Easy), false),
            Some(Difficulty::Hard)
        );
    }

    #[test]
    fn test_commit_list_fields_reaches_nested_topics() {
        let mut form = ExperienceForm::default();
        form.resources_used.set_text("LeetCode, GFG, ");
        form.rounds[0]
            .technical_questions
            .push(TechnicalQuestion::default());
        form.rounds[0].technical_questions[0]
            .topics
            .set_text("arrays, dp");
        form.rounds[0].mcq_section = Some(McqSection::default());
        if let Some(mcq) = &mut form.rounds[0].mcq_section {
            mcq.topics.set_text("aptitude,");
        }

        form.commit_list_fields();

        assert_eq!(form.resources_used.items(), ["LeetCode", "GFG"]);
        assert_eq!(
            form.rounds[0].technical_questions[0].topics.items(),
            ["arrays", "dp"]
        );
        assert_eq!(
            form.rounds[0].mcq_section.as_ref().unwrap().topics.items(),
            ["aptitude"]
        );
    }

    #[test]
    fn test_form_snapshot_json_roundtrip() {
        let mut form = ExperienceForm::default();
        form.company.company_name = "Acme".into();
        form.rounds[0].round_type = Some(RoundType::Technical);
        form.rounds[0].overall_experience = Some(4);

        let json = serde_json::to_string(&form).unwrap();
        let back: ExperienceForm = serde_json::from_str(&json).unwrap();
        assert_eq!(back, form);
    }
}
