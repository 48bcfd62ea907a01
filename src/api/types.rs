//! Wire types for the platform REST API.
//!
//! The backend speaks camelCase JSON; these payload structs are the
//! boundary between the snapshot's domain types and the wire. The
//! submission transform commits nothing itself; callers run
//! [`ExperienceForm::commit_list_fields`] first. It only flattens
//! two-phase fields and drops blank optionals.

use serde::{Deserialize, Serialize};

use crate::core::experience::{
    BehavioralQuestion, Difficulty, ExperienceForm, FinalResult, McqSection, QuestionCategory,
    Round, RoundResult, RoundType, TechnicalQuestion,
};

fn none_if_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfoPayload {
    pub company_name: String,
    pub role: String,
    pub department: String,
    pub internship_type: String,
    pub duration: String,
    pub location: String,
    pub application_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stipend: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalQuestionPayload {
    pub question: String,
    pub difficulty: Difficulty,
    pub topics: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leetcode_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_given: Option<u32>,
}

impl TechnicalQuestionPayload {
    fn from_question(question: &TechnicalQuestion) -> Self {
        Self {
            question: question.question.trim().to_string(),
            difficulty: question.difficulty,
            topics: question.topics.items().to_vec(),
            leetcode_link: none_if_blank(&question.leetcode_link),
            solution: none_if_blank(&question.solution),
            time_given: question.time_given_minutes,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BehavioralQuestionPayload {
    pub question: String,
    pub category: QuestionCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub your_answer: Option<String>,
}

impl BehavioralQuestionPayload {
    fn from_question(question: &BehavioralQuestion) -> Self {
        Self {
            question: question.question.trim().to_string(),
            category: question.category,
            your_answer: none_if_blank(&question.your_answer),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct McqSectionPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_questions: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<u32>,
    pub topics: Vec<String>,
    pub difficulty: Difficulty,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cutoff: Option<String>,
}

impl McqSectionPayload {
    fn from_section(section: &McqSection) -> Self {
        Self {
            total_questions: section.total_questions,
            time_limit: section.time_limit_minutes,
            topics: section.topics.items().to_vec(),
            difficulty: section.difficulty,
            cutoff: none_if_blank(&section.cutoff),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundPayload {
    pub round_number: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round_type: Option<RoundType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    pub technical_questions: Vec<TechnicalQuestionPayload>,
    pub behavioral_questions: Vec<BehavioralQuestionPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mcq_section: Option<McqSectionPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round_result: Option<RoundResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_experience: Option<u8>,
    pub tips: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

impl RoundPayload {
    fn from_round(round: &Round) -> Self {
        Self {
            round_number: round.round_number,
            round_type: round.round_type,
            duration: round.duration_minutes,
            platform: none_if_blank(&round.platform),
            technical_questions: round
                .technical_questions
                .iter()
                .map(TechnicalQuestionPayload::from_question)
                .collect(),
            behavioral_questions: round
                .behavioral_questions
                .iter()
                .map(BehavioralQuestionPayload::from_question)
                .collect(),
            mcq_section: round.mcq_section.as_ref().map(McqSectionPayload::from_section),
            round_result: round.round_result,
            overall_experience: round.overall_experience,
            tips: round.tips.trim().to_string(),
            feedback: none_if_blank(&round.feedback),
        }
    }
}

/// `POST /api/experiences` body, transformed from a validated snapshot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceSubmission {
    pub company_info: CompanyInfoPayload,
    pub rounds: Vec<RoundPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_rating: Option<u8>,
    pub overall_experience: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_result: Option<FinalResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub would_recommend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preparation_time: Option<u32>,
    pub resources_used: Vec<String>,
    pub key_tips: String,
    pub mistakes_to_avoid: String,
    pub is_anonymous: bool,
}

impl ExperienceSubmission {
    /// Flatten a snapshot into the wire shape. Total: missing fields stay
    /// `None`/empty rather than panicking, since the server re-validates.
    pub fn from_form(form: &ExperienceForm) -> Self {
        let company = &form.company;
        Self {
            company_info: CompanyInfoPayload {
                company_name: company.company_name.trim().to_string(),
                role: company.role.trim().to_string(),
                department: company.department.trim().to_string(),
                internship_type: company.internship_type.trim().to_string(),
                duration: company.duration.trim().to_string(),
                location: company.location.trim().to_string(),
                application_date: company.application_date.trim().to_string(),
                city: none_if_blank(&company.city),
                stipend: none_if_blank(&company.stipend),
                currency: none_if_blank(&company.currency),
            },
            rounds: form.rounds.iter().map(RoundPayload::from_round).collect(),
            overall_rating: form.overall_rating,
            overall_experience: form.overall_experience.trim().to_string(),
            final_result: form.final_result,
            would_recommend: form.would_recommend,
            preparation_time: form.preparation_time_weeks,
            resources_used: form.resources_used.items().to_vec(),
            key_tips: form.key_tips.trim().to_string(),
            mistakes_to_avoid: form.mistakes_to_avoid.trim().to_string(),
            is_anonymous: form.is_anonymous,
        }
    }
}

/// `POST /api/companies` body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRequest {
    pub name: String,
}

/// `POST /api/experiences/:id/report` body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub reason: String,
}

/// `POST /api/experiences/:id/vote` body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub direction: VoteDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteDirection {
    Up,
    Down,
}

// ============================================================================
// Responses
// ============================================================================

/// Response to a successful create/update.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedExperience {
    pub id: String,
}

/// One entry of `GET /api/experiences`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceSummary {
    pub id: String,
    pub company_name: String,
    pub role: String,
    #[serde(default)]
    pub final_result: Option<String>,
    #[serde(default)]
    pub overall_rating: Option<u8>,
    #[serde(default)]
    pub round_count: u32,
    #[serde(default)]
    pub key_tips: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Response to a pending-company creation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingCompany {
    pub id: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::experience::RoundType;

    #[test]
    fn test_submission_flattens_committed_topics() {
        let mut form = ExperienceForm::default();
        form.add_question(0, crate::core::experience::QuestionKind::Technical);
        form.update_technical_question(0, 0, |q| {
            q.question = "two sum".into();
            q.topics.set_text("arrays, hashmap, ");
        });
        form.commit_list_fields();

        let submission = ExperienceSubmission::from_form(&form);
        assert_eq!(
            submission.rounds[0].technical_questions[0].topics,
            ["arrays", "hashmap"]
        );
    }

    #[test]
    fn test_blank_optionals_are_dropped() {
        let mut form = ExperienceForm::default();
        form.company.city = Some("  ".into());
        form.rounds[0].platform = Some(String::new());
        form.rounds[0].round_type = Some(RoundType::Hr);

        let submission = ExperienceSubmission::from_form(&form);
        assert!(submission.company_info.city.is_none());
        assert!(submission.rounds[0].platform.is_none());

        let json = serde_json::to_value(&submission).unwrap();
        assert!(json["companyInfo"].get("city").is_none());
        assert_eq!(json["rounds"][0]["roundType"], "hr");
    }

    #[test]
    fn test_submission_from_default_form_is_total() {
        // Nothing filled in: the transform must still succeed.
        let submission = ExperienceSubmission::from_form(&ExperienceForm::default());
        assert_eq!(submission.rounds.len(), 1);
        assert!(submission.overall_rating.is_none());
    }
}
