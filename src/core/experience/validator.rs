//! Pure per-step validation.
//!
//! [`validate_step`] is side-effect free and total: it never panics and
//! never allocates an error, it only answers whether a step's required
//! fields are complete. The navigator calls it to gate forward transitions
//! and the review step calls it again to recompute the composite; both uses
//! rely on it being idempotent.
//!
//! Validation deliberately does not report *which* field failed; the
//! navigator surfaces one message per step. Note that a round's `tips` field
//! is required by the data model but is not checked here; that asymmetry is
//! long-standing observed behavior and is preserved.

use super::types::{CompanyInfo, ExperienceForm, FormStep, Round};

/// Returns whether `step` is complete for the given snapshot.
///
/// Step 4 (review) is the recomputed conjunction of steps 1-3, never a
/// cached result.
pub fn validate_step(form: &ExperienceForm, step: FormStep) -> bool {
    match step {
        FormStep::Company => company_complete(&form.company),
        FormStep::Rounds => !form.rounds.is_empty() && form.rounds.iter().all(round_complete),
        FormStep::Reflection => reflection_complete(form),
        FormStep::Review => [FormStep::Company, FormStep::Rounds, FormStep::Reflection]
            .into_iter()
            .all(|prior| validate_step(form, prior)),
    }
}

/// The single banner message shown when a step blocks forward navigation.
pub fn step_requirement_message(step: FormStep) -> &'static str {
    match step {
        FormStep::Company => "Please fill in all required company and role fields.",
        FormStep::Rounds => {
            "Each round needs a type, a positive duration, a result, and a 1-5 experience rating."
        }
        FormStep::Reflection => {
            "Please complete the rating, result, recommendation, preparation time, key tips, and mistakes to avoid."
        }
        FormStep::Review => "Some earlier steps are incomplete. Go back and fill in the missing fields.",
    }
}

fn filled(text: &str) -> bool {
    !text.trim().is_empty()
}

fn company_complete(company: &CompanyInfo) -> bool {
    filled(&company.company_name)
        && filled(&company.role)
        && filled(&company.department)
        && filled(&company.internship_type)
        && filled(&company.duration)
        && filled(&company.location)
        && filled(&company.application_date)
}

fn round_complete(round: &Round) -> bool {
    round.round_type.is_some()
        && round.duration_minutes.is_some_and(|minutes| minutes > 0)
        && round.round_result.is_some()
        && round
            .overall_experience
            .is_some_and(|rating| (1..=5).contains(&rating))
}

fn reflection_complete(form: &ExperienceForm) -> bool {
    form.overall_rating.is_some_and(|rating| (1..=5).contains(&rating))
        && form.final_result.is_some()
        && form.would_recommend.is_some()
        && form.preparation_time_weeks.is_some()
        && filled(&form.key_tips)
        && filled(&form.mistakes_to_avoid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::experience::types::{FinalResult, RoundResult, RoundType};
    use proptest::prelude::*;
    use rstest::rstest;

    fn complete_form() -> ExperienceForm {
        let mut form = ExperienceForm::default();
        form.company = CompanyInfo {
            company_name: "Acme".into(),
            role: "SDE Intern".into(),
            department: "Platform".into(),
            internship_type: "Summer".into(),
            duration: "8 weeks".into(),
            location: "Remote".into(),
            application_date: "2026-01-15".into(),
            city: None,
            stipend: None,
            currency: None,
        };
        form.rounds[0].round_type = Some(RoundType::Technical);
        form.rounds[0].duration_minutes = Some(60);
        form.rounds[0].round_result = Some(RoundResult::Selected);
        form.rounds[0].overall_experience = Some(4);
        form.overall_rating = Some(5);
        form.final_result = Some(FinalResult::Selected);
        form.would_recommend = Some(true);
        form.preparation_time_weeks = Some(6);
        form.key_tips = "Practice DP.".into();
        form.mistakes_to_avoid = "Skipping basics.".into();
        form
    }

    #[test]
    fn test_complete_form_passes_every_step() {
        let form = complete_form();
        for step in FormStep::ALL {
            assert!(validate_step(&form, step), "step {step:?} should pass");
        }
    }

    #[test]
    fn test_company_name_alone_is_not_enough() {
        let mut form = ExperienceForm::default();
        form.company.company_name = "Acme".into();
        assert!(!validate_step(&form, FormStep::Company));
    }

    #[rstest]
    #[case::blank_role(|c: &mut CompanyInfo| c.role.clear())]
    #[case::whitespace_department(|c: &mut CompanyInfo| c.department = "   ".into())]
    #[case::missing_date(|c: &mut CompanyInfo| c.application_date.clear())]
    fn test_company_required_fields(#[case] strip: fn(&mut CompanyInfo)) {
        let mut form = complete_form();
        strip(&mut form.company);
        assert!(!validate_step(&form, FormStep::Company));
        // Composite tracks the broken step.
        assert!(!validate_step(&form, FormStep::Review));
    }

    #[test]
    fn test_optional_company_fields_are_ignored() {
        let mut form = complete_form();
        form.company.city = None;
        form.company.stipend = None;
        form.company.currency = None;
        assert!(validate_step(&form, FormStep::Company));
    }

    #[rstest]
    #[case::no_type(|r: &mut Round| r.round_type = None)]
    #[case::zero_duration(|r: &mut Round| r.duration_minutes = Some(0))]
    #[case::no_duration(|r: &mut Round| r.duration_minutes = None)]
    #[case::no_result(|r: &mut Round| r.round_result = None)]
    #[case::rating_out_of_range(|r: &mut Round| r.overall_experience = Some(6))]
    fn test_any_incomplete_round_fails_step_two(#[case] strip: fn(&mut Round)) {
        let mut form = complete_form();
        // Second, complete round; the stripped first round must still fail the step.
        let mut second = Round::numbered(2);
        second.round_type = Some(RoundType::Hr);
        second.duration_minutes = Some(30);
        second.round_result = Some(RoundResult::Pending);
        second.overall_experience = Some(3);
        form.rounds.push(second);

        strip(&mut form.rounds[0]);
        assert!(!validate_step(&form, FormStep::Rounds));
    }

    #[test]
    fn test_round_tips_not_required_by_validator() {
        let mut form = complete_form();
        form.rounds[0].tips.clear();
        assert!(validate_step(&form, FormStep::Rounds));
    }

    #[test]
    fn test_zero_preparation_time_is_valid_absent_is_not() {
        let mut form = complete_form();
        form.preparation_time_weeks = Some(0);
        assert!(validate_step(&form, FormStep::Reflection));
        form.preparation_time_weeks = None;
        assert!(!validate_step(&form, FormStep::Reflection));
    }

    #[test]
    fn test_recommendation_must_be_decided() {
        let mut form = complete_form();
        form.would_recommend = Some(false);
        assert!(validate_step(&form, FormStep::Reflection));
        form.would_recommend = None;
        assert!(!validate_step(&form, FormStep::Reflection));
    }

    proptest! {
        /// Totality: any syntactically valid snapshot yields a boolean for
        /// every step without panicking.
        #[test]
        fn prop_validate_step_never_panics(
            company_name in ".{0,40}",
            role in ".{0,40}",
            rating in proptest::option::of(0u8..=10),
            prep in proptest::option::of(0u32..=200),
            round_count in 0usize..5,
            duration in proptest::option::of(0u32..=500),
        ) {
            let mut form = ExperienceForm::default();
            form.company.company_name = company_name;
            form.company.role = role;
            form.overall_rating = rating;
            form.preparation_time_weeks = prep;
            form.rounds.clear();
            for i in 0..round_count {
                let mut round = Round::numbered(i as u32 + 1);
                round.duration_minutes = duration;
                form.rounds.push(round);
            }
            for step in FormStep::ALL {
                // Either answer is acceptable; not panicking is the property.
                let _ = validate_step(&form, step);
            }
        }

        /// Ratings outside 1-5 never validate the reflection step.
        #[test]
        fn prop_out_of_range_rating_rejected(rating in 6u8..=255) {
            let mut form = complete_form();
            form.overall_rating = Some(rating);
            prop_assert!(!validate_step(&form, FormStep::Reflection));
        }
    }
}
