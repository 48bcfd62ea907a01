//! End-to-end draft persistence against the file-backed store: the
//! save/recover/expire lifecycle a user actually exercises across
//! sessions.

use std::time::{Duration, Instant};

use intervue::core::draft::{
    DraftManager, DraftStore, FileDraftStore, CREATE_DRAFT_KEY, DRAFT_VERSION,
};
use intervue::core::experience::{
    validate_step, ExperienceForm, FormStep, QuestionKind, RoundResult, RoundType,
};

const HOUR_MS: i64 = 60 * 60 * 1000;
const DAY_MS: i64 = 24 * HOUR_MS;

fn filled_form() -> ExperienceForm {
    let mut form = ExperienceForm::default();
    form.company.company_name = "Initech".into();
    form.company.role = "Backend Intern".into();
    form.company.department = "Infrastructure".into();
    form.company.internship_type = "Summer".into();
    form.company.duration = "12 weeks".into();
    form.company.location = "Hybrid".into();
    form.company.application_date = "2026-02-01".into();

    form.rounds[0].round_type = Some(RoundType::OnlineAssessment);
    form.rounds[0].duration_minutes = Some(90);
    form.rounds[0].round_result = Some(RoundResult::Selected);
    form.rounds[0].overall_experience = Some(3);

    let second = form.add_round();
    form.rounds[second].round_type = Some(RoundType::Technical);
    form.rounds[second].duration_minutes = Some(60);
    form.rounds[second].round_result = Some(RoundResult::Pending);
    form.rounds[second].overall_experience = Some(4);

    form.add_question(second, QuestionKind::Technical);
    form.update_technical_question(second, 0, |q| {
        q.question = "design a rate limiter".into();
        q.topics.set_text("system design, concurrency, ");
    });

    form.resources_used.set_text("LeetCode, CS50, ");
    form.key_tips = "Talk through tradeoffs.".into();
    form.mistakes_to_avoid = "Jumping into code silently.".into();
    form
}

#[test]
fn session_to_session_roundtrip_is_deep_equal() {
    let dir = tempfile::tempdir().unwrap();
    let now_ms = 1_000_000;

    // Session one saves and exits.
    let form = filled_form();
    let mut session_one = DraftManager::new(
        FileDraftStore::new(dir.path().join("drafts")),
        CREATE_DRAFT_KEY,
    );
    assert!(session_one.manual_save(&form, now_ms));
    drop(session_one);

    // Session two reads the same key from a fresh manager.
    let mut session_two = DraftManager::new(
        FileDraftStore::new(dir.path().join("drafts")),
        CREATE_DRAFT_KEY,
    );
    let record = session_two.saved_draft(now_ms + HOUR_MS).expect("draft present");
    assert_eq!(record.form_data, form);
    assert_eq!(record.version, DRAFT_VERSION);
    assert_eq!(record.timestamp, now_ms);

    // Uncommitted two-phase text survives the trip verbatim.
    assert_eq!(record.form_data.resources_used.draft_text, "LeetCode, CS50, ");
    assert!(record.form_data.resources_used.items().is_empty());
}

#[test]
fn restored_snapshot_still_validates() {
    let dir = tempfile::tempdir().unwrap();
    let mut manager = DraftManager::new(
        FileDraftStore::new(dir.path().join("drafts")),
        CREATE_DRAFT_KEY,
    );
    manager.manual_save(&filled_form(), 5_000);

    let mut restored = manager.saved_draft(6_000).unwrap().form_data;
    assert!(validate_step(&restored, FormStep::Company));
    assert!(validate_step(&restored, FormStep::Rounds));

    restored.commit_list_fields();
    assert_eq!(restored.resources_used.items(), ["LeetCode", "CS50"]);
}

#[test]
fn stale_draft_expires_on_read_and_is_deleted_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let store_dir = dir.path().join("drafts");
    let now_ms = 365 * DAY_MS;

    let mut manager =
        DraftManager::new(FileDraftStore::new(&store_dir), CREATE_DRAFT_KEY);
    manager.manual_save(&filled_form(), now_ms - 8 * DAY_MS);

    assert!(manager.saved_draft(now_ms).is_none());
    // Lazy expiry removed the backing file, not just the in-memory view.
    let store = FileDraftStore::new(&store_dir);
    assert!(store.read(CREATE_DRAFT_KEY).unwrap().is_none());
}

#[test]
fn corrupt_file_on_disk_is_swept_without_error() {
    let dir = tempfile::tempdir().unwrap();
    let store_dir = dir.path().join("drafts");

    let store = FileDraftStore::new(&store_dir);
    store.write(CREATE_DRAFT_KEY, "{\"form_data\": 17").unwrap();

    let mut manager =
        DraftManager::new(FileDraftStore::new(&store_dir), CREATE_DRAFT_KEY);
    assert!(manager.saved_draft(0).is_none());
    assert!(store.read(CREATE_DRAFT_KEY).unwrap().is_none());
}

#[test]
fn interval_and_debounce_write_through_the_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let mut manager = DraftManager::new(
        FileDraftStore::new(dir.path().join("drafts")),
        CREATE_DRAFT_KEY,
    );

    let t0 = Instant::now();
    manager.start(t0);

    let mut form = filled_form();

    // Interval save at 5s with the then-current snapshot.
    assert!(manager
        .poll(&form, t0 + Duration::from_secs(5), 5_000)
        .is_some());

    // A later edit schedules a debounced save of the newer snapshot.
    form.key_tips = "Updated advice.".into();
    manager.note_mutation(t0 + Duration::from_millis(5_500));
    assert!(manager
        .poll(&form, t0 + Duration::from_millis(6_600), 6_600)
        .is_some());

    let record = manager.saved_draft(7_000).unwrap();
    assert_eq!(record.form_data.key_tips, "Updated advice.");
    assert_eq!(record.timestamp, 6_600);

    // Discard wipes the record; a subsequent read sees nothing.
    manager.clear();
    assert!(manager.saved_draft(7_001).is_none());
}
