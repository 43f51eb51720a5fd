//! End-to-end tests for the import pipeline.
//!
//! Each test feeds pasted text through `import_text` against the shared
//! fixture documents and checks the resulting plan.

use tabplan_core::table::{Delimiter, detect_delimiter};
use tabplan_core::{
    Period, PlanDocument, ReconcileMode, Stage, WeeklyRow, import_text, parse_table, prepare_table,
    preview_matrix,
};
use tabplan_test_utils::{
    WEEK_DAYS, daily_plan, init_test_logging, monthly_plan, samples, weekly_plan, yearly_plan,
};

fn weekly_rows(document: &PlanDocument) -> &[WeeklyRow] {
    match document {
        PlanDocument::Weekly(plan) => &plan.rows,
        other => panic!("expected weekly plan, got {}", other.period()),
    }
}

fn stages(document: &PlanDocument) -> &[Stage] {
    match document {
        PlanDocument::Daily(plan) => &plan.stages,
        other => panic!("expected daily plan, got {}", other.period()),
    }
}

// -----------------------------------------------------------------------
// Tokenization
// -----------------------------------------------------------------------

#[test]
fn tab_beats_commas_and_semicolons() {
    assert_eq!(detect_delimiter("a\tb,c\nd\te,f"), Delimiter::Tab);
    assert_eq!(detect_delimiter("a,b;c\nd,e;f"), Delimiter::Comma);
}

#[test]
fn quoted_csv_decodes_commas_and_escaped_quotes() {
    let table = parse_table(samples::QUOTED_CSV_WEEK);
    assert_eq!(table.headers, vec!["Day", "Focus", "Assessment"]);
    let first = &table.rows[0];
    assert_eq!(table.value(first, "Day"), "Monday");
    assert_eq!(table.value(first, "Focus"), "Verbs, nouns");
    assert_eq!(table.value(first, "Assessment"), "Say \"hello\"");

    let escaped = parse_table("Greeting,x\n\"\"\"Hi\"\"\",y");
    assert_eq!(escaped.value(&escaped.rows[0], "Greeting"), "\"Hi\"");
}

// -----------------------------------------------------------------------
// Label-matched updates
// -----------------------------------------------------------------------

#[test]
fn label_match_updates_only_the_matching_row() {
    init_test_logging();
    let before = weekly_plan();
    let outcome = import_text("Day,Focus\nMonday,Intro to verbs", before.clone());

    assert!(outcome.matched);
    assert_eq!(outcome.report.mode, ReconcileMode::LabelMatch);
    let rows = weekly_rows(&outcome.data);
    let original = weekly_rows(&before);
    assert_eq!(rows.len(), WEEK_DAYS.len());
    assert_eq!(rows[0].focus, "Intro to verbs");
    assert_eq!(rows[0].language_target, original[0].language_target);
    assert_eq!(rows[0].extra, original[0].extra);
    assert_eq!(&rows[1..], &original[1..]);
    assert_eq!(outcome.data.extra(), before.extra());
}

#[test]
fn spreadsheet_paste_updates_several_days() {
    let outcome = import_text(samples::SPREADSHEET_WEEK, weekly_plan());
    assert!(outcome.matched);
    assert_eq!(outcome.report.matched_rows, 2);

    let rows = weekly_rows(&outcome.data);
    assert_eq!(rows[0].focus, "Intro to verbs");
    assert_eq!(rows[0].assessment, "exit ticket");
    assert_eq!(rows[2].day, "Wednesday");
    assert_eq!(rows[2].language_target, "past simple");
    assert_eq!(rows[2].assessment, "quiz");
    assert_eq!(rows[1].focus, "Tuesday review");
}

#[test]
fn daily_stages_match_case_insensitively() {
    let outcome = import_text(samples::SEMICOLON_DAILY, daily_plan());
    assert!(outcome.matched);

    let stages = stages(&outcome.data);
    assert_eq!(stages.len(), 4);
    assert_eq!(stages[0].stage, "Warm-up");
    assert_eq!(stages[0].method, "Brainstorm");
    assert_eq!(stages[0].teacher_actions, "Elicit vocabulary");
    assert_eq!(stages[0].student_actions, "Shout out words");
    assert_eq!(stages[0].assessment, "Observation");
    assert_eq!(stages[2].method, "Pair work");
    assert_eq!(stages[1].method, "TBD");
}

#[test]
fn monthly_and_yearly_use_their_own_label_fields() {
    let monthly = import_text("Phase,Topic\nweek 2,Food", monthly_plan());
    assert!(monthly.matched);
    let PlanDocument::Monthly(plan) = &monthly.data else {
        panic!("expected monthly plan");
    };
    assert_eq!(plan.rows[1].focus, "Food");
    assert_eq!(plan.rows[0].focus, "Theme 1");

    let yearly = import_text("Section\tAssessment\nTerm 3\tFinal exam", yearly_plan());
    assert!(yearly.matched);
    let PlanDocument::Yearly(plan) = &yearly.data else {
        panic!("expected yearly plan");
    };
    assert_eq!(plan.rows[2].assessment, "Final exam");
}

#[test]
fn reapplying_a_matched_import_is_idempotent() {
    let text = "Day,Focus,Assessment\nTuesday,Phonics,dictation\nsunday,Rest,none";
    let once = import_text(text, weekly_plan());
    let twice = import_text(text, once.data.clone());
    assert!(once.matched && twice.matched);
    assert_eq!(once.data, twice.data);
}

// -----------------------------------------------------------------------
// Synthesis
// -----------------------------------------------------------------------

#[test]
fn unmatched_labels_replace_rows_and_keep_notes() {
    let outcome = import_text("Day,Focus\nHoliday,Trip", weekly_plan());
    assert!(!outcome.matched);
    assert_eq!(outcome.report.mode, ReconcileMode::Semantic);
    assert_eq!(outcome.data.labels(), vec!["Holiday"]);
    assert_eq!(outcome.data.extra()["notes"], "Unit 3");
    assert!(weekly_rows(&outcome.data)[0].extra.is_empty());
}

#[test]
fn headerless_text_falls_back_to_positions() {
    let outcome = import_text(samples::HEADERLESS_DAILY, daily_plan());
    assert!(!outcome.matched);
    assert_eq!(outcome.report.mode, ReconcileMode::Positional);

    let stages = stages(&outcome.data);
    assert_eq!(
        stages[0],
        Stage {
            stage: "Warm-up".into(),
            method: "Discussion".into(),
            teacher_actions: "Ask questions".into(),
            student_actions: "Answer in pairs".into(),
            assessment: "Exit ticket".into(),
        }
    );
    assert_eq!(stages[1].student_actions, "Reflect");
    assert_eq!(stages[1].assessment, "");
}

#[test]
fn positional_weekly_rows_join_overflow_cells() {
    let outcome = import_text(
        "x,y,z,w,v\nMon,Verbs,past,quiz,homework",
        PlanDocument::empty(Period::Weekly),
    );
    let rows = weekly_rows(&outcome.data);
    assert_eq!(rows[0].day, "Mon");
    assert_eq!(rows[0].assessment, "quiz homework");
}

#[test]
fn all_blank_result_signals_raw_preview() {
    let text = "Stage,Method\n , \n,";
    let outcome = import_text(text, daily_plan());
    assert!(!outcome.matched);
    assert!(outcome.data.is_blank());
    assert!(outcome.needs_raw_preview());

    let preview = preview_matrix(text);
    assert_eq!(preview.headers, vec!["Stage", "Method"]);
    assert_eq!(preview.matrix.len(), 3);
}

#[test]
fn usable_synthesis_does_not_need_raw_preview() {
    let outcome = import_text(samples::HEADERLESS_DAILY, PlanDocument::empty(Period::Daily));
    assert!(!outcome.needs_raw_preview());
}

// -----------------------------------------------------------------------
// Split-header repair
// -----------------------------------------------------------------------

#[test]
fn split_label_header_still_matches() {
    let outcome = import_text(samples::SPLIT_HEADER_WEEK, weekly_plan());
    assert!(outcome.matched);
    let rows = weekly_rows(&outcome.data);
    assert_eq!(rows[1].day, "Tuesday");
    assert_eq!(rows[1].focus, "Phonics");
}

#[test]
fn values_behind_a_merged_header_reach_the_record() {
    // "Focus" and ":" fold into one column whose value is the second cell.
    let text = "Day,Focus,:\nMonday,,Grammar";
    let prepared = prepare_table(text);
    assert_eq!(prepared.table().headers, vec!["Day", "Focus :"]);

    let outcome = import_text(text, weekly_plan());
    assert!(outcome.matched);
    assert_eq!(weekly_rows(&outcome.data)[0].focus, "Grammar");
}
