//! Shared fixtures for tabplan integration tests.
//!
//! Provides populated plan documents for every period, pasted-text samples
//! covering each delimiter and quoting style, and a test logging setup.

use serde_json::json;
use tabplan_core::{
    DailyPlan, MonthlyPlan, MonthlyRow, PlanDocument, Stage, WeeklyPlan, WeeklyRow, YearlyPlan,
    YearlyRow,
};

/// The seven day labels of [`weekly_plan`].
pub const WEEK_DAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// A weekly plan with one row per day, a distinct focus per row, an extra
/// `homework` column and a top-level `notes` field.
pub fn weekly_plan() -> PlanDocument {
    let rows = WEEK_DAYS
        .iter()
        .map(|day| {
            let mut row = WeeklyRow {
                day: (*day).to_owned(),
                focus: format!("{day} review"),
                language_target: "present simple".to_owned(),
                assessment: String::new(),
                ..WeeklyRow::default()
            };
            row.extra.insert("homework".to_owned(), json!(format!("{day} worksheet")));
            row
        })
        .collect();

    let mut plan = WeeklyPlan {
        rows,
        ..WeeklyPlan::default()
    };
    plan.extra.insert("notes".to_owned(), json!("Unit 3"));
    PlanDocument::Weekly(plan)
}

/// A daily plan with the classic four lesson stages.
pub fn daily_plan() -> PlanDocument {
    let stages = ["Warm-up", "Presentation", "Practice", "Production"]
        .iter()
        .map(|stage| Stage {
            stage: (*stage).to_owned(),
            method: "TBD".to_owned(),
            ..Stage::default()
        })
        .collect();
    let mut plan = DailyPlan {
        stages,
        ..DailyPlan::default()
    };
    plan.extra.insert("notes".to_owned(), json!("Room 12"));
    PlanDocument::Daily(plan)
}

/// A monthly plan with four weekly phases.
pub fn monthly_plan() -> PlanDocument {
    let rows = (1..=4)
        .map(|week| MonthlyRow {
            phase: format!("Week {week}"),
            focus: format!("Theme {week}"),
            ..MonthlyRow::default()
        })
        .collect();
    PlanDocument::Monthly(MonthlyPlan {
        rows,
        ..MonthlyPlan::default()
    })
}

/// A yearly plan with three term sections.
pub fn yearly_plan() -> PlanDocument {
    let rows = ["Term 1", "Term 2", "Term 3"]
        .iter()
        .map(|section| YearlyRow {
            section: (*section).to_owned(),
            ..YearlyRow::default()
        })
        .collect();
    PlanDocument::Yearly(YearlyPlan {
        rows,
        ..YearlyPlan::default()
    })
}

/// Pasted-text samples.
pub mod samples {
    /// Spreadsheet paste: tab separated, unquoted.
    pub const SPREADSHEET_WEEK: &str = "Day\tFocus\tLanguage Target\tAssessment\n\
        Monday\tIntro to verbs\tpast simple\texit ticket\n\
        Wednesday\tIrregular verbs\tpast simple\tquiz\n";

    /// CSV with a quoted comma and an escaped quote.
    pub const QUOTED_CSV_WEEK: &str = "Day,Focus,Assessment\n\
        \"Monday\",\"Verbs, nouns\",\"Say \"\"hello\"\"\"\n\
        Friday,Review,test\n";

    /// Semicolon-separated export from a European spreadsheet.
    pub const SEMICOLON_DAILY: &str = "Stage;Method;Teacher actions;Student actions;Assessment\n\
        warm-up;Brainstorm;Elicit vocabulary;Shout out words;Observation\n\
        PRACTICE;Pair work;Monitor;Complete gap fill;Peer check\n";

    /// Daily stages with no recognisable headers.
    pub const HEADERLESS_DAILY: &str = "1,2,3,4,5\n\
        Warm-up,Discussion,Ask questions,Answer in pairs,Exit ticket\n\
        Wrap-up,Plenary,Summarise,Reflect\n";

    /// Extraction artifact: the `Day:` header was split into two columns.
    pub const SPLIT_HEADER_WEEK: &str = "Day,:,Focus\n\
        ,Tuesday,Phonics\n";
}

/// Route `tracing` output to the test harness. Safe to call repeatedly.
pub fn init_test_logging() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn,tabplan_core=debug")),
        )
        .with_test_writer()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
