//! Plan document shapes for the four periods.
//!
//! A daily plan is a sequence of [`Stage`] records. Weekly, monthly and
//! yearly plans are sequences of rows that differ only in the name of their
//! label field (`day`, `phase`, `section`). Every record always carries all
//! of its schema fields; absent values are empty strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::PlanDocumentError;
use crate::headers::FieldTag;

/// Which schema a plan document follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Period {
    pub const ALL: [Period; 4] = [Self::Daily, Self::Weekly, Self::Monthly, Self::Yearly];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// Name of the identifying field of this period's records.
    pub fn label_field(self) -> &'static str {
        match self {
            Self::Daily => Stage::LABEL_FIELD,
            Self::Weekly => WeeklyRow::LABEL_FIELD,
            Self::Monthly => MonthlyRow::LABEL_FIELD,
            Self::Yearly => YearlyRow::LABEL_FIELD,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = PlanDocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            _ => Err(PlanDocumentError::UnknownPeriod(s.to_owned())),
        }
    }
}

/// Behaviour shared by every record shape a plan can hold.
pub trait PlanRecord: Default {
    /// Wire name of the identifying field.
    const LABEL_FIELD: &'static str;

    /// Current value of the identifying field.
    fn label(&self) -> &str;

    /// Overwrite the field carrying `tag` with `value`.
    ///
    /// Returns `false` (and changes nothing) when this shape has no field
    /// for `tag`, e.g. `method` on a weekly row.
    fn set_tagged(&mut self, tag: FieldTag, value: &str) -> bool;

    /// Build a record from cell values in slot order. Values past the last
    /// slot are joined with single spaces into the final slot.
    fn from_positional(values: &[&str]) -> Self;

    /// Whether every schema field is empty or whitespace.
    fn is_blank(&self) -> bool;
}

fn slot(values: &[&str], index: usize) -> String {
    values.get(index).map(|v| (*v).to_owned()).unwrap_or_default()
}

fn overflow(values: &[&str], from: usize) -> String {
    values.get(from..).map(|rest| rest.join(" ")).unwrap_or_default()
}

fn all_blank(fields: &[&str]) -> bool {
    fields.iter().all(|f| f.trim().is_empty())
}

/// One stage of a daily lesson.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Stage {
    pub stage: String,
    pub method: String,
    pub teacher_actions: String,
    pub student_actions: String,
    pub assessment: String,
}

impl PlanRecord for Stage {
    const LABEL_FIELD: &'static str = "stage";

    fn label(&self) -> &str {
        &self.stage
    }

    fn set_tagged(&mut self, tag: FieldTag, value: &str) -> bool {
        let field = match tag {
            FieldTag::Label => &mut self.stage,
            FieldTag::Method => &mut self.method,
            FieldTag::TeacherActions => &mut self.teacher_actions,
            FieldTag::StudentActions => &mut self.student_actions,
            FieldTag::Assessment => &mut self.assessment,
            FieldTag::Focus | FieldTag::LanguageTarget => return false,
        };
        value.clone_into(field);
        true
    }

    fn from_positional(values: &[&str]) -> Self {
        Self {
            stage: slot(values, 0),
            method: slot(values, 1),
            teacher_actions: slot(values, 2),
            student_actions: slot(values, 3),
            assessment: overflow(values, 4),
        }
    }

    fn is_blank(&self) -> bool {
        all_blank(&[
            self.stage.as_str(),
            self.method.as_str(),
            self.teacher_actions.as_str(),
            self.student_actions.as_str(),
            self.assessment.as_str(),
        ])
    }
}

macro_rules! period_row {
    ($(#[$meta:meta])* $name:ident, $label:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase", default)]
        pub struct $name {
            pub $label: String,
            pub focus: String,
            pub language_target: String,
            pub assessment: String,
            /// Caller-defined columns, carried through untouched.
            #[serde(flatten)]
            pub extra: Map<String, Value>,
        }

        impl PlanRecord for $name {
            const LABEL_FIELD: &'static str = stringify!($label);

            fn label(&self) -> &str {
                &self.$label
            }

            fn set_tagged(&mut self, tag: FieldTag, value: &str) -> bool {
                let field = match tag {
                    FieldTag::Label => &mut self.$label,
                    FieldTag::Focus => &mut self.focus,
                    FieldTag::LanguageTarget => &mut self.language_target,
                    FieldTag::Assessment => &mut self.assessment,
                    FieldTag::TeacherActions | FieldTag::StudentActions | FieldTag::Method => {
                        return false;
                    }
                };
                value.clone_into(field);
                true
            }

            fn from_positional(values: &[&str]) -> Self {
                Self {
                    $label: slot(values, 0),
                    focus: slot(values, 1),
                    language_target: slot(values, 2),
                    assessment: overflow(values, 3),
                    extra: Map::new(),
                }
            }

            fn is_blank(&self) -> bool {
                all_blank(&[
                    self.$label.as_str(),
                    self.focus.as_str(),
                    self.language_target.as_str(),
                    self.assessment.as_str(),
                ])
            }
        }
    };
}

period_row!(
    /// One day of a weekly plan.
    WeeklyRow,
    day
);
period_row!(
    /// One phase of a monthly plan.
    MonthlyRow,
    phase
);
period_row!(
    /// One section of a yearly plan.
    YearlyRow,
    section
);

/// A daily plan: ordered stages plus any other top-level fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyPlan {
    #[serde(default)]
    pub stages: Vec<Stage>,
    /// Top-level fields other than `stages` (notes, titles, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A weekly, monthly or yearly plan: ordered rows plus any other top-level
/// fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodPlan<R> {
    #[serde(default = "Vec::new")]
    pub rows: Vec<R>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl<R> Default for PeriodPlan<R> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            extra: Map::new(),
        }
    }
}

pub type WeeklyPlan = PeriodPlan<WeeklyRow>;
pub type MonthlyPlan = PeriodPlan<MonthlyRow>;
pub type YearlyPlan = PeriodPlan<YearlyRow>;

/// A plan document of any period.
///
/// Serializes as the bare inner document; the period is known from context.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PlanDocument {
    Daily(DailyPlan),
    Weekly(WeeklyPlan),
    Monthly(MonthlyPlan),
    Yearly(YearlyPlan),
}

impl PlanDocument {
    /// A document for `period` with no records.
    pub fn empty(period: Period) -> Self {
        match period {
            Period::Daily => Self::Daily(DailyPlan::default()),
            Period::Weekly => Self::Weekly(WeeklyPlan::default()),
            Period::Monthly => Self::Monthly(MonthlyPlan::default()),
            Period::Yearly => Self::Yearly(YearlyPlan::default()),
        }
    }

    /// Decode a JSON value as a document of `period`.
    pub fn from_value(period: Period, value: Value) -> Result<Self, PlanDocumentError> {
        let invalid = |source| PlanDocumentError::InvalidDocument { period, source };
        Ok(match period {
            Period::Daily => Self::Daily(serde_json::from_value(value).map_err(invalid)?),
            Period::Weekly => Self::Weekly(serde_json::from_value(value).map_err(invalid)?),
            Period::Monthly => Self::Monthly(serde_json::from_value(value).map_err(invalid)?),
            Period::Yearly => Self::Yearly(serde_json::from_value(value).map_err(invalid)?),
        })
    }

    /// Decode a JSON string as a document of `period`.
    pub fn from_json_str(period: Period, json: &str) -> Result<Self, PlanDocumentError> {
        let value = serde_json::from_str(json)
            .map_err(|source| PlanDocumentError::InvalidDocument { period, source })?;
        Self::from_value(period, value)
    }

    pub fn period(&self) -> Period {
        match self {
            Self::Daily(_) => Period::Daily,
            Self::Weekly(_) => Period::Weekly,
            Self::Monthly(_) => Period::Monthly,
            Self::Yearly(_) => Period::Yearly,
        }
    }

    /// Number of stages or rows.
    pub fn record_count(&self) -> usize {
        match self {
            Self::Daily(plan) => plan.stages.len(),
            Self::Weekly(plan) => plan.rows.len(),
            Self::Monthly(plan) => plan.rows.len(),
            Self::Yearly(plan) => plan.rows.len(),
        }
    }

    /// Label field values in record order.
    pub fn labels(&self) -> Vec<&str> {
        fn of<R: PlanRecord>(records: &[R]) -> Vec<&str> {
            records.iter().map(|r| r.label()).collect()
        }
        match self {
            Self::Daily(plan) => of(&plan.stages),
            Self::Weekly(plan) => of(&plan.rows),
            Self::Monthly(plan) => of(&plan.rows),
            Self::Yearly(plan) => of(&plan.rows),
        }
    }

    /// Whether every field of every record is empty or whitespace.
    ///
    /// A document with no records is blank.
    pub fn is_blank(&self) -> bool {
        fn all<R: PlanRecord>(records: &[R]) -> bool {
            records.iter().all(PlanRecord::is_blank)
        }
        match self {
            Self::Daily(plan) => all(&plan.stages),
            Self::Weekly(plan) => all(&plan.rows),
            Self::Monthly(plan) => all(&plan.rows),
            Self::Yearly(plan) => all(&plan.rows),
        }
    }

    /// Top-level fields other than the record sequence.
    pub fn extra(&self) -> &Map<String, Value> {
        match self {
            Self::Daily(plan) => &plan.extra,
            Self::Weekly(plan) => &plan.extra,
            Self::Monthly(plan) => &plan.extra,
            Self::Yearly(plan) => &plan.extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn period_parses_case_insensitively() {
        assert_eq!("Weekly".parse::<Period>().unwrap(), Period::Weekly);
        assert_eq!(" yearly ".parse::<Period>().unwrap(), Period::Yearly);
        let err = "hourly".parse::<Period>().unwrap_err();
        assert!(err.to_string().contains("hourly"), "unexpected error: {err}");
    }

    #[test]
    fn label_fields_per_period() {
        let fields: Vec<&str> = Period::ALL.iter().map(|p| p.label_field()).collect();
        assert_eq!(fields, vec!["stage", "day", "phase", "section"]);
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let stage: Stage = serde_json::from_value(json!({"stage": "Warm-up"})).unwrap();
        assert_eq!(stage.stage, "Warm-up");
        assert_eq!(stage.teacher_actions, "");

        let row: MonthlyRow = serde_json::from_value(json!({"phase": "Week 1"})).unwrap();
        assert_eq!(row.phase, "Week 1");
        assert_eq!(row.language_target, "");
    }

    #[test]
    fn serialization_always_writes_every_field() {
        let json = serde_json::to_value(Stage::default()).unwrap();
        assert_eq!(
            json,
            json!({
                "stage": "",
                "method": "",
                "teacherActions": "",
                "studentActions": "",
                "assessment": ""
            })
        );

        let json = serde_json::to_value(YearlyRow::default()).unwrap();
        assert_eq!(
            json,
            json!({"section": "", "focus": "", "languageTarget": "", "assessment": ""})
        );
    }

    #[test]
    fn extra_row_columns_round_trip() {
        let value = json!({"day": "Monday", "focus": "Verbs", "homework": "p. 12"});
        let row: WeeklyRow = serde_json::from_value(value).unwrap();
        assert_eq!(row.extra.get("homework"), Some(&json!("p. 12")));
        let back = serde_json::to_value(&row).unwrap();
        assert_eq!(back["homework"], "p. 12");
        assert_eq!(back["assessment"], "");
    }

    #[test]
    fn set_tagged_ignores_fields_outside_the_schema() {
        let mut row = WeeklyRow::default();
        assert!(row.set_tagged(FieldTag::Focus, "Verbs"));
        assert!(!row.set_tagged(FieldTag::Method, "Drill"));
        assert_eq!(row.focus, "Verbs");

        let mut stage = Stage::default();
        assert!(stage.set_tagged(FieldTag::Label, "Warm-up"));
        assert!(!stage.set_tagged(FieldTag::LanguageTarget, "past simple"));
        assert_eq!(stage, Stage { stage: "Warm-up".into(), ..Stage::default() });
    }

    #[test]
    fn positional_rows_fold_overflow_into_assessment() {
        let row = WeeklyRow::from_positional(&["Mon", "Verbs", "past", "quiz", "and", "review"]);
        assert_eq!(row.day, "Mon");
        assert_eq!(row.focus, "Verbs");
        assert_eq!(row.language_target, "past");
        assert_eq!(row.assessment, "quiz and review");

        let short = YearlyRow::from_positional(&["Term 1"]);
        assert_eq!(short.section, "Term 1");
        assert_eq!(short.assessment, "");
    }

    #[test]
    fn positional_stage_uses_five_slots() {
        let stage = Stage::from_positional(&[
            "Warm-up",
            "Discussion",
            "Ask questions",
            "Answer in pairs",
            "Exit ticket",
        ]);
        assert_eq!(stage.stage, "Warm-up");
        assert_eq!(stage.method, "Discussion");
        assert_eq!(stage.teacher_actions, "Ask questions");
        assert_eq!(stage.student_actions, "Answer in pairs");
        assert_eq!(stage.assessment, "Exit ticket");
    }

    #[test]
    fn document_decoding_preserves_top_level_fields() {
        let doc = PlanDocument::from_json_str(
            Period::Weekly,
            r#"{"rows": [{"day": "Monday"}], "notes": "bring dictionaries"}"#,
        )
        .unwrap();
        assert_eq!(doc.period(), Period::Weekly);
        assert_eq!(doc.labels(), vec!["Monday"]);
        assert_eq!(doc.extra().get("notes"), Some(&json!("bring dictionaries")));

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["notes"], "bring dictionaries");
        assert_eq!(json["rows"][0]["focus"], "");
    }

    #[test]
    fn document_decoding_reports_period_on_error() {
        let err = PlanDocument::from_json_str(Period::Daily, r#"{"stages": 5}"#).unwrap_err();
        assert!(matches!(
            err,
            PlanDocumentError::InvalidDocument {
                period: Period::Daily,
                ..
            }
        ));
        assert!(err.to_string().starts_with("invalid daily plan document"));
    }

    #[test]
    fn blank_detection() {
        assert!(PlanDocument::empty(Period::Monthly).is_blank());

        let mut plan = DailyPlan::default();
        plan.stages.push(Stage {
            stage: "  ".into(),
            ..Stage::default()
        });
        assert!(PlanDocument::Daily(plan.clone()).is_blank());

        plan.stages.push(Stage {
            assessment: "quiz".into(),
            ..Stage::default()
        });
        assert!(!PlanDocument::Daily(plan).is_blank());
    }
}
