//! Presentation of analysis records: terminal view, HTML export and the
//! static vitamin/diet recommendations.

pub mod html;
pub mod recommendations;
pub mod terminal;

pub use html::{disclaimer, render_report, HtmlReportWriter};
pub use recommendations::{
    category_for_organ, derive_deficiencies, needs_diet_plan, DeficiencyCategory, DietPlan,
    Recommendations, VitaminInfo,
};
pub use terminal::{render_history, render_patients, render_results};

use crate::core::AnalysisRecord;
use crate::session::SessionState;

/// What the results step can show. A session without an analysis gets the
/// empty state with a single way back, never an error.
#[derive(Debug, Clone, Copy)]
pub enum ResultsView<'a> {
    Ready(&'a AnalysisRecord),
    Empty,
}

impl<'a> ResultsView<'a> {
    pub fn from_state(state: &'a SessionState) -> Self {
        match &state.current_analysis {
            Some(record) => Self::Ready(record),
            None => Self::Empty,
        }
    }

    pub fn record(&self) -> Option<&'a AnalysisRecord> {
        match self {
            Self::Ready(record) => Some(record),
            Self::Empty => None,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests_support {
    use crate::core::{AnalysisRecord, OrganResult, SensorType};
    use chrono::{TimeZone, Utc};

    pub fn sample_record() -> AnalysisRecord {
        AnalysisRecord {
            id: "3f6c1e2a".into(),
            patient_id: "p-1".into(),
            patient_name: "Ayşe Demir".into(),
            patient_age: Some(34),
            selected_organs: vec!["Kalp".into(), "Karaciğer".into(), "Böbrek".into()],
            overall_score: 72,
            band: "Takip".into(),
            results: vec![
                OrganResult {
                    organ: "Kalp".into(),
                    score: 55,
                    stress: 8,
                    note: "Destekleyici gözlem: profesyonel değerlendirme ile birlikte takip önerilir."
                        .into(),
                },
                OrganResult {
                    organ: "Böbrek".into(),
                    score: 74,
                    stress: 5,
                    note: "Destekleyici gözlem: yaşam tarzı/uyku/su dengesi izlenebilir.".into(),
                },
                OrganResult {
                    organ: "Karaciğer".into(),
                    score: 88,
                    stress: 1,
                    note: "Destekleyici gözlem: denge takibi önerilir.".into(),
                },
            ],
            sensor_type: SensorType::Ble,
            sensor_name: Some("RezzoniX Pro Scanner".into()),
            frequency: 528,
            created_at: Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap(),
        }
    }
}
