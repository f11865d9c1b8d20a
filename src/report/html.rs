use crate::core::{AnalysisRecord, Language};
use anyhow::Result;
use chrono::{DateTime, Utc};
use html_escape::encode_text;
use std::io::Write;

struct Labels {
    report_title: &'static str,
    patient: &'static str,
    age: &'static str,
    score: &'static str,
    band: &'static str,
    frequency: &'static str,
    col_organ: &'static str,
    col_score: &'static str,
    col_stress: &'static str,
    col_note: &'static str,
    disclaimer_title: &'static str,
    generated: &'static str,
}

const LABELS_TR: Labels = Labels {
    report_title: "Analiz Raporu",
    patient: "Danışan",
    age: "Yaş",
    score: "Genel Skor",
    band: "Durum",
    frequency: "Frekans",
    col_organ: "Organ",
    col_score: "Skor (0-100)",
    col_stress: "Stres (0-10)",
    col_note: "Not",
    disclaimer_title: "Yasal Bildirim:",
    generated: "Oluşturulma",
};

const LABELS_EN: Labels = Labels {
    report_title: "Analysis Report",
    patient: "Client",
    age: "Age",
    score: "Overall Score",
    band: "Status",
    frequency: "Frequency",
    col_organ: "Organ",
    col_score: "Score (0-100)",
    col_stress: "Stress (0-10)",
    col_note: "Note",
    disclaimer_title: "Legal Notice:",
    generated: "Generated",
};

/// Fixed legal notice printed on every exported report.
pub fn disclaimer(lang: Language) -> &'static str {
    match lang {
        Language::Tr => {
            "Bu sistem yalnızca destekleyici analiz amaçlıdır; tanı, tedavi veya tıbbi müdahale \
             amacıyla kullanılmaz. Uygulama çıktıları klinik değerlendirme yerine geçmez."
        }
        Language::En => {
            "This system is intended for supportive analysis only; it is not used for diagnosis, \
             treatment or medical intervention. Its output does not replace clinical evaluation."
        }
    }
}

fn labels(lang: Language) -> &'static Labels {
    match lang {
        Language::Tr => &LABELS_TR,
        Language::En => &LABELS_EN,
    }
}

pub struct HtmlReportWriter<W: Write> {
    writer: W,
    template: &'static str,
    language: Language,
    generated_at: DateTime<Utc>,
}

impl<W: Write> HtmlReportWriter<W> {
    pub fn new(writer: W, language: Language) -> Self {
        Self {
            writer,
            template: include_str!("templates/report.html"),
            language,
            generated_at: Utc::now(),
        }
    }

    pub fn with_timestamp(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = generated_at;
        self
    }

    pub fn write_report(&mut self, record: &AnalysisRecord) -> Result<()> {
        let html = self.render(record);
        self.writer.write_all(html.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }

    fn render(&self, record: &AnalysisRecord) -> String {
        let l = labels(self.language);
        let age_item = record
            .patient_age
            .map(|age| {
                format!(
                    "      <div class=\"info-item\">\n        <div class=\"info-label\">{}</div>\n        <div class=\"info-value\">{}</div>\n      </div>\n",
                    l.age, age
                )
            })
            .unwrap_or_default();

        let values = [
            ("LANG", self.language.code().to_string()),
            ("REPORT_TITLE", l.report_title.to_string()),
            ("LABEL_PATIENT", l.patient.to_string()),
            ("PATIENT_NAME", encode_text(&record.patient_name).into_owned()),
            ("AGE_ITEM", age_item),
            ("LABEL_SCORE", l.score.to_string()),
            ("OVERALL_SCORE", record.overall_score.to_string()),
            ("LABEL_BAND", l.band.to_string()),
            ("BAND", encode_text(&record.band).into_owned()),
            ("LABEL_FREQUENCY", l.frequency.to_string()),
            ("FREQUENCY", record.frequency.to_string()),
            ("COL_ORGAN", l.col_organ.to_string()),
            ("COL_SCORE", l.col_score.to_string()),
            ("COL_STRESS", l.col_stress.to_string()),
            ("COL_NOTE", l.col_note.to_string()),
            ("RESULT_ROWS", result_rows(record)),
            ("DISCLAIMER_TITLE", l.disclaimer_title.to_string()),
            ("DISCLAIMER_TEXT", disclaimer(self.language).to_string()),
            (
                "GENERATED_AT",
                format!("{}: {}", l.generated, self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")),
            ),
        ];
        fill_template(self.template, &values)
    }
}

/// Render a report to a string.
pub fn render_report(record: &AnalysisRecord, language: Language) -> String {
    HtmlReportWriter::new(Vec::new(), language).render(record)
}

fn result_rows(record: &AnalysisRecord) -> String {
    record
        .results
        .iter()
        .map(|r| {
            format!(
                "        <tr>\n          <td>{}</td>\n          <td>{}</td>\n          <td>{}</td>\n          <td>{}</td>\n        </tr>\n",
                encode_text(&r.organ),
                r.score,
                r.stress,
                encode_text(&r.note)
            )
        })
        .collect()
}

/// Substitute `{{{KEY}}}` placeholders in one pass, so substituted values
/// are never scanned for placeholders themselves. Unknown keys are left in
/// place.
fn fill_template(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len() + 1024);
    let mut rest = template;
    while let Some(start) = rest.find("{{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 3..];
        let Some(end) = after.find("}}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        let key = &after[..end];
        match values.iter().find(|(k, _)| *k == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + 3 + end + 3]),
        }
        rest = &after[end + 3..];
    }
    out.push_str(rest);
    out
}
