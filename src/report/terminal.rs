use super::recommendations::{Recommendations, RiskLevel};
use super::ResultsView;
use crate::api::PatientRecord;
use crate::core::{AnalysisRecord, Language};
use crate::formatting::OutputFormatter;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use std::fmt::Write;

struct Text {
    title: &'static str,
    empty: &'static str,
    recovery: &'static str,
    score: &'static str,
    band: &'static str,
    frequency: &'static str,
    stable: &'static str,
    patient: &'static str,
    age: &'static str,
    sensor: &'static str,
    organs: &'static str,
    critical: &'static str,
    stress: &'static str,
    vitamins: &'static str,
    symptoms: &'static str,
    dose: &'static str,
    foods: &'static str,
    supplement: &'static str,
    diet: &'static str,
    avoid: &'static str,
    recommended: &'static str,
    menu: &'static str,
    history_empty: &'static str,
    date: &'static str,
}

const TEXT_TR: Text = Text {
    title: "Analiz Sonuçları",
    empty: "Sonuç bulunamadı",
    recovery: "Yeni analiz başlatmak için: rezzonix scan",
    score: "Genel Skor",
    band: "Risk Durumu",
    frequency: "Frekans",
    stable: "Hz - Stabil",
    patient: "Danışan",
    age: "Yaş",
    sensor: "Sensör",
    organs: "Organ Sonuçları",
    critical: "Kritik Bulgular",
    stress: "Stres seviyesi yüksek",
    vitamins: "Vitamin & Mineral Önerileri",
    symptoms: "Semptomlar",
    dose: "Günlük Dozaj",
    foods: "Besin Kaynakları",
    supplement: "Takviye Önerisi",
    diet: "Diyet Önerileri",
    avoid: "Kaçınılması Gerekenler",
    recommended: "Önerilenler",
    menu: "Örnek Menü",
    history_empty: "Henüz analiz kaydı yok",
    date: "Tarih",
};

const TEXT_EN: Text = Text {
    title: "Analysis Results",
    empty: "No results found",
    recovery: "Start a new analysis with: rezzonix scan",
    score: "Overall Score",
    band: "Risk Status",
    frequency: "Frequency",
    stable: "Hz - Stable",
    patient: "Client",
    age: "Age",
    sensor: "Sensor",
    organs: "Organ Results",
    critical: "Critical Findings",
    stress: "High stress level",
    vitamins: "Vitamin & Mineral Suggestions",
    symptoms: "Symptoms",
    dose: "Daily Dose",
    foods: "Food Sources",
    supplement: "Supplement",
    diet: "Diet Suggestions",
    avoid: "Avoid",
    recommended: "Recommended",
    menu: "Sample Menu",
    history_empty: "No analyses recorded yet",
    date: "Date",
};

fn text(lang: Language) -> &'static Text {
    match lang {
        Language::Tr => &TEXT_TR,
        Language::En => &TEXT_EN,
    }
}

pub fn render_results(view: &ResultsView<'_>, formatter: &dyn OutputFormatter, lang: Language) -> String {
    let t = text(lang);
    let mut out = String::new();
    match view {
        ResultsView::Empty => {
            let _ = writeln!(out, "{}", formatter.warning(t.empty));
            let _ = writeln!(out, "{}", formatter.dim(t.recovery));
        }
        ResultsView::Ready(record) => {
            write_summary(&mut out, record, formatter, t);
            write_results(&mut out, record, formatter, t);
            write_recommendations(&mut out, &Recommendations::for_record(record, lang), formatter, t);
        }
    }
    out
}

fn write_summary(out: &mut String, record: &AnalysisRecord, f: &dyn OutputFormatter, t: &Text) {
    let _ = writeln!(out, "{}", f.header(t.title));
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  {:<14} {} / 100",
        t.score,
        f.bold(&record.overall_score.to_string())
    );
    let _ = writeln!(out, "  {:<14} {}", t.band, f.band(&record.band, record.band_level()));
    let _ = writeln!(out, "  {:<14} {} {}", t.frequency, record.frequency, t.stable);
    let _ = writeln!(out);
    let _ = writeln!(out, "  {:<14} {}", t.patient, record.patient_name);
    if let Some(age) = record.patient_age {
        let _ = writeln!(out, "  {:<14} {}", t.age, age);
    }
    let sensor = record
        .sensor_name
        .as_deref()
        .unwrap_or_else(|| record.sensor_type.as_str());
    let _ = writeln!(out, "  {:<14} {} ({})", t.sensor, sensor, record.sensor_type);
    let _ = writeln!(out);
}

fn write_results(out: &mut String, record: &AnalysisRecord, f: &dyn OutputFormatter, t: &Text) {
    let _ = writeln!(out, "{}", f.header(t.organs));
    for result in &record.results {
        let stress = format!("{}/10", result.stress);
        let stress = if result.is_critical() {
            f.error(&stress)
        } else if result.stress > 3 {
            f.warning(&stress)
        } else {
            f.success(&stress)
        };
        let _ = writeln!(
            out,
            "  {:<16} {:>3}  {}  {}",
            result.organ,
            result.score,
            stress,
            f.dim(&result.note)
        );
    }
    let _ = writeln!(out);
}

fn write_recommendations(out: &mut String, recs: &Recommendations, f: &dyn OutputFormatter, t: &Text) {
    if !recs.critical.is_empty() {
        let _ = writeln!(out, "{}", f.error(t.critical));
        for result in &recs.critical {
            let _ = writeln!(
                out,
                "  • {}: {} ({}/10). {}",
                f.bold(&result.organ),
                t.stress,
                result.stress,
                result.note
            );
        }
        let _ = writeln!(out);
    }

    if !recs.deficiencies.is_empty() {
        let _ = writeln!(out, "{}", f.header(t.vitamins));
        for info in &recs.deficiencies {
            let name = match info.risk {
                RiskLevel::High => f.error(info.name),
                RiskLevel::Medium => f.warning(info.name),
            };
            let _ = writeln!(out, "  {}", name);
            let _ = writeln!(out, "    {}: {}", t.symptoms, info.symptoms.join(", "));
            let _ = writeln!(out, "    {}: {}", t.dose, info.daily_dose);
            let _ = writeln!(out, "    {}: {}", t.foods, info.foods.join(", "));
            let _ = writeln!(out, "    {}: {}", t.supplement, info.supplement);
        }
        let _ = writeln!(out);
    }

    if !recs.diet_plans.is_empty() {
        let _ = writeln!(out, "{}", f.header(t.diet));
        for plan in &recs.diet_plans {
            let _ = writeln!(out, "  {}", f.bold(plan.title));
            let _ = writeln!(out, "    {}: {}", t.avoid, plan.avoid.join(", "));
            let _ = writeln!(out, "    {}: {}", t.recommended, plan.recommended.join(", "));
            let _ = writeln!(out, "    {}:", t.menu);
            for meal in plan.meals {
                let _ = writeln!(out, "      - {}", meal);
            }
        }
        let _ = writeln!(out);
    }
}

pub fn render_history(records: &[AnalysisRecord], formatter: &dyn OutputFormatter, lang: Language) -> String {
    let t = text(lang);
    if records.is_empty() {
        return format!("{}\n", formatter.dim(t.history_empty));
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", t.patient, t.date, t.score, t.band, t.sensor]);
    for record in records {
        table.add_row(vec![
            Cell::new(&record.id),
            Cell::new(&record.patient_name),
            Cell::new(record.created_at.format("%Y-%m-%d %H:%M")),
            Cell::new(record.overall_score),
            Cell::new(&record.band),
            Cell::new(record.sensor_name.as_deref().unwrap_or(record.sensor_type.as_str())),
        ]);
    }
    format!("{}\n", table)
}

pub fn render_patients(patients: &[PatientRecord], lang: Language) -> String {
    let t = text(lang);
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["ID", t.patient, t.age, t.date]);
    for patient in patients {
        table.add_row(vec![
            Cell::new(&patient.id),
            Cell::new(&patient.name),
            Cell::new(patient.age.map(|a| a.to_string()).unwrap_or_default()),
            Cell::new(patient.created_at.format("%Y-%m-%d %H:%M")),
        ]);
    }
    format!("{}\n", table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatting::PlainFormatter;
    use crate::report::tests_support::sample_record;

    #[test]
    fn test_empty_view_offers_recovery() {
        let out = render_results(&ResultsView::Empty, &PlainFormatter, Language::En);
        assert!(out.contains("No results found"));
        assert!(out.contains("rezzonix scan"));
    }

    #[test]
    fn test_ready_view_lists_every_organ() {
        let record = sample_record();
        let out = render_results(&ResultsView::Ready(&record), &PlainFormatter, Language::Tr);
        for result in &record.results {
            assert!(out.contains(&result.organ), "missing {}", result.organ);
        }
        assert!(out.contains("Kritik Bulgular"));
        assert!(out.contains("Omega-3 Eksikliği"));
    }

    #[test]
    fn test_empty_history_message() {
        let out = render_history(&[], &PlainFormatter, Language::Tr);
        assert_eq!(out, "Henüz analiz kaydı yok\n");
    }
}
