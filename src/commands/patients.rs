use super::AppContext;
use crate::api::{HttpAnalysisClient, PatientCreate};
use crate::cli::PatientsAction;
use crate::core::{parse_age, ValidationError};
use crate::report::render_patients;
use anyhow::{Context, Result};

pub async fn handle_patients(
    ctx: &AppContext,
    client: &HttpAnalysisClient,
    action: PatientsAction,
) -> Result<()> {
    match action {
        PatientsAction::List => {
            let patients = client
                .list_patients()
                .await
                .context(ctx.text("Danışanlar alınamadı", "Could not load clients"))?;
            if patients.is_empty() {
                println!(
                    "{}",
                    ctx.formatter
                        .dim(ctx.text("Kayıtlı danışan yok", "No clients recorded"))
                );
            } else {
                print!("{}", render_patients(&patients, ctx.language));
            }
        }
        PatientsAction::Create { name, age } => {
            let request = patient_request(&name, age.as_deref().unwrap_or(""))?;
            let patient = client
                .create_patient(&request)
                .await
                .context(ctx.text("Danışan kaydedilemedi", "Could not create client"))?;
            tracing::info!(id = %patient.id, "patient created");
            println!(
                "{} {} ({})",
                ctx.formatter
                    .success(ctx.text("Danışan kaydedildi:", "Client created:")),
                patient.name,
                patient.id
            );
        }
    }
    Ok(())
}

/// Same name and age rules as the intake step
pub fn patient_request(name: &str, age_text: &str) -> Result<PatientCreate, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::NameRequired);
    }
    Ok(PatientCreate {
        name: name.to_string(),
        age: parse_age(age_text)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patient_request_validation() {
        assert_eq!(patient_request("  ", "30"), Err(ValidationError::NameRequired));
        assert!(matches!(
            patient_request("Ali", "130"),
            Err(ValidationError::InvalidAge(_))
        ));
        let request = patient_request(" Ali ", "").unwrap();
        assert_eq!(request.name, "Ali");
        assert_eq!(request.age, None);
    }
}
