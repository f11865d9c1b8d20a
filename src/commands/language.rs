use super::AppContext;
use crate::cli::LanguageAction;
use crate::core::Language;
use anyhow::{Context, Result};

pub fn handle_language(ctx: &AppContext, action: Option<LanguageAction>) -> Result<()> {
    match action.unwrap_or(LanguageAction::Show) {
        LanguageAction::Show => {
            let stored = ctx
                .preferences
                .as_ref()
                .map(|store| store.language())
                .unwrap_or_default();
            println!("{}", describe(stored));
        }
        LanguageAction::Set { language } => {
            let store = ctx
                .preferences
                .as_ref()
                .context("No configuration directory available for preferences")?;
            store.set_language(language)?;
            let message = match language {
                Language::Tr => "Dil ayarlandı: Türkçe",
                Language::En => "Language set: English",
            };
            println!("{}", ctx.formatter.success(message));
        }
    }
    Ok(())
}

fn describe(language: Language) -> String {
    let name = match language {
        Language::Tr => "Türkçe",
        Language::En => "English",
    };
    format!("{} ({})", name, language.code())
}
