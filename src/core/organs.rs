//! Organ catalog offered on the selection step.
//!
//! Organs are identified by a stable key (`heart`, `liver`, ...) and shown
//! by a language-dependent display name. The backend only ever sees the
//! display names, so results coming back carry localized labels;
//! [`OrganKey::from_label`] maps those back to keys.

use super::language::Language;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrganKey {
    Brain,
    Heart,
    Lung,
    Liver,
    Kidney,
    Stomach,
    Pancreas,
    Intestine,
    Thyroid,
    Spine,
    Immune,
    Circulation,
}

/// Selection offered before the user toggles anything.
pub const DEFAULT_SELECTION: [OrganKey; 3] = [OrganKey::Heart, OrganKey::Liver, OrganKey::Kidney];

impl OrganKey {
    pub const ALL: [OrganKey; 12] = [
        OrganKey::Brain,
        OrganKey::Heart,
        OrganKey::Lung,
        OrganKey::Liver,
        OrganKey::Kidney,
        OrganKey::Stomach,
        OrganKey::Pancreas,
        OrganKey::Intestine,
        OrganKey::Thyroid,
        OrganKey::Spine,
        OrganKey::Immune,
        OrganKey::Circulation,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Brain => "brain",
            Self::Heart => "heart",
            Self::Lung => "lung",
            Self::Liver => "liver",
            Self::Kidney => "kidney",
            Self::Stomach => "stomach",
            Self::Pancreas => "pancreas",
            Self::Intestine => "intestine",
            Self::Thyroid => "thyroid",
            Self::Spine => "spine",
            Self::Immune => "immune",
            Self::Circulation => "circulation",
        }
    }

    pub fn display_name(&self, lang: Language) -> &'static str {
        match (self, lang) {
            (Self::Brain, Language::Tr) => "Beyin",
            (Self::Brain, Language::En) => "Brain",
            (Self::Heart, Language::Tr) => "Kalp",
            (Self::Heart, Language::En) => "Heart",
            (Self::Lung, Language::Tr) => "Akciğer",
            (Self::Lung, Language::En) => "Lung",
            (Self::Liver, Language::Tr) => "Karaciğer",
            (Self::Liver, Language::En) => "Liver",
            (Self::Kidney, Language::Tr) => "Böbrek",
            (Self::Kidney, Language::En) => "Kidney",
            (Self::Stomach, Language::Tr) => "Mide",
            (Self::Stomach, Language::En) => "Stomach",
            (Self::Pancreas, Language::Tr) => "Pankreas",
            (Self::Pancreas, Language::En) => "Pancreas",
            (Self::Intestine, Language::Tr) => "Bağırsak",
            (Self::Intestine, Language::En) => "Intestine",
            (Self::Thyroid, Language::Tr) => "Tiroid",
            (Self::Thyroid, Language::En) => "Thyroid",
            (Self::Spine, Language::Tr) => "Omurga",
            (Self::Spine, Language::En) => "Spine",
            (Self::Immune, Language::Tr) => "Bağışıklık",
            (Self::Immune, Language::En) => "Immune System",
            (Self::Circulation, Language::Tr) => "Dolaşım",
            (Self::Circulation, Language::En) => "Circulation",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|organ| organ.key().eq_ignore_ascii_case(key))
    }

    /// Resolve a display label in any supported language back to its key.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim().to_lowercase();
        Self::ALL.into_iter().find(|organ| {
            Language::all()
                .iter()
                .any(|lang| organ.display_name(*lang).to_lowercase() == label)
        })
    }
}

impl fmt::Display for OrganKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
