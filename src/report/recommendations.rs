//! Vitamin and diet suggestions derived from an analysis.
//!
//! Purely table driven. Organ labels are first resolved to catalog keys;
//! labels outside the catalog (older records, free-form organ lists) fall
//! back to keyword rules in either language.

use crate::core::{AnalysisRecord, Language, OrganKey, OrganResult};
use serde::Serialize;
use std::fmt;

/// Results above this stress level produce a deficiency suggestion.
pub const DEFICIENCY_STRESS: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DeficiencyCategory {
    #[serde(rename = "low_vitamin_d")]
    VitaminD,
    #[serde(rename = "low_vitamin_b12")]
    VitaminB12,
    #[serde(rename = "low_vitamin_c")]
    VitaminC,
    #[serde(rename = "low_iron")]
    Iron,
    #[serde(rename = "low_magnesium")]
    Magnesium,
    #[serde(rename = "low_omega3")]
    Omega3,
}

impl DeficiencyCategory {
    pub fn key(&self) -> &'static str {
        match self {
            Self::VitaminD => "low_vitamin_d",
            Self::VitaminB12 => "low_vitamin_b12",
            Self::VitaminC => "low_vitamin_c",
            Self::Iron => "low_iron",
            Self::Magnesium => "low_magnesium",
            Self::Omega3 => "low_omega3",
        }
    }
}

impl fmt::Display for DeficiencyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    High,
    Medium,
}

#[derive(Debug, Clone, Serialize)]
pub struct VitaminInfo {
    pub category: DeficiencyCategory,
    pub name: &'static str,
    pub symptoms: &'static [&'static str],
    pub daily_dose: &'static str,
    pub foods: &'static [&'static str],
    pub supplement: &'static str,
    pub risk: RiskLevel,
}

#[derive(Debug, Clone, Serialize)]
pub struct DietPlan {
    pub key: &'static str,
    pub title: &'static str,
    pub avoid: &'static [&'static str],
    pub recommended: &'static [&'static str],
    pub meals: &'static [&'static str],
}

static VITAMINS_TR: [VitaminInfo; 6] = [
    VitaminInfo {
        category: DeficiencyCategory::VitaminD,
        name: "D Vitamini Eksikliği",
        symptoms: &["Kemik ağrıları", "Kas zayıflığı", "Yorgunluk", "Depresyon"],
        daily_dose: "1000-2000 IU",
        foods: &["Yağlı balık (somon, ton)", "Yumurta sarısı", "Süt ürünleri", "Güneş ışığı"],
        supplement: "D3 formu tercih edilmelidir",
        risk: RiskLevel::High,
    },
    VitaminInfo {
        category: DeficiencyCategory::VitaminB12,
        name: "B12 Vitamini Eksikliği",
        symptoms: &["Uyuşma", "Hafıza kaybı", "Yorgunluk", "Halsizlik"],
        daily_dose: "2.4 mcg",
        foods: &["Et", "Balık", "Süt", "Yumurta", "Tahıllar"],
        supplement: "Metilkobalamin formu önerilir",
        risk: RiskLevel::High,
    },
    VitaminInfo {
        category: DeficiencyCategory::VitaminC,
        name: "C Vitamini Eksikliği",
        symptoms: &["Bağışıklık zayıflığı", "Yara iyileşmesinde gecikme", "Diş eti kanaması"],
        daily_dose: "75-90 mg",
        foods: &["Portakal", "Kivi", "Brokoli", "Çilek", "Biber"],
        supplement: "Liposomal C vitamini",
        risk: RiskLevel::Medium,
    },
    VitaminInfo {
        category: DeficiencyCategory::Iron,
        name: "Demir Eksikliği",
        symptoms: &["Anemi", "Yorgunluk", "Soluk cilt", "Nefes darlığı", "Baş dönmesi"],
        daily_dose: "8-18 mg",
        foods: &["Kırmızı et", "Ispanak", "Mercimek", "Kabak çekirdeği"],
        supplement: "Ferröz sülfat",
        risk: RiskLevel::High,
    },
    VitaminInfo {
        category: DeficiencyCategory::Magnesium,
        name: "Magnezyum Eksikliği",
        symptoms: &["Kas krampları", "Yorgunluk", "Kalp ritim bozukluğu"],
        daily_dose: "310-420 mg",
        foods: &["Kuruyemiş", "Tam tahıllar", "Yeşil yapraklı sebzeler", "Siyah çikolata"],
        supplement: "Magnezyum glisinat",
        risk: RiskLevel::Medium,
    },
    VitaminInfo {
        category: DeficiencyCategory::Omega3,
        name: "Omega-3 Eksikliği",
        symptoms: &["Kuru cilt", "Saç dökülmesi", "Konsantrasyon zorluğu", "Eklem ağrıları"],
        daily_dose: "250-500 mg EPA+DHA",
        foods: &["Yağlı balık", "Keten tohumu", "Ceviz", "Chia tohumu"],
        supplement: "Balık yağı (moleküler distile)",
        risk: RiskLevel::Medium,
    },
];

static VITAMINS_EN: [VitaminInfo; 6] = [
    VitaminInfo {
        category: DeficiencyCategory::VitaminD,
        name: "Vitamin D Deficiency",
        symptoms: &["Bone pain", "Muscle weakness", "Fatigue", "Low mood"],
        daily_dose: "1000-2000 IU",
        foods: &["Oily fish (salmon, tuna)", "Egg yolk", "Dairy products", "Sunlight"],
        supplement: "Prefer the D3 form",
        risk: RiskLevel::High,
    },
    VitaminInfo {
        category: DeficiencyCategory::VitaminB12,
        name: "Vitamin B12 Deficiency",
        symptoms: &["Numbness", "Memory loss", "Fatigue", "Weakness"],
        daily_dose: "2.4 mcg",
        foods: &["Meat", "Fish", "Milk", "Eggs", "Cereals"],
        supplement: "Methylcobalamin form recommended",
        risk: RiskLevel::High,
    },
    VitaminInfo {
        category: DeficiencyCategory::VitaminC,
        name: "Vitamin C Deficiency",
        symptoms: &["Weak immunity", "Slow wound healing", "Bleeding gums"],
        daily_dose: "75-90 mg",
        foods: &["Orange", "Kiwi", "Broccoli", "Strawberry", "Pepper"],
        supplement: "Liposomal vitamin C",
        risk: RiskLevel::Medium,
    },
    VitaminInfo {
        category: DeficiencyCategory::Iron,
        name: "Iron Deficiency",
        symptoms: &["Anaemia", "Fatigue", "Pale skin", "Shortness of breath", "Dizziness"],
        daily_dose: "8-18 mg",
        foods: &["Red meat", "Spinach", "Lentils", "Pumpkin seeds"],
        supplement: "Ferrous sulfate",
        risk: RiskLevel::High,
    },
    VitaminInfo {
        category: DeficiencyCategory::Magnesium,
        name: "Magnesium Deficiency",
        symptoms: &["Muscle cramps", "Fatigue", "Heart rhythm irregularities"],
        daily_dose: "310-420 mg",
        foods: &["Nuts", "Whole grains", "Leafy greens", "Dark chocolate"],
        supplement: "Magnesium glycinate",
        risk: RiskLevel::Medium,
    },
    VitaminInfo {
        category: DeficiencyCategory::Omega3,
        name: "Omega-3 Deficiency",
        symptoms: &["Dry skin", "Hair loss", "Poor concentration", "Joint pain"],
        daily_dose: "250-500 mg EPA+DHA",
        foods: &["Oily fish", "Flaxseed", "Walnuts", "Chia seeds"],
        supplement: "Fish oil (molecularly distilled)",
        risk: RiskLevel::Medium,
    },
];

static DIET_PLANS_TR: [DietPlan; 3] = [
    DietPlan {
        key: "high_blood_sugar",
        title: "Kan Şekeri Yönetimi",
        avoid: &["Şeker", "Beyaz ekmek", "İşlenmiş gıdalar", "Gazlı içecekler"],
        recommended: &["Tam tahıllar", "Sebzeler", "Baklagiller", "Yağsız protein"],
        meals: &[
            "Kahvaltı: Yulaf ezmesi + yaban mersini + ceviz",
            "Öğle: Izgara tavuk + quinoa + karışık salata",
            "Akşam: Fırında somon + buharda sebze + kahverengi pirinç",
        ],
    },
    DietPlan {
        key: "high_cholesterol",
        title: "Kolesterol Kontrolü",
        avoid: &["Trans yağlar", "Kızartmalar", "İşlenmiş et", "Tam yağlı süt"],
        recommended: &["Zeytinyağı", "Yulaf", "Yaban mersini", "Fıstık", "Somon"],
        meals: &[
            "Kahvaltı: Yulaf + elma + tarçın",
            "Öğle: Mercimek çorbası + zeytinyağlı sebze",
            "Akşam: Izgara balık + avokado salata",
        ],
    },
    DietPlan {
        key: "obesity",
        title: "Kilo Yönetimi",
        avoid: &["Hızlı yemek", "Şeker", "Atıştırmalıklar", "Alkol"],
        recommended: &["Protein", "Lif", "Su", "Yeşil sebzeler", "Egzersiz"],
        meals: &[
            "Kahvaltı: Omlet (2 yumurta) + ıspanak + domates",
            "Öğle: Izgara tavuk göğsü + brokoli + kinoa",
            "Akşam: Ton balığı salatası + zeytinyağı",
        ],
    },
];

static DIET_PLANS_EN: [DietPlan; 3] = [
    DietPlan {
        key: "high_blood_sugar",
        title: "Blood Sugar Management",
        avoid: &["Sugar", "White bread", "Processed food", "Soft drinks"],
        recommended: &["Whole grains", "Vegetables", "Legumes", "Lean protein"],
        meals: &[
            "Breakfast: Oatmeal + blueberries + walnuts",
            "Lunch: Grilled chicken + quinoa + mixed salad",
            "Dinner: Baked salmon + steamed vegetables + brown rice",
        ],
    },
    DietPlan {
        key: "high_cholesterol",
        title: "Cholesterol Control",
        avoid: &["Trans fats", "Fried food", "Processed meat", "Full-fat milk"],
        recommended: &["Olive oil", "Oats", "Blueberries", "Peanuts", "Salmon"],
        meals: &[
            "Breakfast: Oats + apple + cinnamon",
            "Lunch: Lentil soup + vegetables in olive oil",
            "Dinner: Grilled fish + avocado salad",
        ],
    },
    DietPlan {
        key: "obesity",
        title: "Weight Management",
        avoid: &["Fast food", "Sugar", "Snacks", "Alcohol"],
        recommended: &["Protein", "Fibre", "Water", "Green vegetables", "Exercise"],
        meals: &[
            "Breakfast: Omelette (2 eggs) + spinach + tomato",
            "Lunch: Grilled chicken breast + broccoli + quinoa",
            "Dinner: Tuna salad + olive oil",
        ],
    },
];

/// Keyword rules for labels outside the organ catalog, checked in order.
const KEYWORD_RULES: [(&[&str], DeficiencyCategory); 6] = [
    (&["Kemik", "Bone"], DeficiencyCategory::VitaminD),
    (&["Beyin", "Sinir", "Brain", "Nerve"], DeficiencyCategory::VitaminB12),
    (&["Bağışıklık", "Immune"], DeficiencyCategory::VitaminC),
    (&["Kan", "Blood"], DeficiencyCategory::Iron),
    (&["Kas", "Muscle"], DeficiencyCategory::Magnesium),
    (&["Kalp", "Heart"], DeficiencyCategory::Omega3),
];

const DIET_KEYWORDS: [&str; 5] = ["Şeker", "Sugar", "Obezite", "Obesity", "Lipid"];

fn category_for_key(key: OrganKey) -> Option<DeficiencyCategory> {
    match key {
        OrganKey::Brain => Some(DeficiencyCategory::VitaminB12),
        OrganKey::Heart => Some(DeficiencyCategory::Omega3),
        OrganKey::Immune => Some(DeficiencyCategory::VitaminC),
        _ => None,
    }
}

/// Deficiency suggested for a stressed organ. Vitamin C when nothing matches.
pub fn category_for_organ(label: &str) -> DeficiencyCategory {
    let mapped = match OrganKey::from_label(label) {
        Some(key) => category_for_key(key),
        None => KEYWORD_RULES
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| label.contains(k)))
            .map(|(_, category)| *category),
    };
    mapped.unwrap_or(DeficiencyCategory::VitaminC)
}

/// Distinct categories for results with stress above [`DEFICIENCY_STRESS`],
/// in order of first occurrence.
pub fn derive_deficiencies(results: &[OrganResult]) -> Vec<DeficiencyCategory> {
    let mut categories = Vec::new();
    for result in results.iter().filter(|r| r.stress > DEFICIENCY_STRESS) {
        let category = category_for_organ(&result.organ);
        if !categories.contains(&category) {
            categories.push(category);
        }
    }
    categories
}

pub fn needs_diet_plan(results: &[OrganResult]) -> bool {
    results
        .iter()
        .any(|r| DIET_KEYWORDS.iter().any(|k| r.organ.contains(k)))
}

pub fn vitamin_info(category: DeficiencyCategory, lang: Language) -> &'static VitaminInfo {
    let table = match lang {
        Language::Tr => &VITAMINS_TR,
        Language::En => &VITAMINS_EN,
    };
    // Tables list every category exactly once, in declaration order.
    &table[category as usize]
}

pub fn diet_plans(lang: Language) -> &'static [DietPlan] {
    match lang {
        Language::Tr => &DIET_PLANS_TR,
        Language::En => &DIET_PLANS_EN,
    }
}

/// Everything the detailed report shows beyond the raw results.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendations {
    pub deficiencies: Vec<&'static VitaminInfo>,
    pub diet_plans: Vec<&'static DietPlan>,
    pub critical: Vec<OrganResult>,
}

impl Recommendations {
    pub fn for_record(record: &AnalysisRecord, lang: Language) -> Self {
        let deficiencies = derive_deficiencies(&record.results)
            .into_iter()
            .map(|c| vitamin_info(c, lang))
            .collect();
        let diet_plans = if needs_diet_plan(&record.results) {
            diet_plans(lang).iter().collect()
        } else {
            Vec::new()
        };
        let critical = record.critical_results().cloned().collect();
        Self {
            deficiencies,
            diet_plans,
            critical,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.deficiencies.is_empty() && self.diet_plans.is_empty() && self.critical.is_empty()
    }
}
