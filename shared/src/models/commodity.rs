//! Commodity classification

use serde::{Deserialize, Serialize};

/// Commodity categories traded by the cooperative
///
/// The category selects which grading rule set applies at purchase intake.
/// It is resolved once from the product catalog name, before the grading
/// engine runs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommodityType {
    WetCocoa,
    UnfermentedDryCocoa,
    FermentedCocoa,
    GreenBeanRobusta,
    GreenBeanArabica,
    PatchouliOil,
    /// Anything else the cooperative buys; only sack tare applies
    General,
}

impl CommodityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommodityType::WetCocoa => "wet_cocoa",
            CommodityType::UnfermentedDryCocoa => "unfermented_dry_cocoa",
            CommodityType::FermentedCocoa => "fermented_cocoa",
            CommodityType::GreenBeanRobusta => "green_bean_robusta",
            CommodityType::GreenBeanArabica => "green_bean_arabica",
            CommodityType::PatchouliOil => "patchouli_oil",
            CommodityType::General => "general",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "wet_cocoa" => Some(CommodityType::WetCocoa),
            "unfermented_dry_cocoa" => Some(CommodityType::UnfermentedDryCocoa),
            "fermented_cocoa" => Some(CommodityType::FermentedCocoa),
            "green_bean_robusta" => Some(CommodityType::GreenBeanRobusta),
            "green_bean_arabica" => Some(CommodityType::GreenBeanArabica),
            "patchouli_oil" => Some(CommodityType::PatchouliOil),
            "general" => Some(CommodityType::General),
            _ => None,
        }
    }

    /// Classify a product by its catalog name
    ///
    /// Cooperative catalog names follow Indonesian conventions
    /// ("KAKAO BASAH", "KAKAO FERMENTASI", "KOPI ROBUSTA", "MINYAK NILAM"),
    /// so a keyword match on the uppercased name is sufficient. "FERMENTASI"
    /// is checked before "ASALAN" because both are cocoa product names.
    pub fn from_product_name(name: &str) -> Self {
        let name = name.to_uppercase();
        if name.contains("BASAH") {
            CommodityType::WetCocoa
        } else if name.contains("FERMENTASI") {
            CommodityType::FermentedCocoa
        } else if name.contains("ASALAN") {
            CommodityType::UnfermentedDryCocoa
        } else if name.contains("ROBUSTA") {
            CommodityType::GreenBeanRobusta
        } else if name.contains("ARABIKA") || name.contains("ARABICA") {
            CommodityType::GreenBeanArabica
        } else if name.contains("NILAM") {
            CommodityType::PatchouliOil
        } else {
            CommodityType::General
        }
    }
}

impl std::fmt::Display for CommodityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommodityType::WetCocoa => write!(f, "Wet Cocoa"),
            CommodityType::UnfermentedDryCocoa => write!(f, "Unfermented Dry Cocoa"),
            CommodityType::FermentedCocoa => write!(f, "Fermented Cocoa"),
            CommodityType::GreenBeanRobusta => write!(f, "Green Bean Robusta"),
            CommodityType::GreenBeanArabica => write!(f, "Green Bean Arabica"),
            CommodityType::PatchouliOil => write!(f, "Patchouli Oil"),
            CommodityType::General => write!(f, "General"),
        }
    }
}
