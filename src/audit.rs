use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Validated survey payload, the sole input to the scoring pipeline.
///
/// Field-level validation (required fields, type coercion) happens upstream;
/// everything optional here is allowed to be absent and degrades to a
/// conservative default during scoring instead of failing the run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnergyAuditData {
    pub basic_info: BasicInfo,
    pub home_details: HomeDetails,
    pub current_conditions: CurrentConditions,
    pub heating_cooling: HeatingCooling,
    pub energy_consumption: EnergyConsumption,
    pub product_preferences: Option<ProductPreferences>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BasicInfo {
    pub address: String,
    pub property_type: PropertyType,
    pub year_built: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum PropertyType {
    #[default]
    SingleFamily,
    Townhouse,
    Apartment,
    MobileHome,
    Other,
}

impl From<String> for PropertyType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "single-family" => PropertyType::SingleFamily,
            "townhouse" => PropertyType::Townhouse,
            "apartment" => PropertyType::Apartment,
            "mobile-home" => PropertyType::MobileHome,
            _ => PropertyType::Other,
        }
    }
}

impl PropertyType {
    /// Owner-occupied structures where roof/envelope upgrades are actionable.
    pub fn owns_envelope(&self) -> bool {
        matches!(
            self,
            PropertyType::SingleFamily | PropertyType::Townhouse | PropertyType::MobileHome
        )
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HomeDetails {
    pub square_footage: Option<f64>,
    pub stories: Option<u32>,
    pub window_count: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CurrentConditions {
    pub insulation: Option<InsulationRatings>,
    pub window_type: Option<WindowType>,
    pub window_condition: Option<WindowCondition>,
    pub lighting: Option<LightingAssessment>,
    pub humidity: Option<HumidityReadings>,
}

/// Per-area categorical insulation answers. Areas the homeowner skipped stay
/// `None` and score as "average/unsure".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InsulationRatings {
    pub attic: Option<ConditionRating>,
    pub walls: Option<ConditionRating>,
    pub basement: Option<ConditionRating>,
    pub floor: Option<ConditionRating>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum ConditionRating {
    Poor,
    Average,
    Good,
    Excellent,
    /// Catch-all for "not-sure" and any unrecognized survey answer.
    NotSure,
}

impl From<String> for ConditionRating {
    fn from(s: String) -> Self {
        match s.as_str() {
            "poor" => ConditionRating::Poor,
            "average" => ConditionRating::Average,
            "good" => ConditionRating::Good,
            "excellent" => ConditionRating::Excellent,
            _ => ConditionRating::NotSure,
        }
    }
}

impl ConditionRating {
    pub fn score(&self) -> f64 {
        match self {
            ConditionRating::Poor => 0.0,
            ConditionRating::Average => 1.0,
            ConditionRating::Good => 2.0,
            ConditionRating::Excellent => 3.0,
            ConditionRating::NotSure => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum WindowType {
    Single,
    Double,
    Triple,
    NotSure,
}

impl From<String> for WindowType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "single" => WindowType::Single,
            "double" => WindowType::Double,
            "triple" => WindowType::Triple,
            _ => WindowType::NotSure,
        }
    }
}

impl WindowType {
    pub fn score(&self) -> f64 {
        match self {
            WindowType::Single => 0.0,
            WindowType::Double => 2.0,
            WindowType::Triple => 3.0,
            WindowType::NotSure => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum WindowCondition {
    Poor,
    Fair,
    Good,
    Excellent,
    NotSure,
}

impl From<String> for WindowCondition {
    fn from(s: String) -> Self {
        match s.as_str() {
            "poor" => WindowCondition::Poor,
            "fair" => WindowCondition::Fair,
            "good" => WindowCondition::Good,
            "excellent" => WindowCondition::Excellent,
            _ => WindowCondition::NotSure,
        }
    }
}

impl WindowCondition {
    pub fn score(&self) -> f64 {
        match self {
            WindowCondition::Poor => 0.0,
            WindowCondition::Fair => 1.0,
            WindowCondition::Good => 2.0,
            WindowCondition::Excellent => 3.0,
            WindowCondition::NotSure => 1.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LightingAssessment {
    pub fixtures: Vec<LightingFixture>,
    pub primary_bulb_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LightingFixture {
    pub name: Option<String>,
    pub watts: Option<f64>,
    pub lumens: Option<f64>,
    pub hours_per_day: Option<f64>,
}

impl LightingFixture {
    /// A fixture only counts toward aggregate efficiency when both electrical
    /// figures are present and positive.
    pub fn is_valid(&self) -> bool {
        self.watts.is_some_and(|w| w > 0.0) && self.lumens.is_some_and(|l| l > 0.0)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HumidityReadings {
    pub current: Option<f64>,
    pub target: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeatingCooling {
    pub heating_system: Option<HvacSystem>,
    pub cooling_system: Option<HvacSystem>,
    /// IECC-style climate zone 1 (hot) through 5 (cold), when known.
    pub climate_zone: Option<u8>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HvacSystem {
    pub kind: Option<String>,
    pub age_years: Option<f64>,
    /// Rated efficiency as a 0-1 fraction (e.g. 0.8 for 80 AFUE).
    pub efficiency: Option<f64>,
    pub last_service_date: Option<chrono::NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnergyConsumption {
    pub monthly_electric_bill: Option<f64>,
    pub monthly_gas_bill: Option<f64>,
    pub daily_usage_hours: Option<f64>,
    pub seasonal_factor: Option<f64>,
    pub occupancy_factor: Option<f64>,
    pub power_factor: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductPreferences {
    pub categories: Vec<String>,
    pub features: Vec<String>,
    pub budget_max: Option<f64>,
}

/// One audit payload loaded from disk, labeled by its file stem.
#[derive(Debug)]
pub struct AuditDocument {
    pub path: PathBuf,
    pub label: String,
    pub data: EnergyAuditData,
}

impl AuditDocument {
    pub fn load(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read audit {}: {e}", path.display()))?;
        let data: EnergyAuditData = serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse audit {}: {e}", path.display()))?;
        let label = path
            .file_stem()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "audit".to_string());
        Ok(AuditDocument {
            path: path.to_path_buf(),
            label,
            data,
        })
    }
}

/// Collect audit JSON paths for a file or directory target. Directories are
/// scanned one level deep; non-JSON entries are skipped.
pub fn discover_audits(path: &Path) -> Result<Vec<PathBuf>, String> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        return Err(format!("No audit file or directory at {}", path.display()));
    }
    let entries =
        std::fs::read_dir(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    if files.is_empty() {
        return Err(format!("No audit .json files found in {}", path.display()));
    }
    Ok(files)
}
