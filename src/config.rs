use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rules: HashMap<String, String>,
    pub rates: Rates,
    pub matching: MatchingConfig,
    pub ci: CiConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Rates {
    /// Residential electricity price, $/kWh.
    pub electricity_kwh: f64,
    /// Natural gas price, $/therm.
    pub gas_therm: f64,
    /// Grid emission intensity, lbs CO2 per kWh.
    pub co2_lbs_per_kwh: f64,
}

impl Default for Rates {
    fn default() -> Self {
        Rates {
            electricity_kwh: 0.14,
            gas_therm: 1.10,
            co2_lbs_per_kwh: 0.85,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Cap on product suggestions per recommendation category.
    pub top_n: usize,
    pub require_in_stock: bool,
    /// Product catalog JSON path, relative to the config directory.
    pub catalog: Option<String>,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        MatchingConfig {
            top_n: 5,
            require_in_stock: false,
            catalog: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CiConfig {
    pub fail_below: u32,
}

impl Config {
    pub fn load(dir: &Path) -> Result<Self, String> {
        let config_path = dir.join("energy-doctor.toml");
        if !config_path.exists() {
            return Ok(Config::default());
        }
        let contents = std::fs::read_to_string(&config_path)
            .map_err(|e| format!("Failed to read config: {e}"))?;
        let config: Config =
            toml::from_str(&contents).map_err(|e| format!("Failed to parse config: {e}"))?;
        Ok(config)
    }

    pub fn is_rule_enabled(&self, rule_id: &str) -> bool {
        !matches!(self.rules.get(rule_id), Some(v) if v == "off")
    }
}
