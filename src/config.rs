use serde::Deserialize;
use std::fs;

/// One fuel/energy type to scrape and analyze.
#[derive(Debug, Clone, Deserialize)]
pub struct FuelConfig {
    /// Display name, e.g. "Gasoline".
    pub name: String,
    /// Path segment on globalpetrolprices.com, e.g. "gasoline_prices".
    pub slug: String,
    /// Price unit for the report, e.g. "$/liter".
    pub unit: String,
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub fuels: Vec<FuelConfig>,
    /// Countries to position against the global distribution.
    pub focus_countries: Vec<String>,
    pub request_timeout_seconds: u64,
}

pub fn load_config(path: &str) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sample_config() {
        let json = r#"{
            "fuels": [
                {"name": "Gasoline", "slug": "gasoline_prices", "unit": "$/liter"},
                {"name": "Diesel", "slug": "diesel_prices", "unit": "$/liter"}
            ],
            "focus_countries": ["Norway", "Venezuela"],
            "request_timeout_seconds": 10
        }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.fuels.len(), 2);
        assert_eq!(config.fuels[1].slug, "diesel_prices");
        assert_eq!(config.focus_countries, vec!["Norway", "Venezuela"]);
    }
}
