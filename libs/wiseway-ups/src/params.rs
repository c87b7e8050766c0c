//! Check threshold parameters
//!
//! The configuration surface of the check plugins: named optional
//! warning/critical pairs. An absent pair falls back to device-reported
//! thresholds where the profile delivers them, then to static defaults
//! baked into each check.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::levels::SimpleLevels;

/// User-configured threshold overrides
///
/// Every field is optional; configured values always take precedence over
/// device-reported and static defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckParams {
    /// Input voltage upper levels (V)
    pub input_voltage_upper: Option<SimpleLevels>,
    /// Input voltage lower levels (V)
    pub input_voltage_lower: Option<SimpleLevels>,
    /// Output voltage upper levels (V)
    pub output_voltage_upper: Option<SimpleLevels>,
    /// Output voltage lower levels (V)
    pub output_voltage_lower: Option<SimpleLevels>,
    /// Bypass voltage upper levels (V)
    pub bypass_voltage_upper: Option<SimpleLevels>,
    /// Bypass voltage lower levels (V)
    pub bypass_voltage_lower: Option<SimpleLevels>,
    /// Battery voltage upper levels (V)
    pub battery_voltage_upper: Option<SimpleLevels>,
    /// Battery voltage lower levels (V)
    pub battery_voltage_lower: Option<SimpleLevels>,
    /// Battery charge lower levels (%)
    pub battery_charge_lower: Option<SimpleLevels>,
    /// Battery runtime lower levels (seconds)
    pub battery_runtime_lower: Option<SimpleLevels>,
    /// Battery temperature upper levels (°C)
    pub battery_temp_upper: Option<SimpleLevels>,
    /// Battery temperature lower levels (°C)
    pub battery_temp_lower: Option<SimpleLevels>,
    /// Frequency upper levels (Hz), shared by input/output/bypass
    pub frequency_upper: Option<SimpleLevels>,
    /// Frequency lower levels (Hz), shared by input/output/bypass
    pub frequency_lower: Option<SimpleLevels>,
    /// Output load upper levels (%)
    pub load_upper: Option<SimpleLevels>,
    /// Output power upper levels (W)
    pub power_upper: Option<SimpleLevels>,
    /// Output current upper levels (A)
    pub output_current_upper: Option<SimpleLevels>,
}

impl CheckParams {
    /// Load parameters from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&text)?)
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_params_are_all_unset() {
        let params = CheckParams::default();
        assert_eq!(params.input_voltage_upper, None);
        assert_eq!(params.battery_charge_lower, None);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let yaml = "input_voltage_upper:\n  warn: 250.0\n  crit: 260.0\n";
        let params: CheckParams = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            params.input_voltage_upper,
            Some(SimpleLevels::new(250.0, 260.0))
        );
        assert_eq!(params.input_voltage_lower, None);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let yaml = "cpu_load_upper:\n  warn: 1.0\n  crit: 2.0\n";
        assert!(serde_yaml::from_str::<CheckParams>(yaml).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "battery_charge_lower:").unwrap();
        writeln!(file, "  warn: 20.0").unwrap();
        writeln!(file, "  crit: 10.0").unwrap();

        let params = CheckParams::load(file.path()).unwrap();
        assert_eq!(
            params.battery_charge_lower,
            Some(SimpleLevels::new(20.0, 10.0))
        );
    }

    #[test]
    fn test_load_missing_file_is_error() {
        assert!(CheckParams::load("/nonexistent/params.yaml").is_err());
    }
}
