//! Raw value converters
//!
//! Turns one raw SNMP string into one typed [`Value`]. Converters are total:
//! malformed or absent input degrades to the converter's documented default,
//! never to an error. Uses enum for static dispatch (better performance than
//! trait objects).

use crate::value::Value;

/// Raw code some device firmwares report for "value not applicable".
///
/// Must never be interpreted as a real reading: 65535 centihertz or
/// decivolts would otherwise pass as a plausible measurement.
pub const NOT_APPLICABLE: &str = "65535";

/// Conversion rule for one OID column
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Converter {
    /// Device text, `"Unknown"` when the reading is absent
    Text,
    /// Plain integer (counters, alarm flags), `0` when absent or malformed
    Integer,
    /// Plain float, `0.0` when absent or malformed
    Float,
    /// Fixed-point reading: parsed value divided by `factor`
    ///
    /// Factor 10 covers decivolts and deciamps, factor 100 centihertz.
    Scaled {
        /// Division factor applied to the parsed raw value
        factor: f64,
    },
    /// Remaining-runtime reading in minutes, normalized to seconds
    ///
    /// Negative minutes are a firmware artifact and resolve to
    /// [`Value::Unknown`] instead of a negative duration.
    MinutesToSeconds,
    /// Enterprise voltage encoding
    ///
    /// Handles transition markers like `"2329→2298"` by taking the first
    /// token. Magnitudes above 1000 were encoded at tenth-of-a-volt
    /// precision and are divided by 10.
    EnterpriseVoltage,
}

impl Converter {
    /// Apply the conversion to one raw string
    pub fn apply(&self, raw: &str) -> Value {
        let raw = raw.trim();

        // Sentinel-coded numeric readings are indeterminate, not a number
        if !matches!(self, Converter::Text) && raw == NOT_APPLICABLE {
            return Value::Unknown;
        }

        match self {
            Converter::Text => {
                if raw.is_empty() {
                    Value::Text("Unknown".to_string())
                } else {
                    Value::Text(raw.to_string())
                }
            },
            Converter::Integer => Value::Int(raw.parse::<i64>().unwrap_or(0)),
            Converter::Float => Value::Float(raw.parse::<f64>().unwrap_or(0.0)),
            Converter::Scaled { factor } => {
                Value::Float(raw.parse::<f64>().unwrap_or(0.0) / factor)
            },
            Converter::MinutesToSeconds => match raw.parse::<f64>() {
                Ok(minutes) if minutes < 0.0 => Value::Unknown,
                Ok(minutes) => Value::Float(minutes * 60.0),
                Err(_) => Value::Float(0.0),
            },
            Converter::EnterpriseVoltage => {
                let first = raw.split('→').next().unwrap_or("").trim();
                match first.parse::<f64>() {
                    Ok(v) if v.abs() > 1000.0 => Value::Float(v / 10.0),
                    Ok(v) => Value::Float(v),
                    Err(_) => Value::Float(0.0),
                }
            },
        }
    }

    /// Default value used when the device omits the reading entirely
    pub fn default_value(&self) -> Value {
        match self {
            Converter::Text => Value::Text("Unknown".to_string()),
            Converter::Integer => Value::Int(0),
            Converter::Float
            | Converter::Scaled { .. }
            | Converter::MinutesToSeconds
            | Converter::EnterpriseVoltage => Value::Float(0.0),
        }
    }
}

/// Decivolts → volts
pub const DECIVOLTS: Converter = Converter::Scaled { factor: 10.0 };
/// Deciamps → amps
pub const DECIAMPS: Converter = Converter::Scaled { factor: 10.0 };
/// Centihertz → hertz
pub const CENTIHERTZ: Converter = Converter::Scaled { factor: 100.0 };

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_converter() {
        assert_eq!(
            Converter::Text.apply("Wiseway3 10kVA"),
            Value::Text("Wiseway3 10kVA".to_string())
        );
        assert_eq!(Converter::Text.apply(""), Value::Text("Unknown".to_string()));
    }

    #[test]
    fn test_integer_converter() {
        assert_eq!(Converter::Integer.apply("3"), Value::Int(3));
        assert_eq!(Converter::Integer.apply(""), Value::Int(0));
        assert_eq!(Converter::Integer.apply("abc"), Value::Int(0));
    }

    #[test]
    fn test_float_converter() {
        assert_eq!(Converter::Float.apply("231.9"), Value::Float(231.9));
        assert_eq!(Converter::Float.apply(""), Value::Float(0.0));
        assert_eq!(Converter::Float.apply("n/a"), Value::Float(0.0));
    }

    #[test]
    fn test_scaled_converters() {
        // 2200 decivolts = 220.0 V
        assert_eq!(DECIVOLTS.apply("2200"), Value::Float(220.0));
        // 5000 centihertz = 50.0 Hz
        assert_eq!(CENTIHERTZ.apply("5000"), Value::Float(50.0));
        // 150 deciamps = 15.0 A
        assert_eq!(DECIAMPS.apply("150"), Value::Float(15.0));
        assert_eq!(DECIVOLTS.apply(""), Value::Float(0.0));
    }

    #[test]
    fn test_minutes_to_seconds() {
        assert_eq!(Converter::MinutesToSeconds.apply("10"), Value::Float(600.0));
        assert_eq!(Converter::MinutesToSeconds.apply(""), Value::Float(0.0));
        // Negative runtime is a firmware artifact, not a duration
        assert_eq!(Converter::MinutesToSeconds.apply("-1"), Value::Unknown);
    }

    #[test]
    fn test_enterprise_voltage() {
        // Transition marker: only the first token counts, >1000 is decivolt-encoded
        assert_eq!(
            Converter::EnterpriseVoltage.apply("2329→2298"),
            Value::Float(232.9)
        );
        assert_eq!(Converter::EnterpriseVoltage.apply("231.9"), Value::Float(231.9));
        assert_eq!(Converter::EnterpriseVoltage.apply("2200"), Value::Float(220.0));
        assert_eq!(Converter::EnterpriseVoltage.apply(""), Value::Float(0.0));
        assert_eq!(Converter::EnterpriseVoltage.apply("garbage"), Value::Float(0.0));
    }

    #[test]
    fn test_sentinel_is_unknown_for_numeric() {
        assert_eq!(Converter::Integer.apply(NOT_APPLICABLE), Value::Unknown);
        assert_eq!(Converter::Float.apply(NOT_APPLICABLE), Value::Unknown);
        assert_eq!(DECIVOLTS.apply(NOT_APPLICABLE), Value::Unknown);
        assert_eq!(CENTIHERTZ.apply(NOT_APPLICABLE), Value::Unknown);
        assert_eq!(Converter::MinutesToSeconds.apply(NOT_APPLICABLE), Value::Unknown);
        assert_eq!(
            Converter::EnterpriseVoltage.apply(NOT_APPLICABLE),
            Value::Unknown
        );
        // Text keeps the raw string: serial numbers may legitimately contain it
        assert_eq!(
            Converter::Text.apply(NOT_APPLICABLE),
            Value::Text(NOT_APPLICABLE.to_string())
        );
    }

    #[test]
    fn test_defaults_match_converter_kind() {
        assert_eq!(Converter::Text.default_value(), Value::Text("Unknown".into()));
        assert_eq!(Converter::Integer.default_value(), Value::Int(0));
        assert_eq!(DECIVOLTS.default_value(), Value::Float(0.0));
    }
}
