//! Voltage checks for the mains-facing measurements
//!
//! Input and output voltage prefer device-configured thresholds when the
//! firmware reports them; the configured value becomes the warning level
//! and the critical level sits 10V beyond it.

use super::{device_levels, discover_positive};
use crate::levels::{check_levels, render, CheckOutput, LevelsSpec, SimpleLevels, State};
use crate::params::CheckParams;
use crate::parse::Section;

const VOLTAGE_UPPER_DEFAULT: SimpleLevels = SimpleLevels {
    warn: 250.0,
    crit: 260.0,
};
const VOLTAGE_LOWER_DEFAULT: SimpleLevels = SimpleLevels {
    warn: 210.0,
    crit: 200.0,
};

/// Spread between the device-configured threshold and the derived critical
/// level, in volts
const DEVICE_SPREAD_V: f64 = 10.0;

fn voltage_output(
    section: &Section,
    key: &str,
    label: &str,
    metric_name: &'static str,
    upper: Option<SimpleLevels>,
    lower: Option<SimpleLevels>,
) -> CheckOutput {
    check_levels(
        section.get(key),
        &LevelsSpec {
            metric_name,
            label,
            upper,
            lower,
            render: render::volts,
            boundaries: None,
        },
    )
}

pub fn discover_input_voltage(section: &Section) -> bool {
    discover_positive(section, "input_voltage")
}

pub fn check_input_voltage(params: &CheckParams, section: &Section) -> CheckOutput {
    let upper = params
        .input_voltage_upper
        .or_else(|| device_levels(section, "input_volt_up_config", DEVICE_SPREAD_V))
        .unwrap_or(VOLTAGE_UPPER_DEFAULT);
    let lower = params
        .input_voltage_lower
        .or_else(|| device_levels(section, "input_volt_low_config", -DEVICE_SPREAD_V))
        .unwrap_or(VOLTAGE_LOWER_DEFAULT);
    voltage_output(
        section,
        "input_voltage",
        "Input voltage",
        "input_voltage",
        Some(upper),
        Some(lower),
    )
}

pub fn discover_output_voltage(section: &Section) -> bool {
    discover_positive(section, "output_voltage")
}

pub fn check_output_voltage(params: &CheckParams, section: &Section) -> CheckOutput {
    let upper = params
        .output_voltage_upper
        .or_else(|| device_levels(section, "output_volt_up_config", DEVICE_SPREAD_V))
        .unwrap_or(VOLTAGE_UPPER_DEFAULT);
    let lower = params
        .output_voltage_lower
        .or_else(|| device_levels(section, "output_volt_low_config", -DEVICE_SPREAD_V))
        .unwrap_or(VOLTAGE_LOWER_DEFAULT);
    voltage_output(
        section,
        "output_voltage",
        "Output voltage",
        "output_voltage",
        Some(upper),
        Some(lower),
    )
}

pub fn discover_bypass_voltage(section: &Section) -> bool {
    discover_positive(section, "bypass_voltage")
}

/// Bypass voltage has no device-configured thresholds; only user overrides
/// tighten the static defaults
pub fn check_bypass_voltage(params: &CheckParams, section: &Section) -> CheckOutput {
    let upper = params.bypass_voltage_upper.unwrap_or(VOLTAGE_UPPER_DEFAULT);
    let lower = params.bypass_voltage_lower.unwrap_or(VOLTAGE_LOWER_DEFAULT);
    voltage_output(
        section,
        "bypass_voltage",
        "Bypass voltage",
        "bypass_voltage",
        Some(upper),
        Some(lower),
    )
}

/// Combined power service for the standard profile: supply source plus
/// input/output voltage in one service
pub fn check_power_combined(params: &CheckParams, section: &Section) -> CheckOutput {
    let mut out = CheckOutput::default();

    let source = section.text("output_source");
    let state = match source {
        "normal" => State::Ok,
        "battery" | "bypass" | "booster" | "reducer" => State::Warn,
        "none" => State::Crit,
        _ => State::Unknown,
    };
    out.result(state, format!("Output source: {}", source));

    out.extend(voltage_output(
        section,
        "input_voltage",
        "Input voltage",
        "input_voltage",
        Some(params.input_voltage_upper.unwrap_or(VOLTAGE_UPPER_DEFAULT)),
        Some(params.input_voltage_lower.unwrap_or(VOLTAGE_LOWER_DEFAULT)),
    ));
    out.extend(voltage_output(
        section,
        "output_voltage",
        "Output voltage",
        "output_voltage",
        Some(params.output_voltage_upper.unwrap_or(VOLTAGE_UPPER_DEFAULT)),
        Some(params.output_voltage_lower.unwrap_or(VOLTAGE_LOWER_DEFAULT)),
    ));
    // Bypass voltage is informational here and only reported when the
    // bypass path is actually populated; it alerts on the extended
    // profile's dedicated service
    if discover_bypass_voltage(section) {
        out.extend(voltage_output(
            section,
            "bypass_voltage",
            "Bypass voltage",
            "bypass_voltage",
            params.bypass_voltage_upper,
            params.bypass_voltage_lower,
        ));
    }

    if let Some(bads) = section.int("input_line_bads") {
        let state = if bads > 0 { State::Warn } else { State::Ok };
        out.result(state, format!("Input line bads: {}", bads));
        out.metric("input_line_bads", bads as f64);
    }

    out
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;
    use crate::value::Value;

    fn section(entries: &[(&'static str, Value)]) -> Section {
        let mut s = Section::default();
        for (k, v) in entries {
            s.insert_for_test(k, v.clone());
        }
        s
    }

    #[test]
    fn test_input_voltage_static_defaults() {
        let s = section(&[("input_voltage", Value::Float(261.0))]);
        let out = check_input_voltage(&CheckParams::default(), &s);
        assert_eq!(out.overall_state(), State::Crit);

        let s = section(&[("input_voltage", Value::Float(255.0))]);
        let out = check_input_voltage(&CheckParams::default(), &s);
        assert_eq!(out.overall_state(), State::Warn);

        let s = section(&[("input_voltage", Value::Float(230.0))]);
        let out = check_input_voltage(&CheckParams::default(), &s);
        assert_eq!(out.overall_state(), State::Ok);
    }

    #[test]
    fn test_device_config_overrides_static_default() {
        // Device says warn at 240V, so 245V must already warn
        let s = section(&[
            ("input_voltage", Value::Float(245.0)),
            ("input_volt_up_config", Value::Float(240.0)),
        ]);
        let out = check_input_voltage(&CheckParams::default(), &s);
        assert_eq!(out.overall_state(), State::Warn);
    }

    #[test]
    fn test_user_params_override_device_config() {
        let s = section(&[
            ("input_voltage", Value::Float(245.0)),
            ("input_volt_up_config", Value::Float(240.0)),
        ]);
        let params = CheckParams {
            input_voltage_upper: Some(SimpleLevels::new(250.0, 260.0)),
            ..CheckParams::default()
        };
        let out = check_input_voltage(&params, &s);
        assert_eq!(out.overall_state(), State::Ok);
    }

    #[test]
    fn test_zero_device_config_means_unconfigured() {
        let s = section(&[
            ("input_voltage", Value::Float(255.0)),
            ("input_volt_up_config", Value::Float(0.0)),
        ]);
        let out = check_input_voltage(&CheckParams::default(), &s);
        // Static default (250, 260) applies
        assert_eq!(out.overall_state(), State::Warn);
    }

    #[test]
    fn test_lower_device_config_spread() {
        // Configured lower threshold 205V, crit at 195V
        let s = section(&[
            ("input_voltage", Value::Float(200.0)),
            ("input_volt_low_config", Value::Float(205.0)),
        ]);
        let out = check_input_voltage(&CheckParams::default(), &s);
        assert_eq!(out.overall_state(), State::Warn);
    }

    #[test]
    fn test_discovery_requires_positive_reading() {
        assert!(discover_input_voltage(&section(&[(
            "input_voltage",
            Value::Float(229.8)
        )])));
        assert!(!discover_input_voltage(&section(&[(
            "input_voltage",
            Value::Float(0.0)
        )])));
        assert!(!discover_input_voltage(&section(&[(
            "input_voltage",
            Value::Unknown
        )])));
        assert!(!discover_input_voltage(&Section::default()));
    }

    #[test]
    fn test_unknown_reading_yields_unknown_without_metric() {
        let s = section(&[("input_voltage", Value::Unknown)]);
        let out = check_input_voltage(&CheckParams::default(), &s);
        assert_eq!(out.overall_state(), State::Unknown);
        assert!(out.metrics.is_empty());
    }

    #[test]
    fn test_combined_power_flags_battery_source() {
        let s = section(&[
            ("output_source", Value::State("battery")),
            ("input_voltage", Value::Float(0.0)),
            ("output_voltage", Value::Float(220.0)),
            ("bypass_voltage", Value::Float(0.0)),
            ("input_line_bads", Value::Int(2)),
        ]);
        let out = check_power_combined(&CheckParams::default(), &s);
        // Battery source warns, input voltage 0 breaches the lower levels
        assert_eq!(out.overall_state(), State::Crit);
        assert_eq!(out.results[0].state, State::Warn);
    }

    #[test]
    fn test_combined_power_line_failures_warn() {
        let s = section(&[
            ("output_source", Value::State("normal")),
            ("input_voltage", Value::Float(230.0)),
            ("output_voltage", Value::Float(220.0)),
            ("input_line_bads", Value::Int(3)),
        ]);
        let out = check_power_combined(&CheckParams::default(), &s);
        assert_eq!(out.overall_state(), State::Warn);
        let bads = out
            .results
            .iter()
            .find(|r| r.summary == "Input line bads: 3")
            .unwrap();
        assert_eq!(bads.state, State::Warn);
        assert!(out.metrics.iter().any(|m| m.name == "input_line_bads"));

        // A clean counter stays OK but still graphs
        let s = section(&[
            ("output_source", Value::State("normal")),
            ("input_voltage", Value::Float(230.0)),
            ("output_voltage", Value::Float(220.0)),
            ("input_line_bads", Value::Int(0)),
        ]);
        let out = check_power_combined(&CheckParams::default(), &s);
        assert_eq!(out.overall_state(), State::Ok);
        assert!(out.metrics.iter().any(|m| m.name == "input_line_bads"));
    }

    #[test]
    fn test_combined_power_skips_unpopulated_bypass() {
        let s = section(&[
            ("output_source", Value::State("normal")),
            ("input_voltage", Value::Float(230.0)),
            ("output_voltage", Value::Float(220.0)),
            ("bypass_voltage", Value::Float(0.0)),
        ]);
        let out = check_power_combined(&CheckParams::default(), &s);
        assert!(!out.metrics.iter().any(|m| m.name == "bypass_voltage"));
        assert!(!out
            .results
            .iter()
            .any(|r| r.summary.starts_with("Bypass voltage")));

        // A populated bypass path is reported
        let s = section(&[
            ("output_source", Value::State("normal")),
            ("input_voltage", Value::Float(230.0)),
            ("output_voltage", Value::Float(220.0)),
            ("bypass_voltage", Value::Float(221.0)),
        ]);
        let out = check_power_combined(&CheckParams::default(), &s);
        assert!(out.metrics.iter().any(|m| m.name == "bypass_voltage"));
    }
}
