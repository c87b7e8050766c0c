//! Frequency checks
//!
//! All three measured frequencies (input, output, bypass) share one pair of
//! level parameters; a 50Hz device drifting on any of them drifts for the
//! same electrical reason.

use super::discover_positive;
use crate::levels::{check_levels, render, CheckOutput, LevelsSpec, SimpleLevels};
use crate::params::CheckParams;
use crate::parse::Section;

const FREQUENCY_UPPER_DEFAULT: SimpleLevels = SimpleLevels {
    warn: 51.0,
    crit: 52.0,
};
const FREQUENCY_LOWER_DEFAULT: SimpleLevels = SimpleLevels {
    warn: 49.0,
    crit: 48.0,
};

fn frequency_output(
    params: &CheckParams,
    section: &Section,
    key: &str,
    label: &str,
    metric_name: &'static str,
) -> CheckOutput {
    check_levels(
        section.get(key),
        &LevelsSpec {
            metric_name,
            label,
            upper: Some(params.frequency_upper.unwrap_or(FREQUENCY_UPPER_DEFAULT)),
            lower: Some(params.frequency_lower.unwrap_or(FREQUENCY_LOWER_DEFAULT)),
            render: render::hertz,
            boundaries: None,
        },
    )
}

pub fn discover_input_frequency(section: &Section) -> bool {
    discover_positive(section, "input_frequency")
}

pub fn check_input_frequency(params: &CheckParams, section: &Section) -> CheckOutput {
    frequency_output(
        params,
        section,
        "input_frequency",
        "Input frequency",
        "input_frequency",
    )
}

pub fn discover_output_frequency(section: &Section) -> bool {
    discover_positive(section, "output_frequency")
}

pub fn check_output_frequency(params: &CheckParams, section: &Section) -> CheckOutput {
    frequency_output(
        params,
        section,
        "output_frequency",
        "Output frequency",
        "output_frequency",
    )
}

pub fn discover_bypass_frequency(section: &Section) -> bool {
    discover_positive(section, "bypass_frequency")
}

pub fn check_bypass_frequency(params: &CheckParams, section: &Section) -> CheckOutput {
    frequency_output(
        params,
        section,
        "bypass_frequency",
        "Bypass frequency",
        "bypass_frequency",
    )
}

/// Combined frequency service for the standard profile
///
/// Bypass frequency is only evaluated when the device reports it; many
/// standard-profile devices leave the bypass path unpopulated.
pub fn check_frequency_combined(params: &CheckParams, section: &Section) -> CheckOutput {
    let mut out = check_input_frequency(params, section);
    out.extend(check_output_frequency(params, section));
    if discover_bypass_frequency(section) {
        out.extend(check_bypass_frequency(params, section));
    }
    out
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;
    use crate::levels::State;
    use crate::value::Value;

    fn section(entries: &[(&'static str, Value)]) -> Section {
        let mut s = Section::default();
        for (k, v) in entries {
            s.insert_for_test(k, v.clone());
        }
        s
    }

    #[test]
    fn test_nominal_frequency_is_ok() {
        let s = section(&[("input_frequency", Value::Float(50.0))]);
        let out = check_input_frequency(&CheckParams::default(), &s);
        assert_eq!(out.overall_state(), State::Ok);
        assert_eq!(out.metrics[0].value, 50.0);
    }

    #[test]
    fn test_default_levels_bracket_fifty_hertz() {
        let s = section(&[("input_frequency", Value::Float(51.5))]);
        let out = check_input_frequency(&CheckParams::default(), &s);
        assert_eq!(out.overall_state(), State::Warn);

        let s = section(&[("input_frequency", Value::Float(47.5))]);
        let out = check_input_frequency(&CheckParams::default(), &s);
        assert_eq!(out.overall_state(), State::Crit);
    }

    #[test]
    fn test_shared_params_apply_to_all_three() {
        let params = CheckParams {
            frequency_upper: Some(SimpleLevels::new(50.2, 50.5)),
            ..CheckParams::default()
        };
        for key in ["input_frequency", "output_frequency", "bypass_frequency"] {
            let s = section(&[(key, Value::Float(50.3))]);
            let out = frequency_output(&params, &s, key, "F", "f");
            assert_eq!(out.overall_state(), State::Warn, "key {}", key);
        }
    }

    #[test]
    fn test_combined_skips_absent_bypass() {
        let s = section(&[
            ("input_frequency", Value::Float(50.0)),
            ("output_frequency", Value::Float(50.0)),
            ("bypass_frequency", Value::Float(0.0)),
        ]);
        let out = check_frequency_combined(&CheckParams::default(), &s);
        // No bypass result: 0.0 would otherwise trip the lower levels
        assert_eq!(out.overall_state(), State::Ok);
        assert_eq!(out.metrics.len(), 2);
    }
}
