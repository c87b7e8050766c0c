//! Output load, power and current checks

use super::{device_levels, discover_positive};
use crate::levels::{check_levels, render, CheckOutput, LevelsSpec, SimpleLevels};
use crate::params::CheckParams;
use crate::parse::Section;

const LOAD_UPPER_DEFAULT: SimpleLevels = SimpleLevels {
    warn: 80.0,
    crit: 90.0,
};

/// Spread between the device-configured load threshold and the derived
/// critical level, in percent
const DEVICE_LOAD_SPREAD: f64 = 10.0;

pub fn check_output_load(params: &CheckParams, section: &Section) -> CheckOutput {
    let upper = params
        .load_upper
        .or_else(|| device_levels(section, "output_load_up_config", DEVICE_LOAD_SPREAD))
        .unwrap_or(LOAD_UPPER_DEFAULT);
    check_levels(
        section.get("output_load_percent"),
        &LevelsSpec {
            metric_name: "output_load",
            label: "Output load",
            upper: Some(upper),
            lower: None,
            render: render::percent,
            boundaries: Some((0.0, 100.0)),
        },
    )
}

pub fn discover_output_power(section: &Section) -> bool {
    discover_positive(section, "output_power_watts")
}

/// Output power only alerts when the user configures levels; devices report
/// no usable power threshold of their own
pub fn check_output_power(params: &CheckParams, section: &Section) -> CheckOutput {
    check_levels(
        section.get("output_power_watts"),
        &LevelsSpec {
            metric_name: "output_power",
            label: "Output power",
            upper: params.power_upper,
            lower: None,
            render: render::watts,
            boundaries: None,
        },
    )
}

pub fn discover_output_current(section: &Section) -> bool {
    discover_positive(section, "output_current")
}

pub fn check_output_current(params: &CheckParams, section: &Section) -> CheckOutput {
    check_levels(
        section.get("output_current"),
        &LevelsSpec {
            metric_name: "output_current",
            label: "Output current",
            upper: params.output_current_upper,
            lower: None,
            render: render::amps,
            boundaries: None,
        },
    )
}

/// Combined load service for the standard profile
pub fn check_load_combined(params: &CheckParams, section: &Section) -> CheckOutput {
    let mut out = check_levels(
        section.get("output_load_percent"),
        &LevelsSpec {
            metric_name: "output_load",
            label: "Output load",
            upper: Some(params.load_upper.unwrap_or(LOAD_UPPER_DEFAULT)),
            lower: None,
            render: render::percent,
            boundaries: Some((0.0, 100.0)),
        },
    );
    if discover_output_power(section) {
        out.extend(check_output_power(params, section));
    }
    if discover_output_current(section) {
        out.extend(check_output_current(params, section));
    }
    out
}
