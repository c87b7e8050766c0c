//! Battery checks
//!
//! Charge, runtime, voltage, charging current and temperature, plus the
//! battery status service that folds the RFC 1628 status enumeration and
//! the battery alarm flags into one severity.

use super::{device_levels, discover_positive};
use crate::levels::{check_levels, render, CheckOutput, LevelsSpec, SimpleLevels, State};
use crate::params::CheckParams;
use crate::parse::Section;

const CHARGE_LOWER_DEFAULT: SimpleLevels = SimpleLevels {
    warn: 20.0,
    crit: 10.0,
};
const RUNTIME_LOWER_DEFAULT: SimpleLevels = SimpleLevels {
    warn: 600.0,
    crit: 300.0,
};
const TEMP_UPPER_DEFAULT: SimpleLevels = SimpleLevels {
    warn: 40.0,
    crit: 45.0,
};
const TEMP_LOWER_DEFAULT: SimpleLevels = SimpleLevels {
    warn: 10.0,
    crit: 5.0,
};
const VOLTAGE_LOWER_DEFAULT: SimpleLevels = SimpleLevels {
    warn: 180.0,
    crit: 170.0,
};

/// Spread between a device-configured temperature threshold and the derived
/// critical level, in °C
const DEVICE_TEMP_SPREAD: f64 = 5.0;
/// Spread below the device-configured battery voltage threshold, in volts
const DEVICE_VOLT_SPREAD: f64 = 10.0;

// ============================================================================
// Metric checks
// ============================================================================

pub fn discover_battery_charge(section: &Section) -> bool {
    section.get("battery_charge_percent").is_some()
}

pub fn check_battery_charge(params: &CheckParams, section: &Section) -> CheckOutput {
    // A non-positive charge means the device delivered no reading, not an
    // empty battery; zero is the parse default for absent columns
    if section
        .float("battery_charge_percent")
        .is_some_and(|v| v <= 0.0)
    {
        let mut out = CheckOutput::default();
        out.result(State::Unknown, "Battery charge: data not available");
        return out;
    }
    check_levels(
        section.get("battery_charge_percent"),
        &LevelsSpec {
            metric_name: "battery_charge",
            label: "Battery charge",
            upper: None,
            lower: Some(params.battery_charge_lower.unwrap_or(CHARGE_LOWER_DEFAULT)),
            render: render::percent,
            boundaries: Some((0.0, 100.0)),
        },
    )
}

pub fn discover_battery_runtime(section: &Section) -> bool {
    section.get("battery_runtime_seconds").is_some()
}

pub fn check_battery_runtime(params: &CheckParams, section: &Section) -> CheckOutput {
    // Same as charge: zero runtime is the absent-column default
    if section
        .float("battery_runtime_seconds")
        .is_some_and(|v| v <= 0.0)
    {
        let mut out = CheckOutput::default();
        out.result(State::Unknown, "Battery runtime: data not available");
        return out;
    }
    check_levels(
        section.get("battery_runtime_seconds"),
        &LevelsSpec {
            metric_name: "battery_runtime",
            label: "Battery runtime",
            upper: None,
            lower: Some(params.battery_runtime_lower.unwrap_or(RUNTIME_LOWER_DEFAULT)),
            render: render::timespan,
            boundaries: None,
        },
    )
}

pub fn discover_battery_voltage(section: &Section) -> bool {
    discover_positive(section, "battery_voltage")
}

pub fn check_battery_voltage(params: &CheckParams, section: &Section) -> CheckOutput {
    let lower = params
        .battery_voltage_lower
        .or_else(|| device_levels(section, "battery_volt_low_config", -DEVICE_VOLT_SPREAD))
        .unwrap_or(VOLTAGE_LOWER_DEFAULT);
    check_levels(
        section.get("battery_voltage"),
        &LevelsSpec {
            metric_name: "battery_voltage",
            label: "Battery voltage",
            upper: params.battery_voltage_upper,
            lower: Some(lower),
            render: render::volts,
            boundaries: None,
        },
    )
}

pub fn discover_battery_current(section: &Section) -> bool {
    section
        .float("battery_current")
        .is_some_and(|v| v != 0.0)
}

/// Battery charging/discharging current; sign encodes the direction
pub fn check_battery_current(_params: &CheckParams, section: &Section) -> CheckOutput {
    let mut out = CheckOutput::default();
    let Some(current) = section.float("battery_current") else {
        out.result(State::Unknown, "Battery current: no reading");
        return out;
    };

    if current == 0.0 {
        out.result(State::Ok, "No battery current flow");
    } else if current > 0.0 {
        out.result(State::Ok, format!("Charging: {}", render::amps(current)));
    } else {
        out.result(
            State::Ok,
            format!("Discharging: {}", render::amps(current.abs())),
        );
    }
    out.metric("battery_current", current);
    out
}

pub fn discover_temperature(section: &Section) -> bool {
    discover_positive(section, "battery_temperature")
}

pub fn check_temperature(params: &CheckParams, section: &Section) -> CheckOutput {
    let upper = params
        .battery_temp_upper
        .or_else(|| device_levels(section, "temp_up_config", DEVICE_TEMP_SPREAD))
        .unwrap_or(TEMP_UPPER_DEFAULT);
    check_levels(
        section.get("battery_temperature"),
        &LevelsSpec {
            metric_name: "battery_temperature",
            label: "Battery temperature",
            upper: Some(upper),
            lower: Some(params.battery_temp_lower.unwrap_or(TEMP_LOWER_DEFAULT)),
            render: render::celsius,
            boundaries: None,
        },
    )
}

// ============================================================================
// Status services
// ============================================================================

fn battery_status_severity(status: &str) -> State {
    match status {
        "batteryNormal" => State::Ok,
        "batteryLow" | "batteryDepleted" => State::Crit,
        "unknown" => State::Unknown,
        _ => State::Warn,
    }
}

/// Battery status service for the extended profile
pub fn check_battery_status(_params: &CheckParams, section: &Section) -> CheckOutput {
    let mut out = CheckOutput::default();

    let status = section.text("battery_status");
    out.result(
        battery_status_severity(status),
        format!("Battery status: {}", status),
    );

    if let Some(seconds) = section.int("seconds_on_battery") {
        if seconds > 0 {
            out.result(
                State::Warn,
                format!("On battery: {}", render::timespan(seconds as f64)),
            );
            out.metric("seconds_on_battery", seconds as f64);
        }
    }

    if section.flag("battery_abnormal") {
        out.result(State::Warn, "Battery abnormal");
    }
    if section.flag("battery_low_voltage") {
        out.result(State::Crit, "Battery low voltage");
    }

    out
}

/// Combined battery service for the standard profile: status, charge,
/// runtime, voltage and temperature in one service
pub fn check_battery_combined(params: &CheckParams, section: &Section) -> CheckOutput {
    let mut out = CheckOutput::default();

    let status = section.text("battery_status");
    out.result(
        battery_status_severity(status),
        format!("Battery status: {}", status),
    );

    out.extend(check_battery_charge(params, section));
    out.extend(check_battery_runtime(params, section));
    out.extend(check_levels(
        section.get("battery_voltage"),
        &LevelsSpec {
            metric_name: "battery_voltage",
            label: "Battery voltage",
            upper: params.battery_voltage_upper,
            lower: params.battery_voltage_lower,
            render: render::volts,
            boundaries: None,
        },
    ));
    out.extend(check_temperature(params, section));

    out
}
