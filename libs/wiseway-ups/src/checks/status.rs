//! Device status and identity services
//!
//! Power status folds the supply-path enumerations and abnormality flags
//! into one severity; alarm status aggregates the remaining alarm flags;
//! system info reports identity, ratings and maintenance schedule.

use chrono::NaiveDate;

use crate::levels::{CheckOutput, State};
use crate::params::CheckParams;
use crate::parse::Section;

/// Device-reported date format for installation and maintenance fields
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Identity service for the standard profile
pub fn check_info(_params: &CheckParams, section: &Section) -> CheckOutput {
    let mut out = CheckOutput::default();
    out.result(State::Ok, format!("Model: {}", section.text("model")));
    out.result(
        State::Ok,
        format!(
            "Firmware: {}, Agent: {}",
            section.text("firmware_version"),
            section.text("agent_version")
        ),
    );
    out
}

fn output_source_severity(source: &str) -> State {
    match source {
        "normal" => State::Ok,
        "battery" | "bypass" | "booster" | "reducer" => State::Warn,
        "none" => State::Crit,
        _ => State::Unknown,
    }
}

fn base_output_status_severity(status: &str) -> State {
    match status {
        "onLine" | "ecoMode" | "hotStandby" => State::Ok,
        "onBattery" | "onSmartBoost" | "onSmartTrim" | "onBatteryTest" | "softwareBypass"
        | "switchedBypass" | "rebooting" => State::Warn,
        "off" | "timedSleeping" | "sleepingUntilPowerReturn" | "hardwareFailureBypass" => {
            State::Crit
        },
        _ => State::Unknown,
    }
}

/// Power status service for the extended profile
pub fn check_power_status(_params: &CheckParams, section: &Section) -> CheckOutput {
    let mut out = CheckOutput::default();

    let source = section.text("output_source");
    out.result(
        output_source_severity(source),
        format!("Output source: {}", source),
    );

    let mode = section.text("power_supply_mode");
    let mode_state = match mode {
        "battery" => State::Warn,
        _ => State::Ok,
    };
    out.result(mode_state, format!("Power supply mode: {}", mode));

    let base = section.text("base_output_status");
    out.result(
        base_output_status_severity(base),
        format!("Output status: {}", base),
    );

    if let Some(bads) = section.int("input_line_bads") {
        let state = if bads > 0 { State::Warn } else { State::Ok };
        out.result(state, format!("Input line bads: {}", bads));
        out.metric("input_line_bads", bads as f64);
    }

    if section.flag("battery_powered") {
        out.result(State::Warn, "Powered from battery");
    }
    if section.flag("input_abnormal") {
        out.result(State::Warn, "Input abnormal");
    }
    if section.flag("output_abnormal") {
        out.result(State::Warn, "Output abnormal");
    }
    if section.flag("bypass_status") {
        out.result(State::Warn, "Bypass active");
    }

    out
}

/// Alarm flags that shut the load down or blind the monitoring
const CRITICAL_ALARMS: &[(&str, &str)] = &[
    ("shutdown_imminent", "Shutdown imminent"),
    (
        "low_battery_shutdown_imminent",
        "Low battery shutdown imminent",
    ),
    ("abnormal_communication", "Abnormal communication"),
];

const WARNING_ALARMS: &[(&str, &str)] = &[
    ("temperature_abnormal", "Temperature abnormal"),
    ("overload", "Overload"),
    ("fan_failure", "Fan failure"),
    ("shutdown_request", "Shutdown requested"),
    ("test_in_progress", "Test in progress"),
];

/// Alarm status service for the extended profile
pub fn check_alarm_status(_params: &CheckParams, section: &Section) -> CheckOutput {
    let mut out = CheckOutput::default();

    for (key, message) in CRITICAL_ALARMS {
        if section.flag(key) {
            out.result(State::Crit, *message);
        }
    }
    for (key, message) in WARNING_ALARMS {
        if section.flag(key) {
            out.result(State::Warn, *message);
        }
    }

    // 1 = normal, 2 = abnormal, 3 = fault
    match section.int("system_status") {
        Some(1) | None => {},
        Some(2) => out.result(State::Warn, "System status: abnormal"),
        Some(3) => out.result(State::Crit, "System status: fault"),
        Some(other) => out.result(State::Unknown, format!("System status: {}", other)),
    }

    if out.results.is_empty() {
        out.result(State::Ok, "No active alarms");
    }
    out
}

fn maintenance_result(out: &mut CheckOutput, label: &str, raw: &str, today: NaiveDate) {
    if raw.is_empty() || raw == "Unknown" {
        return;
    }
    match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        Ok(date) if date < today => {
            out.result(State::Warn, format!("{} expired on {}", label, raw));
        },
        Ok(_) => {
            out.result(State::Ok, format!("{} until {}", label, raw));
        },
        // Firmware ships free-form text here on some units
        Err(_) => {
            out.result(State::Ok, format!("{}: {}", label, raw));
        },
    }
}

/// System info service for the extended profile
pub fn check_system_info(params: &CheckParams, section: &Section) -> CheckOutput {
    check_system_info_at(params, section, chrono::Utc::now().date_naive())
}

/// Testable core with an injected "today"
fn check_system_info_at(
    _params: &CheckParams,
    section: &Section,
    today: NaiveDate,
) -> CheckOutput {
    let mut out = CheckOutput::default();

    out.result(
        State::Ok,
        format!(
            "Model: {}, Manufacturer: {}, Serial: {}",
            section.text("model"),
            section.text("manufacturer"),
            section.text("serial_number")
        ),
    );
    out.result(
        State::Ok,
        format!(
            "Firmware: {}, Agent: {}",
            section.text("firmware_version"),
            section.text("agent_version")
        ),
    );

    if let (Some(power), Some(capacity)) = (
        section.float("rated_power"),
        section.float("rated_battery_capacity"),
    ) {
        out.result(
            State::Ok,
            format!(
                "Rated power: {:.0}W, battery capacity: {:.0}Ah",
                power, capacity
            ),
        );
    }
    if let (Some(total), Some(per_group)) = (
        section.int("number_of_batteries"),
        section.int("batteries_per_group"),
    ) {
        if total > 0 {
            out.result(
                State::Ok,
                format!("Batteries: {} ({} per group)", total, per_group),
            );
        }
    }

    let installed = section.text("installation_time");
    if !installed.is_empty() && installed != "Unknown" {
        out.result(State::Ok, format!("Installed: {}", installed));
    }
    let battery_installed = section.text("battery_installation");
    if !battery_installed.is_empty() && battery_installed != "Unknown" {
        out.result(State::Ok, format!("Battery installed: {}", battery_installed));
    }

    maintenance_result(
        &mut out,
        "Maintenance contract",
        section.text("maintenance_expiration"),
        today,
    );
    maintenance_result(
        &mut out,
        "Battery maintenance",
        section.text("battery_next_maintenance"),
        today,
    );

    out
}
