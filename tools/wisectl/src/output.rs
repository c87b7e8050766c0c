//! Report building and terminal rendering

use colored::*;
use serde::Serialize;

use wiseway_ups::checks::CheckPlugin;
use wiseway_ups::{CheckOutput, CheckParams, Profile, Section, State};

/// One evaluated service in a report
#[derive(Debug, Serialize)]
pub struct ServiceReport {
    pub plugin: &'static str,
    pub service_name: &'static str,
    pub state: State,
    #[serde(flatten)]
    pub output: CheckOutput,
}

/// Full result of one check run
#[derive(Debug, Serialize)]
pub struct Report {
    pub profile: &'static str,
    pub overall: State,
    pub services: Vec<ServiceReport>,
}

impl Report {
    /// Monitoring-agent exit code convention
    pub fn exit_code(&self) -> i32 {
        match self.overall {
            State::Ok => 0,
            State::Warn => 1,
            State::Crit => 2,
            State::Unknown => 3,
        }
    }
}

/// Evaluate the selected plugins into a report
///
/// A missing section (device delivered nothing) yields one UNKNOWN entry
/// per selected service instead of silently skipping them.
pub fn build_report(
    profile: Profile,
    params: &CheckParams,
    section: Option<&Section>,
    selected: &[&CheckPlugin],
) -> Report {
    let services: Vec<ServiceReport> = selected
        .iter()
        .map(|plugin| {
            let output = match section {
                Some(section) => (plugin.check)(params, section),
                None => CheckOutput::no_data(),
            };
            ServiceReport {
                plugin: plugin.name,
                service_name: plugin.service_name,
                state: output.overall_state(),
                output,
            }
        })
        .collect();

    let overall = services
        .iter()
        .fold(State::Ok, |acc, s| acc.worst(s.state));

    Report {
        profile: profile.as_str(),
        overall,
        services,
    }
}

fn colorize(state: State) -> ColoredString {
    match state {
        State::Ok => state.as_str().green(),
        State::Warn => state.as_str().yellow(),
        State::Crit => state.as_str().red().bold(),
        State::Unknown => state.as_str().magenta(),
    }
}

/// Render a report for the terminal
pub fn print_report(report: &Report) {
    for service in &report.services {
        println!(
            "[{}] {}",
            colorize(service.state),
            service.service_name.bold()
        );
        for result in &service.output.results {
            println!("    {} {}", colorize(result.state), result.summary);
        }
        for metric in &service.output.metrics {
            println!("    {} {}={}", "·".dimmed(), metric.name, metric.value);
        }
    }
    println!(
        "\nOverall: {} ({} services)",
        colorize(report.overall),
        report.services.len()
    );
}

/// Render a profile's OID table
pub fn print_oid_table(profile: Profile) -> anyhow::Result<()> {
    println!("Profile: {}\n", profile.as_str().bold());
    for def in profile.oid_table() {
        let marker = if def.is_fallback() { "  ↳ " } else { "" };
        println!(
            "{:<44} {}{} ({})",
            def.oid,
            marker,
            def.output_key.bold(),
            def.description
        );
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;
    use wiseway_ups::{checks, parse_section};

    #[test]
    fn test_report_without_section_is_all_unknown() {
        let selected: Vec<_> = checks::plugins(Profile::Wiseway3).iter().collect();
        let report = build_report(
            Profile::Wiseway3,
            &CheckParams::default(),
            None,
            &selected,
        );
        assert_eq!(report.overall, State::Unknown);
        assert_eq!(report.exit_code(), 3);
        assert!(report.services.iter().all(|s| s.state == State::Unknown));
    }

    #[test]
    fn test_report_json_shape() {
        let table = Profile::Wiseway3Ext.oid_table();
        let mut row: Vec<String> = table.iter().map(|_| String::new()).collect();
        let idx = table
            .iter()
            .position(|d| d.key == "output_load")
            .unwrap();
        row[idx] = "42".to_string();

        let section = parse_section(table, &row).unwrap();
        let plugin = checks::plugin(Profile::Wiseway3Ext, "output_load").unwrap();
        let report = build_report(
            Profile::Wiseway3Ext,
            &CheckParams::default(),
            Some(&section),
            &[plugin],
        );
        assert_eq!(report.exit_code(), 0);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["profile"], "wiseway3-ext");
        assert_eq!(json["overall"], "OK");
        assert_eq!(json["services"][0]["metrics"][0]["name"], "output_load");
    }
}
