//! Check plugins
//!
//! One plugin per monitored service: a discovery predicate deciding whether
//! the service exists for a device, and a check function turning a parsed
//! section plus threshold parameters into results and metrics.
//!
//! Both device profiles share all check logic; the profile only selects
//! which plugins apply.

mod battery;
mod frequency;
mod load;
mod power;
mod status;

use crate::levels::{CheckOutput, SimpleLevels};
use crate::params::CheckParams;
use crate::parse::Section;
use crate::tables::Profile;

/// Discovery predicate: should this service be created for the device?
pub type DiscoveryFn = fn(&Section) -> bool;

/// Check function: evaluate one cycle's section
pub type CheckFn = fn(&CheckParams, &Section) -> CheckOutput;

/// One monitored service definition
#[derive(Debug, Clone, Copy)]
pub struct CheckPlugin {
    /// Stable plugin name (CLI selector, log field)
    pub name: &'static str,
    /// Service name shown on dashboards
    pub service_name: &'static str,
    /// Discovery predicate, evaluated at discovery time only
    pub discovery: DiscoveryFn,
    /// Check function, evaluated every cycle
    pub check: CheckFn,
}

/// Plugins for the standard profile: a few combined services
const WISEWAY3_PLUGINS: &[CheckPlugin] = &[
    CheckPlugin {
        name: "info",
        service_name: "UPS Info",
        discovery: discover_always,
        check: status::check_info,
    },
    CheckPlugin {
        name: "battery",
        service_name: "UPS Battery",
        discovery: discover_always,
        check: battery::check_battery_combined,
    },
    CheckPlugin {
        name: "power",
        service_name: "UPS Power",
        discovery: discover_always,
        check: power::check_power_combined,
    },
    CheckPlugin {
        name: "load",
        service_name: "UPS Load",
        discovery: discover_always,
        check: load::check_load_combined,
    },
    CheckPlugin {
        name: "frequency",
        service_name: "UPS Frequency",
        discovery: discover_always,
        check: frequency::check_frequency_combined,
    },
];

/// Plugins for the extended profile: one service per metric plus the
/// subsystem status services
const WISEWAY3_EXT_PLUGINS: &[CheckPlugin] = &[
    CheckPlugin {
        name: "input_voltage",
        service_name: "UPS Input Voltage",
        discovery: power::discover_input_voltage,
        check: power::check_input_voltage,
    },
    CheckPlugin {
        name: "output_voltage",
        service_name: "UPS Output Voltage",
        discovery: power::discover_output_voltage,
        check: power::check_output_voltage,
    },
    CheckPlugin {
        name: "bypass_voltage",
        service_name: "UPS Bypass Voltage",
        discovery: power::discover_bypass_voltage,
        check: power::check_bypass_voltage,
    },
    CheckPlugin {
        name: "battery_voltage",
        service_name: "UPS Battery Voltage",
        discovery: battery::discover_battery_voltage,
        check: battery::check_battery_voltage,
    },
    CheckPlugin {
        name: "battery_current",
        service_name: "UPS Battery Current",
        discovery: battery::discover_battery_current,
        check: battery::check_battery_current,
    },
    CheckPlugin {
        name: "output_current",
        service_name: "UPS Output Current",
        discovery: load::discover_output_current,
        check: load::check_output_current,
    },
    CheckPlugin {
        name: "temperature",
        service_name: "UPS Battery Temperature",
        discovery: battery::discover_temperature,
        check: battery::check_temperature,
    },
    CheckPlugin {
        name: "input_frequency",
        service_name: "UPS Input Frequency",
        discovery: frequency::discover_input_frequency,
        check: frequency::check_input_frequency,
    },
    CheckPlugin {
        name: "output_frequency",
        service_name: "UPS Output Frequency",
        discovery: frequency::discover_output_frequency,
        check: frequency::check_output_frequency,
    },
    CheckPlugin {
        name: "bypass_frequency",
        service_name: "UPS Bypass Frequency",
        discovery: frequency::discover_bypass_frequency,
        check: frequency::check_bypass_frequency,
    },
    CheckPlugin {
        name: "output_power",
        service_name: "UPS Output Power",
        discovery: load::discover_output_power,
        check: load::check_output_power,
    },
    CheckPlugin {
        name: "output_load",
        service_name: "UPS Output Load",
        discovery: discover_always,
        check: load::check_output_load,
    },
    CheckPlugin {
        name: "battery_charge",
        service_name: "UPS Battery Charge",
        discovery: battery::discover_battery_charge,
        check: battery::check_battery_charge,
    },
    CheckPlugin {
        name: "battery_runtime",
        service_name: "UPS Battery Runtime",
        discovery: battery::discover_battery_runtime,
        check: battery::check_battery_runtime,
    },
    CheckPlugin {
        name: "battery_status",
        service_name: "UPS Battery Status",
        discovery: discover_always,
        check: battery::check_battery_status,
    },
    CheckPlugin {
        name: "power_status",
        service_name: "UPS Power Status",
        discovery: discover_always,
        check: status::check_power_status,
    },
    CheckPlugin {
        name: "alarm_status",
        service_name: "UPS Alarm Status",
        discovery: discover_always,
        check: status::check_alarm_status,
    },
    CheckPlugin {
        name: "system_info",
        service_name: "UPS System Info",
        discovery: discover_always,
        check: status::check_system_info,
    },
];

/// All plugins applicable to a profile
pub fn plugins(profile: Profile) -> &'static [CheckPlugin] {
    match profile {
        Profile::Wiseway3 => WISEWAY3_PLUGINS,
        Profile::Wiseway3Ext => WISEWAY3_EXT_PLUGINS,
    }
}

/// Find one plugin of a profile by name
pub fn plugin(profile: Profile, name: &str) -> Option<&'static CheckPlugin> {
    plugins(profile).iter().find(|p| p.name == name)
}

/// Services that exist as soon as the device answers at all
fn discover_always(section: &Section) -> bool {
    !section.is_empty()
}

/// Discovery rule for metrics that are only meaningful when the device
/// actually reported a positive reading
fn discover_positive(section: &Section, key: &str) -> bool {
    section.float(key).is_some_and(|v| v > 0.0)
}

/// Device-reported threshold pair, usable only when the device actually
/// reports it (a zero config value means "not configured")
fn device_levels(section: &Section, key: &str, spread: f64) -> Option<SimpleLevels> {
    let configured = section.float(key).filter(|v| *v > 0.0)?;
    Some(SimpleLevels::new(configured, configured + spread))
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;
    use crate::parse::parse_section;
    use std::collections::HashSet;

    #[test]
    fn test_plugin_names_unique_per_profile() {
        for profile in [Profile::Wiseway3, Profile::Wiseway3Ext] {
            let mut seen = HashSet::new();
            for p in plugins(profile) {
                assert!(seen.insert(p.name), "duplicate plugin {}", p.name);
            }
        }
    }

    #[test]
    fn test_plugin_lookup() {
        assert!(plugin(Profile::Wiseway3Ext, "alarm_status").is_some());
        assert!(plugin(Profile::Wiseway3, "alarm_status").is_none());
        assert!(plugin(Profile::Wiseway3, "battery").is_some());
    }

    #[test]
    fn test_discover_always_requires_section_content() {
        let table = Profile::Wiseway3.oid_table();
        let row = vec!["Wiseway3".to_string()];
        let section = parse_section(table, &row).unwrap();
        assert!(discover_always(&section));
        assert!(!discover_always(&Section::default()));
    }
}
