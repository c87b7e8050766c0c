//! Threshold evaluation
//!
//! Compares one normalized reading against optional warning/critical level
//! pairs in the upper and lower direction and renders the outcome as
//! monitoring results plus metric data points.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value::Value;

/// Check state emitted per result
///
/// `Unknown` marks indeterminate readings (sentinel values, missing data)
/// and must never be conflated with a real breach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum State {
    /// Within all configured levels
    Ok,
    /// Warning level breached
    Warn,
    /// Critical level breached
    Crit,
    /// Reading indeterminate, no judgement possible
    Unknown,
}

impl State {
    /// Severity rank for worst-of aggregation: OK < WARN < UNKNOWN < CRIT
    fn rank(&self) -> u8 {
        match self {
            State::Ok => 0,
            State::Warn => 1,
            State::Unknown => 2,
            State::Crit => 3,
        }
    }

    /// The more severe of two states
    pub fn worst(self, other: State) -> State {
        if other.rank() > self.rank() {
            other
        } else {
            self
        }
    }

    /// Stable short name used in summaries and CLI output
    pub fn as_str(&self) -> &'static str {
        match self {
            State::Ok => "OK",
            State::Warn => "WARN",
            State::Crit => "CRIT",
            State::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Warning/critical level pair for one direction
///
/// For the upper direction the reading breaches at `value >= level`, for
/// the lower direction at `value <= level`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimpleLevels {
    /// Warning level
    pub warn: f64,
    /// Critical level
    pub crit: f64,
}

impl SimpleLevels {
    /// Construct a level pair
    pub fn new(warn: f64, crit: f64) -> Self {
        Self { warn, crit }
    }
}

/// One (state, summary) pair emitted by a check
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    /// Severity of this result
    pub state: State,
    /// Human-readable summary line
    pub summary: String,
}

/// One metric data point emitted by a check
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    /// Metric name as graphed by the monitoring backend
    pub name: &'static str,
    /// Numeric value
    pub value: f64,
    /// Optional display boundaries (e.g. 0..100 for percentages)
    pub boundaries: Option<(f64, f64)>,
}

/// Ordered output of one check invocation
#[derive(Debug, Default, Clone, Serialize)]
pub struct CheckOutput {
    /// Results in emission order; the first summary leads the service line
    pub results: Vec<CheckResult>,
    /// Metric data points
    pub metrics: Vec<Metric>,
}

impl CheckOutput {
    /// Append a result
    pub fn result(&mut self, state: State, summary: impl Into<String>) {
        self.results.push(CheckResult {
            state,
            summary: summary.into(),
        });
    }

    /// Append a metric data point
    pub fn metric(&mut self, name: &'static str, value: f64) {
        self.metrics.push(Metric {
            name,
            value,
            boundaries: None,
        });
    }

    /// Append a metric data point with display boundaries
    pub fn metric_bounded(&mut self, name: &'static str, value: f64, boundaries: (f64, f64)) {
        self.metrics.push(Metric {
            name,
            value,
            boundaries: Some(boundaries),
        });
    }

    /// Append everything from another output
    pub fn extend(&mut self, other: CheckOutput) {
        self.results.extend(other.results);
        self.metrics.extend(other.metrics);
    }

    /// Worst state across all results; OK when nothing was emitted
    pub fn overall_state(&self) -> State {
        self.results
            .iter()
            .fold(State::Ok, |acc, r| acc.worst(r.state))
    }

    /// The canonical "device delivered nothing" output
    pub fn no_data() -> Self {
        let mut out = CheckOutput::default();
        out.result(State::Unknown, "No data");
        out
    }
}

/// Parameters for one [`check_levels`] evaluation
pub struct LevelsSpec<'a> {
    /// Metric name emitted alongside the results
    pub metric_name: &'static str,
    /// Label leading the summary line
    pub label: &'a str,
    /// Upper-direction levels, breached at `value >= level`
    pub upper: Option<SimpleLevels>,
    /// Lower-direction levels, breached at `value <= level`
    pub lower: Option<SimpleLevels>,
    /// Value renderer for the summary
    pub render: fn(f64) -> String,
    /// Optional metric display boundaries
    pub boundaries: Option<(f64, f64)>,
}

/// Evaluate one reading against its configured levels
///
/// With no levels set the reading is always OK but still emitted as a
/// metric. Indeterminate readings yield a single UNKNOWN result and no
/// metric, keeping sentinel values out of the graphs.
pub fn check_levels(value: Option<&Value>, spec: &LevelsSpec<'_>) -> CheckOutput {
    let mut out = CheckOutput::default();

    let reading = match value {
        Some(v) => match v.as_f64() {
            Some(reading) => reading,
            None => {
                out.result(State::Unknown, format!("{}: no reading", spec.label));
                return out;
            },
        },
        None => {
            out.result(State::Unknown, format!("{}: no reading", spec.label));
            return out;
        },
    };

    let mut state = State::Ok;
    let mut breach = None;

    if let Some(upper) = spec.upper {
        if reading >= upper.crit {
            state = state.worst(State::Crit);
            breach = Some(format!(
                "warn/crit at {}/{}",
                (spec.render)(upper.warn),
                (spec.render)(upper.crit)
            ));
        } else if reading >= upper.warn {
            state = state.worst(State::Warn);
            breach = Some(format!(
                "warn/crit at {}/{}",
                (spec.render)(upper.warn),
                (spec.render)(upper.crit)
            ));
        }
    }

    if let Some(lower) = spec.lower {
        if reading <= lower.crit {
            state = state.worst(State::Crit);
            breach = Some(format!(
                "warn/crit below {}/{}",
                (spec.render)(lower.warn),
                (spec.render)(lower.crit)
            ));
        } else if reading <= lower.warn && state != State::Crit {
            state = state.worst(State::Warn);
            breach = Some(format!(
                "warn/crit below {}/{}",
                (spec.render)(lower.warn),
                (spec.render)(lower.crit)
            ));
        }
    }

    let summary = match (&breach, state) {
        (Some(levels), s) if s != State::Ok => {
            format!("{}: {} ({})", spec.label, (spec.render)(reading), levels)
        },
        _ => format!("{}: {}", spec.label, (spec.render)(reading)),
    };
    out.result(state, summary);

    match spec.boundaries {
        Some(bounds) => out.metric_bounded(spec.metric_name, reading, bounds),
        None => out.metric(spec.metric_name, reading),
    }

    out
}

/// Value renderers for summary lines
pub mod render {
    /// `231.9V`
    pub fn volts(v: f64) -> String {
        format!("{:.1}V", v)
    }

    /// `50.0 Hz`
    pub fn hertz(v: f64) -> String {
        format!("{:.1} Hz", v)
    }

    /// `15.0A`
    pub fn amps(v: f64) -> String {
        format!("{:.1}A", v)
    }

    /// `5000W`
    pub fn watts(v: f64) -> String {
        format!("{:.0}W", v)
    }

    /// `85.0%`
    pub fn percent(v: f64) -> String {
        format!("{:.1}%", v)
    }

    /// `25.4°C`
    pub fn celsius(v: f64) -> String {
        format!("{:.1}°C", v)
    }

    /// Seconds as a compact duration: `1h 10m`, `10m 0s`, `45s`
    pub fn timespan(v: f64) -> String {
        let total = v.max(0.0).round() as u64;
        let (hours, rest) = (total / 3600, total % 3600);
        let (minutes, seconds) = (rest / 60, rest % 60);
        if hours > 0 {
            format!("{}h {}m", hours, minutes)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;

    fn spec<'a>(upper: Option<SimpleLevels>, lower: Option<SimpleLevels>) -> LevelsSpec<'a> {
        LevelsSpec {
            metric_name: "test_metric",
            label: "Test",
            upper,
            lower,
            render: render::volts,
            boundaries: None,
        }
    }

    #[test]
    fn test_worst_of_ordering() {
        assert_eq!(State::Ok.worst(State::Warn), State::Warn);
        assert_eq!(State::Warn.worst(State::Unknown), State::Unknown);
        assert_eq!(State::Unknown.worst(State::Crit), State::Crit);
        assert_eq!(State::Crit.worst(State::Ok), State::Crit);
    }

    #[test]
    fn test_upper_levels() {
        let s = spec(Some(SimpleLevels::new(250.0, 260.0)), None);
        let v = Value::Float(261.0);
        assert_eq!(check_levels(Some(&v), &s).overall_state(), State::Crit);
        let v = Value::Float(255.0);
        assert_eq!(check_levels(Some(&v), &s).overall_state(), State::Warn);
        let v = Value::Float(100.0);
        assert_eq!(check_levels(Some(&v), &s).overall_state(), State::Ok);
    }

    #[test]
    fn test_upper_breach_at_exact_level() {
        let s = spec(Some(SimpleLevels::new(250.0, 260.0)), None);
        let v = Value::Float(260.0);
        assert_eq!(check_levels(Some(&v), &s).overall_state(), State::Crit);
        let v = Value::Float(250.0);
        assert_eq!(check_levels(Some(&v), &s).overall_state(), State::Warn);
    }

    #[test]
    fn test_lower_levels() {
        let s = spec(None, Some(SimpleLevels::new(20.0, 10.0)));
        let v = Value::Float(5.0);
        assert_eq!(check_levels(Some(&v), &s).overall_state(), State::Crit);
        let v = Value::Float(15.0);
        assert_eq!(check_levels(Some(&v), &s).overall_state(), State::Warn);
        let v = Value::Float(50.0);
        assert_eq!(check_levels(Some(&v), &s).overall_state(), State::Ok);
    }

    #[test]
    fn test_no_levels_is_ok_with_metric() {
        let s = spec(None, None);
        let v = Value::Float(42.0);
        let out = check_levels(Some(&v), &s);
        assert_eq!(out.overall_state(), State::Ok);
        assert_eq!(out.metrics.len(), 1);
        assert_eq!(out.metrics[0].value, 42.0);
    }

    #[test]
    fn test_unknown_reading_is_indeterminate() {
        let s = spec(Some(SimpleLevels::new(250.0, 260.0)), None);
        let out = check_levels(Some(&Value::Unknown), &s);
        assert_eq!(out.overall_state(), State::Unknown);
        assert!(out.metrics.is_empty());

        let out = check_levels(None, &s);
        assert_eq!(out.overall_state(), State::Unknown);
    }

    #[test]
    fn test_breach_summary_names_levels() {
        let s = spec(Some(SimpleLevels::new(250.0, 260.0)), None);
        let v = Value::Float(255.0);
        let out = check_levels(Some(&v), &s);
        assert_eq!(out.results[0].summary, "Test: 255.0V (warn/crit at 250.0V/260.0V)");
    }

    #[test]
    fn test_boundaries_forwarded() {
        let mut s = spec(None, None);
        s.boundaries = Some((0.0, 100.0));
        let v = Value::Float(85.0);
        let out = check_levels(Some(&v), &s);
        assert_eq!(out.metrics[0].boundaries, Some((0.0, 100.0)));
    }

    #[test]
    fn test_no_data_output() {
        let out = CheckOutput::no_data();
        assert_eq!(out.overall_state(), State::Unknown);
        assert!(out.metrics.is_empty());
        assert_eq!(out.results.len(), 1);
    }

    #[test]
    fn test_render_timespan() {
        assert_eq!(render::timespan(600.0), "10m 0s");
        assert_eq!(render::timespan(4260.0), "1h 11m");
        assert_eq!(render::timespan(45.0), "45s");
    }
}
