//! Raw row parsing and fallback resolution
//!
//! One monitoring cycle delivers one raw row: an ordered list of strings
//! positionally aligned with the active OID table. Parsing zips the two,
//! normalizes every column and resolves primary/fallback pairs, producing
//! a [`Section`] that the check plugins consume.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::oid::OidDefinition;
use crate::value::Value;

/// Parsed section: `output_key` → normalized value for one cycle
///
/// Built fresh from every raw row and discarded after the checks run.
/// Lookups use get-with-default semantics; a key may be absent when the
/// raw row was shorter than the OID table.
#[derive(Debug, Default, Clone, Serialize)]
pub struct Section {
    values: HashMap<&'static str, Value>,
}

impl Section {
    /// Raw access to one value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Numeric reading; `None` when absent, non-numeric or indeterminate
    pub fn float(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    /// Integer reading; `None` when absent, non-integer or indeterminate
    pub fn int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    /// Textual reading with the parser's placeholder as default
    pub fn text(&self, key: &str) -> &str {
        self.get(key).and_then(Value::as_text).unwrap_or("Unknown")
    }

    /// Whether the reading carries the explicit indeterminate marker
    pub fn is_unknown(&self, key: &str) -> bool {
        matches!(self.get(key), Some(Value::Unknown))
    }

    /// Boolean alarm flag: integer reading equal to 1
    pub fn flag(&self, key: &str) -> bool {
        self.int(key) == Some(1)
    }

    /// Number of populated output keys
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing was populated
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over populated readings
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }

    fn insert(&mut self, key: &'static str, value: Value) {
        self.values.insert(key, value);
    }

    /// Build a section directly from key/value pairs, bypassing row parsing
    #[cfg(test)]
    pub(crate) fn insert_for_test(&mut self, key: &'static str, value: Value) {
        self.insert(key, value);
    }
}

/// A raw reading that can contribute a value: present and not the literal
/// "no reading" zero
fn usable(raw: &str) -> bool {
    !raw.is_empty() && raw != "0"
}

/// Parse one raw row against an OID table
///
/// Returns `None` when the device delivered no row at all; callers emit a
/// single "no data" result in that case. Rows shorter than the table leave
/// the trailing output keys unpopulated; excess row entries are ignored.
pub fn parse_section(table: &[OidDefinition], row: &[String]) -> Option<Section> {
    if row.is_empty() {
        return None;
    }

    // Positional zip: indices beyond the shorter side never contribute
    let raw: HashMap<&str, &str> = table
        .iter()
        .zip(row.iter())
        .map(|(def, value)| (def.key, value.as_str()))
        .collect();

    let mut section = Section::default();

    // Pass 1: populate every primary, substituting its fallback when the
    // primary raw value is absent or "0"
    for def in table.iter().filter(|d| !d.is_fallback()) {
        let Some(&primary_raw) = raw.get(def.key) else {
            continue;
        };

        let (raw_value, kind) = if usable(primary_raw) {
            (primary_raw, &def.kind)
        } else {
            match table
                .iter()
                .find(|d| d.fallback_for == Some(def.key))
                .and_then(|fb| raw.get(fb.key).map(|r| (fb, *r)))
            {
                Some((fb, fb_raw)) if usable(fb_raw) => {
                    debug!(
                        primary = def.key,
                        fallback = fb.key,
                        "primary reading absent, using fallback source"
                    );
                    (fb_raw, &fb.kind)
                },
                _ => (primary_raw, &def.kind),
            }
        };

        section.insert(def.output_key, kind.normalize(raw_value));
    }

    // Pass 2: fallback targets that still hold the empty-row default get a
    // second chance, covering rows where the primary column was truncated
    for fb in table.iter().filter(|d| d.is_fallback()) {
        let unsatisfied = match section.get(fb.output_key) {
            None => true,
            Some(value) => value.as_f64() == Some(0.0),
        };
        if !unsatisfied {
            continue;
        }
        if let Some(&fb_raw) = raw.get(fb.key) {
            if usable(fb_raw) {
                section.insert(fb.output_key, fb.kind.normalize(fb_raw));
            }
        }
    }

    Some(section)
}
