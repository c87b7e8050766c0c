//! OID table schema
//!
//! An OID table is an ordered list of immutable [`OidDefinition`] records.
//! The poller fetches the listed OID suffixes in exactly this order, so the
//! position of a definition is the only link between a raw string and its
//! meaning. Position is used during parse and never exposed afterwards.

use crate::convert::Converter;
use crate::value::Value;

/// Finite code → name enumeration for status-type OIDs
///
/// Codes the map does not know resolve to `"unknown"` instead of failing,
/// so firmware additions degrade gracefully.
#[derive(Debug, Clone, Copy)]
pub struct ValueMap(pub &'static [(&'static str, &'static str)]);

impl ValueMap {
    /// Resolve a raw code to its state name
    pub fn resolve(&self, code: &str) -> Value {
        let name = self
            .0
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, name)| *name)
            .unwrap_or("unknown");
        Value::State(name)
    }
}

/// How the raw string of one table column becomes a [`Value`]
#[derive(Debug, Clone, Copy)]
pub enum ValueKind {
    /// Apply a unit/type conversion
    Convert(Converter),
    /// Resolve through a finite enumeration
    Map(ValueMap),
}

impl ValueKind {
    /// Normalize one raw string. Empty input yields the kind's default.
    pub fn normalize(&self, raw: &str) -> Value {
        match self {
            ValueKind::Convert(converter) => {
                if raw.is_empty() {
                    converter.default_value()
                } else {
                    converter.apply(raw)
                }
            },
            ValueKind::Map(map) => {
                if raw.is_empty() {
                    Value::State("unknown")
                } else {
                    map.resolve(raw)
                }
            },
        }
    }

    /// Default produced when the device omits the reading
    pub fn default_value(&self) -> Value {
        match self {
            ValueKind::Convert(converter) => converter.default_value(),
            ValueKind::Map(_) => Value::State("unknown"),
        }
    }
}

/// Complete definition for one OID column including all metadata
#[derive(Debug, Clone, Copy)]
pub struct OidDefinition {
    /// Internal key naming this column within the table
    pub key: &'static str,
    /// OID suffix below the `.1.3.6.1` base, fetched in table order
    pub oid: &'static str,
    /// MIB object name, for operators reading the fetch list
    pub description: &'static str,
    /// Key this column contributes to in the parsed section
    pub output_key: &'static str,
    /// Normalization rule for the raw string
    pub kind: ValueKind,
    /// Internal key of the primary column this one supplements
    ///
    /// Set only on secondary sources: when the primary delivers no usable
    /// reading, this column's value fills the shared `output_key`. Chains
    /// are exactly one level deep.
    pub fallback_for: Option<&'static str>,
}

impl OidDefinition {
    /// Whether this column is a secondary source for another column
    pub fn is_fallback(&self) -> bool {
        self.fallback_for.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_MAP: ValueMap = ValueMap(&[("1", "unknown"), ("2", "batteryNormal")]);

    #[test]
    fn test_value_map_resolve() {
        assert_eq!(TEST_MAP.resolve("2"), Value::State("batteryNormal"));
        assert_eq!(TEST_MAP.resolve("99"), Value::State("unknown"));
    }

    #[test]
    fn test_normalize_empty_uses_default() {
        let kind = ValueKind::Convert(Converter::Float);
        assert_eq!(kind.normalize(""), Value::Float(0.0));

        let mapped = ValueKind::Map(TEST_MAP);
        assert_eq!(mapped.normalize(""), Value::State("unknown"));
    }

    #[test]
    fn test_normalize_applies_converter() {
        let kind = ValueKind::Convert(crate::convert::DECIVOLTS);
        assert_eq!(kind.normalize("2200"), Value::Float(220.0));
    }
}
