//! Captured-row input
//!
//! A row file holds one raw SNMP value per line, positionally aligned with
//! the profile's OID table. Lines are taken verbatim apart from the trailing
//! newline; an empty line means the device left that column empty.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

/// Read a captured row from a file, or stdin when the path is `-`
pub fn read_row(path: &Path) -> Result<Vec<String>> {
    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading row from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("reading row from {}", path.display()))?
    };

    Ok(parse_row(&text))
}

fn parse_row(text: &str) -> Vec<String> {
    let mut row: Vec<String> = text
        .lines()
        .map(|line| line.trim_end_matches('\r').to_string())
        .collect();
    // A trailing run of empty lines carries no information; dropping it
    // makes a fully empty capture read as "no data"
    while row.last().is_some_and(|line| line.is_empty()) {
        row.pop();
    }
    row
}
