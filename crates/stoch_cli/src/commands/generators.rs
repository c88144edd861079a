//! Generators command implementation
//!
//! Lists the available generator kinds, marking the configured one.

use serde::Serialize;
use std::io::Write;
use stoch_random::rng::GeneratorKind;

use super::{write_json, OutputFormat};
use crate::Result;

#[derive(Serialize)]
struct Entry {
    name: &'static str,
    description: &'static str,
    selected: bool,
}

/// Run the generators command
pub fn run<W: Write>(out: &mut W, selected: GeneratorKind, format: OutputFormat) -> Result<()> {
    let entries: Vec<Entry> = GeneratorKind::ALL
        .into_iter()
        .map(|kind| Entry {
            name: kind.name(),
            description: kind.description(),
            selected: kind == selected,
        })
        .collect();

    match format {
        OutputFormat::Table => {
            for entry in &entries {
                let marker = if entry.selected { "*" } else { " " };
                writeln!(out, "{} {:<10} {}", marker, entry.name, entry.description)?;
            }
        }
        OutputFormat::Csv => {
            writeln!(out, "name,selected")?;
            for entry in &entries {
                writeln!(out, "{},{}", entry.name, entry.selected)?;
            }
        }
        OutputFormat::Json => write_json(out, &entries)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_every_kind() {
        let mut out = Vec::new();
        run(&mut out, GeneratorKind::ChaCha8, OutputFormat::Table).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), GeneratorKind::ALL.len());
        for kind in GeneratorKind::ALL {
            assert!(text.contains(kind.name()));
        }
        assert!(text.lines().any(|line| line.starts_with("* chacha8 ")));
    }

    #[test]
    fn test_json_marks_selection() {
        let mut out = Vec::new();
        run(&mut out, GeneratorKind::Pcg32, OutputFormat::Json).unwrap();
        let entries: Vec<serde_json::Value> = serde_json::from_slice(&out).unwrap();
        let selected: Vec<_> = entries
            .iter()
            .filter(|e| e["selected"] == true)
            .map(|e| e["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(selected, vec!["pcg32".to_string()]);
    }
}
