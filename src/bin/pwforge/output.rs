//! Rendering generated secrets for the terminal.

use std::io::{self, Write};

use anyhow::Context;
use console::style;
use pwforge::{GenerationResult, Mode, Strength};
use serde::Serialize;

use crate::table::Table;

pub(crate) struct Report {
    pub mode: Mode,
    pub results: Vec<GenerationResult>,
    /// Present when the secrets were checked against the breach database, one per result.
    pub breaches: Option<Vec<u64>>,
}

impl Report {
    fn secret_label(&self) -> &'static str {
        match self.mode {
            Mode::Random => "Password",
            Mode::Passphrase => "Passphrase",
        }
    }

    fn breach_count(&self, index: usize) -> Option<u64> {
        self.breaches.as_ref().and_then(|b| b.get(index).copied())
    }

    /// Every secret, one per line.
    pub fn joined(&self) -> String {
        self.results
            .iter()
            .map(|result| result.secret.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub(crate) fn print_plain(report: &Report) -> anyhow::Result<()> {
    write_plain(report, io::stdout().lock()).context("failed to write to stdout")
}

pub(crate) fn print_verbose(report: &Report) -> anyhow::Result<()> {
    write_verbose(report, io::stdout().lock()).context("failed to write to stdout")
}

pub(crate) fn print_json(report: &Report) -> anyhow::Result<()> {
    write_json(report, io::stdout().lock()).context("failed to write JSON to stdout")
}

fn write_plain(report: &Report, mut output: impl Write) -> io::Result<()> {
    for result in &report.results {
        writeln!(output, "{}", result.secret.as_str())?;
    }
    Ok(())
}

fn write_verbose(report: &Report, mut output: impl Write) -> io::Result<()> {
    if let [result] = report.results.as_slice() {
        let label = format!("{}:", report.secret_label());
        writeln!(output, "{label:<12}{}", result.secret.as_str())?;
        writeln!(output, "{:<12}{:.2} bits", "Entropy:", result.entropy)?;
        writeln!(output, "{:<12}{}", "Strength:", styled_strength(result.strength))?;
        if let Some(count) = report.breach_count(0) {
            writeln!(output, "{:<12}{count}", "Breaches:")?;
        }
    } else {
        let mut headers = vec![report.secret_label(), "Entropy (bits)", "Strength"];
        if report.breaches.is_some() {
            headers.push("Breaches");
        }
        let mut table = Table::new(headers);
        for (index, result) in report.results.iter().enumerate() {
            let mut row = vec![
                result.secret.as_str().to_owned(),
                format!("{:.2}", result.entropy),
                result.strength.to_string(),
            ];
            if let Some(count) = report.breach_count(index) {
                row.push(count.to_string());
            }
            table.push_row(row);
        }
        table.write_to(&mut output)?;
    }

    let compromised = report
        .breaches
        .iter()
        .flatten()
        .filter(|count| **count > 0)
        .count();
    if compromised > 0 {
        writeln!(
            output,
            "{}",
            style(format!(
                "Warning: {compromised} of these secrets appeared in known data breaches; \
                 don't use them."
            ))
            .red()
            .bold()
        )?;
    }
    Ok(())
}

fn styled_strength(strength: Strength) -> console::StyledObject<Strength> {
    let styled = style(strength);
    match strength {
        Strength::Weak => styled.red(),
        Strength::Medium => styled.yellow(),
        Strength::Strong => styled.green(),
        Strength::VeryStrong => styled.green().bold(),
    }
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    #[serde(flatten)]
    result: &'a GenerationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    breaches: Option<u64>,
}

fn write_json(report: &Report, mut output: impl Write) -> io::Result<()> {
    let entries = report
        .results
        .iter()
        .enumerate()
        .map(|(index, result)| JsonEntry {
            result,
            breaches: report.breach_count(index),
        })
        .collect::<Vec<_>>();
    match entries.as_slice() {
        [entry] => serde_json::to_writer_pretty(&mut output, entry)?,
        entries => serde_json::to_writer_pretty(&mut output, entries)?,
    }
    writeln!(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(count: usize, breaches: Option<Vec<u64>>) -> Report {
        let results = (0..count)
            .map(|_| pwforge::generate_full(16usize).unwrap())
            .collect();
        Report {
            mode: Mode::Random,
            results,
            breaches,
        }
    }

    fn render(f: fn(&Report, &mut Vec<u8>) -> io::Result<()>, report: &Report) -> String {
        let mut out = Vec::new();
        f(report, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn plain_output_is_one_secret_per_line() {
        let report = report(3, None);
        let text = render(|r, o| write_plain(r, o), &report);
        assert_eq!(text, format!("{}\n", report.joined()));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn verbose_output_for_one_secret() {
        let report = report(1, Some(vec![0]));
        let text = render(|r, o| write_verbose(r, o), &report);
        assert!(text.contains(report.results[0].secret.as_str()));
        assert!(text.contains(&format!("{:.2} bits", report.results[0].entropy)));
        assert!(text.starts_with("Password:"));
        assert!(text.contains("Breaches:   0"));
        assert!(!text.contains("Warning"));
    }

    #[test]
    fn verbose_output_names_passphrases() {
        let result = pwforge::generate_full(pwforge::GenerationRequest {
            mode: Some(Mode::Passphrase),
            ..Default::default()
        })
        .unwrap();
        let single = Report {
            mode: Mode::Passphrase,
            results: vec![result.clone()],
            breaches: None,
        };
        let text = render(|r, o| write_verbose(r, o), &single);
        assert!(text.starts_with(&format!("Passphrase: {}", result.secret.as_str())));
        assert!(!text.contains("Password"));

        let many = Report {
            mode: Mode::Passphrase,
            results: vec![result.clone(), result],
            breaches: None,
        };
        assert!(render(|r, o| write_verbose(r, o), &many).starts_with("Passphrase"));
    }

    #[test]
    fn verbose_output_warns_about_breached_secrets() {
        let report = report(2, Some(vec![0, 12]));
        let text = render(|r, o| write_verbose(r, o), &report);
        assert!(text.starts_with("Password"));
        assert!(text.contains("Breaches"));
        assert!(text.contains("1 of these secrets"));
    }

    #[test]
    fn json_output_shape() {
        let single = report(1, None);
        let value: serde_json::Value =
            serde_json::from_str(&render(|r, o| write_json(r, o), &single)).unwrap();
        assert_eq!(value["password"], single.results[0].secret.as_str());
        assert!(value.get("breaches").is_none());

        let many = report(2, Some(vec![3, 0]));
        let value: serde_json::Value =
            serde_json::from_str(&render(|r, o| write_json(r, o), &many)).unwrap();
        let entries = value.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["breaches"], 3);
        assert_eq!(entries[1]["strength"], "Very Strong");
    }
}
