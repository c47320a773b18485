//! Plain-text tables for the terminal.

use std::fmt::Write;

use leaderboard_core::{BoardReport, FieldSpec, RankedRecord, Standings};

/// Shown when nothing survived qualification.
pub const EMPTY_MESSAGE: &str = "No qualifying data";

/// Render a report as one table per group, followed by the crown tally.
pub fn render_table(report: &BoardReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", report.title);
    let _ = writeln!(out, "{}", "=".repeat(report.title.len()));

    if report.standings.is_empty() {
        let _ = writeln!(out, "{}", EMPTY_MESSAGE);
        return out;
    }

    match &report.standings {
        Standings::Grouped(groups) => {
            for group in groups {
                let _ = writeln!(out);
                let _ = writeln!(
                    out,
                    "{} (total {})",
                    group.key,
                    format_metric(group.total)
                );
                out.push_str(&render_rows(&report.fields, &group.members));
            }
        }
        Standings::Flat(rows) => {
            let _ = writeln!(out);
            out.push_str(&render_rows(&report.fields, rows));
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "crowns: {}", report.tally.describe());
    out
}

fn render_rows(fields: &FieldSpec, rows: &[RankedRecord]) -> String {
    let mut header = vec![
        "Crown".to_string(),
        "Rank".to_string(),
        fields.subject.clone(),
    ];
    header.extend(fields.display.iter().cloned());
    header.push(fields.metric.clone());

    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            let mut cells = vec![
                row.badge.to_string(),
                row.rank.to_string(),
                row.record.subject.clone(),
            ];
            cells.extend(
                fields
                    .display
                    .iter()
                    .map(|name| row.record.column(name).unwrap_or_default().to_string()),
            );
            cells.push(format_metric(row.record.metric));
            cells
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            body.iter()
                .map(|cells| cells[col].chars().count())
                .chain(std::iter::once(header[col].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    push_line(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);
    for cells in &body {
        push_line(&mut out, cells, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "{}", line.trim_end());
}

/// Whole numbers print without decimals, others with up to two.
pub fn format_metric(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        let s = format!("{:.2}", value);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
