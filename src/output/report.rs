//! Human-readable text report over a data set.

use crate::parser::schema::Record;
use crate::store::DataSet;
use crate::utils::config::KEY_WRAP_WIDTH;
use std::fmt::Write;

/// Format one labelled report line
///
/// **Private** - keeps the label column aligned
fn field_line(out: &mut String, label: &str, value: impl std::fmt::Display) {
    let _ = writeln!(out, "  {:<14}: {}", label, value);
}

fn seconds(value: f64) -> String {
    format!("{:.6} seconds", value)
}

/// Format one record as a text block
///
/// Single-call records show one `Time` line; others show total, longest,
/// shortest and average. Keys are trimmed, and a key that is long or
/// spans lines gets its own block between blank lines.
pub fn format_record(record: &Record) -> String {
    let stats = &record.stats;
    let mut out = String::new();

    field_line(&mut out, "Count", stats.count);
    if stats.count > 1 {
        field_line(&mut out, "Total Time", seconds(stats.total));
        field_line(&mut out, "Longest Time", seconds(stats.longest));
        field_line(&mut out, "Shortest Time", seconds(stats.shortest));
        field_line(&mut out, "Average Time", seconds(stats.average()));
    } else {
        field_line(&mut out, "Time", seconds(stats.total));
    }

    for (i, segment) in record.path.iter().enumerate() {
        let label = format!("Key {}", i + 1);
        let key = segment.trim();
        if key.chars().count() > KEY_WRAP_WIDTH || key.contains('\n') {
            field_line(&mut out, &label, "");
            let _ = write!(out, "\n{}\n\n", key);
        } else {
            field_line(&mut out, &label, key);
        }
    }

    out
}

/// Build the full report showing the first `number` records
///
/// `number` is clamped to the record count. Records appear in the data
/// set's current order.
pub fn report(data: &DataSet, number: usize) -> String {
    let total = data.count();
    let shown = number.min(total);
    let header = data.header();
    let mut out = String::new();

    let _ = writeln!(out, "{}", header.profiler);
    out.push('\n');

    for (key, value) in &header.entries {
        field_line(&mut out, key, value);
    }
    field_line(
        &mut out,
        "Total Records",
        format!(
            "{} (showing {}, sorted by {})",
            total,
            shown,
            data.sort_label()
        ),
    );
    field_line(&mut out, "Total Count", data.total_count());
    field_line(&mut out, "Total Runtime", seconds(data.total_time()));
    out.push('\n');

    for (index, record) in data.records().iter().take(shown).enumerate() {
        let _ = writeln!(out, "{}[ {} ]{}", "#".repeat(5), index + 1, "#".repeat(59));
        out.push_str(&format_record(record));
        out.push('\n');
    }

    out
}
