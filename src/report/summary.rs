//! Run summary: plain-text report file and console table

use chrono::NaiveDateTime;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::RunStatistics;

const RULE_WIDTH: usize = 80;

/// Format a count with `,` thousands separators
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn count(value: Option<usize>) -> String {
    format_count(value.unwrap_or(0))
}

/// Render the summary report that is saved to disk and echoed to the console.
pub fn render_summary(stats: &RunStatistics, source: &str, generated_at: NaiveDateTime) -> String {
    let rule = "=".repeat(RULE_WIDTH);

    format!(
        "\n{rule}\n\
         DATA CLEANING SUMMARY\n\
         {rule}\n\
         \n\
         Date: {date}\n\
         Source: {source}\n\
         \n\
         ORIGINAL DATA:\n\
         - Records: {orig_rows}\n\
         - Columns: {orig_cols}\n\
         - Null values: {orig_nulls}\n\
         \n\
         TRANSFORMATIONS APPLIED:\n\
         - Column names standardized\n\
         - Text values trimmed and capitalized\n\
         - Missing values handled\n\
         - Duplicates removed: {dups}\n\
         - New columns added\n\
         \n\
         CLEAN DATA:\n\
         - Records: {final_rows}\n\
         - Columns: {final_cols}\n\
         - Null values: {final_nulls}\n\
         \n\
         Data ready for analysis in Power BI and Looker Studio\n\
         {rule}\n",
        date = generated_at.format("%Y-%m-%d %H:%M:%S"),
        orig_rows = count(stats.original_records),
        orig_cols = stats.original_columns.unwrap_or(0),
        orig_nulls = count(stats.original_nulls),
        dups = count(stats.duplicates_removed),
        final_rows = count(stats.final_records),
        final_cols = stats.final_columns.unwrap_or(0),
        final_nulls = count(stats.final_nulls),
    )
}

/// Print the run statistics as a table, indented like the rest of the output.
pub fn display_statistics(stats: &RunStatistics) {
    println!();
    println!(
        "    {} {}",
        style("📋").cyan(),
        style("CLEANING SUMMARY").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Metric").add_attribute(Attribute::Bold),
        Cell::new("Before").add_attribute(Attribute::Bold),
        Cell::new("After").add_attribute(Attribute::Bold),
    ]);

    table.add_row(vec![
        Cell::new("📁 Records"),
        Cell::new(count(stats.original_records)),
        Cell::new(count(stats.final_records))
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
    ]);

    table.add_row(vec![
        Cell::new("📐 Columns"),
        Cell::new(count(stats.original_columns)),
        Cell::new(count(stats.final_columns)).fg(Color::Green),
    ]);

    let final_nulls = stats.final_nulls.unwrap_or(0);
    table.add_row(vec![
        Cell::new("🕳️  Null values"),
        Cell::new(count(stats.original_nulls)),
        Cell::new(format_count(final_nulls)).fg(if final_nulls == 0 {
            Color::Green
        } else {
            Color::Yellow
        }),
    ]);

    let dups = stats.duplicates_removed.unwrap_or(0);
    table.add_row(vec![
        Cell::new("🗑️  Duplicates removed"),
        Cell::new(""),
        Cell::new(format_count(dups)).fg(if dups == 0 { Color::White } else { Color::Red }),
    ]);

    if let Some(with_coords) = stats.records_with_coordinates {
        table.add_row(vec![
            Cell::new("📍 With coordinates"),
            Cell::new(""),
            Cell::new(format_count(with_coords)).fg(Color::Cyan),
        ]);
    }

    if let Some(skipped) = stats.text_columns_skipped.filter(|&n| n > 0) {
        table.add_row(vec![
            Cell::new("⚠️  Text columns skipped"),
            Cell::new(""),
            Cell::new(skipped).fg(Color::Yellow),
        ]);
    }

    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}
