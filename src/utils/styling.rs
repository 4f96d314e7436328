//! Terminal styling utilities for stage-by-stage progress output

use console::{style, Emoji};
use std::path::Path;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[!] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");
pub static PIN: Emoji<'_, '_> = Emoji("📌 ", "");

/// Print the application banner
pub fn print_banner(version: &str) {
    let banner = r#"
    ╔╦╗╔═╗╦ ╦╦═╗╔═╗╦  ╔═╗╔═╗╔╗╔
     ║ ║ ║║ ║╠╦╝║  ║  ║╣ ╠═╣║║║
     ╩ ╚═╝╚═╝╩╚═╚═╝╩═╝╚═╝╩ ╩╝╚╝
    "#;

    println!();
    println!("{}", style(banner).cyan().bold());
    println!(
        "    {}",
        style("Tourism resource inventory cleaner").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print configuration card
pub fn print_config(input: &Path, output_dir: &Path, min_columns: usize, sentinel: &str) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);

    println!("    ┌{}┐", line);
    println!(
        "    │ {}{}│",
        style("⚙️  Configuration").cyan().bold(),
        " ".repeat(box_width - 20)
    );
    println!("    ├{}┤", line);
    println!("    │  {} Input:  {:<39}│", FOLDER, truncate_path(input, 38));
    println!("    │  {} Output: {:<39}│", SAVE, truncate_path(output_dir, 38));
    println!("    ├{}┤", line);
    println!(
        "    │  {} Min columns:  {:<33}│",
        PIN,
        style(format!("> {}", min_columns)).yellow()
    );
    println!(
        "    │  {} Null filler:  {:<33}│",
        PIN,
        style(truncate_string(sentinel, 32)).yellow()
    );
    println!("    └{}┘", line);
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print a warning message (the run continues)
pub fn print_warning(message: &str) {
    println!("    {} {}", WARN, style(message).yellow());
}

/// Print a labelled value, indented under a step
pub fn print_detail(label: &str, value: impl std::fmt::Display) {
    println!("      {}: {}", label, style(value).yellow());
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        ROCKET,
        style("Cleaning complete!").green().bold()
    );
    println!();
}

// Helper functions

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

/// Keep the tail of `s` within `max_len` characters, prefixed with `...`
pub fn truncate_string(s: &str, max_len: usize) -> String {
    let len = s.chars().count();
    if len <= max_len {
        s.to_string()
    } else {
        let tail: String = s.chars().skip(len - max_len + 3).collect();
        format!("...{}", tail)
    }
}
