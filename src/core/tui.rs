use colored::Colorize;
use std::env;

const MIN_BOX_WIDTH: usize = 40;
const MAX_BOX_WIDTH: usize = 56;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BoxStyle {
    Info,
    Warning,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ItemStatus {
    Ok,
    Full,
    Missing,
    Info,
}

impl ItemStatus {
    pub fn icon(&self) -> &'static str {
        match self {
            ItemStatus::Ok => "✅",
            ItemStatus::Full => "⚠️",
            ItemStatus::Missing => "❌",
            ItemStatus::Info => "💡",
        }
    }
}

pub fn terminal_width() -> usize {
    env::var("COLUMNS")
        .ok()
        .and_then(|c| c.parse().ok())
        .unwrap_or(80)
}

fn effective_width() -> usize {
    terminal_width().clamp(MIN_BOX_WIDTH, MAX_BOX_WIDTH)
}

pub fn box_top(width: usize) -> String {
    format!("╔{}╗", "═".repeat(width.saturating_sub(2)))
}

pub fn box_bottom(width: usize) -> String {
    format!("╚{}╝", "═".repeat(width.saturating_sub(2)))
}

/// Center `content` between `left` and `right` on a row `width` columns wide.
pub fn box_row(left: &str, content: &str, right: &str, width: usize) -> String {
    let content_len = content.chars().count();
    let padding = width.saturating_sub(2).saturating_sub(content_len);
    let left_pad = padding / 2;
    let right_pad = padding - left_pad;
    format!(
        "{}{}{}{}{}",
        left,
        " ".repeat(left_pad),
        content,
        " ".repeat(right_pad),
        right
    )
}

pub fn render_box(title: &str, subtitle: &str, style: BoxStyle) {
    let width = effective_width();
    match style {
        BoxStyle::Info => {
            println!("{}", box_top(width).bright_cyan());
            println!("{}", box_row("║", title, "║", width).bright_cyan().bold());
            if !subtitle.is_empty() {
                println!("{}", box_row("║", subtitle, "║", width).cyan());
            }
            println!("{}", box_bottom(width).bright_cyan());
        }
        BoxStyle::Warning => {
            println!("{}", box_top(width).bright_yellow());
            println!("{}", box_row("║", title, "║", width).bright_yellow().bold());
            if !subtitle.is_empty() {
                println!("{}", box_row("║", subtitle, "║", width).yellow());
            }
            println!("{}", box_bottom(width).bright_yellow());
        }
    }
}

pub fn print_section(title: &str) {
    println!();
    println!("  {}", title.bold());
}

pub fn print_status_line(message: &str, status: ItemStatus) {
    let icon = status.icon();
    match status {
        ItemStatus::Ok => println!("  {} {}", icon.bright_green(), message.bright_white()),
        ItemStatus::Full => println!("  {} {}", icon.bright_yellow(), message.bright_white()),
        ItemStatus::Missing => println!("  {} {}", icon.bright_red(), message.bright_white()),
        ItemStatus::Info => println!("  {} {}", icon.cyan(), message.bright_white()),
    }
}

pub fn print_list(items: &[&str]) {
    for item in items {
        println!("    • {}", item.bright_white());
    }
}
