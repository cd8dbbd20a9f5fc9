use std::time::Duration;

use colored::*;
use tracing::info;
use unicode_width::UnicodeWidthStr;

use crate::terminal::colors;

pub const TOTAL_WIDTH: usize = 64;

/// Events on this target are printed verbatim, without a level symbol.
pub const PRINT_TARGET: &str = "bookworm::print";

pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, "{msg}");
}

pub fn banner(q_level: u8) {
    if q_level > 0 {
        return;
    }

    let text_content: String = format!("⟦ BOOKWORM v{} ⟧ ", env!("CARGO_PKG_VERSION"));
    let text_width: usize = UnicodeWidthStr::width(text_content.as_str());
    let text: ColoredString = text_content.bright_green().bold();
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH.saturating_sub(text_width) / 2).bright_black();

    print(&format!("{}{}{}", sep, text, sep));
}

pub fn header(msg: &str, q_level: u8) {
    if q_level > 0 {
        return;
    }

    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = formatted.chars().count();

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: ColoredString = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right)
    )
    .bright_black();

    print(&format!("{}", line));
}

/// A command as it would be typed into a shell.
pub fn command_line(cmd: &str) {
    let prefix: ColoredString = "$".color(colors::SEPARATOR);
    print(&format!("{} {}", prefix, cmd.color(colors::COMMAND)));
}

pub fn summary(count: usize, what: &str, total_time: Duration, q_level: u8) {
    if q_level > 1 {
        return;
    }

    let count: ColoredString = format!("{count} {what}").bold().color(colors::PRIMARY);
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64())
        .bold()
        .color(colors::ACCENT);

    if q_level == 0 {
        print(&format!("{}", "═".repeat(TOTAL_WIDTH).color(colors::SEPARATOR)));
    }
    let output: String = format!("{} {} in {}", ">".color(colors::SEPARATOR), count, total_time);
    print(&output);
}

pub fn no_results(q_level: u8) {
    if q_level > 1 {
        return;
    }
    print(&format!("{}", "Nothing to do.".red().bold()));
}
