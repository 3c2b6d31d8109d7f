//! Terminal rendering helpers: colored status lines and comfy-table grids.

use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Table};
use serde::Serialize;

pub fn print_json<T: Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("{} failed to serialize JSON: {err}", "x".red()),
    }
}

pub fn print_success(message: &str) {
    println!("{} {message}", "OK".green().bold());
}

pub fn print_error(message: &str) {
    eprintln!("{} {message}", "x".red().bold());
}

pub fn print_info(message: &str) {
    println!("{} {message}", "i".blue().bold());
}

pub fn create_table(headers: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(headers.into_iter().map(|h| Cell::new(h).set_alignment(CellAlignment::Center)));
    table
}

pub fn colored_grade(grade: &str) -> colored::ColoredString {
    match grade {
        "A" => grade.green().bold(),
        "B" => grade.cyan().bold(),
        "C" => grade.yellow().bold(),
        _ => grade.red().bold(),
    }
}

pub fn colored_score(score: f64) -> String {
    let rounded = format!("{score:.1}");
    if score >= 80.0 {
        rounded.green().to_string()
    } else if score >= 60.0 {
        rounded.yellow().to_string()
    } else {
        rounded.red().to_string()
    }
}
