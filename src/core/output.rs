//! Terminal rendering helpers for the CLI surface.
//!
//! Keeps command output bounded and readable while preserving signal.

use crate::core::geo::MapPoint;
use crate::core::project::Project;
use colored::Colorize;
use std::collections::BTreeMap;

const BANNER_MIN_WIDTH: usize = 32;

/// Collapse newlines/extra whitespace and bound length for terminal display.
pub fn compact_line(input: &str, max_chars: usize) -> String {
    let collapsed = input.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut chars = collapsed.chars();
    let preview: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", preview)
    } else {
        preview
    }
}

fn centered_row(content: &str, width: usize) -> String {
    let content_len = content.chars().count();
    let padding = width.saturating_sub(2).saturating_sub(content_len);
    let left = padding / 2;
    let right = padding - left;
    format!("║{}{}{}║", " ".repeat(left), content, " ".repeat(right))
}

/// Boxed section header, used by `init` and the report surfaces.
pub fn banner(title: &str, subtitle: &str) {
    let width = title
        .chars()
        .count()
        .max(subtitle.chars().count())
        .max(BANNER_MIN_WIDTH)
        + 6;
    println!("{}", format!("╔{}╗", "═".repeat(width - 2)).bright_cyan());
    println!("{}", centered_row(title, width).bright_cyan().bold());
    if !subtitle.is_empty() {
        println!("{}", centered_row(subtitle, width).cyan());
    }
    println!("{}", format!("╚{}╝", "═".repeat(width - 2)).bright_cyan());
}

pub fn status_ok(message: &str) {
    println!("  {} {}", "✓".bright_green(), message.bright_white());
}

pub fn status_warn(message: &str) {
    println!("  {} {}", "⚠".bright_yellow(), message.bright_white());
}

pub fn status_info(message: &str) {
    println!("  {} {}", "▸".bright_cyan(), message.bright_white());
}

/// Tabular record listing for `project list`.
pub fn render_projects_table(rows: &[Project]) {
    if rows.is_empty() {
        status_info("no projects recorded yet");
        return;
    }
    println!(
        "  {:>4}  {:<28}  {:>10}  {:<20}  {}",
        "ID".bold(),
        "NAME".bold(),
        "POWER kW".bold(),
        "LOCATION".bold(),
        "OWNER".bold()
    );
    for row in rows {
        println!(
            "  {:>4}  {:<28}  {:>10.2}  {:<20}  {}",
            row.id,
            compact_line(&row.name, 28),
            row.power_kw,
            compact_line(&row.location, 20),
            compact_line(&row.owner, 24)
        );
    }
    println!();
    status_info(&format!("{} project(s)", rows.len()));
}

/// Installed-power totals per region for `report by-location`.
pub fn render_location_totals(totals: &BTreeMap<String, f64>) {
    if totals.is_empty() {
        status_info("no projects recorded yet");
        return;
    }
    let grand_total: f64 = totals.values().sum();
    println!("  {:<24}  {:>12}", "LOCATION".bold(), "TOTAL kW".bold());
    for (location, total) in totals {
        println!(
            "  {:<24}  {:>12.2}",
            compact_line(location, 24),
            total
        );
    }
    println!();
    status_info(&format!(
        "{} region(s), {:.2} kW installed",
        totals.len(),
        grand_total
    ));
}

/// Plot-ready rows for `map points`. `total_rows` is the pre-annotation
/// count so the excluded records are visible in the summary line.
pub fn render_map_points(points: &[MapPoint], total_rows: usize) {
    if points.is_empty() {
        status_info("no plottable projects");
    } else {
        println!(
            "  {:>4}  {:<28}  {:>9}  {:>9}  {}",
            "ID".bold(),
            "NAME".bold(),
            "LAT".bold(),
            "LON".bold(),
            "LOCATION".bold()
        );
        for point in points {
            println!(
                "  {:>4}  {:<28}  {:>9.4}  {:>9.4}  {}",
                point.id,
                compact_line(&point.name, 28),
                point.lat,
                point.lon,
                point.location
            );
        }
        println!();
    }
    let excluded = total_rows.saturating_sub(points.len());
    if excluded > 0 {
        status_warn(&format!(
            "{} of {} record(s) plottable; {} with unmapped locations excluded",
            points.len(),
            total_rows,
            excluded
        ));
    } else {
        status_info(&format!("{} record(s) plottable", points.len()));
    }
}

/// The known-region table for `map regions`.
pub fn render_regions(regions: &[(&str, f64, f64)]) {
    println!(
        "  {:<24}  {:>9}  {:>9}",
        "REGION".bold(),
        "LAT".bold(),
        "LON".bold()
    );
    for (region, lat, lon) in regions {
        println!("  {:<24}  {:>9.4}  {:>9.4}", region, lat, lon);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_line_collapses_whitespace() {
        assert_eq!(compact_line("a  b\n c", 20), "a b c");
    }

    #[test]
    fn test_compact_line_bounds_length() {
        assert_eq!(compact_line("abcdefgh", 5), "abcde...");
        assert_eq!(compact_line("abcde", 5), "abcde");
    }
}
