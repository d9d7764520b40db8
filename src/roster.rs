use crate::{location_search_text, strip_protocol, Ambassador, Merchant};

pub(crate) const NO_DATA_FALLBACK: &str = "No data found";

pub(crate) const AMBASSADOR_COLUMNS: &[&str] = &[
    "Nickname", "Telegram", "Keybase", "Email", "Phone", "URL", "Location",
];

pub(crate) const MERCHANT_COLUMNS: &[&str] =
    &["Name", "Address", "Phone", "Website", "Location"];

/// One rendered table row: display cells plus the text the search box
/// matches against. Built as a projection at render time; the fetched
/// record itself is never decorated.
#[derive(Debug, Clone)]
pub(crate) struct RosterRow {
    pub(crate) cells: Vec<String>,
    pub(crate) search_text: String,
}

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

pub(crate) fn ambassador_row(ambassador: &Ambassador) -> RosterRow {
    let location = location_search_text(&ambassador.cities);
    let url = ambassador
        .url
        .as_deref()
        .map(strip_protocol)
        .unwrap_or_default();
    let cells = vec![
        ambassador.nickname.clone(),
        opt(&ambassador.telegram),
        opt(&ambassador.keybase),
        opt(&ambassador.email),
        opt(&ambassador.phone),
        url,
        location,
    ];
    let search_text = cells.join(" ");
    RosterRow { cells, search_text }
}

pub(crate) fn merchant_row(merchant: &Merchant) -> RosterRow {
    let location = match (&merchant.city, &merchant.country) {
        (Some(city), Some(country)) => format!("{city} - {country}"),
        (Some(city), None) => city.clone(),
        (None, Some(country)) => country.clone(),
        (None, None) => String::new(),
    };
    let cells = vec![
        merchant.name.clone(),
        opt(&merchant.address),
        opt(&merchant.phone),
        merchant
            .website
            .as_deref()
            .map(strip_protocol)
            .unwrap_or_default(),
        location,
    ];
    let search_text = cells.join(" ");
    RosterRow { cells, search_text }
}

/// Case-insensitive substring match over each row's search text.
pub(crate) fn filter_rows(rows: Vec<RosterRow>, needle: &str) -> Vec<RosterRow> {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return rows;
    }
    rows.into_iter()
        .filter(|row| row.search_text.to_lowercase().contains(&needle))
        .collect()
}

/// Plain fixed-width table for the terminal. Column widths come from the
/// widest cell, capped so one long URL cannot blow up the layout.
pub(crate) fn render_table(columns: &[&str], rows: &[RosterRow]) -> String {
    const MAX_CELL_WIDTH: usize = 40;

    let clip = |value: &str| -> String {
        if value.chars().count() > MAX_CELL_WIDTH {
            let clipped: String = value.chars().take(MAX_CELL_WIDTH - 1).collect();
            format!("{clipped}\u{2026}")
        } else {
            value.to_string()
        }
    };

    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    let clipped_rows: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.cells.iter().map(|c| clip(c)).collect())
        .collect();
    for row in &clipped_rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let render_line = |cells: &[String]| -> String {
        let mut line = String::new();
        for (i, width) in widths.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            let padding = width.saturating_sub(cell.chars().count());
            line.push_str(cell);
            line.push_str(&" ".repeat(padding));
            if i + 1 < widths.len() {
                line.push_str("  ");
            }
        }
        line.trim_end().to_string()
    };

    let header: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
    let header_line = render_line(&header);
    let mut out = header_line.clone();
    out.push('\n');
    out.push_str(&"-".repeat(header_line.chars().count()));
    for row in &clipped_rows {
        out.push('\n');
        out.push_str(&render_line(row));
    }
    out
}
