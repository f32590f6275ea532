//! Boxed text table rendering.

use county_rank_analysis_models::RankedLocation;

/// Column headers, in display order.
pub const COLUMNS: [&str; 8] = [
    "Location",
    "Risk per dollar",
    "Normalized risk",
    "Normalized median home price",
    "Median price",
    "Population",
    "Population density",
    "% Biden",
];

/// Formats whole dollars with a `$` sign and thousands separators.
#[must_use]
pub fn format_currency(dollars: u64) -> String {
    let digits = dollars.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    grouped.push('$');
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

#[allow(clippy::cast_precision_loss)]
fn cells(ranked: &RankedLocation) -> [String; 8] {
    let location = &ranked.location;
    [
        location.id.clone(),
        format!("{:.2}", ranked.risk_per_dollar),
        format!("{:.2}", location.risk.normalized_total),
        format!("{:.2}", location.real_estate.normalized_median_home_price),
        format_currency(location.real_estate.median_home_price),
        location.pop.population_2020.to_string(),
        format!("{:.2}", ranked.population_density as f64),
        format!("{:.2}", location.politics.percent_for_biden_2020),
    ]
}

fn separator(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.push_str(&"-".repeat(width + 2));
        line.push('+');
    }
    line
}

/// Text rows are left-aligned in the first column and right-aligned in
/// the numeric columns.
fn row(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (i, (cell, &width)) in cells.iter().zip(widths).enumerate() {
        if i == 0 {
            line.push_str(&format!(" {cell:<width$} |"));
        } else {
            line.push_str(&format!(" {cell:>width$} |"));
        }
    }
    line
}

/// Renders ranked locations as a boxed text table with a header row.
///
/// An empty slice renders the header only.
#[must_use]
pub fn render_table(results: &[RankedLocation]) -> String {
    let header: Vec<String> = COLUMNS.iter().map(ToString::to_string).collect();
    let body: Vec<[String; 8]> = results.iter().map(cells).collect();

    let widths: Vec<usize> = (0..COLUMNS.len())
        .map(|i| {
            body.iter()
                .map(|cells| cells[i].chars().count())
                .chain(std::iter::once(COLUMNS[i].chars().count()))
                .max()
                .unwrap_or_default()
        })
        .collect();

    let rule = separator(&widths);
    let mut lines = vec![rule.clone(), row(&header, &widths), rule.clone()];
    lines.extend(body.iter().map(|cells| row(cells, &widths)));
    if !body.is_empty() {
        lines.push(rule);
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
