use super::ui;
use crate::core::{ConversionPipeline, HistoricalSeries, RatePoint};
use anyhow::Result;
use chrono::{Duration, Local, NaiveDate};
use comfy_table::Cell;

fn day_label(offset: i64, projected: bool) -> String {
    match (offset, projected) {
        (0, false) => "today".to_string(),
        (o, false) => format!("-{o}d"),
        (o, true) => format!("+{o}d"),
    }
}

fn change_from(previous: Option<&RatePoint>, rate: f64) -> Option<f64> {
    previous
        .filter(|p| p.rate != 0.0)
        .map(|p| (rate - p.rate) / p.rate * 100.0)
}

/// Renders the series as a table followed by a summary line.
pub fn render(series: &HistoricalSeries, base: &str, target: &str, today: NaiveDate) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Day"),
        ui::header_cell("Date"),
        ui::header_cell(&format!("{base}/{target}")),
        ui::header_cell("Change"),
    ]);

    let mut previous: Option<&RatePoint> = None;
    for point in &series.historical {
        let date = today - Duration::days(point.offset);
        table.add_row(vec![
            Cell::new(day_label(point.offset, false)),
            Cell::new(date.format("%Y-%m-%d")),
            ui::rate_cell(point.rate),
            change_from(previous, point.rate).map_or_else(ui::na_cell, ui::change_cell),
        ]);
        previous = Some(point);
    }

    // The first projected point repeats the latest observation.
    for point in series.projected.iter().skip(1) {
        let date = today + Duration::days(point.offset);
        table.add_row(vec![
            Cell::new(day_label(point.offset, true)),
            Cell::new(format!("{} (projected)", date.format("%Y-%m-%d"))),
            ui::rate_cell(point.rate),
            change_from(previous, point.rate).map_or_else(ui::na_cell, ui::change_cell),
        ]);
        previous = Some(point);
    }

    let rates: Vec<f64> = series
        .historical
        .iter()
        .chain(series.projected.iter().skip(1))
        .map(|p| p.rate)
        .collect();

    let trend = series.trend();
    let change = series
        .change_percent()
        .map_or("n/a".to_string(), |c| format!("{c:+.2}%"));

    let mut output = format!(
        "{} {}\n\n",
        ui::style_text(&format!("{base} → {target}"), ui::StyleType::Title),
        ui::sparkline(&rates)
    );
    output.push_str(&table.to_string());
    output.push_str(&format!(
        "\n\n{} {}",
        ui::style_text("7-day trend:", ui::StyleType::Label),
        ui::style_trend(&format!("{trend} ({change})"), trend)
    ));
    if series.used_fallback {
        output.push_str(&format!(
            "\n{}",
            ui::style_text(
                "Historical rates are unavailable for this pair; values are estimated from the current rate.",
                ui::StyleType::Error
            )
        ));
    }
    output
}

pub async fn run(pipeline: &ConversionPipeline, base: &str, target: &str) -> Result<()> {
    let today = Local::now().date_naive();
    let series = ui::with_spinner(
        &format!("Fetching {base}/{target} history..."),
        pipeline.historical_series_on(base, target, today),
    )
    .await?
    .with_projection();

    println!("{}", render(&series, base, target, today));
    Ok(())
}
