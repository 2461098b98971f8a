use super::ui;
use crate::core::{ConversionPipeline, CurrencyCatalog, RateSnapshot};
use anyhow::Result;
use comfy_table::Cell;

/// Table of rates for the snapshot base. Only catalog currencies are shown
/// unless `all` is set.
pub fn render(snapshot: &RateSnapshot, catalog: &CurrencyCatalog, all: bool) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Currency"),
        ui::header_cell("Name"),
        ui::header_cell(&format!("Rate (1 {})", snapshot.base)),
    ]);

    let rows: Vec<(String, String, f64)> = if all {
        snapshot
            .rates
            .iter()
            .map(|(code, rate)| {
                let name = catalog.find(code).map_or("", |c| c.name);
                (code.clone(), name.to_string(), *rate)
            })
            .collect()
    } else {
        catalog
            .list_currencies()
            .iter()
            .filter(|c| !c.code.eq_ignore_ascii_case(&snapshot.base))
            .filter_map(|c| {
                snapshot
                    .rate_for(c.code)
                    .map(|rate| (format!("{} {}", c.flag(), c.code), c.name.to_string(), rate))
            })
            .collect()
    };

    for (code, name, rate) in rows {
        table.add_row(vec![Cell::new(code), Cell::new(name), ui::rate_cell(rate)]);
    }

    let mut output = format!(
        "Rates for {}",
        ui::style_text(&snapshot.base, ui::StyleType::Title)
    );
    if let Some(date) = &snapshot.date {
        output.push_str(&format!(
            " {}",
            ui::style_text(&format!("({date})"), ui::StyleType::Subtle)
        ));
    }
    output.push_str("\n\n");
    output.push_str(&table.to_string());
    output
}

pub async fn run(
    pipeline: &ConversionPipeline,
    catalog: &CurrencyCatalog,
    base: &str,
    all: bool,
) -> Result<()> {
    let snapshot =
        ui::with_spinner(&format!("Fetching {base} rates..."), pipeline.all_rates(base)).await?;

    println!("{}", render(&snapshot, catalog, all));
    Ok(())
}
