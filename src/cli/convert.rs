use super::ui;
use crate::core::{ConversionPipeline, CurrencyCatalog};
use anyhow::{Result, bail};

fn label(catalog: &CurrencyCatalog, code: &str) -> String {
    match catalog.find(code) {
        Some(c) => format!("{} {}", c.flag(), c.code),
        None => code.to_string(),
    }
}

pub fn render(
    catalog: &CurrencyCatalog,
    amount: f64,
    from: &str,
    converted: f64,
    to: &str,
) -> String {
    let rate = if amount != 0.0 { converted / amount } else { f64::NAN };
    let mut output = format!(
        "{} {} = {} {}",
        ui::style_text(&format!("{amount:.2}"), ui::StyleType::Label),
        label(catalog, from),
        ui::style_text(&format!("{converted:.2}"), ui::StyleType::Value),
        label(catalog, to),
    );
    if rate.is_finite() {
        output.push_str(&format!(
            "\n{}",
            ui::style_text(
                &format!("1 {from} = {} {to}", ui::format_rate(rate)),
                ui::StyleType::Subtle
            )
        ));
    }
    output
}

pub async fn run(
    pipeline: &ConversionPipeline,
    catalog: &CurrencyCatalog,
    amount: f64,
    from: &str,
    to: &str,
) -> Result<()> {
    if !amount.is_finite() {
        bail!("Amount must be a finite number, got {amount}");
    }

    let converted = ui::with_spinner(
        &format!("Converting {from} to {to}..."),
        pipeline.convert(amount, from, to),
    )
    .await?;

    println!("{}", render(catalog, amount, from, converted, to));
    Ok(())
}
