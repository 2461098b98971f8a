use super::ui;
use crate::core::CurrencyCatalog;
use comfy_table::Cell;

pub fn render(catalog: &CurrencyCatalog) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell(""),
        ui::header_cell("Code"),
        ui::header_cell("Name"),
        ui::header_cell("Region"),
    ]);

    for currency in catalog.list_currencies() {
        table.add_row(vec![
            Cell::new(currency.flag()),
            Cell::new(currency.code),
            Cell::new(currency.name),
            Cell::new(catalog.region_for(currency.code)),
        ]);
    }

    table.to_string()
}

pub fn run(catalog: &CurrencyCatalog) {
    println!("{}", render(catalog));
}
