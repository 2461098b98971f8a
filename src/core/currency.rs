//! Static currency reference data

use anyhow::{Result, anyhow};

/// A currency the app knows how to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyRef {
    pub code: &'static str,
    pub name: &'static str,
    /// Two-letter region identifier used for the flag. `EU` for the euro.
    pub region: &'static str,
}

impl CurrencyRef {
    const fn new(code: &'static str, name: &'static str, region: &'static str) -> Self {
        Self { code, name, region }
    }

    /// Renders the region identifier as a regional indicator flag.
    pub fn flag(&self) -> String {
        self.region
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .filter_map(|c| {
                let offset = c.to_ascii_uppercase() as u32 - 'A' as u32;
                char::from_u32(0x1F1E6 + offset)
            })
            .collect()
    }
}

const BUILTIN: [CurrencyRef; 16] = [
    CurrencyRef::new("USD", "US Dollar", "US"),
    CurrencyRef::new("EUR", "Euro", "EU"),
    CurrencyRef::new("GBP", "British Pound", "GB"),
    CurrencyRef::new("JPY", "Japanese Yen", "JP"),
    CurrencyRef::new("AUD", "Australian Dollar", "AU"),
    CurrencyRef::new("CAD", "Canadian Dollar", "CA"),
    CurrencyRef::new("CHF", "Swiss Franc", "CH"),
    CurrencyRef::new("CNY", "Chinese Yuan", "CN"),
    CurrencyRef::new("INR", "Indian Rupee", "IN"),
    CurrencyRef::new("NGN", "Nigerian Naira", "NG"),
    CurrencyRef::new("XAF", "Central African CFA Franc", "CM"),
    CurrencyRef::new("RUB", "Russian Ruble", "RU"),
    CurrencyRef::new("ZAR", "South African Rand", "ZA"),
    CurrencyRef::new("BRL", "Brazilian Real", "BR"),
    CurrencyRef::new("MXN", "Mexican Peso", "MX"),
    CurrencyRef::new("KRW", "South Korean Won", "KR"),
];

/// Read-only list of supported currencies. Build it once and pass it around by
/// reference.
#[derive(Debug, Clone)]
pub struct CurrencyCatalog {
    entries: Vec<CurrencyRef>,
}

impl CurrencyCatalog {
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN.to_vec(),
        }
    }

    /// All currencies in display order. The first two are the default pair.
    pub fn list_currencies(&self) -> &[CurrencyRef] {
        &self.entries
    }

    pub fn find(&self, code: &str) -> Option<&CurrencyRef> {
        self.entries
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
    }

    pub fn default_pair(&self) -> (&CurrencyRef, &CurrencyRef) {
        (&self.entries[0], &self.entries[1])
    }

    /// Region identifier for a currency code. Codes outside the catalog fall
    /// back to the first two letters, which is the ISO 4217 convention.
    pub fn region_for(&self, code: &str) -> String {
        if code.eq_ignore_ascii_case("EUR") {
            return "EU".to_string();
        }
        match self.find(code) {
            Some(c) => c.region.to_string(),
            None => code.chars().take(2).collect::<String>().to_uppercase(),
        }
    }
}

impl Default for CurrencyCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Normalises user input into a three-letter uppercase currency code.
pub fn parse_currency_code(input: &str) -> Result<String> {
    let code = input.trim().to_uppercase();
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(code)
    } else {
        Err(anyhow!("Invalid currency code: {}", input))
    }
}
