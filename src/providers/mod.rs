pub mod http_rate_client;
pub mod util;

pub use http_rate_client::HttpRateClient;
