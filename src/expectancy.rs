//! World Bank life-expectancy lookup.
//!
//! The public contract is deliberately infallible: [`WorldBankClient::life_expectancy`]
//! returns an integer number of years, falling back to [`DEFAULT_EXPECTANCY`]
//! on any network, status, decode, or missing-data problem. The error branch
//! exists only inside this module and is logged, never surfaced.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

const DEFAULT_BASE: &str = "https://api.worldbank.org/v2";
const INDICATOR: &str = "SP.DYN.LE00.IN";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Fallback when the API yields no usable value.
pub const DEFAULT_EXPECTANCY: u32 = 70;

/// One yearly record in the indicator payload. The API pads missing years
/// with `"value": null`.
#[derive(Deserialize)]
struct IndicatorRow {
    value: Option<f64>,
}

/// The indicator endpoint answers with a two-element array: a pagination
/// header object, then the rows (or `null` when the query matched nothing).
type IndicatorPayload = (Value, Option<Vec<IndicatorRow>>);

#[derive(Clone)]
pub struct WorldBankClient {
    http: Client,
    base: String,
}

impl WorldBankClient {
    /// Build a client against the public API, or against the base URL in
    /// `WORLDBANK_API_BASE` when set.
    pub fn new() -> Self {
        let base =
            std::env::var("WORLDBANK_API_BASE").unwrap_or_else(|_| DEFAULT_BASE.to_string());
        Self {
            http: Client::new(),
            base,
        }
    }

    /// Life expectancy at birth for `country`, in whole years.
    ///
    /// Never fails: any problem with the request or the payload resolves to
    /// [`DEFAULT_EXPECTANCY`]. No retries.
    pub async fn life_expectancy(&self, country: &str) -> u32 {
        match self.fetch(country).await {
            Ok(Some(years)) => {
                tracing::info!(country, years, "life expectancy from World Bank");
                years
            }
            Ok(None) => {
                tracing::debug!(country, "no usable rows in World Bank payload");
                DEFAULT_EXPECTANCY
            }
            Err(e) => {
                tracing::debug!(country, "World Bank lookup failed: {e:#}");
                DEFAULT_EXPECTANCY
            }
        }
    }

    async fn fetch(&self, country: &str) -> Result<Option<u32>> {
        let url = format!(
            "{}/country/{}/indicator/{}?format=json",
            self.base, country, INDICATOR
        );

        let payload: IndicatorPayload = self
            .http
            .get(&url)
            .header("User-Agent", "lifegrid")
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .context("sending World Bank request")?
            .json()
            .await
            .context("decoding World Bank payload")?;

        Ok(first_usable_value(&payload.1.unwrap_or_default()))
    }
}

/// Scan rows in the order the API gives them (most recent year first) and
/// take the first usable value, rounded to the nearest whole year. Null and
/// non-positive values are padding, not data.
fn first_usable_value(rows: &[IndicatorRow]) -> Option<u32> {
    rows.iter()
        .filter_map(|row| row.value)
        .find(|v| *v > 0.0)
        .map(|v| v.round() as u32)
}
