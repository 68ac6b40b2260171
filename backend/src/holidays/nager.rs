//! HTTP client for the Nager.Date public holiday API
//!
//! `GET {base_url}/api/v3/publicholidays/{year}/{country}` returns a JSON array
//! of holidays; only `date` and `localName` are used.

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use super::{HolidayFetchError, HolidayProvider, PublicHoliday};
use crate::config::AppConfig;

pub const DEFAULT_BASE_URL: &str = "https://date.nager.at";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NagerHoliday {
    date: String,
    local_name: String,
}

/// Holiday provider backed by the Nager.Date REST API
#[derive(Clone)]
pub struct NagerHolidayProvider {
    http: reqwest::Client,
    base_url: String,
    country_code: String,
}

impl NagerHolidayProvider {
    pub fn new(base_url: &str, country_code: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            country_code: country_code.to_string(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            &config.holiday_api_base_url,
            &config.holiday_country,
            Duration::from_secs(config.holiday_request_timeout_secs),
        )
    }

    fn holidays_url(&self, year: i32) -> String {
        format!(
            "{}/api/v3/publicholidays/{}/{}",
            self.base_url, year, self.country_code
        )
    }
}

#[async_trait]
impl HolidayProvider for NagerHolidayProvider {
    async fn fetch_holidays(&self, year: i32) -> Result<Vec<PublicHoliday>, HolidayFetchError> {
        let url = self.holidays_url(year);
        debug!("GET {}", url);

        let resp = self.http.get(&url).send().await?;

        if !resp.status().is_success() {
            return Err(HolidayFetchError::Status(resp.status().as_u16()));
        }

        let body = resp.bytes().await?;
        let holidays: Vec<NagerHoliday> = serde_json::from_slice(&body)
            .map_err(|e| HolidayFetchError::MalformedPayload(e.to_string()))?;

        info!("Fetched {} public holidays for {} ({})", holidays.len(), year, self.country_code);

        Ok(holidays
            .into_iter()
            .map(|h| PublicHoliday::new(h.local_name, h.date))
            .collect())
    }
}
