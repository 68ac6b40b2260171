//! # JSON Year State Repository
//!
//! File-based storage of per-year PTO state. Each year is one JSON record
//! under the key `calendar-pto:{year}`.
//!
//! ## Record Format
//!
//! ```json
//! { "allowance": 20, "taken": [{ "day": 4, "month": 2 }] }
//! ```
//!
//! `month` is 0-based. There is no schema version: a record that does not
//! decode into a valid state for its year is treated as absent.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::connection::JsonConnection;
use crate::domain::models::{CalendarDay, YearState};
use crate::storage::traits::YearStateStorage;

/// Build the record key for a year
pub fn storage_key(year: i32) -> String {
    format!("calendar-pto:{}", year)
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredPtoDay {
    day: u32,
    month: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredYearState {
    allowance: u32,
    taken: Vec<StoredPtoDay>,
}

/// JSON-file year state repository
#[derive(Clone)]
pub struct YearStateRepository {
    connection: JsonConnection,
}

impl YearStateRepository {
    /// Create a new JSON year state repository
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }

    /// Decode a raw record into a year state, rejecting anything invalid for `year`
    fn decode_year_state(year: i32, raw: &[u8]) -> Result<YearState> {
        let stored: StoredYearState = serde_json::from_slice(raw)?;

        let taken = stored
            .taken
            .iter()
            .map(|entry| {
                CalendarDay::new(year, entry.month, entry.day)
                    .map_err(|e| anyhow!("taken entry {:?} is not a date in {}: {}", entry, year, e))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(YearState::new(stored.allowance, taken))
    }

    fn encode_year_state(allowance: u32, taken: &[CalendarDay]) -> Result<String> {
        let payload = StoredYearState {
            allowance,
            taken: taken
                .iter()
                .map(|day| StoredPtoDay {
                    day: day.day(),
                    month: day.month(),
                })
                .collect(),
        };
        Ok(serde_json::to_string(&payload)?)
    }
}

#[async_trait]
impl YearStateStorage for YearStateRepository {
    async fn has_year_state(&self, year: i32) -> Result<bool> {
        Ok(self.connection.has_record(&storage_key(year)))
    }

    async fn load_year_state(&self, year: i32) -> Result<Option<YearState>> {
        let key = storage_key(year);

        let Some(raw) = self.connection.read_record(&key)? else {
            debug!("No year state stored for {}", year);
            return Ok(None);
        };

        match Self::decode_year_state(year, &raw) {
            Ok(state) => {
                debug!(
                    "Loaded year state for {}: allowance {}, {} taken",
                    year,
                    state.allowance,
                    state.taken.len()
                );
                Ok(Some(state))
            }
            Err(e) => {
                warn!("Discarding corrupt year state record '{}': {}", key, e);
                Ok(None)
            }
        }
    }

    async fn save_year_state(&self, year: i32, allowance: u32, taken: &[CalendarDay]) -> Result<()> {
        if let Some(stray) = taken.iter().find(|day| day.year() != year) {
            return Err(anyhow!("Cannot store {} in the record for {}", stray, year));
        }

        let contents = Self::encode_year_state(allowance, taken)?;
        self.connection.write_record(&storage_key(year), &contents)?;

        info!("Saved year state for {}: allowance {}, {} taken", year, allowance, taken.len());
        Ok(())
    }
}
