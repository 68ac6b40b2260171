//! In-memory holiday providers for tests.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use super::{HolidayFetchError, HolidayProvider, PublicHoliday};

/// Provider answering from a fixed table; unknown years have no holidays
#[derive(Default)]
pub struct StaticHolidayProvider {
    holidays: HashMap<i32, Vec<PublicHoliday>>,
    failing_years: HashSet<i32>,
    requested_years: Mutex<Vec<i32>>,
}

impl StaticHolidayProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_holidays(mut self, year: i32, holidays: Vec<PublicHoliday>) -> Self {
        self.holidays.insert(year, holidays);
        self
    }

    /// Make every request for `year` fail
    pub fn failing_for(mut self, year: i32) -> Self {
        self.failing_years.insert(year);
        self
    }

    pub fn requested_years(&self) -> Vec<i32> {
        self.requested_years.lock().unwrap().clone()
    }
}

#[async_trait]
impl HolidayProvider for StaticHolidayProvider {
    async fn fetch_holidays(&self, year: i32) -> Result<Vec<PublicHoliday>, HolidayFetchError> {
        self.requested_years.lock().unwrap().push(year);
        if self.failing_years.contains(&year) {
            return Err(HolidayFetchError::Status(503));
        }
        Ok(self.holidays.get(&year).cloned().unwrap_or_default())
    }
}

/// Provider whose responses are held back until a test releases them
pub struct GatedHolidayProvider {
    inner: StaticHolidayProvider,
    gates: Mutex<HashMap<i32, Arc<Notify>>>,
}

impl GatedHolidayProvider {
    pub fn new(inner: StaticHolidayProvider) -> Self {
        Self {
            inner,
            gates: Mutex::new(HashMap::new()),
        }
    }

    fn gate(&self, year: i32) -> Arc<Notify> {
        self.gates
            .lock()
            .unwrap()
            .entry(year)
            .or_insert_with(|| Arc::new(Notify::new()))
            .clone()
    }

    /// Let one pending (or the next) request for `year` complete
    pub fn release(&self, year: i32) {
        self.gate(year).notify_one();
    }
}

#[async_trait]
impl HolidayProvider for GatedHolidayProvider {
    async fn fetch_holidays(&self, year: i32) -> Result<Vec<PublicHoliday>, HolidayFetchError> {
        self.gate(year).notified().await;
        self.inner.fetch_holidays(year).await
    }
}
