//! # PTO Service
//!
//! Entry point of the domain layer for the IO layer. Wraps the
//! [`YearStateEngine`] behind an async mutex so transitions are serialized,
//! and runs the holiday fetch for the active year as a background task.
//!
//! Only one fetch is in flight at a time: a year change aborts the previous
//! task before spawning the next one. A response that still slips through is
//! rejected by the engine's ticket check.

use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::domain::allowance::parse_allowance_input;
use crate::domain::calendar::CalendarService;
use crate::domain::commands::{HolidayRequest, ToggleOutcome};
use crate::domain::errors::PtoResult;
use crate::domain::models::CalendarDay;
use crate::domain::year_state_engine::{EngineSettings, EngineState, YearStateEngine};
use crate::holidays::HolidayProvider;
use crate::storage::YearStateStorage;

/// Copy of the engine state taken under the lock
#[derive(Debug, Clone, PartialEq)]
pub struct YearSnapshot {
    pub state: EngineState,
    pub holiday_marker: String,
    pub can_navigate_previous: bool,
    pub can_navigate_next: bool,
}

impl YearSnapshot {
    fn of<S: YearStateStorage>(engine: &YearStateEngine<S>) -> Self {
        Self {
            state: engine.state().clone(),
            holiday_marker: engine.settings().holiday_marker.clone(),
            can_navigate_previous: engine.can_navigate_previous(),
            can_navigate_next: engine.can_navigate_next(),
        }
    }
}

/// Holiday marker lookup for a single date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayLookup {
    pub day: CalendarDay,
    pub marker: Option<String>,
    pub holiday_name: Option<String>,
}

pub struct PtoService<S: YearStateStorage + 'static> {
    engine: Arc<Mutex<YearStateEngine<S>>>,
    holiday_provider: Arc<dyn HolidayProvider>,
    holiday_fetch: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl<S: YearStateStorage + 'static> Clone for PtoService<S> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            holiday_provider: Arc::clone(&self.holiday_provider),
            holiday_fetch: Arc::clone(&self.holiday_fetch),
        }
    }
}

impl<S: YearStateStorage + 'static> PtoService<S> {
    /// Initialize the engine on `year` and start fetching its holidays
    pub async fn start(
        settings: EngineSettings,
        storage: Arc<S>,
        calendar: CalendarService,
        holiday_provider: Arc<dyn HolidayProvider>,
        year: i32,
    ) -> Self {
        let (engine, request) = YearStateEngine::initialize(settings, storage, calendar, year).await;

        let service = Self {
            engine: Arc::new(Mutex::new(engine)),
            holiday_provider,
            holiday_fetch: Arc::new(Mutex::new(None)),
        };
        service.spawn_holiday_fetch(request).await;
        service
    }

    pub async fn year_view(&self) -> YearSnapshot {
        let engine = self.engine.lock().await;
        YearSnapshot::of(&engine)
    }

    /// Set the allowance from raw user input; invalid input restores the default
    pub async fn set_allowance(&self, input: &Value) -> PtoResult<YearSnapshot> {
        let allowance = parse_allowance_input(input);

        let mut engine = self.engine.lock().await;
        engine.set_allowance(allowance).await?;
        Ok(YearSnapshot::of(&engine))
    }

    /// Toggle the day given as `YYYY-MM-DD`
    pub async fn toggle_day(&self, iso_date: &str) -> PtoResult<(ToggleOutcome, YearSnapshot)> {
        let mut engine = self.engine.lock().await;
        let day = engine.calendar().parse_iso_day(iso_date)?;

        let outcome = engine.toggle_day(day).await?;
        Ok((outcome, YearSnapshot::of(&engine)))
    }

    pub async fn navigate_previous_year(&self) -> YearSnapshot {
        let mut engine = self.engine.lock().await;
        if let Some(request) = engine.navigate_previous_year().await {
            self.spawn_holiday_fetch(request).await;
        }
        YearSnapshot::of(&engine)
    }

    pub async fn navigate_next_year(&self) -> PtoResult<YearSnapshot> {
        let mut engine = self.engine.lock().await;
        if let Some(request) = engine.navigate_next_year().await? {
            self.spawn_holiday_fetch(request).await;
        }
        Ok(YearSnapshot::of(&engine))
    }

    /// Look up the holiday marker for the day given as `YYYY-MM-DD`
    pub async fn holiday_marker(&self, iso_date: &str) -> PtoResult<HolidayLookup> {
        let engine = self.engine.lock().await;
        let day = engine.calendar().parse_iso_day(iso_date)?;

        Ok(HolidayLookup {
            day,
            marker: engine.holiday_marker(&day).map(str::to_string),
            holiday_name: engine.holiday_name(&day).map(str::to_string),
        })
    }

    /// Wait until the current holiday fetch, if any, has been applied
    pub async fn wait_for_holidays(&self) {
        let handle = self.holiday_fetch.lock().await.take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    error!("Holiday fetch task failed: {}", e);
                }
            }
        }
    }

    async fn spawn_holiday_fetch(&self, request: HolidayRequest) {
        let mut slot = self.holiday_fetch.lock().await;
        if let Some(previous) = slot.take() {
            debug!("Aborting previous holiday fetch");
            previous.abort();
        }

        info!("Fetching public holidays for {}", request.year);
        let engine = Arc::clone(&self.engine);
        let provider = Arc::clone(&self.holiday_provider);
        *slot = Some(tokio::spawn(async move {
            let result = provider.fetch_holidays(request.year).await;
            engine.lock().await.apply_holidays(request, result);
        }));
    }
}
