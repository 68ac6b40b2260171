//! Year-state engine for the PTO calendar.
//!
//! Owns the state of the active year (allowance, taken days, remaining
//! balance, months and holiday annotations) and is the only place where that
//! state changes. Every transition either completes fully or leaves the state
//! as it was:
//!
//! - Transitions that persist (allowance change, day toggle, forward
//!   navigation into a new year) write first and commit after the write
//!   succeeds.
//! - `remaining` is recomputed from `allowance` and `taken` on every commit.
//! - Holiday responses carry the ticket they were requested with and are
//!   dropped if the active year has changed since.

use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::config::{AppConfig, MAX_YEAR_SPAN};
use crate::domain::calendar::CalendarService;
use crate::domain::commands::{HolidayRequest, HolidayStatus, IgnoreReason, ToggleOutcome};
use crate::domain::errors::{PtoError, PtoResult};
use crate::domain::models::{CalendarDay, Holiday, Month, YearState};
use crate::holidays::{HolidayFetchError, PublicHoliday};
use crate::storage::YearStateStorage;

/// Fixed rules the engine runs with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    /// Lower navigation bound
    pub start_year: i32,
    /// Upper navigation bound, relative to `start_year`
    pub max_year_span: i32,
    pub default_allowance: u32,
    pub holiday_marker: String,
}

impl EngineSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            start_year: config.start_year,
            max_year_span: MAX_YEAR_SPAN,
            default_allowance: config.default_allowance,
            holiday_marker: config.holiday_marker.clone(),
        }
    }

    pub fn end_year(&self) -> i32 {
        self.start_year + self.max_year_span
    }
}

/// State of the active year
#[derive(Debug, Clone, PartialEq)]
pub struct EngineState {
    pub year: i32,
    pub allowance: u32,
    /// Taken days in the order they were added
    pub taken: Vec<CalendarDay>,
    /// Always `allowance - taken.len()`; negative when the allowance was
    /// lowered below the number of taken days
    pub remaining: i64,
    pub months: Vec<Month>,
    pub holidays: Vec<Holiday>,
    pub holiday_status: HolidayStatus,
}

impl EngineState {
    pub fn is_taken(&self, day: &CalendarDay) -> bool {
        self.taken.contains(day)
    }
}

fn remaining_for(allowance: u32, taken: &[CalendarDay]) -> i64 {
    i64::from(allowance) - taken.len() as i64
}

pub struct YearStateEngine<S: YearStateStorage> {
    settings: EngineSettings,
    storage: Arc<S>,
    calendar: CalendarService,
    state: EngineState,
    epoch: u64,
}

impl<S: YearStateStorage> YearStateEngine<S> {
    /// Start a session on `year`, clamped to the navigable range.
    ///
    /// Returns the engine and the ticket for the first holiday fetch.
    pub async fn initialize(
        settings: EngineSettings,
        storage: Arc<S>,
        calendar: CalendarService,
        year: i32,
    ) -> (Self, HolidayRequest) {
        let year = year.clamp(settings.start_year, settings.end_year());
        info!("Initializing year-state engine for {}", year);

        let year_state = Self::read_year_state(storage.as_ref(), year)
            .await
            .unwrap_or_else(|| YearState::with_allowance(settings.default_allowance));

        let epoch = 1;
        let state = EngineState {
            year,
            allowance: year_state.allowance,
            remaining: remaining_for(year_state.allowance, &year_state.taken),
            taken: year_state.taken,
            months: calendar.build_months(year),
            holidays: Vec::new(),
            holiday_status: HolidayStatus::Pending,
        };

        let engine = Self {
            settings,
            storage,
            calendar,
            state,
            epoch,
        };
        (engine, HolidayRequest { year, epoch })
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn calendar(&self) -> &CalendarService {
        &self.calendar
    }

    /// Ticket matching the currently active year
    pub fn current_holiday_request(&self) -> HolidayRequest {
        HolidayRequest {
            year: self.state.year,
            epoch: self.epoch,
        }
    }

    pub fn can_navigate_previous(&self) -> bool {
        self.state.year > self.settings.start_year
    }

    pub fn can_navigate_next(&self) -> bool {
        self.state.year < self.settings.end_year()
    }

    /// Apply the outcome of a holiday fetch.
    ///
    /// Returns false if the ticket is stale and the result was discarded.
    pub fn apply_holidays(
        &mut self,
        request: HolidayRequest,
        result: Result<Vec<PublicHoliday>, HolidayFetchError>,
    ) -> bool {
        if request.epoch != self.epoch || request.year != self.state.year {
            debug!(
                "Discarding stale holidays for {} (active year is {})",
                request.year, self.state.year
            );
            return false;
        }

        match result {
            Ok(public_holidays) => {
                let year = self.state.year;
                let holidays: Vec<Holiday> = public_holidays
                    .into_iter()
                    .filter_map(|holiday| {
                        let placed = self
                            .calendar
                            .parse_iso_date(&holiday.date)
                            .and_then(|(month, day)| CalendarDay::new(year, month, day));
                        match placed {
                            Ok(day) => Some(Holiday { name: holiday.name, day }),
                            Err(e) => {
                                warn!("Skipping holiday '{}': {}", holiday.name, e);
                                None
                            }
                        }
                    })
                    .collect();

                info!("Applied {} holidays to {}", holidays.len(), year);
                self.state.holidays = holidays;
                self.state.holiday_status = HolidayStatus::Loaded;
            }
            Err(e) => {
                warn!("Failed to load public holidays for {}: {}", self.state.year, e);
                self.state.holidays.clear();
                self.state.holiday_status = HolidayStatus::Failed;
            }
        }
        true
    }

    /// Change the allowance of the active year; None restores the default
    pub async fn set_allowance(&mut self, allowance: Option<u32>) -> PtoResult<()> {
        let allowance = allowance.unwrap_or(self.settings.default_allowance);

        self.persist(self.state.year, allowance, &self.state.taken).await?;

        self.state.allowance = allowance;
        self.state.remaining = remaining_for(allowance, &self.state.taken);
        info!(
            "Allowance for {} set to {} ({} remaining)",
            self.state.year, allowance, self.state.remaining
        );
        Ok(())
    }

    /// Mark a weekday as taken, or unmark it if it already is
    pub async fn toggle_day(&mut self, day: CalendarDay) -> PtoResult<ToggleOutcome> {
        if day.year() != self.state.year {
            debug!("Ignoring toggle of {} outside active year {}", day, self.state.year);
            return Ok(ToggleOutcome::Ignored(IgnoreReason::OutsideActiveYear));
        }
        if day.is_weekend() {
            debug!("Ignoring toggle of weekend day {}", day);
            return Ok(ToggleOutcome::Ignored(IgnoreReason::Weekend));
        }

        let already_taken = self.state.is_taken(&day);
        if !already_taken && self.state.remaining <= 0 {
            debug!("Ignoring toggle of {}: no days remaining", day);
            return Ok(ToggleOutcome::Ignored(IgnoreReason::NoRemaining));
        }

        let mut taken = self.state.taken.clone();
        let outcome = if already_taken {
            taken.retain(|item| item != &day);
            ToggleOutcome::Removed
        } else {
            taken.push(day);
            ToggleOutcome::Added
        };

        self.persist(self.state.year, self.state.allowance, &taken).await?;

        self.state.remaining = remaining_for(self.state.allowance, &taken);
        self.state.taken = taken;
        info!("Toggled {}: {:?} ({} remaining)", day, outcome, self.state.remaining);
        Ok(outcome)
    }

    /// Move to the previous year without writing anything.
    ///
    /// Returns None at the lower bound, otherwise the new holiday ticket.
    pub async fn navigate_previous_year(&mut self) -> Option<HolidayRequest> {
        if !self.can_navigate_previous() {
            debug!("Already at the first year {}", self.state.year);
            return None;
        }

        let year = self.state.year - 1;
        let year_state = Self::read_year_state(self.storage.as_ref(), year)
            .await
            .unwrap_or_else(|| YearState::with_allowance(self.settings.default_allowance));

        Some(self.enter_year(year, year_state))
    }

    /// Move to the next year, creating its record first if there is none.
    ///
    /// Returns Ok(None) at the upper bound. If the record cannot be written
    /// the engine stays on the current year.
    pub async fn navigate_next_year(&mut self) -> PtoResult<Option<HolidayRequest>> {
        if !self.can_navigate_next() {
            debug!("Already at the last year {}", self.state.year);
            return Ok(None);
        }

        let year = self.state.year + 1;
        let default_state = YearState::with_allowance(self.settings.default_allowance);

        if !self.has_year_state(year).await {
            info!("Creating default record for {}", year);
            self.persist(year, default_state.allowance, &default_state.taken).await?;
        }

        let year_state = match Self::load_valid_year_state(self.storage.as_ref(), year).await {
            Ok(Some(year_state)) => year_state,
            Ok(None) => {
                // The record exists but could not be used; replace it
                warn!("Resetting unreadable record for {} to defaults", year);
                self.persist(year, default_state.allowance, &default_state.taken).await?;
                default_state
            }
            Err(e) => {
                // Leave the record alone; the failure may be temporary
                error!("Failed to load stored state for {}, using defaults: {:#}", year, e);
                default_state
            }
        };

        Ok(Some(self.enter_year(year, year_state)))
    }

    /// Marker token if `day` is one of the active year's holidays
    pub fn holiday_marker(&self, day: &CalendarDay) -> Option<&str> {
        self.holiday_on(day)
            .map(|_| self.settings.holiday_marker.as_str())
    }

    pub fn holiday_name(&self, day: &CalendarDay) -> Option<&str> {
        self.holiday_on(day).map(|holiday| holiday.name.as_str())
    }

    fn holiday_on(&self, day: &CalendarDay) -> Option<&Holiday> {
        self.state.holidays.iter().find(|holiday| &holiday.day == day)
    }

    fn enter_year(&mut self, year: i32, year_state: YearState) -> HolidayRequest {
        self.epoch += 1;
        self.state = EngineState {
            year,
            allowance: year_state.allowance,
            remaining: remaining_for(year_state.allowance, &year_state.taken),
            taken: year_state.taken,
            months: self.calendar.build_months(year),
            holidays: Vec::new(),
            holiday_status: HolidayStatus::Pending,
        };
        info!(
            "Switched to {}: allowance {}, {} taken, {} remaining",
            year,
            self.state.allowance,
            self.state.taken.len(),
            self.state.remaining
        );
        self.current_holiday_request()
    }

    /// Whether a record exists; an unanswerable check counts as existing so
    /// it is never overwritten blindly
    async fn has_year_state(&self, year: i32) -> bool {
        match self.storage.has_year_state(year).await {
            Ok(exists) => exists,
            Err(e) => {
                error!("Failed to check stored state for {}: {:#}", year, e);
                true
            }
        }
    }

    /// Load a year's record, reading records with days of another year as absent
    async fn load_valid_year_state(storage: &S, year: i32) -> anyhow::Result<Option<YearState>> {
        match storage.load_year_state(year).await? {
            Some(year_state) if year_state.is_within_year(year) => Ok(Some(year_state)),
            Some(_) => {
                warn!("Stored state for {} contains days of another year, ignoring it", year);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// Load a year's record; storage failures are logged and read as absent
    async fn read_year_state(storage: &S, year: i32) -> Option<YearState> {
        Self::load_valid_year_state(storage, year)
            .await
            .unwrap_or_else(|e| {
                error!("Failed to load stored state for {}: {:#}", year, e);
                None
            })
    }

    async fn persist(&self, year: i32, allowance: u32, taken: &[CalendarDay]) -> PtoResult<()> {
        self.storage
            .save_year_state(year, allowance, taken)
            .await
            .map_err(|e| {
                error!("Failed to save state for {}: {:#}", year, e);
                PtoError::Persistence(e)
            })
    }
}
