//! Mappers for converting year snapshots and toggle outcomes into shared DTOs.

use super::holiday_mapper::HolidayMapper;
use crate::domain::calendar::CalendarService;
use crate::domain::commands::{IgnoreReason, ToggleOutcome};
use crate::domain::models::{CalendarDay, Month};
use crate::domain::pto_service::YearSnapshot;
use crate::domain::year_state_engine::EngineState;
use shared::{PtoDay, PtoMonth, ToggleDayResponse, ToggleDayResult, YearViewResponse};

pub struct YearViewMapper;

impl YearViewMapper {
    pub fn to_dto(snapshot: YearSnapshot, calendar: &CalendarService) -> YearViewResponse {
        let months = snapshot
            .state
            .months
            .iter()
            .map(|month| Self::month_to_dto(month, &snapshot, calendar))
            .collect();

        let state = snapshot.state;
        YearViewResponse {
            year: state.year,
            allowance: state.allowance,
            remaining: state.remaining,
            taken: state.taken.iter().map(|day| day.to_iso_string()).collect(),
            months,
            holidays: state.holidays.iter().map(HolidayMapper::to_dto).collect(),
            holiday_status: HolidayMapper::status_to_dto(state.holiday_status),
            can_navigate_previous: snapshot.can_navigate_previous,
            can_navigate_next: snapshot.can_navigate_next,
        }
    }

    pub fn toggle_to_dto(
        outcome: ToggleOutcome,
        snapshot: YearSnapshot,
        calendar: &CalendarService,
    ) -> ToggleDayResponse {
        ToggleDayResponse {
            result: Self::toggle_result_to_dto(outcome),
            year_view: Self::to_dto(snapshot, calendar),
        }
    }

    pub fn toggle_result_to_dto(outcome: ToggleOutcome) -> ToggleDayResult {
        match outcome {
            ToggleOutcome::Added => ToggleDayResult::Added,
            ToggleOutcome::Removed => ToggleDayResult::Removed,
            ToggleOutcome::Ignored(IgnoreReason::Weekend) => ToggleDayResult::IgnoredWeekend,
            ToggleOutcome::Ignored(IgnoreReason::NoRemaining) => ToggleDayResult::IgnoredNoRemaining,
            ToggleOutcome::Ignored(IgnoreReason::OutsideActiveYear) => ToggleDayResult::IgnoredOutsideYear,
        }
    }

    fn month_to_dto(month: &Month, snapshot: &YearSnapshot, calendar: &CalendarService) -> PtoMonth {
        PtoMonth {
            month: month.month,
            year: month.year,
            name: calendar.month_name(month.month).to_string(),
            first_day_of_week: calendar.first_day_of_month(month.month, month.year),
            days: month
                .days
                .iter()
                .map(|day| PtoDay {
                    day: day.day(),
                    iso_date: day.to_iso_string(),
                    is_weekend: day.is_weekend(),
                    is_taken: snapshot.state.is_taken(day),
                    holiday_marker: Self::marker_for(&snapshot.state, &snapshot.holiday_marker, day),
                })
                .collect(),
        }
    }

    fn marker_for(
        state: &EngineState,
        marker: &str,
        day: &CalendarDay,
    ) -> Option<String> {
        state
            .holidays
            .iter()
            .any(|holiday| &holiday.day == day)
            .then(|| marker.to_string())
    }
}
