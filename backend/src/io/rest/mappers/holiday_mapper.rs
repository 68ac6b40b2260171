//! Mappers for holiday annotations and marker lookups.

use crate::domain::commands::HolidayStatus as DomainHolidayStatus;
use crate::domain::models::Holiday;
use crate::domain::pto_service::HolidayLookup;
use shared::{HolidayEntry, HolidayMarkerResponse, HolidayStatus};

pub struct HolidayMapper;

impl HolidayMapper {
    pub fn to_dto(domain: &Holiday) -> HolidayEntry {
        HolidayEntry {
            name: domain.name.clone(),
            date: domain.day.to_iso_string(),
        }
    }

    pub fn status_to_dto(domain: DomainHolidayStatus) -> HolidayStatus {
        match domain {
            DomainHolidayStatus::Pending => HolidayStatus::Pending,
            DomainHolidayStatus::Loaded => HolidayStatus::Loaded,
            DomainHolidayStatus::Failed => HolidayStatus::Failed,
        }
    }

    pub fn to_marker_response(lookup: HolidayLookup) -> HolidayMarkerResponse {
        HolidayMarkerResponse {
            date: lookup.day.to_iso_string(),
            marker: lookup.marker,
            holiday_name: lookup.holiday_name,
        }
    }
}
