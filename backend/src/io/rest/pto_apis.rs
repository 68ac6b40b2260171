//! # REST API for the PTO Calendar
//!
//! Endpoints for reading the active year, changing the allowance, toggling
//! days and navigating between years. Every mutating endpoint returns the
//! full year view so the client never has to recompute anything.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post, put},
    Router,
};
use tracing::{error, info, warn};

use crate::domain::errors::PtoError;
use crate::io::rest::mappers::holiday_mapper::HolidayMapper;
use crate::io::rest::mappers::year_view_mapper::YearViewMapper;
use crate::AppState;
use shared::{ErrorResponse, HolidayMarkerQuery, SetAllowanceRequest, ToggleDayRequest};

/// Create a router for PTO related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/year", get(get_year_view))
        .route("/year/previous", post(navigate_previous_year))
        .route("/year/next", post(navigate_next_year))
        .route("/allowance", put(set_allowance))
        .route("/days/toggle", post(toggle_day))
        .route("/holidays/marker", get(get_holiday_marker))
}

fn error_response(e: PtoError) -> Response {
    let status = match e {
        PtoError::InvalidDateFormat(_) | PtoError::InvalidDate { .. } => {
            warn!("Rejected request: {}", e);
            StatusCode::BAD_REQUEST
        }
        PtoError::Persistence(_) => {
            error!("Request failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(ErrorResponse { error: e.to_string() })).into_response()
}

/// Get the active year with its months, taken days and holidays
pub async fn get_year_view(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/pto/year");

    let snapshot = state.pto_service.year_view().await;
    let response = YearViewMapper::to_dto(snapshot, &state.calendar_service);
    (StatusCode::OK, Json(response)).into_response()
}

/// Set the allowance of the active year
pub async fn set_allowance(
    State(state): State<AppState>,
    Json(request): Json<SetAllowanceRequest>,
) -> impl IntoResponse {
    info!("PUT /api/pto/allowance - request: {:?}", request);

    match state.pto_service.set_allowance(&request.allowance).await {
        Ok(snapshot) => {
            let response = YearViewMapper::to_dto(snapshot, &state.calendar_service);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// Toggle a day as taken/not taken
pub async fn toggle_day(
    State(state): State<AppState>,
    Json(request): Json<ToggleDayRequest>,
) -> impl IntoResponse {
    info!("POST /api/pto/days/toggle - request: {:?}", request);

    match state.pto_service.toggle_day(&request.date).await {
        Ok((outcome, snapshot)) => {
            let response = YearViewMapper::toggle_to_dto(outcome, snapshot, &state.calendar_service);
            info!("Toggle {}: {}", request.date, response.result);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(e),
    }
}

pub async fn navigate_previous_year(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/pto/year/previous");

    let snapshot = state.pto_service.navigate_previous_year().await;
    let response = YearViewMapper::to_dto(snapshot, &state.calendar_service);
    (StatusCode::OK, Json(response)).into_response()
}

pub async fn navigate_next_year(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/pto/year/next");

    match state.pto_service.navigate_next_year().await {
        Ok(snapshot) => {
            let response = YearViewMapper::to_dto(snapshot, &state.calendar_service);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// Look up the holiday marker for a date of the active year
pub async fn get_holiday_marker(
    State(state): State<AppState>,
    Query(query): Query<HolidayMarkerQuery>,
) -> impl IntoResponse {
    info!("GET /api/pto/holidays/marker - query: {:?}", query);

    match state.pto_service.holiday_marker(&query.date).await {
        Ok(lookup) => {
            let response = HolidayMapper::to_marker_response(lookup);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::create_router;
    use crate::domain::{CalendarService, EngineSettings, PtoService};
    use crate::holidays::test_utils::StaticHolidayProvider;
    use crate::holidays::PublicHoliday;
    use crate::storage::json::test_utils::TestEnvironment;
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use serde::de::DeserializeOwned;
    use serde_json::json;
    use shared::{
        HolidayMarkerResponse, HolidayStatus, ToggleDayResponse, ToggleDayResult, YearViewResponse,
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn create_test_app_state(env: &TestEnvironment, year: i32) -> AppState {
        let config = AppConfig {
            initial_year: Some(year),
            ..AppConfig::default()
        };
        let provider = StaticHolidayProvider::new()
            .with_holidays(2024, vec![PublicHoliday::new("New Year", "2024-01-01")]);

        let pto_service = PtoService::start(
            EngineSettings::from_config(&config),
            Arc::new(env.year_state_repository()),
            CalendarService::new(),
            Arc::new(provider),
            year,
        )
        .await;
        pto_service.wait_for_holidays().await;

        AppState {
            pto_service,
            calendar_service: CalendarService::new(),
            config: Arc::new(config),
        }
    }

    async fn send(state: AppState, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response {
        let request = Request::builder().uri(uri).method(method);
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };
        create_router(state).oneshot(request).await.unwrap()
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_get_year_view() {
        let env = TestEnvironment::new().await.unwrap();
        let state = create_test_app_state(&env, 2024).await;

        let response = send(state, Method::GET, "/api/pto/year", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let view: YearViewResponse = read_json(response).await;
        assert_eq!(view.year, 2024);
        assert_eq!(view.allowance, 20);
        assert_eq!(view.remaining, 20);
        assert_eq!(view.months.len(), 12);
        assert_eq!(view.holiday_status, HolidayStatus::Loaded);
        assert_eq!(view.holidays.len(), 1);
        assert_eq!(view.months[0].days[0].holiday_marker.as_deref(), Some("dot"));
        assert!(view.can_navigate_previous);
        assert!(view.can_navigate_next);
    }

    #[tokio::test]
    async fn test_toggle_day() {
        let env = TestEnvironment::new().await.unwrap();
        let state = create_test_app_state(&env, 2024).await;

        let response = send(
            state.clone(),
            Method::POST,
            "/api/pto/days/toggle",
            Some(json!({ "date": "2024-03-04" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let toggled: ToggleDayResponse = read_json(response).await;
        assert_eq!(toggled.result, ToggleDayResult::Added);
        assert_eq!(toggled.year_view.remaining, 19);
        assert_eq!(toggled.year_view.taken, vec!["2024-03-04".to_string()]);
        assert!(toggled.year_view.months[2].days[3].is_taken);

        let response = send(
            state,
            Method::POST,
            "/api/pto/days/toggle",
            Some(json!({ "date": "2024-03-09" })),
        )
        .await;
        let toggled: ToggleDayResponse = read_json(response).await;
        assert_eq!(toggled.result, ToggleDayResult::IgnoredWeekend);
        assert_eq!(toggled.year_view.remaining, 19);
    }

    #[tokio::test]
    async fn test_toggle_day_malformed_date() {
        let env = TestEnvironment::new().await.unwrap();
        let state = create_test_app_state(&env, 2024).await;

        let response = send(
            state,
            Method::POST,
            "/api/pto/days/toggle",
            Some(json!({ "date": "March 4th" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ErrorResponse = read_json(response).await;
        assert!(error.error.contains("March 4th"));
    }

    #[tokio::test]
    async fn test_set_allowance() {
        let env = TestEnvironment::new().await.unwrap();
        let state = create_test_app_state(&env, 2024).await;

        let response = send(
            state.clone(),
            Method::PUT,
            "/api/pto/allowance",
            Some(json!({ "allowance": 25 })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let view: YearViewResponse = read_json(response).await;
        assert_eq!(view.allowance, 25);
        assert_eq!(view.remaining, 25);

        // Non-numeric input restores the default
        let response = send(
            state,
            Method::PUT,
            "/api/pto/allowance",
            Some(json!({ "allowance": "" })),
        )
        .await;
        let view: YearViewResponse = read_json(response).await;
        assert_eq!(view.allowance, 20);
    }

    #[tokio::test]
    async fn test_year_navigation() {
        let env = TestEnvironment::new().await.unwrap();
        let state = create_test_app_state(&env, 2024).await;

        let response = send(state.clone(), Method::POST, "/api/pto/year/next", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let view: YearViewResponse = read_json(response).await;
        assert_eq!(view.year, 2025);
        assert!(view.months.iter().all(|month| month.year == 2025));

        let response = send(state.clone(), Method::POST, "/api/pto/year/previous", None).await;
        let view: YearViewResponse = read_json(response).await;
        assert_eq!(view.year, 2024);

        let response = send(state, Method::POST, "/api/pto/year/previous", None).await;
        let view: YearViewResponse = read_json(response).await;
        assert_eq!(view.year, 2023);
    }

    #[tokio::test]
    async fn test_navigation_stops_at_bounds() {
        let env = TestEnvironment::new().await.unwrap();
        let state = create_test_app_state(&env, 2030).await;

        let response = send(state, Method::POST, "/api/pto/year/next", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let view: YearViewResponse = read_json(response).await;
        assert_eq!(view.year, 2030);
        assert!(!view.can_navigate_next);
    }

    #[tokio::test]
    async fn test_get_holiday_marker() {
        let env = TestEnvironment::new().await.unwrap();
        let state = create_test_app_state(&env, 2024).await;

        let response = send(
            state.clone(),
            Method::GET,
            "/api/pto/holidays/marker?date=2024-01-01",
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let marker: HolidayMarkerResponse = read_json(response).await;
        assert_eq!(marker.date, "2024-01-01");
        assert_eq!(marker.marker.as_deref(), Some("dot"));
        assert_eq!(marker.holiday_name.as_deref(), Some("New Year"));

        let response = send(
            state.clone(),
            Method::GET,
            "/api/pto/holidays/marker?date=2024-01-02",
            None,
        )
        .await;
        let marker: HolidayMarkerResponse = read_json(response).await;
        assert_eq!(marker.marker, None);

        let response = send(state, Method::GET, "/api/pto/holidays/marker?date=2024-02-30", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
