//! Property tests for year-state persistence and engine transitions.

use chrono::NaiveDate;
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::calendar::CalendarService;
use crate::domain::models::{CalendarDay, YearState};
use crate::domain::year_state_engine::{EngineSettings, YearStateEngine};
use crate::storage::json::test_utils::TestEnvironment;
use crate::storage::json::YearStateRepository;
use crate::storage::YearStateStorage;

const YEAR: i32 = 2024;

#[derive(Debug, Clone)]
enum Op {
    Toggle(u32),
    SetAllowance(Option<u32>),
    Previous,
    Next,
}

fn settings() -> EngineSettings {
    EngineSettings {
        start_year: 2020,
        max_year_span: 10,
        default_allowance: 20,
        holiday_marker: "dot".to_string(),
    }
}

fn run<F: std::future::Future<Output = ()>>(test: F) {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(test);
}

/// Day `ordinal` (1-based) of `year`; 365 is valid in every year
fn nth_day(year: i32, ordinal: u32) -> CalendarDay {
    CalendarDay::from_naive_date(NaiveDate::from_yo_opt(year, ordinal).unwrap())
}

fn day_set() -> impl Strategy<Value = BTreeSet<CalendarDay>> {
    proptest::collection::btree_set((1u32..=366).prop_map(|n| nth_day(YEAR, n)), 0..40)
}

fn weekday_set() -> impl Strategy<Value = BTreeSet<CalendarDay>> {
    proptest::collection::btree_set(
        (1u32..=366)
            .prop_map(|n| nth_day(YEAR, n))
            .prop_filter("weekday", |day| !day.is_weekend()),
        1..20,
    )
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (1u32..=365).prop_map(Op::Toggle),
        2 => proptest::option::of(0u32..8).prop_map(Op::SetAllowance),
        1 => Just(Op::Previous),
        1 => Just(Op::Next),
    ]
}

async fn engine_over(
    env: &TestEnvironment,
) -> YearStateEngine<YearStateRepository> {
    let (engine, _) = YearStateEngine::initialize(
        settings(),
        Arc::new(env.year_state_repository()),
        CalendarService::new(),
        YEAR,
    )
    .await;
    engine
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// Saving then loading gives back the same allowance and the same set of days
    #[test]
    fn property_save_load_round_trip(allowance in any::<u32>(), taken in day_set()) {
        run(async move {
            let env = TestEnvironment::new().await.unwrap();
            let repo = env.year_state_repository();
            let taken: Vec<CalendarDay> = taken.into_iter().collect();

            repo.save_year_state(YEAR, allowance, &taken).await.unwrap();
            let loaded = repo.load_year_state(YEAR).await.unwrap().unwrap();

            assert_eq!(loaded.allowance, allowance);
            let loaded_set: BTreeSet<CalendarDay> = loaded.taken.iter().copied().collect();
            let expected: BTreeSet<CalendarDay> = taken.iter().copied().collect();
            assert_eq!(loaded.taken.len(), taken.len());
            assert_eq!(loaded_set, expected);
        });
    }

    /// Toggling the same day twice restores the taken set and the balance
    #[test]
    fn property_toggle_twice_restores_taken(
        taken in weekday_set(),
        headroom in 1u32..5,
        ordinal in 1u32..=366,
    ) {
        run(async move {
            let env = TestEnvironment::new().await.unwrap();
            let allowance = taken.len() as u32 + headroom;
            let seeded: Vec<CalendarDay> = taken.iter().copied().collect();
            env.year_state_repository()
                .save_year_state(YEAR, allowance, &seeded)
                .await
                .unwrap();

            let mut engine = engine_over(&env).await;
            let before = engine.state().remaining;
            let day = nth_day(YEAR, ordinal);

            engine.toggle_day(day).await.unwrap();
            engine.toggle_day(day).await.unwrap();

            let after: BTreeSet<CalendarDay> = engine.state().taken.iter().copied().collect();
            assert_eq!(after, taken);
            assert_eq!(engine.state().taken.len(), taken.len());
            assert_eq!(engine.state().remaining, before);

            let stored = env.year_state_repository().load_year_state(YEAR).await.unwrap().unwrap();
            let stored_set: BTreeSet<CalendarDay> = stored.taken.into_iter().collect();
            assert_eq!(stored_set, taken);
        });
    }

    /// The balance equals allowance minus taken days after every transition
    #[test]
    fn property_remaining_invariant_over_sequences(ops in proptest::collection::vec(op(), 1..40)) {
        run(async move {
            let env = TestEnvironment::new().await.unwrap();
            let mut engine = engine_over(&env).await;
            let start = engine.settings().start_year;
            let end = engine.settings().end_year();

            for op in ops {
                match op {
                    Op::Toggle(ordinal) => {
                        let day = nth_day(engine.state().year, ordinal);
                        engine.toggle_day(day).await.unwrap();
                    }
                    Op::SetAllowance(allowance) => engine.set_allowance(allowance).await.unwrap(),
                    Op::Previous => {
                        engine.navigate_previous_year().await;
                    }
                    Op::Next => {
                        engine.navigate_next_year().await.unwrap();
                    }
                }

                let state = engine.state();
                assert_eq!(state.remaining, i64::from(state.allowance) - state.taken.len() as i64);
                assert!((start..=end).contains(&state.year));
                assert!(state.taken.iter().all(|day| day.year() == state.year && !day.is_weekend()));
                let unique: BTreeSet<CalendarDay> = state.taken.iter().copied().collect();
                assert_eq!(unique.len(), state.taken.len());
                assert!(state.months.iter().all(|month| month.year == state.year));

                // What is on disk for the active year never disagrees with memory
                if let Some(stored) = env.year_state_repository().load_year_state(state.year).await.unwrap() {
                    assert_eq!(stored, YearState::new(state.allowance, state.taken.clone()));
                }
            }
        });
    }
}
