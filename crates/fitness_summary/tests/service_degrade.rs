use async_trait::async_trait;
use chrono::NaiveDate;
use fitness_summary::service::{SummaryService, SummaryStore};
use fitness_summary::{EngineConfig, LogRecord, SessionRecord, StoreError};
use serde_json::json;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 24).unwrap()
}

fn fixture_log() -> Vec<LogRecord> {
    serde_json::from_value(json!([
        {"id": "l1", "userId": "u1", "action": "workout_finished",
         "meta": {"kcalBurned": 320, "duration": 45}, "createdAt": "2026-08-24T08:30:00"},
        {"id": "l2", "userId": "u1", "action": "imc_calcule",
         "meta": {"poids": 80}, "createdAt": "2026-08-23T09:00:00"}
    ]))
    .expect("fixture log")
}

/// Store whose session and weight fetches can be switched to failing.
struct FlakyStore {
    sessions_fail: bool,
    weight_fail: bool,
    log_fail: bool,
}

#[async_trait]
impl SummaryStore for FlakyStore {
    async fn recent_log(
        &self,
        _user_id: &str,
        _limit: u32,
        _since: Option<NaiveDate>,
    ) -> Result<Vec<LogRecord>, StoreError> {
        if self.log_fail {
            return Err(StoreError::Backend("log table offline".into()));
        }
        Ok(fixture_log())
    }

    async fn recent_sessions(
        &self,
        _user_id: &str,
        _limit: u32,
    ) -> Result<Vec<SessionRecord>, StoreError> {
        if self.sessions_fail {
            return Err(StoreError::Unavailable("sessions feature disabled".into()));
        }
        let sessions = serde_json::from_value(json!([
            {"id": "s1", "userId": "u1", "name": "Push day",
             "startedAt": "2026-08-24T18:00:00", "endedAt": "2026-08-24T18:45:00"}
        ]))
        .expect("fixture sessions");
        Ok(sessions)
    }

    async fn latest_body_weight(&self, _user_id: &str) -> Result<Option<f64>, StoreError> {
        if self.weight_fail {
            return Err(StoreError::Backend("weight table offline".into()));
        }
        Ok(Some(82.5))
    }
}

#[tokio::test]
async fn session_fetch_failure_degrades_to_log_only() {
    let service = SummaryService::new(
        FlakyStore {
            sessions_fail: true,
            weight_fail: false,
            log_fail: false,
        },
        EngineConfig::default(),
    );
    let summary = service.summary_for_at("u1", today()).await.expect("summary");
    assert!(!summary.sessions_available);
    // log-derived fields are intact
    assert_eq!(summary.latest_weight, Some(80.0));
    assert_eq!(summary.calories_burned_week, Some(320.0));
    assert_eq!(summary.total_sessions, 1);
    assert!(summary.muscle_groups.is_empty());
}

#[tokio::test]
async fn weight_fetch_failure_falls_back_to_log_weight() {
    let service = SummaryService::new(
        FlakyStore {
            sessions_fail: false,
            weight_fail: true,
            log_fail: false,
        },
        EngineConfig::default(),
    );
    let summary = service.summary_for_at("u1", today()).await.expect("summary");
    assert!(summary.sessions_available);
    assert_eq!(summary.last_session_name.as_deref(), Some("Push day"));
    // session duration comes from the start/end span
    assert_eq!(summary.last_session_duration_min, Some(45.0));
}

#[tokio::test]
async fn log_fetch_failure_is_an_error() {
    let service = SummaryService::new(
        FlakyStore {
            sessions_fail: false,
            weight_fail: false,
            log_fail: true,
        },
        EngineConfig::default(),
    );
    let result = service.summary_for_at("u1", today()).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn healthy_store_reconciles_both_sources() {
    let service = SummaryService::new(
        FlakyStore {
            sessions_fail: false,
            weight_fail: false,
            log_fail: false,
        },
        EngineConfig::default(),
    );
    let summary = service.summary_for_at("u1", today()).await.expect("summary");
    assert!(summary.sessions_available);
    // both the log workout (08-24) and the session (08-24) land on today
    assert_eq!(summary.streak_days, 1);
    assert_eq!(summary.workouts_count_7d, 1);
}
