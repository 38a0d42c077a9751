//! Derived-metrics reconciliation engine for the fitness dashboard.
//!
//! Two heterogeneous, independently evolving sources — a free-form activity
//! log and a structured workout-session log — are folded into one
//! numerically sane summary: current weight/IMC, calorie balance, streaks,
//! estimated per-exercise calories and durations, and muscle-group
//! distribution. The engine is pure and stateless: it performs no I/O,
//! mutates nothing, and is recomputed per request. Storage access lives
//! behind the [`service::SummaryStore`] trait.

use thiserror::Error;

pub mod classify;
pub mod coerce;
pub mod config;
pub mod dates;
pub mod estimate;
pub mod history;
pub mod reconcile;
pub mod service;
pub mod sessions;
pub mod signals;
pub mod streak;
pub mod types;

pub use config::EngineConfig;
pub use estimate::{
    SessionEstimate, estimate_calories, estimate_duration_minutes, estimate_session, pick_met,
};
pub use history::{HistoryDerived, derive_from_history};
pub use reconcile::{SessionsOutcome, reconcile};
pub use service::{SummaryService, SummaryStore};
pub use sessions::{SessionDerived, derive_from_sessions};
pub use streak::current_streak;
pub use types::{
    ExerciseKind, LogRecord, SessionEntry, SessionRecord, SetEntry, Summary,
};

/// Failures of the storage collaborators. The pure engine itself has no
/// error path.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("backend error: {0}")]
    Backend(String),
    #[error("source unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("configuration error: {0}")]
    Config(String),
}

/// Default aggregation window for the `*7d` summary fields.
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// Compute the dashboard summary as of today (local clock).
///
/// `sessions: None` means the session source is unavailable and the summary
/// degrades to log-only derivation; `Some(&[])` means the source answered
/// with no sessions. Infallible: malformed values coerce to null, never to
/// an error.
pub fn compute_user_summary(
    log: &[LogRecord],
    sessions: Option<&[SessionRecord]>,
) -> Summary {
    compute_user_summary_at(
        log,
        sessions,
        chrono::Local::now().date_naive(),
        DEFAULT_WINDOW_DAYS,
    )
}

/// Deterministic variant with an injected "today" and window, used by tests
/// and the service layer. The estimator's body weight falls back to the
/// log-derived latest weight.
pub fn compute_user_summary_at(
    log: &[LogRecord],
    sessions: Option<&[SessionRecord]>,
    today: chrono::NaiveDate,
    window_days: u32,
) -> Summary {
    let history = derive_from_history(log, today, window_days);
    let outcome = match sessions {
        Some(list) => SessionsOutcome::Available(derive_from_sessions(
            list,
            history.latest_weight,
            today,
            window_days,
        )),
        None => SessionsOutcome::Unavailable,
    };
    reconcile(&history, &outcome, today)
}
