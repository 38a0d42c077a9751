//! Async orchestration over the storage collaborators.
//!
//! The engine itself is pure and synchronous; this seam issues the two
//! independent reads concurrently and applies the degradation policy: the
//! log is the primary source and its failure is an error, while a failed
//! session or body-weight fetch only costs precision, never correctness.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::config::EngineConfig;
use crate::history::derive_from_history;
use crate::reconcile::{SessionsOutcome, reconcile};
use crate::sessions::derive_from_sessions;
use crate::types::{LogRecord, SessionRecord, Summary};
use crate::{EngineError, StoreError};

/// Read-side collaborators owned by the storage layer. Both list methods
/// return records ordered most-recent-first.
#[async_trait]
pub trait SummaryStore: Send + Sync + 'static {
    async fn recent_log(
        &self,
        user_id: &str,
        limit: u32,
        since: Option<NaiveDate>,
    ) -> Result<Vec<LogRecord>, StoreError>;

    async fn recent_sessions(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<SessionRecord>, StoreError>;

    /// Latest explicitly tracked body weight, used by the estimator when a
    /// session lacks explicit calorie data.
    async fn latest_body_weight(&self, user_id: &str) -> Result<Option<f64>, StoreError>;
}

pub struct SummaryService<S: SummaryStore> {
    store: S,
    config: EngineConfig,
}

impl<S: SummaryStore> SummaryService<S> {
    pub fn new(store: S, config: EngineConfig) -> Self {
        Self { store, config }
    }

    /// Compute the summary for one user as of today (local clock).
    pub async fn summary_for(&self, user_id: &str) -> Result<Summary, EngineError> {
        let today = chrono::Local::now().date_naive();
        self.summary_for_at(user_id, today).await
    }

    /// Deterministic variant with an injected "today", used by tests.
    pub async fn summary_for_at(
        &self,
        user_id: &str,
        today: NaiveDate,
    ) -> Result<Summary, EngineError> {
        let (log, sessions, weight) = tokio::join!(
            self.store.recent_log(user_id, self.config.log_limit, None),
            self.store.recent_sessions(user_id, self.config.session_limit),
            self.store.latest_body_weight(user_id),
        );

        let log = log?;
        let history = derive_from_history(&log, today, self.config.window_days);

        let body_weight = match weight {
            Ok(tracked) => tracked.or(history.latest_weight),
            Err(err) => {
                tracing::warn!(
                    user_id,
                    error = %err,
                    "body weight fetch failed; using log-derived weight"
                );
                history.latest_weight
            }
        };

        let outcome = match sessions {
            Ok(list) => SessionsOutcome::Available(derive_from_sessions(
                &list,
                body_weight,
                today,
                self.config.window_days,
            )),
            Err(err) => {
                tracing::warn!(
                    user_id,
                    error = %err,
                    "session source unavailable; degrading to log-only summary"
                );
                SessionsOutcome::Unavailable
            }
        };

        let summary = reconcile(&history, &outcome, today);
        tracing::debug!(
            user_id,
            records = log.len(),
            sessions_available = summary.sessions_available,
            "summary computed"
        );
        Ok(summary)
    }
}
