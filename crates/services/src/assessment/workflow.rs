use std::fmt;
use std::sync::Arc;

use log::{debug, info, warn};
use quiz_core::model::{CategoryConfig, Phase, Question, SessionState, SubmissionStatus};
use quiz_core::{AssessmentEngine, QuestionBank, RandomSource, RngSource, SessionEvent};
use rand::SeedableRng;
use rand::rngs::StdRng;
use storage::repository::{
    ResultSubmissionRepository, SessionSnapshotRepository, Storage, StoredResult,
};

use super::submission::build_submission;
use super::view::AssessmentView;
use crate::Clock;
use crate::error::AssessmentServiceError;
use crate::settings::AssessmentSettings;

/// Database setting that selects the in-memory backend.
pub const MEMORY_DB: &str = "memory";

/// Open the storage backend named by `db_url`.
///
/// # Errors
///
/// Returns `AssessmentServiceError::Sqlite` if the database cannot be opened or migrated.
pub async fn open_storage(db_url: &str) -> Result<Storage, AssessmentServiceError> {
    if db_url == MEMORY_DB {
        return Ok(Storage::in_memory());
    }
    Ok(Storage::sqlite(db_url).await?)
}

/// One running assessment: its state, its random source and where it is persisted.
pub struct AssessmentSession {
    key: String,
    state: SessionState,
    rng: Box<dyn RandomSource + Send>,
    /// Set when this process marked the results and still has to hand them over.
    pending_submission: bool,
    resumed: bool,
}

impl AssessmentSession {
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Last known status of this session's result submission, if any.
    #[must_use]
    pub fn submission(&self) -> Option<SubmissionStatus> {
        self.state.submission_status()
    }

    /// True while the results wait for `AssessmentLoopService::complete_submission`.
    #[must_use]
    pub fn has_pending_submission(&self) -> bool {
        self.pending_submission
    }

    /// True when the session was restored from a snapshot.
    #[must_use]
    pub fn was_resumed(&self) -> bool {
        self.resumed
    }
}

impl fmt::Debug for AssessmentSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssessmentSession")
            .field("key", &self.key)
            .field("state", &self.state)
            .field("pending_submission", &self.pending_submission)
            .field("resumed", &self.resumed)
            .finish_non_exhaustive()
    }
}

/// Result of dispatching a single event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub view: AssessmentView,
    /// Set once the session is in results.
    pub submission: Option<SubmissionStatus>,
}

/// Orchestrates resume, event dispatch, snapshot saves and the one-shot result submission.
#[derive(Clone)]
pub struct AssessmentLoopService {
    clock: Clock,
    engine: Arc<AssessmentEngine>,
    snapshots: Arc<dyn SessionSnapshotRepository>,
    results: Arc<dyn ResultSubmissionRepository>,
    settings: AssessmentSettings,
    seed: Option<u64>,
}

impl AssessmentLoopService {
    #[must_use]
    pub fn new(
        clock: Clock,
        engine: AssessmentEngine,
        snapshots: Arc<dyn SessionSnapshotRepository>,
        results: Arc<dyn ResultSubmissionRepository>,
        settings: AssessmentSettings,
    ) -> Self {
        Self {
            clock,
            engine: Arc::new(engine),
            snapshots,
            results,
            settings,
            seed: None,
        }
    }

    /// Service over the built-in catalog and the given storage.
    #[must_use]
    pub fn from_storage(clock: Clock, storage: &Storage, settings: AssessmentSettings) -> Self {
        Self::new(
            clock,
            AssessmentEngine::standard(),
            Arc::clone(&storage.snapshots),
            Arc::clone(&storage.results),
            settings,
        )
    }

    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::from_storage(clock, &Storage::in_memory(), AssessmentSettings::default())
    }

    /// Fix the random source so question order is reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Swap in a custom catalog.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentServiceError::Catalog` if the catalog is inconsistent.
    pub fn with_catalog(
        mut self,
        categories: Vec<CategoryConfig>,
        questions: Vec<Question>,
    ) -> Result<Self, AssessmentServiceError> {
        let bank = QuestionBank::new(categories, questions)?;
        self.engine = Arc::new(AssessmentEngine::new(bank));
        Ok(self)
    }

    #[must_use]
    pub fn engine(&self) -> &AssessmentEngine {
        &self.engine
    }

    #[must_use]
    pub fn settings(&self) -> &AssessmentSettings {
        &self.settings
    }

    fn new_rng(&self) -> Box<dyn RandomSource + Send> {
        match self.seed {
            Some(seed) => Box::new(RngSource::new(StdRng::seed_from_u64(seed))),
            None => Box::new(RngSource::from_thread_rng()),
        }
    }

    /// Restore the session stored under `key`, or start a fresh one.
    ///
    /// An unreadable snapshot is logged and replaced by a fresh session.
    pub async fn resume_or_start(&self, key: &str) -> AssessmentSession {
        let loaded = match self.snapshots.load_snapshot(key).await {
            Ok(loaded) => loaded,
            Err(err) => {
                warn!("discarding unreadable snapshot {key}: {err}");
                None
            }
        };

        let (state, resumed) = match loaded {
            Some(mut state) => {
                // A hand-off cut short by a crash is never retried.
                if state.submission_status() == Some(SubmissionStatus::Saving) {
                    warn!("submission of session {key} was interrupted; marking it failed");
                    state.record_submission(SubmissionStatus::Failed);
                }
                info!(
                    "resumed session {key} in {:?} with {} answers",
                    state.phase(),
                    state.answered().len()
                );
                (state, true)
            }
            None => {
                info!("starting fresh session {key}");
                (self.engine.fresh_session(self.clock.now()), false)
            }
        };

        AssessmentSession {
            key: key.to_owned(),
            state,
            rng: self.new_rng(),
            pending_submission: false,
            resumed,
        }
    }

    /// Apply one UI event and persist the new state.
    ///
    /// Entering results sets the submission marker and reports
    /// `SubmissionStatus::Saving` without waiting on the result store; the
    /// hand-off itself happens in `complete_submission`. Snapshot failures do
    /// not fail the call and are only logged.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentServiceError::Session` if the event is not valid in
    /// the current phase. The session is left unchanged.
    pub async fn dispatch(
        &self,
        session: &mut AssessmentSession,
        event: SessionEvent,
    ) -> Result<DispatchOutcome, AssessmentServiceError> {
        let next = self
            .engine
            .reduce(&session.state, event, session.rng.as_mut())?;
        session.state = next;

        if matches!(event, SessionEvent::Reset { .. }) {
            session.pending_submission = false;
            if let Err(err) = self.snapshots.clear_snapshot(&session.key).await {
                warn!("failed to clear snapshot {}: {err}", session.key);
            }
        }
        if session.state.needs_submission() {
            session.state.mark_submitted();
            session.pending_submission = true;
        } else if session.state.phase() == Phase::Results {
            debug!(
                "results of session started {} already submitted",
                session.state.started_at()
            );
        }
        self.save(session).await;

        let view = self.view(session);
        Ok(DispatchOutcome {
            submission: view.submission,
            view,
        })
    }

    /// Hand pending results to the result store and record the outcome.
    ///
    /// Returns `None` when nothing was pending. The marker is already stored
    /// by `dispatch`, so a crash or failure here never leads to a second
    /// submission.
    pub async fn complete_submission(
        &self,
        session: &mut AssessmentSession,
    ) -> Option<SubmissionStatus> {
        if !std::mem::take(&mut session.pending_submission) {
            return None;
        }
        if session.state.phase() != Phase::Results {
            return None;
        }

        let report = self.engine.report(&session.state);
        let submission =
            build_submission(&self.settings, &report, &session.state, self.clock.now());
        let status = match self.results.submit(&submission).await {
            Ok(ack) if ack.ok => {
                info!("submitted results {:?}: {}", ack.id, submission.summary);
                SubmissionStatus::Saved
            }
            Ok(_) => {
                warn!("result store rejected the submission");
                SubmissionStatus::Failed
            }
            Err(err) => {
                warn!("result submission failed: {err}");
                SubmissionStatus::Failed
            }
        };
        session.state.record_submission(status);
        self.save(session).await;
        Some(status)
    }

    /// Throw the session away and start over with a fresh start time.
    ///
    /// # Errors
    ///
    /// Never fails for a well-formed session; see `dispatch`.
    pub async fn reset(
        &self,
        session: &mut AssessmentSession,
    ) -> Result<DispatchOutcome, AssessmentServiceError> {
        let started_at = self.clock.now();
        self.dispatch(session, SessionEvent::Reset { started_at }).await
    }

    #[must_use]
    pub fn view(&self, session: &AssessmentSession) -> AssessmentView {
        AssessmentView::build(&self.engine, &session.state, session.submission())
    }

    /// Results previously stored for this tool.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentServiceError::Storage` if the result store cannot be read.
    pub async fn history(&self) -> Result<Vec<StoredResult>, AssessmentServiceError> {
        Ok(self.results.list_results(&self.settings.tool_id).await?)
    }

    async fn save(&self, session: &AssessmentSession) {
        let saved = self
            .snapshots
            .save_snapshot(&session.key, &session.state, self.clock.now())
            .await;
        match saved {
            Ok(()) => debug!(
                "saved snapshot {} ({:?}, {} answers)",
                session.key,
                session.state.phase(),
                session.state.answered().len()
            ),
            Err(err) => warn!("failed to save snapshot {}: {err}", session.key),
        }
    }
}
