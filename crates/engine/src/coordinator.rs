use crate::error::PreconditionError;
use api_client::error::GatewayError;
use api_client::{AnalyticsGateway, AnalyzeRequest, BacktestRequest, PredictRequest};
use configuration::{SameSubjectPolicy, Settings};
use core_types::{
    AnalysisPayload, BacktestPayload, PredictionMode, PredictionPayload, Subject,
    TargetParameters,
};
use events::{
    OperationResult, PerSlot, SessionEvent, SessionEventKind, SessionState, Slot,
};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, watch};
use uuid::Uuid;

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// The knobs that shape how the coordinator reacts to commands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoordinatorPolicy {
    /// What re-selecting the current subject does.
    pub same_subject: SameSubjectPolicy,
    /// Upper bound for every gateway call. On expiry the call resolves as a network error.
    pub request_timeout: Option<Duration>,
    pub backtest_train_period: Option<String>,
    pub backtest_test_days: Option<u32>,
}

impl CoordinatorPolicy {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            same_subject: settings.session.same_subject,
            request_timeout: settings.gateway.request_timeout(),
            backtest_train_period: settings.backtest.train_period.clone(),
            backtest_test_days: settings.backtest.test_days,
        }
    }
}

/// What `apply` did with a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The resolution belonged to the slot's current generation and was written to state.
    Applied(Slot),
    /// A newer call had superseded it; the result was dropped.
    Discarded(Slot),
}

impl ApplyOutcome {
    pub fn slot(&self) -> Slot {
        match self {
            ApplyOutcome::Applied(slot) | ApplyOutcome::Discarded(slot) => *slot,
        }
    }
}

enum Outcome {
    Analysis(Result<AnalysisPayload, GatewayError>),
    Prediction(Result<PredictionPayload, GatewayError>),
    Backtest(Result<BacktestPayload, GatewayError>),
}

/// A finished gateway call, tagged with the generation it was dispatched under.
struct Resolution {
    slot: Slot,
    generation: u64,
    outcome: Outcome,
}

/// Sequences analysis, prediction and backtest for one session.
///
/// The coordinator is the single writer of [`SessionState`]. Commands mutate state
/// synchronously and spawn at most one gateway call each; the calls report back over a
/// channel and only touch state again when the owner feeds them through
/// [`next_resolution`](Self::next_resolution), [`drain`](Self::drain) or
/// [`settle`](Self::settle). Commands must be issued from within a Tokio runtime.
///
/// Every slot carries a generation counter that is bumped whenever the slot is
/// dispatched or invalidated. A resolution is applied only if its generation is still
/// current, so a slow response can never overwrite the result of a newer request.
pub struct WorkflowCoordinator {
    gateway: Arc<dyn AnalyticsGateway>,
    policy: CoordinatorPolicy,
    session_id: Uuid,
    state: SessionState,
    generations: PerSlot<u64>,
    resolution_tx: mpsc::UnboundedSender<Resolution>,
    resolution_rx: mpsc::UnboundedReceiver<Resolution>,
    snapshot_tx: watch::Sender<Arc<SessionState>>,
    event_tx: broadcast::Sender<SessionEvent>,
}

impl WorkflowCoordinator {
    /// Creates an idle session. Nothing is fetched until a command is issued.
    pub fn new(
        gateway: Arc<dyn AnalyticsGateway>,
        subject: Subject,
        targets: TargetParameters,
        policy: CoordinatorPolicy,
    ) -> Self {
        let state = SessionState::new(subject, targets);
        let (resolution_tx, resolution_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, _) = watch::channel(Arc::new(state.clone()));
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            gateway,
            policy,
            session_id: Uuid::new_v4(),
            state,
            generations: PerSlot::default(),
            resolution_tx,
            resolution_rx,
            snapshot_tx,
            event_tx,
        }
    }

    // ==========================================================================
    // Commands
    // ==========================================================================

    /// Switches to `subject`, resets every stage and refreshes the analysis.
    pub fn select_subject(&mut self, subject: Subject) {
        if subject.symbol == self.state.subject.symbol
            && self.policy.same_subject == SameSubjectPolicy::Ignore
        {
            tracing::debug!(symbol = %subject.symbol, "Subject already selected; ignoring.");
            return;
        }

        tracing::info!(symbol = %subject.symbol, "Subject selected.");
        let symbol = subject.symbol.clone();
        self.state.subject = subject;
        for slot in Slot::ALL {
            self.invalidate(slot);
        }
        self.emit(SessionEventKind::SubjectChanged { symbol });
        self.refresh();
    }

    /// Stores the targets after coercing each field to a non-negative integer.
    /// No remote call is made; the next refresh sends them.
    pub fn set_targets(&mut self, monthly: &str, total: &str) -> TargetParameters {
        let targets = TargetParameters::from_input(monthly, total);
        self.state.targets = targets;
        tracing::debug!(
            monthly = targets.monthly_target,
            total = targets.total_target,
            "Targets updated."
        );
        self.emit(SessionEventKind::TargetsChanged(targets));
        self.publish();
        targets
    }

    /// Re-runs the market analysis for the current subject and targets.
    pub fn refresh(&mut self) {
        let request = AnalyzeRequest::new(&self.state.subject, self.state.targets);
        self.dispatch(
            Slot::Analysis,
            move |gateway| async move { gateway.analyze(&request).await },
            Outcome::Analysis,
        );
    }

    /// Requests a forecast from the model selected by `mode`. Any backtest is made stale.
    pub fn run_prediction(&mut self, mode: PredictionMode) -> Result<(), PreconditionError> {
        if !self.state.analysis.is_success() {
            return Err(PreconditionError::new("run_prediction", Slot::Analysis));
        }

        self.invalidate(Slot::Backtest);
        self.state.prediction_mode = Some(mode);
        let request = PredictRequest::new(&self.state.subject);
        self.dispatch(
            Slot::Prediction,
            move |gateway| async move { gateway.predict(mode, &request).await },
            Outcome::Prediction,
        );
        Ok(())
    }

    /// Backtests the forecasting model. Requires a successful prediction.
    pub fn run_backtest(&mut self) -> Result<(), PreconditionError> {
        if !self.state.prediction.is_success() {
            return Err(PreconditionError::new("run_backtest", Slot::Prediction));
        }

        let request = BacktestRequest::new(
            &self.state.subject,
            self.policy.backtest_train_period.clone(),
            self.policy.backtest_test_days,
        );
        self.dispatch(
            Slot::Backtest,
            move |gateway| async move { gateway.backtest(&request).await },
            Outcome::Backtest,
        );
        Ok(())
    }

    // ==========================================================================
    // Resolutions
    // ==========================================================================

    /// Waits for the next gateway call to finish and applies it.
    ///
    /// Pends forever when nothing is in flight, which makes it safe to use as one arm
    /// of a `tokio::select!`.
    pub async fn next_resolution(&mut self) -> Option<ApplyOutcome> {
        let resolution = self.resolution_rx.recv().await?;
        Some(self.apply(resolution))
    }

    /// Applies every resolution that has already arrived, without waiting.
    pub fn drain(&mut self) -> Vec<ApplyOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(resolution) = self.resolution_rx.try_recv() {
            outcomes.push(self.apply(resolution));
        }
        outcomes
    }

    /// Applies resolutions until no stage is pending.
    pub async fn settle(&mut self) {
        while self.state.is_busy() {
            if self.next_resolution().await.is_none() {
                break;
            }
        }
    }

    fn apply(&mut self, resolution: Resolution) -> ApplyOutcome {
        let Resolution {
            slot,
            generation,
            outcome,
        } = resolution;

        let current = *self.generations.get(slot);
        if generation != current {
            tracing::debug!(%slot, generation, current, "Discarding stale resolution.");
            self.emit(SessionEventKind::StaleDiscarded {
                slot,
                generation,
                current,
            });
            return ApplyOutcome::Discarded(slot);
        }

        match outcome {
            Outcome::Analysis(Ok(payload)) => {
                self.state.analysis = OperationResult::Success(Arc::new(payload));
                // Forecasts and backtests belong to the analysis run they followed.
                self.invalidate(Slot::Prediction);
                self.invalidate(Slot::Backtest);
            }
            Outcome::Analysis(Err(e)) => self.state.analysis = failed(slot, e),
            Outcome::Prediction(Ok(payload)) => {
                self.state.prediction = OperationResult::Success(Arc::new(payload));
            }
            Outcome::Prediction(Err(e)) => self.state.prediction = failed(slot, e),
            Outcome::Backtest(Ok(payload)) => {
                self.state.backtest = OperationResult::Success(Arc::new(payload));
            }
            Outcome::Backtest(Err(e)) => self.state.backtest = failed(slot, e),
        }

        let status = self.state.status(slot);
        tracing::info!(%slot, generation, ?status, "Resolution applied.");
        self.emit(SessionEventKind::Resolved {
            slot,
            generation,
            status,
        });
        self.publish();
        ApplyOutcome::Applied(slot)
    }

    // ==========================================================================
    // Observation
    // ==========================================================================

    /// The live session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The most recently published immutable snapshot.
    pub fn snapshot(&self) -> Arc<SessionState> {
        Arc::clone(&self.snapshot_tx.borrow())
    }

    /// A receiver that observes every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Arc<SessionState>> {
        self.snapshot_tx.subscribe()
    }

    /// A receiver for the coordinator's event stream.
    pub fn events(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }

    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    pub fn generation(&self, slot: Slot) -> u64 {
        *self.generations.get(slot)
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn policy(&self) -> &CoordinatorPolicy {
        &self.policy
    }

    // ==========================================================================
    // Internals
    // ==========================================================================

    /// The single place a slot goes pending and a gateway call is started.
    ///
    /// `call` builds the gateway future, `wrap` tags its result for `apply`. When a
    /// request timeout is configured the call races a timer, and expiry resolves the
    /// same generation as a network error. A call that panics resolves as a service
    /// error, so the slot never stays pending.
    fn dispatch<T, F, Fut>(
        &mut self,
        slot: Slot,
        call: F,
        wrap: fn(Result<T, GatewayError>) -> Outcome,
    ) where
        F: FnOnce(Arc<dyn AnalyticsGateway>) -> Fut,
        Fut: Future<Output = Result<T, GatewayError>> + Send + 'static,
        T: Send + 'static,
    {
        let generation = self.bump(slot);
        match slot {
            Slot::Analysis => self.state.analysis = OperationResult::Pending,
            Slot::Prediction => self.state.prediction = OperationResult::Pending,
            Slot::Backtest => self.state.backtest = OperationResult::Pending,
        }

        let future = call(Arc::clone(&self.gateway));
        let timeout = self.policy.request_timeout;
        let tx = self.resolution_tx.clone();
        tokio::spawn(async move {
            // The call runs on its own task so a panic surfaces as a JoinError here.
            let mut call = tokio::spawn(future);
            let joined = match timeout {
                Some(limit) => match tokio::time::timeout(limit, &mut call).await {
                    Ok(joined) => joined,
                    Err(_) => {
                        call.abort();
                        Ok(Err(GatewayError::Network(format!(
                            "request timed out after {:?}",
                            limit
                        ))))
                    }
                },
                None => call.await,
            };
            let result = joined.unwrap_or_else(|e| {
                Err(GatewayError::Service(format!("Gateway call aborted: {}", e)))
            });
            // The receiver only closes when the coordinator is dropped.
            let _ = tx.send(Resolution {
                slot,
                generation,
                outcome: wrap(result),
            });
        });

        tracing::info!(%slot, generation, symbol = %self.state.subject.symbol, "Dispatched.");
        self.emit(SessionEventKind::Dispatched { slot, generation });
        self.publish();
    }

    /// Resets a slot to idle and supersedes anything in flight for it.
    fn invalidate(&mut self, slot: Slot) {
        self.bump(slot);
        match slot {
            Slot::Analysis => self.state.analysis = OperationResult::Idle,
            Slot::Prediction => {
                self.state.prediction = OperationResult::Idle;
                self.state.prediction_mode = None;
            }
            Slot::Backtest => self.state.backtest = OperationResult::Idle,
        }
    }

    fn bump(&mut self, slot: Slot) -> u64 {
        let generation = self.generations.get_mut(slot);
        *generation += 1;
        *generation
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(Arc::new(self.state.clone()));
    }

    fn emit(&self, kind: SessionEventKind) {
        // No subscribers is fine.
        let _ = self.event_tx.send(SessionEvent::new(self.session_id, kind));
    }
}

fn failed<T>(slot: Slot, error: GatewayError) -> OperationResult<T> {
    tracing::warn!(%slot, error = %error, "Operation failed.");
    OperationResult::Failed(error.to_string())
}
