//! Main round orchestrator
//!
//! One instance serves one player. Each round races the player's
//! classified submissions against a ticking deadline: classifications run as
//! detached tasks that report back over a channel, while the event loop owns
//! the session and is the only writer of outcomes.

use std::collections::HashSet;
use std::sync::Arc;

use rand::seq::SliceRandom;
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant};

use classifier::{ClassificationRequest, Classifier, ClassifyResult};
use shared::{
    session_debug, session_error, session_info, session_warn, Category, PredictionList, RoundOutcome, SessionId, SessionSummary,
};

use crate::config::GameConfig;
use crate::core::{RoundTransition, Session};
use crate::error::{OrchestratorError, OrchestratorResult};
use crate::events::{GameEvent, PlayerSignal};
use crate::traits::{CategoryProvider, DrawingSurface, Presenter};

/// Classification result tagged with the round it was started in
type RoundResult = (usize, ClassifyResult<PredictionList>);

/// Drives one session from category selection to summary
pub struct RoundOrchestrator<C, S, V>
where
    C: Classifier + 'static,
    S: DrawingSurface,
    V: Presenter,
{
    config: GameConfig,
    session: Session,

    /// Injected services
    classifier: Arc<C>,
    surface: S,
    presenter: V,

    /// Player input
    signals: mpsc::Receiver<PlayerSignal>,

    /// Completed classifications, from any round
    results_tx: mpsc::Sender<RoundResult>,
    results_rx: mpsc::Receiver<RoundResult>,
}

impl<C, S, V> RoundOrchestrator<C, S, V>
where
    C: Classifier + 'static,
    S: DrawingSurface,
    V: Presenter,
{
    /// Provision a session with `config.rounds` distinct categories
    ///
    /// Fails when the provider errors or cannot supply enough categories.
    pub async fn create<P>(
        config: GameConfig,
        provider: &P,
        classifier: Arc<C>,
        surface: S,
        presenter: V,
        signals: mpsc::Receiver<PlayerSignal>,
    ) -> OrchestratorResult<Self>
    where
        P: CategoryProvider + ?Sized,
    {
        config.validate()?;

        let offered = provider.categories(config.rounds).await?;
        let categories = select_categories(offered, config.rounds)?;

        let mut session = Session::new(SessionId::new(), categories)?;
        session.open()?;

        let names: Vec<&str> = session.categories().iter().map(|c| c.name.as_str()).collect();
        session_info!(session.id(), "🎲 New session with categories: {}", names.join(", "));

        let (results_tx, results_rx) = mpsc::channel(8);

        Ok(Self {
            config,
            session,
            classifier,
            surface,
            presenter,
            signals,
            results_tx,
            results_rx,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_id(&self) -> SessionId {
        self.session.id()
    }

    /// Play every round and return the summary
    ///
    /// Fatal errors are reported to the player before being returned.
    pub async fn run(mut self) -> OrchestratorResult<SessionSummary> {
        let result = self.play().await;

        match &result {
            Ok(summary) => {
                session_info!(
                    self.session.id(),
                    "🏁 Session finished: {}/{} correct",
                    summary.correct_count,
                    summary.round_count
                );
            }
            Err(OrchestratorError::Disconnected) => {
                session_info!(self.session.id(), "👋 Player left during {}", self.session.phase());
            }
            Err(e) => {
                session_error!(self.session.id(), "❌ Session failed: {}", e);
                self.presenter
                    .present(GameEvent::SessionFailed { message: e.to_string() })
                    .await;
            }
        }

        result
    }

    async fn play(&mut self) -> OrchestratorResult<SessionSummary> {
        self.presenter
            .present(GameEvent::SessionStarted {
                session: self.session.id(),
                rounds: self.session.round_count(),
                round_seconds: self.config.round_duration.as_secs(),
            })
            .await;

        let mut feedback = None;
        loop {
            let round = self.session.current_round();
            self.presenter
                .present(GameEvent::Waiting {
                    round,
                    rounds: self.session.round_count(),
                    category: self.session.current_category().name.clone(),
                    feedback: feedback.take(),
                })
                .await;

            self.wait_for_ready().await?;
            let outcome = self.play_round().await?;
            let category = self.session.current_category().name.clone();

            match self.session.complete_round()? {
                RoundTransition::Next { feedback: next, .. } => {
                    self.finish_round(round, category, outcome, next.clone()).await;
                    feedback = Some(next);
                }
                RoundTransition::Finished { feedback: last, summary } => {
                    self.finish_round(round, category, outcome, last).await;
                    self.presenter
                        .present(GameEvent::Summary {
                            summary: summary.clone(),
                        })
                        .await;
                    return Ok(summary);
                }
            }
        }
    }

    async fn finish_round(&self, round: usize, category: String, outcome: RoundOutcome, feedback: String) {
        session_info!(self.session.id(), "📋 Round {} ({}) ended: {:?}", round, category, outcome);
        self.presenter
            .present(GameEvent::RoundFinished {
                round,
                category,
                outcome,
                feedback,
            })
            .await;
    }

    /// Block in `Waiting(i)` until the player is ready
    async fn wait_for_ready(&mut self) -> OrchestratorResult<()> {
        loop {
            match self.signals.recv().await {
                Some(PlayerSignal::Ready) => return Ok(()),
                Some(PlayerSignal::Submitted) => {
                    session_debug!(self.session.id(), "Ignoring submission outside of a round");
                }
                None => return Err(OrchestratorError::Disconnected),
            }
        }
    }

    /// Run the active round until it has an outcome
    ///
    /// The deadline is polled first, so a classification that completes on
    /// the same instant as the last tick loses the race.
    async fn play_round(&mut self) -> OrchestratorResult<RoundOutcome> {
        let target = self.session.begin_round()?.clone();
        let round = self.session.current_round();

        self.surface.reset().await?;

        let mut remaining = self.config.ticks_per_round();
        self.presenter
            .present(GameEvent::RoundStarted {
                round,
                category: target.name.clone(),
                seconds: self.config.round_duration.as_secs(),
            })
            .await;
        session_info!(self.session.id(), "🎯 Round {} started: draw {}", round, target);

        let tick = self.config.tick;
        let mut ticker = interval_at(Instant::now() + tick, tick);
        let mut in_flight = false;
        let mut pending = false;

        let outcome = loop {
            tokio::select! {
                biased;

                _ = ticker.tick() => {
                    remaining -= 1;
                    self.presenter
                        .present(GameEvent::Countdown {
                            round,
                            remaining: (tick * remaining as u32).as_secs(),
                        })
                        .await;

                    if remaining == 0 {
                        self.session.record_outcome(RoundOutcome::Timeout)?;
                        break RoundOutcome::Timeout;
                    }
                }

                Some((tagged, result)) = self.results_rx.recv() => {
                    if tagged != round {
                        session_debug!(self.session.id(), "Discarding late result from round {}", tagged);
                        continue;
                    }
                    in_flight = false;

                    if self.handle_result(round, &target, result).await? {
                        break RoundOutcome::Correct;
                    }

                    if pending {
                        pending = false;
                        in_flight = self.dispatch(round, &target).await;
                    }
                }

                signal = self.signals.recv() => match signal {
                    Some(PlayerSignal::Submitted) if in_flight => {
                        pending = true;
                    }
                    Some(PlayerSignal::Submitted) => {
                        in_flight = self.dispatch(round, &target).await;
                    }
                    Some(PlayerSignal::Ready) => {
                        session_debug!(self.session.id(), "Ignoring ready signal during round {}", round);
                    }
                    None => return Err(OrchestratorError::Disconnected),
                },
            }
        };

        Ok(outcome)
    }

    /// Report a classification to the player; true when it won the round
    async fn handle_result(
        &mut self,
        round: usize,
        target: &Category,
        result: ClassifyResult<PredictionList>,
    ) -> OrchestratorResult<bool> {
        match result {
            Ok(predictions) => {
                session_debug!(self.session.id(), "Round {} predictions: {}", round, predictions.describe());
                let matched = predictions.top().map(|p| p.category_index) == Some(target.index);
                self.presenter
                    .present(GameEvent::Predictions { round, predictions })
                    .await;

                Ok(matched && self.session.record_outcome(RoundOutcome::Correct)?)
            }
            Err(e) if e.is_client_input() => {
                session_debug!(self.session.id(), "Submission rejected: {}", e);
                self.presenter
                    .present(GameEvent::AttemptRejected {
                        round,
                        reason: e.to_string(),
                    })
                    .await;
                Ok(false)
            }
            Err(e) => {
                session_warn!(self.session.id(), "⚠️ Classification failed: {}", e);
                self.presenter
                    .present(GameEvent::TransientError {
                        round,
                        message: e.to_string(),
                    })
                    .await;
                Ok(false)
            }
        }
    }

    /// Export the drawing and classify it in the background
    ///
    /// Returns whether a classification was started.
    async fn dispatch(&self, round: usize, target: &Category) -> bool {
        let envelope = match self.surface.export_image().await {
            Ok(envelope) => envelope,
            Err(e) => {
                session_warn!(self.session.id(), "⚠️ Could not export drawing: {}", e);
                self.presenter
                    .present(GameEvent::AttemptRejected {
                        round,
                        reason: e.to_string(),
                    })
                    .await;
                return false;
            }
        };

        let request = ClassificationRequest::new(envelope)
            .with_expected_category(target.name.clone())
            .with_session(self.session.id());
        let classifier = Arc::clone(&self.classifier);
        let results = self.results_tx.clone();

        tokio::spawn(async move {
            let result = classifier.classify(request).await;
            // The receiver is gone once the session is over
            let _ = results.send((round, result)).await;
        });
        true
    }
}

/// Keep `rounds` categories with distinct indices, sampling if more were offered
fn select_categories(offered: Vec<Category>, rounds: usize) -> OrchestratorResult<Vec<Category>> {
    let mut seen = HashSet::new();
    let mut distinct: Vec<Category> = offered.into_iter().filter(|c| seen.insert(c.index)).collect();

    if distinct.len() < rounds {
        return Err(OrchestratorError::Provisioning {
            requested: rounds,
            available: distinct.len(),
        });
    }

    if distinct.len() > rounds {
        let (picked, _) = distinct.partial_shuffle(&mut rand::thread_rng(), rounds);
        return Ok(picked.to_vec());
    }
    distinct.truncate(rounds);
    Ok(distinct)
}
