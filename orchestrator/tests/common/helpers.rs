//! Test helpers and builder patterns for orchestrator tests

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use classifier::{ClassificationRequest, Classifier, ClassifyError, ClassifyResult};
use orchestrator::{
    CategoryProvider, DrawingSurface, GameConfig, GameEvent, OrchestratorError, OrchestratorResult, PlayerSignal, Presenter,
    RoundOrchestrator,
};
use shared::{Category, Prediction, PredictionList, RoundOutcome};
use tokio::sync::mpsc;

use super::fixtures::TestFixtures;

/// Index of a category the recognizer may guess that is never a target
pub const SQUIGGLE: u32 = 999;

/// How the scripted classifier answers one call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    /// Top prediction is the expected category
    Recognize,
    /// Top prediction is something else
    Misrecognize,
    /// Validation failure
    Reject,
    /// Recognizer unreachable
    Fail,
}

pub struct ScriptedClassifier {
    delay: Duration,
    script: Mutex<VecDeque<Answer>>,
    fallback: Answer,
    calls: AtomicUsize,
}

impl ScriptedClassifier {
    pub fn new(delay: Duration, script: Vec<Answer>, fallback: Answer) -> Self {
        Self {
            delay,
            script: Mutex::new(script.into()),
            fallback,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next_answer(&self) -> Answer {
        self.script.lock().unwrap().pop_front().unwrap_or(self.fallback)
    }
}

#[async_trait]
impl Classifier for ScriptedClassifier {
    async fn classify(&self, request: ClassificationRequest) -> ClassifyResult<PredictionList> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let answer = self.next_answer();
        tokio::time::sleep(self.delay).await;

        let expected = request.expected_category.unwrap_or_default();
        let index = TestFixtures::index_of(&expected).unwrap_or_default();

        match answer {
            Answer::Recognize => Ok(PredictionList::from_ranked(vec![
                Prediction::new(index, expected, 0.9),
                Prediction::new(SQUIGGLE, "squiggle", 0.05),
            ])),
            Answer::Misrecognize => Ok(PredictionList::from_ranked(vec![
                Prediction::new(SQUIGGLE, "squiggle", 0.8),
                Prediction::new(index, expected, 0.1),
            ])),
            Answer::Reject => Err(ClassifyError::MalformedEnvelope),
            Answer::Fail => Err(ClassifyError::unavailable("connection refused")),
        }
    }
}

/// What the scripted player does in response to events
#[derive(Debug, Clone, Default)]
pub struct PlayerBehavior {
    /// Submissions sent as soon as a round starts
    pub submissions_on_start: usize,
    /// Submit again after predictions, rejections and errors
    pub resubmit_after_feedback: bool,
    /// Hang up when this round starts
    pub disconnect_on_round: Option<usize>,
    /// Exporting the drawing fails
    pub broken_surface: bool,
}

/// Player that is both drawing surface and presenter
#[derive(Clone)]
pub struct ScriptedPlayer {
    behavior: PlayerBehavior,
    events: Arc<Mutex<Vec<GameEvent>>>,
    signals: Arc<Mutex<Option<mpsc::Sender<PlayerSignal>>>>,
    resets: Arc<AtomicUsize>,
}

impl ScriptedPlayer {
    pub fn new(behavior: PlayerBehavior, signals: mpsc::Sender<PlayerSignal>) -> Self {
        Self {
            behavior,
            events: Arc::new(Mutex::new(Vec::new())),
            signals: Arc::new(Mutex::new(Some(signals))),
            resets: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn events(&self) -> Vec<GameEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn resets(&self) -> usize {
        self.resets.load(Ordering::SeqCst)
    }

    fn send(&self, signal: PlayerSignal) {
        if let Some(tx) = self.signals.lock().unwrap().as_ref() {
            let _ = tx.try_send(signal);
        }
    }

    fn hang_up(&self) {
        self.signals.lock().unwrap().take();
    }
}

#[async_trait]
impl DrawingSurface for ScriptedPlayer {
    async fn export_image(&self) -> OrchestratorResult<String> {
        if self.behavior.broken_surface {
            return Err(OrchestratorError::surface("canvas unavailable"));
        }
        Ok(TestFixtures::envelope())
    }

    async fn reset(&self) -> OrchestratorResult<()> {
        self.resets.fetch_add(1, Ordering::SeqCst);
        self.events.lock().unwrap().push(GameEvent::ResetSurface);
        Ok(())
    }
}

#[async_trait]
impl Presenter for ScriptedPlayer {
    async fn present(&self, event: GameEvent) {
        match &event {
            GameEvent::Waiting { .. } => self.send(PlayerSignal::Ready),
            GameEvent::RoundStarted { round, .. } => {
                if self.behavior.disconnect_on_round == Some(*round) {
                    self.hang_up();
                }
                for _ in 0..self.behavior.submissions_on_start {
                    self.send(PlayerSignal::Submitted);
                }
            }
            GameEvent::Predictions { .. } | GameEvent::AttemptRejected { .. } | GameEvent::TransientError { .. } => {
                if self.behavior.resubmit_after_feedback {
                    self.send(PlayerSignal::Submitted);
                }
            }
            _ => {}
        }
        self.events.lock().unwrap().push(event);
    }
}

/// Provider that hands out categories in a fixed order
pub struct FixedProvider(pub Vec<Category>);

#[async_trait]
impl CategoryProvider for FixedProvider {
    async fn categories(&self, _n: usize) -> OrchestratorResult<Vec<Category>> {
        Ok(self.0.clone())
    }
}

pub type TestOrchestrator = RoundOrchestrator<ScriptedClassifier, ScriptedPlayer, ScriptedPlayer>;

/// Builder for a scripted session with sensible defaults
pub struct SessionBuilder {
    rounds: usize,
    round_seconds: u64,
    delay: Duration,
    script: Vec<Answer>,
    fallback: Answer,
    behavior: PlayerBehavior,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self {
            rounds: 2,
            round_seconds: 30,
            delay: Duration::from_secs(2),
            script: Vec::new(),
            fallback: Answer::Recognize,
            behavior: PlayerBehavior {
                submissions_on_start: 1,
                ..PlayerBehavior::default()
            },
        }
    }

    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn with_round_seconds(mut self, seconds: u64) -> Self {
        self.round_seconds = seconds;
        self
    }

    pub fn with_classifier_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Answers consumed in order, then `fallback` forever
    pub fn with_answers(mut self, script: Vec<Answer>, fallback: Answer) -> Self {
        self.script = script;
        self.fallback = fallback;
        self
    }

    pub fn with_behavior(mut self, behavior: PlayerBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub async fn build(self) -> (TestOrchestrator, ScriptedPlayer, Arc<ScriptedClassifier>) {
        let (tx, rx) = mpsc::channel(32);
        let player = ScriptedPlayer::new(self.behavior, tx);
        let classifier = Arc::new(ScriptedClassifier::new(self.delay, self.script, self.fallback));
        let config = GameConfig::new(self.rounds, Duration::from_secs(self.round_seconds)).unwrap();
        let provider = FixedProvider(TestFixtures::categories(self.rounds));

        let orchestrator = RoundOrchestrator::create(
            config,
            &provider,
            Arc::clone(&classifier),
            player.clone(),
            player.clone(),
            rx,
        )
        .await
        .unwrap();

        (orchestrator, player, classifier)
    }
}

pub struct TestHelpers;

impl TestHelpers {
    /// Outcomes in the order rounds finished
    pub fn outcomes(events: &[GameEvent]) -> Vec<RoundOutcome> {
        events
            .iter()
            .filter_map(|e| match e {
                GameEvent::RoundFinished { outcome, .. } => Some(*outcome),
                _ => None,
            })
            .collect()
    }

    /// Remaining-time values announced during `round`
    pub fn countdown(events: &[GameEvent], round: usize) -> Vec<u64> {
        events
            .iter()
            .filter_map(|e| match e {
                GameEvent::Countdown { round: r, remaining } if *r == round => Some(*remaining),
                _ => None,
            })
            .collect()
    }

    pub fn count(events: &[GameEvent], pred: impl Fn(&GameEvent) -> bool) -> usize {
        events.iter().filter(|e| pred(e)).count()
    }
}
