#![cfg(feature = "std")]

//! Single-writer game controller.
//!
//! `GameController` owns the [`Game`] and is the only thing that mutates it.
//! Renderers talk to it through [`Command`]s and read [`Snapshot`]s; a
//! one-second clock drives the turn timer. Persistence and notification run
//! on a separate worker task, so a slow or failing collaborator never holds
//! up play.

use std::boxed::Box;
use std::future::Future;
use std::string::{String, ToString};

use rand::rngs::SmallRng;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, timeout, Duration, Instant, MissedTickBehavior};
use uuid::Uuid;

use crate::core::{Game, GameConfig, GameView, Opponent, Phase, RandomOpponent, Resolution, Side, Tick};
use crate::domain::{GameSummary, MoveRecord, VictoryNotice};
use crate::notify::Notifier;
use crate::persistence::GameRecorder;

/// Period of the turn clock.
pub const CLOCK_PERIOD: Duration = Duration::from_secs(1);

/// Upper bound on any single recorder or notifier call.
pub const COLLABORATOR_TIMEOUT: Duration = Duration::from_secs(5);

/// Requests accepted by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Submit { row: usize, col: usize },
    Pause,
    Resume,
    TogglePause,
    Restart(GameConfig),
    Shutdown,
}

/// What renderers see after every step.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub match_id: Uuid,
    pub view: GameView,
    /// Status of the last collaborator interaction, for display only.
    pub advisory: Option<String>,
}

/// Work handed to the collaborator task.
enum Outbound {
    Move {
        match_id: Uuid,
        record: MoveRecord,
    },
    Finished {
        match_id: Uuid,
        summary: GameSummary,
        notice: Option<VictoryNotice>,
    },
    Flush(oneshot::Sender<()>),
}

/// Status line reported back by the collaborator task.
#[derive(Debug)]
struct Advisory {
    match_id: Uuid,
    text: String,
}

async fn bounded<F>(what: &str, fut: F) -> anyhow::Result<()>
where
    F: Future<Output = anyhow::Result<()>>,
{
    timeout(COLLABORATOR_TIMEOUT, fut)
        .await
        .map_err(|_| anyhow::anyhow!("{} timed out after {:?}", what, COLLABORATOR_TIMEOUT))?
}

/// Owns the recorder and notifier and works through [`Outbound`] in order.
struct Collaborators {
    recorder: Box<dyn GameRecorder>,
    notifier: Box<dyn Notifier>,
    advisories: mpsc::UnboundedSender<Advisory>,
}

impl Collaborators {
    async fn run(mut self, mut inbox: mpsc::UnboundedReceiver<Outbound>) {
        while let Some(msg) = inbox.recv().await {
            match msg {
                Outbound::Move { match_id, record } => {
                    let turn = record.turn_number;
                    if let Err(e) = bounded("save_move", self.recorder.save_move(match_id, record)).await {
                        log::warn!("failed to save move {}: {}", turn, e);
                        self.report(match_id, std::format!("Error saving move: {}", e));
                    }
                }
                Outbound::Finished {
                    match_id,
                    summary,
                    notice,
                } => self.finish(match_id, summary, notice).await,
                Outbound::Flush(done) => {
                    let _ = done.send(());
                }
            }
        }
        log::debug!("collaborator task stopped");
    }

    async fn finish(&mut self, match_id: Uuid, summary: GameSummary, notice: Option<VictoryNotice>) {
        match bounded("save_summary", self.recorder.save_summary(match_id, summary)).await {
            Ok(()) => self.report(match_id, "Game saved".to_string()),
            Err(e) => {
                log::warn!("failed to save game summary: {}", e);
                self.report(match_id, std::format!("Error saving game: {}", e));
            }
        }
        let Some(notice) = notice else {
            return;
        };
        if let Err(e) = bounded("notify_victory", self.notifier.notify_victory(notice)).await {
            log::warn!("failed to send victory notice: {}", e);
            self.report(match_id, std::format!("Error sending notification: {}", e));
        }
    }

    fn report(&self, match_id: Uuid, text: String) {
        let _ = self.advisories.send(Advisory { match_id, text });
    }
}

pub struct GameController {
    game: Game,
    rng: SmallRng,
    opponent: Box<dyn Opponent>,
    recipient: Option<String>,
    match_id: Uuid,
    recorded_moves: usize,
    finalized: bool,
    advisory: Option<String>,
    outbox: mpsc::UnboundedSender<Outbound>,
    advisories: mpsc::UnboundedReceiver<Advisory>,
    worker: JoinHandle<()>,
}

impl GameController {
    /// Set up and start a game with `config`, playing against a
    /// [`RandomOpponent`]. Spawns the collaborator task, so this must be
    /// called from within a tokio runtime.
    pub fn new(
        config: GameConfig,
        mut rng: SmallRng,
        recorder: Box<dyn GameRecorder>,
        notifier: Box<dyn Notifier>,
    ) -> anyhow::Result<Self> {
        let mut game = Game::new(config);
        game.start(&mut rng)?;
        let match_id = Uuid::new_v4();
        log::info!(
            "match {} started: {} mines, {}s per turn",
            match_id,
            config.mines(),
            config.timer_secs()
        );

        let (outbox, inbox) = mpsc::unbounded_channel();
        let (report_tx, advisories) = mpsc::unbounded_channel();
        let worker = tokio::spawn(
            Collaborators {
                recorder,
                notifier,
                advisories: report_tx,
            }
            .run(inbox),
        );

        Ok(Self {
            game,
            rng,
            opponent: Box::new(RandomOpponent::new()),
            recipient: None,
            match_id,
            recorded_moves: 0,
            finalized: false,
            advisory: None,
            outbox,
            advisories,
            worker,
        })
    }

    /// Replace the opponent strategy.
    pub fn with_opponent(mut self, opponent: Box<dyn Opponent>) -> Self {
        self.opponent = opponent;
        self
    }

    /// Address that receives a victory notice when the player wins.
    pub fn with_recipient(mut self, recipient: impl Into<String>) -> Self {
        self.recipient = Some(recipient.into());
        self
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn match_id(&self) -> Uuid {
        self.match_id
    }

    pub fn advisory(&self) -> Option<&str> {
        self.advisory.as_deref()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            match_id: self.match_id,
            view: self.game.view(),
            advisory: self.advisory.clone(),
        }
    }

    /// Apply one command. Returns `true` when a move resolved, so the
    /// caller can restart its clock. Rejected moves are logged and ignored.
    pub fn handle_command(&mut self, cmd: Command) -> anyhow::Result<bool> {
        match cmd {
            Command::Submit { row, col } => match self.game.submit_move(row, col) {
                Ok(res) => {
                    log_resolution(&res);
                    self.after_player_move()?;
                    Ok(true)
                }
                Err(e) => {
                    log::debug!("ignored move at ({}, {}): {}", row, col, e);
                    Ok(false)
                }
            },
            Command::Pause => {
                self.game.pause();
                Ok(false)
            }
            Command::Resume => {
                self.game.resume();
                Ok(false)
            }
            Command::TogglePause => {
                let paused = self.game.toggle_pause();
                log::debug!("timer {}", if paused { "paused" } else { "resumed" });
                Ok(false)
            }
            Command::Restart(config) => {
                self.game.restart(config);
                self.game.start(&mut self.rng)?;
                self.match_id = Uuid::new_v4();
                self.recorded_moves = 0;
                self.finalized = false;
                self.advisory = None;
                log::info!(
                    "match {} started: {} mines, {}s per turn",
                    self.match_id,
                    config.mines(),
                    config.timer_secs()
                );
                Ok(true)
            }
            Command::Shutdown => Ok(false),
        }
    }

    /// Feed one clock second into the game. Returns `true` when the timer
    /// ran out and a forced move was played.
    pub fn on_tick(&mut self) -> anyhow::Result<bool> {
        match self.game.tick(&mut self.rng)? {
            Tick::Forced(res) => {
                log::info!("time ran out, forced move at ({}, {})", res.row, res.col);
                log_resolution(&res);
                self.after_player_move()?;
                Ok(true)
            }
            Tick::Counting(_) | Tick::Idle => Ok(false),
        }
    }

    fn after_player_move(&mut self) -> anyhow::Result<()> {
        if self.game.phase() == Phase::AiTurn {
            let res = self
                .game
                .play_ai_turn(self.opponent.as_mut(), &mut self.rng)?;
            log_resolution(&res);
        }
        self.dispatch();
        Ok(())
    }

    /// Queue every move not yet handed to the collaborators, and the
    /// summary once the game is over.
    fn dispatch(&mut self) {
        let moves = &self.game.state().moves[self.recorded_moves..];
        for (i, mv) in moves.iter().enumerate() {
            let record = MoveRecord::new(mv, self.recorded_moves + i + 1);
            self.send(Outbound::Move {
                match_id: self.match_id,
                record,
            });
        }
        self.recorded_moves += moves.len();

        if self.game.is_over() && !self.finalized {
            self.finalized = true;
            self.finalize();
        }
    }

    fn finalize(&self) {
        let summary = GameSummary::from_game(&self.game);
        log::info!(
            "match {} over: winner {}, player {} / AI {}, {} moves{}",
            self.match_id,
            summary.winner.as_deref().unwrap_or("none"),
            summary.player_score,
            summary.ai_score,
            summary.total_moves,
            if summary.ended_by_mine { " (mine)" } else { "" }
        );
        let notice = match (&self.recipient, self.game.winner()) {
            (Some(recipient), Some(Side::Player)) => Some(VictoryNotice {
                recipient: recipient.clone(),
                winner_score: summary.winner_score,
                total_moves: summary.total_moves,
            }),
            _ => None,
        };
        self.send(Outbound::Finished {
            match_id: self.match_id,
            summary,
            notice,
        });
    }

    fn send(&self, msg: Outbound) {
        if self.outbox.send(msg).is_err() {
            log::warn!("collaborator task is gone; dropping record for match {}", self.match_id);
        }
    }

    fn apply_advisory(&mut self, advisory: Advisory) {
        if advisory.match_id == self.match_id {
            self.advisory = Some(advisory.text);
        }
    }

    /// Wait until the collaborators have handled everything queued so far,
    /// then pick up their advisories.
    pub async fn flush(&mut self) {
        let (done, acked) = oneshot::channel();
        if self.outbox.send(Outbound::Flush(done)).is_ok() {
            let _ = acked.await;
        }
        while let Ok(advisory) = self.advisories.try_recv() {
            self.apply_advisory(advisory);
        }
    }

    /// Run the controller on the current tokio runtime.
    pub fn spawn(self) -> ControllerHandle {
        let (commands, rx) = mpsc::channel(32);
        let (tx, snapshots) = watch::channel(self.snapshot());
        let task = tokio::spawn(self.run(rx, tx));
        ControllerHandle {
            commands,
            snapshots,
            task,
        }
    }

    /// Serve commands and clock ticks until shut down. Commands are polled
    /// first, so a move that lands in the same instant as the timer expiry
    /// wins and the clock restarts. On shutdown the collaborators are given
    /// the chance to finish what is queued.
    pub async fn run(
        mut self,
        mut commands: mpsc::Receiver<Command>,
        snapshots: watch::Sender<Snapshot>,
    ) -> anyhow::Result<()> {
        let mut clock = interval_at(Instant::now() + CLOCK_PERIOD, CLOCK_PERIOD);
        clock.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            let moved = tokio::select! {
                biased;
                cmd = commands.recv() => match cmd {
                    None | Some(Command::Shutdown) => break,
                    Some(cmd) => self.handle_command(cmd)?,
                },
                Some(advisory) = self.advisories.recv() => {
                    self.apply_advisory(advisory);
                    false
                }
                _ = clock.tick() => self.on_tick()?,
            };
            if moved {
                clock.reset();
            }
            snapshots.send_replace(self.snapshot());
        }

        self.flush().await;
        snapshots.send_replace(self.snapshot());
        let Self { outbox, worker, .. } = self;
        drop(outbox);
        if let Err(e) = worker.await {
            log::warn!("collaborator task failed: {}", e);
        }
        log::debug!("controller stopped");
        Ok(())
    }
}

fn log_resolution(res: &Resolution) {
    log::debug!(
        "{} fired at ({}, {}): {:?}",
        res.by.label(),
        res.row,
        res.col,
        res.outcome
    );
    if let Some(name) = res.sunk {
        log::info!("{} sank the {}", res.by.label(), name);
    }
}

/// Command and snapshot endpoints of a spawned controller.
pub struct ControllerHandle {
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<Snapshot>,
    task: JoinHandle<anyhow::Result<()>>,
}

impl ControllerHandle {
    pub async fn send(&self, cmd: Command) -> anyhow::Result<()> {
        self.commands
            .send(cmd)
            .await
            .map_err(|_| anyhow::anyhow!("controller has stopped"))
    }

    pub async fn submit_move(&self, row: usize, col: usize) -> anyhow::Result<()> {
        self.send(Command::Submit { row, col }).await
    }

    pub async fn pause(&self) -> anyhow::Result<()> {
        self.send(Command::Pause).await
    }

    pub async fn resume(&self) -> anyhow::Result<()> {
        self.send(Command::Resume).await
    }

    pub async fn toggle_pause(&self) -> anyhow::Result<()> {
        self.send(Command::TogglePause).await
    }

    pub async fn restart(&self, config: GameConfig) -> anyhow::Result<()> {
        self.send(Command::Restart(config)).await
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    /// A receiver that is notified on every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.clone()
    }

    /// Stop the controller and wait for it to finish.
    pub async fn shutdown(self) -> anyhow::Result<()> {
        let _ = self.commands.send(Command::Shutdown).await;
        self.task
            .await
            .map_err(|e| anyhow::anyhow!("controller task failed: {}", e))?
    }
}
