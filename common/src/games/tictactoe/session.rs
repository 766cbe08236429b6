use std::time::Duration;

use tokio::sync::mpsc;

use super::bot_controller::{BotInput, calculate_move};
use super::game_state::GameSession;
use super::types::GameMode;
use crate::games::{GameBroadcaster, GameView, SessionRng};
use crate::log;
use crate::network::{DocumentStore, MoveSubmission, NetworkClient, NetworkError, SnapshotEvent};

/// Input from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    CellClick(usize),
    NewGame,
    ResetScores,
    SwitchMode(GameMode),
    CreateRoom(Option<String>),
    JoinRoom(String),
    LeaveRoom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingSettings {
    /// Pause before the bot answers a human move.
    pub reply_delay: Duration,
    /// Pause before the bot opens a game it plays X in.
    pub opening_delay: Duration,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            reply_delay: Duration::from_millis(250),
            opening_delay: Duration::from_millis(350),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScheduledEvent {
    BotMove { generation: u64 },
}

/// Owns one player's game, network seat and RNG. Driven by a single task.
pub struct GameController<S: DocumentStore, B: GameBroadcaster> {
    game: GameSession,
    network: NetworkClient<S>,
    rng: SessionRng,
    broadcaster: B,
    timing: TimingSettings,
    notice: Option<String>,
    timer_tx: mpsc::UnboundedSender<ScheduledEvent>,
    timer_rx: mpsc::UnboundedReceiver<ScheduledEvent>,
}

impl<S: DocumentStore, B: GameBroadcaster> GameController<S, B> {
    pub fn new(
        mode: GameMode,
        network: NetworkClient<S>,
        rng: SessionRng,
        broadcaster: B,
        timing: TimingSettings,
    ) -> Self {
        let (timer_tx, timer_rx) = mpsc::unbounded_channel();
        Self {
            game: GameSession::new(mode),
            network,
            rng,
            broadcaster,
            timing,
            notice: None,
            timer_tx,
            timer_rx,
        }
    }

    pub fn game(&self) -> &GameSession {
        &self.game
    }

    pub fn network(&self) -> &NetworkClient<S> {
        &self.network
    }

    /// Publishes the initial view and lets the bot open if it plays X.
    pub async fn start(&mut self) {
        self.schedule_bot_move(self.timing.opening_delay);
        self.broadcast().await;
    }

    /// Serves commands until the sender side closes, then gives up any room seat.
    pub async fn run(mut self, mut commands: mpsc::Receiver<ClientCommand>) {
        self.start().await;
        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => self.process_command(command).await,
                    None => break,
                },
                Some(event) = self.timer_rx.recv() => {
                    self.handle_scheduled(event);
                    self.broadcast().await;
                }
                snapshot = self.network.next_snapshot() => {
                    self.handle_snapshot(snapshot);
                    self.broadcast().await;
                }
            }
        }
        if self.network.leave_room().await {
            log!("Left room on shutdown");
        }
    }

    /// Handles one command and publishes the resulting view. Errors become the view's notice.
    pub async fn process_command(&mut self, command: ClientCommand) {
        if let Err(e) = self.handle_command(command).await {
            log!("Command failed: {}", e);
            self.notice = Some(e.to_string());
        }
        self.broadcast().await;
    }

    /// Waits for the next timer or room event, applies it and publishes the view.
    pub async fn process_next_event(&mut self) {
        tokio::select! {
            Some(event) = self.timer_rx.recv() => self.handle_scheduled(event),
            snapshot = self.network.next_snapshot() => self.handle_snapshot(snapshot),
        }
        self.broadcast().await;
    }

    pub async fn handle_command(&mut self, command: ClientCommand) -> Result<(), NetworkError> {
        match command {
            ClientCommand::CellClick(index) => self.cell_click(index).await,
            ClientCommand::NewGame => {
                self.game.new_game();
                self.schedule_bot_move(self.timing.opening_delay);
                Ok(())
            }
            ClientCommand::ResetScores => {
                self.game.reset_scores();
                self.schedule_bot_move(self.timing.opening_delay);
                Ok(())
            }
            ClientCommand::SwitchMode(mode) => {
                if self.network.is_connected() {
                    if mode.is_networked() {
                        // The board mirrors the room document while connected.
                        return Ok(());
                    }
                    self.network.leave_room().await;
                }
                self.game.switch_mode(mode);
                self.schedule_bot_move(self.timing.opening_delay);
                Ok(())
            }
            ClientCommand::CreateRoom(requested_id) => {
                let room_id = self.network.create_room(requested_id.as_deref(), &mut self.rng).await?;
                log!("Hosting room {}", room_id);
                self.game.switch_mode(GameMode::Networked);
                Ok(())
            }
            ClientCommand::JoinRoom(requested_id) => {
                let room_id = self.network.join_room(&requested_id).await?;
                log!("Playing in room {}", room_id);
                self.game.switch_mode(GameMode::Networked);
                Ok(())
            }
            ClientCommand::LeaveRoom => {
                if self.network.leave_room().await {
                    self.game.new_game();
                    self.schedule_bot_move(self.timing.opening_delay);
                }
                Ok(())
            }
        }
    }

    async fn cell_click(&mut self, index: usize) -> Result<(), NetworkError> {
        if self.game.is_decided() || !self.game.board().is_empty_cell(index) {
            return Ok(());
        }

        match self.game.mode() {
            GameMode::SinglePlayer { human, .. } => {
                if self.game.current() != human {
                    return Ok(());
                }
                match self.game.submit_move(index, human) {
                    Ok(_) => self.schedule_bot_move(self.timing.reply_delay),
                    Err(e) => log!("Ignored move at {}: {}", index, e),
                }
                Ok(())
            }
            GameMode::LocalTwoPlayer => {
                let mark = self.game.current();
                if let Err(e) = self.game.submit_move(index, mark) {
                    log!("Ignored move at {}: {}", index, e);
                }
                Ok(())
            }
            GameMode::Networked => match self.network.submit_move(index).await {
                Ok(MoveSubmission::Written { outcome }) => {
                    if let Some(headline) = outcome.headline() {
                        log!("Move at {} decided the game: {}", index, headline);
                    }
                    Ok(())
                }
                Ok(other) => {
                    log!("Move at {} not written: {:?}", index, other);
                    Ok(())
                }
                Err(e @ NetworkError::Store(_)) => Err(e),
                Err(e) => {
                    log!("Ignored move at {}: {}", index, e);
                    Ok(())
                }
            },
        }
    }

    fn schedule_bot_move(&self, delay: Duration) {
        if self.game.pending_bot_turn().is_none() {
            return;
        }
        let event = ScheduledEvent::BotMove {
            generation: self.game.generation(),
        };
        let sender = self.timer_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = sender.send(event);
        });
    }

    fn handle_scheduled(&mut self, event: ScheduledEvent) {
        match event {
            ScheduledEvent::BotMove { generation } => {
                if generation != self.game.generation() {
                    log!("Discarding bot move scheduled for game {}", generation);
                    return;
                }
                let Some((bot_mark, difficulty)) = self.game.pending_bot_turn() else {
                    return;
                };
                let input = BotInput {
                    board: *self.game.board(),
                    bot_mark,
                    difficulty,
                };
                let index = calculate_move(&input, &mut self.rng);
                match self.game.submit_move(index, bot_mark) {
                    Ok(_) => log!("Bot ({}, {}) played {}", bot_mark, difficulty, index),
                    Err(e) => log!("Bot move at {} rejected: {}", index, e),
                }
            }
        }
    }

    fn handle_snapshot(&mut self, snapshot: SnapshotEvent) {
        if let Some(effect) = self.network.apply_snapshot(snapshot, &mut self.game)
            && effect.scored
            && let Some(headline) = effect.outcome.headline()
        {
            log!("Room game finished: {}", headline);
        }
    }

    pub fn view(&self) -> GameView {
        let outcome = self.game.outcome();
        let session = self.network.session();

        let mode_label = match (self.game.mode(), session) {
            (GameMode::Networked, Some(session)) => format!("Mode: Online (You = {})", session.local_mark),
            (mode, _) => mode.label(),
        };
        let turn_label = match outcome.headline() {
            Some(headline) => headline,
            None if self.game.mode().is_networked() => session
                .map(|session| session.turn_label())
                .unwrap_or_else(|| "Connecting…".to_string()),
            None => format!("Turn: {}", self.game.current()),
        };

        GameView {
            board: *self.game.board(),
            current: self.game.current(),
            outcome,
            scores: self.game.scores(),
            mode_label,
            turn_label,
            connection_status: self.network.status().to_string(),
            notice: self.notice.clone(),
        }
    }

    async fn broadcast(&mut self) {
        let view = self.view();
        self.notice = None;
        self.broadcaster.broadcast_state(view).await;
    }
}
