use std::future::Future;

use tokio::sync::mpsc;

use super::tictactoe::{Board, Mark, Outcome, Scoreboard};

/// Everything the presentation layer needs to redraw after a state change.
#[derive(Debug, Clone, PartialEq)]
pub struct GameView {
    pub board: Board,
    pub current: Mark,
    pub outcome: Outcome,
    pub scores: Scoreboard,
    pub mode_label: String,
    pub turn_label: String,
    pub connection_status: String,
    pub notice: Option<String>,
}

pub trait GameBroadcaster: Send + Sync + Clone + 'static {
    fn broadcast_state(&self, view: GameView) -> impl Future<Output = ()> + Send;
}

/// Forwards every view into an unbounded channel; dropped receivers are ignored.
#[derive(Clone)]
pub struct ChannelBroadcaster {
    sender: mpsc::UnboundedSender<GameView>,
}

impl ChannelBroadcaster {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<GameView>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl GameBroadcaster for ChannelBroadcaster {
    async fn broadcast_state(&self, view: GameView) {
        let _ = self.sender.send(view);
    }
}
