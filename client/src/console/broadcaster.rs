use std::sync::Arc;

use common::games::{GameBroadcaster, GameView};
use ringbuffer::{AllocRingBuffer, RingBuffer};
use tokio::sync::Mutex;

use super::render::render_view;

pub const NOTICE_BUFFER_SIZE: usize = 5;

/// Prints every view of one seat to stdout, followed by its recent notices.
#[derive(Clone)]
pub struct ConsoleBroadcaster {
    seat: String,
    notices: Arc<Mutex<AllocRingBuffer<String>>>,
}

impl ConsoleBroadcaster {
    pub fn new(seat: impl Into<String>) -> Self {
        Self {
            seat: seat.into(),
            notices: Arc::new(Mutex::new(AllocRingBuffer::new(NOTICE_BUFFER_SIZE))),
        }
    }

    async fn render(&self, view: &GameView) -> String {
        let mut notices = self.notices.lock().await;
        if let Some(notice) = &view.notice {
            notices.enqueue(notice.clone());
        }

        let mut text = render_view(&self.seat, view);
        if let Some(notice) = &view.notice {
            text.push_str(&format!("\n! {}", notice));
        } else if !notices.is_empty() {
            let recent: Vec<String> = notices.iter().cloned().collect();
            text.push_str(&format!("\nRecent notices: {}", recent.join(" | ")));
        }
        text
    }
}

impl GameBroadcaster for ConsoleBroadcaster {
    async fn broadcast_state(&self, view: GameView) {
        let text = self.render(&view).await;
        println!("{}\n", text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::games::tictactoe::{Board, Mark, Outcome, Scoreboard};

    fn view(notice: Option<&str>) -> GameView {
        GameView {
            board: Board::new(),
            current: Mark::X,
            outcome: Outcome::Undecided,
            scores: Scoreboard::default(),
            mode_label: "Mode: Online".to_string(),
            turn_label: "Connecting…".to_string(),
            connection_status: "Not connected.".to_string(),
            notice: notice.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_notice_is_shown_then_kept_as_recent() {
        let broadcaster = ConsoleBroadcaster::new("Seat 1");

        let first = broadcaster.render(&view(Some("Room not found."))).await;
        assert!(first.ends_with("! Room not found."));

        let second = broadcaster.render(&view(None)).await;
        assert!(second.ends_with("Recent notices: Room not found."));
    }

    #[tokio::test]
    async fn test_only_latest_notices_are_kept() {
        let broadcaster = ConsoleBroadcaster::new("Seat 1");
        for i in 0..(NOTICE_BUFFER_SIZE + 2) {
            broadcaster.render(&view(Some(&format!("notice {}", i)))).await;
        }

        let text = broadcaster.render(&view(None)).await;

        assert!(!text.contains("notice 0"));
        assert!(!text.contains("notice 1 "));
        assert!(text.contains(&format!("notice {}", NOTICE_BUFFER_SIZE + 1)));
    }
}
