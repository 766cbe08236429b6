pub mod broadcaster;
pub mod session_rng;
pub mod tictactoe;

pub use broadcaster::{ChannelBroadcaster, GameBroadcaster, GameView};
pub use session_rng::SessionRng;
