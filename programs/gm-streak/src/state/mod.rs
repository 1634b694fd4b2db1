pub mod gm_state;
pub mod leaderboard;
pub mod user_record;

pub use gm_state::*;
pub use leaderboard::*;
pub use user_record::*;
