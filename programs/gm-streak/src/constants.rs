// ══════════════════════════════════════════════════════════════════════════════
// PDA SEEDS
// ══════════════════════════════════════════════════════════════════════════════

/// Global configuration: ["gm_state"]
pub const GM_STATE_SEED: &[u8] = b"gm_state";

/// Bounded leaderboard: ["leaderboard"]
pub const LEADERBOARD_SEED: &[u8] = b"leaderboard";

/// Per-user streak record: ["user_record", user_pubkey]
pub const USER_RECORD_SEED: &[u8] = b"user_record";

// ══════════════════════════════════════════════════════════════════════════════
// TIME
// ══════════════════════════════════════════════════════════════════════════════

pub const SECONDS_PER_DAY: i64 = 86_400;

/// Default cooldown between two accepted GMs from the same user (24h)
pub const DEFAULT_TIME_LIMIT: i64 = SECONDS_PER_DAY;

/// Default maximum whole-day gap that still continues a streak.
/// Elapsed time is truncated to whole days, so a gap of up to 47h59m59s counts as 1.
pub const DEFAULT_STREAK_GAP_DAYS: i64 = 1;

// ══════════════════════════════════════════════════════════════════════════════
// FEES
// ══════════════════════════════════════════════════════════════════════════════

/// Default GM fee: 0.001 SOL
pub const DEFAULT_FEE_LAMPORTS: u64 = 1_000_000;

// ══════════════════════════════════════════════════════════════════════════════
// LEADERBOARD
// ══════════════════════════════════════════════════════════════════════════════

/// Number of slots on the leaderboard
pub const LEADERBOARD_CAPACITY: u16 = 100;

// ══════════════════════════════════════════════════════════════════════════════
// LIMITS
// ══════════════════════════════════════════════════════════════════════════════

/// Max GM message length in bytes
pub const MAX_MESSAGE_LEN: usize = 280;

/// Runtime cap on instruction return data (solana_program::program::MAX_RETURN_DATA)
pub const MAX_RETURN_DATA: usize = 1024;
