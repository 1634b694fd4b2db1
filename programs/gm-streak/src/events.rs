use anchor_lang::prelude::*;

// ══════════════════════════════════════════════════════════════════════════════
// CHECK-IN EVENTS
// ══════════════════════════════════════════════════════════════════════════════

/// Emitted for every accepted GM, before any streak notification
#[event]
#[derive(Debug, Clone, PartialEq)]
pub struct GmSent {
    pub sender: Pubkey,
    /// Pubkey::default() for a broadcast GM
    pub recipient: Pubkey,
    pub message: String,
    pub timestamp: i64,
}

/// Emitted after the sender's streak is recomputed
#[event]
#[derive(Debug, Clone, PartialEq)]
pub struct StreakUpdated {
    pub user: Pubkey,
    pub new_streak: u64,
}

/// Emitted when the current streak surpasses the user's previous best
#[event]
#[derive(Debug, Clone, PartialEq)]
pub struct NewLongestStreak {
    pub user: Pubkey,
    pub longest_streak: u64,
}

/// Emitted for every accepted GM; `new_rank` is `None` when the sender holds no slot
#[event]
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardUpdated {
    pub user: Pubkey,
    pub new_rank: Option<u16>,
}

// ══════════════════════════════════════════════════════════════════════════════
// ADMIN EVENTS
// ══════════════════════════════════════════════════════════════════════════════

#[event]
pub struct GmInitialized {
    pub admin: Pubkey,
    pub fee_recipient: Pubkey,
    pub fee: u64,
    pub time_limit: i64,
    pub leaderboard_capacity: u16,
    pub timestamp: i64,
}

#[event]
pub struct ParametersUpdated {
    pub fee: u64,
    pub time_limit: i64,
    pub streak_gap_days: i64,
    pub timestamp: i64,
}

#[event]
pub struct FeeRecipientUpdated {
    pub old_recipient: Pubkey,
    pub new_recipient: Pubkey,
    pub timestamp: i64,
}

/// Emitted on pause / resume
#[event]
pub struct StatusChanged {
    pub paused: bool,
    pub admin: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct AdminTransferProposed {
    pub current_admin: Pubkey,
    pub proposed_admin: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct AdminTransferCancelled {
    pub admin: Pubkey,
    pub cancelled_admin: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct AdminTransferred {
    pub old_admin: Pubkey,
    pub new_admin: Pubkey,
    pub timestamp: i64,
}
