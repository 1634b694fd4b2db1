use anchor_lang::prelude::*;

/// Per-user check-in record
///
/// Created on the user's first accepted GM, mutated on every later one,
/// never closed.
///
/// Invariants once `total_events > 0`:
/// - `longest_streak >= current_streak >= 1`
/// - `total_events >= current_streak`
///
/// PDA Seeds: ["user_record", user_pubkey]
#[account]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct UserRecord {
    /// The user's wallet address
    pub user: Pubkey,

    /// Timestamp of the most recent accepted GM
    pub last_event_time: i64,

    /// Lifetime count of accepted GMs
    pub total_events: u64,

    /// Consecutive qualifying GMs
    pub current_streak: u64,

    /// Best `current_streak` ever reached
    pub longest_streak: u64,

    /// PDA bump seed
    pub bump: u8,
}

impl UserRecord {
    /// Account size calculation:
    /// - user: 32 bytes (Pubkey)
    /// - last_event_time: 8 bytes (i64)
    /// - total_events: 8 bytes (u64)
    /// - current_streak: 8 bytes (u64)
    /// - longest_streak: 8 bytes (u64)
    /// - bump: 1 byte
    /// Total: 65 bytes
    pub const LEN: usize = 32 + 8 + 8 + 8 + 8 + 1;

    /// Zeroed record standing in for a user with no GM yet
    pub fn empty(user: Pubkey) -> Self {
        Self {
            user,
            ..Default::default()
        }
    }

    pub fn has_events(&self) -> bool {
        self.total_events > 0
    }
}
