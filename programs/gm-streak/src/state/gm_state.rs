use anchor_lang::prelude::*;

use crate::constants::{DEFAULT_STREAK_GAP_DAYS, SECONDS_PER_DAY};

/// Global GM configuration and counters
///
/// Holds the fee gate, the pause gate, admin controls and the timing windows
/// used for admission and streak continuation.
/// Only one GmState account exists per program instance.
///
/// PDA Seeds: ["gm_state"]
#[account]
#[derive(Debug, Default)]
pub struct GmState {
    /// Current admin authority
    pub admin: Pubkey,

    /// Two-step admin transfer: proposed new admin
    pub pending_admin: Option<Pubkey>,

    /// Account receiving every GM fee
    pub fee_recipient: Pubkey,

    /// Exact fee charged per GM (lamports)
    pub fee: u64,

    /// Cooldown between two GMs from the same sender (seconds)
    pub time_limit: i64,

    /// Max whole days between GMs that still continues a streak
    pub streak_gap_days: i64,

    /// Pause flag - blocks all check-ins while set
    pub paused: bool,

    /// Accepted GMs across all users
    pub total_gms: u64,

    /// Timestamp when the program was initialized
    pub initialized_at: i64,

    /// PDA bump seed
    pub bump: u8,

    /// Reserved for future use
    pub _reserved: [u8; 32],
}

impl GmState {
    /// Account size calculation:
    /// - 2 Pubkeys: 32 * 2 = 64 bytes (admin, fee_recipient)
    /// - 1 Option<Pubkey>: 33 bytes (pending_admin)
    /// - 5 u64/i64: 8 * 5 = 40 bytes (fee, time_limit, streak_gap_days, total_gms, initialized_at)
    /// - 2 u8/bool: 2 bytes (paused, bump)
    /// - reserved: 32 bytes
    /// Total: 171 bytes
    pub const LEN: usize = 32 * 2 + 33 + 8 * 5 + 2 + 32;

    pub fn new(
        admin: Pubkey,
        fee_recipient: Pubkey,
        fee: u64,
        time_limit: i64,
        initialized_at: i64,
        bump: u8,
    ) -> Self {
        Self {
            admin,
            pending_admin: None,
            fee_recipient,
            fee,
            time_limit,
            streak_gap_days: DEFAULT_STREAK_GAP_DAYS,
            paused: false,
            total_gms: 0,
            initialized_at,
            bump,
            _reserved: [0; 32],
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn current_fee(&self) -> u64 {
        self.fee
    }

    /// Validate a timing configuration.
    ///
    /// The cooldown must be positive and strictly shorter than the streak-reset
    /// window, otherwise no streak could ever continue.
    pub fn timing_is_valid(time_limit: i64, streak_gap_days: i64) -> bool {
        if time_limit <= 0 || streak_gap_days < 0 {
            return false;
        }
        match streak_gap_days
            .checked_add(1)
            .and_then(|days| days.checked_mul(SECONDS_PER_DAY))
        {
            Some(reset_window) => time_limit < reset_window,
            None => false,
        }
    }
}
