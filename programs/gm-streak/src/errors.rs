use anchor_lang::prelude::*;

/// GM Streak Error Codes
///
/// Every failure is raised before any account is mutated.
#[error_code]
pub enum ErrorCode {
    // Leaderboard queries
    #[msg("Requested range is empty or exceeds the leaderboard length")]
    InvalidRange,

    #[msg("User does not hold a leaderboard slot")]
    NotRanked,

    // Admission
    #[msg("Cooldown active - wait before sending another GM")]
    CooldownActive,

    #[msg("Invalid recipient")]
    InvalidRecipient,

    #[msg("Message exceeds maximum length")]
    MessageTooLong,

    // Gates
    #[msg("Program paused")]
    Paused,

    #[msg("Unauthorized")]
    UnauthorizedAccess,

    #[msg("Fee recipient does not match configuration")]
    InvalidFeeRecipient,

    #[msg("Invalid parameter")]
    InvalidParameter,

    // Admin operations
    #[msg("No pending admin transfer")]
    NoPendingAdminTransfer,

    // Views
    #[msg("Requested page exceeds return data limit")]
    ReturnDataTooLarge,
}
