use anchor_lang::prelude::*;
use crate::constants::*;
use crate::errors::ErrorCode;
use crate::state::*;

// ACCOUNTS - Instruction account validation structs

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(init, payer = admin, space = 8 + GmState::LEN, seeds = [GM_STATE_SEED], bump)]
    pub gm_state: Account<'info, GmState>,
    #[account(
        init,
        payer = admin,
        space = 8 + Leaderboard::space(LEADERBOARD_CAPACITY),
        seeds = [LEADERBOARD_SEED],
        bump
    )]
    pub leaderboard: Box<Account<'info, Leaderboard>>,
    /// CHECK: Any account may receive fees
    pub fee_recipient: UncheckedAccount<'info>,
    #[account(mut)]
    pub admin: Signer<'info>,
    pub system_program: Program<'info, System>,
}

/// SendGm - Shared by broadcast and directed GMs
///
/// - gm_state: writable on every GM, which serializes all check-ins
/// - user_record: created on the sender's first GM
/// - fee_recipient: must match the configured recipient
#[derive(Accounts)]
pub struct SendGm<'info> {
    #[account(
        mut,
        seeds = [GM_STATE_SEED],
        bump = gm_state.bump,
        constraint = !gm_state.is_paused() @ ErrorCode::Paused
    )]
    pub gm_state: Account<'info, GmState>,
    #[account(mut, seeds = [LEADERBOARD_SEED], bump = leaderboard.bump)]
    pub leaderboard: Box<Account<'info, Leaderboard>>,
    #[account(
        init_if_needed,
        payer = sender,
        space = 8 + UserRecord::LEN,
        seeds = [USER_RECORD_SEED, sender.key().as_ref()],
        bump
    )]
    pub user_record: Account<'info, UserRecord>,
    /// CHECK: Validated against gm_state.fee_recipient
    #[account(mut, address = gm_state.fee_recipient @ ErrorCode::InvalidFeeRecipient)]
    pub fee_recipient: UncheckedAccount<'info>,
    #[account(mut)]
    pub sender: Signer<'info>,
    pub system_program: Program<'info, System>,
}

/// GetUserStats - user_record is omitted for a user who never sent a GM
#[derive(Accounts)]
#[instruction(user: Pubkey)]
pub struct GetUserStats<'info> {
    #[account(seeds = [USER_RECORD_SEED, user.as_ref()], bump)]
    pub user_record: Option<Account<'info, UserRecord>>,
}

#[derive(Accounts)]
pub struct ReadLeaderboard<'info> {
    #[account(seeds = [LEADERBOARD_SEED], bump = leaderboard.bump)]
    pub leaderboard: Box<Account<'info, Leaderboard>>,
}

#[derive(Accounts)]
pub struct AdminControl<'info> {
    #[account(mut, seeds = [GM_STATE_SEED], bump = gm_state.bump, constraint = admin.key() == gm_state.admin @ ErrorCode::UnauthorizedAccess)]
    pub gm_state: Account<'info, GmState>,
    pub admin: Signer<'info>,
}

#[derive(Accounts)]
pub struct SetFeeRecipient<'info> {
    #[account(mut, seeds = [GM_STATE_SEED], bump = gm_state.bump, constraint = admin.key() == gm_state.admin @ ErrorCode::UnauthorizedAccess)]
    pub gm_state: Account<'info, GmState>,
    pub admin: Signer<'info>,
    /// CHECK: Any account may receive fees
    pub new_fee_recipient: UncheckedAccount<'info>,
}

/// ProposeAdminTransfer - Current admin proposes a new admin (two-step transfer)
#[derive(Accounts)]
pub struct ProposeAdminTransfer<'info> {
    #[account(mut, seeds = [GM_STATE_SEED], bump = gm_state.bump, constraint = admin.key() == gm_state.admin @ ErrorCode::UnauthorizedAccess)]
    pub gm_state: Account<'info, GmState>,
    pub admin: Signer<'info>,
    /// CHECK: Proposed new admin (will need to accept)
    pub new_admin: UncheckedAccount<'info>,
}

/// CancelAdminTransfer - Current admin cancels a pending transfer
#[derive(Accounts)]
pub struct CancelAdminTransfer<'info> {
    #[account(
        mut,
        seeds = [GM_STATE_SEED],
        bump = gm_state.bump,
        constraint = admin.key() == gm_state.admin @ ErrorCode::UnauthorizedAccess,
        constraint = gm_state.pending_admin.is_some() @ ErrorCode::NoPendingAdminTransfer
    )]
    pub gm_state: Account<'info, GmState>,
    pub admin: Signer<'info>,
}

/// AcceptAdminTransfer - Proposed admin accepts the transfer (two-step transfer)
#[derive(Accounts)]
pub struct AcceptAdminTransfer<'info> {
    #[account(
        mut,
        seeds = [GM_STATE_SEED],
        bump = gm_state.bump,
        constraint = gm_state.pending_admin.is_some() @ ErrorCode::NoPendingAdminTransfer,
        constraint = gm_state.pending_admin == Some(new_admin.key()) @ ErrorCode::UnauthorizedAccess
    )]
    pub gm_state: Account<'info, GmState>,
    /// The proposed admin who is accepting the transfer
    pub new_admin: Signer<'info>,
}
