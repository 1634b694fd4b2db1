use anchor_lang::prelude::*;
use anchor_lang::system_program;

pub mod constants;
pub mod contexts;
pub mod errors;
pub mod events;
pub mod registry;
pub mod state;
pub mod streak;

mod formal_verification;

pub use constants::*;
pub use contexts::*;
pub use errors::ErrorCode;
pub use events::*;
pub use state::*;

use registry::{CheckIn, ProgramLogSink, Receipt, Registry};

declare_id!("nMEcfsZdGdj3DofJ6Ec3StgTDYYev3R5xHmiGL2PG5F");

/// Shared body of `send_gm` / `send_gm_to`: gates, fee, then the registry.
#[inline(never)]
fn process_gm(ctx: Context<SendGm>, recipient: Option<Pubkey>, message: String) -> Result<Receipt> {
    let clock = Clock::get()?;
    let bump = ctx.bumps.user_record;
    let accounts = ctx.accounts;

    let check_in = CheckIn {
        sender: accounts.sender.key(),
        recipient,
        event_time: clock.unix_timestamp,
        message: &message,
    };

    // Reject before any lamports move
    registry::check_admission(&accounts.gm_state, &accounts.user_record, &check_in)?;

    let fee = accounts.gm_state.current_fee();
    if fee > 0 {
        system_program::transfer(
            CpiContext::new(
                accounts.system_program.to_account_info(),
                system_program::Transfer {
                    from: accounts.sender.to_account_info(),
                    to: accounts.fee_recipient.to_account_info(),
                },
            ),
            fee,
        )?;
    }

    accounts.user_record.bump = bump;

    let mut registry = Registry::new(&mut accounts.gm_state, &mut accounts.leaderboard, ProgramLogSink);
    registry.record_event(&mut accounts.user_record, &check_in)
}

#[program]
pub mod gm_streak {
    use super::*;

    pub fn initialize(ctx: Context<Initialize>, fee: u64, time_limit: i64) -> Result<()> {
        let clock = Clock::get()?;

        require!(
            GmState::timing_is_valid(time_limit, DEFAULT_STREAK_GAP_DAYS),
            ErrorCode::InvalidParameter
        );

        let state = &mut ctx.accounts.gm_state;
        state.set_inner(GmState::new(
            ctx.accounts.admin.key(),
            ctx.accounts.fee_recipient.key(),
            fee,
            time_limit,
            clock.unix_timestamp,
            ctx.bumps.gm_state,
        ));

        let leaderboard = &mut ctx.accounts.leaderboard;
        leaderboard.set_inner(Leaderboard::new(LEADERBOARD_CAPACITY, ctx.bumps.leaderboard));

        emit!(GmInitialized {
            admin: state.admin,
            fee_recipient: state.fee_recipient,
            fee,
            time_limit,
            leaderboard_capacity: LEADERBOARD_CAPACITY,
            timestamp: clock.unix_timestamp,
        });

        msg!("GM initialized: fee={} lamports, time_limit={}s", fee, time_limit);

        Ok(())
    }

    /// Broadcast GM
    pub fn send_gm(ctx: Context<SendGm>, message: String) -> Result<Receipt> {
        process_gm(ctx, None, message)
    }

    /// GM addressed to `recipient`; only the sender's streak moves
    pub fn send_gm_to(ctx: Context<SendGm>, recipient: Pubkey, message: String) -> Result<Receipt> {
        process_gm(ctx, Some(recipient), message)
    }

    // Views - results are returned through instruction return data

    pub fn get_user_stats(ctx: Context<GetUserStats>, user: Pubkey) -> Result<UserRecord> {
        Ok(ctx
            .accounts
            .user_record
            .as_ref()
            .map(|record| UserRecord::clone(record))
            .unwrap_or_else(|| UserRecord::empty(user)))
    }

    pub fn get_user_rank(ctx: Context<ReadLeaderboard>, user: Pubkey) -> Result<u16> {
        ctx.accounts.leaderboard.rank_of(&user)
    }

    /// First `n` entries. Return data holds at most `MAX_TOP_USERS_PER_CALL`;
    /// deeper reads go through `get_leaderboard_page` or the account itself.
    pub fn get_top_users(ctx: Context<ReadLeaderboard>, n: u16) -> Result<Vec<LeaderboardEntry>> {
        let entries = ctx.accounts.leaderboard.top_n(usize::from(n))?;
        require!(
            entries.len() <= MAX_TOP_USERS_PER_CALL,
            ErrorCode::ReturnDataTooLarge
        );
        Ok(entries.to_vec())
    }

    /// `n` entries starting at 0-based rank `offset`
    pub fn get_leaderboard_page(
        ctx: Context<ReadLeaderboard>,
        offset: u16,
        n: u16,
    ) -> Result<Vec<LeaderboardEntry>> {
        require!(
            usize::from(n) <= MAX_TOP_USERS_PER_CALL,
            ErrorCode::ReturnDataTooLarge
        );
        let entries = ctx
            .accounts
            .leaderboard
            .page(usize::from(offset), usize::from(n))?;
        Ok(entries.to_vec())
    }

    // Admin

    pub fn update_parameters(
        ctx: Context<AdminControl>,
        new_fee: Option<u64>,
        new_time_limit: Option<i64>,
        new_streak_gap_days: Option<i64>,
    ) -> Result<()> {
        let state = &mut ctx.accounts.gm_state;

        let time_limit = new_time_limit.unwrap_or(state.time_limit);
        let streak_gap_days = new_streak_gap_days.unwrap_or(state.streak_gap_days);
        require!(
            GmState::timing_is_valid(time_limit, streak_gap_days),
            ErrorCode::InvalidParameter
        );

        if let Some(v) = new_fee { state.fee = v; }
        state.time_limit = time_limit;
        state.streak_gap_days = streak_gap_days;

        emit!(ParametersUpdated {
            fee: state.fee,
            time_limit: state.time_limit,
            streak_gap_days: state.streak_gap_days,
            timestamp: Clock::get()?.unix_timestamp,
        });
        Ok(())
    }

    pub fn set_fee_recipient(ctx: Context<SetFeeRecipient>) -> Result<()> {
        let state = &mut ctx.accounts.gm_state;
        let old_recipient = state.fee_recipient;
        state.fee_recipient = ctx.accounts.new_fee_recipient.key();

        emit!(FeeRecipientUpdated {
            old_recipient,
            new_recipient: state.fee_recipient,
            timestamp: Clock::get()?.unix_timestamp,
        });
        Ok(())
    }

    pub fn pause(ctx: Context<AdminControl>) -> Result<()> {
        let state = &mut ctx.accounts.gm_state;
        state.paused = true;
        emit!(StatusChanged {
            paused: true,
            admin: ctx.accounts.admin.key(),
            timestamp: Clock::get()?.unix_timestamp,
        });
        msg!("GM paused");
        Ok(())
    }

    pub fn resume(ctx: Context<AdminControl>) -> Result<()> {
        let state = &mut ctx.accounts.gm_state;
        state.paused = false;
        emit!(StatusChanged {
            paused: false,
            admin: ctx.accounts.admin.key(),
            timestamp: Clock::get()?.unix_timestamp,
        });
        msg!("GM resumed");
        Ok(())
    }

    pub fn propose_admin_transfer(ctx: Context<ProposeAdminTransfer>) -> Result<()> {
        let state = &mut ctx.accounts.gm_state;
        let proposed_admin = ctx.accounts.new_admin.key();
        require!(proposed_admin != Pubkey::default(), ErrorCode::InvalidParameter);
        state.pending_admin = Some(proposed_admin);

        emit!(AdminTransferProposed {
            current_admin: state.admin,
            proposed_admin,
            timestamp: Clock::get()?.unix_timestamp,
        });
        Ok(())
    }

    pub fn cancel_admin_transfer(ctx: Context<CancelAdminTransfer>) -> Result<()> {
        let state = &mut ctx.accounts.gm_state;
        let cancelled_admin = state.pending_admin.take().unwrap_or_default();

        emit!(AdminTransferCancelled {
            admin: state.admin,
            cancelled_admin,
            timestamp: Clock::get()?.unix_timestamp,
        });
        Ok(())
    }

    pub fn accept_admin_transfer(ctx: Context<AcceptAdminTransfer>) -> Result<()> {
        let state = &mut ctx.accounts.gm_state;
        let old_admin = state.admin;
        state.admin = ctx.accounts.new_admin.key();
        state.pending_admin = None;

        emit!(AdminTransferred {
            old_admin,
            new_admin: state.admin,
            timestamp: Clock::get()?.unix_timestamp,
        });
        msg!("Admin transferred: {} -> {}", old_admin, state.admin);
        Ok(())
    }
}
