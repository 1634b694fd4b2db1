use anchor_lang::prelude::*;

use crate::constants::MAX_MESSAGE_LEN;
use crate::errors::ErrorCode;
use crate::events::*;
use crate::state::{GmState, Leaderboard, LeaderboardEntry, UserRecord};
use crate::streak::compute_streak;

/// Notifications produced by one accepted GM, in emission order
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Gm(GmSent),
    Streak(StreakUpdated),
    LongestStreak(NewLongestStreak),
    Rank(LeaderboardUpdated),
}

/// Write-only destination for check-in notifications
pub trait EventSink {
    fn publish(&mut self, notification: Notification);
}

/// Forwards notifications to the program log as Anchor events
pub struct ProgramLogSink;

impl EventSink for ProgramLogSink {
    fn publish(&mut self, notification: Notification) {
        match notification {
            Notification::Gm(event) => emit!(event),
            Notification::Streak(event) => emit!(event),
            Notification::LongestStreak(event) => emit!(event),
            Notification::Rank(event) => emit!(event),
        }
    }
}

impl EventSink for Vec<Notification> {
    fn publish(&mut self, notification: Notification) {
        self.push(notification);
    }
}

/// One incoming GM
#[derive(Debug, Clone)]
pub struct CheckIn<'a> {
    pub sender: Pubkey,
    /// `None` for a broadcast GM
    pub recipient: Option<Pubkey>,
    pub event_time: i64,
    pub message: &'a str,
}

/// Outcome of an accepted GM
#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Receipt {
    pub new_streak: u64,
    pub longest_streak: u64,
    /// `None` when the sender holds no leaderboard slot
    pub rank: Option<u16>,
}

/// Admission rules owned by the core: recipient, message size, cooldown.
///
/// The cooldown is measured from the sender's last accepted GM and passes
/// once `time_limit` seconds have elapsed. A sender's first GM always passes.
pub fn check_admission(state: &GmState, record: &UserRecord, check_in: &CheckIn) -> Result<()> {
    if let Some(recipient) = check_in.recipient {
        require!(recipient != Pubkey::default(), ErrorCode::InvalidRecipient);
    }

    require!(
        check_in.message.len() <= MAX_MESSAGE_LEN,
        ErrorCode::MessageTooLong
    );

    if record.has_events() {
        let elapsed = check_in.event_time.saturating_sub(record.last_event_time);
        require!(elapsed >= state.time_limit, ErrorCode::CooldownActive);
    }

    Ok(())
}

/// Composes the streak engine and the leaderboard over the program state.
///
/// Every check runs before the first write, so a rejected GM leaves the
/// record, the leaderboard and the global counters untouched.
pub struct Registry<'a, S: EventSink> {
    state: &'a mut GmState,
    leaderboard: &'a mut Leaderboard,
    sink: S,
}

impl<'a, S: EventSink> Registry<'a, S> {
    pub fn new(state: &'a mut GmState, leaderboard: &'a mut Leaderboard, sink: S) -> Self {
        Self {
            state,
            leaderboard,
            sink,
        }
    }

    pub fn check_admission(&self, record: &UserRecord, check_in: &CheckIn) -> Result<()> {
        check_admission(&*self.state, record, check_in)
    }

    /// Apply one GM from `check_in.sender` to its `record`.
    ///
    /// `record` may be freshly allocated (default user key); it is claimed
    /// for the sender here.
    pub fn record_event(&mut self, record: &mut UserRecord, check_in: &CheckIn) -> Result<Receipt> {
        let owner = if record.user == Pubkey::default() {
            check_in.sender
        } else {
            record.user
        };
        require_keys_eq!(owner, check_in.sender, ErrorCode::UnauthorizedAccess);
        self.check_admission(record, check_in)?;

        let mut prior = record.clone();
        prior.user = owner;
        let update = compute_streak(&prior, check_in.event_time, self.state.streak_gap_days);

        let bump = record.bump;
        *record = update.record;
        record.bump = bump;

        self.state.total_gms = self.state.total_gms.saturating_add(1);

        let rank = self.leaderboard.upsert(LeaderboardEntry::from(&*record));

        #[cfg(feature = "verbose")]
        msg!(
            "GM: sender={} streak={} longest={} total={} rank={:?}",
            record.user,
            record.current_streak,
            record.longest_streak,
            record.total_events,
            rank
        );

        self.sink.publish(Notification::Gm(GmSent {
            sender: check_in.sender,
            recipient: check_in.recipient.unwrap_or_default(),
            message: check_in.message.to_owned(),
            timestamp: check_in.event_time,
        }));
        self.sink.publish(Notification::Streak(StreakUpdated {
            user: record.user,
            new_streak: record.current_streak,
        }));
        if update.new_longest {
            self.sink.publish(Notification::LongestStreak(NewLongestStreak {
                user: record.user,
                longest_streak: record.longest_streak,
            }));
        }
        self.sink.publish(Notification::Rank(LeaderboardUpdated {
            user: record.user,
            new_rank: rank,
        }));

        Ok(Receipt {
            new_streak: record.current_streak,
            longest_streak: record.longest_streak,
            rank,
        })
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
