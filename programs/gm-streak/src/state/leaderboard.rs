use anchor_lang::prelude::*;
use core::cmp::Ordering;

use crate::constants::MAX_RETURN_DATA;
use crate::errors::ErrorCode;
use crate::state::UserRecord;

/// Snapshot of a user's record taken at upsert time.
///
/// Later changes to the `UserRecord` do not move the entry until the next
/// upsert for that user.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub user: Pubkey,
    pub current_streak: u64,
    pub longest_streak: u64,
    pub total_events: u64,
}

impl LeaderboardEntry {
    /// Pubkey(32) + 3 * u64(8) = 56 bytes
    pub const LEN: usize = 32 + 8 * 3;
}

/// Largest `Vec<LeaderboardEntry>` that fits in instruction return data
/// (4 byte length prefix + entries)
pub const MAX_TOP_USERS_PER_CALL: usize = (MAX_RETURN_DATA - 4) / LeaderboardEntry::LEN;

impl From<&UserRecord> for LeaderboardEntry {
    fn from(record: &UserRecord) -> Self {
        Self {
            user: record.user,
            current_streak: record.current_streak,
            longest_streak: record.longest_streak,
            total_events: record.total_events,
        }
    }
}

/// Ranking order: higher `current_streak` first, then higher `total_events`.
///
/// `Ordering::Less` means `a` ranks above `b`. Entries equal on both keys
/// compare `Equal` and have no defined relative order.
pub fn compare_entries(a: &LeaderboardEntry, b: &LeaderboardEntry) -> Ordering {
    b.current_streak
        .cmp(&a.current_streak)
        .then_with(|| b.total_events.cmp(&a.total_events))
}

/// Bounded top-K leaderboard
///
/// `entries` is kept sorted by [`compare_entries`] and never grows past
/// `capacity`. `index` is an open-addressed table of `2 * capacity` buckets
/// mapping a user to its rank with linear probing. A bucket holds a 1-based
/// rank into `entries`, 0 marks it empty. The table is rebuilt from
/// `entries` after every mutation.
///
/// PDA Seeds: ["leaderboard"]
#[account]
#[derive(Debug, Default)]
pub struct Leaderboard {
    /// PDA bump seed
    pub bump: u8,

    /// Maximum number of slots
    pub capacity: u16,

    /// Ranked entries, best first
    pub entries: Vec<LeaderboardEntry>,

    /// user -> rank buckets
    pub index: Vec<u16>,
}

impl Leaderboard {
    /// Account size for a board of `capacity` slots (excluding discriminator):
    /// - bump: 1 byte
    /// - capacity: 2 bytes
    /// - entries: 4 byte length prefix + capacity * 56
    /// - index: 4 byte length prefix + 2 * capacity * 2
    pub fn space(capacity: u16) -> usize {
        let slots = capacity as usize;
        1 + 2 + 4 + slots * LeaderboardEntry::LEN + 4 + Self::bucket_count(capacity) * 2
    }

    /// Load factor stays at or below one half
    pub fn bucket_count(capacity: u16) -> usize {
        2 * capacity as usize
    }

    pub fn new(capacity: u16, bump: u8) -> Self {
        Self {
            bump,
            capacity,
            entries: Vec::with_capacity(capacity as usize),
            index: vec![0; Self::bucket_count(capacity)],
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity as usize
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// Lowest ranked entry, the eviction candidate when the board is full
    pub fn lowest(&self) -> Option<&LeaderboardEntry> {
        self.entries.last()
    }

    /// 1-based rank of `user`, or `None` when the user holds no slot
    pub fn position(&self, user: &Pubkey) -> Option<u16> {
        let buckets = self.index.len();
        if buckets == 0 {
            return None;
        }

        let mut bucket = home_bucket(user, buckets);
        for _ in 0..buckets {
            let rank = self.index[bucket];
            if rank == 0 {
                return None;
            }
            match self.entries.get(usize::from(rank) - 1) {
                Some(entry) if entry.user == *user => return Some(rank),
                _ => bucket = (bucket + 1) % buckets,
            }
        }
        None
    }

    pub fn rank_of(&self, user: &Pubkey) -> Result<u16> {
        self.position(user).ok_or_else(|| error!(ErrorCode::NotRanked))
    }

    /// First `n` entries in rank order
    pub fn top_n(&self, n: usize) -> Result<&[LeaderboardEntry]> {
        self.page(0, n)
    }

    /// `n` entries in rank order starting after the first `offset`
    pub fn page(&self, offset: usize, n: usize) -> Result<&[LeaderboardEntry]> {
        let end = offset.checked_add(n).ok_or_else(|| error!(ErrorCode::InvalidRange))?;
        require!(n > 0 && end <= self.entries.len(), ErrorCode::InvalidRange);
        Ok(&self.entries[offset..end])
    }

    /// Insert or update `entry` and return the user's rank afterwards.
    ///
    /// Returns `None` without touching the board when the board is full and
    /// `entry` does not strictly outrank the lowest entry.
    pub fn upsert(&mut self, entry: LeaderboardEntry) -> Option<u16> {
        if let Some(rank) = self.position(&entry.user) {
            self.entries[usize::from(rank) - 1] = entry;
        } else if !self.is_full() {
            self.entries.push(entry);
        } else {
            match self.entries.last_mut() {
                Some(lowest) if compare_entries(&entry, &*lowest) == Ordering::Less => {
                    #[cfg(feature = "verbose")]
                    msg!("Leaderboard: evicting {} for {}", lowest.user, entry.user);
                    *lowest = entry;
                }
                _ => return None,
            }
        }

        self.sort();
        self.position(&entry.user)
    }

    /// Full re-sort followed by a full index rebuild
    fn sort(&mut self) {
        self.entries.sort_by(compare_entries);

        let buckets = Self::bucket_count(self.capacity);
        self.index.clear();
        self.index.resize(buckets, 0);

        for (i, entry) in self.entries.iter().enumerate() {
            let mut bucket = home_bucket(&entry.user, buckets);
            while self.index[bucket] != 0 {
                bucket = (bucket + 1) % buckets;
            }
            self.index[bucket] = (i + 1) as u16;
        }
    }
}

/// Starting bucket for `user`: the key's four 8-byte words folded together
fn home_bucket(user: &Pubkey, buckets: usize) -> usize {
    let folded = user
        .to_bytes()
        .chunks_exact(8)
        .fold(0u64, |acc, word| {
            let mut bytes = [0u8; 8];
            bytes.copy_from_slice(word);
            acc ^ u64::from_le_bytes(bytes)
        });
    (folded % buckets as u64) as usize
}
