// ============================================================================
// INVARIANT & PROPERTY-BASED TESTS
// ============================================================================
//
// Run with: cargo test --lib formal_verification
//
// Each property is checked over deterministic pseudo-random operation
// sequences so failures reproduce exactly.
//
// 1. Streak invariants (monotonicity, reset, record bounds)
// 2. Leaderboard invariants (order, index consistency, capacity, eviction)
// 3. Registry invariants (record/board agreement, fail-fast rejections)
// ============================================================================

#[cfg(test)]
mod formal_tests {
    use crate::constants::*;
    use crate::events::LeaderboardUpdated;
    use crate::registry::{CheckIn, Notification, Registry};
    use crate::state::*;
    use crate::streak::compute_streak;
    use anchor_lang::prelude::Pubkey;
    use core::cmp::Ordering;

    /// 64-bit LCG (Knuth MMIX constants)
    struct Lcg(u64);

    impl Lcg {
        fn next(&mut self) -> u64 {
            self.0 = self
                .0
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            self.0 >> 33
        }

        fn below(&mut self, bound: u64) -> u64 {
            self.next() % bound
        }
    }

    fn users(count: usize) -> Vec<Pubkey> {
        (0..count).map(|_| Pubkey::new_unique()).collect()
    }

    fn assert_record_invariants(record: &UserRecord) {
        if record.has_events() {
            assert!(record.current_streak >= 1);
        }
        assert!(record.longest_streak >= record.current_streak);
        assert!(record.total_events >= record.current_streak);
    }

    /// Sorted, bounded, and index resolves every entry to its position 1..=len
    fn assert_board_consistent(lb: &Leaderboard) {
        assert!(lb.len() <= lb.capacity as usize, "capacity exceeded");

        for pair in lb.entries().windows(2) {
            assert_ne!(
                compare_entries(&pair[0], &pair[1]),
                Ordering::Greater,
                "entries out of order: {:?} before {:?}",
                pair[0],
                pair[1]
            );
        }

        assert_eq!(lb.index.len(), Leaderboard::bucket_count(lb.capacity));
        let mut ranks: Vec<u16> = lb.index.iter().copied().filter(|&rank| rank != 0).collect();
        ranks.sort_unstable();
        let expected: Vec<u16> = (1..=lb.len() as u16).collect();
        assert_eq!(ranks, expected, "index must hold each rank exactly once");
        for (i, entry) in lb.entries().iter().enumerate() {
            assert_eq!(lb.position(&entry.user), Some((i + 1) as u16));
        }
    }

    // ========================================================================
    // 1. STREAK INVARIANTS
    // ========================================================================

    mod streak_invariants {
        use super::*;

        /// Gaps within the reset window add exactly one per GM
        #[test]
        fn prop_streak_monotonic_within_window() {
            let mut rng = Lcg(7);
            for _ in 0..50 {
                let mut record = UserRecord::empty(Pubkey::new_unique());
                let mut t = 1_600_000_000 + rng.below(1_000_000) as i64;
                for step in 1..=40u64 {
                    let update = compute_streak(&record, t, DEFAULT_STREAK_GAP_DAYS);
                    assert_eq!(update.record.current_streak, step);
                    assert_eq!(update.record.longest_streak, step);
                    record = update.record;
                    assert_record_invariants(&record);

                    // anything below two whole days keeps the streak alive
                    t += DEFAULT_TIME_LIMIT + rng.below((2 * SECONDS_PER_DAY - DEFAULT_TIME_LIMIT) as u64) as i64;
                }
            }
        }

        /// Longest streak tracks the running maximum under arbitrary gaps
        #[test]
        fn prop_longest_is_running_max() {
            let mut rng = Lcg(11);
            for _ in 0..50 {
                let mut record = UserRecord::empty(Pubkey::new_unique());
                let mut t = 0i64;
                let mut running_max = 0u64;
                for n in 1..=60u64 {
                    let before = record.longest_streak;
                    let update = compute_streak(&record, t, DEFAULT_STREAK_GAP_DAYS);
                    record = update.record;

                    running_max = running_max.max(record.current_streak);
                    assert_eq!(record.longest_streak, running_max);
                    assert_eq!(update.new_longest, n > 1 && record.longest_streak > before);
                    assert_eq!(record.total_events, n);
                    assert_record_invariants(&record);

                    t += DEFAULT_TIME_LIMIT + rng.below((4 * SECONDS_PER_DAY) as u64) as i64;
                }
            }
        }

        /// A gap of two or more whole days always resets to 1
        #[test]
        fn prop_reset_beyond_window() {
            let mut rng = Lcg(13);
            for _ in 0..200 {
                let prior = UserRecord {
                    user: Pubkey::new_unique(),
                    last_event_time: 1_000_000,
                    total_events: 10 + rng.below(100),
                    current_streak: 1 + rng.below(10),
                    longest_streak: 10,
                    bump: 0,
                };
                let gap = 2 * SECONDS_PER_DAY + rng.below(30 * SECONDS_PER_DAY as u64) as i64;
                let update = compute_streak(&prior, prior.last_event_time + gap, DEFAULT_STREAK_GAP_DAYS);

                assert_eq!(update.record.current_streak, 1);
                assert_eq!(update.record.longest_streak, prior.longest_streak);
                assert_eq!(update.record.total_events, prior.total_events + 1);
                assert!(!update.new_longest);
            }
        }
    }

    // ========================================================================
    // 2. LEADERBOARD INVARIANTS
    // ========================================================================

    mod leaderboard_invariants {
        use super::*;

        fn random_entry(rng: &mut Lcg, user: Pubkey) -> LeaderboardEntry {
            let current_streak = 1 + rng.below(12);
            LeaderboardEntry {
                user,
                current_streak,
                longest_streak: current_streak + rng.below(5),
                total_events: current_streak + rng.below(20),
            }
        }

        /// Order, index and capacity hold after every upsert
        #[test]
        fn prop_board_consistent_after_random_upserts() {
            for (seed, capacity) in [(1u64, 1u16), (2, 5), (3, 17), (4, LEADERBOARD_CAPACITY)] {
                let mut rng = Lcg(seed);
                let pool = users(capacity as usize * 3 + 2);
                let mut lb = Leaderboard::new(capacity, 255);

                for _ in 0..1_000 {
                    let user = pool[rng.below(pool.len() as u64) as usize];
                    let candidate = random_entry(&mut rng, user);
                    let rank = lb.upsert(candidate);

                    assert_board_consistent(&lb);
                    assert_eq!(rank, lb.position(&user));
                    if let Some(rank) = rank {
                        assert_eq!(lb.entries()[usize::from(rank) - 1], candidate);
                    }
                }
            }
        }

        /// Full board + absent user: either exactly the lowest entry is
        /// replaced, or nothing changes
        #[test]
        fn prop_eviction_correctness() {
            let mut rng = Lcg(21);
            let capacity = 8u16;
            let mut lb = Leaderboard::new(capacity, 255);
            for user in users(capacity as usize) {
                let e = random_entry(&mut rng, user);
                lb.upsert(e);
            }
            assert!(lb.is_full());

            for _ in 0..500 {
                let before = lb.entries().to_vec();
                let lowest = *lb.lowest().unwrap();
                let candidate = random_entry(&mut rng, Pubkey::new_unique());

                let rank = lb.upsert(candidate);
                let outranks = compare_entries(&candidate, &lowest) == Ordering::Less;

                if outranks {
                    assert!(rank.is_some());
                    assert_eq!(lb.position(&lowest.user), None);
                    for e in before.iter().filter(|e| e.user != lowest.user) {
                        assert!(lb.position(&e.user).is_some(), "non-lowest entry evicted");
                    }
                } else {
                    assert_eq!(rank, None);
                    assert_eq!(lb.entries(), &before[..]);
                }
                assert_eq!(lb.len(), capacity as usize);
                assert_board_consistent(&lb);
            }
        }

        /// Repeated queries without upserts agree
        #[test]
        fn prop_rank_stable_under_no_op() {
            let mut rng = Lcg(5);
            let pool = users(30);
            let mut lb = Leaderboard::new(20, 255);
            for _ in 0..200 {
                let user = pool[rng.below(pool.len() as u64) as usize];
                lb.upsert(random_entry(&mut rng, user));
            }

            let first: Vec<Option<u16>> = pool.iter().map(|u| lb.position(u)).collect();
            let second: Vec<Option<u16>> = pool.iter().map(|u| lb.position(u)).collect();
            assert_eq!(first, second);
        }
    }

    // ========================================================================
    // 3. REGISTRY INVARIANTS
    // ========================================================================

    mod registry_invariants {
        use super::*;

        /// Ranked users' board entries equal their latest records; rejected
        /// GMs change nothing
        #[test]
        fn prop_registry_matches_records() {
            let mut rng = Lcg(99);
            let pool = users(40);
            let mut records: Vec<UserRecord> = vec![UserRecord::default(); pool.len()];
            let mut state = GmState::new(
                Pubkey::new_unique(),
                Pubkey::new_unique(),
                DEFAULT_FEE_LAMPORTS,
                DEFAULT_TIME_LIMIT,
                0,
                255,
            );
            let mut lb = Leaderboard::new(10, 255);
            let mut clock = 1_700_000_000i64;
            let mut accepted = 0u64;

            for _ in 0..2_000 {
                clock += rng.below(6 * 3_600) as i64;
                let i = rng.below(pool.len() as u64) as usize;
                let check_in = CheckIn {
                    sender: pool[i],
                    recipient: None,
                    event_time: clock,
                    message: "gm",
                };

                let before_record = records[i].clone();
                let before_board = lb.entries().to_vec();

                let mut registry = Registry::new(&mut state, &mut lb, Vec::new());
                let result = registry.record_event(&mut records[i], &check_in);
                let notifications = registry.into_sink();

                match result {
                    Ok(receipt) => {
                        accepted += 1;
                        assert_eq!(receipt.new_streak, records[i].current_streak);
                        assert_eq!(receipt.rank, lb.position(&pool[i]));
                        assert!(notifications.len() == 3 || notifications.len() == 4);
                        assert_eq!(
                            notifications.last(),
                            Some(&Notification::Rank(LeaderboardUpdated {
                                user: pool[i],
                                new_rank: receipt.rank,
                            }))
                        );
                    }
                    Err(_) => {
                        assert_eq!(records[i], before_record);
                        assert_eq!(lb.entries(), &before_board[..]);
                        assert!(notifications.is_empty());
                    }
                }

                assert_record_invariants(&records[i]);
                assert_board_consistent(&lb);
                assert_eq!(state.total_gms, accepted);
            }

            for (user, record) in pool.iter().zip(&records) {
                if let Some(rank) = lb.position(user) {
                    assert_eq!(lb.entries()[usize::from(rank) - 1], LeaderboardEntry::from(record));
                }
            }
        }
    }
}
