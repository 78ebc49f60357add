//! Question generation.
//!
//! A question is one multiplication with operands in 1..=10. Which operands
//! are eligible depends on the selection mode: a fixed table, a custom set
//! of chosen numbers, or the table pool of a difficulty tier. The random
//! source is injected so generation is deterministic under a seeded RNG.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Difficulty tiers. The three fixed tiers map to disjoint table pools;
/// `Adaptive` starts from the Beginner pool and lets the session promote or
/// demote its effective tier as answers come in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTier {
    Beginner,
    Intermediate,
    Advanced,
    Adaptive,
}

const BEGINNER_TABLES: &[u8] = &[1, 2, 5, 10];
const INTERMEDIATE_TABLES: &[u8] = &[3, 4, 6, 7, 8, 9];
const ADVANCED_TABLES: &[u8] = &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

impl DifficultyTier {
    /// Tables eligible as the first operand for this tier.
    /// Adaptive resolves to the Beginner pool; the session swaps in a
    /// concrete tier once the tracker has enough signal.
    pub fn table_pool(self) -> &'static [u8] {
        match self {
            DifficultyTier::Beginner | DifficultyTier::Adaptive => BEGINNER_TABLES,
            DifficultyTier::Intermediate => INTERMEDIATE_TABLES,
            DifficultyTier::Advanced => ADVANCED_TABLES,
        }
    }

    /// Next tier up, if any.
    pub fn promoted(self) -> Option<Self> {
        match self {
            DifficultyTier::Beginner => Some(DifficultyTier::Intermediate),
            DifficultyTier::Intermediate => Some(DifficultyTier::Advanced),
            _ => None,
        }
    }

    /// Next tier down, if any.
    pub fn demoted(self) -> Option<Self> {
        match self {
            DifficultyTier::Advanced => Some(DifficultyTier::Intermediate),
            DifficultyTier::Intermediate => Some(DifficultyTier::Beginner),
            _ => None,
        }
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DifficultyTier::Beginner => "beginner",
            DifficultyTier::Intermediate => "intermediate",
            DifficultyTier::Advanced => "advanced",
            DifficultyTier::Adaptive => "adaptive",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for DifficultyTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(DifficultyTier::Beginner),
            "intermediate" => Ok(DifficultyTier::Intermediate),
            "advanced" => Ok(DifficultyTier::Advanced),
            "adaptive" => Ok(DifficultyTier::Adaptive),
            other => Err(format!(
                "unknown difficulty '{other}' (expected beginner, intermediate, advanced or adaptive)"
            )),
        }
    }
}

/// One multiplication question, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub operand_a: u8,
    pub operand_b: u8,
    pub product: u16,
}

impl Question {
    /// Generate a question for the given selection mode.
    ///
    /// Modes, in priority order:
    /// - `chosen` with at least 2 numbers: draw two positions from the set,
    ///   redrawing the second until distinct when the set has more than 2;
    /// - `table`: that table times a random 1..=10;
    /// - otherwise: a random table from the tier's pool times a random 1..=10.
    ///
    /// The operands are swapped with probability 0.5 for display variety.
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        table: Option<u8>,
        tier: DifficultyTier,
        chosen: Option<&[u8]>,
    ) -> Self {
        let (mut a, mut b) = match chosen {
            Some(set) if set.len() >= 2 => {
                let first = rng.gen_range(0..set.len());
                let mut second = rng.gen_range(0..set.len());
                if set.len() > 2 {
                    while second == first {
                        second = rng.gen_range(0..set.len());
                    }
                }
                (set[first], set[second])
            }
            _ => match table {
                Some(t) => (t, rng.gen_range(1..=10)),
                None => {
                    let pool = tier.table_pool();
                    (pool[rng.gen_range(0..pool.len())], rng.gen_range(1..=10))
                }
            },
        };

        if rng.gen_bool(0.5) {
            std::mem::swap(&mut a, &mut b);
        }

        Question {
            operand_a: a,
            operand_b: b,
            product: a as u16 * b as u16,
        }
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} × {} = ?", self.operand_a, self.operand_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn tier_pools_are_fixed() {
        assert_eq!(DifficultyTier::Beginner.table_pool(), &[1, 2, 5, 10]);
        assert_eq!(
            DifficultyTier::Intermediate.table_pool(),
            &[3, 4, 6, 7, 8, 9]
        );
        assert_eq!(DifficultyTier::Advanced.table_pool().len(), 10);
        assert_eq!(
            DifficultyTier::Adaptive.table_pool(),
            DifficultyTier::Beginner.table_pool()
        );
    }

    #[test]
    fn promotion_ladder() {
        assert_eq!(
            DifficultyTier::Beginner.promoted(),
            Some(DifficultyTier::Intermediate)
        );
        assert_eq!(
            DifficultyTier::Intermediate.promoted(),
            Some(DifficultyTier::Advanced)
        );
        assert_eq!(DifficultyTier::Advanced.promoted(), None);
        assert_eq!(DifficultyTier::Advanced.demoted(), Some(DifficultyTier::Intermediate));
        assert_eq!(DifficultyTier::Beginner.demoted(), None);
    }

    #[test]
    fn tier_round_trips_through_str() {
        for tier in [
            DifficultyTier::Beginner,
            DifficultyTier::Intermediate,
            DifficultyTier::Advanced,
            DifficultyTier::Adaptive,
        ] {
            assert_eq!(tier.to_string().parse::<DifficultyTier>(), Ok(tier));
        }
        assert!("expert".parse::<DifficultyTier>().is_err());
    }

    #[test]
    fn table_mode_always_includes_the_table() {
        let mut rng = Pcg64::seed_from_u64(7);
        for _ in 0..200 {
            let q = Question::generate(&mut rng, Some(7), DifficultyTier::Beginner, None);
            assert!(q.operand_a == 7 || q.operand_b == 7);
            assert_eq!(q.product, q.operand_a as u16 * q.operand_b as u16);
        }
    }

    #[test]
    fn tier_mode_draws_from_the_pool() {
        let mut rng = Pcg64::seed_from_u64(11);
        for _ in 0..200 {
            let q = Question::generate(&mut rng, None, DifficultyTier::Intermediate, None);
            let pool = DifficultyTier::Intermediate.table_pool();
            // One operand is the drawn table; the other is 1..=10 and may
            // have been swapped into either display slot.
            assert!(pool.contains(&q.operand_a) || pool.contains(&q.operand_b));
        }
    }

    #[test]
    fn chosen_mode_draws_both_operands_from_the_set() {
        let set = [2u8, 5, 9];
        let mut rng = Pcg64::seed_from_u64(3);
        for _ in 0..200 {
            let q = Question::generate(&mut rng, None, DifficultyTier::Beginner, Some(&set));
            assert!(set.contains(&q.operand_a));
            assert!(set.contains(&q.operand_b));
            // With more than 2 distinct numbers the positions must differ,
            // so the values differ too.
            assert_ne!(q.operand_a, q.operand_b);
        }
    }

    #[test]
    fn chosen_mode_with_two_numbers_allows_repeats() {
        let set = [4u8, 6];
        let mut rng = Pcg64::seed_from_u64(5);
        let mut saw_repeat = false;
        for _ in 0..500 {
            let q = Question::generate(&mut rng, None, DifficultyTier::Beginner, Some(&set));
            if q.operand_a == q.operand_b {
                saw_repeat = true;
            }
        }
        assert!(saw_repeat, "both positions may land on the same number");
    }

    proptest! {
        #[test]
        fn generated_questions_are_valid(seed in any::<u64>()) {
            let mut rng = Pcg64::seed_from_u64(seed);
            for tier in [
                DifficultyTier::Beginner,
                DifficultyTier::Intermediate,
                DifficultyTier::Advanced,
                DifficultyTier::Adaptive,
            ] {
                let q = Question::generate(&mut rng, None, tier, None);
                prop_assert!((1..=10).contains(&q.operand_a));
                prop_assert!((1..=10).contains(&q.operand_b));
                prop_assert_eq!(q.product, q.operand_a as u16 * q.operand_b as u16);
            }
        }
    }
}
