//! Encouragement messages shown after each answer.

use rand::Rng;

const SUCCESS_MESSAGES: &[&str] = &[
    "Excellent! 🎉",
    "Bravo! 🌟",
    "Perfect! 👏",
    "Super! 🎊",
    "Wonderful! ✨",
    "Brilliant! 🚀",
    "Keep it up! 💪",
    "You're a champion! 🏆",
];

const RETRY_MESSAGES: &[&str] = &[
    "Almost! Try again! 💡",
    "No worries, keep going! 🌈",
    "You'll get there! 💪",
    "One more little push! ⭐",
    "Don't give up! 🎯",
    "Check the hint! 🔍",
];

pub fn success_message<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    SUCCESS_MESSAGES[rng.gen_range(0..SUCCESS_MESSAGES.len())]
}

pub fn retry_message<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    RETRY_MESSAGES[rng.gen_range(0..RETRY_MESSAGES.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn messages_come_from_their_pools() {
        let mut rng = Pcg64::seed_from_u64(1);
        for _ in 0..50 {
            assert!(SUCCESS_MESSAGES.contains(&success_message(&mut rng)));
            assert!(RETRY_MESSAGES.contains(&retry_message(&mut rng)));
        }
    }
}
