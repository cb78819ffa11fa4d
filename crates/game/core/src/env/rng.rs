//! Dice source for deterministic randomness.
//!
//! The engine never owns a generator. It derives a seed for every die from
//! the game seed and the number of dice realized so far, asks the oracle for a
//! face, and records the face in the log. Replays read the face back instead
//! of asking again.

/// Deterministic random source: the same seed always yields the same value.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a die with N sides (1-N inclusive). A zero-sided die rolls 0.
    fn roll_die(&self, seed: u64, sides: u32) -> u32 {
        if sides == 0 {
            return 0;
        }
        (self.next_u32(seed) % sides) + 1
    }
}

/// PCG-XSH-RR generator: 64-bit LCG state, 32-bit permuted output.
///
/// Stateless: each call steps the LCG once from the supplied seed, so it can
/// be shared freely across the runtime.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::output(Self::step(seed))
    }
}

/// Mixes the seed for one random event.
///
/// * `game_seed` - fixed when the game is created
/// * `sequence` - how many dice the game has realized before this one
/// * `subject` - creature the roll is for
/// * `context` - distinguishes independent kinds of roll
pub fn compute_seed(game_seed: u64, sequence: u64, subject: u32, context: u32) -> u64 {
    // SplitMix64 / FxHash style combiners.
    let mut hash = game_seed;
    hash ^= sequence.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (subject as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_face() {
        let rng = PcgRng;
        let seed = compute_seed(7, 3, 1, 0);
        assert_eq!(rng.roll_die(seed, 20), rng.roll_die(seed, 20));
    }

    #[test]
    fn sequence_changes_the_seed() {
        assert_ne!(compute_seed(7, 3, 1, 0), compute_seed(7, 4, 1, 0));
    }

    #[test]
    fn faces_stay_in_range() {
        let rng = PcgRng;
        for sequence in 0..500 {
            let face = rng.roll_die(compute_seed(99, sequence, 2, 0), 6);
            assert!((1..=6).contains(&face));
        }
    }
}
