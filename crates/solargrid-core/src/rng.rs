//! Seeded pseudo-random sequence used to synthesize stable mock data.
//!
//! This is the Lehmer / Park–Miller "minimal standard" multiplicative
//! congruential generator: `state = state * 16807 mod (2^31 - 1)`. Every view
//! that needs a number which looks random but must stay the same across
//! renders (sector flags, house positions, production figures) constructs a
//! fresh [`SeededRandom`] from a stable id and reads draws in a fixed order.

/// Modulus `M = 2^31 - 1`, a Mersenne prime.
pub const MODULUS: u32 = 2_147_483_647;

/// Multiplier `A = 7^5`, a primitive root modulo [`MODULUS`].
pub const MULTIPLIER: u32 = 16_807;

const MODULUS_I64: i64 = 2_147_483_647;
const STATE_MAX: u32 = MODULUS - 1;

/// Deterministic sequence of `f64` values in `[0, 1)`.
///
/// Two instances built from the same seed produce identical sequences.
/// The sequence is infinite and cannot be rewound; build a new instance to
/// start over. `Clone` forks the register explicitly; the type is not `Copy`
/// so a generator is never duplicated by accident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRandom {
    state: u32,
}

impl SeededRandom {
    /// Create a generator from any integer seed.
    ///
    /// The seed is reduced modulo [`MODULUS`] (keeping the sign of the seed).
    /// Non-positive residues are shifted up by `MODULUS - 1`. The register is
    /// always in `[1, MODULUS - 1]`; zero is a fixed point of the recurrence
    /// and can never be reached.
    #[must_use]
    pub fn new(seed: i64) -> Self {
        Self {
            state: normalize_seed(seed),
        }
    }

    /// Current value of the internal register.
    #[must_use]
    pub const fn state(&self) -> u32 {
        self.state
    }

    /// Advance the register and return the next value in `[0, 1)`.
    pub fn draw(&mut self) -> f64 {
        let next = (u64::from(self.state) * u64::from(MULTIPLIER)) % u64::from(MODULUS);
        // next < MODULUS, so it always fits.
        self.state = u32::try_from(next).unwrap_or(STATE_MAX);
        f64::from(self.state - 1) / f64::from(STATE_MAX)
    }

    /// `floor(draw() * upper)`, a value in `[0, upper)`.
    ///
    /// Returns 0 (after still consuming a draw) when `upper` is 0, so the
    /// draw order seen by later readers does not depend on `upper`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn next_below(&mut self, upper: u32) -> u32 {
        let value = (self.draw() * f64::from(upper)).floor();
        if upper == 0 {
            return 0;
        }
        (value as u32).min(upper - 1)
    }

    /// `draw() * span + base`.
    #[allow(clippy::suboptimal_flops)]
    pub fn next_in(&mut self, base: f64, span: f64) -> f64 {
        // Unfused: a fused multiply-add rounds differently.
        self.draw() * span + base
    }

    /// `true` when the next draw is strictly greater than `threshold`.
    pub fn chance_above(&mut self, threshold: f64) -> bool {
        self.draw() > threshold
    }
}

impl Iterator for SeededRandom {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.draw())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

fn normalize_seed(seed: i64) -> u32 {
    let mut reduced = seed % MODULUS_I64;
    if reduced <= 0 {
        reduced += MODULUS_I64 - 1;
    }
    // Only a residue of -(MODULUS - 1) lands on zero after the shift.
    if reduced == 0 {
        reduced = MODULUS_I64 - 1;
    }
    u32::try_from(reduced).unwrap_or(STATE_MAX)
}
