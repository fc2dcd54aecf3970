//! Utilities for generating passwords.

use std::fmt;

use rand::{CryptoRng, Rng, RngCore};
use serde::Serialize;

use crate::charset::Category;
use crate::config::{GenerationPlan, PassphrasePlan, RandomPlan};
use crate::Secret;

/// Draw an integer uniformly from `0..range`.
///
/// Reads the fewest big-endian bytes that can represent `range` values and re-samples whenever
/// the value lands at or above the largest multiple of `range` those bytes can hold, so that the
/// final `% range` carries no bias towards small values.
///
/// Every attempt is rejected with probability below one half. There is deliberately no cap on
/// the number of attempts: cutting the loop short would have to return a biased value, and the
/// chance of needing more than a handful of attempts is negligible.
pub fn draw_uniform<R>(rng: &mut R, range: usize) -> usize
where
    R: Rng + CryptoRng + ?Sized,
{
    if range <= 1 {
        return 0;
    }
    let range = range as u128;
    let mut byte_count = 0;
    let mut capacity: u128 = 1;
    while capacity < range {
        capacity <<= 8;
        byte_count += 1;
    }
    let limit = capacity - capacity % range;

    let mut buf = [0u8; 8];
    loop {
        let window = &mut buf[..byte_count];
        RngCore::fill_bytes(rng, window);
        let value = window
            .iter()
            .fold(0u128, |acc, byte| (acc << 8) | u128::from(*byte));
        if value < limit {
            return (value % range) as usize;
        }
    }
}

/// Fisher–Yates shuffle, using `draw_uniform` for every swap.
pub fn shuffle<T, R>(rng: &mut R, items: &mut [T])
where
    R: Rng + CryptoRng + ?Sized,
{
    for i in (1..items.len()).rev() {
        let j = draw_uniform(rng, i + 1);
        items.swap(i, j);
    }
}

fn choose<T: Copy, R>(rng: &mut R, items: &[T]) -> T
where
    R: Rng + CryptoRng + ?Sized,
{
    items[draw_uniform(rng, items.len())]
}

/// Generate a random password following the plan's alphabet and minimums.
///
/// The required characters of each category are drawn first, the rest of the password is
/// filled from the whole alphabet, and the result is shuffled so that the required characters
/// don't sit at predictable positions.
pub fn generate_random_password<R>(rng: &mut R, plan: &RandomPlan) -> Secret
where
    R: Rng + CryptoRng + ?Sized,
{
    let mut chars = Vec::with_capacity(plan.length());
    let minimums = plan.minimums();
    for category in Category::ALL {
        let count = minimums.get(category);
        if count == 0 {
            continue;
        }
        let alphabet = category.alphabet(plan.exclude_similar());
        for _ in 0..count {
            chars.push(choose(rng, &alphabet));
        }
    }
    while chars.len() < plan.length() {
        chars.push(choose(rng, plan.alphabet()));
    }
    shuffle(rng, &mut chars);
    Secret(chars.into_iter().collect())
}

/// Generate a passphrase of independently drawn words.
pub fn generate_passphrase<R>(rng: &mut R, plan: &PassphrasePlan) -> Secret
where
    R: Rng + CryptoRng + ?Sized,
{
    let words = plan.words();
    let mut secret = String::new();
    for i in 0..plan.word_count() {
        if i > 0 {
            secret.push_str(plan.separator());
        }
        secret.push_str(words.word(draw_uniform(rng, words.len())));
    }
    Secret(secret)
}

/// Entropy in bits of `count` independent draws from `space` equally likely symbols, rounded
/// to two decimals.
///
/// For random passwords this is computed from the whole alphabet even when minimums constrain
/// the composition; consumers rely on these exact numbers.
pub fn entropy_bits(count: usize, space: usize) -> f64 {
    round2(count as f64 * (space as f64).log2())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Serialize)]
pub enum Strength {
    Weak,
    Medium,
    Strong,
    #[serde(rename = "Very Strong")]
    VeryStrong,
}

impl Strength {
    pub fn from_entropy(bits: f64) -> Strength {
        if bits < 40.0 {
            Strength::Weak
        } else if bits < 60.0 {
            Strength::Medium
        } else if bits < 80.0 {
            Strength::Strong
        } else {
            Strength::VeryStrong
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Strength::Weak => "Weak",
            Strength::Medium => "Medium",
            Strength::Strong => "Strong",
            Strength::VeryStrong => "Very Strong",
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A generated secret with its strength estimate.
#[derive(Clone, Debug, Serialize)]
pub struct GenerationResult {
    #[serde(rename = "password")]
    pub secret: Secret,
    pub entropy: f64,
    pub strength: Strength,
}

/// Generate a secret from a validated plan. This cannot fail.
pub fn generate<R>(rng: &mut R, plan: &GenerationPlan) -> GenerationResult
where
    R: Rng + CryptoRng + ?Sized,
{
    let (secret, entropy) = match plan {
        GenerationPlan::Random(plan) => (
            generate_random_password(rng, plan),
            entropy_bits(plan.length(), plan.alphabet().len()),
        ),
        GenerationPlan::Passphrase(plan) => (
            generate_passphrase(rng, plan),
            entropy_bits(plan.word_count(), plan.words().len()),
        ),
    };
    GenerationResult {
        secret,
        entropy,
        strength: Strength::from_entropy(entropy),
    }
}
