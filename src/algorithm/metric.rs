//! Similarity metric between two edge descriptors
//!
//! Lower scores are better. The multiplicative mode multiplies per-channel
//! differences over the whole border; that product overflows any integer for
//! real tiles, so it is kept as exact prime exponents and reported as its
//! logarithm. Equal products share one factorization and therefore one score.

use crate::analysis::descriptors::EdgeDescriptor;
use crate::io::configuration::{ADDITIVE_BIG_EXPONENT, BIG_EXPONENT, THRESHOLD};
use crate::io::error::{AlgorithmError, invalid_parameter};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// How per-channel differences are combined into one score
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ComparisonMode {
    /// Product of differences, zero differences counted as one
    #[default]
    Multiplicative,
    /// Sum of differences, zero differences left out
    Additive,
}

impl FromStr for ComparisonMode {
    type Err = AlgorithmError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "multiplicative" | "mul" => Ok(Self::Multiplicative),
            "additive" | "add" => Ok(Self::Additive),
            _ => Err(invalid_parameter(
                "mode",
                &name,
                &"expected multiplicative or additive",
            )),
        }
    }
}

/// Difference score between two descriptors
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Score(f64);

impl Score {
    /// Wrap a raw score value
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Raw score value in the producing mode's units
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

/// Configured comparison between edge descriptors
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Metric {
    /// Combination rule
    pub mode: ComparisonMode,
    /// Largest per-channel difference a match may contain; `None` disables the check
    pub channel_tolerance: Option<u16>,
}

impl Default for Metric {
    fn default() -> Self {
        Self {
            mode: ComparisonMode::default(),
            channel_tolerance: Some(THRESHOLD),
        }
    }
}

impl Metric {
    /// Metric with an explicit mode and tolerance
    pub const fn new(mode: ComparisonMode, channel_tolerance: Option<u16>) -> Self {
        Self {
            mode,
            channel_tolerance,
        }
    }

    /// Sentinel above every achievable score, used as the "no match yet" baseline
    ///
    /// `THRESHOLD` raised to a high power, in log space for the multiplicative mode.
    pub fn big(&self) -> Score {
        let threshold = f64::from(THRESHOLD);
        match self.mode {
            ComparisonMode::Multiplicative => Score(f64::from(BIG_EXPONENT) * threshold.ln()),
            ComparisonMode::Additive => Score(threshold.powi(ADDITIVE_BIG_EXPONENT)),
        }
    }

    /// Whether a score beats the sentinel
    pub fn accepts(&self, score: Score) -> bool {
        score < self.big()
    }

    /// Difference between two descriptors
    ///
    /// Returns `big()` when the descriptors have different lengths or when a
    /// channel difference exceeds the tolerance.
    pub fn compare(&self, a: &EdgeDescriptor, b: &EdgeDescriptor) -> Score {
        if a.len() != b.len() {
            return self.big();
        }

        let mut product = PrimeExponents::default();
        let mut sum = 1.0;

        let samples_a = a.samples();
        let samples_b = b.samples();
        for (row_a, row_b) in samples_a.rows().into_iter().zip(samples_b.rows()) {
            for (&x, &y) in row_a.iter().zip(row_b.iter()) {
                let difference = x.abs_diff(y);
                if self
                    .channel_tolerance
                    .is_some_and(|tolerance| difference > tolerance)
                {
                    return self.big();
                }
                match self.mode {
                    ComparisonMode::Multiplicative => product.multiply(difference),
                    ComparisonMode::Additive => sum += f64::from(difference),
                }
            }
        }

        match self.mode {
            ComparisonMode::Multiplicative => Score(product.ln()),
            ComparisonMode::Additive => Score(sum),
        }
    }
}

/// Exact product of differences as prime exponents
#[derive(Debug, Default)]
struct PrimeExponents {
    factors: BTreeMap<u16, u64>,
}

impl PrimeExponents {
    // Zero and one leave the product unchanged
    fn multiply(&mut self, difference: u16) {
        let mut rest = difference;
        let mut prime: u16 = 2;
        while u32::from(prime) * u32::from(prime) <= u32::from(rest) {
            while rest % prime == 0 {
                *self.factors.entry(prime).or_default() += 1;
                rest /= prime;
            }
            prime += 1;
        }
        if rest > 1 {
            *self.factors.entry(rest).or_default() += 1;
        }
    }

    // Summed in ascending prime order
    fn ln(&self) -> f64 {
        self.factors
            .iter()
            .map(|(&prime, &exponent)| exponent as f64 * f64::from(prime).ln())
            .sum()
    }
}
