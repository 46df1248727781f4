use serde::{Deserialize, Serialize};

/// A possible next word for a given (order, prefix).
///
/// Conceptually an outgoing edge of a Markov chain node. During training
/// both fields are integer-valued observation counts; the frequency
/// normalization pass overwrites them in place with per-prefix fractions.
///
/// ## Invariants
/// - `count` is strictly positive while the model is unnormalized
///   (a candidate only exists because it was observed at least once)
/// - After normalization, `count` is the probability of this word
///   following its prefix, and `is_end` the probability that a sentence
///   ended right here
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Candidate {
	/// How often this word followed its prefix.
	pub count: f64,
	/// How often a sentence ended immediately after this word.
	#[serde(rename = "isEnd")]
	pub is_end: f64,
}

impl Candidate {
	/// Creates a candidate with zeroed counters.
	pub fn new() -> Self {
		Self { count: 0.0, is_end: 0.0 }
	}
}

impl Default for Candidate {
	fn default() -> Self {
		Self::new()
	}
}

/// Replaces infinite or not-a-number values with 0.
///
/// Division results are passed through this guard before being stored,
/// so degenerate totals never poison the model.
pub(crate) fn sane(value: f64) -> f64 {
	if value.is_infinite() || value.is_nan() {
		return 0.0;
	}
	value
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sane_substitutes_degenerate_values() {
		assert_eq!(sane(f64::INFINITY), 0.0);
		assert_eq!(sane(f64::NEG_INFINITY), 0.0);
		assert_eq!(sane(f64::NAN), 0.0);
		assert_eq!(sane(0.25), 0.25);
	}
}
