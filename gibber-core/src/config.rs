use serde::{Deserialize, Serialize};

/// Configuration shared by the training pipeline and the generator.
///
/// `ModelConfig` is built once at process start and passed by reference
/// into each stage. There is no ambient global state.
///
/// # Invariants
/// - `max_order` is always >= 1
/// - `max_sentence_length` is always >= 1
/// - `end_bias` is always in [0.0, 1.0]
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ModelConfig {
	/// Number of n-gram orders to maintain (tables for orders `0..max_order`).
	pub max_order: usize,

	/// Hard cap on generated sentence length, in words.
	pub max_sentence_length: usize,

	/// Scale applied to a candidate's end-of-sentence likelihood when
	/// deciding whether to stop after emitting it.
	pub end_bias: f64,

	/// Number of sentences to generate per run.
	pub num_sentences: usize,
}

impl Default for ModelConfig {
	fn default() -> Self {
		Self {
			max_order: 2,
			max_sentence_length: 20,
			end_bias: 0.001,
			num_sentences: 50,
		}
	}
}

impl ModelConfig {
	/// Creates a validated configuration.
	///
	/// # Errors
	/// Returns an error if `max_order` or `max_sentence_length` is zero,
	/// or if `end_bias` is outside [0.0, 1.0].
	pub fn new(
		max_order: usize,
		max_sentence_length: usize,
		end_bias: f64,
		num_sentences: usize,
	) -> Result<Self, String> {
		if max_order == 0 {
			return Err("max_order must be >= 1".to_owned());
		}
		if max_sentence_length == 0 {
			return Err("max_sentence_length must be >= 1".to_owned());
		}
		if !(0.0..=1.0).contains(&end_bias) {
			return Err("end_bias must be between 0.0 and 1.0".to_owned());
		}
		Ok(Self { max_order, max_sentence_length, end_bias, num_sentences })
	}
}
