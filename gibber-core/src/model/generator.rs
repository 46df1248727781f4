use std::collections::HashMap;

use rand::Rng;

use super::candidate::Candidate;
use super::chain::ChainModel;
use crate::config::ModelConfig;

/// Sentence generator over a normalized [`ChainModel`].
///
/// # Responsibilities
/// - Walk prefixes of increasing order as context accumulates
/// - Select the next word by weighted stochastic argmax
/// - Decide termination from the chosen candidate's end likelihood
///
/// # Notes
/// - Generation is read-only; the model is borrowed immutably.
/// - Generation never fails: a missing prefix is an implicit sentence end
///   and the length cap bounds every walk, so a (possibly empty) sentence
///   is always returned.
#[derive(Debug)]
pub struct Generator<'a> {
	model: &'a ChainModel,
	config: &'a ModelConfig,
}

impl<'a> Generator<'a> {
	/// Creates a generator over a trained, normalized model.
	///
	/// # Errors
	/// Returns an error if the model has not been normalized yet; raw
	/// counts must never be used as sampling weights.
	pub fn new(model: &'a ChainModel, config: &'a ModelConfig) -> Result<Self, String> {
		if !model.is_normalized() {
			return Err("model must be normalized before generation".to_owned());
		}
		Ok(Self { model, config })
	}

	/// Generates one sentence using the thread-local RNG.
	pub fn sentence(&self) -> String {
		self.sentence_with(&mut rand::rng())
	}

	/// Generates one sentence using the provided RNG.
	///
	/// The current order starts at 0 and grows by one per emitted word,
	/// clamped to the model's highest order, so longer context is used as
	/// it becomes available. After each word, generation stops with
	/// probability proportional to the word's end likelihood scaled by
	/// `end_bias`, and unconditionally at `max_sentence_length` words.
	pub fn sentence_with<R: Rng>(&self, rng: &mut R) -> String {
		let mut words: Vec<String> = Vec::new();
		let mut order = 0;

		while words.len() < self.config.max_sentence_length {
			let prefix = last_n_words(&words, order);
			// An unknown prefix means infinite end likelihood: stop here.
			let Some(candidates) = self.model.candidates(order, &prefix) else {
				break;
			};
			let Some((word, candidate)) = pick_weighted(candidates, rng) else {
				break;
			};

			let is_end = candidate.is_end;
			words.push(word.to_owned());
			order = (order + 1).min(self.model.max_order() - 1);

			if rng.random::<f64>() * is_end * self.config.end_bias > 0.5 {
				break;
			}
		}

		words.join(" ")
	}
}

/// Space-joined slice of the last `n` words (empty string when `n` is 0
/// or nothing has been emitted yet).
fn last_n_words(words: &[String], n: usize) -> String {
	if n == 0 || words.is_empty() {
		return String::new();
	}
	let start = words.len().saturating_sub(n);
	words[start..].join(" ")
}

/// Weighted stochastic argmax over a candidate distribution.
///
/// Every candidate's probability weight is scaled by an independent
/// uniform draw in [0, 1) and the strict maximum wins, so heavier
/// candidates are more likely, but never guaranteed, to be picked.
/// Strict comparison keeps the earliest maximum on ties.
///
/// Returns `None` for an empty distribution.
fn pick_weighted<'m, R: Rng>(
	candidates: &'m HashMap<String, Candidate>,
	rng: &mut R,
) -> Option<(&'m str, &'m Candidate)> {
	let mut best: Option<(&str, &Candidate)> = None;
	let mut best_score = f64::NEG_INFINITY;

	for (word, candidate) in candidates {
		let score = rng.random::<f64>() * candidate.count;
		if score > best_score {
			best_score = score;
			best = Some((word, candidate));
		}
	}

	best
}
