use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::candidate::{sane, Candidate};

/// Mapping from a prefix to the distribution over following words.
type PrefixTable = HashMap<String, HashMap<String, Candidate>>;

/// Multi-order n-gram model over word tokens.
///
/// The model keeps one prefix table per order `n` in `0..max_order`.
/// At order `n` a prefix is the space-joined sequence of the `n` words
/// immediately preceding a position (the empty string at order 0).
///
/// # Responsibilities
/// - Accumulate transition and end-of-sentence counts per sentence
/// - Convert raw counts into per-prefix probability distributions
/// - Serialize to / deserialize from an indented, human-diffable JSON dump
///
/// # Invariants
/// - Every prefix present in a table has at least one candidate with
///   `count > 0`
/// - (order, prefix, word) is unique; repeated observations increment the
///   existing candidate
/// - Counts only grow during training; `normalize` runs exactly once and
///   overwrites them with fractions
#[derive(Serialize, Deserialize, Debug)]
pub struct ChainModel {
	/// One table per order, index = order.
	orders: Vec<PrefixTable>,
	/// Set once `normalize` has run; training and a second normalization
	/// pass are rejected afterwards.
	normalized: bool,
}

impl ChainModel {
	/// Creates an empty model maintaining orders `0..max_order`.
	///
	/// # Errors
	/// Returns an error if `max_order < 1`.
	pub fn new(max_order: usize) -> Result<Self, String> {
		if max_order == 0 {
			return Err("max_order must be >= 1".to_owned());
		}
		Ok(Self {
			orders: vec![PrefixTable::new(); max_order],
			normalized: false,
		})
	}

	/// Number of orders maintained by this model.
	pub fn max_order(&self) -> usize {
		self.orders.len()
	}

	/// Whether the one-shot frequency normalization has already run.
	pub fn is_normalized(&self) -> bool {
		self.normalized
	}

	/// Returns the candidate distribution for a prefix at the given order.
	///
	/// Returns `None` for an out-of-range order or an unknown prefix.
	pub fn candidates(&self, order: usize, prefix: &str) -> Option<&HashMap<String, Candidate>> {
		self.orders.get(order)?.get(prefix)
	}

	/// Read-only view of one order's full prefix table.
	pub fn table(&self, order: usize) -> Option<&PrefixTable> {
		self.orders.get(order)
	}

	/// Ingests one sentence (a slice of word tokens) into every order.
	///
	/// For each position `i` and each order `n` with `i >= n`, the prefix
	/// is the `n` words before `i` joined by single spaces. An update is
	/// skipped when the prefix textually equals the current word, which
	/// guards against degenerate self-loops. After the sentence, the last
	/// candidate touched receives an end-of-sentence observation.
	///
	/// An empty slice yields no updates. Training after normalization is
	/// ignored (counts must stay fractions once normalized).
	pub fn train_sentence(&mut self, words: &[String]) {
		if self.normalized {
			log::warn!("ignoring training data received after normalization");
			return;
		}

		let mut last_touched: Option<(usize, String)> = None;
		for (i, word) in words.iter().enumerate() {
			for n in 0..self.orders.len() {
				if i < n {
					continue;
				}
				let prefix = words[i - n..i].join(" ");
				if prefix == *word {
					continue;
				}
				let candidate = self.orders[n]
					.entry(prefix.clone())
					.or_default()
					.entry(word.clone())
					.or_default();
				candidate.count += 1.0;
				last_touched = Some((n, prefix));
			}
		}

		// The sentence ended right after the final word; remember that on
		// the candidate updated last, at whichever order that was.
		if let Some((n, prefix)) = last_touched {
			if let Some(word) = words.last() {
				if let Some(candidate) =
					self.orders[n].get_mut(&prefix).and_then(|c| c.get_mut(word))
				{
					candidate.is_end += 1.0;
				}
			}
		}
	}

	/// Converts raw counts into per-prefix probability distributions.
	///
	/// For each (order, prefix), every candidate's `count` is divided by
	/// the total count under that prefix, and every `is_end` by the total
	/// end count. A zero end total is treated as 1 so prefixes where no
	/// sentence ever ended keep all `is_end` values at 0 instead of
	/// dividing by zero. Degenerate quotients are stored as 0.
	///
	/// This is a one-way transformation and must run exactly once, after
	/// training finishes and before any generation call.
	///
	/// # Errors
	/// Returns an error if the model is already normalized.
	pub fn normalize(&mut self) -> Result<(), String> {
		if self.normalized {
			return Err("model is already normalized".to_owned());
		}

		for table in &mut self.orders {
			for candidates in table.values_mut() {
				let total_count: f64 = candidates.values().map(|c| c.count).sum();
				let mut total_end: f64 = candidates.values().map(|c| c.is_end).sum();
				if total_end == 0.0 {
					total_end = 1.0;
				}
				for candidate in candidates.values_mut() {
					candidate.count = sane(candidate.count / total_count);
					candidate.is_end = sane(candidate.is_end / total_end);
				}
			}
		}

		self.normalized = true;
		Ok(())
	}

	/// Serializes the model as indented JSON.
	///
	/// The dump maps, per order, each prefix to its candidates with their
	/// current `count` / `isEnd` values.
	pub fn to_json(&self) -> Result<String, serde_json::Error> {
		serde_json::to_string_pretty(self)
	}

	/// Reconstructs a model from a JSON dump produced by [`Self::to_json`].
	pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(contents)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn words(sentence: &str) -> Vec<String> {
		sentence.split_whitespace().map(str::to_owned).collect()
	}

	#[test]
	fn rejects_zero_orders() {
		assert!(ChainModel::new(0).is_err());
	}

	#[test]
	fn empty_sentence_yields_no_updates() {
		let mut model = ChainModel::new(2).unwrap();
		model.train_sentence(&[]);
		assert!(model.table(0).unwrap().is_empty());
		assert!(model.table(1).unwrap().is_empty());
	}

	#[test]
	fn alternating_words_at_order_one() {
		let mut model = ChainModel::new(2).unwrap();
		model.train_sentence(&words("a b a b a b"));
		model.normalize().unwrap();

		let after_a = model.candidates(1, "a").unwrap();
		assert_eq!(after_a.len(), 1);
		assert!((after_a["b"].count - 1.0).abs() < 1e-5);

		let after_b = model.candidates(1, "b").unwrap();
		assert_eq!(after_b.len(), 1);
		assert!((after_b["a"].count - 1.0).abs() < 1e-5);
	}

	#[test]
	fn self_loop_prefix_is_skipped() {
		let mut model = ChainModel::new(2).unwrap();
		model.train_sentence(&words("a a b"));
		// "a" following prefix "a" is the degenerate case and is dropped.
		assert!(model.candidates(1, "a").map_or(true, |c| !c.contains_key("a")));
		assert!(model.candidates(1, "a").unwrap().contains_key("b"));
	}

	#[test]
	fn counts_sum_to_one_per_prefix() {
		let mut model = ChainModel::new(3).unwrap();
		model.train_sentence(&words("the cat sat on the mat"));
		model.train_sentence(&words("the dog sat on the rug"));
		model.train_sentence(&words("a cat and a dog"));
		model.normalize().unwrap();

		for order in 0..model.max_order() {
			for (prefix, candidates) in model.table(order).unwrap() {
				let total: f64 = candidates.values().map(|c| c.count).sum();
				assert!(
					(total - 1.0).abs() < 1e-5,
					"order {order} prefix {prefix:?} sums to {total}"
				);
			}
		}
	}

	#[test]
	fn end_counts_sum_to_one_or_stay_zero() {
		let mut model = ChainModel::new(2).unwrap();
		model.train_sentence(&words("x y z"));
		model.train_sentence(&words("x y w"));
		model.normalize().unwrap();

		for order in 0..model.max_order() {
			for candidates in model.table(order).unwrap().values() {
				let total: f64 = candidates.values().map(|c| c.is_end).sum();
				assert!(
					(total - 1.0).abs() < 1e-5 || total == 0.0,
					"end total {total} is neither 0 nor 1"
				);
			}
		}

		// Both sentences ended after the order-1 update of their last word.
		let finals = model.candidates(1, "y").unwrap();
		let end_total: f64 = finals.values().map(|c| c.is_end).sum();
		assert!((end_total - 1.0).abs() < 1e-5);
	}

	#[test]
	fn second_normalization_is_rejected() {
		let mut model = ChainModel::new(2).unwrap();
		model.train_sentence(&words("a b c"));
		assert!(model.normalize().is_ok());
		assert!(model.normalize().is_err());
	}

	#[test]
	fn training_after_normalization_is_ignored() {
		let mut model = ChainModel::new(1).unwrap();
		model.train_sentence(&words("a b"));
		model.normalize().unwrap();
		model.train_sentence(&words("c d"));
		assert!(model.candidates(0, "").unwrap().get("c").is_none());
	}

	#[test]
	fn json_round_trip_preserves_values() {
		let mut model = ChainModel::new(2).unwrap();
		model.train_sentence(&words("the cat sat"));
		model.train_sentence(&words("the cat ran"));
		model.normalize().unwrap();

		let dump = model.to_json().unwrap();
		let restored = ChainModel::from_json(&dump).unwrap();

		assert_eq!(restored.max_order(), model.max_order());
		assert!(restored.is_normalized());
		for order in 0..model.max_order() {
			let table = model.table(order).unwrap();
			let restored_table = restored.table(order).unwrap();
			assert_eq!(table.len(), restored_table.len());
			for (prefix, candidates) in table {
				for (word, candidate) in candidates {
					let restored_candidate = &restored_table[prefix][word];
					assert!((candidate.count - restored_candidate.count).abs() < 1e-9);
					assert!((candidate.is_end - restored_candidate.is_end).abs() < 1e-9);
				}
			}
		}
	}
}
