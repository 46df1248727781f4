//! Streaming normalization-and-training pipeline.
//!
//! Three single-threaded stages run concurrently, connected by bounded
//! queues: raw lines are normalized, normalized lines are segmented into
//! token events, and token events train the model. Each queue has exactly
//! one writer and one reader, so no stage needs locks; a full queue blocks
//! the producer (backpressure) and dropping a sender closes the queue,
//! propagating shutdown downstream.

/// Regex-based cleanup of one raw text line.
pub mod normalizer;

/// Sentence/word segmentation of normalized lines.
pub mod segmenter;

use std::sync::mpsc::{sync_channel, Receiver, SyncSender};
use std::thread::{self, JoinHandle};

use crate::config::ModelConfig;
use crate::model::chain::ChainModel;
use normalizer::normalize_line;
use segmenter::{segment_line, TokenEvent};

/// Capacity of every inter-stage queue.
const QUEUE_CAPACITY: usize = 32;

/// Counters accumulated by the segmenter stage.
#[derive(Clone, Copy, Debug, Default)]
pub struct TrainStats {
	/// Sentences emitted downstream.
	pub sentences: u64,
	/// Word tokens emitted downstream.
	pub words: u64,
}

/// A running training pipeline.
///
/// Created with [`TrainingPipeline::spawn`], fed raw lines through
/// [`TrainingPipeline::feed_line`], and completed with
/// [`TrainingPipeline::finish`], which blocks until the trainer stage has
/// drained its input and returns the unnormalized model together with the
/// run statistics.
///
/// # Notes
/// - Token order within a sentence, sentence order within a line and line
///   order within one feeder are all preserved end to end.
/// - There is no cancellation path; the pipeline runs to input exhaustion.
pub struct TrainingPipeline {
	raw_tx: SyncSender<String>,
	normalizer: JoinHandle<()>,
	segmenter: JoinHandle<TrainStats>,
	trainer: JoinHandle<ChainModel>,
}

impl TrainingPipeline {
	/// Spawns the three stage threads and returns the pipeline handle.
	///
	/// # Errors
	/// Returns an error if the configuration cannot produce a model
	/// (`max_order` of zero).
	pub fn spawn(config: &ModelConfig) -> Result<Self, String> {
		let model = ChainModel::new(config.max_order)?;

		let (raw_tx, raw_rx) = sync_channel::<String>(QUEUE_CAPACITY);
		let (line_tx, line_rx) = sync_channel::<String>(QUEUE_CAPACITY);
		let (token_tx, token_rx) = sync_channel::<TokenEvent>(QUEUE_CAPACITY);

		let normalizer = thread::spawn(move || normalize_stage(raw_rx, line_tx));
		let segmenter = thread::spawn(move || segment_stage(line_rx, token_tx));
		let trainer = thread::spawn(move || train_stage(token_rx, model));

		log::debug!("training pipeline spawned with {} orders", config.max_order);
		Ok(Self { raw_tx, normalizer, segmenter, trainer })
	}

	/// Feeds one raw line into the pipeline, blocking while the input
	/// queue is full.
	///
	/// A line is silently dropped if the pipeline has already shut down
	/// abnormally; per-line failures never abort a run.
	pub fn feed_line(&self, line: String) {
		if self.raw_tx.send(line).is_err() {
			log::warn!("raw line dropped: pipeline input queue is closed");
		}
	}

	/// Closes the input queue and blocks until training completes.
	///
	/// Returns the trained (still unnormalized) model and the run
	/// statistics.
	///
	/// # Errors
	/// Returns an error if a stage thread panicked.
	pub fn finish(self) -> Result<(ChainModel, TrainStats), String> {
		drop(self.raw_tx);

		self.normalizer
			.join()
			.map_err(|_| "normalizer stage panicked".to_owned())?;
		let stats = self
			.segmenter
			.join()
			.map_err(|_| "segmenter stage panicked".to_owned())?;
		let model = self
			.trainer
			.join()
			.map_err(|_| "trainer stage panicked".to_owned())?;

		log::debug!(
			"training finished: {} sentences, {} words",
			stats.sentences,
			stats.words
		);
		Ok((model, stats))
	}
}

/// Normalizer stage: raw lines in, cleaned lines out. Dropped lines
/// produce nothing.
fn normalize_stage(input: Receiver<String>, output: SyncSender<String>) {
	for line in input {
		if let Some(cleaned) = normalize_line(&line) {
			if output.send(cleaned).is_err() {
				return;
			}
		}
	}
}

/// Segmenter stage: cleaned lines in, token events out. Counts the words
/// and sentences it emits.
fn segment_stage(input: Receiver<String>, output: SyncSender<TokenEvent>) -> TrainStats {
	let mut stats = TrainStats::default();
	for line in input {
		for event in segment_line(&line) {
			match event {
				TokenEvent::Word(_) => stats.words += 1,
				TokenEvent::EndOfSentence => stats.sentences += 1,
			}
			if output.send(event).is_err() {
				return stats;
			}
		}
	}
	stats
}

/// Trainer stage: owns the model for the duration of training. Words are
/// buffered until an end-of-sentence signal, then the whole sentence is
/// ingested at every order at once.
fn train_stage(input: Receiver<TokenEvent>, mut model: ChainModel) -> ChainModel {
	let mut sentence: Vec<String> = Vec::new();
	for event in input {
		match event {
			TokenEvent::Word(word) => sentence.push(word),
			TokenEvent::EndOfSentence => {
				model.train_sentence(&sentence);
				sentence.clear();
			}
		}
	}
	model
}
