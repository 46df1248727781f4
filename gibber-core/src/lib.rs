//! Word-level n-gram Markov text generation library.
//!
//! This crate provides the full training-and-generation core:
//! - Regex-driven normalization of raw chat-log lines
//! - Sentence/word segmentation with explicit boundary signals
//! - Simultaneous training of several n-gram orders from one token stream
//! - Frequency-to-probability normalization of the trained model
//! - Order-aware weighted random generation with stochastic termination
//!
//! Data acquisition (directory walks, snippet archives) and process wiring
//! live in the binary crate; this crate only consumes raw text lines and
//! produces a trained model and generated sentences.

/// Explicit configuration object passed by reference into every stage.
///
/// Replaces ambient process-wide state; constructed once by the caller.
pub mod config;

/// Multi-order n-gram model: trainer, frequency normalizer and generator.
pub mod model;

/// Streaming normalization-and-training pipeline.
///
/// Bounded single-writer/single-reader queues connect the normalizer,
/// segmenter and trainer stages; shutdown propagates by queue closure.
pub mod pipeline;
