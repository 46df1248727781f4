//! Top-level module for the multi-order n-gram model.
//!
//! This module provides:
//! - Per-candidate frequency counters (`Candidate`)
//! - The trained model with one prefix table per order (`ChainModel`)
//! - A weighted-sampling sentence generator (`Generator`)

/// A single (prefix, next-word) node holding frequency counters.
///
/// Counters hold raw observation counts during training and are
/// overwritten in place by their normalized fractions afterwards.
pub mod candidate;

/// Multi-order n-gram model.
///
/// Handles sentence ingestion, per-order transition counting,
/// one-shot frequency normalization and JSON dump/load.
pub mod chain;

/// Sentence generator over a normalized `ChainModel`.
///
/// Performs order-aware prefix lookups, weighted stochastic argmax
/// selection and probabilistic sentence termination.
pub mod generator;
