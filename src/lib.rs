//! Dataset mention extraction pipeline for scientific papers.
//!
//! Turns paper sections plus known dataset labels into token/BIO-tag
//! training rows, and turns model-predicted tag rows back into
//! deduplicated per-paper label sets.

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod nlp;
