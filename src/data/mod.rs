//! Data loading and exchange-format serialization layer.

pub mod meta;
pub mod papers;
pub mod samples;
