//! Merge rules for configuration sources

pub mod merge_policy;
