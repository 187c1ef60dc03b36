//! Property-based tests for the frame filter
