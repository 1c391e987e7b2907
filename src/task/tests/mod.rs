//! Unit tests for tasks.
