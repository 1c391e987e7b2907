//! Unit tests for pipelines and stages.
