//! Unit tests for task categorization, validation, domain rules and
//! service orchestration.

mod support;
