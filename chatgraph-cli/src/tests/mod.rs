//! Unit tests for chatgraph-cli, organized by module.
//!
//! Tests are BDD-style with Given/When/Then comments and descriptive names.
//! Each submodule documents the behaviour under test.

mod run;
mod trace;
