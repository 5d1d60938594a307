//! Per-concern analyzers. Each submodule takes raw source (or a
//! [`SourceFile`](crate::source::SourceFile)) and produces one metrics
//! struct; the engine composes them.

pub mod complexity;
pub mod docs;
pub mod framework;
pub mod types;
