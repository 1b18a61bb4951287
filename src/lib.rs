//! Project Pilot - project-management backend driven by LLM pipelines.
//!
//! Projects collect documents, generated source code, quality and
//! consistency checks, work estimates, progress reports and proposals.
//! Each generator is a short pipeline (load rows, prompt the model, store
//! the result) that reports fixed progress checkpoints on a polled job and
//! falls back to sample content when the model or a source file fails.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
