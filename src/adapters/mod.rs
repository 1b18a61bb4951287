//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - OpenAI, Anthropic, failover and mock text generation
//! - `auth` - Bearer token validation
//! - `http` - axum REST API
//! - `memory` - In-memory repositories for tests and local runs
//! - `postgres` - sqlx repositories
//! - `storage` - Local filesystem and in-memory object storage

pub mod ai;
pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod storage;
