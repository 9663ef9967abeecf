//! Integration tests
//!
//! Daemon-backed tests are ignored by default; run them with
//! `cargo test --test integration -- --ignored`.

mod controller_flow;
mod docker_client;
