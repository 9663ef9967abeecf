//! dockpick - pick a Docker container with a fuzzy finder and act on it
//!
//! The binary wires these pieces together; the controller only sees the
//! `ContainerEngine`, `Finder` and `Console` traits.

pub mod config;
pub mod controller;
pub mod core;
pub mod docker;
pub mod selector;
pub mod startup;
pub mod ui;
