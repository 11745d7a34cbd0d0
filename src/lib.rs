//! nodella - Node.js upgrade tester library
//!
//! This library tests whether a project still works on another Node.js
//! version:
//! - Resolves the current and target versions
//! - Switches versions through nvm or fnm
//! - Reinstalls dependencies, builds and tests under the target
//! - Re-tests the original version to confirm the environment still works

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod orchestrator;
pub mod output;
pub mod package_manager;
pub mod process;
pub mod progress;
pub mod release;
pub mod tester;
pub mod version;
pub mod version_manager;
