//! Declarative macOS workstation setup engine.
//!
//! Installs Homebrew and packages, writes Finder, system, git and Dock
//! preferences, installs Oh My Zsh and NvChad, and copies shell dotfiles,
//! all driven by one TOML document.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]**: load and validate the configuration document
//! - **[`resources`]**: idempotent `check + apply` primitives (packages, preferences, clones)
//! - **[`tasks`]**: the named setup steps wired to resources
//! - **[`commands`]**: top-level orchestration (full run, single step, personal apps)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod operations;
pub mod platform;
pub mod resources;
pub mod tasks;
