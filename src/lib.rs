//! Kipygen: Generator Exercise Engine
//!
//! Composes small coroutine tasks into combined exercises, renders their
//! descriptions and validates candidate coroutines against scripted
//! send/expect rounds with bounded-wait exchanges and aligned diagnostics.

pub mod checker;
pub mod cli;
pub mod config;
pub mod coroutine;
pub mod description;
pub mod diff;
pub mod error;
pub mod exchange;
pub mod exercise;
pub mod hook;
pub mod logging;
pub mod persistence;
pub mod registry;
pub mod task;
pub mod tasks;
pub mod validator;
pub mod value;
pub mod vector;
