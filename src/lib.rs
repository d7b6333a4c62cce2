//! Simulation core for a single-screen flappy-bird arcade game.
//!
//! The core is plain data plus pure update functions: a renderer only ever
//! sees a [`entities::Snapshot`], and input arrives as a single primary
//! action through [`session::GameSession::on_action`].

pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod runner;
pub mod schedule;
pub mod session;
pub mod stream;
