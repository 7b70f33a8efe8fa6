//! Packsim - Monte Carlo pack-completion simulator library
//!
//! This module exposes the catalog model, collection tracking, player
//! economy, strategies and the simulation driver for testing and external use.

pub mod build_info;
pub mod cards;
pub mod catalog;
pub mod collection;
pub mod core;
pub mod profile;
pub mod simulator;
pub mod strategy;
