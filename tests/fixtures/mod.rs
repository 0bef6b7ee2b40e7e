//! Test fixtures for rota-planner.
//!
//! Provides:
//! - Mogi das Cruzes locations around the default depot
//! - Fake geocoding and distance collaborators for network-free tests

#![allow(dead_code)]

pub mod fakes;
pub mod mogi_locations;

pub use fakes::*;
