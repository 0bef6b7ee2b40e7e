//! rota-planner
//!
//! Orders delivery stops into a route: urgent stops first, each tier visited
//! greedily by nearest neighbor under a pluggable distance provider.

pub mod boundary;
pub mod classifier;
pub mod config;
pub mod error;
pub mod google;
pub mod haversine;
pub mod memo;
pub mod osrm;
pub mod osrm_data;
pub mod planner;
pub mod solver;
pub mod stop;
pub mod traits;
pub mod web;
