//! Zone-aware transit route planner server.
//!
//! A web application that answers: "what is the most sensible way to get
//! from here to there by public transport?", weighing walking, transfers,
//! fare zones and the length of each hop.

pub mod config;
pub mod domain;
pub mod geo;
pub mod geocode;
pub mod network;
pub mod planner;
pub mod web;
