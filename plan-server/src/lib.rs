//! Trip plan parameter server.
//!
//! Resolves the possibly repeated query parameters of a trip-planning
//! search into one validated request per sub-request, ready to hand to a
//! path search engine.

pub mod config;
pub mod domain;
pub mod params;
pub mod request;
pub mod web;
