//! Multimodal trip planner client.
//!
//! A web application that answers: "I picked two points on the map of
//! Pune - which combinations of bus, metro and walking get me there?"
//! Route search is delegated to a remote trip-search service.

pub mod api;
pub mod cache;
pub mod config;
pub mod domain;
pub mod planner;
pub mod web;
