//! Bus timetable server.
//!
//! A web application that answers: "given this catalog of route
//! definitions with calendar validity rules, what departs from this stop
//! today?"

pub mod cache;
pub mod calendar;
pub mod catalog;
pub mod config;
pub mod directory;
pub mod domain;
pub mod timetable;
pub mod web;
