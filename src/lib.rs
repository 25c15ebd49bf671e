pub mod api;
pub mod chat;
pub mod cli;
pub mod cohere;
pub mod core;
pub mod web;
