//! Inbound adapters: how a user drives the screener.

pub mod cli;
