//! Implementations of ports against the public web sources.

pub mod bcb;
pub mod brapi;
pub mod failover;
pub mod fundamentus;
pub mod http;
pub mod inbound;
pub mod investidor10;
pub mod parse;

pub use bcb::CentralBank;
pub use brapi::BrapiStocks;
pub use failover::FailoverStockSource;
pub use fundamentus::{FundamentusFunds, FundamentusStocks};
pub use http::HttpClient;
pub use investidor10::{Investidor10, Investidor10Listings};
