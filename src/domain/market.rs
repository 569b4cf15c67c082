//! Macro and display-only market records carried into the snapshot.

use serde::{Deserialize, Serialize};

/// Macro indicators shown in the dashboard header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Economy {
    /// USD/BRL bid.
    pub dollar: Option<f64>,
    /// Selic target, percent.
    pub selic: Option<f64>,
}

/// One historical distribution event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DividendEvent {
    /// Event kind as printed by the source ("Dividendos", "JSCP", "Rendimento").
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "data_com")]
    pub ex_date: String,
    #[serde(rename = "data_pagamento")]
    pub payment_date: String,
    pub value: f64,
}

/// Exchange traded fund shown for reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Etf {
    pub ticker: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Government bond offer as listed, kept in display form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreasuryBond {
    pub name: String,
    pub rate: String,
    pub min_invest: String,
    pub price: String,
    pub maturity: String,
}

/// Estimated private fixed-income yield derived from the benchmark rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateBenchmark {
    pub name: String,
    pub rate: String,
    #[serde(rename = "type")]
    pub kind: String,
}
