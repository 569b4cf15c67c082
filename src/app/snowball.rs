//! "Bola de neve" spreadsheet: funds grouped by entry price.

use std::path::Path;

use tracing::info;

use super::snapshot::write_atomic;
use crate::domain::{FundType, ScoredFund};
use crate::error::{ConfigError, Result};

const HEADERS: [&str; 13] = [
    "Ticker",
    "Tipo",
    "Segmento",
    "Preço",
    "DY (%)",
    "P/VP",
    "Liquidez Diária (R$)",
    "Vacância (%)",
    "Score",
    "Estratégias",
    "Número Mágico",
    "Custo Mágico (R$)",
    "Seção Bola de Neve",
];

/// Price band a fund is listed under, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SnowballSection {
    Highlights,
    Base10,
    Base20To50,
    Base100,
}

impl SnowballSection {
    /// Agro and infrastructure funds are highlighted regardless of price.
    #[must_use]
    pub fn of(fund: &ScoredFund) -> Self {
        match fund.fund_type {
            FundType::Agro | FundType::Infra => Self::Highlights,
            _ if fund.raw.price < 15.0 => Self::Base10,
            _ if fund.raw.price < 70.0 => Self::Base20To50,
            _ => Self::Base100,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Highlights => "Destaques (Fiagro & Infra)",
            Self::Base10 => "Base R$ 10 (Acessíveis)",
            Self::Base20To50 => "Base R$ 20 - R$ 50 (Intermediários)",
            Self::Base100 => "Base R$ 100+ (Premium/Tradicionais)",
        }
    }
}

/// `1.25M`, `830.00K`, `N/A` for zero.
#[must_use]
pub fn format_liquidity(value: f64) -> String {
    if value <= 0.0 {
        "N/A".to_string()
    } else if value >= 1_000_000.0 {
        format!("{:.2}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.2}K", value / 1_000.0)
    } else {
        format!("{value:.2}")
    }
}

/// Prefix cells a spreadsheet would evaluate as a formula.
#[must_use]
pub fn guard_cell(cell: &str) -> String {
    if cell.starts_with(['=', '+', '-', '@', '\t', '\r']) {
        format!("'{cell}")
    } else {
        cell.to_string()
    }
}

/// Render funds as CSV, sorted by section then price.
pub fn render(funds: &[ScoredFund]) -> Result<String> {
    let mut rows: Vec<(SnowballSection, f64, Vec<String>)> =
        funds.iter().map(|fund| (SnowballSection::of(fund), fund.raw.price, row(fund))).collect();
    rows.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.total_cmp(&b.1)));

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADERS).map_err(csv_error)?;
    for (_, _, cells) in &rows {
        writer
            .write_record(cells.iter().map(|cell| guard_cell(cell)))
            .map_err(csv_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ConfigError::Other(format!("CSV buffer: {e}")))?;
    String::from_utf8(bytes).map_err(|e| ConfigError::Other(format!("CSV encoding: {e}")).into())
}

/// Write the CSV and return the row count per section.
pub fn write(path: &Path, funds: &[ScoredFund]) -> Result<Vec<(SnowballSection, usize)>> {
    write_atomic(path, render(funds)?.as_bytes())?;

    let mut summary: Vec<(SnowballSection, usize)> = Vec::new();
    for fund in funds {
        let section = SnowballSection::of(fund);
        match summary.iter_mut().find(|(s, _)| *s == section) {
            Some((_, count)) => *count += 1,
            None => summary.push((section, 1)),
        }
    }
    summary.sort();

    info!(path = %path.display(), rows = funds.len(), "Snowball CSV written");
    Ok(summary)
}

fn row(fund: &ScoredFund) -> Vec<String> {
    let raw = &fund.raw;
    let or_na = |text: &str| {
        if text.trim().is_empty() {
            "N/A".to_string()
        } else {
            text.to_string()
        }
    };
    let paying = fund.magic_number != crate::domain::NO_MAGIC_NUMBER;

    vec![
        raw.ticker.to_string(),
        fund.fund_type.to_string(),
        or_na(&raw.segment),
        format!("{:.2}", raw.price),
        format!("{:.2}", raw.dividend_yield),
        format!("{:.2}", raw.pb),
        format_liquidity(raw.liquidity),
        format!("{:.2}", raw.vacancy),
        format!("{}", fund.score),
        fund.strategies.labels().join("; "),
        if paying { fund.magic_number.to_string() } else { "N/A".into() },
        if paying && fund.magic_cost > 0.0 {
            format!("{:.2}", fund.magic_cost)
        } else {
            "N/A".into()
        },
        SnowballSection::of(fund).label().to_string(),
    ]
}

fn csv_error(e: csv::Error) -> crate::error::Error {
    ConfigError::Other(format!("CSV: {e}")).into()
}
