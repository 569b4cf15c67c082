//! Fund classification and scoring.
//!
//! The score combines five independent signal groups (valuation, yield,
//! liquidity, size and brick vacancy) so one extreme metric cannot carry a
//! fund on its own. Liquidity and size are first-class signals: a small,
//! illiquid fund with a headline yield does not reach STAR.

mod classify;
pub mod lists;

pub use classify::classify_fund;

use super::magic_numbers;
use crate::domain::{
    BenchmarkRate, DisplayCategory, DividendInfo, EnrichmentRecord, FundStrategy, FundType,
    RawFundRecord, ScoredFund, StrategySet,
};

/// Yield used for scoring never exceeds this.
const YIELD_CAP: f64 = 14.0;
/// Minimum raw yield for the brick yield bonus.
const MIN_BRICK_YIELD: f64 = 6.0;
const BILLION: f64 = 1_000_000_000.0;

/// Classify and score one fund.
///
/// Enrichment is optional; an absent or empty record degrades
/// classification to segment text and lists. Valuation numbers from
/// enrichment only fill fields the discovery record left at zero.
/// `rate` is recorded on the result for display.
pub fn score_fund(
    raw: &RawFundRecord,
    enrichment: Option<&EnrichmentRecord>,
    rate: BenchmarkRate,
) -> ScoredFund {
    let enrichment = enrichment.map(EnrichmentRecord::sanitized);
    let mut fund = raw.sanitized();
    if let Some(record) = &enrichment {
        fill_from_valuation(&mut fund, record);
    }

    let fund_type = classify_fund(&fund.ticker, &fund.segment, enrichment.as_ref());
    let brick = fund_type == FundType::Tijolo;

    let mut score = 0.0;
    let mut distressed = false;

    // Valuation
    let pb = fund.pb;
    if brick {
        if (0.70..0.95).contains(&pb) {
            score += 2.0;
        } else if (0.95..=1.05).contains(&pb) {
            score += 1.0;
        }
    } else if (0.90..=1.02).contains(&pb) {
        score += 2.0;
    } else if pb > 0.0 && pb < 0.85 {
        score -= 3.0;
        distressed = true;
    }

    // Yield
    let capped_yield = fund.dividend_yield.min(YIELD_CAP);
    if capped_yield > 10.0 {
        score += 2.0;
    } else if capped_yield > 8.0 {
        score += 1.0;
    }
    if brick && fund.dividend_yield >= MIN_BRICK_YIELD {
        score += 0.5;
    }

    // Liquidity
    let liquidity = fund.liquidity;
    if liquidity > 4_000_000.0 {
        score += 3.0;
    } else if liquidity > 1_500_000.0 {
        score += 2.0;
    } else if liquidity > 800_000.0 {
        score += 1.0;
    } else if liquidity < 400_000.0 {
        score -= 2.0;
    }

    // Size
    let market_cap = fund.market_cap;
    if market_cap > 2.0 * BILLION {
        score += 2.0;
    } else if market_cap > BILLION {
        score += 1.0;
    } else if market_cap < 400_000_000.0 {
        score -= 1.0;
    }

    // Vacancy
    if brick {
        if fund.vacancy < 3.0 {
            score += 1.0;
        } else if fund.vacancy > 15.0 {
            score -= 2.0;
        }
    }

    let score = f64::clamp(score, 0.0, 10.0);

    let mut strategies = StrategySet::new();
    if brick && pb > 0.0 && pb < 0.90 && market_cap > BILLION {
        strategies.insert(FundStrategy::TijoloValue);
    }
    if fund_type.is_credit() && fund.dividend_yield > 11.0 && pb >= 0.95 {
        strategies.insert(FundStrategy::PapelCarry);
    }
    if distressed {
        strategies.insert(FundStrategy::DistressedRisk);
    }

    let category = if score >= 8.0 && liquidity > 1_000_000.0 && market_cap > BILLION {
        DisplayCategory::Star
    } else if score >= 6.0 {
        DisplayCategory::Opportunity
    } else {
        DisplayCategory::Standard
    };

    let (magic_number, magic_cost) = magic_numbers(fund.dividend_yield, fund.price);
    let enriched = enrichment.as_ref().is_some_and(|r| !r.is_empty());

    ScoredFund {
        fund_type,
        mandate: enrichment.as_ref().and_then(|r| r.mandate.clone()),
        selic: rate.value(),
        score,
        strategies,
        category,
        magic_number,
        magic_cost,
        enriched,
        dividend: enrichment.as_ref().and_then(DividendInfo::from_enrichment),
        raw: fund,
    }
}

fn fill_from_valuation(fund: &mut RawFundRecord, record: &EnrichmentRecord) {
    let valuation = record.valuation;
    let pairs = [
        (&mut fund.price, valuation.price),
        (&mut fund.dividend_yield, valuation.dividend_yield),
        (&mut fund.pb, valuation.pb),
        (&mut fund.liquidity, valuation.liquidity),
        (&mut fund.vacancy, valuation.vacancy),
    ];
    for (field, value) in pairs {
        if *field == 0.0 {
            *field = value;
        }
    }
    if fund.segment.is_empty() {
        if let Some(segment) = &record.segment {
            fund.segment = segment.clone();
        }
    }
}
