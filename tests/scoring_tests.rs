use proptest::prelude::*;

use b3_screener::domain::{
    BenchmarkRate, DisplayCategory, EnrichmentRecord, FundType, RawFundRecord, RawStockRecord,
    StockStrategy, Ticker,
};
use b3_screener::scoring::fund::lists::NEVER_INFRA;
use b3_screener::scoring::{classify_fund, score_fund, score_stock};

/// Mostly ordinary numbers, sometimes zero, negative or non-finite.
fn number() -> impl Strategy<Value = f64> {
    prop_oneof![
        8 => -50.0..200.0f64,
        2 => Just(0.0),
        1 => Just(f64::NAN),
        1 => Just(f64::INFINITY),
        1 => Just(f64::NEG_INFINITY),
        1 => 1.0e6..1.0e10f64,
    ]
}

prop_compose! {
    fn stock()(
        a in prop::array::uniform8(number()),
        b in prop::array::uniform5(number()),
        payout in prop::option::of(number()),
    ) -> RawStockRecord {
        RawStockRecord {
            price: a[0],
            pe: a[1],
            pb: a[2],
            psr: a[3],
            dividend_yield: a[4],
            ev_ebit: a[5],
            ebit_margin: a[6],
            net_margin: a[7],
            roic: b[0],
            roe: b[1],
            liquidity_2m: b[2].abs() * 10_000.0,
            debt_to_equity: b[3],
            revenue_cagr_5y: b[4],
            payout,
            ..RawStockRecord::new("PROP3")
        }
    }
}

prop_compose! {
    fn fund()(
        n in prop::array::uniform9(number()),
        segment in prop::sample::select(vec![
            "", "Logística", "Shoppings", "Títulos e Val. Mob.", "Híbrido",
            "Fiagro", "Infraestrutura", "Lajes Corporativas", "Outros",
        ]),
    ) -> RawFundRecord {
        RawFundRecord {
            segment: segment.to_string(),
            price: n[0],
            ffo_yield: n[1],
            dividend_yield: n[2],
            pb: n[3] / 50.0,
            market_cap: n[4].abs() * 1.0e7,
            liquidity: n[5].abs() * 10_000.0,
            property_count: n[6],
            cap_rate: n[7],
            vacancy: n[8],
            ..RawFundRecord::new("PROP11")
        }
    }
}

fn rate() -> impl Strategy<Value = BenchmarkRate> {
    (0.5..25.0f64).prop_map(BenchmarkRate::new)
}

proptest! {
    #[test]
    fn stock_score_is_finite_and_capped(raw in stock(), rate in rate()) {
        let scored = score_stock(&raw, rate);
        prop_assert!(scored.score.is_finite());
        prop_assert!(scored.score <= 10.0);
    }

    #[test]
    fn graham_zero_without_positive_multiples(raw in stock(), rate in rate()) {
        let clean = raw.sanitized();
        prop_assume!(clean.pe <= 0.0 || clean.pb <= 0.0);
        let scored = score_stock(&raw, rate);
        prop_assert_eq!(scored.graham_fair_price, 0.0);
        prop_assert_eq!(scored.upside, 0.0);
    }

    #[test]
    fn stock_scoring_is_idempotent(raw in stock(), rate in rate()) {
        let first = score_stock(&raw, rate);
        let second = score_stock(&raw, rate);
        prop_assert_eq!(first.score.to_bits(), second.score.to_bits());
        prop_assert_eq!(first.graham_fair_price.to_bits(), second.graham_fair_price.to_bits());
        prop_assert_eq!(first.strategies, second.strategies);
        prop_assert_eq!(first.category, second.category);
    }

    #[test]
    fn unsustainable_payout_never_star(
        raw in stock(),
        payout in 100.01..1000.0f64,
        rate in rate(),
    ) {
        let raw = RawStockRecord { payout: Some(payout), ..raw };
        prop_assert_ne!(score_stock(&raw, rate).category, Some(DisplayCategory::Star));
    }

    #[test]
    fn turnaround_does_not_count_toward_tag_bar(raw in stock(), rate in rate()) {
        let scored = score_stock(&raw, rate);
        let tags = scored.strategies.len();
        let turnaround = scored.strategies.contains(StockStrategy::Turnaround);
        if turnaround && scored.score < 7.0 && tags <= 3 {
            prop_assert_ne!(scored.category, Some(DisplayCategory::Star), "tags {}", tags);
        }
    }

    #[test]
    fn fund_score_within_bounds(raw in fund(), rate in rate()) {
        let scored = score_fund(&raw, None, rate);
        prop_assert!((0.0..=10.0).contains(&scored.score), "score {}", scored.score);
    }

    #[test]
    fn fund_scoring_is_idempotent(raw in fund(), rate in rate()) {
        let first = score_fund(&raw, None, rate);
        let second = score_fund(&raw, None, rate);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn never_infra_tickers_stay_out_of_infra(
        ticker in prop::sample::select(NEVER_INFRA.to_vec()),
        segment in prop::sample::select(vec!["Infraestrutura", "Energia", "Saneamento", ""]),
        fund_type in prop::sample::select(vec!["FI-INFRA", "INFRAESTRUTURA", "FII DE TIJOLO"]),
    ) {
        let ticker = Ticker::new(ticker);
        let record = EnrichmentRecord {
            fund_type: Some(fund_type.to_string()),
            mandate: Some("Infraestrutura".to_string()),
            ..EnrichmentRecord::empty(ticker.clone())
        };

        prop_assert_ne!(classify_fund(&ticker, segment, Some(&record)), FundType::Infra);
        prop_assert_ne!(classify_fund(&ticker, segment, None), FundType::Infra);
    }
}

#[test]
fn scenario_graham_and_bazin_prices() {
    let raw = RawStockRecord {
        price: 20.0,
        pe: 10.0,
        pb: 1.0,
        dividend_yield: 5.0,
        ..RawStockRecord::new("SCNA3")
    };
    let rate = BenchmarkRate::new(10.0);
    assert_eq!(rate.yield_threshold(), 6.0);

    let scored = score_stock(&raw, rate);
    assert!((scored.graham_fair_price - 30.0).abs() < 1e-9);
    assert!((scored.upside - 50.0).abs() < 1e-9);
    assert!((scored.bazin_price - 16.666_666).abs() < 1e-3);
}

#[test]
fn high_scoring_turnaround_is_still_star() {
    let raw = RawStockRecord {
        price: 10.0,
        pe: -5.0,
        ebit_margin: 5.0,
        pb: 0.5,
        ev_ebit: 5.0,
        psr: 1.0,
        roe: 20.0,
        roic: 20.0,
        net_margin: 20.0,
        dividend_yield: 8.0,
        debt_to_equity: 0.5,
        liquidity_2m: 2_000_000.0,
        payout: Some(50.0),
        ..RawStockRecord::new("TURN3")
    };

    let scored = score_stock(&raw, BenchmarkRate::new(10.0));
    assert!(scored.strategies.contains(StockStrategy::Turnaround));
    assert!(scored.score >= 7.0, "score {}", scored.score);
    assert_eq!(scored.category, Some(DisplayCategory::Star));
}

#[test]
fn scenario_illiquid_brick_fund_is_not_star() {
    let raw = RawFundRecord {
        segment: "Logística".into(),
        price: 95.0,
        pb: 0.95,
        dividend_yield: 16.0,
        liquidity: 300_000.0,
        market_cap: 100_000_000.0,
        ..RawFundRecord::new("ILLQ11")
    };

    let scored = score_fund(&raw, None, BenchmarkRate::new(10.0));
    assert_eq!(scored.fund_type, FundType::Tijolo);
    assert_ne!(scored.category, DisplayCategory::Star);
}

#[test]
fn all_zero_records_score_without_panicking() {
    let stock = score_stock(&RawStockRecord::new("ZERO3"), BenchmarkRate::default());
    let fund = score_fund(&RawFundRecord::new("ZERO11"), None, BenchmarkRate::default());
    assert!(stock.score.is_finite());
    assert!((0.0..=10.0).contains(&fund.score));
}
