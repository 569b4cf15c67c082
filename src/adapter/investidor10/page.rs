//! Parsers for Investidor10 pages.

use scraper::{ElementRef, Html, Selector};

use crate::adapter::parse::{parse_br_number, selector, text_of};
use crate::domain::{DividendEvent, EnrichmentRecord, Ticker, TreasuryBond};
use crate::error::Result;

use super::SOURCE;

/// Asset page: labeled description rows, header cards and the dividend table.
pub fn parse_asset_page(ticker: &Ticker, html: &str) -> Result<EnrichmentRecord> {
    let document = Html::parse_document(html);
    let mut record = EnrichmentRecord::empty(ticker.clone());

    let desc = selector(SOURCE, ".desc")?;
    let name = selector(SOURCE, ".name")?;
    let value = selector(SOURCE, ".value span")?;
    for row in document.select(&desc) {
        let label = first_text(row, &name).to_uppercase();
        let text = first_text(row, &value);
        match label.as_str() {
            "ÚLTIMO RENDIMENTO" => record.last_dividend = Some(parse_br_number(&text)),
            "TIPO DE FUNDO" => record.fund_type = Some(text),
            "SEGMENTO" => record.segment = Some(text),
            "MANDATO" => record.mandate = Some(text),
            _ => {}
        }
    }

    if let Some(latest) = parse_dividend_rows(&document, 3)?.into_iter().next() {
        record.ex_date = Some(latest.ex_date);
        record.payment_date = Some(latest.payment_date);
    }

    let cards = CardReader::new(&document)?;
    record.valuation.price = cards.value("COTAÇÃO");
    record.valuation.dividend_yield = cards.value("DY");
    record.valuation.pb = cards.value("P/VP");
    record.valuation.liquidity = cards.value("LIQUIDEZ DIÁRIA");
    record.valuation.vacancy = cards.value("VACÂNCIA");

    Ok(record.sanitized())
}

/// Every distribution listed in the dividend table.
pub fn parse_dividend_history(html: &str) -> Result<Vec<DividendEvent>> {
    let document = Html::parse_document(html);
    parse_dividend_rows(&document, 4)
}

/// Bond offers from the Tesouro Direto listing.
///
/// Some layouts prefix each row with a rank column; those rows are shifted.
pub fn parse_treasury(html: &str) -> Result<Vec<TreasuryBond>> {
    let document = Html::parse_document(html);
    let rows = selector(SOURCE, "table tr")?;
    let cells = selector(SOURCE, "td")?;

    let bonds = document
        .select(&rows)
        .filter_map(|row| {
            let columns: Vec<String> = row.select(&cells).map(text_of).collect();
            let first = columns.first()?;
            let offset = usize::from(first.chars().all(|c| c.is_ascii_digit()) || first.len() < 3);
            let col = |i: usize| columns.get(i + offset).cloned().unwrap_or_default();

            let name = col(0);
            name.contains("Tesouro").then(|| TreasuryBond {
                name,
                rate: col(1),
                min_invest: col(2),
                price: col(3),
                maturity: col(4),
            })
        })
        .collect();

    Ok(bonds)
}

/// Tickers linked from a listing page under `/{section}/{ticker}/`.
pub fn parse_listing(html: &str, section: &str) -> Result<Vec<Ticker>> {
    let document = Html::parse_document(html);
    let links = selector(SOURCE, "a[href]")?;
    let cards = selector(SOURCE, ".actions .ticker")?;

    let mut tickers: Vec<Ticker> = document
        .select(&links)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| ticker_from_href(href, section))
        .collect();
    tickers.extend(
        document
            .select(&cards)
            .map(|el| Ticker::new(text_of(el)))
            .filter(|t| !t.is_empty()),
    );

    let mut seen = std::collections::HashSet::new();
    tickers.retain(|t| seen.insert(t.clone()));
    Ok(tickers)
}

fn ticker_from_href(href: &str, section: &str) -> Option<Ticker> {
    let mut parts = href.trim_end_matches('/').rsplit('/');
    let symbol = parts.next()?;
    let parent = parts.next()?;
    let valid = parent == section
        && (4..=7).contains(&symbol.len())
        && symbol.chars().all(|c| c.is_ascii_alphanumeric());
    valid.then(|| Ticker::new(symbol))
}

fn parse_dividend_rows(document: &Html, min_cells: usize) -> Result<Vec<DividendEvent>> {
    let tables = selector(SOURCE, "table")?;
    let rows = selector(SOURCE, "tbody tr")?;
    let cells = selector(SOURCE, "td")?;

    let Some(table) = document.select(&tables).find(|table| {
        let text = text_of(*table).to_uppercase();
        text.contains("DATA COM") && text.contains("PAGAMENTO")
    }) else {
        return Ok(Vec::new());
    };

    let events = table
        .select(&rows)
        .filter_map(|row| {
            let columns: Vec<String> = row.select(&cells).map(text_of).collect();
            if columns.len() < min_cells {
                return None;
            }
            let ex_date = columns[1].clone();
            if ex_date.is_empty() || ex_date == "-" {
                return None;
            }
            Some(DividendEvent {
                kind: columns[0].clone(),
                ex_date,
                payment_date: columns[2].clone(),
                value: columns.get(3).map_or(0.0, |v| parse_br_number(v)),
            })
        })
        .collect();

    Ok(events)
}

fn first_text(element: ElementRef<'_>, selector: &Selector) -> String {
    element
        .select(selector)
        .next()
        .map(text_of)
        .unwrap_or_default()
}

/// Header cards (`._card`) keyed by their header label.
struct CardReader<'a> {
    cards: Vec<(String, ElementRef<'a>)>,
    value: Selector,
    body: Selector,
}

impl<'a> CardReader<'a> {
    fn new(document: &'a Html) -> Result<Self> {
        let card = selector(SOURCE, "._card")?;
        let header = selector(SOURCE, "._card-header span")?;
        let cards = document
            .select(&card)
            .map(|el| (first_text(el, &header).to_uppercase(), el))
            .collect();
        Ok(Self {
            cards,
            value: selector(SOURCE, "._card-body span.value")?,
            body: selector(SOURCE, "._card-body span")?,
        })
    }

    fn value(&self, label: &str) -> f64 {
        self.cards
            .iter()
            .find(|(header, _)| header.contains(label))
            .map(|(_, card)| {
                let text = first_text(*card, &self.value);
                if text.is_empty() {
                    first_text(*card, &self.body)
                } else {
                    text
                }
            })
            .map_or(0.0, |text| parse_br_number(&text))
    }
}
