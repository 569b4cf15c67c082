//! Single-valued fund type classification.
//!
//! Each level of the cascade consults the enrichment labels first and the
//! discovery segment text second. Static ticker lists correct the funds the
//! discovery listing is known to mis-segment.

use super::lists::{is_known_fiagro, is_known_infra, is_never_infra};
use crate::domain::{EnrichmentRecord, FundType, Ticker};
use crate::scoring::text::{contains_any, fold};

const INFRA_SEGMENT: &[&str] = &["infra", "energia", "saneamento"];
const AGRO_WORDS: &[&str] = &["fiagro", "agro", "rural"];
const MULTI_META: &[&str] = &[
    "misto",
    "hibrido",
    "multimercado",
    "fundos de fundos",
    "fundo de fundos",
];
const MULTI_SEGMENT: &[&str] = &["multicategoria", "hibrido", "fundos", "mista"];
const PAPER_WORDS: &[&str] = &[
    "papel",
    "titulos",
    "recebiveis",
    "valores mobiliarios",
    "val. mob",
];
const PROPERTY_WORDS: &[&str] = &[
    "logistica",
    "galpoes",
    "shopping",
    "lajes",
    "escritorio",
    "hospital",
    "hotel",
    "residencial",
    "varejo",
];
const BRICK_META: &[&str] = &["tijolo", "renda"];

/// Classify a fund into exactly one [`FundType`].
///
/// `segment` is the discovery source's free text. Missing or empty
/// enrichment only narrows the evidence, it never fails.
pub fn classify_fund(
    ticker: &Ticker,
    segment: &str,
    enrichment: Option<&EnrichmentRecord>,
) -> FundType {
    let segment = fold(segment);
    let meta = enrichment.map(meta_text).unwrap_or_default();
    let symbol = ticker.as_str();

    let infra = meta.contains("infra")
        || contains_any(&segment, INFRA_SEGMENT)
        || is_known_infra(symbol);
    if infra && !is_never_infra(symbol) {
        return FundType::Infra;
    }

    if contains_any(&meta, AGRO_WORDS)
        || contains_any(&segment, AGRO_WORDS)
        || is_known_fiagro(symbol)
    {
        return FundType::Agro;
    }

    if contains_any(&meta, MULTI_META) || contains_any(&segment, MULTI_SEGMENT) {
        return FundType::Multi;
    }

    if contains_any(&meta, PAPER_WORDS) || contains_any(&segment, PAPER_WORDS) {
        return FundType::Papel;
    }

    if contains_any(&meta, BRICK_META)
        || contains_any(&meta, PROPERTY_WORDS)
        || contains_any(&segment, PROPERTY_WORDS)
    {
        return FundType::Tijolo;
    }

    FundType::Outros
}

/// Folded type, mandate and segment labels joined for matching.
fn meta_text(record: &EnrichmentRecord) -> String {
    [&record.fund_type, &record.mandate, &record.segment]
        .into_iter()
        .flatten()
        .map(|label| fold(label))
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(fund_type: &str, mandate: &str, segment: &str) -> EnrichmentRecord {
        let label = |s: &str| (!s.is_empty()).then(|| s.to_string());
        EnrichmentRecord {
            fund_type: label(fund_type),
            mandate: label(mandate),
            segment: label(segment),
            ..EnrichmentRecord::empty("TEST11")
        }
    }

    #[test]
    fn test_segment_text_fallback_without_enrichment() {
        let t = Ticker::from("ABCD11");
        assert_eq!(classify_fund(&t, "Logística", None), FundType::Tijolo);
        assert_eq!(classify_fund(&t, "Shoppings", None), FundType::Tijolo);
        assert_eq!(classify_fund(&t, "Títulos e Val. Mob.", None), FundType::Papel);
        assert_eq!(classify_fund(&t, "Híbrido", None), FundType::Multi);
        assert_eq!(classify_fund(&t, "Outros", None), FundType::Outros);
        assert_eq!(classify_fund(&t, "", None), FundType::Outros);
    }

    #[test]
    fn test_decomposed_segment_classifies_like_composed() {
        let t = Ticker::from("ABCD11");
        assert_eq!(classify_fund(&t, "Logi\u{301}stica", None), FundType::Tijolo);
        assert_eq!(classify_fund(&t, "Ti\u{301}tulos e Val. Mob.", None), FundType::Papel);
        assert_eq!(classify_fund(&t, "Hi\u{301}brido", None), FundType::Multi);
    }

    #[test]
    fn test_enrichment_beats_segment_text() {
        let t = Ticker::from("ABCD11");
        let record = meta("FIAGRO", "", "");
        assert_eq!(classify_fund(&t, "Títulos e Val. Mob.", Some(&record)), FundType::Agro);

        let record = meta("FII DE PAPEL", "Títulos e Valores Mobiliários", "Recebíveis");
        assert_eq!(classify_fund(&t, "Lajes Corporativas", Some(&record)), FundType::Papel);
    }

    #[test]
    fn test_infra_from_enrichment_and_segment() {
        let t = Ticker::from("ABCD11");
        assert_eq!(
            classify_fund(&t, "", Some(&meta("FI-INFRA", "", ""))),
            FundType::Infra
        );
        assert_eq!(classify_fund(&t, "Energia", None), FundType::Infra);
        assert_eq!(classify_fund(&Ticker::from("CDII11"), "", None), FundType::Infra);
    }

    #[test]
    fn test_never_infra_ignores_infra_text() {
        let t = Ticker::from("HGLG11");
        let record = meta("Infraestrutura", "", "Energia");
        let fund_type = classify_fund(&t, "Logística", Some(&record));
        assert_ne!(fund_type, FundType::Infra);
        assert_eq!(fund_type, FundType::Tijolo);
    }

    #[test]
    fn test_known_fiagro_overrides_generic_text() {
        let t = Ticker::from("SNAG11");
        assert_eq!(classify_fund(&t, "Outros", None), FundType::Agro);
        assert_eq!(classify_fund(&t, "Híbrido", None), FundType::Agro);
    }

    #[test]
    fn test_empty_enrichment_degrades_to_segment() {
        let t = Ticker::from("ABCD11");
        let empty = EnrichmentRecord::empty("ABCD11");
        assert_eq!(
            classify_fund(&t, "Hospital", Some(&empty)),
            classify_fund(&t, "Hospital", None)
        );
    }

    #[test]
    fn test_brick_mandate() {
        let t = Ticker::from("ABCD11");
        let record = meta("FII DE TIJOLO", "Renda", "Galpões");
        assert_eq!(classify_fund(&t, "Outros", Some(&record)), FundType::Tijolo);
    }
}
