//! Tickers the primary fund listing is known to mis-segment.

/// Brick and paper funds whose segment text reads "infrastructure-adjacent".
pub const NEVER_INFRA: &[&str] = &[
    "MXRF11", "HGLG11", "KNRI11", "XPLG11", "VISC11", "VINO11", "BCFF11", "XPML11", "BTLG11",
    "TRXF11", "KNCR11", "RECR11",
];

/// Fiagro funds.
pub const KNOWN_FIAGROS: &[&str] = &[
    "SNAG11", "KNCA11", "VGIA11", "RURA11", "FGAA11", "RZAG11", "OIAG11", "AGRX11", "NCRA11",
    "XPCA11", "BTRA11", "VCRA11", "BBGO11",
];

/// Law 12.431 infrastructure funds.
pub const KNOWN_INFRAS: &[&str] = &[
    "BDIF11", "JURO11", "KDIF11", "CPTI11", "VIGT11", "BIDB11", "CDII11", "IFRA11", "IFRI11",
    "BINC11", "BODB11", "JMBI11", "XPID11", "ISNT11", "ISEN11", "ISTT11", "DIVS11", "VINF11",
    "NUIF11", "RBIF11", "SNID11", "VANG11",
];

pub fn is_never_infra(ticker: &str) -> bool {
    NEVER_INFRA.contains(&ticker)
}

pub fn is_known_fiagro(ticker: &str) -> bool {
    KNOWN_FIAGROS.contains(&ticker)
}

pub fn is_known_infra(ticker: &str) -> bool {
    KNOWN_INFRAS.contains(&ticker)
}
