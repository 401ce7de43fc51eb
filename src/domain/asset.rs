/// Asset Identifiers - Core Domain Types
///
/// Tickers, account principals and external asset addresses. These are the
/// opaque identifiers every other component is keyed on. Tickers are
/// fixed-width byte strings (the host hands them over as padded byte arrays),
/// accounts are unforgeable principals supplied by the execution environment.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Width of a ticker in bytes. Shorter names are NUL-padded.
pub const TICKER_WIDTH: usize = 8;

/// Fixed-width asset identifier.
///
/// Equality is exact byte comparison; the padding participates, so
/// `"ETH"` and `"ETH\0"` built through [`Ticker::new`] compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticker([u8; TICKER_WIDTH]);

/// The reserved settlement asset. All order prices are quoted in it.
pub const BASE_TICKER: Ticker = Ticker(*b"ETH\0\0\0\0\0");

impl Ticker {
    /// Builds a ticker from an ASCII name.
    ///
    /// # Panics
    /// Panics if `name` is longer than [`TICKER_WIDTH`] bytes. Use
    /// [`Ticker::try_new`] for untrusted input.
    pub fn new(name: &str) -> Self {
        match Self::try_new(name) {
            Ok(ticker) => ticker,
            Err(reason) => panic!("invalid ticker {:?}: {}", name, reason),
        }
    }

    /// Fallible constructor for tickers arriving from the outside.
    pub fn try_new(name: &str) -> Result<Self, &'static str> {
        let bytes = name.as_bytes();
        if bytes.len() > TICKER_WIDTH {
            return Err("ticker longer than 8 bytes");
        }
        if bytes.is_empty() {
            return Err("ticker is empty");
        }
        let mut padded = [0u8; TICKER_WIDTH];
        padded[..bytes.len()].copy_from_slice(bytes);
        Ok(Ticker(padded))
    }

    /// The ticker name with trailing padding stripped.
    pub fn as_str(&self) -> &str {
        let end = self
            .0
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(TICKER_WIDTH);
        // Constructors only accept &str, so the prefix is valid UTF-8.
        std::str::from_utf8(&self.0[..end]).unwrap_or("")
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Ticker {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Ticker {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ticker::try_new(&name).map_err(de::Error::custom)
    }
}

/// Opaque caller principal. The host environment guarantees it cannot be
/// forged; the engine treats it as the account on every mutating operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountId(pub u64);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "account#{}", self.0)
    }
}

/// Reference to the external asset contract a ticker resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetAddress(pub u64);

impl fmt::Display for AssetAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016x}", self.0)
    }
}

/// Order side, distinguishing bids from asks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// The side a counter-order would rest on.
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => f.write_str("BUY"),
            Side::Sell => f.write_str("SELL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_padding_is_canonical() {
        let a = Ticker::new("USDT");
        let b = Ticker::try_new("USDT").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "USDT");
        assert_eq!(a.to_string(), "USDT");
    }

    #[test]
    fn test_ticker_rejects_oversized_names() {
        assert!(Ticker::try_new("TOOLONGNAME").is_err());
        assert!(Ticker::try_new("").is_err());
        assert!(Ticker::try_new("12345678").is_ok());
    }

    #[test]
    fn test_base_ticker_matches_literal() {
        assert_eq!(BASE_TICKER, Ticker::new("ETH"));
        assert_ne!(BASE_TICKER, Ticker::new("USDT"));
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.opposite(), Side::Buy);
    }

    #[test]
    fn test_ticker_serializes_as_string() {
        let json = serde_json::to_string(&Ticker::new("LINK")).unwrap();
        assert_eq!(json, "\"LINK\"");
        let back: Ticker = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Ticker::new("LINK"));
    }
}
