use serde::{Deserialize, Serialize};

/// An asset identified by its market-data provider id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub coingecko_id: String,
    pub symbol: String,
    pub name: String,
}

impl Token {
    pub fn new(
        coingecko_id: impl Into<String>,
        symbol: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            coingecko_id: coingecko_id.into(),
            symbol: symbol.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.symbol)
    }
}
