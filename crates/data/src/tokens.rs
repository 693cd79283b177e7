//! Registry of well-known tokens selectable in the dashboards.

use farmdash_domain::Token;

/// Tokens offered in the pair selector.
pub fn well_known() -> Vec<Token> {
    vec![
        Token::new("bitcoin", "BTC", "Bitcoin"),
        Token::new("ethereum", "ETH", "Ethereum"),
        Token::new("weth", "WETH", "Wrapped Ether"),
        Token::new("usd-coin", "USDC", "USD Coin"),
        Token::new("solana", "SOL", "Solana"),
    ]
}

/// Looks a token up by symbol or CoinGecko id, case-insensitively.
pub fn find(query: &str) -> Option<Token> {
    let query = query.to_lowercase();
    well_known()
        .into_iter()
        .find(|t| t.symbol.to_lowercase() == query || t.coingecko_id == query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_by_symbol() {
        assert_eq!(find("btc").unwrap().coingecko_id, "bitcoin");
        assert_eq!(find("WETH").unwrap().name, "Wrapped Ether");
    }

    #[test]
    fn test_find_by_id() {
        assert_eq!(find("usd-coin").unwrap().symbol, "USDC");
    }

    #[test]
    fn test_unknown_is_none() {
        assert!(find("dogecoin").is_none());
    }
}
