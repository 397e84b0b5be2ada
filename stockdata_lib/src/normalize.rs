//! Field-name normalization from camel case to snake case.

/// Converts a camel-case field name to snake case.
///
/// An underscore is inserted before every uppercase ASCII letter that either
/// follows a lowercase ASCII letter, or is followed by a character that is
/// not uppercase. The second rule splits an acronym from the word after it
/// (`HTTPResponse` becomes `http_response`) while keeping a trailing acronym
/// whole (`PE` stays `pe`). The result is lowercased and stripped of leading
/// and trailing underscores, so snake-case input comes back unchanged.
pub fn camel_to_snake(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let mut out = String::with_capacity(key.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() {
            let after_lower = i > 0 && chars[i - 1].is_ascii_lowercase();
            let starts_word = chars
                .get(i + 1)
                .map(|next| !next.is_ascii_uppercase())
                .unwrap_or(false);
            if after_lower || starts_word {
                out.push('_');
            }
        }
        out.push(c);
    }
    out.to_lowercase().trim_matches('_').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pascal_case() {
        assert_eq!(camel_to_snake("MarketCap"), "market_cap");
        assert_eq!(camel_to_snake("Ticker"), "ticker");
    }

    #[test]
    fn camel_case() {
        assert_eq!(camel_to_snake("previousClosePrice"), "previous_close_price");
        assert_eq!(camel_to_snake("dayHigh"), "day_high");
    }

    #[test]
    fn acronym_followed_by_word() {
        assert_eq!(camel_to_snake("HTTPResponse"), "http_response");
        assert_eq!(camel_to_snake("EPSGrowth"), "eps_growth");
    }

    #[test]
    fn trailing_acronym_stays_whole() {
        assert_eq!(camel_to_snake("EPS"), "eps");
        assert_eq!(camel_to_snake("peRatioTTM"), "pe_ratio_ttm");
    }

    #[test]
    fn underscore_separated_capitals() {
        assert_eq!(camel_to_snake("P_E"), "p_e");
        assert_eq!(camel_to_snake("Price_E"), "price_e");
    }

    #[test]
    fn digits_do_not_count_as_lowercase() {
        assert_eq!(camel_to_snake("52WeekHigh"), "52_week_high");
        assert_eq!(camel_to_snake("52_week_low"), "52_week_low");
    }

    #[test]
    fn snake_case_is_unchanged() {
        for key in ["market_cap", "price", "is_extended_hours_price", "p_e", ""] {
            assert_eq!(camel_to_snake(key), key);
        }
    }

    #[test]
    fn idempotent() {
        for key in ["MarketCap", "HTTPResponse", "52WeekHigh", "P_E", "EPSGrowth"] {
            let once = camel_to_snake(key);
            assert_eq!(camel_to_snake(&once), once);
        }
    }

    #[test]
    fn strips_outer_underscores() {
        assert_eq!(camel_to_snake("_Private_"), "private");
    }
}
