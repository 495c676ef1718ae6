//! Currency hand-off through the URL query string

/// Query parameter carrying the balance between windows
pub const CURRENCY_PARAM: &str = "currency";

/// Read the `currency` parameter from a query string (with or without `?`).
///
/// Leading digits are taken, so `"40abc"` reads as 40. Missing, empty,
/// negative or non-numeric values yield `None`. Values too large for a
/// `u64` saturate.
pub fn currency_from_query(query: &str) -> Option<u64> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let value = query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        (key == CURRENCY_PARAM).then_some(value)
    })?;

    let digits: &str = {
        let end = value
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(value.len());
        &value[..end]
    };
    if digits.is_empty() {
        return None;
    }
    // Only overflow can fail on a non-empty run of ASCII digits
    Some(digits.parse().unwrap_or(u64::MAX))
}

/// Balance to start a run with: the URL value, or 0
pub fn starting_currency(query: &str) -> u64 {
    currency_from_query(query).unwrap_or(0)
}

/// URL for the secondary room carrying the current balance
pub fn room_url(page: &str, currency: u64) -> String {
    format!("{page}?{CURRENCY_PARAM}={currency}")
}
