//! String transformation utilities for naming generated types

/// Split an identifier into lowercase words.
///
/// Word boundaries are separators (`-`, `_`, space, `/`, `.`) and lower-to-upper
/// case transitions. Runs of capitals stay together (`HTTPResponse` -> `httpresponse`).
fn words(s: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_is_lowercase = false;

    for ch in s.chars() {
        if ch.is_alphanumeric() {
            if ch.is_uppercase() && prev_is_lowercase && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            current.extend(ch.to_lowercase());
            prev_is_lowercase = ch.is_lowercase() || ch.is_ascii_digit();
        } else {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_is_lowercase = false;
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// Convert a string to snake_case
pub fn to_snake_case(s: &str) -> String {
    words(s).join("_")
}

/// Convert a string to UpperCamelCase (PascalCase)
pub fn to_upper_camel_case(s: &str) -> String {
    words(s).iter().map(|w| capitalize(w)).collect()
}

/// Convert a string to lowerCamelCase
pub fn to_lower_camel_case(s: &str) -> String {
    let words = words(s);
    let mut iter = words.iter();
    match iter.next() {
        None => String::new(),
        Some(first) => first.clone() + &iter.map(|w| capitalize(w)).collect::<String>(),
    }
}

/// Derive a type-name stem for an endpoint.
///
/// Uses the path segments of `url`, skipping a leading `api`, version segments
/// (`v1`, `v2`, ...) and path parameters (`{id}`, `:id`). Falls back to the
/// endpoint name and finally to `Endpoint`.
pub fn type_name_for(url: &str, name: &str) -> String {
    let path_segments: Vec<&str> = url
        .split('/')
        .filter(|seg| !seg.is_empty())
        .filter(|seg| !seg.starts_with('{') && !seg.starts_with(':'))
        .filter(|seg| !is_version_segment(seg))
        .collect();
    let segments = match path_segments.first() {
        Some(first) if first.eq_ignore_ascii_case("api") => &path_segments[1..],
        _ => &path_segments[..],
    };

    let from_url: String = segments
        .iter()
        .filter(|seg| !seg.contains(':'))
        .map(|seg| to_upper_camel_case(seg))
        .collect();
    if !from_url.is_empty() && !starts_with_digit(&from_url) {
        return from_url;
    }

    let from_name = to_upper_camel_case(name);
    if !from_name.is_empty() && from_name.is_ascii() && !starts_with_digit(&from_name) {
        return from_name;
    }

    "Endpoint".to_string()
}

fn is_version_segment(seg: &str) -> bool {
    let mut chars = seg.chars();
    matches!(chars.next(), Some('v' | 'V'))
        && seg.len() > 1
        && chars.all(|c| c.is_ascii_digit() || c == '.')
}

fn starts_with_digit(s: &str) -> bool {
    s.chars().next().is_some_and(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("accountId"), "account_id");
        assert_eq!(to_snake_case("WalletBalance"), "wallet_balance");
        assert_eq!(to_snake_case("order-items"), "order_items");
        assert_eq!(to_snake_case("created_at"), "created_at");
        assert_eq!(to_snake_case("URLPath"), "urlpath");
        assert_eq!(to_snake_case("parseJSONBody"), "parse_jsonbody");
        assert_eq!(to_snake_case("user.profile name"), "user_profile_name");
    }

    #[test]
    fn test_to_upper_camel_case() {
        assert_eq!(to_upper_camel_case("account_id"), "AccountId");
        assert_eq!(to_upper_camel_case("walletBalance"), "WalletBalance");
        assert_eq!(to_upper_camel_case("account-info"), "AccountInfo");
        assert_eq!(to_upper_camel_case("ORDER_ITEMS"), "OrderItems");
    }

    #[test]
    fn test_to_lower_camel_case() {
        assert_eq!(to_lower_camel_case("wallet_balance"), "walletBalance");
        assert_eq!(to_lower_camel_case("AccountCreate"), "accountCreate");
        assert_eq!(to_lower_camel_case("account_id"), "accountId");
        assert_eq!(to_lower_camel_case(""), "");
    }

    #[test]
    fn test_type_name_from_url() {
        assert_eq!(type_name_for("/api/user/account-info", ""), "UserAccountInfo");
        assert_eq!(type_name_for("/api/v2/orders/{orderId}/items", ""), "OrdersItems");
        assert_eq!(type_name_for("/api/users/:id", ""), "Users");
        assert_eq!(type_name_for("/wallet/balance", ""), "WalletBalance");
    }

    #[test]
    fn test_type_name_fallbacks() {
        assert_eq!(type_name_for("/api", "Query balance"), "QueryBalance");
        assert_eq!(type_name_for("", "查询余额"), "Endpoint");
        assert_eq!(type_name_for("", ""), "Endpoint");
    }
}
