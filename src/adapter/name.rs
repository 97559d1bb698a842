//! Adapter name resolution.
//!
//! Normalizes an adapter type identifier (typically `std::any::type_name`)
//! into the canonical lowercase, underscore-delimited name used as the
//! cache/config namespace and as the event name prefix.

/// Resolve an adapter identifier into its canonical snake_case name.
///
/// Every character outside `[A-Za-z0-9]` becomes `_`, camelCase is split in
/// the last path segment only (the leaf type name), underscore runs are
/// collapsed and the result is lowercased. Pure and idempotent.
///
/// ```
/// use restbound::adapter::resolve_adapter_name;
///
/// assert_eq!(
///     resolve_adapter_name("Customer\\GetOrderAdapter"),
///     "customer_get_order_adapter"
/// );
/// ```
pub fn resolve_adapter_name(identifier: &str) -> String {
    let normalized: String = identifier
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();

    let mut parts: Vec<String> = normalized.split('_').map(str::to_string).collect();
    if let Some(last) = parts.last_mut() {
        *last = split_camel(last);
    }
    let joined = parts.join("_");

    let mut out = String::with_capacity(joined.len());
    let mut previous_was_underscore = false;
    for c in joined.chars() {
        if c == '_' {
            if !previous_was_underscore {
                out.push('_');
            }
            previous_was_underscore = true;
        } else {
            out.push(c.to_ascii_lowercase());
            previous_was_underscore = false;
        }
    }

    out.trim_matches('_').to_string()
}

/// Insert `_` before an interior uppercase letter preceded by a word char.
fn split_camel(part: &str) -> String {
    let mut out = String::with_capacity(part.len() + 4);
    let mut previous: Option<char> = None;
    for c in part.chars() {
        if c.is_ascii_uppercase() && previous.is_some_and(|p| p.is_ascii_alphanumeric()) {
            out.push('_');
        }
        out.push(c);
        previous = Some(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_camel_case_in_leaf_segment_only() {
        assert_eq!(
            resolve_adapter_name("Customer\\GetOrderAdapter"),
            "customer_get_order_adapter"
        );
        assert_eq!(
            resolve_adapter_name("restbound::tests::CreateOrderAdapter"),
            "restbound_tests_create_order_adapter"
        );
    }

    #[test]
    fn collapses_runs_and_trims_edges() {
        assert_eq!(resolve_adapter_name("  Foo--Bar__Baz  "), "foo_bar_baz");
        assert_eq!(resolve_adapter_name("\\Leading\\Trailing\\"), "leading_trailing");
    }

    #[test]
    fn is_idempotent() {
        for id in [
            "Customer\\GetOrderAdapter",
            "crate::module::HTTPAdapter",
            "weird   name!!With2Digits",
        ] {
            let once = resolve_adapter_name(id);
            assert_eq!(resolve_adapter_name(&once), once);
        }
    }

    #[test]
    fn output_charset_is_constrained() {
        let resolved = resolve_adapter_name("Some!Very@Weird#Identifier$Name2X");
        assert!(resolved.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
        assert!(!resolved.contains("__"));
        assert!(!resolved.starts_with('_') && !resolved.ends_with('_'));
    }

    #[test]
    fn digits_count_as_word_characters() {
        assert_eq!(resolve_adapter_name("Orders2X"), "orders2_x");
    }
}
