use crate::domain::Product;

/// Derives the filtered view: case-insensitive substring match against
/// name or description. A blank query (after trimming) returns the full
/// list. The filter is stable, so relative order always matches the
/// store snapshot. Pure function, cheap enough to run on every
/// keystroke.
pub fn apply(products: &[Product], query: &str) -> Vec<Product> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return products.to_vec();
    }

    products
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new("p1", "Milk", "1L full cream", 60.0, 10),
            Product::new("p2", "Bread", "whole wheat loaf", 45.0, 3),
            Product::new("p3", "Almond Milk", "unsweetened", 120.0, 7),
            Product::new("p4", "Eggs", "free range, dozen", 90.0, 12),
        ]
    }

    #[test]
    fn blank_query_returns_everything_in_order() {
        let products = catalog();
        assert_eq!(apply(&products, ""), products);
        assert_eq!(apply(&products, "   "), products);
        assert_eq!(apply(&products, "\t\n"), products);
    }

    #[test]
    fn match_is_case_insensitive_on_name() {
        let products = catalog();
        let view = apply(&products, "MILK");
        let ids: Vec<&str> = view.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p3"]);
    }

    #[test]
    fn match_covers_description_too() {
        let products = catalog();
        let view = apply(&products, "Wheat");
        let ids: Vec<&str> = view.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p2"]);
    }

    #[test]
    fn relative_order_is_preserved() {
        let products = catalog();
        // Matches p1 (name), p3 (name), p4 (description: "range" contains "ran"? no).
        let view = apply(&products, "e");
        let ids: Vec<&str> = view.iter().map(|p| p.id.as_str()).collect();
        // Every match in the original order, nothing re-sorted.
        let expected: Vec<&str> = products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains('e') || p.description.to_lowercase().contains('e')
            })
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn query_is_trimmed_before_matching() {
        let products = catalog();
        let view = apply(&products, "  bread  ");
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].id, "p2");
    }

    #[test]
    fn no_match_yields_empty_view() {
        let products = catalog();
        assert!(apply(&products, "durian").is_empty());
    }
}
