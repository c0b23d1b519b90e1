//! Projects the filtered view into list markup.
//!
//! Full rebuild semantics: every call reconstructs the whole fragment
//! from the view it is given. Row identity is carried by the `data-id`
//! attribute, so a keyed-reconciliation renderer could be swapped in
//! without changing what callers observe.

use crate::domain::Product;

/// Display-only threshold; nothing enforces it beyond the badge class.
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// Escapes text for interpolation into markup. Applied to every
/// user-supplied field before it reaches the fragment.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Formats a price as rupees with grouped thousands and exactly two
/// fraction digits, e.g. `₹1,234.50`.
pub fn format_price(price: f64) -> String {
    let fixed = format!("{price:.2}");
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && ch.is_ascii_digit() && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*ch);
    }

    format!("\u{20b9}{grouped}.{frac_part}")
}

/// Builds the product list fragment for the given view.
///
/// An empty view yields the empty-state indicator and no list at all;
/// otherwise there is exactly one `<li>` per product, in view order.
pub fn render(view: &[Product]) -> String {
    if view.is_empty() {
        return "<p class=\"empty-state\">No products to show.</p>\n".to_string();
    }

    let mut markup = String::from("<ul id=\"product-list\">\n");
    for product in view {
        markup.push_str(&render_row(product));
    }
    markup.push_str("</ul>\n");
    markup
}

fn render_row(product: &Product) -> String {
    let stock_class = if product.qty <= LOW_STOCK_THRESHOLD {
        "stock low-stock"
    } else {
        "stock"
    };

    format!(
        concat!(
            "  <li data-id=\"{id}\">\n",
            "    <span class=\"details\">{name} : {description} : {price}</span>\n",
            "    <span class=\"{stock_class}\">{qty} in stock</span>\n",
            "    <button data-action=\"buy\" data-amount=\"1\">Buy 1</button>\n",
            "    <button data-action=\"buy\" data-amount=\"2\">Buy 2</button>\n",
            "    <button data-action=\"buy\" data-amount=\"3\">Buy 3</button>\n",
            "    <button data-action=\"delete\">Delete</button>\n",
            "  </li>\n",
        ),
        id = escape(&product.id),
        name = escape(&product.name),
        description = escape(&product.description),
        price = format_price(product.price),
        stock_class = stock_class,
        qty = product.qty,
    )
}
