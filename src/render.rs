//! HTML display surface.
//!
//! The core components emit plain data; everything that touches markup lives
//! here. Every text field that reaches a page goes through [`escape_html`],
//! which covers all five reserved characters.

use crate::catalog::{DisplayConfig, Product};
use crate::listing::{DisplayItem, DisplayList};
use crate::pricing::{PriceBook, PricePanel};

/// Label of the per-item detail link on the list page.
const DETAIL_LABEL: &str = "詳細を見る";

/// Escape `&`, `<`, `>`, `"`, and `'` for safe embedding in HTML.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// The list page's result counter.
pub fn render_count(count: usize) -> String {
    format!("表示：{count}件")
}

fn render_tag_chips(tags: &[String]) -> String {
    if tags.is_empty() {
        return String::new();
    }
    let chips: Vec<String> = tags
        .iter()
        .map(|tag| format!("<span class=\"tag\">{}</span>", escape_html(tag)))
        .collect();
    format!("<p class=\"tags\">{}</p>\n", chips.join(" "))
}

/// One `<li>` entry per display item: name, tag chips, description, detail
/// link.
pub fn render_list_entries(items: &[DisplayItem]) -> String {
    items
        .iter()
        .map(|item| {
            format!(
                "<li>\n<h2>{name}</h2>\n{tags}<p>{desc}</p>\n<p><a class=\"btn\" href=\"{href}\">{label}</a></p>\n</li>",
                name = escape_html(&item.name),
                tags = render_tag_chips(&item.tags),
                desc = escape_html(&item.description),
                href = escape_html(&item.href),
                label = DETAIL_LABEL,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Complete list page: title, counter, entry list.
pub fn render_list_page(title: &str, list: &DisplayList) -> String {
    format!(
        "<!doctype html>\n<html lang=\"ja\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n</head>\n<body>\n<h1>{title}</h1>\n<p id=\"count\">{count}</p>\n<ul id=\"product-list\">\n{entries}\n</ul>\n</body>\n</html>\n",
        title = escape_html(title),
        count = render_count(list.count()),
        entries = render_list_entries(&list.items),
    )
}

/// The price region for one selection state.
pub fn render_price_region(panel: &PricePanel<'_>, display: &DisplayConfig) -> String {
    format!(
        "<p id=\"price\">{}</p>\n",
        escape_html(panel.current().text(display))
    )
}

/// Complete product detail page: name, tags, description, and one price row
/// per configured size. Unpriced products still render, with the
/// placeholder in the price column.
pub fn render_product_page(
    product: &Product,
    book: &PriceBook,
    display: &DisplayConfig,
) -> String {
    let sizes = book.sizes(&product.key);
    let mut panel = PricePanel::new(book, display, product.key.clone());
    let price_rows = if sizes.is_empty() {
        format!(
            "<p id=\"price\">{}</p>\n",
            escape_html(&display.price_placeholder)
        )
    } else {
        let rows: Vec<String> = sizes
            .iter()
            .map(|&size| {
                let shown = panel.select(size);
                format!(
                    "<li data-size=\"{size}\">{size}g: <span class=\"price\">{}</span></li>",
                    escape_html(shown.text(display))
                )
            })
            .collect();
        format!("<ul id=\"sizes\">\n{}\n</ul>\n", rows.join("\n"))
    };

    format!(
        "<!doctype html>\n<html lang=\"ja\">\n<head>\n<meta charset=\"utf-8\">\n<title>{name}</title>\n</head>\n<body data-product=\"{key}\">\n<h1>{name}</h1>\n{tags}<p>{desc}</p>\n{price_rows}<p><a href=\"index.html\">一覧へ戻る</a></p>\n</body>\n</html>\n",
        name = escape_html(&product.name),
        key = escape_html(product.key.as_str()),
        tags = render_tag_chips(&product.tags),
        desc = escape_html(&product.description),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_all_five_reserved_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn leaves_plain_text_untouched() {
        assert_eq!(escape_html("アールグレイ 100g"), "アールグレイ 100g");
    }

    #[test]
    fn list_entries_escape_every_field() {
        let items = vec![DisplayItem {
            key: "janat-9<9".into(),
            name: "A & B".to_string(),
            description: "\"quoted\"".to_string(),
            tags: vec!["<tag>".to_string()],
            href: "janat-9<9.html".to_string(),
        }];
        let html = render_list_entries(&items);
        assert!(html.contains("A &amp; B"));
        assert!(html.contains("&quot;quoted&quot;"));
        assert!(html.contains("&lt;tag&gt;"));
        assert!(html.contains("janat-9&lt;9.html"));
        assert!(!html.contains("<tag>"));
    }

    #[test]
    fn count_line_matches_display_convention() {
        assert_eq!(render_count(3), "表示：3件");
        assert_eq!(render_count(0), "表示：0件");
    }

    #[test]
    fn price_region_falls_back_to_the_placeholder() {
        let book = PriceBook::default();
        let display = DisplayConfig::default();
        let panel = PricePanel::new(&book, &display, "janat-000".into());
        assert_eq!(
            render_price_region(&panel, &display),
            "<p id=\"price\">価格未設定</p>\n"
        );
    }
}
