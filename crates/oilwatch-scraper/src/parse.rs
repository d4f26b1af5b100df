//! Thin helpers over the `scraper` document tree.
//!
//! Supplier selectors are configured as plain class names (possibly several,
//! space-separated) rather than raw CSS, so the translation to a `Selector`
//! lives here in one place.

use scraper::{ElementRef, Html, Selector};

pub(crate) fn parse_document(html: &str) -> Html {
    Html::parse_document(html)
}

/// Build a CSS selector for `tag.class1.class2`. Returns `None` when the
/// configured class names do not form a parseable selector.
fn class_selector(tag: Option<&str>, classes: &str) -> Option<Selector> {
    let mut css = tag.unwrap_or("").to_string();
    for class in classes.split_whitespace() {
        css.push('.');
        css.push_str(class);
    }
    Selector::parse(&css).ok()
}

/// All elements carrying every class in `classes` (and matching `tag`, when
/// given), in document order.
pub(crate) fn elements_by_class<'a>(
    doc: &'a Html,
    tag: Option<&str>,
    classes: &str,
) -> Vec<ElementRef<'a>> {
    match class_selector(tag, classes) {
        Some(selector) => doc.select(&selector).collect(),
        None => {
            tracing::warn!(classes, "unparseable class selector; matching nothing");
            Vec::new()
        }
    }
}

/// All elements carrying at least one class that starts with `prefix`, in
/// document order. Pricing-table widgets number their container classes per
/// table (`…_0`, `…_1`), so exact-class matching cannot reach them.
pub(crate) fn elements_by_class_prefix<'a>(doc: &'a Html, prefix: &str) -> Vec<ElementRef<'a>> {
    let any = Selector::parse("*").expect("valid selector");
    doc.select(&any)
        .filter(|el| el.value().classes().any(|c| c.starts_with(prefix)))
        .collect()
}

/// First descendant of `el` carrying every class in `classes`.
pub(crate) fn first_descendant_by_class<'a>(
    el: ElementRef<'a>,
    classes: &str,
) -> Option<ElementRef<'a>> {
    let selector = class_selector(None, classes)?;
    el.select(&selector).next()
}

/// Concatenated text content of an element, trimmed. Matches the flattened
/// text a human sees, with child-node boundaries removed.
pub(crate) fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}
