use super::{remove_excess_whitespace, Error};
use scraper::{ElementRef, Selector};

/// First element matching `selector` below `element`.
pub fn select_first<'a>(
    selector: &Selector,
    element: ElementRef<'a>,
    label: &str,
) -> Result<ElementRef<'a>, Error> {
    element
        .select(selector)
        .next()
        .ok_or_else(|| Error::html_parse_error(&format!("{label} not found")))
}

/// All text below `element`, whitespace normalised.
pub fn inner_text(element: ElementRef<'_>) -> String {
    let text: String = element.text().collect();
    remove_excess_whitespace(&text).into_owned()
}

/// Lowercased [`inner_text`], for matching against dates.
pub fn inner_text_lower(element: ElementRef<'_>) -> String {
    inner_text(element).to_lowercase()
}
