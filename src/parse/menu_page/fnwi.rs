use chrono::{Duration, NaiveDate};
use scraper::Html;

use crate::date::long_date;
use crate::parse::error::Result;
use crate::parse::text_from_selection::{inner_text, inner_text_lower, select_first};
use crate::parse::Error;
use crate::static_selector;

/// The FNWI restaurant writes each day as loose paragraphs between two dated ones.
///
/// There is usually a single dish, so everything found is folded into one line.
pub fn parse(html: &str, date: NaiveDate) -> Result<Vec<String>> {
    static_selector!(CONTENT_SELECTOR <- "div.rol-inhoud");
    static_selector!(PARAGRAPH_SELECTOR <- "p");

    let document = Html::parse_document(html);
    let content = select_first(&CONTENT_SELECTOR, document.root_element(), "menu content")?;
    let today = long_date(date);
    let tomorrow = long_date(date + Duration::days(1));

    let mut paragraphs = content.select(&PARAGRAPH_SELECTOR);
    if !paragraphs.any(|p| inner_text_lower(p).contains(&today)) {
        return Err(Error::day_not_found(&today));
    }

    let text = paragraphs
        .take_while(|p| !inner_text_lower(*p).contains(&tomorrow))
        .map(inner_text)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    Ok(if text.is_empty() { vec![] } else { vec![text] })
}
