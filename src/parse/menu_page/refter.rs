use chrono::NaiveDate;
use scraper::{ElementRef, Html};

use crate::date::long_date;
use crate::parse::error::Result;
use crate::parse::text_from_selection::{inner_text, inner_text_lower, select_first};
use crate::parse::Error;
use crate::static_selector;

/// De Refter lists the soup of the week: a dated `<p>` with the list right after it.
pub fn parse(html: &str, date: NaiveDate) -> Result<Vec<String>> {
    static_selector!(CONTENT_SELECTOR <- "div.rol-inhoud");
    static_selector!(HEADING_SELECTOR <- "p");
    static_selector!(ITEM_SELECTOR <- "li");

    let document = Html::parse_document(html);
    let content = select_first(&CONTENT_SELECTOR, document.root_element(), "menu content")?;
    let today = long_date(date);

    let heading = content
        .select(&HEADING_SELECTOR)
        .find(|p| inner_text_lower(*p).contains(&today))
        .ok_or_else(|| Error::day_not_found(&today))?;

    Ok(heading
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .take_while(|sibling| sibling.value().name() != "p")
        .flat_map(|list| list.select(&ITEM_SELECTOR))
        .map(inner_text)
        .filter(|line| !line.is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn page() -> String {
        fs::read_to_string("./src/parse/html_examples/refter.html").unwrap()
    }

    #[test]
    fn test_parse() {
        let date = NaiveDate::from_ymd_opt(2019, 1, 15).unwrap();
        let lines = parse(&page(), date).expect("The example html should be valid");
        assert_eq!(lines, vec!["Pompoensoep", "Broodje kroket"]);
    }

    #[test]
    fn test_parse_other_day() {
        let date = NaiveDate::from_ymd_opt(2019, 1, 14).unwrap();
        let lines = parse(&page(), date).unwrap();
        assert_eq!(lines, vec!["Uiensoep"]);
    }

    #[test]
    fn test_day_missing() {
        let date = NaiveDate::from_ymd_opt(2019, 1, 20).unwrap();
        assert!(matches!(parse(&page(), date), Err(Error::DayNotFound(_))));
    }
}
