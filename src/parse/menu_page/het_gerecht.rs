use chrono::NaiveDate;
use scraper::Html;

use crate::date::long_date;
use crate::parse::error::Result;
use crate::parse::text_from_selection::{inner_text, inner_text_lower, select_first};
use crate::parse::Error;
use crate::static_selector;

/// Het Gerecht publishes a week per page: a `<p>` per day followed by the dishes as `<li>`s.
pub fn parse(html: &str, date: NaiveDate) -> Result<Vec<String>> {
    static_selector!(CONTENT_SELECTOR <- "div.rol-inhoud");
    static_selector!(NODE_SELECTOR <- "p, li");

    let document = Html::parse_document(html);
    let content = select_first(&CONTENT_SELECTOR, document.root_element(), "menu content")?;
    let today = long_date(date);

    let mut describes_today = false;
    let mut lines = vec![];
    for node in content.select(&NODE_SELECTOR) {
        if node.value().name() == "p" {
            // the next day's heading ends ours
            if describes_today {
                break;
            }
            describes_today = inner_text_lower(node).contains(&today);
            continue;
        }
        if describes_today {
            let line = inner_text(node);
            if !line.is_empty() {
                lines.push(line);
            }
        }
    }

    if describes_today {
        Ok(lines)
    } else {
        Err(Error::day_not_found(&today))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn page() -> String {
        fs::read_to_string("./src/parse/html_examples/het_gerecht.html").unwrap()
    }

    #[test]
    fn test_parse_day_in_week() {
        let date = NaiveDate::from_ymd_opt(2019, 1, 16).unwrap();
        let lines = parse(&page(), date).expect("The example html should be valid");
        assert_eq!(
            lines,
            vec![
                "Soep: Tomatensoep",
                "Hoofdgerecht: Kipsaté met friet en atjar",
                "Vegetarisch: Groentecurry met rijst",
            ]
        );
    }

    #[test]
    fn test_parse_last_day_of_week() {
        let date = NaiveDate::from_ymd_opt(2019, 1, 18).unwrap();
        let lines = parse(&page(), date).unwrap();
        assert_eq!(lines, vec!["Vis: Kibbeling met remoulade", "Vegetarisch: Falafel wrap"]);
    }

    #[test]
    fn test_day_missing() {
        let date = NaiveDate::from_ymd_opt(2019, 1, 19).unwrap();
        assert_eq!(
            parse(&page(), date),
            Err(Error::day_not_found("zaterdag 19 januari"))
        );
    }

    #[test]
    fn test_markup_changed() {
        let date = NaiveDate::from_ymd_opt(2019, 1, 16).unwrap();
        assert!(matches!(
            parse("<html><body><p>Onderhoud</p></body></html>", date),
            Err(Error::HtmlParse(_))
        ));
    }
}
