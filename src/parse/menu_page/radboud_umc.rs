use scraper::{ElementRef, Html};

use crate::parse::error::Result;
use crate::parse::text_from_selection::{inner_text, select_first};
use crate::static_selector;

/// One line per category of the accordion: `Soep: Tomatensoep, Erwtensoep`.
///
/// The UMC has a page per day, so there is no date to look for inside it.
pub fn parse(html: &str) -> Result<Vec<String>> {
    static_selector!(MENU_SELECTOR <- "ul.List-Clear.List-Divided.js-Accordion");

    let document = Html::parse_document(html);
    let menu = select_first(&MENU_SELECTOR, document.root_element(), "menu accordion")?;

    Ok(menu
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|entry| entry.value().name() == "li")
        .filter_map(category_line)
        .collect())
}

fn category_line(entry: ElementRef<'_>) -> Option<String> {
    static_selector!(CATEGORY_SELECTOR <- "button");
    static_selector!(DISH_SELECTOR <- "li");

    let Some(category) = entry.select(&CATEGORY_SELECTOR).next() else {
        log::debug!("Skipping menu entry without a category button");
        return None;
    };
    let dishes = entry
        .select(&DISH_SELECTOR)
        .map(inner_text)
        .filter(|dish| !dish.is_empty())
        .collect::<Vec<_>>();
    Some(format!("{}: {}", inner_text(category), dishes.join(", ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::Error;
    use std::fs;

    #[test]
    fn test_parse() {
        let html = fs::read_to_string("./src/parse/html_examples/radboud_umc.html").unwrap();
        let lines = parse(&html).expect("The example html should be valid");
        assert_eq!(
            lines,
            vec![
                "Soep: Tomatensoep, Mosterdsoep",
                "Warme maaltijd: Hachee met rode kool en aardappelen, Vegetarische quiche",
                "Dessert: Vanillevla",
            ]
        );
    }

    #[test]
    fn test_no_accordion() {
        let html = "<html><body><h1>Pagina niet gevonden</h1></body></html>";
        assert!(matches!(parse(html), Err(Error::HtmlParse(_))));
    }
}
