// Search results page parsing driven by per-source CSS selectors
use crate::config::SelectorConfig;
use crate::model::{ParserError, RawListing, RawPrice};
use crate::parser::Parser;
use scraper::{ElementRef, Html, Selector};

pub struct HtmlListingParser {
    item: Selector,
    title: Selector,
    price: Selector,
    link: Selector,
    image: Option<Selector>,
    description: Option<Selector>,
}

fn compile(css: &str) -> Result<Selector, ParserError> {
    Selector::parse(css).map_err(|e| ParserError::HtmlParseError(format!("{}: {}", css, e)))
}

impl HtmlListingParser {
    pub fn new(selectors: &SelectorConfig) -> Result<Self, ParserError> {
        Ok(Self {
            item: compile(&selectors.item)?,
            title: compile(&selectors.title)?,
            price: compile(&selectors.price)?,
            link: compile(&selectors.link)?,
            image: selectors.image.as_deref().map(compile).transpose()?,
            description: selectors.description.as_deref().map(compile).transpose()?,
        })
    }

    fn parse_item(&self, element: ElementRef<'_>) -> Option<RawListing> {
        let title = element
            .select(&self.title)
            .next()
            .map(element_text)
            .filter(|t| !t.is_empty())?;

        let price = element
            .select(&self.price)
            .next()
            .map(element_text)
            .filter(|t| !t.is_empty())
            .map(RawPrice::Text)
            .unwrap_or_default();

        // cards that are themselves anchors carry the href on the item
        let link = element
            .select(&self.link)
            .find_map(|a| a.value().attr("href"))
            .or_else(|| element.value().attr("href"))
            .map(|href| href.trim().to_string())
            .filter(|href| !href.is_empty());

        let image = self.image.as_ref().and_then(|sel| {
            element.select(sel).next().and_then(|img| {
                img.value()
                    .attr("src")
                    .or_else(|| img.value().attr("data-src"))
                    .map(str::to_string)
            })
        });

        let description = self
            .description
            .as_ref()
            .and_then(|sel| element.select(sel).next())
            .map(element_text)
            .filter(|d| !d.is_empty());

        Some(RawListing {
            title,
            price,
            link,
            image,
            description,
        })
    }
}

impl Parser for HtmlListingParser {
    fn parse(&self, html: &str) -> Result<Vec<RawListing>, ParserError> {
        let document = Html::parse_document(html);
        Ok(document
            .select(&self.item)
            .filter_map(|element| self.parse_item(element))
            .collect())
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selectors() -> SelectorConfig {
        SelectorConfig {
            item: "div.card".into(),
            title: "h2".into(),
            price: ".price".into(),
            link: "a.link".into(),
            image: Some("img".into()),
            description: Some(".desc".into()),
        }
    }

    const PAGE: &str = r#"
        <html><body>
          <div class="card">
            <a class="link" href="/p/1">ver</a>
            <h2>  Leite em pó
                  Ninho 400g </h2>
            <span class="price">R$ <b>19</b>,90</span>
            <img data-src="https://img.example/1.jpg">
            <p class="desc">Integral</p>
          </div>
          <div class="card">
            <h2>Leite em pó Itambé</h2>
          </div>
          <div class="card">
            <span class="price">R$ 5,00</span>
          </div>
        </body></html>
    "#;

    #[test]
    fn extracts_cards_in_page_order() {
        let parser = HtmlListingParser::new(&selectors()).unwrap();
        let listings = parser.parse(PAGE).unwrap();
        assert_eq!(listings.len(), 2);

        let first = &listings[0];
        assert_eq!(first.title, "Leite em pó Ninho 400g");
        assert_eq!(first.price, RawPrice::Text("R$ 19 ,90".into()));
        assert_eq!(first.link.as_deref(), Some("/p/1"));
        assert_eq!(first.image.as_deref(), Some("https://img.example/1.jpg"));
        assert_eq!(first.description.as_deref(), Some("Integral"));

        let second = &listings[1];
        assert_eq!(second.title, "Leite em pó Itambé");
        assert_eq!(second.price, RawPrice::Missing);
        assert_eq!(second.link, None);
    }

    #[test]
    fn anchor_cards_use_their_own_href() {
        let cfg = SelectorConfig {
            item: "a.card".into(),
            title: "h2".into(),
            price: ".price".into(),
            link: "a.inner".into(),
            image: None,
            description: None,
        };
        let parser = HtmlListingParser::new(&cfg).unwrap();
        let listings = parser
            .parse(r#"<a class="card" href="/produto/9"><h2>Fralda</h2><p class="price">R$ 59,90</p></a>"#)
            .unwrap();
        assert_eq!(listings[0].link.as_deref(), Some("/produto/9"));
    }

    #[test]
    fn page_without_cards_is_empty() {
        let parser = HtmlListingParser::new(&selectors()).unwrap();
        assert!(parser.parse("<html><body>Nenhum resultado</body></html>").unwrap().is_empty());
    }

    #[test]
    fn invalid_selector_is_reported() {
        let mut cfg = selectors();
        cfg.item = "div[".into();
        assert!(matches!(
            HtmlListingParser::new(&cfg),
            Err(ParserError::HtmlParseError(_))
        ));
    }
}
