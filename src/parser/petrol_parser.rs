// GlobalPetrolPrices-specific HTML parsing
use crate::model::{ParseError, PriceRecord, PriceSheet};
use scraper::{Html, Selector};

pub trait Parser {
    fn parse(&self, html: &str) -> Result<PriceSheet, ParseError>;
}

pub struct PetrolPriceParser;

impl PetrolPriceParser {
    pub fn new() -> Self {
        Self
    }

    fn selector(css: &str) -> Result<Selector, ParseError> {
        Selector::parse(css).map_err(|e| ParseError::Selector(e.to_string()))
    }

    /// Date label from the page heading: the part after the last comma,
    /// e.g. "Gasoline prices, 28-Jul-2026" -> "28-Jul-2026".
    fn extract_as_of(document: &Html) -> Result<String, ParseError> {
        let h1 = Self::selector("h1")?;
        let heading = document
            .select(&h1)
            .next()
            .ok_or(ParseError::MissingSection("h1"))?;
        let text = heading.text().collect::<String>();
        let text = text.trim();
        Ok(match text.rsplit_once(',') {
            Some((_, tail)) => tail.trim().to_string(),
            None => text.to_string(),
        })
    }

    /// Country names from the link column. Entries are blank-line
    /// separated; the first and last chunks are page furniture and the `*`
    /// markers on some names are dropped.
    fn extract_countries(document: &Html) -> Result<Vec<String>, ParseError> {
        let sel = Self::selector("div#outsideLinks > div")?;
        let container = document
            .select(&sel)
            .next()
            .ok_or(ParseError::MissingSection("outsideLinks"))?;
        let text = container.text().collect::<String>();

        let mut names: Vec<String> = text
            .split("\n\n")
            .map(|chunk| chunk.trim().replace('*', ""))
            .collect();
        if names.len() >= 2 {
            names.remove(0);
            names.pop();
        }
        Ok(names)
    }

    /// Price column from the bar-graph section: whitespace-separated
    /// tokens with a trailing unit token that is not a price.
    fn extract_prices(document: &Html) -> Result<Vec<f64>, ParseError> {
        let sel = Self::selector("div#graphic > div")?;
        let container = document
            .select(&sel)
            .next()
            .ok_or(ParseError::MissingSection("graphic"))?;
        let text = container.text().collect::<String>();

        let mut tokens: Vec<&str> = text.split_whitespace().collect();
        tokens.pop();
        tokens
            .iter()
            .map(|t| {
                t.parse::<f64>()
                    .map_err(|_| ParseError::BadPrice((*t).to_string()))
            })
            .collect()
    }
}

impl Parser for PetrolPriceParser {
    fn parse(&self, html: &str) -> Result<PriceSheet, ParseError> {
        let document = Html::parse_document(html);

        let as_of = Self::extract_as_of(&document)?;
        let countries = Self::extract_countries(&document)?;
        let prices = Self::extract_prices(&document)?;

        if countries.len() != prices.len() {
            return Err(ParseError::ShapeMismatch {
                names: countries.len(),
                prices: prices.len(),
            });
        }

        let rows = countries
            .into_iter()
            .zip(prices)
            .map(|(country, price)| PriceRecord { country, price })
            .collect();

        Ok(PriceSheet { rows, as_of })
    }
}
