// VTEX catalog search API (`/api/catalog_system/pub/products/search`)
use crate::model::{ParserError, RawListing, RawPrice};
use crate::parser::Parser;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Product {
    #[serde(default)]
    product_name: String,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    items: Vec<Sku>,
}

#[derive(Debug, Deserialize)]
struct Sku {
    #[serde(default)]
    images: Vec<Image>,
    #[serde(default)]
    sellers: Vec<Seller>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Image {
    image_url: String,
}

#[derive(Debug, Deserialize)]
struct Seller {
    #[serde(rename = "commertialOffer")]
    offer: CommercialOffer,
}

#[derive(Debug, Deserialize)]
struct CommercialOffer {
    #[serde(rename = "Price", default)]
    price: Option<f64>,
    #[serde(rename = "AvailableQuantity", default)]
    available_quantity: Option<i64>,
}

impl Product {
    /// First seller price of the first sku that is in stock.
    fn price(&self) -> RawPrice {
        self.items
            .iter()
            .flat_map(|sku| sku.sellers.iter())
            .map(|seller| &seller.offer)
            .filter(|offer| offer.available_quantity.unwrap_or(1) > 0)
            .find_map(|offer| offer.price)
            .map(RawPrice::Amount)
            .unwrap_or_default()
    }

    fn image(&self) -> Option<String> {
        self.items
            .iter()
            .flat_map(|sku| sku.images.iter())
            .next()
            .map(|img| img.image_url.clone())
    }
}

pub struct VtexCatalogParser;

impl VtexCatalogParser {
    pub fn new() -> Self {
        Self
    }
}

impl Parser for VtexCatalogParser {
    fn parse(&self, body: &str) -> Result<Vec<RawListing>, ParserError> {
        let products: Vec<Product> =
            serde_json::from_str(body).map_err(|e| ParserError::InvalidJson(e.to_string()))?;

        Ok(products
            .into_iter()
            .filter(|p| !p.product_name.trim().is_empty())
            .map(|p| {
                let price = p.price();
                let image = p.image();
                RawListing {
                    title: p.product_name.trim().to_string(),
                    price,
                    link: p.link,
                    image,
                    description: p.description.filter(|d| !d.trim().is_empty()),
                }
            })
            .collect())
    }
}
