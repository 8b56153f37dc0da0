use serde::Deserialize;
use serde_json::Value;

/// Body of the marketplace search endpoint. Listings stay untyped until one
/// is actually read, so a malformed tail never spoils the top offer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    data: Option<Vec<Value>>,
}

impl SearchResponse {
    pub fn listings(&self) -> &[Value] {
        self.data.as_deref().unwrap_or_default()
    }

    /// The first listing, decoded. `None` when there are no listings.
    pub fn first_listing(&self) -> Option<Result<Listing, serde_json::Error>> {
        self.listings()
            .first()
            .map(|raw| Listing::deserialize(raw))
    }
}

/// A single sell offer. Only the price matters here; other fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Listing {
    pub price: PriceField,
}

/// The marketplace sends prices as decimal strings, but numbers are accepted too.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PriceField {
    Text(String),
    Number(f64),
}

#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageResponse {
    pub ok: bool,
    #[serde(default)]
    pub description: Option<String>,
}
