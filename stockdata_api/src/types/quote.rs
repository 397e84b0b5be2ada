use serde_json::{Map, Value};

/// One quote as delivered by the API: a flat object from provider field name
/// to a string, number, or null. Field order follows the response body.
pub type QuoteRecord = Map<String, Value>;
