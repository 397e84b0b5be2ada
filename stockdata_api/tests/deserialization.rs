use stockdata_api::types::QuoteResponse;
use stockdata_api::Error;

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[test]
fn deserialize_quotes_full() {
    let json = load_fixture("quotes.json");
    let resp = QuoteResponse::from_json(&json).unwrap();
    assert_eq!(resp.meta.requested, Some(3));
    assert_eq!(resp.meta.returned, 3);
    assert_eq!(resp.data.len(), 3);

    let apple = &resp.data[0];
    assert_eq!(apple["ticker"], "AAPL");
    assert_eq!(apple["name"], "Apple Inc");
    assert_eq!(apple["price"].as_f64(), Some(150.0));
    assert!(apple["market_cap"].is_null());
}

#[test]
fn deserialize_quotes_preserves_field_order() {
    let json = load_fixture("quotes.json");
    let resp = QuoteResponse::from_json(&json).unwrap();
    let keys: Vec<&str> = resp.data[0].keys().map(String::as_str).take(4).collect();
    assert_eq!(keys, ["ticker", "name", "exchange_short", "exchange_long"]);
}

#[test]
fn deserialize_quotes_validates_count() {
    let json = load_fixture("quotes.json");
    let resp = QuoteResponse::from_json(&json).unwrap();
    assert!(resp.validate_count(3).is_ok());
    assert!(matches!(
        resp.validate_count(2),
        Err(Error::CountMismatch {
            requested: 2,
            returned: 3
        })
    ));
}

#[test]
fn deserialize_missing_meta() {
    let json = load_fixture("quotes_missing_meta.json");
    let err = QuoteResponse::from_json(&json).unwrap_err();
    assert!(matches!(err, Error::MissingEnvelope("meta")));
    assert_eq!(err.to_string(), "Response does not contain meta");
}

#[test]
fn deserialize_missing_data() {
    let err = QuoteResponse::from_json(r#"{"meta": {"returned": 0}}"#).unwrap_err();
    assert!(matches!(err, Error::MissingEnvelope("data")));
}

#[test]
fn deserialize_data_length_mismatch() {
    let resp = QuoteResponse::from_json(r#"{"meta": {"returned": 2}, "data": [{"ticker": "A"}]}"#)
        .unwrap();
    assert!(matches!(
        resp.validate_count(2),
        Err(Error::DataLengthMismatch {
            returned: 2,
            actual: 1
        })
    ));
}

#[test]
fn deserialize_non_object_body() {
    let err = QuoteResponse::from_json("[1, 2, 3]").unwrap_err();
    assert!(matches!(err, Error::ParseFailed(_)));
}

#[test]
fn deserialize_malformed_meta() {
    let err = QuoteResponse::from_json(r#"{"meta": {"returned": "three"}, "data": []}"#)
        .unwrap_err();
    assert!(matches!(err, Error::ParseFailed(_)));
}
