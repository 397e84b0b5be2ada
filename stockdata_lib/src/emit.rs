//! Rendering of converted records as InfluxDB line protocol or JSON.

use serde_json::{json, Map, Value};

use crate::convert::ConvertedRecord;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    LineProtocol,
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::LineProtocol
        }
    }

    /// Renders one record as a single line without a trailing newline.
    ///
    /// Returns `None` when the record cannot be expressed in this format: a
    /// line-protocol point needs at least one field.
    pub fn render(self, measurement: &str, record: &ConvertedRecord) -> Option<String> {
        match self {
            OutputFormat::LineProtocol => to_line_protocol(measurement, record),
            OutputFormat::Json => Some(to_json_line(measurement, record)),
        }
    }
}

/// `measurement,tag=v,... field=v,...`, or `measurement field=v,...` when
/// there are no tags.
pub fn to_line_protocol(measurement: &str, record: &ConvertedRecord) -> Option<String> {
    if record.fields.is_empty() {
        return None;
    }
    let mut line = escape_measurement(measurement);
    for (key, value) in &record.tags {
        line.push(',');
        line.push_str(key);
        line.push('=');
        line.push_str(value);
    }
    line.push(' ');
    let fields = record
        .fields
        .iter()
        .map(|(key, value)| format!("{}={}", key, format_float(*value)))
        .collect::<Vec<_>>()
        .join(",");
    line.push_str(&fields);
    Some(line)
}

/// `{"measurement":..,"tags":{..},"fields":{..}}` on one line.
pub fn to_json_line(measurement: &str, record: &ConvertedRecord) -> String {
    let tags: Map<String, Value> = record
        .tags
        .iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect();
    let fields: Map<String, Value> = record
        .fields
        .iter()
        .map(|(k, v)| (k.clone(), json!(v)))
        .collect();
    json!({
        "measurement": measurement,
        "tags": tags,
        "fields": fields,
    })
    .to_string()
}

/// Shortest round-trip form, keeping `.0` on integral values so InfluxDB
/// reads them as floats.
fn format_float(value: f64) -> String {
    format!("{:?}", value)
}

fn escape_measurement(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, ',' | ' ') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::convert_record;
    use serde_json::json;

    fn apple() -> ConvertedRecord {
        let source = json!({
            "Ticker": "AAPL",
            "Name": "Apple Inc",
            "Price": 150.0,
            "MarketCap": null
        });
        convert_record(source.as_object().unwrap()).unwrap()
    }

    fn fields_only() -> ConvertedRecord {
        ConvertedRecord {
            tags: vec![],
            fields: vec![("price".into(), 1.5), ("volume".into(), 10.0)],
        }
    }

    #[test]
    fn line_protocol_end_to_end() {
        assert_eq!(
            OutputFormat::LineProtocol.render("stocks", &apple()).unwrap(),
            r"stocks,ticker=AAPL,name=Apple\ Inc price=150.0"
        );
    }

    #[test]
    fn line_protocol_without_tags_has_no_dangling_comma() {
        assert_eq!(
            to_line_protocol("stocks", &fields_only()).unwrap(),
            "stocks price=1.5,volume=10.0"
        );
    }

    #[test]
    fn line_protocol_without_fields_is_skipped() {
        let record = ConvertedRecord {
            tags: vec![("ticker".into(), "AAPL".into())],
            fields: vec![],
        };
        assert_eq!(to_line_protocol("stocks", &record), None);
        assert!(OutputFormat::Json.render("stocks", &record).is_some());
    }

    #[test]
    fn measurement_is_escaped() {
        let line = to_line_protocol("stock quotes,v2", &fields_only()).unwrap();
        assert!(line.starts_with(r"stock\ quotes\,v2 "));
    }

    #[test]
    fn awkward_text_still_renders_one_valid_line() {
        let source = json!({
            "ticker": "AAPL",
            "exchange": "",
            "name": "Apple\nInc",
            "price": 1.0
        });
        let record = convert_record(source.as_object().unwrap()).unwrap();
        let line = OutputFormat::LineProtocol.render("stocks", &record).unwrap();
        assert_eq!(line, r"stocks,ticker=AAPL,name=Apple\ Inc price=1.0");
        assert_eq!(line.lines().count(), 1);
    }

    #[test]
    fn floats_keep_a_decimal_point() {
        assert_eq!(format_float(150.0), "150.0");
        assert_eq!(format_float(0.0), "0.0");
        assert_eq!(format_float(416.42), "416.42");
        assert_eq!(format_float(72043100.0), "72043100.0");
        assert_eq!(format_float(-0.13), "-0.13");
    }

    #[test]
    fn json_line_shape() {
        let line = OutputFormat::Json.render("stocks", &apple()).unwrap();
        assert!(!line.contains('\n'));
        assert_eq!(
            line,
            r#"{"measurement":"stocks","tags":{"ticker":"AAPL","name":"Apple\\ Inc"},"fields":{"price":150.0}}"#
        );
    }

    #[test]
    fn json_line_with_empty_maps() {
        let line = to_json_line("stocks", &ConvertedRecord::default());
        let parsed: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed, json!({"measurement": "stocks", "tags": {}, "fields": {}}));
    }

    #[test]
    fn format_from_flag() {
        assert_eq!(OutputFormat::from_json_flag(true), OutputFormat::Json);
        assert_eq!(OutputFormat::from_json_flag(false), OutputFormat::LineProtocol);
        assert_eq!(OutputFormat::default(), OutputFormat::LineProtocol);
    }
}
