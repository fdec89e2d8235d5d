//! EMT Palma transit client
//!
//! Real-time arrivals, line catalog, sublines and stops from the
//! [EMT Palma MAAS API](https://www.emtpalma.cat/maas/api/v1). Every response
//! is normalized through the alias tables in [`crate::aliases`] and every
//! failure is reduced to an [`ErrorKind`].

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::aliases::{ARRIVAL_ENTRY, LINE, Record, STOP, SUBLINE, VEHICLE, unwrap_envelope};
use crate::config::EmtConfig;
use crate::error::{ConfigurationError, ErrorKind, QueryResult};
use crate::models::{
    Arrival, ArrivalTime, DEFAULT_LINE_COLOR, LineInfo, Stop, Subline, normalize_color,
    truncate_destination,
};

/// Line catalog keyed by line code
pub type LineCatalog = BTreeMap<String, LineInfo>;

/// Trait for transit service clients
#[async_trait]
pub trait TransitClient: Send + Sync {
    /// Upcoming arrivals at a stop, soonest first as reported by the API
    async fn get_arrivals(&self, stop_id: u32) -> QueryResult<Vec<Arrival>>;

    /// All lines, keyed by line code
    async fn get_all_lines(&self) -> QueryResult<LineCatalog>;

    /// Sublines (route variants) of a line
    async fn get_line_sublines(&self, line_id: &str) -> QueryResult<Vec<Subline>>;

    /// Stops of a line that carry coordinates
    async fn get_line_stops(&self, line_id: &str) -> QueryResult<Vec<Stop>>;
}

/// Client for the EMT Palma MAAS API
#[derive(Debug)]
pub struct EmtTransitClient {
    client: Client,
    base_url: Url,
    config: EmtConfig,
    lines: ArcSwap<LineCatalog>,
}

impl EmtTransitClient {
    /// Create a client without touching the network
    ///
    /// The line catalog starts empty; it is filled by [`Self::reload_lines`]
    /// or lazily by the first [`TransitClient::get_all_lines`] call. Until
    /// then [`TransitClient::get_arrivals`] colors every line gray; use
    /// [`Self::connect`] to load the catalog up front.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &EmtConfig) -> Result<Self, ConfigurationError> {
        config.validate().map_err(ConfigurationError::Invalid)?;

        let base_url =
            Url::parse(config.base_url.trim()).map_err(|e| ConfigurationError::InvalidBaseUrl {
                url: config.base_url.clone(),
                reason: e.to_string(),
            })?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigurationError::InvalidBaseUrl {
                url: config.base_url.clone(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| ConfigurationError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            config: config.clone(),
            lines: ArcSwap::from_pointee(LineCatalog::new()),
        })
    }

    /// Create a client and load the line catalog
    ///
    /// A failed catalog load is logged and otherwise ignored: line colors then
    /// fall back to [`DEFAULT_LINE_COLOR`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::new`]; network failures never fail construction.
    pub async fn connect(config: &EmtConfig) -> Result<Self, ConfigurationError> {
        let client = Self::new(config)?;

        match client.reload_lines().await {
            Ok(count) => info!(count, "Line catalog loaded"),
            Err(e) => warn!(error = %e, "Line catalog unavailable, using default colors"),
        }

        Ok(client)
    }

    /// Fetch the line catalog and replace the cached one
    ///
    /// The swap is atomic: concurrent readers see either the previous or the
    /// new catalog. On any error, including an empty listing, the previous
    /// catalog is kept.
    #[instrument(skip(self))]
    pub async fn reload_lines(&self) -> QueryResult<usize> {
        let url = self.endpoint(&["agency", "lines", ""]);
        let body = self.fetch(url).await?;
        let catalog = Self::parse_lines(&body)?;

        let count = catalog.len();
        self.lines.store(Arc::new(catalog));
        debug!(count, "Line catalog replaced");
        Ok(count)
    }

    /// Color of a line, or [`DEFAULT_LINE_COLOR`] if the line is unknown
    #[must_use]
    pub fn line_color(&self, line_code: &str) -> String {
        self.lines
            .load()
            .get(line_code)
            .map_or_else(|| DEFAULT_LINE_COLOR.to_string(), |line| line.color.clone())
    }

    /// Build an endpoint URL below the configured base path
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Token without a `Bearer ` prefix, which some configurations carry
    fn bearer_token(&self) -> &str {
        let token = self.config.api_token_str().trim();
        token.strip_prefix("Bearer ").unwrap_or(token).trim()
    }

    /// Issue a GET and return the body of a successful response
    async fn fetch(&self, url: Url) -> QueryResult<String> {
        debug!(%url, "Requesting");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "*/*")
            .bearer_auth(self.bearer_token())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    warn!(timeout_secs = self.config.timeout_secs, "Request timed out");
                } else {
                    warn!(error = %e, "Request failed");
                }
                ErrorKind::Unreachable
            })?;

        let status = response.status();
        if let Err(kind) = classify_status(status) {
            warn!(%status, kind = kind.code(), "Unsuccessful response");
            return Err(kind);
        }

        response.text().await.map_err(|e| {
            warn!(error = %e, "Failed to read response body");
            ErrorKind::Unreachable
        })
    }

    /// Parse the `/agency/lines/` payload into a catalog
    fn parse_lines(body: &str) -> QueryResult<LineCatalog> {
        let value = decode(body)?;
        let Some(records) = unwrap_envelope(&value, LINE.envelopes) else {
            warn!(shape = %describe_shape(&value), "Unrecognized lines payload");
            return Err(ErrorKind::InvalidData);
        };

        let catalog: LineCatalog = records
            .iter()
            .filter_map(Value::as_object)
            .filter_map(Self::convert_line)
            .map(|line| (line.code.clone(), line))
            .collect();

        if catalog.is_empty() {
            warn!("Lines endpoint returned no usable lines");
            return Err(ErrorKind::NoData);
        }
        Ok(catalog)
    }

    fn convert_line(record: &Record) -> Option<LineInfo> {
        let code = LINE.code.text(record)?;
        Some(LineInfo {
            numeric_id: LINE.numeric_id.text(record).unwrap_or_else(|| code.clone()),
            name: LINE.name.text(record).unwrap_or_else(|| code.clone()),
            color: normalize_color(LINE.color.text(record).as_deref()),
            code,
        })
    }

    /// Parse a stop's real-time board
    ///
    /// Anything other than a non-empty list of entries means the stop has no
    /// data. Entries and vehicles that are not objects are skipped.
    fn parse_arrivals(
        body: &str,
        catalog: &LineCatalog,
        config: &EmtConfig,
    ) -> QueryResult<Vec<Arrival>> {
        let entries = match serde_json::from_str::<Value>(body) {
            Ok(Value::Array(entries)) if !entries.is_empty() => entries,
            _ => return Err(ErrorKind::NotFound),
        };

        let arrivals: Vec<Arrival> = entries
            .iter()
            .filter_map(Value::as_object)
            .flat_map(|entry| Self::convert_entry(entry, catalog, config))
            .take(config.max_arrivals)
            .collect();

        if arrivals.is_empty() {
            return Err(ErrorKind::NotFound);
        }
        Ok(arrivals)
    }

    fn convert_entry(entry: &Record, catalog: &LineCatalog, config: &EmtConfig) -> Vec<Arrival> {
        let line = ARRIVAL_ENTRY
            .line
            .text(entry)
            .unwrap_or_else(|| "N/A".to_string());
        let color = catalog
            .get(&line)
            .map_or_else(|| DEFAULT_LINE_COLOR.to_string(), |info| info.color.clone());

        let vehicles = ARRIVAL_ENTRY
            .vehicles
            .value(entry)
            .and_then(Value::as_array)
            .map_or(&[][..], Vec::as_slice);

        vehicles
            .iter()
            .filter_map(Value::as_object)
            .map(|vehicle| Arrival {
                line: line.clone(),
                color: color.clone(),
                destination: truncate_destination(
                    VEHICLE.destination.text(vehicle).as_deref(),
                    config.destination_max_chars,
                ),
                time_display: ArrivalTime::from_seconds(VEHICLE.seconds.value(vehicle))
                    .display(config.minute_style),
            })
            .collect()
    }

    /// Parse a sublines payload
    fn parse_sublines(body: &str) -> QueryResult<Vec<Subline>> {
        let value = decode(body)?;
        let Some(records) = unwrap_envelope(&value, SUBLINE.envelopes) else {
            warn!(shape = %describe_shape(&value), "Unrecognized sublines payload");
            return Err(ErrorKind::InvalidData);
        };

        Ok(records
            .iter()
            .filter_map(Value::as_object)
            .filter_map(|record| {
                Some(Subline {
                    id: SUBLINE.id.text(record)?,
                    name: SUBLINE.name.text(record).unwrap_or_default(),
                    direction: SUBLINE.direction.text(record),
                })
            })
            .collect())
    }

    /// Parse a stops payload, dropping stops that cannot be placed on a map
    fn parse_stops(body: &str, max_stops: usize) -> QueryResult<Vec<Stop>> {
        let value = decode(body)?;
        let Some(records) = unwrap_envelope(&value, STOP.envelopes) else {
            warn!(shape = %describe_shape(&value), "Unrecognized stops payload");
            return Err(ErrorKind::InvalidData);
        };

        Ok(records
            .iter()
            .filter_map(Value::as_object)
            .filter_map(|record| {
                Some(Stop {
                    id: STOP.id.text(record)?,
                    name: STOP
                        .name
                        .text(record)
                        .unwrap_or_else(|| "Unnamed stop".to_string()),
                    latitude: STOP.latitude.float(record)?,
                    longitude: STOP.longitude.float(record)?,
                })
            })
            .take(max_stops)
            .collect())
    }
}

#[async_trait]
impl TransitClient for EmtTransitClient {
    #[instrument(skip(self))]
    async fn get_arrivals(&self, stop_id: u32) -> QueryResult<Vec<Arrival>> {
        if stop_id == 0 {
            debug!("Stop 0 does not exist");
            return Err(ErrorKind::NotFound);
        }

        let stop = stop_id.to_string();
        let url = self.endpoint(&["agency", "stops", &stop, "timestr"]);
        let body = self.fetch(url).await?;

        let catalog = self.lines.load();
        let arrivals = Self::parse_arrivals(&body, &catalog, &self.config)?;

        debug!(count = arrivals.len(), "Arrivals found");
        Ok(arrivals)
    }

    #[instrument(skip(self))]
    async fn get_all_lines(&self) -> QueryResult<LineCatalog> {
        let cached = self.lines.load_full();
        if !cached.is_empty() {
            return Ok(LineCatalog::clone(&cached));
        }

        debug!("Line catalog empty, fetching");
        self.reload_lines().await?;
        Ok(LineCatalog::clone(&self.lines.load_full()))
    }

    #[instrument(skip(self))]
    async fn get_line_sublines(&self, line_id: &str) -> QueryResult<Vec<Subline>> {
        let line_id = line_id.trim();
        if line_id.is_empty() {
            return Err(ErrorKind::NotFound);
        }

        let url = self.endpoint(&["agency", "lines", line_id, "sublines"]);
        let body = self.fetch(url).await?;
        let sublines = Self::parse_sublines(&body)?;

        debug!(count = sublines.len(), "Sublines found");
        Ok(sublines)
    }

    #[instrument(skip(self))]
    async fn get_line_stops(&self, line_id: &str) -> QueryResult<Vec<Stop>> {
        let line_id = line_id.trim();
        if line_id.is_empty() {
            return Err(ErrorKind::NotFound);
        }

        let mut url = self.endpoint(&["agency", "stops"]);
        url.query_pairs_mut().append_pair("line", line_id);
        let body = self.fetch(url).await?;
        let stops = Self::parse_stops(&body, self.config.max_stops)?;

        debug!(count = stops.len(), "Stops found");
        Ok(stops)
    }
}

/// Map an HTTP status to an error kind; 401 takes priority over other failures
fn classify_status(status: StatusCode) -> QueryResult<()> {
    if status == StatusCode::UNAUTHORIZED {
        return Err(ErrorKind::AuthExpired);
    }
    if !status.is_success() {
        return Err(ErrorKind::Unreachable);
    }
    Ok(())
}

fn decode(body: &str) -> QueryResult<Value> {
    serde_json::from_str(body).map_err(|e| {
        warn!(error = %e, "Response body is not JSON");
        ErrorKind::InvalidData
    })
}

/// Short description of a payload for diagnostics
fn describe_shape(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let keys: Vec<&str> = map.keys().map(String::as_str).collect();
            format!("object with keys [{}]", keys.join(", "))
        },
        Value::Array(_) => "array".to_string(),
        Value::String(_) => "string".to_string(),
        Value::Number(_) => "number".to_string(),
        Value::Bool(_) => "bool".to_string(),
        Value::Null => "null".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MinuteStyle;

    fn catalog() -> LineCatalog {
        EmtTransitClient::parse_lines(
            r##"[
                { "code": "5", "id": 105, "longName": "Son Gotleu - Son Roca", "routeColor": "059669" },
                { "code": "A1", "id": 901, "routeColor": "#0ea5e9" }
            ]"##,
        )
        .unwrap()
    }

    #[test]
    fn test_classify_status() {
        assert_eq!(classify_status(StatusCode::OK), Ok(()));
        assert_eq!(classify_status(StatusCode::NO_CONTENT), Ok(()));
        assert_eq!(
            classify_status(StatusCode::UNAUTHORIZED),
            Err(ErrorKind::AuthExpired)
        );
        assert_eq!(
            classify_status(StatusCode::FORBIDDEN),
            Err(ErrorKind::Unreachable)
        );
        assert_eq!(
            classify_status(StatusCode::NOT_FOUND),
            Err(ErrorKind::Unreachable)
        );
        assert_eq!(
            classify_status(StatusCode::BAD_GATEWAY),
            Err(ErrorKind::Unreachable)
        );
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = EmtConfig::default();
        assert!(matches!(
            EmtTransitClient::new(&config),
            Err(ConfigurationError::Invalid(_))
        ));

        let config = EmtConfig {
            base_url: "not a url".to_string(),
            ..EmtConfig::for_testing()
        };
        assert!(matches!(
            EmtTransitClient::new(&config),
            Err(ConfigurationError::InvalidBaseUrl { .. })
        ));

        let config = EmtConfig {
            base_url: "mailto:bus@example.com".to_string(),
            ..EmtConfig::for_testing()
        };
        assert!(matches!(
            EmtTransitClient::new(&config),
            Err(ConfigurationError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_endpoint_building() {
        let client = EmtTransitClient::new(&EmtConfig::for_testing()).unwrap();
        assert_eq!(
            client.endpoint(&["agency", "stops", "42", "timestr"]).as_str(),
            "https://www.emtpalma.cat/maas/api/v1/agency/stops/42/timestr"
        );
        assert_eq!(
            client.endpoint(&["agency", "lines", ""]).as_str(),
            "https://www.emtpalma.cat/maas/api/v1/agency/lines/"
        );
        assert_eq!(
            client.endpoint(&["agency", "lines", "A 1", "sublines"]).as_str(),
            "https://www.emtpalma.cat/maas/api/v1/agency/lines/A%201/sublines"
        );

        let config = EmtConfig {
            base_url: "http://localhost:8080/api/".to_string(),
            ..EmtConfig::for_testing()
        };
        let client = EmtTransitClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint(&["agency", "stops"]).as_str(),
            "http://localhost:8080/api/agency/stops"
        );
    }

    #[test]
    fn test_bearer_prefix_not_duplicated() {
        let config = EmtConfig::new("http://localhost", "Bearer abc.def");
        let client = EmtTransitClient::new(&config).unwrap();
        assert_eq!(client.bearer_token(), "abc.def");

        let config = EmtConfig::new("http://localhost", "abc.def");
        let client = EmtTransitClient::new(&config).unwrap();
        assert_eq!(client.bearer_token(), "abc.def");
    }

    #[test]
    fn test_line_color_without_catalog() {
        let client = EmtTransitClient::new(&EmtConfig::for_testing()).unwrap();
        assert_eq!(client.line_color("5"), DEFAULT_LINE_COLOR);
    }

    #[test]
    fn test_parse_lines() {
        let lines = catalog();
        assert_eq!(lines.len(), 2);

        let five = &lines["5"];
        assert_eq!(five.numeric_id, "105");
        assert_eq!(five.name, "Son Gotleu - Son Roca");
        assert_eq!(five.color, "#059669");

        let a1 = &lines["A1"];
        assert_eq!(a1.name, "A1");
        assert_eq!(a1.color, "#0EA5E9");
    }

    #[test]
    fn test_parse_lines_defaults_and_skips() {
        let lines = EmtTransitClient::parse_lines(
            r#"{ "data": [
                { "code": 20, "name": "Ciutat" },
                { "name": "no code" }
            ] }"#,
        )
        .unwrap();
        assert_eq!(lines.len(), 1);
        let line = &lines["20"];
        assert_eq!(line.numeric_id, "20");
        assert_eq!(line.name, "Ciutat");
        assert_eq!(line.color, DEFAULT_LINE_COLOR);
    }

    #[test]
    fn test_parse_lines_empty_and_invalid() {
        assert_eq!(
            EmtTransitClient::parse_lines("[]"),
            Err(ErrorKind::NoData)
        );
        assert_eq!(
            EmtTransitClient::parse_lines(r#"{ "items": [] }"#),
            Err(ErrorKind::InvalidData)
        );
        assert_eq!(
            EmtTransitClient::parse_lines("<html>"),
            Err(ErrorKind::InvalidData)
        );
    }

    #[test]
    fn test_parse_arrivals() {
        let body = r#"[
            { "lineCode": "5", "vehicles": [
                42,
                { "destination": "Centro", "seconds": 90 },
                "x",
                null,
                { "destination": "Son Roca", "seconds": 0 }
            ] },
            { "lineCode": 5.0, "vehicles": [{ "destination": "Sa Vileta", "seconds": 300 }] },
            { "lineCode": 33, "vehicles": [
                { "destination": null, "seconds": "n/a" }
            ] }
        ]"#;

        let arrivals =
            EmtTransitClient::parse_arrivals(body, &catalog(), &EmtConfig::for_testing()).unwrap();
        assert_eq!(arrivals.len(), 4);

        assert_eq!(arrivals[0].line, "5");
        assert_eq!(arrivals[0].color, "#059669");
        assert_eq!(arrivals[0].destination, "Centro");
        assert_eq!(arrivals[0].time_display, "1min");

        assert_eq!(arrivals[1].destination, "Son Roca");
        assert_eq!(arrivals[1].time_display, "Now");

        assert_eq!(arrivals[2].line, "5");
        assert_eq!(arrivals[2].color, "#059669");
        assert_eq!(arrivals[2].time_display, "5min");

        assert_eq!(arrivals[3].line, "33");
        assert_eq!(arrivals[3].color, DEFAULT_LINE_COLOR);
        assert_eq!(arrivals[3].destination, "Unknown");
        assert_eq!(arrivals[3].time_display, "Soon");
    }

    #[test]
    fn test_parse_arrivals_apostrophe_style() {
        let config = EmtConfig {
            minute_style: MinuteStyle::Apostrophe,
            ..EmtConfig::for_testing()
        };
        let body = r#"[{ "lineCode": "5", "vehicles": [{ "destination": "Centro", "seconds": 185 }] }]"#;
        let arrivals = EmtTransitClient::parse_arrivals(body, &LineCatalog::new(), &config).unwrap();
        assert_eq!(arrivals[0].time_display, "3'");
    }

    #[test]
    fn test_parse_arrivals_caps_results() {
        let vehicles: Vec<String> = (0..12)
            .map(|i| format!(r#"{{ "destination": "D{i}", "seconds": {} }}"#, i * 60))
            .collect();
        let body = format!(r#"[{{ "lineCode": "1", "vehicles": [{}] }}]"#, vehicles.join(","));

        let arrivals =
            EmtTransitClient::parse_arrivals(&body, &LineCatalog::new(), &EmtConfig::for_testing())
                .unwrap();
        assert_eq!(arrivals.len(), 8);
        assert_eq!(arrivals[7].destination, "D7");
    }

    #[test]
    fn test_parse_arrivals_not_found() {
        let config = EmtConfig::for_testing();
        let empty = LineCatalog::new();
        for body in [
            "[]",
            r#"{ "error": "stop not found" }"#,
            "not json",
            r#"[{ "lineCode": "5", "vehicles": [] }]"#,
            r#"[{ "lineCode": "5" }, 42]"#,
        ] {
            assert_eq!(
                EmtTransitClient::parse_arrivals(body, &empty, &config),
                Err(ErrorKind::NotFound),
                "body: {body}"
            );
        }
    }

    #[test]
    fn test_parse_sublines_envelopes() {
        let data = r#"{ "data": [{ "subLineId": "12", "longName": "Foo" }] }"#;
        let sublines = EmtTransitClient::parse_sublines(data).unwrap();
        assert_eq!(
            sublines,
            vec![Subline {
                id: "12".to_string(),
                name: "Foo".to_string(),
                direction: Some("Foo".to_string()),
            }]
        );

        let wrapped = r#"{ "sublines": [{ "id": 3, "name": "Bar", "way": "Outbound" }] }"#;
        let sublines = EmtTransitClient::parse_sublines(wrapped).unwrap();
        assert_eq!(sublines[0].id, "3");
        assert_eq!(sublines[0].name, "Bar");
        assert_eq!(sublines[0].direction.as_deref(), Some("Outbound"));

        let bare = r#"[{ "code": "A1-1" }]"#;
        let sublines = EmtTransitClient::parse_sublines(bare).unwrap();
        assert_eq!(sublines[0].id, "A1-1");
        assert_eq!(sublines[0].name, "");
        assert!(sublines[0].direction.is_none());
    }

    #[test]
    fn test_parse_sublines_skips_records_without_id() {
        let body = r#"{ "subLines": [{ "name": "orphan" }, { "sublineId": 7, "description": "Kept" }, "junk"] }"#;
        let sublines = EmtTransitClient::parse_sublines(body).unwrap();
        assert_eq!(sublines.len(), 1);
        assert_eq!(sublines[0].id, "7");
        assert_eq!(sublines[0].name, "Kept");
    }

    #[test]
    fn test_parse_sublines_invalid() {
        assert_eq!(
            EmtTransitClient::parse_sublines(r#"{ "unknownKey": [{ "id": 1 }] }"#),
            Err(ErrorKind::InvalidData)
        );
        assert_eq!(
            EmtTransitClient::parse_sublines("\"text\""),
            Err(ErrorKind::InvalidData)
        );
        assert_eq!(
            EmtTransitClient::parse_sublines("{"),
            Err(ErrorKind::InvalidData)
        );
    }

    #[test]
    fn test_parse_stops_filters_coordinates() {
        let body = r#"[
            { "id": 1, "stopName": "Plaça d'Espanya", "stopLat": 39.5763, "stopLon": 2.6548 },
            { "stopCode": "2", "stopDesc": "Jaume III", "stopLat": "39.5710", "stopLon": "2.6440" },
            { "id": 3, "stopName": "Nowhere" },
            { "id": 4, "stopName": "Broken", "stopLat": "north", "stopLon": 2.6 },
            { "stopName": "No id", "stopLat": 39.5, "stopLon": 2.6 },
            { "id": 6, "lat": 39.58, "lng": 2.65 }
        ]"#;

        let stops = EmtTransitClient::parse_stops(body, 20).unwrap();
        let ids: Vec<&str> = stops.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "6"]);

        assert_eq!(stops[0].name, "Plaça d'Espanya");
        assert!((stops[1].latitude - 39.571).abs() < 1e-9);
        assert_eq!(stops[2].name, "Unnamed stop");
    }

    #[test]
    fn test_parse_stops_cap_and_envelope() {
        let records: Vec<String> = (0..30)
            .map(|i| format!(r#"{{ "id": {i}, "stopLat": 39.5, "stopLon": 2.6 }}"#))
            .collect();
        let body = format!(r#"{{ "stops": [{}] }}"#, records.join(","));

        let stops = EmtTransitClient::parse_stops(&body, 20).unwrap();
        assert_eq!(stops.len(), 20);
        assert_eq!(stops[19].id, "19");

        assert_eq!(
            EmtTransitClient::parse_stops(r#"{ "paradas": [] }"#, 20),
            Err(ErrorKind::InvalidData)
        );
    }

    #[test]
    fn test_describe_shape() {
        let value: Value = serde_json::from_str(r#"{ "a": 1, "b": [] }"#).unwrap();
        assert_eq!(describe_shape(&value), "object with keys [a, b]");
        assert_eq!(describe_shape(&Value::Null), "null");
    }
}
