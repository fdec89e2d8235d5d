//! Field-name reconciliation for EMT API payloads
//!
//! The MAAS API does not use stable field names: the same attribute shows up
//! under different keys depending on the deployment, and list payloads may be
//! bare arrays or wrapped in one of several envelope keys. Each entity gets one
//! alias table here, and every lookup goes through [`FieldAliases`] and
//! [`unwrap_envelope`].

use serde_json::{Map, Number, Value};

/// JSON object as returned by the API
pub(crate) type Record = Map<String, Value>;

/// Priority-ordered key aliases for one logical attribute
#[derive(Debug, Clone, Copy)]
pub(crate) struct FieldAliases(pub &'static [&'static str]);

impl FieldAliases {
    /// First present, non-null value among the aliases
    pub(crate) fn value<'a>(&self, record: &'a Record) -> Option<&'a Value> {
        self.0
            .iter()
            .filter_map(|key| record.get(*key))
            .find(|value| !value.is_null())
    }

    /// First alias holding a non-blank string or a number, as text
    pub(crate) fn text(&self, record: &Record) -> Option<String> {
        self.0
            .iter()
            .filter_map(|key| record.get(*key))
            .find_map(as_text)
    }

    /// First alias holding a number or a numeric string, as a finite float
    pub(crate) fn float(&self, record: &Record) -> Option<f64> {
        self.0
            .iter()
            .filter_map(|key| record.get(*key))
            .find_map(as_float)
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(number_text(n)),
        _ => None,
    }
}

/// Whole floats drop the fraction, so `5.0` names the same line as `5`
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.is_finite() && f.fract() == 0.0 => format!("{f:.0}"),
        _ => n.to_string(),
    }
}

fn as_float(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}

/// Locate the record list in a response body
///
/// A bare array is returned as-is; an object is searched for the first envelope
/// key holding an array. Any other shape yields `None`.
pub(crate) fn unwrap_envelope<'a>(body: &'a Value, envelopes: &[&str]) -> Option<&'a [Value]> {
    match body {
        Value::Array(items) => Some(items),
        Value::Object(map) => envelopes
            .iter()
            .filter_map(|key| map.get(*key))
            .find_map(Value::as_array)
            .map(Vec::as_slice),
        _ => None,
    }
}

/// Aliases for line records (`/agency/lines/`)
#[derive(Debug)]
pub(crate) struct LineAliases {
    pub envelopes: &'static [&'static str],
    pub code: FieldAliases,
    pub numeric_id: FieldAliases,
    pub name: FieldAliases,
    pub color: FieldAliases,
}

pub(crate) const LINE: LineAliases = LineAliases {
    envelopes: &["lines", "data"],
    code: FieldAliases(&["code", "lineCode"]),
    numeric_id: FieldAliases(&["id", "lineId"]),
    name: FieldAliases(&["longName", "name"]),
    color: FieldAliases(&["routeColor", "color"]),
};

/// Aliases for per-line entries of a stop's real-time board
#[derive(Debug)]
pub(crate) struct ArrivalEntryAliases {
    pub line: FieldAliases,
    pub vehicles: FieldAliases,
}

pub(crate) const ARRIVAL_ENTRY: ArrivalEntryAliases = ArrivalEntryAliases {
    line: FieldAliases(&["lineCode", "line", "lineId"]),
    vehicles: FieldAliases(&["vehicles"]),
};

/// Aliases for a single vehicle inside an arrival entry
#[derive(Debug)]
pub(crate) struct VehicleAliases {
    pub destination: FieldAliases,
    pub seconds: FieldAliases,
}

pub(crate) const VEHICLE: VehicleAliases = VehicleAliases {
    destination: FieldAliases(&["destination"]),
    seconds: FieldAliases(&["seconds"]),
};

/// Aliases for subline records (`/agency/lines/{id}/sublines`)
#[derive(Debug)]
pub(crate) struct SublineAliases {
    pub envelopes: &'static [&'static str],
    pub id: FieldAliases,
    pub name: FieldAliases,
    pub direction: FieldAliases,
}

pub(crate) const SUBLINE: SublineAliases = SublineAliases {
    envelopes: &["sublines", "subLines", "data"],
    id: FieldAliases(&["subLineId", "id", "sublineId", "code"]),
    name: FieldAliases(&["shortName", "longName", "name", "description", "sublineName"]),
    direction: FieldAliases(&["longName", "direction", "way"]),
};

/// Aliases for stop records (`/agency/stops?line=`)
#[derive(Debug)]
pub(crate) struct StopAliases {
    pub envelopes: &'static [&'static str],
    pub id: FieldAliases,
    pub name: FieldAliases,
    pub latitude: FieldAliases,
    pub longitude: FieldAliases,
}

pub(crate) const STOP: StopAliases = StopAliases {
    envelopes: &["stops", "data"],
    id: FieldAliases(&["id", "stopCode", "stopId"]),
    name: FieldAliases(&["stopName", "stopDesc", "name"]),
    latitude: FieldAliases(&["stopLat", "lat", "latitude"]),
    longitude: FieldAliases(&["stopLon", "lon", "lng", "longitude"]),
};
