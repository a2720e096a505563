//! Lot records as supplied by the registration portal.

use crate::{EventName, LotId, TeamId, TeamName};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;

/// One team's registered slot for one event.
///
/// The ordering engine only reads `id`, `team_name` and `lot_number`.
/// Everything else is forwarded untouched to the roster projection, and the
/// payload is never inspected at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(
    serialize = "P: Serialize",
    deserialize = "P: Deserialize<'de> + Default"
))]
pub struct Lot<P = serde_json::Value> {
    /// Opaque identifier, used for tie-breaking and display
    pub id: LotId,
    /// Team or department name as entered at registration
    #[serde(default, deserialize_with = "deserialize_text")]
    pub team_name: TeamName,
    /// Display-only team identifier
    #[serde(default, deserialize_with = "deserialize_text")]
    pub team_id: TeamId,
    /// Event this lot was drawn for
    #[serde(default, deserialize_with = "deserialize_text")]
    pub event: EventName,
    /// Raw lot number; may be missing or non-numeric
    #[serde(default, deserialize_with = "deserialize_lot_number")]
    pub lot_number: Option<String>,
    /// Passenger data (contestant names, department numbers, ...)
    #[serde(default)]
    pub payload: P,
}

impl<P: Default> Lot<P> {
    /// Create a lot with an empty payload.
    pub fn new(
        id: impl Into<LotId>,
        team_name: impl Into<TeamName>,
        lot_number: Option<&str>,
    ) -> Self {
        Self {
            id: id.into(),
            team_name: team_name.into(),
            team_id: TeamId::new(),
            event: EventName::new(),
            lot_number: lot_number.map(str::to_string),
            payload: P::default(),
        }
    }
}

impl<P> Lot<P> {
    /// Set the display team identifier.
    pub fn with_team_id(mut self, team_id: impl Into<TeamId>) -> Self {
        self.team_id = team_id.into();
        self
    }

    /// Set the event name.
    pub fn with_event(mut self, event: impl Into<EventName>) -> Self {
        self.event = event.into();
        self
    }

    /// Set the passenger payload.
    pub fn with_payload(mut self, payload: P) -> Self {
        self.payload = payload;
        self
    }

    /// Last-resort ordering between lots that share id, team and lot number.
    ///
    /// Compares the remaining display fields so such lots still come out in
    /// the same order whatever order they arrived in. Lots equal here differ
    /// at most in payload and are interchangeable on the roster.
    pub fn display_cmp(&self, other: &Self) -> Ordering {
        self.team_name
            .cmp(&other.team_name)
            .then_with(|| self.team_id.cmp(&other.team_id))
            .then_with(|| self.event.cmp(&other.event))
            .then_with(|| self.lot_number.cmp(&other.lot_number))
    }

    /// Convert the payload, keeping every other field.
    pub fn map_payload<Q>(self, f: impl FnOnce(P) -> Q) -> Lot<Q> {
        Lot {
            id: self.id,
            team_name: self.team_name,
            team_id: self.team_id,
            event: self.event,
            lot_number: self.lot_number,
            payload: f(self.payload),
        }
    }
}

/// A scalar field as it may arrive from the portal.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Text(String),
    Int(i64),
    Float(f64),
    Other(IgnoredAny),
}

impl RawScalar {
    fn into_text(self) -> Option<String> {
        match self {
            RawScalar::Text(s) => Some(s),
            RawScalar::Int(n) => Some(n.to_string()),
            RawScalar::Float(f) => Some(f.to_string()),
            RawScalar::Other(_) => None,
        }
    }
}

/// Display text; `null`, booleans, arrays and objects become `""`.
fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawScalar>::deserialize(deserializer)?
        .and_then(RawScalar::into_text)
        .unwrap_or_default())
}

/// Accepts `"7"`, `7`, `null` or a missing field. Any other value is kept as
/// missing, which ranks as an unparsed lot number.
fn deserialize_lot_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawScalar>::deserialize(deserializer)?.and_then(RawScalar::into_text))
}
