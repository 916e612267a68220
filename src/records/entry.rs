use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a live entity (a crew member, an item, an action).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier of a station, the administrative unit that owns a roster of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(pub u64);

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "station-{}", self.0)
    }
}

/// Identifier handed out by the host when an action is granted to an entity.
pub type ActionId = EntityId;

/// Addresses a single record: its roster-local id plus the owning station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordKey {
    pub id: u32,
    pub station: StationId,
}

impl RecordKey {
    pub fn new(id: u32, station: StationId) -> Self {
        Self { id, station }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.station, self.id)
    }
}

/// The general (non-criminal) part of a personnel record.
///
/// `name` is what accusations are matched against, so it has to be the name
/// the crew member is *seen* with, not an internal identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralRecord {
    pub name: String,
    pub job_title: String,
    #[serde(default)]
    pub species: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
}

impl GeneralRecord {
    pub fn new(name: impl Into<String>, job_title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            job_title: job_title.into(),
            species: None,
            age: None,
        }
    }
}
