//! Scenario files: a snapshot of stations, crew and visors to seed a
//! [`MemoryHost`] with. JSON or TOML, picked by file extension.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::action::WantedVisor;
use crate::error::WantedError;
use crate::memory::{MemoryActor, MemoryHost};
use crate::records::{CriminalRecord, EntityId, GeneralRecord, SecurityStatus, StationId};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub stations: Vec<StationSpec>,
    #[serde(default)]
    pub actors: Vec<ActorSpec>,
    #[serde(default)]
    pub visors: Vec<VisorSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationSpec {
    pub id: StationId,
    pub name: String,
    #[serde(default)]
    pub records: Vec<RecordSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSpec {
    pub id: u32,
    pub name: String,
    pub job_title: String,
    #[serde(default)]
    pub species: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub status: SecurityStatus,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorSpec {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub identity: Option<String>,
    #[serde(default = "default_humanoid")]
    pub humanoid: bool,
    #[serde(default)]
    pub station: Option<StationId>,
    #[serde(default)]
    pub title: Option<String>,
}

fn default_humanoid() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisorSpec {
    pub id: EntityId,
    #[serde(default)]
    pub action: Option<String>,
}

impl Scenario {
    /// Reads a scenario from a `.toml` or `.json` file.
    pub fn load(path: &Path) -> Result<Self, WantedError> {
        let contents = std::fs::read_to_string(path)?;
        let scenario = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str::<Scenario>(&contents)?,
            Some("json") => serde_json::from_str::<Scenario>(&contents)?,
            other => {
                return Err(WantedError::Scenario(format!(
                    "unsupported scenario format: {}",
                    other.unwrap_or("<none>")
                )));
            }
        };
        scenario.validate()?;
        Ok(scenario)
    }

    /// The built-in demo: one outpost with two crew called Alice and one Bob,
    /// an officer wearing a visor, and the Alice and Bob crew actors.
    pub fn demo() -> Self {
        let record = |id: u32, name: &str, job: &str| RecordSpec {
            id,
            name: name.to_string(),
            job_title: job.to_string(),
            species: Some("Human".to_string()),
            age: None,
            status: SecurityStatus::None,
            reason: None,
        };
        let actor = |id: u64, name: &str, title: Option<&str>| ActorSpec {
            id: EntityId(id),
            name: name.to_string(),
            identity: None,
            humanoid: true,
            station: Some(StationId(1)),
            title: title.map(str::to_string),
        };

        Self {
            stations: vec![StationSpec {
                id: StationId(1),
                name: "Outpost Theta".to_string(),
                records: vec![
                    record(1, "Alice", "Chef"),
                    record(2, "Alice", "Botanist"),
                    record(3, "Bob", "Janitor"),
                ],
            }],
            actors: vec![
                actor(10, "Carol", Some("Carol (Security Officer)")),
                actor(20, "Alice", None),
                actor(21, "Bob", None),
            ],
            visors: vec![VisorSpec {
                id: EntityId(100),
                action: Some("ActionAccuseWanted".to_string()),
            }],
        }
    }

    /// Rejects duplicate ids and references to undeclared stations.
    pub fn validate(&self) -> Result<(), WantedError> {
        let mut stations = HashSet::new();
        for station in &self.stations {
            if !stations.insert(station.id) {
                return Err(WantedError::Scenario(format!(
                    "duplicate station id {}",
                    station.id
                )));
            }
            let mut ids = HashSet::new();
            for record in &station.records {
                if !ids.insert(record.id) {
                    return Err(WantedError::Scenario(format!(
                        "duplicate record id {} on {}",
                        record.id, station.id
                    )));
                }
            }
        }

        let mut entities = HashSet::new();
        for actor in &self.actors {
            if !entities.insert(actor.id) {
                return Err(WantedError::Scenario(format!("duplicate entity {}", actor.id)));
            }
            if let Some(station) = actor.station
                && !stations.contains(&station)
            {
                return Err(WantedError::Scenario(format!(
                    "actor {} references unknown {station}",
                    actor.id
                )));
            }
        }
        for visor in &self.visors {
            if !entities.insert(visor.id) {
                return Err(WantedError::Scenario(format!("duplicate entity {}", visor.id)));
            }
        }
        Ok(())
    }

    /// Seeds a fresh in-memory host with this scenario.
    pub fn build_host(&self, templates: HashMap<String, String>) -> MemoryHost {
        let host = MemoryHost::new(templates);
        for station in &self.stations {
            host.add_station(station.id, station.name.clone());
            for r in &station.records {
                let general = GeneralRecord {
                    name: r.name.clone(),
                    job_title: r.job_title.clone(),
                    species: r.species.clone(),
                    age: r.age,
                };
                let criminal = CriminalRecord {
                    status: r.status,
                    reason: r.reason.clone(),
                    history: Vec::new(),
                };
                host.add_record(station.id, r.id, general, criminal);
            }
        }
        for a in &self.actors {
            host.add_actor(
                a.id,
                MemoryActor {
                    name: a.name.clone(),
                    identity: a.identity.clone(),
                    humanoid: a.humanoid,
                    station: a.station,
                    title: a.title.clone(),
                },
            );
        }
        host
    }

    /// Picks the visor to accuse with: the requested one if the scenario
    /// declares it, otherwise the first declared visor.
    pub fn visor_id(&self, requested: Option<EntityId>) -> Result<EntityId, WantedError> {
        match requested {
            Some(id) if self.visors.iter().any(|v| v.id == id) => Ok(id),
            Some(id) => Err(WantedError::Scenario(format!("{id} is not a visor"))),
            None => self
                .visors
                .first()
                .map(|v| v.id)
                .ok_or_else(|| WantedError::Scenario("scenario has no visor".into())),
        }
    }

    pub fn visors(&self) -> Vec<(EntityId, WantedVisor)> {
        self.visors
            .iter()
            .map(|v| {
                (
                    v.id,
                    WantedVisor {
                        action: v.action.clone(),
                        action_entity: None,
                    },
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{IdentityResolver, RecordStore, StationResolver};
    use std::io::Write;

    #[test]
    fn demo_is_valid() {
        let scenario = Scenario::demo();
        scenario.validate().unwrap();
        assert_eq!(scenario.stations[0].records.len(), 3);
        assert_eq!(scenario.visors().len(), 1);
    }

    #[test]
    fn load_toml_scenario() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[[stations]]
id = 4
name = "Relay"

[[stations.records]]
id = 1
name = "Dana"
job_title = "Engineer"
status = "suspected"

[[actors]]
id = 7
name = "Eve"
identity = "Dana"
station = 4

[[actors]]
id = 8
name = "Crate"
humanoid = false

[[visors]]
id = 50
action = "ActionAccuseWanted"
"#
        )
        .unwrap();

        let scenario = Scenario::load(file.path()).unwrap();
        let host = scenario.build_host(HashMap::new());

        assert_eq!(host.resolve_station(EntityId(7)), Some(StationId(4)));
        assert_eq!(host.display_name(EntityId(7)), "Dana");
        assert!(!host.has_physical_appearance(EntityId(8)));
        let records = host.records(StationId(4));
        assert_eq!(records.len(), 1);
        assert_eq!(
            host.status_of(crate::records::RecordKey::new(1, StationId(4))),
            Some(SecurityStatus::Suspected)
        );
        assert_eq!(scenario.visors()[0].1.prototype(), Some("ActionAccuseWanted"));
    }

    #[test]
    fn load_json_scenario() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        let json = serde_json::to_string(&Scenario::demo()).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let scenario = Scenario::load(file.path()).unwrap();
        assert_eq!(scenario.actors.len(), 3);
    }

    #[test]
    fn load_rejects_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        let err = Scenario::load(file.path()).unwrap_err();
        assert!(matches!(err, WantedError::Scenario(_)));
    }

    #[test]
    fn validate_rejects_duplicate_records() {
        let mut scenario = Scenario::demo();
        scenario.stations[0].records[1].id = 1;
        assert!(matches!(scenario.validate(), Err(WantedError::Scenario(_))));
    }

    #[test]
    fn validate_rejects_unknown_station() {
        let mut scenario = Scenario::demo();
        scenario.actors[0].station = Some(StationId(99));
        let err = scenario.validate().unwrap_err();
        assert!(err.to_string().contains("station-99"));
    }

    #[test]
    fn validate_rejects_visor_sharing_actor_id() {
        let mut scenario = Scenario::demo();
        scenario.visors[0].id = EntityId(10);
        assert!(scenario.validate().is_err());
    }

    #[test]
    fn visor_id_defaults_to_first_visor() {
        let scenario = Scenario::demo();
        assert_eq!(scenario.visor_id(None).unwrap(), EntityId(100));
        assert_eq!(scenario.visor_id(Some(EntityId(100))).unwrap(), EntityId(100));
    }

    #[test]
    fn visor_id_rejects_undeclared_entities() {
        let scenario = Scenario::demo();
        let err = scenario.visor_id(Some(EntityId(10))).unwrap_err();
        assert!(matches!(err, WantedError::Scenario(_)));
        assert!(err.to_string().contains("#10"));

        let empty = Scenario {
            visors: Vec::new(),
            ..Scenario::demo()
        };
        assert!(matches!(empty.visor_id(None), Err(WantedError::Scenario(_))));
    }
}
