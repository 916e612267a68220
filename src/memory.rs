//! In-process host: actors, station rosters, radio log and localization
//! table held in memory.
//!
//! [`MemoryHost`] implements every trait in [`crate::host`], so a single
//! instance can be handed to the workflow for all of its collaborators.
//! Interior mutability is `RefCell`/`Cell`; the host is single-threaded.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::host::{
    ActionRegistry, IdentityResolver, Localizer, NotificationSink, RecordStore, StationResolver,
};
use crate::notification::NotificationMessage;
use crate::records::{
    ActionId, CriminalRecord, EntityId, GeneralRecord, RecordKey, SecurityStatus, StationId,
};

/// First id handed out for granted actions, kept clear of scenario entity ids.
const FIRST_ACTION_ID: u64 = 10_000;

/// A live entity as the in-memory host sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryActor {
    pub name: String,
    /// Name shown in place of `name` (worn ID card, disguise).
    pub identity: Option<String>,
    pub humanoid: bool,
    pub station: Option<StationId>,
    /// Short identity title, e.g. "Carol (Security Officer)".
    pub title: Option<String>,
}

impl MemoryActor {
    pub fn humanoid(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            identity: None,
            humanoid: true,
            station: None,
            title: None,
        }
    }

    /// A non-humanoid entity (an item, a borg, a mouse).
    pub fn object(name: impl Into<String>) -> Self {
        Self {
            humanoid: false,
            ..Self::humanoid(name)
        }
    }

    pub fn with_identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = Some(identity.into());
        self
    }

    pub fn with_station(mut self, station: StationId) -> Self {
        self.station = Some(station);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

#[derive(Debug, Default)]
struct Station {
    name: String,
    records: BTreeMap<u32, (GeneralRecord, CriminalRecord)>,
}

/// A status change request as seen by the store, accepted or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRequest {
    pub key: RecordKey,
    pub status: SecurityStatus,
    pub reason: String,
    pub accepted: bool,
}

/// In-memory implementation of all host capabilities.
#[derive(Debug, Default)]
pub struct MemoryHost {
    actors: RefCell<HashMap<EntityId, MemoryActor>>,
    stations: RefCell<BTreeMap<StationId, Station>>,
    templates: HashMap<String, String>,
    sent: RefCell<Vec<NotificationMessage>>,
    requests: RefCell<Vec<StatusRequest>>,
    locked: RefCell<HashSet<RecordKey>>,
    granted: RefCell<Vec<(EntityId, String, ActionId)>>,
    next_action: Cell<u64>,
}

impl MemoryHost {
    pub fn new(templates: HashMap<String, String>) -> Self {
        Self {
            templates,
            next_action: Cell::new(FIRST_ACTION_ID),
            ..Default::default()
        }
    }

    pub fn add_actor(&self, id: EntityId, actor: MemoryActor) {
        self.actors.borrow_mut().insert(id, actor);
    }

    pub fn add_station(&self, id: StationId, name: impl Into<String>) {
        self.stations.borrow_mut().entry(id).or_default().name = name.into();
    }

    /// Adds or replaces a record. The station is created if needed.
    pub fn add_record(
        &self,
        station: StationId,
        id: u32,
        general: GeneralRecord,
        criminal: CriminalRecord,
    ) {
        self.stations
            .borrow_mut()
            .entry(station)
            .or_default()
            .records
            .insert(id, (general, criminal));
    }

    /// Makes the store reject every status change for `key`, the way a
    /// records policy would.
    pub fn lock_record(&self, key: RecordKey) {
        self.locked.borrow_mut().insert(key);
    }

    pub fn criminal_record(&self, key: RecordKey) -> Option<CriminalRecord> {
        self.stations
            .borrow()
            .get(&key.station)
            .and_then(|s| s.records.get(&key.id))
            .map(|(_, criminal)| criminal.clone())
    }

    pub fn status_of(&self, key: RecordKey) -> Option<SecurityStatus> {
        self.criminal_record(key).map(|c| c.status)
    }

    /// Station ids and names, ordered by id.
    pub fn stations(&self) -> Vec<(StationId, String)> {
        self.stations
            .borrow()
            .iter()
            .map(|(id, s)| (*id, s.name.clone()))
            .collect()
    }

    /// Full roster of a station, ordered by record id.
    pub fn roster(&self, station: StationId) -> Vec<(u32, GeneralRecord, CriminalRecord)> {
        self.stations
            .borrow()
            .get(&station)
            .map(|s| {
                s.records
                    .iter()
                    .map(|(id, (g, c))| (*id, g.clone(), c.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Everything broadcast so far.
    pub fn sent(&self) -> Vec<NotificationMessage> {
        self.sent.borrow().clone()
    }

    /// Every status change the store was asked for.
    pub fn status_requests(&self) -> Vec<StatusRequest> {
        self.requests.borrow().clone()
    }

    pub fn granted_actions(&self) -> Vec<(EntityId, String, ActionId)> {
        self.granted.borrow().clone()
    }

    pub fn contains_actor(&self, id: EntityId) -> bool {
        self.actors.borrow().contains_key(&id)
    }
}

impl StationResolver for MemoryHost {
    fn resolve_station(&self, entity: EntityId) -> Option<StationId> {
        self.actors.borrow().get(&entity).and_then(|a| a.station)
    }
}

impl IdentityResolver for MemoryHost {
    fn has_physical_appearance(&self, entity: EntityId) -> bool {
        self.actors
            .borrow()
            .get(&entity)
            .is_some_and(|a| a.humanoid)
    }

    fn display_name(&self, entity: EntityId) -> String {
        match self.actors.borrow().get(&entity) {
            Some(actor) => actor.identity.clone().unwrap_or_else(|| actor.name.clone()),
            None => entity.to_string(),
        }
    }

    fn short_identity(&self, entity: EntityId) -> Option<String> {
        self.actors.borrow().get(&entity).and_then(|a| a.title.clone())
    }
}

impl RecordStore for MemoryHost {
    fn records(&self, station: StationId) -> Vec<(u32, GeneralRecord)> {
        self.stations
            .borrow()
            .get(&station)
            .map(|s| {
                s.records
                    .iter()
                    .map(|(id, (general, _))| (*id, general.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn record(&self, key: RecordKey) -> Option<GeneralRecord> {
        self.stations
            .borrow()
            .get(&key.station)
            .and_then(|s| s.records.get(&key.id))
            .map(|(general, _)| general.clone())
    }

    fn try_change_status(&self, key: RecordKey, status: SecurityStatus, reason: &str) -> bool {
        let accepted = if self.locked.borrow().contains(&key) {
            false
        } else {
            let mut stations = self.stations.borrow_mut();
            match stations
                .get_mut(&key.station)
                .and_then(|s| s.records.get_mut(&key.id))
            {
                Some((_, criminal)) => criminal.change_status(status, Some(reason.to_string())),
                None => false,
            }
        };

        self.requests.borrow_mut().push(StatusRequest {
            key,
            status,
            reason: reason.to_string(),
            accepted,
        });
        accepted
    }
}

impl NotificationSink for MemoryHost {
    fn send(&self, message: NotificationMessage) {
        self.sent.borrow_mut().push(message);
    }
}

impl Localizer for MemoryHost {
    fn format(&self, id: &str, args: &[(&str, &str)]) -> String {
        let Some(template) = self.templates.get(id) else {
            return id.to_string();
        };
        render(template, args)
    }
}

/// Substitutes `{ $name }` and `{$name}` placeholders in one pass over the
/// template. Substituted values are never scanned again.
fn render(template: &str, args: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open..];
        let Some(close) = after.find('}') else {
            out.push_str(after);
            return out;
        };

        let placeholder = &after[..=close];
        let value = placeholder[1..close]
            .trim()
            .strip_prefix('$')
            .and_then(|name| args.iter().find(|(arg, _)| *arg == name))
            .map(|(_, value)| *value);
        out.push_str(value.unwrap_or(placeholder));
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}

impl ActionRegistry for MemoryHost {
    fn add_action(&self, owner: EntityId, prototype: &str) -> ActionId {
        let id = EntityId(self.next_action.get());
        self.next_action.set(id.0 + 1);
        self.granted
            .borrow_mut()
            .push((owner, prototype.to_string(), id));
        id
    }
}
