//! Capabilities the host game server provides to the wanted-status feature.
//!
//! Nothing here is implemented by the feature itself. A host wires its own
//! station, identity, record, radio and localization services in through
//! these traits; [`crate::memory::MemoryHost`] is the in-process stand-in
//! used by the CLI and the tests.
//!
//! All methods take `&self`. The host serializes access to its own state,
//! and everything runs on the host's single-threaded tick.

use crate::notification::NotificationMessage;
use crate::records::{ActionId, EntityId, GeneralRecord, RecordKey, SecurityStatus, StationId};

/// Maps an entity to the station that owns it.
pub trait StationResolver {
    fn resolve_station(&self, entity: EntityId) -> Option<StationId>;
}

/// Identity queries against live entities.
pub trait IdentityResolver {
    /// Whether the entity is a valid humanoid target.
    fn has_physical_appearance(&self, entity: EntityId) -> bool;

    /// The name the entity is currently seen with: its identity override
    /// (e.g. a worn ID or disguise) if one is set, otherwise its own name.
    fn display_name(&self, entity: EntityId) -> String;

    /// Short "name (job)" style title, if the entity carries identification.
    fn short_identity(&self, entity: EntityId) -> Option<String>;
}

/// Station records database.
pub trait RecordStore {
    /// All general records of a station, in the store's own order.
    fn records(&self, station: StationId) -> Vec<(u32, GeneralRecord)>;

    fn record(&self, key: RecordKey) -> Option<GeneralRecord>;

    /// Requests a criminal status change. Returns `false` when the store
    /// rejects it (record missing, status already set, policy).
    fn try_change_status(&self, key: RecordKey, status: SecurityStatus, reason: &str) -> bool;
}

/// Outbound radio.
pub trait NotificationSink {
    fn send(&self, message: NotificationMessage);
}

/// Localization lookup.
pub trait Localizer {
    /// Formats template `id` with named arguments. Unknown ids format to the id.
    fn format(&self, id: &str, args: &[(&str, &str)]) -> String;
}

/// Grants actions (hotbar buttons) to entities.
pub trait ActionRegistry {
    fn add_action(&self, owner: EntityId, prototype: &str) -> ActionId;
}
