mod entry;
mod status;

pub use entry::{ActionId, EntityId, GeneralRecord, RecordKey, StationId};
pub use status::{CriminalRecord, SecurityStatus, StatusChange};
