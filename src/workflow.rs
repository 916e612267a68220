//! The accusation workflow: find the accused's record on the accuser's
//! station, flag it as wanted, and tell security about it.
//!
//! Every failure mode is a silent no-op. A target that is not a humanoid, an
//! accuser without a station, a name that matches nothing, or a store that
//! refuses the change all just mean fewer side effects. Nothing is reported
//! back to the caller; skips are logged at debug level.

use tracing::{debug, info};

use crate::config::WantedConfig;
use crate::host::{IdentityResolver, Localizer, NotificationSink, RecordStore, StationResolver};
use crate::notification::NotificationBuilder;
use crate::records::{EntityId, RecordKey, SecurityStatus};

/// One accusation, as raised by the visor's action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccuseRequest {
    /// The item the action belongs to; broadcasts are attributed to it.
    pub item: EntityId,
    pub accuser: EntityId,
    pub accused: EntityId,
    pub reason: Option<String>,
}

/// Flags personnel records as wanted.
///
/// Collaborators are borrowed for the lifetime of the workflow. Hosts that
/// implement every capability on one type can use [`WantedStatusWorkflow::from_host`].
pub struct WantedStatusWorkflow<'a, S, I, R, N, L> {
    stations: &'a S,
    identities: &'a I,
    records: &'a R,
    sink: &'a N,
    loc: &'a L,
    config: &'a WantedConfig,
}

impl<'a, H> WantedStatusWorkflow<'a, H, H, H, H, H>
where
    H: StationResolver + IdentityResolver + RecordStore + NotificationSink + Localizer,
{
    pub fn from_host(host: &'a H, config: &'a WantedConfig) -> Self {
        Self::new(host, host, host, host, host, config)
    }
}

impl<'a, S, I, R, N, L> WantedStatusWorkflow<'a, S, I, R, N, L>
where
    S: StationResolver,
    I: IdentityResolver,
    R: RecordStore,
    N: NotificationSink,
    L: Localizer,
{
    pub fn new(
        stations: &'a S,
        identities: &'a I,
        records: &'a R,
        sink: &'a N,
        loc: &'a L,
        config: &'a WantedConfig,
    ) -> Self {
        Self {
            stations,
            identities,
            records,
            sink,
            loc,
            config,
        }
    }

    /// Flags every record on the accuser's station whose name equals the
    /// accused's current display name, broadcasting once per accepted change.
    ///
    /// Matching is by exact name, not by entity: a disguised target is
    /// matched against the name they are wearing.
    pub fn accuse(&self, request: &AccuseRequest) {
        if !self.identities.has_physical_appearance(request.accused) {
            debug!(accused = %request.accused, "target has no physical appearance, skipping");
            return;
        }

        let Some(station) = self.stations.resolve_station(request.accuser) else {
            debug!(accuser = %request.accuser, "accuser is not on a station, skipping");
            return;
        };

        let target_name = self.identities.display_name(request.accused);
        let reason = self.reason_for(request.reason.as_deref());
        let builder = NotificationBuilder::new(self.identities, self.records, self.loc, self.config);

        let mut flagged = 0usize;
        for (id, record) in self.records.records(station) {
            if record.name != target_name {
                continue;
            }

            let key = RecordKey::new(id, station);
            if !self
                .records
                .try_change_status(key, SecurityStatus::Wanted, &reason)
            {
                debug!(%key, name = %target_name, "status change rejected");
                continue;
            }

            let message = builder.build(request.item, request.accuser, key, Some(&reason));
            self.sink.send(message);
            flagged += 1;
        }

        if flagged > 0 {
            info!(
                %station,
                name = %target_name,
                accuser = %request.accuser,
                flagged,
                "records flagged as wanted"
            );
        } else {
            debug!(%station, name = %target_name, "no record flagged");
        }
    }

    /// The caller's reason if it has any content, otherwise the localized default.
    fn reason_for(&self, given: Option<&str>) -> String {
        match given {
            Some(r) if !r.trim().is_empty() => r.to_string(),
            _ => self.loc.format(&self.config.reason_template, &[]),
        }
    }
}
