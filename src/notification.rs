//! The security-channel message emitted for every record flagged as wanted.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::WantedConfig;
use crate::host::{IdentityResolver, Localizer, RecordStore};
use crate::records::{EntityId, RecordKey};

/// A rendered radio broadcast plus the fields it was rendered from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationMessage {
    pub id: Uuid,
    pub wanted_name: String,
    pub wanted_job: String,
    pub officer: String,
    pub reason: String,
    pub text: String,
    pub channel: String,
    /// Entity the broadcast is attributed to (the visor).
    pub sender: EntityId,
    /// Entity the broadcast originates from.
    pub origin: EntityId,
}

/// Builds notifications for flagged records.
pub struct NotificationBuilder<'a, I, R, L> {
    identities: &'a I,
    records: &'a R,
    loc: &'a L,
    config: &'a WantedConfig,
}

impl<'a, I, R, L> NotificationBuilder<'a, I, R, L>
where
    I: IdentityResolver,
    R: RecordStore,
    L: Localizer,
{
    pub fn new(identities: &'a I, records: &'a R, loc: &'a L, config: &'a WantedConfig) -> Self {
        Self {
            identities,
            records,
            loc,
            config,
        }
    }

    /// Builds the broadcast for `key`, attributed to `sender`.
    ///
    /// The record is looked up again rather than trusted from the caller, and
    /// every field that cannot be resolved falls back to the unknown placeholder.
    pub fn build(
        &self,
        sender: EntityId,
        officer: EntityId,
        key: RecordKey,
        reason: Option<&str>,
    ) -> NotificationMessage {
        let unknown = self.config.unknown.as_str();

        let (wanted_name, wanted_job) = match self.records.record(key) {
            Some(entry) => (entry.name, entry.job_title),
            None => (unknown.to_string(), unknown.to_string()),
        };

        let officer_title = self
            .identities
            .short_identity(officer)
            .unwrap_or_else(|| unknown.to_string());

        let reason = match reason {
            Some(r) if !r.trim().is_empty() => r.to_string(),
            _ => unknown.to_string(),
        };

        let text = self.loc.format(
            &self.config.message_template,
            &[
                ("name", wanted_name.as_str()),
                ("officer", officer_title.as_str()),
                ("reason", reason.as_str()),
                ("job", wanted_job.as_str()),
            ],
        );

        NotificationMessage {
            id: Uuid::new_v4(),
            wanted_name,
            wanted_job,
            officer: officer_title,
            reason,
            text,
            channel: self.config.channel.clone(),
            sender,
            origin: sender,
        }
    }
}
