//! Security visor feature for a station simulation server.
//!
//! Using the visor's accuse action on a crew member flags every personnel
//! record carrying that crew member's visible name as wanted, on the
//! accuser's station, and broadcasts each change on the security channel.
//!
//! The host supplies stations, identities, records, radio and localization
//! through the traits in [`host`]; [`workflow`] holds the accusation logic and
//! [`system`] wires it to a typed [`bus::EventBus`].

pub mod action;
pub mod bus;
pub mod config;
pub mod error;
pub mod host;
pub mod memory;
pub mod notification;
pub mod records;
pub mod scenario;
pub mod system;
pub mod workflow;

pub use config::WantedConfig;
pub use error::WantedError;
pub use workflow::{AccuseRequest, WantedStatusWorkflow};
