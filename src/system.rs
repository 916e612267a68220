//! Event wiring for the wanted-status feature.
//!
//! [`WantedStatusSystem`] owns the [`WantedVisor`] components and reacts to
//! three events directed at visor items:
//!
//! - [`MapInit`]: grant the configured action to the item.
//! - [`AccuseWanted`]: run the accusation workflow.
//! - [`GetItemActions`]: offer the granted action when the item is worn in
//!   an allowed slot.
//!
//! Events aimed at entities without a visor component are ignored.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tracing::debug;

use crate::action::{ActionContext, WantedVisor, should_expose_action};
use crate::bus::{Event, EventBus};
use crate::config::WantedConfig;
use crate::host::{
    ActionRegistry, IdentityResolver, Localizer, NotificationSink, RecordStore, StationResolver,
};
use crate::records::{ActionId, EntityId};
use crate::workflow::{AccuseRequest, WantedStatusWorkflow};

/// Raised once for every entity when its map starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapInit {
    pub entity: EntityId,
}

impl Event for MapInit {}

/// Raised when a visor's accuse action is used on a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccuseWanted {
    pub item: EntityId,
    pub performer: EntityId,
    pub target: EntityId,
    pub reason: Option<String>,
}

impl Event for AccuseWanted {}

/// Raised when the host collects the actions an item offers its holder.
/// Handlers push into `actions`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetItemActions {
    pub item: EntityId,
    pub context: ActionContext,
    pub actions: Vec<ActionId>,
}

impl GetItemActions {
    pub fn new(item: EntityId, context: ActionContext) -> Self {
        Self {
            item,
            context,
            actions: Vec::new(),
        }
    }
}

impl Event for GetItemActions {}

/// Capabilities the system needs from a single host.
pub trait Host:
    StationResolver + IdentityResolver + RecordStore + NotificationSink + Localizer + ActionRegistry
{
}

impl<T> Host for T where
    T: StationResolver
        + IdentityResolver
        + RecordStore
        + NotificationSink
        + Localizer
        + ActionRegistry
{
}

pub struct WantedStatusSystem<'a, H> {
    host: &'a H,
    config: &'a WantedConfig,
    visors: HashMap<EntityId, WantedVisor>,
}

impl<'a, H: Host> WantedStatusSystem<'a, H> {
    pub fn new(host: &'a H, config: &'a WantedConfig) -> Self {
        Self {
            host,
            config,
            visors: HashMap::new(),
        }
    }

    /// Attaches a visor component to `entity`, replacing any previous one.
    pub fn add_visor(&mut self, entity: EntityId, visor: WantedVisor) {
        self.visors.insert(entity, visor);
    }

    pub fn visor(&self, entity: EntityId) -> Option<&WantedVisor> {
        self.visors.get(&entity)
    }

    /// Subscribes the system's handlers on `bus`.
    pub fn subscribe(system: &Rc<RefCell<Self>>, bus: &mut EventBus<'a>)
    where
        H: 'a,
    {
        let sys = Rc::clone(system);
        bus.subscribe(move |ev: &mut MapInit| sys.borrow_mut().on_map_init(ev));

        let sys = Rc::clone(system);
        bus.subscribe(move |ev: &mut AccuseWanted| sys.borrow().on_accuse(ev));

        let sys = Rc::clone(system);
        bus.subscribe(move |ev: &mut GetItemActions| sys.borrow().on_get_item_actions(ev));
    }

    pub fn on_map_init(&mut self, ev: &MapInit) {
        let Some(visor) = self.visors.get_mut(&ev.entity) else {
            return;
        };
        let Some(prototype) = visor.prototype() else {
            return;
        };
        if visor.action_entity.is_some() {
            return;
        }

        let action = self.host.add_action(ev.entity, prototype);
        debug!(item = %ev.entity, %action, prototype, "granted accuse action");
        visor.action_entity = Some(action);
    }

    pub fn on_accuse(&self, ev: &AccuseWanted) {
        if !self.visors.contains_key(&ev.item) {
            return;
        }

        let workflow = WantedStatusWorkflow::from_host(self.host, self.config);
        workflow.accuse(&AccuseRequest {
            item: ev.item,
            accuser: ev.performer,
            accused: ev.target,
            reason: ev.reason.clone(),
        });
    }

    pub fn on_get_item_actions(&self, ev: &mut GetItemActions) {
        let Some(visor) = self.visors.get(&ev.item) else {
            return;
        };
        if !should_expose_action(ev.context, &self.config.restricted_slots) {
            return;
        }
        if let Some(action) = visor.action_entity {
            ev.actions.push(action);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Slot;
    use crate::memory::{MemoryActor, MemoryHost};
    use crate::records::{CriminalRecord, GeneralRecord, RecordKey, SecurityStatus, StationId};

    const STATION: StationId = StationId(1);
    const VISOR: EntityId = EntityId(100);
    const PLAIN_GLASSES: EntityId = EntityId(101);
    const OFFICER: EntityId = EntityId(10);
    const BOB: EntityId = EntityId(21);

    fn host(config: &WantedConfig) -> MemoryHost {
        let host = MemoryHost::new(config.templates.clone());
        host.add_record(
            STATION,
            1,
            GeneralRecord::new("Bob", "Janitor"),
            CriminalRecord::default(),
        );
        host.add_actor(OFFICER, MemoryActor::humanoid("Carol").with_station(STATION));
        host.add_actor(BOB, MemoryActor::humanoid("Bob").with_station(STATION));
        host
    }

    fn accuse(item: EntityId) -> AccuseWanted {
        AccuseWanted {
            item,
            performer: OFFICER,
            target: BOB,
            reason: None,
        }
    }

    #[test]
    fn accuse_event_runs_workflow() {
        let config = WantedConfig::default();
        let host = host(&config);
        let system = Rc::new(RefCell::new(WantedStatusSystem::new(&host, &config)));
        system
            .borrow_mut()
            .add_visor(VISOR, WantedVisor::with_action("ActionAccuseWanted"));

        let mut bus = EventBus::new();
        WantedStatusSystem::subscribe(&system, &mut bus);

        assert_eq!(bus.raise(&mut accuse(VISOR)), 1);
        assert_eq!(host.status_of(RecordKey::new(1, STATION)), Some(SecurityStatus::Wanted));
        assert_eq!(host.sent().len(), 1);
        assert_eq!(host.sent()[0].sender, VISOR);
    }

    #[test]
    fn accuse_event_for_item_without_visor_is_ignored() {
        let config = WantedConfig::default();
        let host = host(&config);
        let system = Rc::new(RefCell::new(WantedStatusSystem::new(&host, &config)));

        let mut bus = EventBus::new();
        WantedStatusSystem::subscribe(&system, &mut bus);
        bus.raise(&mut accuse(PLAIN_GLASSES));

        assert!(host.status_requests().is_empty());
        assert!(host.sent().is_empty());
    }

    #[test]
    fn map_init_grants_action_once() {
        let config = WantedConfig::default();
        let host = host(&config);
        let system = Rc::new(RefCell::new(WantedStatusSystem::new(&host, &config)));
        system
            .borrow_mut()
            .add_visor(VISOR, WantedVisor::with_action("ActionAccuseWanted"));

        let mut bus = EventBus::new();
        WantedStatusSystem::subscribe(&system, &mut bus);
        bus.raise(&mut MapInit { entity: VISOR });
        bus.raise(&mut MapInit { entity: VISOR });
        bus.raise(&mut MapInit { entity: PLAIN_GLASSES });

        let granted = host.granted_actions();
        assert_eq!(granted.len(), 1);
        assert_eq!(granted[0].0, VISOR);
        assert_eq!(granted[0].1, "ActionAccuseWanted");
        assert_eq!(
            system.borrow().visor(VISOR).unwrap().action_entity,
            Some(granted[0].2)
        );
    }

    #[test]
    fn map_init_without_prototype_grants_nothing() {
        let config = WantedConfig::default();
        let host = host(&config);
        let mut system = WantedStatusSystem::new(&host, &config);
        system.add_visor(VISOR, WantedVisor::default());

        system.on_map_init(&MapInit { entity: VISOR });

        assert!(host.granted_actions().is_empty());
        assert_eq!(system.visor(VISOR).unwrap().action_entity, None);
    }

    #[test]
    fn item_actions_respect_context() {
        let config = WantedConfig::default();
        let host = host(&config);
        let system = Rc::new(RefCell::new(WantedStatusSystem::new(&host, &config)));
        system
            .borrow_mut()
            .add_visor(VISOR, WantedVisor::with_action("ActionAccuseWanted"));

        let mut bus = EventBus::new();
        WantedStatusSystem::subscribe(&system, &mut bus);
        bus.raise(&mut MapInit { entity: VISOR });
        let action = system.borrow().visor(VISOR).unwrap().action_entity.unwrap();

        let mut worn = GetItemActions::new(VISOR, ActionContext::worn(Slot::Eyes));
        bus.raise(&mut worn);
        assert_eq!(worn.actions, vec![action]);

        let mut held = GetItemActions::new(VISOR, ActionContext::held());
        bus.raise(&mut held);
        assert!(held.actions.is_empty());

        let mut pocketed = GetItemActions::new(VISOR, ActionContext::worn(Slot::Pocket));
        bus.raise(&mut pocketed);
        assert!(pocketed.actions.is_empty());

        let mut other = GetItemActions::new(PLAIN_GLASSES, ActionContext::worn(Slot::Eyes));
        bus.raise(&mut other);
        assert!(other.actions.is_empty());
    }

    #[test]
    fn item_actions_before_map_init_offer_nothing() {
        let config = WantedConfig::default();
        let host = host(&config);
        let mut system = WantedStatusSystem::new(&host, &config);
        system.add_visor(VISOR, WantedVisor::with_action("ActionAccuseWanted"));

        let mut ev = GetItemActions::new(VISOR, ActionContext::worn(Slot::Eyes));
        system.on_get_item_actions(&mut ev);
        assert!(ev.actions.is_empty());
    }
}
