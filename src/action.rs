//! The visor's accuse action: which item carries it, when it is granted,
//! and in which equipment contexts it is offered to the wearer.

use serde::{Deserialize, Serialize};

use crate::records::ActionId;

/// Equipment slot an item can be worn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Head,
    Eyes,
    Ears,
    Mask,
    Neck,
    Outer,
    Inner,
    Gloves,
    Belt,
    Back,
    Pocket,
    Feet,
    Id,
}

/// Where an item currently is, as seen by the action query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionContext {
    pub in_hands: bool,
    pub slot: Option<Slot>,
}

impl ActionContext {
    pub fn worn(slot: Slot) -> Self {
        Self {
            in_hands: false,
            slot: Some(slot),
        }
    }

    pub fn held() -> Self {
        Self {
            in_hands: true,
            slot: None,
        }
    }
}

/// Whether the accuse action should be offered for an item in `context`.
///
/// Never while the item is held; never from a restricted slot.
pub fn should_expose_action(context: ActionContext, restricted: &[Slot]) -> bool {
    if context.in_hands {
        return false;
    }
    match context.slot {
        Some(slot) => !restricted.contains(&slot),
        None => true,
    }
}

/// Component carried by items that can raise accusations (security visors).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WantedVisor {
    /// Action prototype granted on map init. `None` or empty grants nothing.
    #[serde(default)]
    pub action: Option<String>,

    /// Action granted to the item, once map init has run.
    #[serde(skip)]
    pub action_entity: Option<ActionId>,
}

impl WantedVisor {
    pub fn with_action(prototype: impl Into<String>) -> Self {
        Self {
            action: Some(prototype.into()),
            action_entity: None,
        }
    }

    /// The prototype to grant, if one is configured.
    pub fn prototype(&self) -> Option<&str> {
        self.action.as_deref().filter(|p| !p.is_empty())
    }
}
