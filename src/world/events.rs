//! Narrative event definitions and option payloads.
//!
//! Events are pure data: the tick engine places one in the pending-event
//! slot and the presentation layer reports back a chosen option index,
//! which [`crate::core::commands::choose_event_option`] applies.

use super::regions::RegionId;
use crate::items::ItemId;
use serde::{Deserialize, Serialize};

/// Static event identifiers. Ids are stable across saves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventId {
    WanderingHerbalist,
    WoundedBeast,
    BanditAmbush,
    CollapsedShrine,
    MerchantCaravan,
    FatedImmortalDream,
    FatedDemonWhisper,
    FatedSwordTomb,
}

/// One selectable response to an event.
#[derive(Debug, Clone)]
pub struct EventOption {
    pub label: &'static str,
    pub karma_delta: i32,
    pub stone_delta: i64,
    pub item_grant: Option<ItemId>,
}

/// Static narrative event definition.
#[derive(Debug, Clone)]
pub struct EventDef {
    pub id: EventId,
    pub name: &'static str,
    pub text: &'static str,
    /// Fated events are reachable only through the luck-scaled fated roll.
    pub fated: bool,
    /// Regions this event prefers; empty means anywhere.
    pub regions: &'static [RegionId],
    pub options: &'static [EventOption],
}

pub fn all_events() -> &'static [EventDef] {
    &EVENTS
}

pub fn get_event(id: EventId) -> &'static EventDef {
    EVENTS
        .iter()
        .find(|def| def.id == id)
        .expect("every EventId has a table entry")
}

/// All fated events, in table order.
pub fn fated_events() -> impl Iterator<Item = &'static EventDef> {
    EVENTS.iter().filter(|def| def.fated)
}

static EVENTS: [EventDef; 8] = [
    EventDef {
        id: EventId::WanderingHerbalist,
        name: "Wandering Herbalist",
        text: "An old herbalist stumbles on the path, her basket spilling.",
        fated: false,
        regions: &[RegionId::AzureValley, RegionId::VerdantForest],
        options: &[
            EventOption {
                label: "Help gather the herbs",
                karma_delta: 10,
                stone_delta: 0,
                item_grant: Some(ItemId::SpiritHerb),
            },
            EventOption {
                label: "Take the basket and run",
                karma_delta: -15,
                stone_delta: 20,
                item_grant: None,
            },
            EventOption {
                label: "Walk past",
                karma_delta: 0,
                stone_delta: 0,
                item_grant: None,
            },
        ],
    },
    EventDef {
        id: EventId::WoundedBeast,
        name: "Wounded Beast",
        text: "A spirit beast lies bleeding beneath a thorn bush, watching you.",
        fated: false,
        regions: &[RegionId::BeastWilds, RegionId::VerdantForest],
        options: &[
            EventOption {
                label: "Tend its wounds",
                karma_delta: 15,
                stone_delta: 0,
                item_grant: None,
            },
            EventOption {
                label: "Finish it for the core",
                karma_delta: -20,
                stone_delta: 0,
                item_grant: Some(ItemId::BeastCore),
            },
        ],
    },
    EventDef {
        id: EventId::BanditAmbush,
        name: "Bandit Ambush",
        text: "Three rogue cultivators block the road, palms crackling with qi.",
        fated: false,
        regions: &[RegionId::AshenWastes, RegionId::DemonRavine],
        options: &[
            EventOption {
                label: "Pay the toll",
                karma_delta: 0,
                stone_delta: -30,
                item_grant: None,
            },
            EventOption {
                label: "Fight and rob them instead",
                karma_delta: -25,
                stone_delta: 50,
                item_grant: None,
            },
        ],
    },
    EventDef {
        id: EventId::CollapsedShrine,
        name: "Collapsed Shrine",
        text: "A half-buried shrine hums faintly under centuries of dust.",
        fated: false,
        regions: &[RegionId::SkyMountains, RegionId::AshenWastes],
        options: &[
            EventOption {
                label: "Restore the altar",
                karma_delta: 20,
                stone_delta: -10,
                item_grant: None,
            },
            EventOption {
                label: "Pry out the offering stones",
                karma_delta: -10,
                stone_delta: 40,
                item_grant: None,
            },
        ],
    },
    EventDef {
        id: EventId::MerchantCaravan,
        name: "Merchant Caravan",
        text: "A caravan master waves you over, eager to trade with a cultivator.",
        fated: false,
        regions: &[],
        options: &[
            EventOption {
                label: "Trade spirit herbs",
                karma_delta: 0,
                stone_delta: 25,
                item_grant: None,
            },
            EventOption {
                label: "Decline politely",
                karma_delta: 5,
                stone_delta: 0,
                item_grant: None,
            },
        ],
    },
    EventDef {
        id: EventId::FatedImmortalDream,
        name: "Immortal's Dream",
        text: "You doze against a stone and dream of a white-robed figure tracing talismans in the air.",
        fated: true,
        regions: &[RegionId::SkyMountains],
        options: &[
            EventOption {
                label: "Memorize the tracings",
                karma_delta: 0,
                stone_delta: 0,
                item_grant: Some(ItemId::AzureSwordScripture),
            },
            EventOption {
                label: "Wake yourself",
                karma_delta: 0,
                stone_delta: 0,
                item_grant: None,
            },
        ],
    },
    EventDef {
        id: EventId::FatedDemonWhisper,
        name: "Demon's Whisper",
        text: "A voice coils out of a crack in the earth, offering power for a price.",
        fated: true,
        regions: &[RegionId::DemonRavine],
        options: &[
            EventOption {
                label: "Accept the bargain",
                karma_delta: -60,
                stone_delta: 100,
                item_grant: None,
            },
            EventOption {
                label: "Seal the crack",
                karma_delta: 30,
                stone_delta: 0,
                item_grant: None,
            },
        ],
    },
    EventDef {
        id: EventId::FatedSwordTomb,
        name: "Sword Tomb",
        text: "A field of rusted blades parts before you, one sword still singing.",
        fated: true,
        regions: &[RegionId::AshenWastes, RegionId::SkyMountains],
        options: &[
            EventOption {
                label: "Draw the singing sword",
                karma_delta: 0,
                stone_delta: 0,
                item_grant: Some(ItemId::ThunderwardTalisman),
            },
            EventOption {
                label: "Bow and retreat",
                karma_delta: 10,
                stone_delta: 0,
                item_grant: None,
            },
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_id_resolves() {
        for def in all_events() {
            assert_eq!(get_event(def.id).id, def.id);
        }
    }

    #[test]
    fn test_every_event_has_options() {
        for def in all_events() {
            assert!(!def.options.is_empty(), "{} has no options", def.name);
        }
    }

    #[test]
    fn test_fated_pool_is_nonempty() {
        assert!(fated_events().count() >= 3);
    }
}
