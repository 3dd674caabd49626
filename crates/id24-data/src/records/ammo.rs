use serde::{Deserialize, Serialize};

use crate::records::{ExtensionGroup, Record, Tiered};
use crate::tier::FeatureTier;
use crate::types::Fixed;

/// Index of the ID24 fuel ammo type.
pub const AM_FUEL: i32 = -1_879_048_192;

/// Number of skill levels with an ammo multiplier.
pub const NUM_SKILLS: usize = 5;

/// An ammo type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AmmoInfo {
    /// Ammo type index.
    pub index: i32,
    /// The earliest tier able to interpret this record.
    pub minimum_features: FeatureTier,

    /// Amount in a clip pickup.
    pub clipammo: i32,
    /// Carrying capacity.
    pub maxammo: i32,

    /// ID24 fields.
    pub id24: Tiered<AmmoId24>,
}

/// Ammo fields added by ID24.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AmmoId24 {
    /// Amount at game start.
    pub initialammo: i32,
    /// Capacity with a backpack.
    pub maxupgradedammo: i32,
    /// Amount in a box pickup.
    pub boxammo: i32,
    /// Amount in a backpack pickup.
    pub backpackammo: i32,
    /// Amount that comes with a weapon pickup.
    pub weaponammo: i32,
    /// Amount in a dropped clip.
    pub droppedclipammo: i32,
    /// Amount in a dropped box.
    pub droppedboxammo: i32,
    /// Amount in a dropped backpack.
    pub droppedbackpackammo: i32,
    /// Amount with a dropped weapon.
    pub droppedweaponammo: i32,
    /// Amount with a weapon pickup in deathmatch.
    pub deathmatchweaponammo: i32,
    /// Pickup multiplier per skill level.
    pub skillmul: [Fixed; NUM_SKILLS],
}

impl ExtensionGroup for AmmoId24 {
    const GROUP: &'static str = "id24";
    const INTRODUCED: FeatureTier = FeatureTier::Id24;
}

impl Record for AmmoInfo {
    const TABLE: &'static str = "ammo";
    const GROUPS: &'static [(&'static str, FeatureTier)] =
        &[(AmmoId24::GROUP, AmmoId24::INTRODUCED)];

    fn index(&self) -> i32 {
        self.index
    }

    fn minimum_features(&self) -> FeatureTier {
        self.minimum_features
    }

    fn set_minimum_features(&mut self, tier: FeatureTier) {
        self.minimum_features = tier;
    }

    fn strip_above(&mut self, tier: FeatureTier) -> Vec<&'static str> {
        if self.id24.strip_above(tier) {
            vec![AmmoId24::GROUP]
        } else {
            Vec::new()
        }
    }
}
