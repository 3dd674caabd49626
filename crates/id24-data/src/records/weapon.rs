use serde::{Deserialize, Serialize};

use crate::error::DataResult;
use crate::records::{ExtensionGroup, Record, Tiered};
use crate::tier::FeatureTier;

/// Index of the ID24 incinerator.
pub const WP_INCINERATOR: i32 = -1_879_048_192;

/// Index of the ID24 calamity blade.
pub const WP_CALAMITYBLADE: i32 = -1_879_048_191;

/// A weapon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WeaponInfo {
    /// Weapon index.
    pub index: i32,
    /// The earliest tier able to interpret this record.
    pub minimum_features: FeatureTier,

    /// Ammo type consumed.
    pub ammo: i32,
    /// State while raising.
    pub upstate: i32,
    /// State while lowering.
    pub downstate: i32,
    /// State while ready.
    pub readystate: i32,
    /// State while attacking.
    pub atkstate: i32,
    /// Muzzle flash state.
    pub flashstate: i32,

    /// MBF21 fields.
    pub mbf21: Tiered<WeaponMbf21>,
    /// ID24 fields.
    pub id24: Tiered<WeaponId24>,
}

/// Weapon fields added by MBF21.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WeaponMbf21 {
    /// MBF21 weapon flags.
    pub flags: i32,
    /// Ammo consumed per shot.
    pub ammopershot: i32,
}

impl ExtensionGroup for WeaponMbf21 {
    const GROUP: &'static str = "mbf21";
    const INTRODUCED: FeatureTier = FeatureTier::Mbf21;
}

/// Weapon fields added by ID24.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WeaponId24 {
    /// Selection slot.
    pub slot: i32,
    /// Order within the slot.
    pub slotpriority: i32,
    /// Preference when switching automatically.
    pub switchpriority: i32,
    /// Owned at game start.
    pub initialowned: bool,
    /// Raised at game start.
    pub initialraised: bool,
    /// Icon shown in the weapon carousel.
    pub carouselicon: Option<String>,
    /// Only switch to on pickup if this weapon is owned.
    pub allowswitchifownedweapon: i32,
    /// Never switch to on pickup if this weapon is owned.
    pub noswitchifownedweapon: i32,
    /// Only switch to on pickup if this item is owned.
    pub allowswitchifowneditem: i32,
    /// Never switch to on pickup if this item is owned.
    pub noswitchifowneditem: i32,
}

impl ExtensionGroup for WeaponId24 {
    const GROUP: &'static str = "id24";
    const INTRODUCED: FeatureTier = FeatureTier::Id24;
}

impl WeaponInfo {
    /// Ammo used per shot, as a reader at `reader`. Readers without the
    /// MBF21 group fall back to one per shot.
    pub fn ammo_per_shot(&self, reader: FeatureTier) -> DataResult<i32> {
        if !reader.supports(WeaponMbf21::INTRODUCED) {
            return Ok(1);
        }
        Ok(self.mbf21.read(reader)?.map_or(1, |group| group.ammopershot))
    }

    /// Selection slot, as a reader at `reader`.
    pub fn slot(&self, reader: FeatureTier) -> DataResult<Option<i32>> {
        Ok(self.id24.read(reader)?.map(|group| group.slot))
    }
}

impl Record for WeaponInfo {
    const TABLE: &'static str = "weapons";
    const GROUPS: &'static [(&'static str, FeatureTier)] = &[
        (WeaponMbf21::GROUP, WeaponMbf21::INTRODUCED),
        (WeaponId24::GROUP, WeaponId24::INTRODUCED),
    ];

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
        let mut dropped = Vec::new();
        if self.mbf21.strip_above(tier) {
            dropped.push(WeaponMbf21::GROUP);
        }
        if self.id24.strip_above(tier) {
            dropped.push(WeaponId24::GROUP);
        }
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incinerator_uses_the_reserved_index() {
        let weapon: WeaponInfo = serde_json::from_str(
            r#"{
                "index": -1879048192,
                "minimum_features": "id24",
                "ammo": -1879048192,
                "mbf21": { "ammopershot": 1 },
                "id24": { "slot": 5, "carouselicon": "INCNICON" }
            }"#,
        )
        .unwrap();
        assert_eq!(weapon.index(), WP_INCINERATOR);
        assert_eq!(weapon.ammo, crate::records::ammo::AM_FUEL);
        assert_eq!(weapon.slot(FeatureTier::Id24).unwrap(), Some(5));
        assert!(weapon.slot(FeatureTier::Mbf21).is_err());
        assert_eq!(WP_CALAMITYBLADE, WP_INCINERATOR + 1);
    }

    #[test]
    fn ammo_per_shot_defaults_below_mbf21() {
        let weapon = WeaponInfo {
            mbf21: Tiered::new(WeaponMbf21 {
                flags: 0,
                ammopershot: 40,
            }),
            ..WeaponInfo::default()
        };
        assert_eq!(weapon.ammo_per_shot(FeatureTier::Mbf21).unwrap(), 40);
        assert_eq!(weapon.ammo_per_shot(FeatureTier::Boom202).unwrap(), 1);
        assert_eq!(WeaponInfo::default().ammo_per_shot(FeatureTier::Id24).unwrap(), 1);
    }
}
