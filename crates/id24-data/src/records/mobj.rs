use serde::{Deserialize, Serialize};

use crate::error::DataResult;
use crate::records::{ExtensionGroup, Record, Tiered};
use crate::tier::FeatureTier;
use crate::types::Fixed;

/// A thing template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MobjInfo {
    /// Thing type index.
    pub index: i32,
    /// The earliest tier able to interpret this record.
    pub minimum_features: FeatureTier,

    /// Editor number placed in maps, `-1` for runtime-only things.
    pub doomednum: i32,
    /// State entered on spawn.
    pub spawnstate: i32,
    /// Starting health.
    pub spawnhealth: i32,
    /// State entered on first sighting a target.
    pub seestate: i32,
    /// Sound played on sighting.
    pub seesound: i32,
    /// Tics before reacting after being alerted.
    pub reactiontime: i32,
    /// Sound played when attacking.
    pub attacksound: i32,
    /// State entered on pain.
    pub painstate: i32,
    /// Chance out of 256 of entering the pain state.
    pub painchance: i32,
    /// Sound played on pain.
    pub painsound: i32,
    /// Melee attack state.
    pub meleestate: i32,
    /// Missile attack state.
    pub missilestate: i32,
    /// Death state.
    pub deathstate: i32,
    /// Gibbed death state.
    pub xdeathstate: i32,
    /// Sound played on death.
    pub deathsound: i32,
    /// Movement speed.
    pub speed: i32,
    /// Collision radius.
    pub radius: Fixed,
    /// Collision height.
    pub height: Fixed,
    /// Mass for thrust.
    pub mass: i32,
    /// Missile damage.
    pub damage: i32,
    /// Sound played while idle.
    pub activesound: i32,
    /// Vanilla behavior flags.
    pub flags: i32,
    /// State entered when resurrected.
    pub raisestate: i32,

    /// MBF21 fields.
    pub mbf21: Tiered<MobjMbf21>,
    /// ID24 fields.
    pub id24: Tiered<MobjId24>,
}

/// Thing fields added by MBF21.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MobjMbf21 {
    /// Speed on fast monsters skill.
    pub fastspeed: Fixed,
    /// Melee range.
    pub meleerange: Fixed,
    /// Things in the same group do not infight.
    pub infightinggroup: i32,
    /// Things in the same group pass through each other's missiles.
    pub projectilegroup: i32,
    /// Things in the same group take no splash damage from each other.
    pub splashgroup: i32,
    /// MBF21 behavior flags.
    pub flags: i32,
    /// Sound played when a ripper missile passes through.
    pub ripsound: i32,
}

impl ExtensionGroup for MobjMbf21 {
    const GROUP: &'static str = "mbf21";
    const INTRODUCED: FeatureTier = FeatureTier::Mbf21;
}

/// Thing fields added by ID24.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MobjId24 {
    /// ID24 behavior flags.
    pub flags: i32,
    /// Minimum tics before a respawn attempt.
    pub minrespawntics: i32,
    /// Dice size for respawn attempts.
    pub respawndice: i32,
    /// Thing dropped on death.
    pub dropthing: i32,
    /// Ammo type given on pickup.
    pub pickupammotype: i32,
    /// Which ammo amount category the pickup gives.
    pub pickupammocategory: i32,
    /// Weapon given on pickup.
    pub pickupweapontype: i32,
    /// Item given on pickup.
    pub pickupitemtype: i32,
    /// Bonus palette flash length on pickup.
    pub pickupbonuscount: i32,
    /// Sound played on pickup.
    pub pickupsound: i32,
    /// String mnemonic for the pickup message.
    pub pickupstringmnemonic: Option<String>,
    /// Translation lump applied when drawing.
    pub translationlump: Option<String>,
}

impl ExtensionGroup for MobjId24 {
    const GROUP: &'static str = "id24";
    const INTRODUCED: FeatureTier = FeatureTier::Id24;
}

impl MobjInfo {
    /// Fast-monsters speed, as a reader at `reader`.
    pub fn fast_speed(&self, reader: FeatureTier) -> DataResult<Option<Fixed>> {
        Ok(self.mbf21.read(reader)?.map(|group| group.fastspeed))
    }

    /// Ripper sound, as a reader at `reader`.
    pub fn rip_sound(&self, reader: FeatureTier) -> DataResult<Option<i32>> {
        Ok(self.mbf21.read(reader)?.map(|group| group.ripsound))
    }

    /// Thing dropped on death, as a reader at `reader`.
    pub fn drop_thing(&self, reader: FeatureTier) -> DataResult<Option<i32>> {
        Ok(self.id24.read(reader)?.map(|group| group.dropthing))
    }
}

impl Record for MobjInfo {
    const TABLE: &'static str = "mobjinfo";
    const GROUPS: &'static [(&'static str, FeatureTier)] = &[
        (MobjMbf21::GROUP, MobjMbf21::INTRODUCED),
        (MobjId24::GROUP, MobjId24::INTRODUCED),
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
            dropped.push(MobjMbf21::GROUP);
        }
        if self.id24.strip_above(tier) {
            dropped.push(MobjId24::GROUP);
        }
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataError;
    use crate::records::RecordView;

    fn imp() -> MobjInfo {
        serde_json::from_str(
            r#"{
                "index": 11,
                "minimum_features": "mbf21",
                "doomednum": 3001,
                "spawnhealth": 60,
                "speed": 8,
                "radius": 1310720,
                "mbf21": { "fastspeed": 1048576, "ripsound": 42 }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn parses_base_and_extension_fields() {
        let mobj = imp();
        assert_eq!(mobj.index(), 11);
        assert_eq!(mobj.spawnhealth, 60);
        assert_eq!(mobj.radius, Fixed::from_int(20));
        assert_eq!(mobj.fast_speed(FeatureTier::Mbf21).unwrap(), Some(Fixed::from_int(16)));
        assert_eq!(mobj.rip_sound(FeatureTier::Id24).unwrap(), Some(42));
        assert_eq!(mobj.drop_thing(FeatureTier::Id24).unwrap(), None);
    }

    #[test]
    fn mbf_reader_cannot_read_mbf21_fields() {
        let mobj = imp();
        assert!(matches!(
            mobj.fast_speed(FeatureTier::Mbf),
            Err(DataError::FieldTierViolation { group: "mbf21", .. })
        ));
        assert!(mobj.rip_sound(FeatureTier::Mbf).is_err());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = serde_json::from_str::<MobjInfo>(r#"{"index": 1, "health": 5}"#);
        assert!(result.is_err());
    }

    #[test]
    fn strip_above_reports_dropped_groups() {
        let mut mobj = imp();
        mobj.id24 = Tiered::new(MobjId24::default());
        assert_eq!(mobj.strip_above(FeatureTier::Mbf21), vec!["id24"]);
        assert_eq!(mobj.strip_above(FeatureTier::Mbf), vec!["mbf21"]);
        assert!(mobj.strip_above(FeatureTier::Vanilla).is_empty());
        assert_eq!(mobj.spawnhealth, 60);
    }

    #[test]
    fn view_hides_gated_groups() {
        let view = RecordView::of(&imp(), FeatureTier::Mbf).unwrap();
        assert_eq!(view.get("spawnhealth"), Some(&serde_json::json!(60)));
        assert_eq!(view.get("mbf21.fastspeed"), None);
        assert_eq!(
            view.gated,
            vec![("mbf21", FeatureTier::Mbf21), ("id24", FeatureTier::Id24)]
        );

        let view = RecordView::of(&imp(), FeatureTier::Id24).unwrap();
        assert_eq!(view.get("mbf21.ripsound"), Some(&serde_json::json!(42)));
        assert!(view.gated.is_empty());
    }
}
