use serde::{Deserialize, Serialize};

use crate::records::Record;
use crate::tier::FeatureTier;

/// A sound effect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SfxInfo {
    /// Sound index.
    pub index: i32,
    /// The earliest tier able to interpret this record.
    pub minimum_features: FeatureTier,
    /// Lump name without the `DS` prefix.
    pub name: String,
    /// Only one instance may play at a time.
    pub singularity: bool,
    /// Channel priority, lower wins.
    pub priority: i32,
    /// Sound this one aliases, if any.
    pub link: Option<i32>,
    /// Pitch for linked sounds.
    pub pitch: i32,
    /// Volume for linked sounds.
    pub volume: i32,
}

impl Record for SfxInfo {
    const TABLE: &'static str = "sounds";
    const GROUPS: &'static [(&'static str, FeatureTier)] = &[];

    fn index(&self) -> i32 {
        self.index
    }

    fn minimum_features(&self) -> FeatureTier {
        self.minimum_features
    }

    fn set_minimum_features(&mut self, tier: FeatureTier) {
        self.minimum_features = tier;
    }
}

/// A sprite name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpriteInfo {
    /// Sprite index.
    pub index: i32,
    /// The earliest tier able to interpret this record.
    pub minimum_features: FeatureTier,
    /// Four-letter sprite prefix.
    pub sprite: String,
}

impl Record for SpriteInfo {
    const TABLE: &'static str = "sprites";
    const GROUPS: &'static [(&'static str, FeatureTier)] = &[];

    fn index(&self) -> i32 {
        self.index
    }

    fn minimum_features(&self) -> FeatureTier {
        self.minimum_features
    }

    fn set_minimum_features(&mut self, tier: FeatureTier) {
        self.minimum_features = tier;
    }
}
