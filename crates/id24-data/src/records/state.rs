use id24_thinker::Action;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::codepointer::CodepointerTable;
use crate::config::{CodepointerPolicy, LoadConfig, TierPolicy};
use crate::error::{DataError, DataResult};
use crate::records::{Adjustments, ExtensionGroup, Record, Tiered};
use crate::tier::FeatureTier;
use crate::types::StateArg;

/// Frame bit that makes a state draw at full brightness.
pub const FF_FULLBRIGHT: i32 = 0x8000;

/// One animation state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct State {
    /// State index.
    pub index: i32,
    /// The earliest tier able to interpret this record.
    pub minimum_features: FeatureTier,

    /// Sprite index.
    pub sprite: i32,
    /// Frame letter, with [`FF_FULLBRIGHT`] or'd in.
    pub frame: i32,
    /// Duration in tics, `-1` for forever.
    pub tics: i32,
    /// Name of the codepointer run on entry.
    pub action: Option<String>,
    /// State to move to when `tics` runs out.
    pub nextstate: i32,
    /// First argument for vanilla codepointers.
    pub misc1: StateArg,
    /// Second argument for vanilla codepointers.
    pub misc2: StateArg,

    /// MBF21 fields.
    pub mbf21: Tiered<StateMbf21>,
    /// ID24 fields.
    pub id24: Tiered<StateId24>,

    /// The codepointer's function, filled in by the loader.
    #[serde(skip)]
    pub bound: Action,
}

/// State fields added by MBF21.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StateMbf21 {
    /// MBF21 state flags.
    pub flags: i32,
    /// Codepointer arguments 1 through 8.
    pub args: [StateArg; 8],
}

impl ExtensionGroup for StateMbf21 {
    const GROUP: &'static str = "mbf21";
    const INTRODUCED: FeatureTier = FeatureTier::Mbf21;
}

/// State fields added by ID24.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StateId24 {
    /// Translucency map lump.
    pub tranmaplump: Option<String>,
}

impl ExtensionGroup for StateId24 {
    const GROUP: &'static str = "id24";
    const INTRODUCED: FeatureTier = FeatureTier::Id24;
}

impl State {
    /// Returns `true` if the state draws at full brightness.
    pub fn is_fullbright(&self) -> bool {
        self.frame & FF_FULLBRIGHT != 0
    }

    /// Codepointer argument `n` (1-based), as a reader at `reader`.
    pub fn arg(&self, n: usize, reader: FeatureTier) -> DataResult<Option<StateArg>> {
        Ok(self
            .mbf21
            .read(reader)?
            .and_then(|group| n.checked_sub(1).and_then(|i| group.args.get(i)).copied()))
    }

    fn clear_action(&mut self) {
        self.action = None;
        self.bound = Action::NONE;
    }
}

impl Record for State {
    const TABLE: &'static str = "states";
    const GROUPS: &'static [(&'static str, FeatureTier)] = &[
        (StateMbf21::GROUP, StateMbf21::INTRODUCED),
        (StateId24::GROUP, StateId24::INTRODUCED),
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
            dropped.push(StateMbf21::GROUP);
        }
        if self.id24.strip_above(tier) {
            dropped.push(StateId24::GROUP);
        }
        dropped
    }

    fn resolve(
        &mut self,
        codepointers: &CodepointerTable,
        config: &LoadConfig,
    ) -> DataResult<Adjustments> {
        let mut adjustments = Adjustments::default();
        let Some(name) = self.action.clone() else {
            return Ok(adjustments);
        };

        match codepointers.get(&name) {
            None => match config.unknown_codepointers {
                CodepointerPolicy::Reject => {
                    return Err(DataError::UnknownCodepointer {
                        name,
                        state: self.index,
                    });
                }
                CodepointerPolicy::Ignore => {
                    warn!(state = self.index, codepointer = %name, "ignoring unknown codepointer");
                    self.clear_action();
                    adjustments.cleared_action = true;
                }
            },
            Some(codepointer) if !config.declared_tier.supports(codepointer.tier()) => {
                match config.policy {
                    TierPolicy::Reject => {
                        return Err(DataError::CodepointerTierViolation {
                            name,
                            state: self.index,
                            required: codepointer.tier(),
                            declared: config.declared_tier,
                        });
                    }
                    TierPolicy::Degrade => {
                        warn!(
                            state = self.index,
                            codepointer = %name,
                            required = %codepointer.tier(),
                            declared = %config.declared_tier,
                            "dropping codepointer above declared tier"
                        );
                        self.clear_action();
                        adjustments.cleared_action = true;
                    }
                }
            }
            Some(codepointer) => self.bound = codepointer.action().clone(),
        }
        Ok(adjustments)
    }
}
