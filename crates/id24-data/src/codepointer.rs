//! Codepointers: the named functions states run on entry.
//!
//! Tables refer to codepointers by name. A [`CodepointerTable`] maps each name
//! to the tier that introduced it, the call shape it must have, and the
//! engine's function for it. The standard table knows every name from vanilla
//! through MBF21 but binds none of them; an engine registers its functions
//! over the top.

use std::collections::HashMap;

use id24_thinker::{Action, ActionKind, ThinkError};

use crate::error::DataResult;
use crate::tier::FeatureTier;

/// A named state function.
#[derive(Debug, Clone)]
pub struct Codepointer {
    name: String,
    tier: FeatureTier,
    shape: ActionKind,
    action: Action,
}

impl Codepointer {
    /// The name as registered.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The tier that introduced this codepointer.
    pub fn tier(&self) -> FeatureTier {
        self.tier
    }

    /// The call shape: [`ActionKind::Thinker`] for thing states,
    /// [`ActionKind::Psprite`] for weapon states.
    pub fn shape(&self) -> ActionKind {
        self.shape
    }

    /// The bound function, empty if the engine has not registered one.
    pub fn action(&self) -> &Action {
        &self.action
    }

    /// Returns `true` if a function is bound.
    pub fn is_bound(&self) -> bool {
        self.action.is_valid()
    }
}

const THING: ActionKind = ActionKind::Thinker;
const WEAPON: ActionKind = ActionKind::Psprite;

const STANDARD: &[(&str, FeatureTier, ActionKind)] = &[
    // weapons
    ("A_Light0", FeatureTier::Vanilla, WEAPON),
    ("A_WeaponReady", FeatureTier::Vanilla, WEAPON),
    ("A_Lower", FeatureTier::Vanilla, WEAPON),
    ("A_Raise", FeatureTier::Vanilla, WEAPON),
    ("A_Punch", FeatureTier::Vanilla, WEAPON),
    ("A_ReFire", FeatureTier::Vanilla, WEAPON),
    ("A_FirePistol", FeatureTier::Vanilla, WEAPON),
    ("A_Light1", FeatureTier::Vanilla, WEAPON),
    ("A_FireShotgun", FeatureTier::Vanilla, WEAPON),
    ("A_Light2", FeatureTier::Vanilla, WEAPON),
    ("A_FireShotgun2", FeatureTier::Vanilla, WEAPON),
    ("A_CheckReload", FeatureTier::Vanilla, WEAPON),
    ("A_OpenShotgun2", FeatureTier::Vanilla, WEAPON),
    ("A_LoadShotgun2", FeatureTier::Vanilla, WEAPON),
    ("A_CloseShotgun2", FeatureTier::Vanilla, WEAPON),
    ("A_FireCGun", FeatureTier::Vanilla, WEAPON),
    ("A_GunFlash", FeatureTier::Vanilla, WEAPON),
    ("A_FireMissile", FeatureTier::Vanilla, WEAPON),
    ("A_Saw", FeatureTier::Vanilla, WEAPON),
    ("A_FirePlasma", FeatureTier::Vanilla, WEAPON),
    ("A_BFGsound", FeatureTier::Vanilla, WEAPON),
    ("A_FireBFG", FeatureTier::Vanilla, WEAPON),
    // things
    ("A_BFGSpray", FeatureTier::Vanilla, THING),
    ("A_Explode", FeatureTier::Vanilla, THING),
    ("A_Pain", FeatureTier::Vanilla, THING),
    ("A_PlayerScream", FeatureTier::Vanilla, THING),
    ("A_Fall", FeatureTier::Vanilla, THING),
    ("A_XScream", FeatureTier::Vanilla, THING),
    ("A_Look", FeatureTier::Vanilla, THING),
    ("A_Chase", FeatureTier::Vanilla, THING),
    ("A_FaceTarget", FeatureTier::Vanilla, THING),
    ("A_PosAttack", FeatureTier::Vanilla, THING),
    ("A_Scream", FeatureTier::Vanilla, THING),
    ("A_SPosAttack", FeatureTier::Vanilla, THING),
    ("A_VileChase", FeatureTier::Vanilla, THING),
    ("A_VileStart", FeatureTier::Vanilla, THING),
    ("A_VileTarget", FeatureTier::Vanilla, THING),
    ("A_VileAttack", FeatureTier::Vanilla, THING),
    ("A_StartFire", FeatureTier::Vanilla, THING),
    ("A_Fire", FeatureTier::Vanilla, THING),
    ("A_FireCrackle", FeatureTier::Vanilla, THING),
    ("A_Tracer", FeatureTier::Vanilla, THING),
    ("A_SkelWhoosh", FeatureTier::Vanilla, THING),
    ("A_SkelFist", FeatureTier::Vanilla, THING),
    ("A_SkelMissile", FeatureTier::Vanilla, THING),
    ("A_FatRaise", FeatureTier::Vanilla, THING),
    ("A_FatAttack1", FeatureTier::Vanilla, THING),
    ("A_FatAttack2", FeatureTier::Vanilla, THING),
    ("A_FatAttack3", FeatureTier::Vanilla, THING),
    ("A_BossDeath", FeatureTier::Vanilla, THING),
    ("A_CPosAttack", FeatureTier::Vanilla, THING),
    ("A_CPosRefire", FeatureTier::Vanilla, THING),
    ("A_TroopAttack", FeatureTier::Vanilla, THING),
    ("A_SargAttack", FeatureTier::Vanilla, THING),
    ("A_HeadAttack", FeatureTier::Vanilla, THING),
    ("A_BruisAttack", FeatureTier::Vanilla, THING),
    ("A_SkullAttack", FeatureTier::Vanilla, THING),
    ("A_Metal", FeatureTier::Vanilla, THING),
    ("A_SpidRefire", FeatureTier::Vanilla, THING),
    ("A_BabyMetal", FeatureTier::Vanilla, THING),
    ("A_BspiAttack", FeatureTier::Vanilla, THING),
    ("A_Hoof", FeatureTier::Vanilla, THING),
    ("A_CyberAttack", FeatureTier::Vanilla, THING),
    ("A_PainAttack", FeatureTier::Vanilla, THING),
    ("A_PainDie", FeatureTier::Vanilla, THING),
    ("A_KeenDie", FeatureTier::Vanilla, THING),
    ("A_BrainPain", FeatureTier::Vanilla, THING),
    ("A_BrainScream", FeatureTier::Vanilla, THING),
    ("A_BrainDie", FeatureTier::Vanilla, THING),
    ("A_BrainAwake", FeatureTier::Vanilla, THING),
    ("A_BrainSpit", FeatureTier::Vanilla, THING),
    ("A_SpawnSound", FeatureTier::Vanilla, THING),
    ("A_SpawnFly", FeatureTier::Vanilla, THING),
    ("A_BrainExplode", FeatureTier::Vanilla, THING),
    // MBF
    ("A_Detonate", FeatureTier::Mbf, THING),
    ("A_Mushroom", FeatureTier::Mbf, THING),
    ("A_Die", FeatureTier::Mbf, THING),
    ("A_Spawn", FeatureTier::Mbf, THING),
    ("A_Turn", FeatureTier::Mbf, THING),
    ("A_Face", FeatureTier::Mbf, THING),
    ("A_Scratch", FeatureTier::Mbf, THING),
    ("A_PlaySound", FeatureTier::Mbf, THING),
    ("A_RandomJump", FeatureTier::Mbf, THING),
    ("A_LineEffect", FeatureTier::Mbf, THING),
    ("A_BetaSkullAttack", FeatureTier::Mbf, THING),
    ("A_Stop", FeatureTier::Mbf, THING),
    ("A_FireOldBFG", FeatureTier::Mbf, WEAPON),
    // MBF21
    ("A_SpawnObject", FeatureTier::Mbf21, THING),
    ("A_MonsterProjectile", FeatureTier::Mbf21, THING),
    ("A_MonsterBulletAttack", FeatureTier::Mbf21, THING),
    ("A_MonsterMeleeAttack", FeatureTier::Mbf21, THING),
    ("A_RadiusDamage", FeatureTier::Mbf21, THING),
    ("A_NoiseAlert", FeatureTier::Mbf21, THING),
    ("A_HealChase", FeatureTier::Mbf21, THING),
    ("A_SeekTracer", FeatureTier::Mbf21, THING),
    ("A_FindTracer", FeatureTier::Mbf21, THING),
    ("A_ClearTracer", FeatureTier::Mbf21, THING),
    ("A_JumpIfHealthBelow", FeatureTier::Mbf21, THING),
    ("A_JumpIfTargetInSight", FeatureTier::Mbf21, THING),
    ("A_JumpIfTargetCloser", FeatureTier::Mbf21, THING),
    ("A_JumpIfTracerInSight", FeatureTier::Mbf21, THING),
    ("A_JumpIfTracerCloser", FeatureTier::Mbf21, THING),
    ("A_JumpIfFlagsSet", FeatureTier::Mbf21, THING),
    ("A_AddFlags", FeatureTier::Mbf21, THING),
    ("A_RemoveFlags", FeatureTier::Mbf21, THING),
    ("A_WeaponProjectile", FeatureTier::Mbf21, WEAPON),
    ("A_WeaponBulletAttack", FeatureTier::Mbf21, WEAPON),
    ("A_WeaponMeleeAttack", FeatureTier::Mbf21, WEAPON),
    ("A_WeaponSound", FeatureTier::Mbf21, WEAPON),
    ("A_WeaponAlert", FeatureTier::Mbf21, WEAPON),
    ("A_WeaponJump", FeatureTier::Mbf21, WEAPON),
    ("A_ConsumeAmmo", FeatureTier::Mbf21, WEAPON),
    ("A_CheckAmmo", FeatureTier::Mbf21, WEAPON),
    ("A_RefireTo", FeatureTier::Mbf21, WEAPON),
    ("A_GunFlashTo", FeatureTier::Mbf21, WEAPON),
];

/// Codepointers by name.
///
/// Lookups ignore case and accept names with or without the `A_` prefix, as
/// patch formats write them both ways.
#[derive(Debug, Clone, Default)]
pub struct CodepointerTable {
    entries: HashMap<String, Codepointer>,
}

fn key(name: &str) -> String {
    let lower = name.to_ascii_lowercase();
    match lower.strip_prefix("a_") {
        Some(rest) => rest.to_string(),
        None => lower,
    }
}

impl CodepointerTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every standard codepointer name with its tier and shape, unbound.
    pub fn standard() -> Self {
        let entries = STANDARD
            .iter()
            .map(|&(name, tier, shape)| {
                (
                    key(name),
                    Codepointer {
                        name: name.to_string(),
                        tier,
                        shape,
                        action: Action::NONE,
                    },
                )
            })
            .collect();
        Self { entries }
    }

    /// Register `action` under `name`.
    ///
    /// A name the table already knows keeps its tier and must be bound with
    /// the shape it was declared with. A new name takes `tier` and the
    /// action's own shape, which must be a thing or weapon shape.
    pub fn register(
        &mut self,
        name: &str,
        tier: FeatureTier,
        action: impl Into<Action>,
    ) -> DataResult<()> {
        let action = action.into();
        let found = action.kind();

        if let Some(existing) = self.entries.get_mut(&key(name)) {
            if existing.shape != found {
                return Err(ThinkError::InvocationShapeMismatch {
                    expected: existing.shape,
                    found,
                }
                .into());
            }
            existing.action = action;
            return Ok(());
        }

        if !matches!(found, ActionKind::Thinker | ActionKind::Psprite) {
            return Err(ThinkError::InvocationShapeMismatch {
                expected: ActionKind::Thinker,
                found,
            }
            .into());
        }
        self.entries.insert(
            key(name),
            Codepointer {
                name: name.to_string(),
                tier,
                shape: found,
                action,
            },
        );
        Ok(())
    }

    /// Look up a codepointer.
    pub fn get(&self, name: &str) -> Option<&Codepointer> {
        self.entries.get(&key(name))
    }

    /// Number of known codepointers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no codepointers are known.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all codepointers in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Codepointer> {
        self.entries.values()
    }
}
