//! Thinker nodes, per-kind whitelists, and whitelist-checked downcasts.
//!
//! A concrete kind opts in with [`crate::think_funcs!`], which lists every
//! function that may be stored as a live node's own action. A downcast reads
//! the node's action and succeeds only if that function is on the target
//! kind's list. The list is closed at build time: a function belongs to
//! exactly one kind, which the `fn(&mut K)` signature already guarantees.
//! Functions over the base node type belong to no kind, so a node carrying
//! one as its own action narrows only to `dyn Thinker`.

use std::any::Any;
use std::fmt;

use crate::action::{Action, ThinkFunc};
use crate::error::{ThinkError, ThinkResult};

/// A node in the thinker list: anything that carries an [`Action`].
pub trait Thinker: Any + fmt::Debug {
    /// The node's update action.
    fn action(&self) -> &Action;

    /// Mutable access to the node's update action.
    fn action_mut(&mut self) -> &mut Action;

    /// Support downcasting to concrete types.
    fn as_any(&self) -> &dyn Any;

    /// Support downcasting to concrete types.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Returns `true` if the node's action is enabled.
    fn is_enabled(&self) -> bool {
        self.action().is_enabled()
    }

    /// Re-enable the node's action.
    fn enable(&mut self) {
        self.action_mut().enable();
    }

    /// Disable the node's action without discarding it.
    fn disable(&mut self) {
        self.action_mut().disable();
    }
}

/// A concrete thinker kind with a closed whitelist of think functions.
///
/// Implement through [`crate::think_funcs!`] rather than by hand.
pub trait ThinkerKind: Thinker + Sized {
    /// Human-readable kind name used in diagnostics.
    const KIND_NAME: &'static str;

    /// Every function a live node of this kind may carry as its action.
    const THINK_FUNCS: &'static [ThinkFunc<Self>];

    /// Find the whitelist entry for `func`.
    fn think_func(func: fn(&mut Self)) -> Option<&'static ThinkFunc<Self>> {
        Self::THINK_FUNCS.iter().find(|entry| entry.is(func))
    }

    /// Build a node action from `func`, refusing functions outside the
    /// whitelist.
    fn whitelisted_action(func: fn(&mut Self)) -> ThinkResult<Action> {
        match Self::think_func(func) {
            Some(_) => Ok(Action::think(func)),
            None => Err(ThinkError::NonWhitelistedAssignment {
                kind: Self::KIND_NAME,
            }),
        }
    }
}

/// Declare the whitelist for a concrete thinker kind.
///
/// ```ignore
/// think_funcs!(Mobj, "mobj", [p_mobj_thinker]);
/// think_funcs!(Ceiling, "ceiling", [t_move_ceiling], with_context: [t_crush_ceiling]);
/// ```
///
/// The kind must already implement [`Thinker`]. Functions in the first list
/// have the signature `fn(&mut Kind)`; the optional `with_context` list takes
/// `fn(&mut Kind, &mut ThinkContext)`. Each is registered under its path as
/// written.
#[macro_export]
macro_rules! think_funcs {
    (
        $kind:ty, $name:literal, [$($func:path),* $(,)?]
        $(, with_context: [$($cx_func:path),* $(,)?])?
    ) => {
        impl $crate::ThinkerKind for $kind {
            const KIND_NAME: &'static str = $name;
            const THINK_FUNCS: &'static [$crate::ThinkFunc<Self>] = &[
                $($crate::ThinkFunc::new(stringify!($func), $func),)*
                $($($crate::ThinkFunc::with_context(stringify!($cx_func), $cx_func),)*)?
            ];
        }
    };
}

/// Types a thinker node can be viewed as.
///
/// Implemented for every [`ThinkerKind`] (checked against its whitelist) and
/// for `dyn Thinker` itself, where the cast always succeeds.
pub trait ThinkerCast {
    /// Narrow a node to `Self`, or `None` if it is not one.
    fn cast_ref(thinker: &dyn Thinker) -> Option<&Self>;

    /// Mutable form of [`ThinkerCast::cast_ref`].
    fn cast_mut(thinker: &mut dyn Thinker) -> Option<&mut Self>;

    /// Widen back to the base node type.
    fn as_thinker(&self) -> &dyn Thinker;

    /// Mutable form of [`ThinkerCast::as_thinker`].
    fn as_thinker_mut(&mut self) -> &mut dyn Thinker;
}

impl ThinkerCast for dyn Thinker {
    fn cast_ref(thinker: &dyn Thinker) -> Option<&Self> {
        Some(thinker)
    }

    fn cast_mut(thinker: &mut dyn Thinker) -> Option<&mut Self> {
        Some(thinker)
    }

    fn as_thinker(&self) -> &dyn Thinker {
        self
    }

    fn as_thinker_mut(&mut self) -> &mut dyn Thinker {
        self
    }
}

impl<K: ThinkerKind> ThinkerCast for K {
    fn cast_ref(thinker: &dyn Thinker) -> Option<&Self> {
        if !owns_action::<K>(thinker.action()) {
            return None;
        }
        thinker.as_any().downcast_ref::<K>()
    }

    fn cast_mut(thinker: &mut dyn Thinker) -> Option<&mut Self> {
        if !owns_action::<K>(thinker.action()) {
            return None;
        }
        thinker.as_any_mut().downcast_mut::<K>()
    }

    fn as_thinker(&self) -> &dyn Thinker {
        self
    }

    fn as_thinker_mut(&mut self) -> &mut dyn Thinker {
        self
    }
}

/// Returns `true` if `action` holds a function from `K`'s whitelist.
pub fn owns_action<K: ThinkerKind>(action: &Action) -> bool {
    action
        .thinker_target::<K>()
        .is_some_and(|target| K::THINK_FUNCS.iter().any(|entry| entry.matches(&target)))
}

/// Narrow `thinker` to `T` if its action is on `T`'s whitelist.
///
/// A miss is ordinary control flow: the node is simply not a `T`. This
/// includes nodes whose action was emptied by a removal.
pub fn thinker_cast<T: ThinkerCast + ?Sized>(thinker: &dyn Thinker) -> Option<&T> {
    T::cast_ref(thinker)
}

/// Mutable form of [`thinker_cast`].
pub fn thinker_cast_mut<T: ThinkerCast + ?Sized>(thinker: &mut dyn Thinker) -> Option<&mut T> {
    T::cast_mut(thinker)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::action::ActionKind;
    use crate::testing::{
        Actor, Projectile, a_explode, a_pain, actor_cull, actor_despawn, update_actor_a,
        update_actor_b, update_projectile,
    };

    #[test]
    fn registered_actor_downcasts_to_actor_only() {
        let actor = Actor::spawn(update_actor_a);
        let node: &dyn Thinker = &actor;
        assert!(thinker_cast::<Actor>(node).is_some());
        assert!(thinker_cast::<Projectile>(node).is_none());
    }

    #[test]
    fn second_whitelist_entry_also_matches() {
        let actor = Actor::spawn(update_actor_b);
        assert!(thinker_cast::<Actor>(&actor).is_some());
    }

    #[test]
    fn base_type_cast_always_succeeds() {
        let projectile = Projectile::default();
        let node: &dyn Thinker = &projectile;
        assert!(thinker_cast::<dyn Thinker>(node).is_some());
    }

    #[test]
    fn non_whitelisted_action_does_not_downcast() {
        // a_pain is a legal Actor codepointer but not a node think function
        let mut actor = Actor::spawn(update_actor_a);
        actor.action = Action::think(a_pain);
        assert!(thinker_cast::<Actor>(&actor).is_none());
    }

    #[test]
    fn emptied_node_does_not_downcast() {
        let mut actor = Actor::spawn(update_actor_a);
        actor.action = Action::NONE;
        assert!(thinker_cast::<Actor>(&actor).is_none());
    }

    #[test]
    fn disabled_node_still_downcasts() {
        let mut actor = Actor::spawn(update_actor_a);
        actor.disable();
        assert!(!actor.is_enabled());
        assert!(thinker_cast::<Actor>(&actor).is_some());
        actor.enable();
        assert!(actor.is_enabled());
    }

    #[test]
    fn whitelist_match_on_wrong_concrete_type_is_a_miss() {
        // A projectile node that somehow carries an actor think function
        let projectile = Projectile {
            action: Action::think(update_actor_a),
            ..Projectile::default()
        };
        assert!(thinker_cast::<Actor>(&projectile).is_none());
        assert!(thinker_cast::<Projectile>(&projectile).is_none());
    }

    #[test]
    fn mutable_downcast_allows_updates() {
        let mut actor = Actor::spawn(update_actor_a);
        let node: &mut dyn Thinker = &mut actor;
        let concrete = thinker_cast_mut::<Actor>(node).expect("actor node");
        concrete.health = 5;
        assert_eq!(actor.health, 5);
    }

    #[test]
    fn whitelisted_action_rejects_codepointers() {
        let action = Actor::whitelisted_action(update_actor_a).expect("registered");
        assert_eq!(action.kind(), ActionKind::Thinker);
        assert_eq!(
            Actor::whitelisted_action(a_pain).unwrap_err(),
            ThinkError::NonWhitelistedAssignment { kind: "actor" }
        );
    }

    #[test]
    fn registry_lists_functions_in_declaration_order() {
        let names: Vec<_> = Actor::THINK_FUNCS.iter().map(|f| f.name()).collect();
        assert_eq!(
            names,
            [
                "update_actor_a",
                "update_actor_b",
                "actor_despawn",
                "actor_cull",
                "actor_stun",
            ]
        );
        assert_eq!(Projectile::KIND_NAME, "projectile");
    }

    #[test]
    fn context_functions_are_whitelisted_too() {
        let actor = Actor {
            action: Action::think_with(actor_cull),
            ..Actor::default()
        };
        assert!(thinker_cast::<Actor>(&actor).is_some());
        assert!(Actor::THINK_FUNCS[3].is_with_context(actor_cull));
        assert!(Actor::THINK_FUNCS[3].func().is_none());
    }

    #[test]
    fn base_function_as_own_action_narrows_only_to_base() {
        let actor = Actor {
            action: Action::think_any(a_explode),
            ..Actor::default()
        };
        assert!(thinker_cast::<Actor>(&actor).is_none());
        assert!(thinker_cast::<dyn Thinker>(&actor).is_some());
    }

    fn actor_func() -> impl Strategy<Value = (fn(&mut Actor), bool)> {
        prop_oneof![
            Just((update_actor_a as fn(&mut Actor), true)),
            Just((update_actor_b as fn(&mut Actor), true)),
            Just((actor_despawn as fn(&mut Actor), true)),
            Just((a_pain as fn(&mut Actor), false)),
        ]
    }

    proptest! {
        #[test]
        fn downcast_succeeds_iff_whitelisted((func, listed) in actor_func(), disabled in any::<bool>()) {
            let mut actor = Actor::spawn(update_actor_a);
            actor.action = Action::think(func);
            if disabled {
                actor.disable();
            }
            prop_assert_eq!(thinker_cast::<Actor>(&actor).is_some(), listed);
            prop_assert!(thinker_cast::<Projectile>(&actor).is_none());
        }

        #[test]
        fn projectile_functions_never_downcast_to_actor(steps in 0u32..8) {
            let projectile = Projectile {
                action: Action::think(update_projectile),
                steps,
            };
            prop_assert!(thinker_cast::<Actor>(&projectile).is_none());
            prop_assert_eq!(thinker_cast::<Projectile>(&projectile).map(|p| p.steps), Some(steps));
        }
    }
}
