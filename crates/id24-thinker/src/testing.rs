//! Small thinker kinds shared by the unit tests.

use std::any::Any;

use crate::action::Action;
use crate::context::ThinkContext;
use crate::list::ThinkerId;
use crate::player::{Player, PspDef};
use crate::thinker::{Thinker, thinker_cast_mut};

#[derive(Debug)]
pub struct Actor {
    pub action: Action,
    pub a_calls: u32,
    pub b_calls: u32,
    pub health: i32,
    pub target: Option<ThinkerId>,
}

impl Default for Actor {
    fn default() -> Self {
        Self {
            action: Action::NONE,
            a_calls: 0,
            b_calls: 0,
            health: 100,
            target: None,
        }
    }
}

impl Actor {
    pub fn spawn(func: fn(&mut Actor)) -> Self {
        Self {
            action: Action::think(func),
            ..Self::default()
        }
    }
}

impl Thinker for Actor {
    fn action(&self) -> &Action {
        &self.action
    }

    fn action_mut(&mut self) -> &mut Action {
        &mut self.action
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

pub fn update_actor_a(actor: &mut Actor) {
    actor.a_calls += 1;
}

pub fn update_actor_b(actor: &mut Actor) {
    actor.b_calls += 1;
}

pub fn actor_despawn(actor: &mut Actor) {
    actor.action = Action::NONE;
}

/// Codepointer, not a node think function.
pub fn a_pain(actor: &mut Actor) {
    actor.health -= 10;
}

/// Removes the actor's target from the list.
pub fn actor_cull(actor: &mut Actor, cx: &mut ThinkContext) {
    actor.a_calls += 1;
    if let Some(target) = actor.target.take() {
        cx.remove(target);
    }
}

/// Disables the actor's target without removing it.
pub fn actor_stun(actor: &mut Actor, cx: &mut ThinkContext) {
    actor.a_calls += 1;
    if let Some(target) = actor.target {
        cx.disable(target);
    }
}

/// Base-typed codepointer: only actors take the damage.
pub fn a_explode(node: &mut dyn Thinker) {
    if let Some(actor) = thinker_cast_mut::<Actor>(node) {
        actor.health = 0;
    }
}

crate::think_funcs!(
    Actor,
    "actor",
    [update_actor_a, update_actor_b, actor_despawn],
    with_context: [actor_cull, actor_stun]
);

#[derive(Debug, Default)]
pub struct Projectile {
    pub action: Action,
    pub steps: u32,
}

impl Projectile {
    pub fn spawn() -> Self {
        Self {
            action: Action::think(update_projectile),
            steps: 0,
        }
    }
}

impl Thinker for Projectile {
    fn action(&self) -> &Action {
        &self.action
    }

    fn action_mut(&mut self) -> &mut Action {
        &mut self.action
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

pub fn update_projectile(projectile: &mut Projectile) {
    projectile.steps += 1;
}

crate::think_funcs!(Projectile, "projectile", [update_projectile]);

/// A node with no registered kind. The default one holds a no-argument
/// action; [`Timer::one_shot`] holds a base-typed one.
#[derive(Debug)]
pub struct Timer {
    action: Action,
}

impl Timer {
    pub fn one_shot() -> Self {
        Self {
            action: Action::think_any(timer_fire),
        }
    }
}

/// Fires once, then switches itself off.
pub fn timer_fire(node: &mut dyn Thinker) {
    node.disable();
}

impl Default for Timer {
    fn default() -> Self {
        Self {
            action: Action::no_arg(timer_tick),
        }
    }
}

fn timer_tick() {}

impl Thinker for Timer {
    fn action(&self) -> &Action {
        &self.action
    }

    fn action_mut(&mut self) -> &mut Action {
        &mut self.action
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

pub fn a_weapon_ready(player: &mut Player, psp: &mut PspDef) {
    player.refire += 1;
    psp.tics = 1;
}
