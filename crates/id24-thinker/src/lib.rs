//! Type-checked thinker actions for ID24-family engines.
//!
//! Every world object that updates itself each tick is a node in a
//! [`ThinkerList`] carrying one [`Action`]. An action remembers which of three
//! call shapes it holds and refuses to be invoked through any other. Thinker
//! kinds register a closed whitelist of think functions with [`think_funcs!`],
//! and a node downcasts to a kind only when its current action is on that
//! kind's list.

/// Tagged actions and their call shapes.
pub mod action;
/// Pass context and deferred list commands.
pub mod context;
/// Error types for the thinker crate.
pub mod error;
/// The non-returning path for contract violations.
pub mod fatal;
/// The thinker list and its tick pass.
pub mod list;
/// Players and weapon sprite slots.
pub mod player;
/// The thinker traits, whitelists, and checked downcasts.
pub mod thinker;

#[cfg(test)]
mod testing;

/// Re-exports of [`action::Action`], [`action::ActionKind`], [`action::ThinkFunc`], and the function aliases.
pub use action::{Action, ActionKind, BaseThinkFn, ContextThinkFn, PspriteFn, ThinkFunc, VoidFn};
/// Re-exports of [`context::ThinkContext`] and [`context::ListCommand`].
pub use context::{ListCommand, ThinkContext};
/// Re-exports of [`error::ThinkError`] and [`error::ThinkResult`].
pub use error::{ThinkError, ThinkResult};
/// Re-export of [`fatal::abort_with`].
pub use fatal::abort_with;
/// Re-exports of [`list::ThinkerList`], [`list::ThinkerId`], and [`list::TickReport`].
pub use list::{ThinkerId, ThinkerList, TickReport};
/// Re-exports of [`player::Player`], [`player::PspDef`], and [`player::PsprNum`].
pub use player::{Player, PsprNum, PspDef};
/// Re-exports of the thinker traits and downcast functions.
pub use thinker::{Thinker, ThinkerCast, ThinkerKind, owns_action, thinker_cast, thinker_cast_mut};
