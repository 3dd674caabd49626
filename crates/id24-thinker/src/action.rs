//! Tagged actions.
//!
//! An [`Action`] holds at most one function in one of three call shapes and
//! refuses to be called through any other. Thinker-shaped functions come in
//! two flavours: functions over the base node type ([`BaseThinkFn`]), which
//! accept any node and narrow it themselves, and functions written against a
//! registered kind `K`, which can only be stored when `K` has a whitelist
//! (see [`ThinkerKind`]). A wrongly typed codepointer is a compile error
//! rather than a silent reinterpretation.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use tracing::warn;

use crate::context::ThinkContext;
use crate::error::{ThinkError, ThinkResult};
use crate::fatal::abort_with;
use crate::player::{Player, PspDef};
use crate::thinker::{Thinker, ThinkerCast, ThinkerKind};

/// A function taking no arguments.
pub type VoidFn = fn();

/// A function over the base node type, callable on any node.
pub type BaseThinkFn = fn(&mut dyn Thinker);

/// A think function for kind `K` that also receives the pass context.
pub type ContextThinkFn<K> = fn(&mut K, &mut ThinkContext);

/// A weapon-sprite function: the owning player and one of its sprite slots.
pub type PspriteFn = fn(&mut Player, &mut PspDef);

/// The call shape an [`Action`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// No function is stored.
    Empty,
    /// A [`VoidFn`].
    NoArg,
    /// A function over a single thinker node.
    Thinker,
    /// A [`PspriteFn`].
    Psprite,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::NoArg => write!(f, "no-argument"),
            Self::Thinker => write!(f, "thinker"),
            Self::Psprite => write!(f, "player/psprite"),
        }
    }
}

/// The two signatures a kind's think function may have.
pub(crate) enum ThinkTarget<K> {
    Plain(fn(&mut K)),
    WithContext(ContextThinkFn<K>),
}

impl<K> Clone for ThinkTarget<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for ThinkTarget<K> {}

impl<K> ThinkTarget<K> {
    fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Plain(a), Self::Plain(b)) => std::ptr::fn_addr_eq(*a, *b),
            (Self::WithContext(a), Self::WithContext(b)) => std::ptr::fn_addr_eq(*a, *b),
            _ => false,
        }
    }

    fn call(&self, node: &mut K, cx: &mut ThinkContext) {
        match *self {
            Self::Plain(func) => func(node),
            Self::WithContext(func) => func(node, cx),
        }
    }
}

/// A named think function for the concrete kind `K`.
///
/// These are the entries of a kind's whitelist; see [`crate::think_funcs!`].
pub struct ThinkFunc<K> {
    name: &'static str,
    target: ThinkTarget<K>,
}

impl<K> ThinkFunc<K> {
    /// Pair a function with the name it is registered under.
    pub const fn new(name: &'static str, func: fn(&mut K)) -> Self {
        Self {
            name,
            target: ThinkTarget::Plain(func),
        }
    }

    /// Register a function that takes the pass context as well.
    pub const fn with_context(name: &'static str, func: ContextThinkFn<K>) -> Self {
        Self {
            name,
            target: ThinkTarget::WithContext(func),
        }
    }

    /// The registered name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The function, if it takes only the node.
    pub fn func(&self) -> Option<fn(&mut K)> {
        match self.target {
            ThinkTarget::Plain(func) => Some(func),
            ThinkTarget::WithContext(_) => None,
        }
    }

    /// Returns `true` if `func` is this entry's function.
    pub fn is(&self, func: fn(&mut K)) -> bool {
        self.target.same(&ThinkTarget::Plain(func))
    }

    /// Returns `true` if the context-taking `func` is this entry's function.
    pub fn is_with_context(&self, func: ContextThinkFn<K>) -> bool {
        self.target.same(&ThinkTarget::WithContext(func))
    }

    pub(crate) fn matches(&self, target: &ThinkTarget<K>) -> bool {
        self.target.same(target)
    }
}

impl<K> Clone for ThinkFunc<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for ThinkFunc<K> {}

impl<K> fmt::Debug for ThinkFunc<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ThinkFunc").field(&self.name).finish()
    }
}

/// Object-safe view of a thinker-shaped function, whatever its kind.
trait ErasedThink: Send + Sync {
    fn kind_name(&self) -> Option<&'static str>;
    fn registered_name(&self) -> Option<&'static str>;
    fn accepts(&self, thinker: &dyn Thinker) -> bool;
    fn call(&self, thinker: &mut dyn Thinker, cx: &mut ThinkContext) -> ThinkResult<()>;
    fn same_as(&self, other: &dyn ErasedThink) -> bool;
    fn as_any(&self) -> &dyn Any;
}

struct ThinkerCall<K> {
    target: ThinkTarget<K>,
}

impl<K: ThinkerKind> ErasedThink for ThinkerCall<K> {
    fn kind_name(&self) -> Option<&'static str> {
        Some(K::KIND_NAME)
    }

    fn registered_name(&self) -> Option<&'static str> {
        K::THINK_FUNCS
            .iter()
            .find(|entry| entry.matches(&self.target))
            .map(ThinkFunc::name)
    }

    fn accepts(&self, thinker: &dyn Thinker) -> bool {
        thinker.as_any().is::<K>()
    }

    fn call(&self, thinker: &mut dyn Thinker, cx: &mut ThinkContext) -> ThinkResult<()> {
        let node = thinker
            .as_any_mut()
            .downcast_mut::<K>()
            .ok_or_else(|| ThinkError::KindMismatch {
                function: self.registered_name().unwrap_or("<unregistered>"),
                kind: K::KIND_NAME,
            })?;
        self.target.call(node, cx);
        Ok(())
    }

    fn same_as(&self, other: &dyn ErasedThink) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|other| self.target.same(&other.target))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct BaseCall {
    func: BaseThinkFn,
}

impl ErasedThink for BaseCall {
    fn kind_name(&self) -> Option<&'static str> {
        None
    }

    fn registered_name(&self) -> Option<&'static str> {
        None
    }

    fn accepts(&self, _thinker: &dyn Thinker) -> bool {
        true
    }

    fn call(&self, thinker: &mut dyn Thinker, _cx: &mut ThinkContext) -> ThinkResult<()> {
        (self.func)(thinker);
        Ok(())
    }

    fn same_as(&self, other: &dyn ErasedThink) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|other| std::ptr::fn_addr_eq(self.func, other.func))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Clone, Default)]
enum Payload {
    #[default]
    Empty,
    NoArg(VoidFn),
    Thinker(Arc<dyn ErasedThink>),
    Psprite(PspriteFn),
}

/// A tagged closure: one function of a fixed call shape plus an enable bit.
///
/// Every `invoke*` method checks the stored shape before calling and goes
/// through [`abort_with`] on a mismatch; the matching `try_invoke*` methods
/// return the error instead, and the `can_invoke*` checks never fail.
///
/// The enabled flag is independent of the shape. Assigning a new action to a
/// slot resets it to enabled.
#[derive(Clone, Default)]
pub struct Action {
    payload: Payload,
    disabled: bool,
}

impl Action {
    /// The empty action.
    pub const NONE: Self = Self {
        payload: Payload::Empty,
        disabled: false,
    };

    /// Wrap a function taking no arguments.
    pub fn no_arg(func: VoidFn) -> Self {
        Self::from_payload(Payload::NoArg(func))
    }

    /// Wrap a thinker function written for the registered kind `K`.
    ///
    /// Any `fn(&mut K)` is accepted here, including codepointers that are
    /// not in `K`'s whitelist. Use [`ThinkerKind::whitelisted_action`] when
    /// the action becomes a node's own think function.
    pub fn think<K: ThinkerKind>(func: fn(&mut K)) -> Self {
        Self::thinker_call(ThinkTarget::Plain(func))
    }

    /// Wrap a think function for `K` that queues changes to other nodes
    /// through a [`ThinkContext`].
    pub fn think_with<K: ThinkerKind>(func: ContextThinkFn<K>) -> Self {
        Self::thinker_call(ThinkTarget::WithContext(func))
    }

    /// Wrap a function over the base node type.
    ///
    /// It can be invoked on any node, registered kind or not, and narrows
    /// the node itself with [`crate::thinker_cast`]. A node carrying it as
    /// its own action downcasts only to `dyn Thinker`.
    pub fn think_any(func: BaseThinkFn) -> Self {
        Self::from_payload(Payload::Thinker(Arc::new(BaseCall { func })))
    }

    /// Wrap a weapon-sprite function.
    pub fn psprite(func: PspriteFn) -> Self {
        Self::from_payload(Payload::Psprite(func))
    }

    fn thinker_call<K: ThinkerKind>(target: ThinkTarget<K>) -> Self {
        Self::from_payload(Payload::Thinker(Arc::new(ThinkerCall { target })))
    }

    fn from_payload(payload: Payload) -> Self {
        Self {
            payload,
            disabled: false,
        }
    }

    /// The call shape this action holds.
    pub fn kind(&self) -> ActionKind {
        match self.payload {
            Payload::Empty => ActionKind::Empty,
            Payload::NoArg(_) => ActionKind::NoArg,
            Payload::Thinker(_) => ActionKind::Thinker,
            Payload::Psprite(_) => ActionKind::Psprite,
        }
    }

    /// Returns `true` if a function is stored.
    pub fn is_valid(&self) -> bool {
        !matches!(self.payload, Payload::Empty)
    }

    /// Returns `true` unless [`Action::disable`] was called since the last
    /// [`Action::enable`] or assignment.
    pub fn is_enabled(&self) -> bool {
        !self.disabled
    }

    /// Clear the disabled bit.
    pub fn enable(&mut self) {
        self.disabled = false;
    }

    /// Set the disabled bit. The stored function is kept.
    pub fn disable(&mut self) {
        self.disabled = true;
    }

    /// Registered name of a thinker-shaped function, if it is whitelisted
    /// for its kind.
    pub fn name(&self) -> Option<&'static str> {
        match &self.payload {
            Payload::Thinker(func) => func.registered_name(),
            _ => None,
        }
    }

    /// The concrete kind a thinker-shaped function was written for. Base
    /// functions have none.
    pub fn kind_name(&self) -> Option<&'static str> {
        match &self.payload {
            Payload::Thinker(func) => func.kind_name(),
            _ => None,
        }
    }

    /// The stored function, if it is a node-only thinker function for `K`.
    pub fn thinker_fn<K: ThinkerKind>(&self) -> Option<fn(&mut K)> {
        match self.thinker_target::<K>()? {
            ThinkTarget::Plain(func) => Some(func),
            ThinkTarget::WithContext(_) => None,
        }
    }

    /// The stored function, if it is a base-typed thinker function.
    pub fn base_fn(&self) -> Option<BaseThinkFn> {
        match &self.payload {
            Payload::Thinker(func) => func
                .as_any()
                .downcast_ref::<BaseCall>()
                .map(|call| call.func),
            _ => None,
        }
    }

    pub(crate) fn thinker_target<K: ThinkerKind>(&self) -> Option<ThinkTarget<K>> {
        match &self.payload {
            Payload::Thinker(func) => func
                .as_any()
                .downcast_ref::<ThinkerCall<K>>()
                .map(|call| call.target),
            _ => None,
        }
    }

    /// Returns `true` if both actions store the same function. The enabled
    /// flag is not compared.
    pub fn same_target(&self, other: &Action) -> bool {
        match (&self.payload, &other.payload) {
            (Payload::Empty, Payload::Empty) => true,
            (Payload::NoArg(a), Payload::NoArg(b)) => std::ptr::fn_addr_eq(*a, *b),
            (Payload::Thinker(a), Payload::Thinker(b)) => a.same_as(&**b),
            (Payload::Psprite(a), Payload::Psprite(b)) => std::ptr::fn_addr_eq(*a, *b),
            _ => false,
        }
    }

    /// Returns `true` if [`Action::invoke`] would succeed.
    pub fn can_invoke(&self) -> bool {
        matches!(self.payload, Payload::NoArg(_))
    }

    /// Returns `true` if [`Action::invoke_thinker`] would succeed for this node.
    pub fn can_invoke_thinker<T: ThinkerCast + ?Sized>(&self, thinker: &T) -> bool {
        match &self.payload {
            Payload::Thinker(func) => func.accepts(thinker.as_thinker()),
            _ => false,
        }
    }

    /// Returns `true` if [`Action::invoke_psprite`] would succeed.
    pub fn can_invoke_psprite(&self, _player: &Player, _psp: &PspDef) -> bool {
        matches!(self.payload, Payload::Psprite(_))
    }

    /// Call a no-argument function.
    pub fn try_invoke(&self) -> ThinkResult<()> {
        match self.payload {
            Payload::NoArg(func) => {
                func();
                Ok(())
            }
            _ => Err(self.shape_mismatch(ActionKind::NoArg)),
        }
    }

    /// Call a thinker function with `thinker`, outside any list pass.
    ///
    /// Kind functions receive the node as their own concrete kind; a node of
    /// any other kind is rejected with [`ThinkError::KindMismatch`]. Base
    /// functions accept every node. Commands a context-aware function
    /// queues here are dropped; use [`Action::try_invoke_thinker_in`] to
    /// collect them.
    pub fn try_invoke_thinker<T: ThinkerCast + ?Sized>(&self, thinker: &mut T) -> ThinkResult<()> {
        let mut cx = ThinkContext::default();
        self.try_invoke_thinker_in(thinker, &mut cx)?;
        if !cx.commands().is_empty() {
            warn!(
                dropped = cx.commands().len(),
                "list commands queued outside a pass were dropped"
            );
        }
        Ok(())
    }

    /// Call a thinker function with `thinker` and the caller's context.
    pub fn try_invoke_thinker_in<T: ThinkerCast + ?Sized>(
        &self,
        thinker: &mut T,
        cx: &mut ThinkContext,
    ) -> ThinkResult<()> {
        match &self.payload {
            Payload::Thinker(func) => func.call(thinker.as_thinker_mut(), cx),
            _ => Err(self.shape_mismatch(ActionKind::Thinker)),
        }
    }

    /// Call a weapon-sprite function.
    pub fn try_invoke_psprite(&self, player: &mut Player, psp: &mut PspDef) -> ThinkResult<()> {
        match self.payload {
            Payload::Psprite(func) => {
                func(player, psp);
                Ok(())
            }
            _ => Err(self.shape_mismatch(ActionKind::Psprite)),
        }
    }

    /// Like [`Action::try_invoke`], aborting on failure.
    pub fn invoke(&self) {
        if let Err(err) = self.try_invoke() {
            abort_with(err);
        }
    }

    /// Like [`Action::try_invoke_thinker`], aborting on failure.
    pub fn invoke_thinker<T: ThinkerCast + ?Sized>(&self, thinker: &mut T) {
        if let Err(err) = self.try_invoke_thinker(thinker) {
            abort_with(err);
        }
    }

    /// Like [`Action::try_invoke_thinker_in`], aborting on failure.
    pub fn invoke_thinker_in<T: ThinkerCast + ?Sized>(
        &self,
        thinker: &mut T,
        cx: &mut ThinkContext,
    ) {
        if let Err(err) = self.try_invoke_thinker_in(thinker, cx) {
            abort_with(err);
        }
    }

    /// Like [`Action::try_invoke_psprite`], aborting on failure.
    pub fn invoke_psprite(&self, player: &mut Player, psp: &mut PspDef) {
        if let Err(err) = self.try_invoke_psprite(player, psp) {
            abort_with(err);
        }
    }

    fn shape_mismatch(&self, expected: ActionKind) -> ThinkError {
        ThinkError::InvocationShapeMismatch {
            expected,
            found: self.kind(),
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("kind", &self.kind())
            .field("target", &self.name().or_else(|| self.kind_name()))
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

impl From<VoidFn> for Action {
    fn from(func: VoidFn) -> Self {
        Self::no_arg(func)
    }
}

impl From<BaseThinkFn> for Action {
    fn from(func: BaseThinkFn) -> Self {
        Self::think_any(func)
    }
}

impl<K: ThinkerKind> From<fn(&mut K)> for Action {
    fn from(func: fn(&mut K)) -> Self {
        Self::think(func)
    }
}

impl<K: ThinkerKind> From<ContextThinkFn<K>> for Action {
    fn from(func: ContextThinkFn<K>) -> Self {
        Self::think_with(func)
    }
}

impl From<PspriteFn> for Action {
    fn from(func: PspriteFn) -> Self {
        Self::psprite(func)
    }
}

impl PartialEq<VoidFn> for Action {
    fn eq(&self, other: &VoidFn) -> bool {
        matches!(self.payload, Payload::NoArg(func) if std::ptr::fn_addr_eq(func, *other))
    }
}

impl PartialEq<BaseThinkFn> for Action {
    fn eq(&self, other: &BaseThinkFn) -> bool {
        self.base_fn()
            .is_some_and(|func| std::ptr::fn_addr_eq(func, *other))
    }
}

impl<K: ThinkerKind> PartialEq<fn(&mut K)> for Action {
    fn eq(&self, other: &fn(&mut K)) -> bool {
        self.thinker_target::<K>()
            .is_some_and(|target| target.same(&ThinkTarget::Plain(*other)))
    }
}

impl<K: ThinkerKind> PartialEq<ContextThinkFn<K>> for Action {
    fn eq(&self, other: &ContextThinkFn<K>) -> bool {
        self.thinker_target::<K>()
            .is_some_and(|target| target.same(&ThinkTarget::WithContext(*other)))
    }
}

impl PartialEq<PspriteFn> for Action {
    fn eq(&self, other: &PspriteFn) -> bool {
        matches!(self.payload, Payload::Psprite(func) if std::ptr::fn_addr_eq(func, *other))
    }
}
