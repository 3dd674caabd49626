use crate::action::ActionKind;
use crate::list::ThinkerId;

/// Alias for `Result<T, ThinkError>`.
pub type ThinkResult<T> = Result<T, ThinkError>;

/// Contract violations and lookup failures around thinker actions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ThinkError {
    /// An action was invoked with a call shape it does not hold.
    #[error("invoking wrong action type: holds {found}, called as {expected}")]
    InvocationShapeMismatch {
        /// The shape the call site used.
        expected: ActionKind,
        /// The shape the action actually holds.
        found: ActionKind,
    },

    /// A node was given a think function outside its kind's whitelist.
    #[error("non-thinker assignment: function is not registered for kind `{kind}`")]
    NonWhitelistedAssignment {
        /// The kind whose whitelist was consulted.
        kind: &'static str,
    },

    /// A thinker action was invoked on a node of a different concrete kind.
    #[error("non-thinker invocation: `{function}` expects a `{kind}` node")]
    KindMismatch {
        /// Registered name of the function, or `<unregistered>`.
        function: &'static str,
        /// The kind the function was written for.
        kind: &'static str,
    },

    /// A node did not downcast to the requested kind.
    #[error("thinker {id} is not a `{kind}`")]
    DowncastMiss {
        /// The node that was inspected.
        id: ThinkerId,
        /// The requested kind.
        kind: &'static str,
    },

    /// The requested node is not linked into the list.
    #[error("thinker not found: {0}")]
    ThinkerNotFound(ThinkerId),
}
