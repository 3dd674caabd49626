use crate::list::ThinkerId;

/// A change to the thinker list queued by a callee during a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListCommand {
    /// Empty the node's action so the pass reaps it.
    Remove(ThinkerId),
    /// Disable the node's action.
    Disable(ThinkerId),
    /// Re-enable the node's action.
    Enable(ThinkerId),
}

/// Mutable context handed to context-aware think functions.
///
/// A callee cannot borrow the list it is running in, so changes to other
/// nodes are queued here and applied by [`crate::ThinkerList`] as soon as
/// the callee returns. Outside a pass the context is detached: it reports
/// tick 0, has no current node, and queued commands go nowhere.
#[derive(Debug, Default)]
pub struct ThinkContext {
    tick: u64,
    current: Option<ThinkerId>,
    commands: Vec<ListCommand>,
}

impl ThinkContext {
    /// A context for running `current` during pass number `tick`.
    pub fn new(tick: u64, current: Option<ThinkerId>) -> Self {
        Self {
            tick,
            current,
            commands: Vec::new(),
        }
    }

    /// The pass this call belongs to.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// The node being run, if the call comes from a list pass.
    pub fn current(&self) -> Option<ThinkerId> {
        self.current
    }

    /// Queue removal of `id`. Removing the current node is allowed.
    pub fn remove(&mut self, id: ThinkerId) {
        self.commands.push(ListCommand::Remove(id));
    }

    /// Queue disabling `id`.
    pub fn disable(&mut self, id: ThinkerId) {
        self.commands.push(ListCommand::Disable(id));
    }

    /// Queue re-enabling `id`.
    pub fn enable(&mut self, id: ThinkerId) {
        self.commands.push(ListCommand::Enable(id));
    }

    /// Commands queued so far, oldest first.
    pub fn commands(&self) -> &[ListCommand] {
        &self.commands
    }

    /// Drain the queued commands.
    pub fn take_commands(&mut self) -> Vec<ListCommand> {
        std::mem::take(&mut self.commands)
    }
}
