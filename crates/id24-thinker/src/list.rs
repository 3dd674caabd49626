use std::collections::HashMap;
use std::fmt;

use tracing::{debug, trace};

use crate::action::Action;
use crate::context::{ListCommand, ThinkContext};
use crate::error::{ThinkError, ThinkResult};
use crate::fatal::abort_with;
use crate::thinker::{Thinker, ThinkerKind, thinker_cast, thinker_cast_mut};

/// Stable handle to a node in a [`ThinkerList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ThinkerId(u64);

impl ThinkerId {
    /// The raw sequence number. Handles are never reused within a list.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ThinkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug)]
struct Node {
    thinker: Box<dyn Thinker>,
    prev: Option<ThinkerId>,
    next: Option<ThinkerId>,
}

/// Counts from one pass of [`ThinkerList::run_thinkers`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// The tick number this pass ran as (the first pass is tick 1).
    pub tick: u64,
    /// Nodes whose action was invoked.
    pub ran: usize,
    /// Nodes skipped because their action is disabled.
    pub skipped: usize,
    /// Nodes unlinked because their action was empty.
    pub reaped: usize,
}

/// The doubly linked list of live thinkers.
///
/// Nodes are owned by the list and linked by [`ThinkerId`]; each pass visits
/// them in insertion order. Removal during play only empties a node's action,
/// and the next pass unlinks it, so a node can remove itself from inside its
/// own think function. Context-aware think functions reach other nodes by
/// queueing [`ListCommand`]s on their [`ThinkContext`].
#[derive(Debug, Default)]
pub struct ThinkerList {
    nodes: HashMap<ThinkerId, Node>,
    head: Option<ThinkerId>,
    tail: Option<ThinkerId>,
    next_id: u64,
    tick: u64,
}

impl ThinkerList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node at the tail.
    pub fn add<T: Thinker>(&mut self, thinker: T) -> ThinkerId {
        self.add_boxed(Box::new(thinker))
    }

    /// Append an already boxed node at the tail.
    pub fn add_boxed(&mut self, thinker: Box<dyn Thinker>) -> ThinkerId {
        let id = ThinkerId(self.next_id);
        self.next_id += 1;

        match self.tail.and_then(|tail| self.nodes.get_mut(&tail)) {
            Some(tail) => tail.next = Some(id),
            None => self.head = Some(id),
        }
        debug!(%id, action = ?thinker.action(), "thinker added");
        self.nodes.insert(
            id,
            Node {
                thinker,
                prev: self.tail,
                next: None,
            },
        );
        self.tail = Some(id);
        id
    }

    /// Mark a node for removal by emptying its action.
    ///
    /// The node stays linked until the next [`ThinkerList::run_thinkers`]
    /// pass reaps it, and it no longer downcasts to its kind.
    pub fn remove(&mut self, id: ThinkerId) -> ThinkResult<()> {
        *self.node_mut(id)?.thinker.action_mut() = Action::NONE;
        Ok(())
    }

    /// Detach a node immediately and hand it back.
    pub fn unlink(&mut self, id: ThinkerId) -> ThinkResult<Box<dyn Thinker>> {
        let node = self
            .nodes
            .remove(&id)
            .ok_or(ThinkError::ThinkerNotFound(id))?;

        match node.prev.and_then(|prev| self.nodes.get_mut(&prev)) {
            Some(prev) => prev.next = node.next,
            None => self.head = node.next,
        }
        match node.next.and_then(|next| self.nodes.get_mut(&next)) {
            Some(next) => next.prev = node.prev,
            None => self.tail = node.prev,
        }
        debug!(%id, "thinker unlinked");
        Ok(node.thinker)
    }

    /// Re-enable a node's action.
    pub fn enable(&mut self, id: ThinkerId) -> ThinkResult<()> {
        self.node_mut(id)?.thinker.enable();
        Ok(())
    }

    /// Disable a node's action; the node is skipped until re-enabled.
    pub fn disable(&mut self, id: ThinkerId) -> ThinkResult<()> {
        self.node_mut(id)?.thinker.disable();
        Ok(())
    }

    /// Get a node by ID.
    pub fn get(&self, id: ThinkerId) -> Option<&dyn Thinker> {
        self.nodes.get(&id).map(|node| node.thinker.as_ref())
    }

    /// Get a mutable node by ID.
    pub fn get_mut(&mut self, id: ThinkerId) -> Option<&mut dyn Thinker> {
        self.nodes.get_mut(&id).map(|node| node.thinker.as_mut())
    }

    /// Get a node as kind `K`, if it is one.
    pub fn get_as<K: ThinkerKind>(&self, id: ThinkerId) -> Option<&K> {
        self.get(id).and_then(|thinker| thinker_cast::<K>(thinker))
    }

    /// Get a node mutably as kind `K`, if it is one.
    pub fn get_as_mut<K: ThinkerKind>(&mut self, id: ThinkerId) -> Option<&mut K> {
        self.get_mut(id)
            .and_then(|thinker| thinker_cast_mut::<K>(thinker))
    }

    /// Get a node as kind `K`, turning a miss into an error.
    pub fn expect_as<K: ThinkerKind>(&self, id: ThinkerId) -> ThinkResult<&K> {
        let thinker = self.get(id).ok_or(ThinkError::ThinkerNotFound(id))?;
        thinker_cast::<K>(thinker).ok_or(ThinkError::DowncastMiss {
            id,
            kind: K::KIND_NAME,
        })
    }

    /// Returns `true` if the node is linked into this list.
    pub fn contains(&self, id: ThinkerId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of linked nodes, including ones awaiting reaping.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if no nodes are linked.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of passes run so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Iterate over nodes in list order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    /// Iterate over the nodes that downcast to `K`, in list order.
    pub fn iter_kind<K: ThinkerKind>(&self) -> impl Iterator<Item = (ThinkerId, &K)> + '_ {
        self.iter()
            .filter_map(|(id, thinker)| thinker_cast::<K>(thinker).map(|kind| (id, kind)))
    }

    /// Run one pass: reap emptied nodes, skip disabled ones, and invoke every
    /// enabled node's action with the node itself.
    ///
    /// A shape or kind mismatch is a contract violation and goes through
    /// [`abort_with`]; [`ThinkerList::try_run_thinkers`] returns it instead.
    pub fn run_thinkers(&mut self) -> TickReport {
        match self.try_run_thinkers() {
            Ok(report) => report,
            Err(err) => abort_with(err),
        }
    }

    /// Run one pass, returning the first failure to the caller.
    ///
    /// The successor of each node is read before the node runs. Commands a
    /// callee queues on its [`ThinkContext`] are applied as soon as it
    /// returns, so a node removed or disabled by an earlier node in the same
    /// pass does not run. A failure stops the pass where it happened.
    pub fn try_run_thinkers(&mut self) -> ThinkResult<TickReport> {
        self.tick += 1;
        let mut report = TickReport {
            tick: self.tick,
            ..TickReport::default()
        };

        let mut cursor = self.head;
        while let Some(id) = cursor {
            let Some(node) = self.nodes.get_mut(&id) else {
                break;
            };
            cursor = node.next;

            let action = node.thinker.action().clone();
            if !action.is_valid() {
                self.unlink(id)?;
                report.reaped += 1;
            } else if action.is_enabled() {
                let mut cx = ThinkContext::new(self.tick, Some(id));
                action.try_invoke_thinker_in(&mut *node.thinker, &mut cx)?;
                report.ran += 1;
                for command in cx.take_commands() {
                    self.apply(command)?;
                }
            } else {
                report.skipped += 1;
            }
        }

        trace!(
            tick = report.tick,
            ran = report.ran,
            skipped = report.skipped,
            reaped = report.reaped,
            "thinkers run"
        );
        Ok(report)
    }

    /// Apply one queued command.
    pub fn apply(&mut self, command: ListCommand) -> ThinkResult<()> {
        debug!(?command, "applying list command");
        match command {
            ListCommand::Remove(id) => self.remove(id),
            ListCommand::Disable(id) => self.disable(id),
            ListCommand::Enable(id) => self.enable(id),
        }
    }

    /// Unlink and drop every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    fn node_mut(&mut self, id: ThinkerId) -> ThinkResult<&mut Node> {
        self.nodes
            .get_mut(&id)
            .ok_or(ThinkError::ThinkerNotFound(id))
    }
}

/// Iterator over a [`ThinkerList`] in list order.
#[derive(Debug)]
pub struct Iter<'a> {
    list: &'a ThinkerList,
    cursor: Option<ThinkerId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (ThinkerId, &'a dyn Thinker);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let node = self.list.nodes.get(&id)?;
        self.cursor = node.next;
        Some((id, node.thinker.as_ref()))
    }
}
