//! Players and their weapon sprite slots.

use crate::action::Action;
use crate::error::ThinkResult;
use crate::fatal::abort_with;

/// Which weapon sprite slot a function is run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PsprNum {
    /// The weapon itself.
    Weapon,
    /// The muzzle flash overlay.
    Flash,
}

impl PsprNum {
    /// Both slots, in draw order.
    pub const ALL: [PsprNum; 2] = [PsprNum::Weapon, PsprNum::Flash];

    fn index(self) -> usize {
        match self {
            PsprNum::Weapon => 0,
            PsprNum::Flash => 1,
        }
    }
}

/// One weapon sprite slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PspDef {
    /// Current state index, `None` when the slot is idle.
    pub state: Option<i32>,
    /// Tics left in the current state.
    pub tics: i32,
    /// Horizontal screen offset, 16.16 fixed point.
    pub sx: i32,
    /// Vertical screen offset, 16.16 fixed point.
    pub sy: i32,
}

/// The parts of a player that weapon sprite functions touch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Player {
    /// Player slot number.
    pub number: usize,
    /// Weapon currently raised.
    pub ready_weapon: i32,
    /// Weapon to switch to, if any.
    pub pending_weapon: Option<i32>,
    /// Consecutive refire count while the trigger is held.
    pub refire: i32,
    psprites: [PspDef; 2],
}

impl Player {
    /// Create a player in the given slot.
    pub fn new(number: usize) -> Self {
        Self {
            number,
            ..Self::default()
        }
    }

    /// A sprite slot.
    pub fn psprite(&self, position: PsprNum) -> &PspDef {
        &self.psprites[position.index()]
    }

    /// A sprite slot, mutably.
    pub fn psprite_mut(&mut self, position: PsprNum) -> &mut PspDef {
        &mut self.psprites[position.index()]
    }

    /// Run `action` against the player and one of its sprite slots.
    ///
    /// The slot is handed out as a copy and written back afterwards, so the
    /// function sees the player and the slot as separate borrows.
    pub fn try_run_psprite(&mut self, position: PsprNum, action: &Action) -> ThinkResult<()> {
        let mut psp = *self.psprite(position);
        action.try_invoke_psprite(self, &mut psp)?;
        *self.psprite_mut(position) = psp;
        Ok(())
    }

    /// Like [`Player::try_run_psprite`], aborting on a shape mismatch.
    pub fn run_psprite(&mut self, position: PsprNum, action: &Action) {
        if let Err(error) = self.try_run_psprite(position, action) {
            abort_with(error);
        }
    }
}
