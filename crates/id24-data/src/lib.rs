//! ID24 data tables.
//!
//! Records are authored against a [`FeatureTier`]. Base fields are readable by
//! every engine; fields added by later tiers sit in [`Tiered`] groups that a
//! reader below the introducing tier cannot read. The [`TableLoader`] parses
//! JSON tables, binds state codepointers by name, and enforces the declared
//! tier by rejecting or degrading newer records.

/// Codepointer names, tiers, and bindings.
pub mod codepointer;
/// Load configuration.
pub mod config;
/// Error types for the data crate.
pub mod error;
/// Table loading and the loaded tables.
pub mod loader;
/// The record kinds and the tier gate.
pub mod records;
/// Feature tiers.
pub mod tier;
/// Fixed-point, angle, and state argument values.
pub mod types;

/// Re-exports of [`codepointer::Codepointer`] and [`codepointer::CodepointerTable`].
pub use codepointer::{Codepointer, CodepointerTable};
/// Re-exports of [`config::LoadConfig`], [`config::TierPolicy`], and [`config::CodepointerPolicy`].
pub use config::{CodepointerPolicy, LoadConfig, TierPolicy};
/// Re-exports of [`error::DataError`] and [`error::DataResult`].
pub use error::{DataError, DataResult};
/// Re-exports of the loader types.
pub use loader::{DegradedRecord, LoadReport, RecordTable, TableLoader, Tables};
/// Re-exports of the record kinds and reserved indices.
pub use records::ammo::{AM_FUEL, AmmoId24, AmmoInfo};
/// Re-exports of [`records::mobj::MobjInfo`] and its extension groups.
pub use records::mobj::{MobjId24, MobjInfo, MobjMbf21};
/// Re-exports of [`records::sound::SfxInfo`] and [`records::sound::SpriteInfo`].
pub use records::sound::{SfxInfo, SpriteInfo};
/// Re-exports of [`records::state::State`] and its extension groups.
pub use records::state::{State, StateId24, StateMbf21};
/// Re-exports of [`records::weapon::WeaponInfo`], its extension groups, and reserved indices.
pub use records::weapon::{WP_CALAMITYBLADE, WP_INCINERATOR, WeaponId24, WeaponInfo, WeaponMbf21};
/// Re-exports of the record traits and views.
pub use records::{Adjustments, ExtensionGroup, FieldValue, Record, RecordView, Tiered};
/// Re-export of [`tier::FeatureTier`].
pub use tier::FeatureTier;
/// Re-exports of the value types.
pub use types::{Angle, FRACUNIT, Fixed, StateArg};
