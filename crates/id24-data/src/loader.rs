//! Loading tables from JSON at a declared feature tier.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::codepointer::CodepointerTable;
use crate::config::{LoadConfig, TierPolicy};
use crate::error::{DataError, DataResult};
use crate::records::ammo::AmmoInfo;
use crate::records::mobj::MobjInfo;
use crate::records::sound::{SfxInfo, SpriteInfo};
use crate::records::state::State;
use crate::records::weapon::WeaponInfo;
use crate::records::{Adjustments, Record, RecordView};
use crate::tier::FeatureTier;

/// The records of one table in authored order, indexed by record index.
#[derive(Debug, Clone)]
pub struct RecordTable<R> {
    records: Vec<R>,
    positions: HashMap<i32, usize>,
}

impl<R: Record> RecordTable<R> {
    /// Build a table, rejecting repeated indices.
    pub fn from_records(records: Vec<R>) -> DataResult<Self> {
        let mut positions = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            if positions.insert(record.index(), position).is_some() {
                return Err(DataError::DuplicateIndex {
                    table: R::TABLE,
                    index: record.index(),
                });
            }
        }
        Ok(Self { records, positions })
    }

    /// Look up a record by index.
    pub fn get(&self, index: i32) -> Option<&R> {
        self.positions.get(&index).map(|&i| &self.records[i])
    }

    /// Returns `true` if a record has this index.
    pub fn contains(&self, index: i32) -> bool {
        self.positions.contains_key(&index)
    }

    /// Records in authored order.
    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the table has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<R> Default for RecordTable<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            positions: HashMap::new(),
        }
    }
}

/// A record the loader had to change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegradedRecord {
    /// Table of the record.
    pub table: &'static str,
    /// Index of the record.
    pub index: i32,
    /// The record's tier as authored.
    pub authored: FeatureTier,
    /// What was changed.
    pub adjustments: Adjustments,
}

/// What happened during a load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// The tier the load ran at.
    pub declared: FeatureTier,
    /// Records changed to fit the declared tier, in load order.
    pub degraded: Vec<DegradedRecord>,
}

impl LoadReport {
    /// Returns `true` if no record was changed.
    pub fn is_clean(&self) -> bool {
        self.degraded.is_empty()
    }

    /// Indices of the degraded records in `table`.
    pub fn degraded_in(&self, table: &str) -> Vec<i32> {
        self.degraded
            .iter()
            .filter(|record| record.table == table)
            .map(|record| record.index)
            .collect()
    }
}

/// Every table from one document.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    /// Thing templates.
    pub mobjinfo: RecordTable<MobjInfo>,
    /// Animation states.
    pub states: RecordTable<State>,
    /// Weapons.
    pub weapons: RecordTable<WeaponInfo>,
    /// Ammo types.
    pub ammo: RecordTable<AmmoInfo>,
    /// Sound effects.
    pub sounds: RecordTable<SfxInfo>,
    /// Sprite names.
    pub sprites: RecordTable<SpriteInfo>,
}

impl Tables {
    /// Names of the tables, in document order.
    pub const NAMES: [&'static str; 6] = [
        MobjInfo::TABLE,
        State::TABLE,
        WeaponInfo::TABLE,
        AmmoInfo::TABLE,
        SfxInfo::TABLE,
        SpriteInfo::TABLE,
    ];

    /// Record count per table, in document order.
    pub fn counts(&self) -> Vec<(&'static str, usize)> {
        vec![
            (MobjInfo::TABLE, self.mobjinfo.len()),
            (State::TABLE, self.states.len()),
            (WeaponInfo::TABLE, self.weapons.len()),
            (AmmoInfo::TABLE, self.ammo.len()),
            (SfxInfo::TABLE, self.sounds.len()),
            (SpriteInfo::TABLE, self.sprites.len()),
        ]
    }

    /// The view of one record for a reader at `reader`. Returns `Ok(None)`
    /// when the table or index does not exist.
    pub fn view(&self, table: &str, index: i32, reader: FeatureTier) -> DataResult<Option<RecordView>> {
        fn view_of<R: Record>(
            table: &RecordTable<R>,
            index: i32,
            reader: FeatureTier,
        ) -> DataResult<Option<RecordView>> {
            table
                .get(index)
                .map(|record| RecordView::of(record, reader))
                .transpose()
        }

        match table {
            "mobjinfo" => view_of(&self.mobjinfo, index, reader),
            "states" => view_of(&self.states, index, reader),
            "weapons" => view_of(&self.weapons, index, reader),
            "ammo" => view_of(&self.ammo, index, reader),
            "sounds" => view_of(&self.sounds, index, reader),
            "sprites" => view_of(&self.sprites, index, reader),
            _ => Ok(None),
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Document {
    mobjinfo: Vec<MobjInfo>,
    states: Vec<State>,
    weapons: Vec<WeaponInfo>,
    ammo: Vec<AmmoInfo>,
    sounds: Vec<SfxInfo>,
    sprites: Vec<SpriteInfo>,
}

/// Loads tables at a declared feature tier.
#[derive(Debug, Clone)]
pub struct TableLoader {
    config: LoadConfig,
    codepointers: CodepointerTable,
}

impl TableLoader {
    /// A loader using the standard codepointer names.
    pub fn new(config: LoadConfig) -> Self {
        Self {
            config,
            codepointers: CodepointerTable::standard(),
        }
    }

    /// Use `codepointers` to bind state actions.
    pub fn with_codepointers(mut self, codepointers: CodepointerTable) -> Self {
        self.codepointers = codepointers;
        self
    }

    /// The loader's configuration.
    pub fn config(&self) -> &LoadConfig {
        &self.config
    }

    /// Load one table given as a JSON array of records.
    pub fn load_records<R: Record>(&self, json: &str) -> DataResult<(RecordTable<R>, LoadReport)> {
        let records: Vec<R> = serde_json::from_str(json)?;
        let mut report = self.report();
        let table = self.admit_all(records, &mut report)?;
        Ok((table, report))
    }

    /// Load every table from one JSON document keyed by table name.
    pub fn load_tables(&self, json: &str) -> DataResult<(Tables, LoadReport)> {
        let document: Document = serde_json::from_str(json)?;
        let mut report = self.report();
        let tables = Tables {
            mobjinfo: self.admit_all(document.mobjinfo, &mut report)?,
            states: self.admit_all(document.states, &mut report)?,
            weapons: self.admit_all(document.weapons, &mut report)?,
            ammo: self.admit_all(document.ammo, &mut report)?,
            sounds: self.admit_all(document.sounds, &mut report)?,
            sprites: self.admit_all(document.sprites, &mut report)?,
        };
        debug!(
            declared = %self.config.declared_tier,
            degraded = report.degraded.len(),
            "tables loaded"
        );
        Ok((tables, report))
    }

    /// Load every table from a JSON file.
    pub fn load_path(&self, path: impl AsRef<Path>) -> DataResult<(Tables, LoadReport)> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_tables(&json)
    }

    fn report(&self) -> LoadReport {
        LoadReport {
            declared: self.config.declared_tier,
            degraded: Vec::new(),
        }
    }

    fn admit_all<R: Record>(&self, records: Vec<R>, report: &mut LoadReport) -> DataResult<RecordTable<R>> {
        let records = records
            .into_iter()
            .map(|record| self.admit(record, report))
            .collect::<DataResult<Vec<_>>>()?;
        RecordTable::from_records(records)
    }

    fn admit<R: Record>(&self, mut record: R, report: &mut LoadReport) -> DataResult<R> {
        let declared = self.config.declared_tier;
        let authored = record.minimum_features();
        let index = record.index();
        let mut adjustments = Adjustments::default();

        if !declared.supports(authored) {
            match self.config.policy {
                TierPolicy::Reject => {
                    return Err(DataError::TierViolation {
                        table: R::TABLE,
                        index,
                        required: authored,
                        declared,
                    });
                }
                TierPolicy::Degrade => {
                    record.set_minimum_features(declared);
                    adjustments.clamped = true;
                }
            }
        }

        adjustments.dropped_groups = record.strip_above(declared);
        if self.config.policy == TierPolicy::Reject {
            if let Some(&group) = adjustments.dropped_groups.first() {
                let introduced = R::GROUPS
                    .iter()
                    .find(|(key, _)| *key == group)
                    .map_or(FeatureTier::LATEST, |&(_, tier)| tier);
                return Err(DataError::GroupTierViolation {
                    table: R::TABLE,
                    index,
                    group,
                    introduced,
                    declared,
                });
            }
        }
        adjustments.cleared_action = record
            .resolve(&self.codepointers, &self.config)?
            .cleared_action;

        if !adjustments.is_empty() {
            warn!(
                table = R::TABLE,
                index,
                authored = %authored,
                declared = %declared,
                dropped = ?adjustments.dropped_groups,
                "record degraded"
            );
            report.degraded.push(DegradedRecord {
                table: R::TABLE,
                index,
                authored,
                adjustments,
            });
        }
        Ok(record)
    }
}

impl Default for TableLoader {
    fn default() -> Self {
        Self::new(LoadConfig::default())
    }
}
