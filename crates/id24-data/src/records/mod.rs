//! The versioned record kinds and the tier gate on their extension groups.
//!
//! Every record starts with an `index` and a `minimum_features` tier, followed
//! by base fields every reader understands. Later tiers append whole groups of
//! fields (an `mbf21` group, an `id24` group) which are wrapped in [`Tiered`]
//! so that a reader below the introducing tier cannot read them by accident.

/// Ammo types.
pub mod ammo;
/// Thing templates.
pub mod mobj;
/// Sound and sprite name tables.
pub mod sound;
/// Animation states.
pub mod state;
/// Weapons.
pub mod weapon;

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codepointer::CodepointerTable;
use crate::config::LoadConfig;
use crate::error::{DataError, DataResult};
use crate::tier::FeatureTier;

/// A group of fields introduced together at one feature tier.
pub trait ExtensionGroup {
    /// Key of the group in table data, also used in diagnostics.
    const GROUP: &'static str;
    /// The tier that introduced the group.
    const INTRODUCED: FeatureTier;
}

/// An optional extension group, readable only at or above its tier.
pub struct Tiered<T> {
    value: Option<T>,
}

impl<T: ExtensionGroup> Tiered<T> {
    /// A present group.
    pub fn new(value: T) -> Self {
        Self {
            value: Some(value),
        }
    }

    /// An absent group.
    pub fn absent() -> Self {
        Self {
            value: None,
        }
    }

    /// The tier that introduced this group.
    pub fn introduced(&self) -> FeatureTier {
        T::INTRODUCED
    }

    /// Returns `true` if the record carries this group.
    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }

    /// Read the group as a consumer at tier `reader`.
    ///
    /// Fails with [`DataError::FieldTierViolation`] when `reader` predates the
    /// group, whether or not the record carries it. Returns `Ok(None)` when the
    /// reader may see the group but the record leaves it out.
    pub fn read(&self, reader: FeatureTier) -> DataResult<Option<&T>> {
        if !reader.supports(T::INTRODUCED) {
            return Err(DataError::FieldTierViolation {
                group: T::GROUP,
                introduced: T::INTRODUCED,
                reader,
            });
        }
        Ok(self.value.as_ref())
    }

    /// Drop the group if it is newer than `tier`. Returns `true` if a present
    /// group was dropped.
    pub fn strip_above(&mut self, tier: FeatureTier) -> bool {
        if tier.supports(T::INTRODUCED) {
            return false;
        }
        self.value.take().is_some()
    }
}

impl<T: ExtensionGroup> Default for Tiered<T> {
    fn default() -> Self {
        Self::absent()
    }
}

impl<T: Clone> Clone for Tiered<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
        }
    }
}

impl<T: fmt::Debug + ExtensionGroup> fmt::Debug for Tiered<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}@{}({value:?})", T::GROUP, T::INTRODUCED),
            None => write!(f, "{}@{}(absent)", T::GROUP, T::INTRODUCED),
        }
    }
}

impl<T: PartialEq> PartialEq for Tiered<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Serialize> Serialize for Tiered<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Tiered<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self {
            value: Option::deserialize(deserializer)?,
        })
    }
}

/// What the loader did to a record to make it legal at the declared tier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Adjustments {
    /// Extension groups dropped for being newer than the declared tier.
    pub dropped_groups: Vec<&'static str>,
    /// The record's tier was lowered to the declared tier.
    pub clamped: bool,
    /// A state's codepointer was cleared.
    pub cleared_action: bool,
}

impl Adjustments {
    /// Returns `true` if nothing was changed.
    pub fn is_empty(&self) -> bool {
        self.dropped_groups.is_empty() && !self.clamped && !self.cleared_action
    }
}

/// A row in one of the data tables.
pub trait Record: DeserializeOwned + Serialize + fmt::Debug {
    /// Name of the table this record kind lives in.
    const TABLE: &'static str;

    /// Extension group keys and the tiers that introduced them, oldest first.
    const GROUPS: &'static [(&'static str, FeatureTier)];

    /// The record's stable index.
    fn index(&self) -> i32;

    /// The earliest tier able to interpret the record.
    fn minimum_features(&self) -> FeatureTier;

    /// Overwrite the record's tier.
    fn set_minimum_features(&mut self, tier: FeatureTier);

    /// Drop every extension group newer than `tier`, returning their names.
    fn strip_above(&mut self, _tier: FeatureTier) -> Vec<&'static str> {
        Vec::new()
    }

    /// Resolve references that need outside tables. Only states bind
    /// anything, their codepointers.
    fn resolve(
        &mut self,
        _codepointers: &CodepointerTable,
        _config: &LoadConfig,
    ) -> DataResult<Adjustments> {
        Ok(Adjustments::default())
    }
}

/// One named field value in a [`RecordView`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
    /// Field name, prefixed with its group for extension fields.
    pub name: String,
    /// The value as it appears in table data.
    pub value: serde_json::Value,
}

/// The fields of a record that a reader at some tier may see.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordView {
    /// The reader's tier.
    pub reader: FeatureTier,
    /// Fields legal at the reader's tier.
    pub fields: Vec<FieldValue>,
    /// Extension groups the reader may not read, with their tiers.
    pub gated: Vec<(&'static str, FeatureTier)>,
}

impl RecordView {
    /// Build the view of `record` for a reader at `reader`.
    pub fn of<R: Record>(record: &R, reader: FeatureTier) -> DataResult<Self> {
        let serde_json::Value::Object(mut map) = serde_json::to_value(record)? else {
            return Ok(Self {
                reader,
                fields: Vec::new(),
                gated: Vec::new(),
            });
        };

        let mut groups = Vec::new();
        for &(key, introduced) in R::GROUPS {
            let value = map.remove(key);
            groups.push((key, introduced, value));
        }

        let mut fields: Vec<FieldValue> = map
            .into_iter()
            .map(|(name, value)| FieldValue { name, value })
            .collect();
        let mut gated = Vec::new();

        for (key, introduced, value) in groups {
            if !reader.supports(introduced) {
                gated.push((key, introduced));
                continue;
            }
            if let Some(serde_json::Value::Object(group)) = value {
                fields.extend(group.into_iter().map(|(name, value)| FieldValue {
                    name: format!("{key}.{name}"),
                    value,
                }));
            }
        }

        Ok(Self {
            reader,
            fields,
            gated,
        })
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| &field.value)
    }
}
