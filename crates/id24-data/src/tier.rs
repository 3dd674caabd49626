//! Feature tiers: the historical engine capability levels records are
//! authored against.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::DataError;

/// An engine feature level. Tiers are totally ordered; a reader at tier `X`
/// understands every record authored at `X` or below.
///
/// Serializes as its canonical name. Deserializes from anything
/// [`FromStr`] accepts, or from the integer ordinal older tables use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeatureTier {
    /// The original engine.
    #[default]
    Vanilla,
    /// Limit-removing ports.
    LimitRemoving,
    /// Limit-removing ports with the common bug fixes.
    LimitRemovingFixed,
    /// Boom 2.02.
    #[serde(rename = "boom")]
    Boom202,
    /// Complevel 9.
    Complevel9,
    /// MBF.
    Mbf,
    /// MBF with DEHEXTRA.
    MbfDehextra,
    /// MBF21.
    Mbf21,
    /// MBF21 with extensions.
    Mbf21Extended,
    /// ID24.
    Id24,
}

impl FeatureTier {
    /// Every tier, oldest first.
    pub const ALL: [FeatureTier; 10] = [
        FeatureTier::Vanilla,
        FeatureTier::LimitRemoving,
        FeatureTier::LimitRemovingFixed,
        FeatureTier::Boom202,
        FeatureTier::Complevel9,
        FeatureTier::Mbf,
        FeatureTier::MbfDehextra,
        FeatureTier::Mbf21,
        FeatureTier::Mbf21Extended,
        FeatureTier::Id24,
    ];

    /// The newest tier.
    pub const LATEST: FeatureTier = FeatureTier::Id24;

    /// Numeric encoding used by the data tables (vanilla is 0).
    pub fn ordinal(self) -> i32 {
        self as i32
    }

    /// Look up a tier by its numeric encoding.
    pub fn from_ordinal(ordinal: i32) -> Option<Self> {
        usize::try_from(ordinal)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    /// The tier's canonical name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Vanilla => "vanilla",
            Self::LimitRemoving => "limit-removing",
            Self::LimitRemovingFixed => "limit-removing-fixed",
            Self::Boom202 => "boom",
            Self::Complevel9 => "complevel9",
            Self::Mbf => "mbf",
            Self::MbfDehextra => "mbf-dehextra",
            Self::Mbf21 => "mbf21",
            Self::Mbf21Extended => "mbf21-extended",
            Self::Id24 => "id24",
        }
    }

    /// Returns `true` if a reader at this tier may read something introduced
    /// at `introduced`.
    pub fn supports(self, introduced: FeatureTier) -> bool {
        introduced <= self
    }
}

impl fmt::Display for FeatureTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FeatureTier {
    type Err = DataError;

    /// Accepts canonical names, `boom-2.02`, and numeric ordinals.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        if let Ok(ordinal) = name.parse::<i32>() {
            return Self::from_ordinal(ordinal).ok_or_else(|| DataError::UnknownTier(s.to_string()));
        }
        match name.as_str() {
            "boom-2.02" | "boom2.02" => Ok(Self::Boom202),
            other => Self::ALL
                .into_iter()
                .find(|tier| tier.name() == other)
                .ok_or_else(|| DataError::UnknownTier(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for FeatureTier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TierVisitor)
    }
}

struct TierVisitor;

impl Visitor<'_> for TierVisitor {
    type Value = FeatureTier;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a feature tier name or ordinal 0-9")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<FeatureTier, E> {
        value.parse().map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<FeatureTier, E> {
        i32::try_from(value)
            .ok()
            .and_then(FeatureTier::from_ordinal)
            .ok_or_else(|| E::invalid_value(Unexpected::Signed(value), &self))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<FeatureTier, E> {
        i32::try_from(value)
            .ok()
            .and_then(FeatureTier::from_ordinal)
            .ok_or_else(|| E::invalid_value(Unexpected::Unsigned(value), &self))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn tiers_are_ordered_oldest_first() {
        assert!(FeatureTier::Vanilla < FeatureTier::LimitRemoving);
        assert!(FeatureTier::Boom202 < FeatureTier::Complevel9);
        assert!(FeatureTier::Mbf < FeatureTier::Mbf21);
        assert!(FeatureTier::Mbf21Extended < FeatureTier::Id24);
        assert_eq!(FeatureTier::LATEST, FeatureTier::Id24);
    }

    #[test]
    fn ordinals_match_table_encoding() {
        assert_eq!(FeatureTier::Vanilla.ordinal(), 0);
        assert_eq!(FeatureTier::Boom202.ordinal(), 3);
        assert_eq!(FeatureTier::Mbf21.ordinal(), 7);
        assert_eq!(FeatureTier::Id24.ordinal(), 9);
        assert_eq!(FeatureTier::from_ordinal(-1), None);
        assert_eq!(FeatureTier::from_ordinal(10), None);
    }

    #[test]
    fn parse_accepts_aliases() {
        assert_eq!("boom".parse::<FeatureTier>().unwrap(), FeatureTier::Boom202);
        assert_eq!("Boom-2.02".parse::<FeatureTier>().unwrap(), FeatureTier::Boom202);
        assert_eq!("5".parse::<FeatureTier>().unwrap(), FeatureTier::Mbf);
        assert!(matches!(
            "doom64".parse::<FeatureTier>(),
            Err(DataError::UnknownTier(name)) if name == "doom64"
        ));
    }

    #[test]
    fn serde_uses_canonical_names() {
        let json = serde_json::to_string(&FeatureTier::MbfDehextra).unwrap();
        assert_eq!(json, "\"mbf-dehextra\"");
        let tier: FeatureTier = serde_json::from_str("\"boom\"").unwrap();
        assert_eq!(tier, FeatureTier::Boom202);
    }

    #[test]
    fn serde_accepts_integer_ordinals() {
        let tier: FeatureTier = serde_json::from_str("7").unwrap();
        assert_eq!(tier, FeatureTier::Mbf21);
        let tier: FeatureTier = serde_json::from_str("0").unwrap();
        assert_eq!(tier, FeatureTier::Vanilla);

        let err = serde_json::from_str::<FeatureTier>("12").unwrap_err();
        assert!(err.to_string().contains("ordinal 0-9"));
        assert!(serde_json::from_str::<FeatureTier>("-1").is_err());
        assert!(serde_json::from_str::<FeatureTier>("\"doom64\"").is_err());
    }

    #[test]
    fn tier_list_snapshot() {
        let listing = FeatureTier::ALL
            .iter()
            .map(|tier| format!("{} {tier}", tier.ordinal()))
            .collect::<Vec<_>>()
            .join("\n");
        insta::assert_snapshot!(listing, @r"
        0 vanilla
        1 limit-removing
        2 limit-removing-fixed
        3 boom
        4 complevel9
        5 mbf
        6 mbf-dehextra
        7 mbf21
        8 mbf21-extended
        9 id24
        ");
    }

    proptest! {
        #[test]
        fn display_round_trips_through_parse(i in 0usize..10) {
            let tier = FeatureTier::ALL[i];
            prop_assert_eq!(tier.to_string().parse::<FeatureTier>().unwrap(), tier);
            prop_assert_eq!(FeatureTier::from_ordinal(tier.ordinal()), Some(tier));
        }

        #[test]
        fn supports_matches_ordering(a in 0usize..10, b in 0usize..10) {
            let (reader, introduced) = (FeatureTier::ALL[a], FeatureTier::ALL[b]);
            prop_assert_eq!(reader.supports(introduced), a >= b);
        }
    }
}
