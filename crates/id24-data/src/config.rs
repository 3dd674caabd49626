use crate::tier::FeatureTier;

/// What the loader does with a record newer than the declared tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TierPolicy {
    /// Fail the load with [`crate::DataError::TierViolation`], or with
    /// [`crate::DataError::GroupTierViolation`] when only an extension group
    /// is too new.
    Reject,
    /// Drop the newer field groups, lower the record's tier, and log it.
    #[default]
    Degrade,
}

/// What the loader does with a state naming an unknown codepointer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CodepointerPolicy {
    /// Fail the load with [`crate::DataError::UnknownCodepointer`].
    #[default]
    Reject,
    /// Clear the state's action and log it.
    Ignore,
}

/// Configuration for a table load.
#[derive(Debug, Clone)]
pub struct LoadConfig {
    /// The feature tier the consuming engine supports.
    pub declared_tier: FeatureTier,
    /// Handling of records above the declared tier.
    pub policy: TierPolicy,
    /// Handling of unknown codepointer names.
    pub unknown_codepointers: CodepointerPolicy,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            declared_tier: FeatureTier::LATEST,
            policy: TierPolicy::Degrade,
            unknown_codepointers: CodepointerPolicy::Reject,
        }
    }
}

impl LoadConfig {
    /// Set the declared tier.
    pub fn with_tier(mut self, tier: FeatureTier) -> Self {
        self.declared_tier = tier;
        self
    }

    /// Set the policy for records above the declared tier.
    pub fn with_policy(mut self, policy: TierPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the policy for unknown codepointers.
    pub fn with_unknown_codepointers(mut self, policy: CodepointerPolicy) -> Self {
        self.unknown_codepointers = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let config = LoadConfig::default();
        assert_eq!(config.declared_tier, FeatureTier::Id24);
        assert_eq!(config.policy, TierPolicy::Degrade);
        assert_eq!(config.unknown_codepointers, CodepointerPolicy::Reject);
    }

    #[test]
    fn config_builder_chain() {
        let config = LoadConfig::default()
            .with_tier(FeatureTier::Mbf)
            .with_policy(TierPolicy::Reject)
            .with_unknown_codepointers(CodepointerPolicy::Ignore);
        assert_eq!(config.declared_tier, FeatureTier::Mbf);
        assert_eq!(config.policy, TierPolicy::Reject);
        assert_eq!(config.unknown_codepointers, CodepointerPolicy::Ignore);
    }
}
