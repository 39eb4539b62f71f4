//! Entity mapping table: bare entity key -> aliased import path
//!
//! The table is assembled once (built-in entries plus config overrides) and is
//! read-only afterwards. Every lookup in the rewrite path borrows it.

use crate::core::error::{ConfigError, RewriteResult};
use serde::Serialize;
use std::collections::BTreeMap;

/// Alias prefix every built-in entry resolves under
pub const ALIAS_PREFIX: &str = "@libs/infrastructure/entities";

/// Built-in entries as `(entity key, domain directory)`
const BUILTIN_ENTITIES: &[(&str, &str)] = &[
  // Auth
  ("user.entity", "auth"),
  ("user-profile.entity", "auth"),
  ("user-permission.entity", "auth"),
  ("permission.entity", "auth"),
  ("profile.entity", "auth"),
  ("profile-permission.entity", "auth"),
  ("user-change-history.entity", "auth"),
  ("user-role.entity", "auth"),
  ("user-profile-data.entity", "auth"),

  // Billing
  ("invoice.entity", "billing"),
  ("invoice-item.entity", "billing"),
  ("payment.entity", "billing"),
  ("billing-cycle.entity", "billing"),
  ("pricing-plan.entity", "billing"),
  ("pricing-plan-limits.entity", "billing"),
  ("pricing-period.entity", "billing"),
  ("pricing-promotion.entity", "billing"),
  ("pricing-feature.entity", "billing"),
  ("saved-payment-method.entity", "billing"),
  ("subscription-event.entity", "billing"),
  ("subscription-alert.entity", "billing"),
  ("coupon.entity", "billing"),
  ("plan-change.entity", "billing"),
  ("legacy-promotion.entity", "billing"),

  // Loyalty
  ("loyalty-program.entity", "loyalty"),
  ("enrollment.entity", "loyalty"),
  ("points-transaction.entity", "loyalty"),
  ("reward-rule.entity", "loyalty"),
  ("reward-rule-eligibility.entity", "loyalty"),
  ("reward-rule-eligibility-membership-status.entity", "loyalty"),
  ("reward-rule-eligibility-flag.entity", "loyalty"),
  ("reward-rule-eligibility-category-id.entity", "loyalty"),
  ("reward-rule-eligibility-sku.entity", "loyalty"),
  ("reward-rule-points-formula.entity", "loyalty"),
  ("reward-rule-points-table-entry.entity", "loyalty"),
  ("reward-rule-points-formula-bonus.entity", "loyalty"),
  ("reward.entity", "loyalty"),
  ("redemption-code.entity", "loyalty"),
  ("loyalty-program-earning-domain.entity", "loyalty"),

  // Partner
  ("partner.entity", "partner"),
  ("partner-subscription.entity", "partner"),
  ("partner-subscription-usage.entity", "partner"),
  ("partner-request.entity", "partner"),
  ("partner-archive.entity", "partner"),
  ("partner-staff-assignment.entity", "partner"),
  ("branch.entity", "partner"),
  ("catalog.entity", "partner"),
  ("commission.entity", "partner"),
  ("goal.entity", "partner"),
  ("partner-allowed-loyalty-program-type.entity", "partner"),

  // Customer
  ("customer-membership.entity", "customer"),
  ("customer-tier.entity", "customer"),
  ("customer-tier-benefit.entity", "customer"),
  ("referral.entity", "customer"),
  ("invitation-code.entity", "customer"),

  // Communication
  ("message-template.entity", "communication"),
  ("partner-message.entity", "communication"),
  ("message-recipient.entity", "communication"),
  ("message-filter.entity", "communication"),
  ("notification.entity", "communication"),

  // Tier
  ("tier-policy.entity", "tier"),
  ("tier-status.entity", "tier"),
  ("tier-benefit.entity", "tier"),
  ("tier-benefit-exclusive-reward.entity", "tier"),
  ("tier-benefit-category-benefit.entity", "tier"),
  ("tier-benefit-category-exclusive-reward.entity", "tier"),

  // System
  ("tenant.entity", "system"),
  ("tenant-features.entity", "system"),
  ("tenant-analytics.entity", "system"),
  ("country.entity", "system"),
  ("currency.entity", "system"),
  ("rate-exchange.entity", "system"),
];

/// Immutable mapping from entity key (`user.entity`) to aliased path
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct EntityMapping {
  entries: BTreeMap<String, String>,
}

impl EntityMapping {
  /// The built-in table of the migrated project
  pub fn builtin() -> Self {
    let entries = BUILTIN_ENTITIES
      .iter()
      .map(|(key, domain)| (key.to_string(), format!("{}/{}/{}", ALIAS_PREFIX, domain, key)))
      .collect();
    Self { entries }
  }

  /// Built-in table with extra or overriding entries applied on top
  pub fn with_overrides<I, K, V>(overrides: I) -> RewriteResult<Self>
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
  {
    let mut mapping = Self::builtin();
    for (key, path) in overrides {
      let key = key.into();
      let path = path.into();
      validate_entry(&key, &path)?;
      mapping.entries.insert(key, path);
    }
    Ok(mapping)
  }

  /// Look up the aliased path for an entity key
  pub fn lookup(&self, key: &str) -> Option<&str> {
    self.entries.get(key).map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Entries sorted by key
  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
  }
}

impl Default for EntityMapping {
  fn default() -> Self {
    Self::builtin()
  }
}

/// Reject entries that the import pattern could never match, or whose
/// replacement would be picked up again on the next run.
fn validate_entry(key: &str, path: &str) -> RewriteResult<()> {
  let invalid = |reason: &str| -> RewriteResult<()> {
    Err(
      ConfigError::InvalidMapping {
        key: key.to_string(),
        reason: reason.to_string(),
      }
      .into(),
    )
  };

  if !key.ends_with(".entity") || key == ".entity" {
    return invalid("key must be an entity file name ending in '.entity'");
  }
  if key.contains(['\'', '"']) {
    return invalid("key must not contain quote characters");
  }
  if path.trim().is_empty() {
    return invalid("aliased path must not be empty");
  }
  if path.contains(['\'', '"']) {
    return invalid("aliased path must not contain quote characters");
  }
  if path.starts_with("./") {
    return invalid("aliased path must not be relative");
  }
  Ok(())
}
