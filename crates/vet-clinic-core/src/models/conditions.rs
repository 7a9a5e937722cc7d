//! Pet condition roles.
//!
//! A pet can hold several condition roles at once. Healthy and Injured
//! exclude each other; Pregnant combines with either.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Role data for a healthy pet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Healthy {
    /// Date of the last check-up that found the pet healthy
    pub last_checkup: NaiveDate,
}

/// Role data for a pregnant pet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pregnant {
    /// Expected delivery date
    pub expected_delivery: NaiveDate,
    /// Expected number of offspring
    pub litter_size: u32,
}

/// Role data for an injured pet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Injured {
    /// Kind of injury (e.g., "fractured leg")
    pub injury: String,
    /// Date the injury happened
    pub injured_on: NaiveDate,
}

/// Condition role tags, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConditionKind {
    Healthy,
    Pregnant,
    Injured,
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConditionKind::Healthy => "Healthy",
            ConditionKind::Pregnant => "Pregnant",
            ConditionKind::Injured => "Injured",
        };
        f.write_str(name)
    }
}

/// The set of condition roles a pet currently holds.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Conditions {
    #[serde(default)]
    healthy: Option<Healthy>,
    #[serde(default)]
    pregnant: Option<Pregnant>,
    #[serde(default)]
    injured: Option<Injured>,
}

impl Conditions {
    /// Mark healthy. Clears the injured role.
    pub fn set_healthy(&mut self, healthy: Healthy) {
        self.injured = None;
        self.healthy = Some(healthy);
    }

    /// Mark injured. Clears the healthy role.
    pub fn set_injured(&mut self, injured: Injured) {
        self.healthy = None;
        self.injured = Some(injured);
    }

    pub fn set_pregnant(&mut self, pregnant: Pregnant) {
        self.pregnant = Some(pregnant);
    }

    pub fn clear_healthy(&mut self) -> Option<Healthy> {
        self.healthy.take()
    }

    pub fn clear_injured(&mut self) -> Option<Injured> {
        self.injured.take()
    }

    pub fn clear_pregnant(&mut self) -> Option<Pregnant> {
        self.pregnant.take()
    }

    pub fn healthy(&self) -> Option<&Healthy> {
        self.healthy.as_ref()
    }

    pub fn pregnant(&self) -> Option<&Pregnant> {
        self.pregnant.as_ref()
    }

    pub fn injured(&self) -> Option<&Injured> {
        self.injured.as_ref()
    }

    pub fn has(&self, kind: ConditionKind) -> bool {
        match kind {
            ConditionKind::Healthy => self.healthy.is_some(),
            ConditionKind::Pregnant => self.pregnant.is_some(),
            ConditionKind::Injured => self.injured.is_some(),
        }
    }

    /// Roles currently held, in display order.
    pub fn kinds(&self) -> Vec<ConditionKind> {
        [
            ConditionKind::Healthy,
            ConditionKind::Pregnant,
            ConditionKind::Injured,
        ]
        .into_iter()
        .filter(|kind| self.has(*kind))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds().is_empty()
    }
}

impl fmt::Display for Conditions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds = self.kinds();
        if kinds.is_empty() {
            return f.write_str("no recorded condition");
        }
        let names: Vec<String> = kinds.iter().map(|k| k.to_string()).collect();
        f.write_str(&names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn healthy() -> Healthy {
        Healthy {
            last_checkup: date(2024, 3, 1),
        }
    }

    fn injured() -> Injured {
        Injured {
            injury: "sprained paw".into(),
            injured_on: date(2024, 4, 2),
        }
    }

    fn pregnant() -> Pregnant {
        Pregnant {
            expected_delivery: date(2024, 6, 10),
            litter_size: 4,
        }
    }

    #[test]
    fn test_injured_clears_healthy() {
        let mut conditions = Conditions::default();
        conditions.set_healthy(healthy());
        conditions.set_injured(injured());

        assert!(conditions.healthy().is_none());
        assert_eq!(conditions.injured().unwrap().injury, "sprained paw");
        assert_eq!(conditions.kinds(), vec![ConditionKind::Injured]);
    }

    #[test]
    fn test_healthy_clears_injured() {
        let mut conditions = Conditions::default();
        conditions.set_injured(injured());
        conditions.set_healthy(healthy());

        assert!(conditions.injured().is_none());
        assert!(conditions.has(ConditionKind::Healthy));
    }

    #[test]
    fn test_pregnant_coexists() {
        let mut conditions = Conditions::default();
        conditions.set_pregnant(pregnant());
        conditions.set_healthy(healthy());
        conditions.set_injured(injured());

        assert!(conditions.has(ConditionKind::Pregnant));
        assert_eq!(
            conditions.kinds(),
            vec![ConditionKind::Pregnant, ConditionKind::Injured]
        );
        assert_eq!(conditions.to_string(), "Pregnant, Injured");
    }

    #[test]
    fn test_clear() {
        let mut conditions = Conditions::default();
        conditions.set_pregnant(pregnant());
        assert_eq!(conditions.clear_pregnant().unwrap().litter_size, 4);
        assert!(conditions.is_empty());
        assert!(conditions.clear_pregnant().is_none());
        assert_eq!(conditions.to_string(), "no recorded condition");
    }
}
