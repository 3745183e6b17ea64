//! Formations as ordered slot lists
//!
//! Slot order is the declared priority used to break scarcity ties when a
//! lineup is built.

use super::position::PositionCategory;
use super::roles::RoleCatalog;
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Roles that may fill a slot of the given category.
pub fn default_eligible_roles(position: PositionCategory) -> &'static [&'static str] {
    match position {
        PositionCategory::GK => &["GK"],
        PositionCategory::CB => &["CB-STOPPER", "BCB"],
        PositionCategory::FB => &["FB", "WB"],
        PositionCategory::DM => &["MD"],
        PositionCategory::CM => &["MC", "MD"],
        PositionCategory::AM => &["AM(C)"],
        PositionCategory::W => &["WAP", "WAS"],
        PositionCategory::ST => &["ST-PROVIDER", "ST-GS"],
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormationSlot {
    pub position: PositionCategory,
    /// Empty means the category defaults.
    #[serde(default)]
    pub eligible_roles: Vec<String>,
    pub count: usize,
}

impl FormationSlot {
    pub fn new(position: PositionCategory, count: usize) -> Self {
        Self {
            position,
            eligible_roles: default_eligible_roles(position)
                .iter()
                .map(|r| r.to_string())
                .collect(),
            count,
        }
    }

    pub fn accepts(&self, role: &str) -> bool {
        self.eligible_roles.iter().any(|r| r == role)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formation {
    pub name: String,
    pub slots: Vec<FormationSlot>,
}

impl Formation {
    pub fn new(name: impl Into<String>, slots: &[(PositionCategory, usize)]) -> Self {
        Self {
            name: name.into(),
            slots: slots
                .iter()
                .map(|(position, count)| FormationSlot::new(*position, *count))
                .collect(),
        }
    }

    /// Number of starters the formation asks for.
    pub fn size(&self) -> usize {
        self.slots.iter().map(|s| s.count).sum()
    }

    fn validate(&self, roles: &RoleCatalog) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyField {
                field: "Formation name",
            });
        }
        for slot in &self.slots {
            if let Some(unknown) = slot.eligible_roles.iter().find(|r| !roles.contains(r)) {
                return Err(ValidationError::UnknownRole {
                    formation: self.name.clone(),
                    role: unknown.clone(),
                });
            }
        }
        Ok(())
    }
}

fn lookup_key(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormationCatalog {
    formations: Vec<Formation>,
}

impl FormationCatalog {
    /// Builds a catalog, filling empty eligible-role lists with the category
    /// defaults and checking every role against `roles`.
    pub fn new(formations: Vec<Formation>, roles: &RoleCatalog) -> Result<Self, ValidationError> {
        let mut formations = formations;
        for formation in &mut formations {
            for slot in &mut formation.slots {
                if slot.eligible_roles.is_empty() {
                    *slot = FormationSlot::new(slot.position, slot.count);
                }
            }
            formation.validate(roles)?;
        }
        Ok(Self { formations })
    }

    pub fn standard() -> Self {
        use PositionCategory::*;

        let formations = vec![
            Formation::new("4-2-3-1 DM AM Wide", &[(GK, 1), (CB, 2), (FB, 2), (DM, 2), (AM, 1), (W, 2), (ST, 1)]),
            Formation::new("4-3-3 DM Wide", &[(GK, 1), (CB, 2), (FB, 2), (DM, 1), (CM, 2), (W, 2), (ST, 1)]),
            Formation::new("4-3-2-1 DM AM Narrow", &[(GK, 1), (CB, 2), (FB, 2), (DM, 1), (CM, 2), (AM, 2), (ST, 1)]),
            Formation::new("5-2-2-1 DM AM", &[(GK, 1), (CB, 3), (FB, 2), (DM, 2), (AM, 2), (ST, 1)]),
            Formation::new("5-2-3 DM Wide", &[(GK, 1), (CB, 3), (FB, 2), (DM, 2), (W, 2), (ST, 1)]),
            Formation::new("4-4-2", &[(GK, 1), (CB, 2), (FB, 2), (CM, 2), (W, 2), (ST, 2)]),
            Formation::new("4-2-4 DM Wide", &[(GK, 1), (CB, 2), (FB, 2), (DM, 2), (W, 2), (ST, 2)]),
            Formation::new("4-4-2 Diamond Narrow", &[(GK, 1), (CB, 2), (FB, 2), (DM, 1), (CM, 2), (AM, 1), (ST, 2)]),
            Formation::new("4-2-2-2 DM AM Narrow", &[(GK, 1), (CB, 2), (FB, 2), (DM, 2), (AM, 2), (ST, 2)]),
            Formation::new("5-3-2 DM WB", &[(GK, 1), (CB, 3), (FB, 2), (DM, 1), (CM, 2), (ST, 2)]),
            Formation::new("3-4-3", &[(GK, 1), (CB, 3), (FB, 2), (CM, 2), (W, 2), (ST, 1)]),
        ];
        Self { formations }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Formation> {
        self.formations.iter()
    }

    pub fn len(&self) -> usize {
        self.formations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formations.is_empty()
    }

    /// Finds a formation ignoring case and punctuation.
    ///
    /// An exact match wins; otherwise the first formation whose name starts
    /// with the query, so `"433"` finds "4-3-3 DM Wide".
    pub fn get(&self, name: &str) -> Option<&Formation> {
        let key = lookup_key(name);
        if key.is_empty() {
            return None;
        }
        self.formations
            .iter()
            .find(|f| lookup_key(&f.name) == key)
            .or_else(|| self.formations.iter().find(|f| lookup_key(&f.name).starts_with(&key)))
    }

    pub fn find(&self, name: &str) -> Result<&Formation, ValidationError> {
        self.get(name)
            .ok_or_else(|| ValidationError::UnknownFormation(name.to_string()))
    }
}

impl Default for FormationCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
