//! Position vocabulary
//!
//! Position strings follow the game's export format: comma separated
//! segments, each a `/`-joined list of bases with an optional side list,
//! e.g. `"D/WB (R), DM"` or `"M/AM (RLC)"`. A segment without sides is
//! central.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tactical position category used by formations and benchmarks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum PositionCategory {
    GK,
    CB,
    FB,
    DM,
    CM,
    AM,
    W,
    ST,
}

impl PositionCategory {
    pub const ALL: [PositionCategory; 8] = [
        Self::GK,
        Self::CB,
        Self::FB,
        Self::DM,
        Self::CM,
        Self::AM,
        Self::W,
        Self::ST,
    ];

    pub fn group(self) -> PositionGroup {
        match self {
            Self::GK => PositionGroup::Goalkeeper,
            Self::CB | Self::FB => PositionGroup::Defence,
            Self::DM | Self::CM | Self::AM => PositionGroup::Midfield,
            Self::W | Self::ST => PositionGroup::Attack,
        }
    }

    /// Canonical metrics used to benchmark players of this category.
    pub fn key_metrics(self) -> &'static [&'static str] {
        match self {
            Self::GK => &["save_pct", "xgp_90", "pass_pct", "average_rating"],
            Self::CB => &["tackles_90", "interceptions_90", "header_win_pct", "pass_pct"],
            Self::FB => &["tackles_90", "dribbles_90", "pass_pct", "blocks_90"],
            Self::DM => &["tackles_90", "interceptions_90", "pass_pct", "average_rating"],
            Self::CM => &["pass_pct", "tackles_90", "dribbles_90", "shots_on_target_90"],
            Self::AM => &["key_passes_90", "dribbles_90", "xg_90", "pass_pct"],
            Self::W => &["dribbles_90", "key_passes_90", "shots_on_target_90", "pass_pct"],
            Self::ST => &["shots_on_target_90", "xg_90", "key_passes_90", "average_rating"],
        }
    }

    /// Roles a player listed in this category is evaluated in.
    pub fn roles(self) -> &'static [&'static str] {
        match self {
            Self::GK => &["GK"],
            Self::CB => &["CB-STOPPER", "BCB"],
            Self::FB => &["FB", "WB"],
            Self::DM => &["MD"],
            Self::CM => &["MD", "MC"],
            Self::AM => &["AM(C)"],
            Self::W => &["WAP", "WAS"],
            Self::ST => &["ST-PROVIDER", "ST-GS"],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::GK => "GK",
            Self::CB => "CB",
            Self::FB => "FB",
            Self::DM => "DM",
            Self::CM => "CM",
            Self::AM => "AM",
            Self::W => "W",
            Self::ST => "ST",
        }
    }
}

impl fmt::Display for PositionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PositionCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == upper)
            .ok_or_else(|| ValidationError::UnknownPosition(s.trim().to_string()))
    }
}

/// Broad group used for bench coverage.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PositionGroup {
    Goalkeeper,
    Defence,
    Midfield,
    Attack,
}

impl fmt::Display for PositionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Goalkeeper => "Goalkeeper",
            Self::Defence => "Defence",
            Self::Midfield => "Midfield",
            Self::Attack => "Attack",
        };
        f.write_str(s)
    }
}

/// Availability flag from the `Inf` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFlag {
    Injured,
    TransferListed,
    U21,
    PreContract,
    Unreliable,
    YellowCard,
    Departed,
    #[default]
    None,
}

impl StatusFlag {
    /// Unknown codes are treated as no flag.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "Inj" => Self::Injured,
            "Wnt" => Self::TransferListed,
            "U21" => Self::U21,
            "PR" => Self::PreContract,
            "Unr" => Self::Unreliable,
            "Yel" => Self::YellowCard,
            "Lst" => Self::Departed,
            _ => Self::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
    Centre,
}

/// One `bases (sides)` segment of a position string.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Segment {
    bases: Vec<String>,
    sides: Vec<Side>,
}

impl Segment {
    fn has_centre(&self) -> bool {
        self.sides.contains(&Side::Centre)
    }

    fn has_flank(&self) -> bool {
        self.sides.iter().any(|s| matches!(s, Side::Left | Side::Right))
    }
}

fn parse_segments(position: &str) -> Vec<Segment> {
    position
        .split(',')
        .filter_map(|raw| {
            let raw = raw.trim().to_uppercase();
            if raw.is_empty() {
                return None;
            }
            let (base_part, side_part) = match raw.find('(') {
                Some(idx) => (&raw[..idx], raw[idx + 1..].trim_end_matches(')')),
                None => (raw.as_str(), ""),
            };
            let bases: Vec<String> = base_part
                .split('/')
                .map(str::trim)
                .filter(|b| !b.is_empty())
                .map(str::to_string)
                .collect();
            if bases.is_empty() {
                return None;
            }
            let mut sides: Vec<Side> = side_part
                .chars()
                .filter_map(|c| match c {
                    'L' => Some(Side::Left),
                    'R' => Some(Side::Right),
                    'C' => Some(Side::Centre),
                    _ => None,
                })
                .collect();
            if sides.is_empty() {
                sides.push(Side::Centre);
            }
            Some(Segment { bases, sides })
        })
        .collect()
}

fn push_unique<T: PartialEq>(out: &mut Vec<T>, items: impl IntoIterator<Item = T>) {
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
}

/// Role names a player can be evaluated in, from their position string.
///
/// Returns an empty list when nothing is recognised; callers then score
/// every role.
pub fn playable_roles(position: &str) -> Vec<&'static str> {
    let mut roles = Vec::new();
    for category in position_categories(position) {
        push_unique(&mut roles, category.roles().iter().copied());
    }
    roles
}

/// Categories listed in a position string, in order of appearance.
pub fn position_categories(position: &str) -> Vec<PositionCategory> {
    use PositionCategory::*;

    let mut categories = Vec::new();
    for segment in parse_segments(position) {
        for base in &segment.bases {
            match base.as_str() {
                "GK" => push_unique(&mut categories, [GK]),
                "D" => {
                    if segment.has_centre() {
                        push_unique(&mut categories, [CB]);
                    }
                    if segment.has_flank() {
                        push_unique(&mut categories, [FB]);
                    }
                }
                "WB" => push_unique(&mut categories, [FB]),
                "DM" => push_unique(&mut categories, [DM]),
                "M" => {
                    if segment.has_centre() {
                        push_unique(&mut categories, [CM]);
                    }
                    if segment.has_flank() {
                        push_unique(&mut categories, [W]);
                    }
                }
                "AM" => {
                    if segment.has_centre() {
                        push_unique(&mut categories, [AM]);
                    }
                    if segment.has_flank() {
                        push_unique(&mut categories, [W]);
                    }
                }
                "ST" | "S" => push_unique(&mut categories, [ST]),
                _ => {}
            }
        }
    }
    categories
}

/// Category implied by the squad screen slot (`GK`, `DCL`, `WBR`, `AMC`, ...).
pub fn category_from_selected(selected: &str) -> Option<PositionCategory> {
    use PositionCategory::*;

    let s = selected.trim().to_uppercase();
    if s.starts_with("GK") {
        Some(GK)
    } else if s.starts_with("DM") {
        Some(DM)
    } else if s.starts_with("DC") {
        Some(CB)
    } else if s.starts_with("DR") || s.starts_with("DL") || s.starts_with("WB") {
        Some(FB)
    } else if s.starts_with("AMC") {
        Some(AM)
    } else if s.starts_with("AM") || s == "ML" || s == "MR" {
        Some(W)
    } else if s.starts_with("MC") {
        Some(CM)
    } else if s.starts_with("ST") {
        Some(ST)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centre_back_roles() {
        assert_eq!(playable_roles("D (C)"), vec!["CB-STOPPER", "BCB"]);
    }

    #[test]
    fn test_multi_segment_roles() {
        assert_eq!(playable_roles("D/WB (R), DM"), vec!["FB", "WB", "MD"]);
        assert_eq!(
            playable_roles("M/AM (RLC)"),
            vec!["MD", "MC", "WAP", "WAS", "AM(C)"]
        );
    }

    #[test]
    fn test_bare_bases_are_central() {
        assert_eq!(playable_roles("GK"), vec!["GK"]);
        assert_eq!(playable_roles("ST (C)"), vec!["ST-PROVIDER", "ST-GS"]);
        assert_eq!(playable_roles("DM"), vec!["MD"]);
    }

    #[test]
    fn test_unknown_position_maps_nothing() {
        assert!(playable_roles("").is_empty());
        assert!(playable_roles("XYZ (Q)").is_empty());
    }

    #[test]
    fn test_categories() {
        use PositionCategory::*;
        assert_eq!(position_categories("D (RLC)"), vec![CB, FB]);
        assert_eq!(position_categories("AM (RL), ST (C)"), vec![W, ST]);
        assert_eq!(position_categories("M (C)"), vec![CM]);
    }

    #[test]
    fn test_roles_follow_categories() {
        for position in ["D (RLC)", "D/WB (R), DM", "M/AM (RLC)", "WB (L)", "GK", "AM (RL), ST (C)"] {
            let from_categories: Vec<&str> = position_categories(position)
                .into_iter()
                .flat_map(|c| c.roles().iter().copied())
                .fold(Vec::new(), |mut acc, role| {
                    if !acc.contains(&role) {
                        acc.push(role);
                    }
                    acc
                });
            assert_eq!(playable_roles(position), from_categories, "{position}");
        }
        assert_eq!(playable_roles("WB (R)"), vec!["FB", "WB"]);
    }

    #[test]
    fn test_selected_fallback() {
        assert_eq!(category_from_selected("DCR"), Some(PositionCategory::CB));
        assert_eq!(category_from_selected("WBL"), Some(PositionCategory::FB));
        assert_eq!(category_from_selected("AMC"), Some(PositionCategory::AM));
        assert_eq!(category_from_selected("AML"), Some(PositionCategory::W));
        assert_eq!(category_from_selected("SUB"), None);
    }

    #[test]
    fn test_groups() {
        assert_eq!(PositionCategory::GK.group(), PositionGroup::Goalkeeper);
        assert_eq!(PositionCategory::FB.group(), PositionGroup::Defence);
        assert_eq!(PositionCategory::AM.group(), PositionGroup::Midfield);
        assert_eq!(PositionCategory::W.group(), PositionGroup::Attack);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(StatusFlag::from_code("Wnt"), StatusFlag::TransferListed);
        assert_eq!(StatusFlag::from_code(" U21 "), StatusFlag::U21);
        assert_eq!(StatusFlag::from_code(""), StatusFlag::None);
        assert_eq!(StatusFlag::from_code("???"), StatusFlag::None);
    }
}
