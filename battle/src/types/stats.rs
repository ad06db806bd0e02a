//! Stat boost stages

use showdown_protocol::BoostId;

/// Boost stages per stat
///
/// A stat that has never been boosted, or whose stage came back to zero, is
/// stored as `None`. Stages are not clamped; the server already does that.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BoostTable {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub atk: Option<i32>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub def: Option<i32>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub spa: Option<i32>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub spd: Option<i32>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub spe: Option<i32>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub accuracy: Option<i32>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub evasion: Option<i32>,
    /// Generation 1 Special
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub spc: Option<i32>,
}

impl BoostTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&mut self, stat: BoostId) -> &mut Option<i32> {
        match stat {
            BoostId::Atk => &mut self.atk,
            BoostId::Def => &mut self.def,
            BoostId::Spa => &mut self.spa,
            BoostId::Spd => &mut self.spd,
            BoostId::Spe => &mut self.spe,
            BoostId::Accuracy => &mut self.accuracy,
            BoostId::Evasion => &mut self.evasion,
            BoostId::Spc => &mut self.spc,
        }
    }

    fn entries_mut(&mut self) -> [&mut Option<i32>; 8] {
        [
            &mut self.atk,
            &mut self.def,
            &mut self.spa,
            &mut self.spd,
            &mut self.spe,
            &mut self.accuracy,
            &mut self.evasion,
            &mut self.spc,
        ]
    }

    /// Stage for a stat, 0 when absent
    pub fn get(&self, stat: BoostId) -> i32 {
        let value = match stat {
            BoostId::Atk => self.atk,
            BoostId::Def => self.def,
            BoostId::Spa => self.spa,
            BoostId::Spd => self.spd,
            BoostId::Spe => self.spe,
            BoostId::Accuracy => self.accuracy,
            BoostId::Evasion => self.evasion,
            BoostId::Spc => self.spc,
        };
        value.unwrap_or(0)
    }

    /// Set the stage for a stat; zero removes it
    pub fn set(&mut self, stat: BoostId, value: i32) {
        *self.entry(stat) = (value != 0).then_some(value);
    }

    pub fn boost(&mut self, stat: BoostId, amount: i32) {
        let current = self.get(stat);
        self.set(stat, current.saturating_add(amount));
    }

    pub fn unboost(&mut self, stat: BoostId, amount: i32) {
        self.boost(stat, amount.saturating_neg());
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Drop every positive stage
    pub fn clear_positive(&mut self) {
        for entry in self.entries_mut() {
            if entry.is_some_and(|v| v > 0) {
                *entry = None;
            }
        }
    }

    /// Drop every negative stage
    pub fn clear_negative(&mut self) {
        for entry in self.entries_mut() {
            if entry.is_some_and(|v| v < 0) {
                *entry = None;
            }
        }
    }

    /// Negate every stage (Topsy-Turvy)
    pub fn invert(&mut self) {
        for entry in self.entries_mut() {
            *entry = entry.map(i32::saturating_neg);
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Stats with a non-zero stage, in table order
    pub fn iter(&self) -> impl Iterator<Item = (BoostId, i32)> + '_ {
        BoostId::ALL
            .into_iter()
            .chain([BoostId::Spc])
            .filter_map(|stat| {
                let value = self.get(stat);
                (value != 0).then_some((stat, value))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boost_table_new() {
        let boosts = BoostTable::new();
        assert!(boosts.is_empty());
        assert_eq!(boosts.get(BoostId::Atk), 0);
        assert_eq!(boosts.atk, None);
    }

    #[test]
    fn test_boost_table_boost_is_unclamped() {
        let mut boosts = BoostTable::new();
        boosts.boost(BoostId::Atk, 6);
        boosts.boost(BoostId::Atk, 2);
        assert_eq!(boosts.get(BoostId::Atk), 8);

        boosts.unboost(BoostId::Def, 1);
        assert_eq!(boosts.def, Some(-1));
    }

    #[test]
    fn test_boost_table_saturates_at_extremes() {
        let mut boosts = BoostTable::new();
        boosts.boost(BoostId::Def, i32::MAX);
        boosts.boost(BoostId::Def, 1);
        assert_eq!(boosts.def, Some(i32::MAX));

        boosts.unboost(BoostId::Atk, i32::MIN);
        assert_eq!(boosts.atk, Some(i32::MAX));

        boosts.set(BoostId::Spe, i32::MIN);
        boosts.invert();
        assert_eq!(boosts.spe, Some(i32::MAX));
    }

    #[test]
    fn test_boost_table_zero_is_absent() {
        let mut boosts = BoostTable::new();
        boosts.boost(BoostId::Spe, 1);
        boosts.unboost(BoostId::Spe, 1);
        assert_eq!(boosts.spe, None);

        boosts.set(BoostId::Evasion, 0);
        assert!(boosts.is_empty());
    }

    #[test]
    fn test_boost_table_clear_positive_negative() {
        let mut boosts = BoostTable::new();
        boosts.set(BoostId::Atk, 2);
        boosts.set(BoostId::Def, -1);
        boosts.set(BoostId::Spa, 1);
        boosts.set(BoostId::Spd, -2);

        let mut positive = boosts.clone();
        positive.clear_positive();
        assert_eq!(positive.atk, None);
        assert_eq!(positive.spa, None);
        assert_eq!(positive.def, Some(-1));

        boosts.clear_negative();
        assert_eq!(boosts.def, None);
        assert_eq!(boosts.spd, None);
        assert_eq!(boosts.atk, Some(2));
    }

    #[test]
    fn test_boost_table_invert() {
        let mut boosts = BoostTable::new();
        boosts.set(BoostId::Atk, 2);
        boosts.set(BoostId::Spc, -1);
        boosts.invert();
        assert_eq!(boosts.atk, Some(-2));
        assert_eq!(boosts.spc, Some(1));
        assert_eq!(boosts.def, None);
    }

    #[test]
    fn test_boost_table_iter() {
        let mut boosts = BoostTable::new();
        boosts.set(BoostId::Spe, 1);
        boosts.set(BoostId::Atk, -1);
        let entries: Vec<_> = boosts.iter().collect();
        assert_eq!(entries, vec![(BoostId::Atk, -1), (BoostId::Spe, 1)]);
    }
}
