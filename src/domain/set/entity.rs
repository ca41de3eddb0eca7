use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::domain::entity::Entity;

/// A card game set (expansion) as published
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSet {
    pub name: String,

    /// Publisher-assigned short code, e.g. "LEA"
    pub code: String,

    /// Missing when the source reports no parseable date
    pub release_date: Option<NaiveDate>,
}

impl CardSet {
    pub fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        release_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            release_date,
        }
    }
}

impl Entity for CardSet {
    type Key = String;

    const KIND: &'static str = "set";

    fn key(&self) -> String {
        self.code.clone()
    }

    /// Release date first (undated sets sort first), code breaks ties
    fn natural_cmp(&self, other: &Self) -> Ordering {
        self.release_date
            .cmp(&other.release_date)
            .then_with(|| self.code.cmp(&other.code))
    }
}

impl std::fmt::Display for CardSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_orders_by_release_date() {
        let alpha = CardSet::new("Limited Edition Alpha", "LEA", date(1993, 8, 5));
        let beta = CardSet::new("Limited Edition Beta", "LEB", date(1993, 10, 1));
        assert_eq!(alpha.natural_cmp(&beta), Ordering::Less);
        assert_eq!(beta.natural_cmp(&alpha), Ordering::Greater);
    }

    #[test]
    fn test_undated_sorts_first_and_code_breaks_ties() {
        let undated = CardSet::new("Promo", "PRM", None);
        let alpha = CardSet::new("Limited Edition Alpha", "LEA", date(1993, 8, 5));
        assert_eq!(undated.natural_cmp(&alpha), Ordering::Less);

        let same_day = CardSet::new("Alpha Tokens", "TLEA", date(1993, 8, 5));
        assert_eq!(alpha.natural_cmp(&same_day), Ordering::Less);
    }

    #[test]
    fn test_key_is_code() {
        let set = CardSet::new("Limited Edition Alpha", "LEA", None);
        assert_eq!(set.key(), "LEA");
    }
}
