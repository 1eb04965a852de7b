use std::fmt;

use rust_decimal::Decimal;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when a category name appears twice in one breakdown.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("duplicate expense category '{0}'")]
pub struct DuplicateCategory(pub String);

/// One validated monthly expense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseItem {
    pub category: String,
    pub amount: Decimal,
}

/// Monthly expenses keyed by category.
///
/// Categories are unique and iterate in the order they were inserted, so
/// every rendering of the same breakdown lists them identically. On the
/// wire this is a flat JSON object `{ "rent": 1000, "food": 500 }`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseBreakdown {
    items: Vec<ExpenseItem>,
}

impl ExpenseBreakdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a category.
    ///
    /// # Errors
    /// [`DuplicateCategory`] if `category` is already present.
    pub fn insert(
        &mut self,
        category: impl Into<String>,
        amount: Decimal,
    ) -> Result<(), DuplicateCategory> {
        let category = category.into();
        if self.contains(&category) {
            return Err(DuplicateCategory(category));
        }
        self.items.push(ExpenseItem { category, amount });
        Ok(())
    }

    pub fn get(
        &self,
        category: &str,
    ) -> Option<Decimal> {
        self.items
            .iter()
            .find(|item| item.category == category)
            .map(|item| item.amount)
    }

    pub fn contains(
        &self,
        category: &str,
    ) -> bool {
        self.items.iter().any(|item| item.category == category)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExpenseItem> {
        self.items.iter()
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.category.as_str())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of every category, or `None` if it does not fit in a [`Decimal`].
    pub fn total(&self) -> Option<Decimal> {
        self.items
            .iter()
            .try_fold(Decimal::ZERO, |sum, item| sum.checked_add(item.amount))
    }
}

impl<'a> IntoIterator for &'a ExpenseBreakdown {
    type Item = &'a ExpenseItem;
    type IntoIter = std::slice::Iter<'a, ExpenseItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl Serialize for ExpenseBreakdown {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.items.len()))?;
        for item in &self.items {
            map.serialize_entry(&item.category, &item.amount)?;
        }
        map.end()
    }
}

struct BreakdownVisitor;

impl<'de> Visitor<'de> for BreakdownVisitor {
    type Value = ExpenseBreakdown;

    fn expecting(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str("a map of expense category to amount")
    }

    fn visit_map<A: MapAccess<'de>>(
        self,
        mut access: A,
    ) -> Result<Self::Value, A::Error> {
        let mut breakdown = ExpenseBreakdown::new();
        while let Some((category, amount)) = access.next_entry::<String, Decimal>()? {
            breakdown.insert(category, amount).map_err(de::Error::custom)?;
        }
        Ok(breakdown)
    }
}

impl<'de> Deserialize<'de> for ExpenseBreakdown {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(BreakdownVisitor)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn sample() -> ExpenseBreakdown {
        let mut breakdown = ExpenseBreakdown::new();
        breakdown.insert("rent", dec!(1000)).unwrap();
        breakdown.insert("food", dec!(500)).unwrap();
        breakdown.insert("entertainment", dec!(300)).unwrap();
        breakdown
    }

    #[test]
    fn keeps_insertion_order() {
        let categories: Vec<_> = sample().categories().map(str::to_string).collect();

        assert_eq!(categories, vec!["rent", "food", "entertainment"]);
    }

    #[test]
    fn rejects_duplicate_category() {
        let mut breakdown = sample();

        let err = breakdown.insert("food", dec!(1)).unwrap_err();

        assert_eq!(err, DuplicateCategory("food".to_string()));
        assert_eq!(breakdown.get("food"), Some(dec!(500)));
    }

    #[test]
    fn total_sums_all_categories() {
        assert_eq!(sample().total(), Some(dec!(1800)));
        assert_eq!(ExpenseBreakdown::new().total(), Some(Decimal::ZERO));
    }

    #[test]
    fn total_is_none_past_decimal_max() {
        let mut breakdown = ExpenseBreakdown::new();
        breakdown.insert("rent", dec!(70000000000000000000000000000)).unwrap();
        breakdown.insert("food", dec!(70000000000000000000000000000)).unwrap();

        assert_eq!(breakdown.total(), None);
    }

    #[test]
    fn serializes_as_flat_object_in_order() {
        let json = serde_json::to_string(&sample()).unwrap();

        assert_eq!(json, r#"{"rent":1000.0,"food":500.0,"entertainment":300.0}"#);
    }

    #[test]
    fn deserializes_in_document_order() {
        let breakdown: ExpenseBreakdown =
            serde_json::from_str(r#"{"food": 500, "rent": 1000}"#).unwrap();

        let categories: Vec<_> = breakdown.categories().collect();
        assert_eq!(categories, vec!["food", "rent"]);
        assert_eq!(breakdown.get("rent"), Some(dec!(1000)));
    }

    #[test]
    fn deserialize_rejects_duplicate_keys() {
        let result: Result<ExpenseBreakdown, _> =
            serde_json::from_str(r#"{"rent": 1, "rent": 2}"#);

        let err = result.unwrap_err().to_string();
        assert!(err.contains("duplicate expense category 'rent'"), "{err}");
    }
}
