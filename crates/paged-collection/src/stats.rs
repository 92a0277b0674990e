//! Derived Stats
//!
//! Aggregates computed over the loaded window only, never the full remote
//! collection.

use std::collections::BTreeMap;

/// One aggregate over the loaded items
pub enum Aggregate<T> {
    /// Number of items
    Count,
    /// Number of items matching a predicate
    CountWhere(Box<dyn Fn(&T) -> bool>),
    /// Sum of a numeric field
    Sum(Box<dyn Fn(&T) -> f64>),
    /// Sum divided by count; 0 over an empty list
    Average(Box<dyn Fn(&T) -> f64>),
}

impl<T> Aggregate<T> {
    fn compute(&self, items: &[&T]) -> f64 {
        match self {
            Aggregate::Count => items.len() as f64,
            Aggregate::CountWhere(pred) => items.iter().filter(|i| pred(**i)).count() as f64,
            Aggregate::Sum(select) => items.iter().map(|i| select(*i)).sum(),
            Aggregate::Average(select) => {
                if items.is_empty() {
                    0.0
                } else {
                    items.iter().map(|i| select(*i)).sum::<f64>() / items.len() as f64
                }
            }
        }
    }
}

/// Named aggregates, evaluated together
pub struct Selectors<T> {
    entries: Vec<(String, Aggregate<T>)>,
}

impl<T> Default for Selectors<T> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<T> Selectors<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, aggregate: Aggregate<T>) -> Self {
        self.entries.push((name.into(), aggregate));
        self
    }

    pub fn count(self, name: impl Into<String>) -> Self {
        self.with(name, Aggregate::Count)
    }

    pub fn count_where(self, name: impl Into<String>, pred: impl Fn(&T) -> bool + 'static) -> Self {
        self.with(name, Aggregate::CountWhere(Box::new(pred)))
    }

    pub fn sum(self, name: impl Into<String>, select: impl Fn(&T) -> f64 + 'static) -> Self {
        self.with(name, Aggregate::Sum(Box::new(select)))
    }

    pub fn average(self, name: impl Into<String>, select: impl Fn(&T) -> f64 + 'static) -> Self {
        self.with(name, Aggregate::Average(Box::new(select)))
    }

    /// Pure: same items in, same numbers out
    pub fn compute(&self, items: &[T]) -> DerivedStats {
        self.compute_refs(&items.iter().collect::<Vec<_>>())
    }

    /// Same as [`Selectors::compute`] over an already narrowed view
    pub fn compute_refs(&self, items: &[&T]) -> DerivedStats {
        let values = self
            .entries
            .iter()
            .map(|(name, aggregate)| (name.clone(), aggregate.compute(items)))
            .collect();
        DerivedStats { values }
    }
}

/// Computed aggregate values by selector name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedStats {
    values: BTreeMap<String, f64>,
}

impl DerivedStats {
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Value or 0 when the selector was not requested
    pub fn value(&self, name: &str) -> f64 {
        self.get(name).unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Booking {
        price: f64,
        guests: u32,
        paid: bool,
    }

    fn bookings() -> Vec<Booking> {
        vec![
            Booking { price: 50.0, guests: 2, paid: true },
            Booking { price: 30.0, guests: 1, paid: false },
            Booking { price: 10.0, guests: 4, paid: true },
        ]
    }

    fn selectors() -> Selectors<Booking> {
        Selectors::<Booking>::new()
            .count("count")
            .count_where("paid", |b| b.paid)
            .sum("revenue", |b| b.price * b.guests as f64)
            .average("avg_price", |b| b.price)
    }

    #[test]
    fn test_aggregates() {
        let stats = selectors().compute(&bookings());
        assert_eq!(stats.get("count"), Some(3.0));
        assert_eq!(stats.get("paid"), Some(2.0));
        assert_eq!(stats.get("revenue"), Some(170.0));
        assert_eq!(stats.get("avg_price"), Some(30.0));
        assert_eq!(stats.get("missing"), None);
    }

    #[test]
    fn test_empty_items() {
        let stats = selectors().compute(&[]);
        assert_eq!(stats.value("count"), 0.0);
        assert_eq!(stats.value("avg_price"), 0.0);
        assert_eq!(stats.value("revenue"), 0.0);
    }

    #[test]
    fn test_narrowed_view_counts_only_given_rows() {
        let all = bookings();
        let paid: Vec<&Booking> = all.iter().filter(|b| b.paid).collect();
        let stats = selectors().compute_refs(&paid);
        assert_eq!(stats.get("count"), Some(2.0));
        assert_eq!(stats.get("paid"), Some(2.0));
        assert_eq!(stats.get("avg_price"), Some(30.0));
    }
}
