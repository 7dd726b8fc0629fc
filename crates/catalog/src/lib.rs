//! # Quantdash Instrument Catalog
//!
//! The static list of instruments a user can pick from. It is loaded once at start-up,
//! optionally reordered by configured priority, and never mutated afterwards.
//!
//! Lookups and filters have no failure modes: a miss is an empty result, not an error.

use core_types::Subject;

pub mod instruments;

pub use instruments::BUILTIN_INSTRUMENTS;

/// An ordered, read-only list of subjects.
#[derive(Debug, Clone)]
pub struct Catalog {
    subjects: Vec<Subject>,
}

impl Catalog {
    /// Builds a catalog from an explicit list, preserving its order.
    pub fn new(subjects: Vec<Subject>) -> Self {
        Self { subjects }
    }

    /// The built-in instrument list in its default order.
    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_INSTRUMENTS
                .iter()
                .map(|(symbol, label, description)| Subject::new(*symbol, *label, *description))
                .collect(),
        )
    }

    /// Moves the listed symbols to the front, in the order given.
    ///
    /// Symbols that are not in the catalog, or repeated, are skipped. Everything else
    /// keeps its relative order behind the prioritised entries.
    pub fn with_priority<I, S>(mut self, priority: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut front = Vec::new();
        for symbol in priority {
            if let Some(pos) = self
                .subjects
                .iter()
                .position(|s| s.symbol == symbol.as_ref())
            {
                front.push(self.subjects.remove(pos));
            } else {
                tracing::debug!(symbol = symbol.as_ref(), "Priority symbol skipped (unknown or repeated).");
            }
        }
        front.append(&mut self.subjects);
        self.subjects = front;
        self
    }

    pub fn list(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    /// Exact lookup by symbol.
    pub fn find(&self, symbol: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.symbol == symbol)
    }

    /// Resolves a symbol typed by a user: exact match first, then a case-insensitive one.
    /// Unknown symbols become an ad-hoc subject so they can still be analysed.
    pub fn resolve(&self, symbol: &str) -> Subject {
        let symbol = symbol.trim();
        self.find(symbol)
            .or_else(|| {
                self.subjects
                    .iter()
                    .find(|s| s.symbol.eq_ignore_ascii_case(symbol))
            })
            .cloned()
            .unwrap_or_else(|| Subject::ad_hoc(symbol.to_ascii_uppercase()))
    }

    /// Case-insensitive substring match against label and symbol, in catalog order.
    /// An empty query matches everything.
    pub fn filter(&self, query: &str) -> Vec<&Subject> {
        let needle = query.trim().to_lowercase();
        self.subjects
            .iter()
            .filter(|s| {
                s.label.to_lowercase().contains(&needle)
                    || s.symbol.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(subjects: &[&Subject]) -> Vec<String> {
        subjects.iter().map(|s| s.symbol.clone()).collect()
    }

    #[test]
    fn builtin_order_starts_with_vas() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 25);
        assert_eq!(catalog.list()[0].symbol, "VAS.AX");
        assert_eq!(catalog.list()[24].symbol, "NVX.AX");
    }

    #[test]
    fn find_is_exact() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.find("IVV.AX").map(|s| s.label.as_str()),
            Some("IVV - iShares S&P 500")
        );
        assert!(catalog.find("ivv.ax").is_none());
        assert!(catalog.find("NOPE").is_none());
    }

    #[test]
    fn filter_matches_label_or_symbol_case_insensitively() {
        let catalog = Catalog::builtin();
        assert_eq!(
            symbols(&catalog.filter("nasdaq")),
            vec!["NDQ.AX", "SNAS.AX", "LNAS.AX"]
        );
        assert_eq!(symbols(&catalog.filter("coin")), vec!["COIN"]);
        assert_eq!(catalog.filter("").len(), catalog.len());
        assert!(catalog.filter("zzz-nothing").is_empty());
    }

    #[test]
    fn priority_hoists_symbols_and_ignores_unknowns() {
        let catalog = Catalog::builtin().with_priority(["COIN", "MISSING", "ARKK", "COIN"]);
        let order: Vec<&str> = catalog.list().iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(&order[..3], &["COIN", "ARKK", "VAS.AX"]);
        assert_eq!(catalog.len(), 25);
    }

    #[test]
    fn resolve_falls_back_to_ad_hoc() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.resolve("vas.ax").label, "VAS - Vanguard Australian Shares");
        let unknown = catalog.resolve(" tsla ");
        assert_eq!(unknown.symbol, "TSLA");
        assert_eq!(unknown.label, "TSLA");
    }
}
