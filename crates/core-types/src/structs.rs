use serde::{Deserialize, Serialize};
use std::fmt;

/// A tradable instrument the user can analyse.
///
/// Subjects are immutable once built; the catalog hands out clones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subject {
    /// Unique key, e.g. "VAS.AX". Sent to the service as the ticker.
    pub symbol: String,
    pub label: String,
    pub description: String,
}

impl Subject {
    pub fn new(
        symbol: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            label: label.into(),
            description: description.into(),
        }
    }

    /// A subject for a symbol that has no catalog entry. Its label is the symbol itself.
    pub fn ad_hoc(symbol: impl Into<String>) -> Self {
        let symbol = symbol.into();
        Self {
            label: symbol.clone(),
            symbol,
            description: String::new(),
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// The user's investment targets, in whole currency units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetParameters {
    pub monthly_target: u64,
    pub total_target: u64,
}

impl TargetParameters {
    pub fn new(monthly_target: u64, total_target: u64) -> Self {
        Self {
            monthly_target,
            total_target,
        }
    }

    /// Builds targets from raw text fields, coercing each with [`normalize_target_input`].
    pub fn from_input(monthly: &str, total: &str) -> Self {
        Self::new(normalize_target_input(monthly), normalize_target_input(total))
    }
}

/// Coerces free-form user input into a non-negative integer.
///
/// Every character that is not an ASCII digit is dropped and the remaining digits are
/// read as a base-10 number, so `"2500abc"` becomes `2500`, `"-40"` becomes `40` and
/// empty or digit-free input becomes `0`. Values beyond `u64::MAX` saturate.
pub fn normalize_target_input(raw: &str) -> u64 {
    raw.chars()
        .filter_map(|c| c.to_digit(10))
        .fold(0u64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(u64::from(digit))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_keeps_digits_only() {
        assert_eq!(normalize_target_input("2500abc"), 2500);
        assert_eq!(normalize_target_input("$1,200"), 1200);
        assert_eq!(normalize_target_input("-40"), 40);
        assert_eq!(normalize_target_input("12.5"), 125);
    }

    #[test]
    fn normalize_defaults_to_zero() {
        assert_eq!(normalize_target_input(""), 0);
        assert_eq!(normalize_target_input("abc"), 0);
        assert_eq!(normalize_target_input("   "), 0);
    }

    #[test]
    fn normalize_saturates_instead_of_overflowing() {
        assert_eq!(normalize_target_input("99999999999999999999999"), u64::MAX);
    }

    #[test]
    fn targets_from_text_fields() {
        let targets = TargetParameters::from_input("2000", "ten thousand");
        assert_eq!(targets, TargetParameters::new(2000, 0));
    }

    #[test]
    fn ad_hoc_subject_labels_itself() {
        let subject = Subject::ad_hoc("TSLA");
        assert_eq!(subject.label, "TSLA");
        assert_eq!(subject.to_string(), "TSLA");
        assert!(subject.description.is_empty());
    }
}
