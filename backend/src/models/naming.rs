//! Label naming policies
//!
//! A label encodes lineage (`"3"`, `"3a"`, `"3ab"`, ...) or is a fixed
//! symbol. Hint-carrying policies decorate the recorded label with the
//! agent's status for that step, while children always inherit the clean
//! lineage label.

use serde::{Deserialize, Serialize};

/// The label used by [`NamingPolicy::FixedSymbol`]
pub const FIXED_SYMBOL: &str = "M";

/// How labels are assigned and decorated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingPolicy {
    /// Every agent is labelled `"M"`
    FixedSymbol,
    /// Roots are `"1"`, `"2"`, ...; children append `a`/`b`
    #[default]
    LineageEncoded,
    /// Lineage labels with status hints as prefix (`B_3a`)
    LineageWithPrependedHints,
    /// Lineage labels with status hints as suffix (`3a_B`)
    LineageWithAppendedHints,
}

/// Agent status reported through label hints
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusHint {
    /// Moved freely, nothing to report
    #[default]
    Clean,
    /// No collision-free position was found this step
    Blocked,
    /// Eligible to divide but too many neighbours
    WantsDivide,
    /// Both of the above
    BlockedWantsDivide,
}

impl StatusHint {
    pub fn from_flags(blocked: bool, wants_divide: bool) -> Self {
        match (blocked, wants_divide) {
            (false, false) => StatusHint::Clean,
            (true, false) => StatusHint::Blocked,
            (false, true) => StatusHint::WantsDivide,
            (true, true) => StatusHint::BlockedWantsDivide,
        }
    }

    fn code(&self) -> Option<&'static str> {
        match self {
            StatusHint::Clean => None,
            StatusHint::Blocked => Some("B"),
            StatusHint::WantsDivide => Some("W"),
            StatusHint::BlockedWantsDivide => Some("BW"),
        }
    }
}

impl NamingPolicy {
    /// Label of the `index`-th seeded root (0-based)
    pub fn root_label(&self, index: usize) -> String {
        match self {
            NamingPolicy::FixedSymbol => FIXED_SYMBOL.to_string(),
            _ => (index + 1).to_string(),
        }
    }

    /// Labels of the two daughters of `mother`
    pub fn daughter_labels(&self, mother: &str) -> (String, String) {
        match self {
            NamingPolicy::FixedSymbol => (FIXED_SYMBOL.to_string(), FIXED_SYMBOL.to_string()),
            _ => (format!("{}a", mother), format!("{}b", mother)),
        }
    }

    /// Label as recorded in a trace line for the given status
    pub fn decorate(&self, label: &str, hint: StatusHint) -> String {
        match (self, hint.code()) {
            (NamingPolicy::LineageWithPrependedHints, Some(code)) => format!("{}_{}", code, label),
            (NamingPolicy::LineageWithAppendedHints, Some(code)) => format!("{}_{}", label, code),
            _ => label.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_labels() {
        assert_eq!(NamingPolicy::LineageEncoded.root_label(0), "1");
        assert_eq!(NamingPolicy::LineageEncoded.root_label(9), "10");
        assert_eq!(NamingPolicy::FixedSymbol.root_label(4), "M");
    }

    #[test]
    fn test_daughter_labels() {
        let (a, b) = NamingPolicy::LineageEncoded.daughter_labels("2a");
        assert_eq!(a, "2aa");
        assert_eq!(b, "2ab");

        let (a, b) = NamingPolicy::FixedSymbol.daughter_labels("M");
        assert_eq!((a.as_str(), b.as_str()), ("M", "M"));
    }

    #[test]
    fn test_decorate_hints() {
        let pre = NamingPolicy::LineageWithPrependedHints;
        let app = NamingPolicy::LineageWithAppendedHints;

        assert_eq!(pre.decorate("3a", StatusHint::Blocked), "B_3a");
        assert_eq!(pre.decorate("3a", StatusHint::BlockedWantsDivide), "BW_3a");
        assert_eq!(app.decorate("3a", StatusHint::WantsDivide), "3a_W");
        assert_eq!(app.decorate("3a", StatusHint::Clean), "3a");
        assert_eq!(
            NamingPolicy::LineageEncoded.decorate("3a", StatusHint::Blocked),
            "3a"
        );
    }
}
