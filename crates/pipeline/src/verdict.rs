//! Mapping a predicted label to a bestseller verdict.
//!
//! Trained models don't agree on how the positive class is labelled: some
//! predict `1`, others a string such as `"Bestseller"`. Both are accepted.

use model::ClassLabel;
use std::fmt;
use std::str::FromStr;

/// Outcome shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Bestseller,
    NotBestseller,
}

impl Verdict {
    pub fn is_bestseller(self) -> bool {
        matches!(self, Verdict::Bestseller)
    }

    /// Short form, e.g. for logs
    pub fn headline(self) -> &'static str {
        match self {
            Verdict::Bestseller => "BESTSELLER",
            Verdict::NotBestseller => "NOT a bestseller",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Verdict::Bestseller => "This book is predicted to be a BESTSELLER!",
            Verdict::NotBestseller => "This book is predicted NOT to be a bestseller.",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.headline())
    }
}

/// How text labels are matched against "bestseller".
///
/// Integer (or float) `1` is a bestseller under every policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VerdictPolicy {
    /// Any label containing "bestseller", case-insensitively. Note that
    /// this also matches "Not Bestseller".
    Substring,
    /// Like `Substring`, but a label with `not`, `non` or `no` anywhere
    /// before "bestseller" is negative, e.g. "Not a Bestseller".
    #[default]
    NegationAware,
}

const NEGATIONS: [&str; 3] = ["not", "non", "no"];

impl VerdictPolicy {
    pub fn classify(self, label: &ClassLabel) -> Verdict {
        let positive = label.is_one()
            || label
                .as_text()
                .is_some_and(|text| self.text_is_bestseller(text));

        if positive {
            Verdict::Bestseller
        } else {
            Verdict::NotBestseller
        }
    }

    fn text_is_bestseller(self, text: &str) -> bool {
        let lower = text.to_lowercase();
        let Some(pos) = lower.find("bestseller") else {
            return false;
        };

        match self {
            VerdictPolicy::Substring => true,
            VerdictPolicy::NegationAware => {
                !lower[..pos]
                    .split(|c: char| !c.is_alphanumeric())
                    .any(|w| NEGATIONS.contains(&w))
            }
        }
    }
}

impl FromStr for VerdictPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "substring" => Ok(VerdictPolicy::Substring),
            "negation-aware" => Ok(VerdictPolicy::NegationAware),
            other => Err(format!(
                "unknown verdict policy {:?} (expected \"substring\" or \"negation-aware\")",
                other
            )),
        }
    }
}
