//! Turning a linked name into a skin, through an ordered list of fallbacks.

use std::collections::{BTreeMap, BTreeSet};

use derive_more::Display;
use skinwatch_catalog::Skin;
use skinwatch_catalog::normalize::ORIGINAL_PREFIX;

use crate::matching::CandidateIndex;

/// One way of deriving a lookup query from a linked name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Step {
    /// The name as written.
    #[display("direct")]
    Direct,
    /// The name without a leading `"Original "`.
    #[display("strip-original-prefix")]
    StripOriginalPrefix,
    /// The name's entry in the alias table.
    #[display("alias")]
    Alias,
}
impl Step {
    fn query<'a>(self, name: &'a str, aliases: &'a BTreeMap<String, String>) -> Option<&'a str> {
        match self {
            Self::Direct => Some(name),
            Self::StripOriginalPrefix => name.strip_prefix(ORIGINAL_PREFIX),
            Self::Alias => aliases.get(name).map(String::as_str),
        }
    }
}

pub const DEFAULT_POLICY: [Step; 3] = [Step::Direct, Step::StripOriginalPrefix, Step::Alias];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution<'s> {
    Matched { skin: &'s Skin, step: Step },
    /// Known not to be a skin; dropped without a warning.
    Ignored,
    Unmatched,
}

/// Applies the resolution policy: the first step producing a match wins.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'c> {
    policy: &'c [Step],
    aliases: &'c BTreeMap<String, String>,
    ignored: &'c BTreeSet<String>,
}

impl<'c> Resolver<'c> {
    pub fn new(policy: &'c [Step], aliases: &'c BTreeMap<String, String>, ignored: &'c BTreeSet<String>) -> Self {
        Self {
            policy,
            aliases,
            ignored,
        }
    }

    pub fn resolve<'s>(&self, index: &CandidateIndex<'s>, name: &str) -> Resolution<'s> {
        for step in self.policy {
            let Some(query) = step.query(name, self.aliases) else {
                continue;
            };
            if let Some(skin) = index.best_match(query) {
                return Resolution::Matched { skin, step: *step };
            }
        }
        if self.ignored.contains(name) {
            Resolution::Ignored
        } else {
            Resolution::Unmatched
        }
    }
}
