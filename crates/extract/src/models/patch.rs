use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use exn::ResultExt;
use serde::{Deserialize, Serialize};

use crate::consts;
use crate::error::{Error, ErrorKind};

/// A two-component release identifier such as `12.10`.
///
/// Ordering is field-wise (major, then minor), never textual: `12.10` is
/// newer than `12.9`, and `1.10` is newer than `1.2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Patch {
    pub major: u32,
    pub minor: u32,
}
impl Patch {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}
impl FromStr for Patch {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some(captures) = consts::PATCH_REGEX.captures(s) else {
            exn::bail!(ErrorKind::ParseError {
                field: "patch",
                value: s.to_string(),
            });
        };
        let component = |index: usize| {
            captures[index].parse::<u32>().or_raise(|| ErrorKind::ParseError {
                field: "patch",
                value: s.to_string(),
            })
        };
        Ok(Self::new(component(1)?, component(2)?))
    }
}
impl TryFrom<String> for Patch {
    type Error = Error;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
impl From<Patch> for String {
    fn from(patch: Patch) -> Self {
        patch.to_string()
    }
}
impl Display for Patch {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}.{}", self.major, self.minor)
    }
}
