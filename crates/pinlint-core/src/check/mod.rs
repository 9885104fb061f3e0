//! Pin validation checks.
//!
//! Each check is a pure function of the parsed pins and the resolved
//! inputs. Checks return findings; turning findings into a failed run is
//! left to the caller so one run can report every problem at once.

pub mod bom;
pub mod unused;

pub use bom::{BomConflict, BomConflicts, find_bom_conflicts};
pub use unused::{find_unused, unused_pins_message};

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The independently runnable checks.
///
/// Serialized under the same names its `FromStr` impl accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum CheckKind {
    /// Every pin must match at least one resolved artifact.
    #[serde(rename = "unused")]
    NoUnusedPin,
    /// No pin may disagree with a BOM recommendation.
    #[serde(rename = "bom-conflict")]
    NoBomConflict,
}

impl CheckKind {
    pub const ALL: [Self; 2] = [Self::NoUnusedPin, Self::NoBomConflict];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoUnusedPin => "unused",
            Self::NoBomConflict => "bom-conflict",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unused" | "checkNoUnusedPin" => Ok(Self::NoUnusedPin),
            "bom-conflict" | "checkBomConflict" => Ok(Self::NoBomConflict),
            other => Err(format!(
                "unknown check '{other}', expected 'unused' or 'bom-conflict'"
            )),
        }
    }
}
