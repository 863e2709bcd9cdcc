//! Known statement layouts and the format selector accepted by the pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A statement layout the pipeline has an explicit grammar for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LayoutKind {
    /// Older layout: description on the first line, `DD.MM.YYYY / code` settlement line last.
    #[serde(rename = "2005_Moscow")]
    Moscow2005,
    /// Newer layout: five-part first line, totals table in the statement header.
    #[serde(rename = "2107_Stavropol")]
    Stavropol2107,
}

impl LayoutKind {
    /// Every known layout, in detection order.
    pub const ALL: [LayoutKind; 2] = [LayoutKind::Moscow2005, LayoutKind::Stavropol2107];

    /// Stable identifier used on the command line and in logs.
    pub fn id(&self) -> &'static str {
        match self {
            LayoutKind::Moscow2005 => "2005_Moscow",
            LayoutKind::Stavropol2107 => "2107_Stavropol",
        }
    }

    pub fn from_id(id: &str) -> Option<LayoutKind> {
        LayoutKind::ALL.iter().copied().find(|l| l.id() == id)
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for LayoutKind {
    type Err = UnknownSelector;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LayoutKind::from_id(s).ok_or_else(|| UnknownSelector(s.to_string()))
    }
}

/// Either let the detector pick the layout, or force one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatSelector {
    #[default]
    Auto,
    Layout(LayoutKind),
}

impl FormatSelector {
    pub const AUTO: &'static str = "auto";

    /// All values accepted by `FromStr`.
    pub fn accepted() -> Vec<&'static str> {
        let mut out = vec![Self::AUTO];
        out.extend(LayoutKind::ALL.iter().map(|l| l.id()));
        out
    }
}

impl fmt::Display for FormatSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatSelector::Auto => f.write_str(Self::AUTO),
            FormatSelector::Layout(kind) => kind.fmt(f),
        }
    }
}

impl FromStr for FormatSelector {
    type Err = UnknownSelector;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == Self::AUTO {
            return Ok(FormatSelector::Auto);
        }
        s.parse().map(FormatSelector::Layout)
    }
}

impl From<LayoutKind> for FormatSelector {
    fn from(kind: LayoutKind) -> Self {
        FormatSelector::Layout(kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown statement format {0:?} (expected one of: {})", FormatSelector::accepted().join(", "))]
pub struct UnknownSelector(pub String);
