use std::fmt::Display;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};

/// The sixteen event codes in binary order. Row order of every tally.
pub const EVENTS: [&str; 16] = [
    "0000", "0001", "0010", "0011", "0100", "0101", "0110", "0111", "1000",
    "1001", "1010", "1011", "1100", "1101", "1110", "1111",
];

/// Semantic grouping of event codes.
#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, PartialOrd, Ord)]
pub enum Category {
    /// Specific events.
    SpecificEvents,
    /// Differential methylation events.
    DifferentialMethylation,
    /// Differential non-methylation events.
    DifferentialNonMethylation,
    /// Conversion errors.
    ConversionErrors,
    /// Static non-methylated sites.
    StaticNonMethylated,
    /// Static methylated sites.
    StaticMethylated,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::SpecificEvents,
        Category::DifferentialMethylation,
        Category::DifferentialNonMethylation,
        Category::ConversionErrors,
        Category::StaticNonMethylated,
        Category::StaticMethylated,
    ];

    /// Position in [`Category::ALL`].
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Row label suffix, e.g. `DME`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::SpecificEvents => "SE",
            Category::DifferentialMethylation => "DME",
            Category::DifferentialNonMethylation => "DNME",
            Category::ConversionErrors => "CE",
            Category::StaticNonMethylated => "SNMSs",
            Category::StaticMethylated => "SMSs",
        }
    }

    /// Codes belonging to this category, in binary order.
    pub fn members(&self) -> impl Iterator<Item = EventCode> + '_ {
        EventCode::iter().filter(move |code| code.categories().contains(self))
    }
}

impl Display for Category {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

use Category::*;

/// Category membership of every code, indexed by code value.
///
/// `1101` is listed under both static-site categories, so it is counted
/// twice in the total of totals.
static TAXONOMY: [&[Category]; 16] = [
    /* 0000 */ &[],
    /* 0001 */ &[SpecificEvents],
    /* 0010 */ &[SpecificEvents],
    /* 0011 */ &[StaticMethylated],
    /* 0100 */ &[ConversionErrors],
    /* 0101 */ &[SpecificEvents],
    /* 0110 */ &[SpecificEvents, DifferentialMethylation],
    /* 0111 */ &[DifferentialMethylation],
    /* 1000 */ &[ConversionErrors],
    /* 1001 */ &[SpecificEvents, DifferentialNonMethylation],
    /* 1010 */ &[SpecificEvents],
    /* 1011 */ &[DifferentialNonMethylation],
    /* 1100 */ &[StaticNonMethylated],
    /* 1101 */ &[SpecificEvents, StaticNonMethylated, StaticMethylated],
    /* 1110 */ &[SpecificEvents],
    /* 1111 */ &[StaticNonMethylated],
];

/// One of the sixteen 4-symbol codes, stored as its binary value.
///
/// Symbol order is `Da`, `A`, `Dk`, `K`, most significant first.
#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, PartialOrd, Ord)]
pub struct EventCode(u8);

impl EventCode {
    pub const COUNT: usize = 16;

    pub fn from_index(index: usize) -> Option<Self> {
        (index < Self::COUNT).then_some(EventCode(index as u8))
    }

    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    pub const fn as_str(&self) -> &'static str {
        EVENTS[self.0 as usize]
    }

    pub fn categories(&self) -> &'static [Category] {
        TAXONOMY[self.index()]
    }

    /// All codes in binary order.
    pub fn iter() -> impl Iterator<Item = EventCode> {
        (0..Self::COUNT as u8).map(EventCode)
    }

    /// Looks up a generated string. Anything outside the sixteen codes,
    /// including strings of the wrong length, yields `None`.
    pub fn parse(code: &str) -> Option<Self> {
        let bytes = code.as_bytes();
        if bytes.len() != 4 {
            return None;
        }
        bytes
            .iter()
            .try_fold(0u8, |acc, byte| {
                match *byte {
                    b'0' => Some(acc << 1),
                    b'1' => Some((acc << 1) | 1),
                    _ => None,
                }
            })
            .map(EventCode)
    }
}

impl Display for EventCode {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EventCode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventCode::parse(s).ok_or_else(|| anyhow::anyhow!("{:?} is not an event code", s))
    }
}

impl Serialize for EventCode {
    fn serialize<S>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer, {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>, {
        let s = String::deserialize(deserializer)?;
        EventCode::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Concatenates the four symbols of one row and replicate into a code
/// string. The result is kept verbatim even when it is not a valid code.
pub fn concat_symbols(
    da: &str,
    a: &str,
    dk: &str,
    k: &str,
) -> String {
    let mut code = String::with_capacity(da.len() + a.len() + dk.len() + k.len());
    code.push_str(da);
    code.push_str(a);
    code.push_str(dk);
    code.push_str(k);
    code
}
