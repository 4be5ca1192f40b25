use std::fmt::Display;
use std::hash::Hash;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};

use crate::error::MethEventError;

/// Sequence context of a cytosine call.
#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, PartialOrd, Ord)]
pub enum Context {
    /// CG context.
    CG,
    /// CXG context.
    CXG,
    /// CXX context.
    CXX,
}

impl Context {
    pub const ALL: [Context; 3] = [Context::CG, Context::CXG, Context::CXX];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Context::CG => "CG",
            Context::CXG => "CXG",
            Context::CXX => "CXX",
        }
    }

    /// Case-sensitive match of a raw input value. Tallies only recognise the
    /// exact labels; [`FromStr`] stays lenient for user-facing parsing.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "CG" => Some(Context::CG),
            "CXG" => Some(Context::CXG),
            "CXX" => Some(Context::CXX),
            _ => None,
        }
    }
}

impl Display for Context {
    #[cfg_attr(coverage_nightly, coverage(off))]
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Context {
    type Err = MethEventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CG" => Ok(Context::CG),
            "CXG" => Ok(Context::CXG),
            "CXX" => Ok(Context::CXX),
            _ => Err(MethEventError::UnknownContext(s.to_string())),
        }
    }
}

impl Serialize for Context {
    fn serialize<S>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer, {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Context {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>, {
        let s = String::deserialize(deserializer)?;
        Context::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Row filter of a tally: one named context or every row pooled together.
#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, PartialOrd, Ord)]
pub enum Scope {
    Context(Context),
    /// Every row, including rows with an unrecognised context.
    All,
}

impl Scope {
    /// Output order of the per-scope tables.
    pub const ALL: [Scope; 4] = [
        Scope::Context(Context::CG),
        Scope::Context(Context::CXG),
        Scope::Context(Context::CXX),
        Scope::All,
    ];

    /// Prefix of the derived row labels. The pooled scope is unprefixed, so
    /// its denominator row is plain `D1`.
    pub fn label_prefix(&self) -> String {
        match self {
            Scope::Context(context) => format!("{}_", context),
            Scope::All => String::new(),
        }
    }

    /// Prefixed label of a derived row, e.g. `CG_D1` or `D1`.
    pub fn label(
        &self,
        suffix: &str,
    ) -> String {
        format!("{}{}", self.label_prefix(), suffix)
    }

    /// Whether a row with the given context belongs to this scope.
    pub fn contains(
        &self,
        context: Option<Context>,
    ) -> bool {
        match self {
            Scope::All => true,
            Scope::Context(own) => context == Some(*own),
        }
    }

    /// Stem of the output file name: `cg`, `cxg`, `cxx` or `total`.
    pub fn file_stem(&self) -> String {
        match self {
            Scope::Context(context) => context.as_str().to_lowercase(),
            Scope::All => String::from("total"),
        }
    }
}

impl From<Context> for Scope {
    fn from(value: Context) -> Self {
        Scope::Context(value)
    }
}

impl Display for Scope {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Scope::Context(context) => write!(f, "{}", context),
            Scope::All => write!(f, "Total"),
        }
    }
}

impl FromStr for Scope {
    type Err = MethEventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ALL" | "TOTAL" => Ok(Scope::All),
            other => Context::from_str(other).map(Scope::Context),
        }
    }
}

impl Serialize for Scope {
    fn serialize<S>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer, {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Scope {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>, {
        let s = String::deserialize(deserializer)?;
        Scope::from_str(&s).map_err(serde::de::Error::custom)
    }
}
