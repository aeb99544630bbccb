//! Passenger attribute enums and the survival label.
//!
//! String forms match the categories used by the model artifact's encoding
//! metadata (`"male"`, `"S"`, `"Mr"`, ...). Parsing is case-insensitive.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// Sex
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            _ => Err(CoreError::UnknownVariant {
                kind: "sex",
                value: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// PassengerClass
// ---------------------------------------------------------------------------

/// Ticket class. Serialized as the integer `1`, `2`, or `3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PassengerClass {
    First,
    Second,
    Third,
}

impl PassengerClass {
    #[must_use]
    pub const fn as_number(self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
            Self::Third => 3,
        }
    }
}

impl TryFrom<u8> for PassengerClass {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::First),
            2 => Ok(Self::Second),
            3 => Ok(Self::Third),
            other => Err(CoreError::UnknownVariant {
                kind: "passenger class",
                value: other.to_string(),
            }),
        }
    }
}

impl From<PassengerClass> for u8 {
    fn from(value: PassengerClass) -> Self {
        value.as_number()
    }
}

impl FromStr for PassengerClass {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || CoreError::UnknownVariant {
            kind: "passenger class",
            value: s.to_string(),
        };
        let lowered = s.trim().to_ascii_lowercase();
        let number = match lowered.as_str() {
            "1st" => 1,
            "2nd" => 2,
            "3rd" => 3,
            digits => digits.parse::<u8>().map_err(|_| unknown())?,
        };
        Self::try_from(number)
    }
}

impl fmt::Display for PassengerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_number())
    }
}

impl JsonSchema for PassengerClass {
    fn schema_name() -> Cow<'static, str> {
        Cow::Borrowed("PassengerClass")
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "type": "integer",
            "enum": [1, 2, 3],
            "description": "Ticket class: 1st, 2nd or 3rd."
        })
    }
}

// ---------------------------------------------------------------------------
// Port
// ---------------------------------------------------------------------------

/// Port of embarkation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Port {
    /// Cherbourg
    #[serde(rename = "C")]
    Cherbourg,
    /// Queenstown
    #[serde(rename = "Q")]
    Queenstown,
    /// Southampton
    #[serde(rename = "S")]
    Southampton,
}

impl Port {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cherbourg => "C",
            Self::Queenstown => "Q",
            Self::Southampton => "S",
        }
    }

    #[must_use]
    pub const fn town(self) -> &'static str {
        match self {
            Self::Cherbourg => "Cherbourg",
            Self::Queenstown => "Queenstown",
            Self::Southampton => "Southampton",
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Port {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" | "cherbourg" => Ok(Self::Cherbourg),
            "q" | "queenstown" => Ok(Self::Queenstown),
            "s" | "southampton" => Ok(Self::Southampton),
            _ => Err(CoreError::UnknownVariant {
                kind: "port of embarkation",
                value: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Title
// ---------------------------------------------------------------------------

/// Honorific extracted from the passenger name, collapsed to the groups the
/// model was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Title {
    Mr,
    Miss,
    Mrs,
    Other,
}

impl Title {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mr => "Mr",
            Self::Miss => "Miss",
            Self::Mrs => "Mrs",
            Self::Other => "Other",
        }
    }

    /// Map a raw honorific (`"Mr"`, `"Dr"`, `"Rev"`, ...) to its group.
    #[must_use]
    pub fn from_honorific(raw: &str) -> Self {
        match raw.trim() {
            "Mr" => Self::Mr,
            "Miss" => Self::Miss,
            "Mrs" => Self::Mrs,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SurvivalLabel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SurvivalLabel {
    Survived,
    NotSurvived,
}

impl SurvivalLabel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Survived => "survived",
            Self::NotSurvived => "not_survived",
        }
    }

    /// Sentence used in reports.
    #[must_use]
    pub const fn headline(self) -> &'static str {
        match self {
            Self::Survived => "Would Have Survived",
            Self::NotSurvived => "Would Not Have Survived",
        }
    }
}

impl fmt::Display for SurvivalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
