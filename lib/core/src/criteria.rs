//! Search criteria for recipe queries.
//!
//! An empty [`Criteria`] matches every recipe.  Ingredient and cuisine
//! names are normalized before matching, so criteria built from raw user
//! input ("Eggs") match recipes ingested with normalized names ("egg").

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A numeric predicate: an exact value, or an inclusive range where either
/// bound may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeBound {
    Exact(u32),
    Between { min: Option<u32>, max: Option<u32> },
}

impl RangeBound {
    #[must_use]
    pub fn at_least(min: u32) -> Self {
        Self::Between {
            min: Some(min),
            max: None,
        }
    }

    #[must_use]
    pub fn at_most(max: u32) -> Self {
        Self::Between {
            min: None,
            max: Some(max),
        }
    }

    #[must_use]
    pub fn between(min: u32, max: u32) -> Self {
        Self::Between {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn contains(&self, value: u32) -> bool {
        match *self {
            Self::Exact(v) => value == v,
            Self::Between { min, max } => {
                min.map_or(true, |m| value >= m) && max.map_or(true, |m| value <= m)
            }
        }
    }

    /// A recipe with no value for the attribute never matches a predicate
    /// on it.
    pub fn matches(&self, value: Option<u32>) -> bool {
        value.map_or(false, |v| self.contains(v))
    }
}

/// Build a range from a sequence of bounds.  One element is an exact match,
/// two are (min, max); anything longer is a caller bug.
impl TryFrom<&[u32]> for RangeBound {
    type Error = Error;

    fn try_from(values: &[u32]) -> Result<Self> {
        match *values {
            [exact] => Ok(Self::Exact(exact)),
            [min, max] => Ok(Self::between(min, max)),
            _ => Err(Error::InvalidRange(format!("{values:?}"))),
        }
    }
}

/// Parse `"N"`, `"MIN-MAX"`, `"MIN-"`, or `"-MAX"`.
impl FromStr for RangeBound {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidRange(s.to_string());
        let parse = |part: &str| -> Result<Option<u32>> {
            let part = part.trim();
            if part.is_empty() {
                return Ok(None);
            }
            part.parse::<u32>().map(Some).map_err(|_| invalid())
        };
        match s.split('-').collect::<Vec<_>>().as_slice() {
            [exact] => Ok(Self::Exact(parse(exact)?.ok_or_else(invalid)?)),
            [min, max] => {
                let (min, max) = (parse(min)?, parse(max)?);
                if min.is_none() && max.is_none() {
                    return Err(invalid());
                }
                Ok(Self::Between { min, max })
            }
            _ => Err(invalid()),
        }
    }
}

/// The structured description of a recipe search.  All fields are optional;
/// the default value matches every recipe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criteria {
    /// The recipe must contain all of these ingredients.
    pub include_ingredients: Vec<String>,
    /// The recipe must contain none of these ingredients.
    pub exclude_ingredients: Vec<String>,
    /// The recipe must carry all of these cuisine tags.
    pub include_cuisines: Vec<String>,
    /// The recipe must carry none of these cuisine tags.
    pub exclude_cuisines: Vec<String>,
    pub prep_time: Option<RangeBound>,
    pub cook_time: Option<RangeBound>,
    pub total_time: Option<RangeBound>,
    pub num_steps: Option<RangeBound>,
    pub num_ingredients: Option<RangeBound>,
}
