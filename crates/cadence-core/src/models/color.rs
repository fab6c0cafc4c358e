//! Color tags attached to plans.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Color tag copied to every occurrence of a plan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanColor {
    #[default]
    Green,
    Red,
    Purple,
    Yellow,
    Teal,
    Blue,
    Orange,
    Pink,
    Brown,
}

impl PlanColor {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanColor::Green => "green",
            PlanColor::Red => "red",
            PlanColor::Purple => "purple",
            PlanColor::Yellow => "yellow",
            PlanColor::Teal => "teal",
            PlanColor::Blue => "blue",
            PlanColor::Orange => "orange",
            PlanColor::Pink => "pink",
            PlanColor::Brown => "brown",
        }
    }
}

impl FromStr for PlanColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "green" => Ok(PlanColor::Green),
            "red" => Ok(PlanColor::Red),
            "purple" => Ok(PlanColor::Purple),
            "yellow" => Ok(PlanColor::Yellow),
            "teal" => Ok(PlanColor::Teal),
            "blue" => Ok(PlanColor::Blue),
            "orange" => Ok(PlanColor::Orange),
            "pink" => Ok(PlanColor::Pink),
            "brown" => Ok(PlanColor::Brown),
            _ => Err(format!("Invalid plan color: {s}")),
        }
    }
}

impl fmt::Display for PlanColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
