//! The closed set of governing jurisdictions.
//!
//! Thirteen codes: ten provinces and three territories. Every request names
//! exactly one home jurisdiction; workers may reference others, which is what
//! drives multi-jurisdiction fan-out.

use crate::error::CredenceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A provincial or territorial jurisdiction code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Jurisdiction {
    AB,
    BC,
    MB,
    NB,
    NL,
    NS,
    NT,
    NU,
    ON,
    PE,
    QC,
    SK,
    YT,
}

impl Jurisdiction {
    /// All thirteen codes, in alphabetical order.
    pub const ALL: [Jurisdiction; 13] = [
        Jurisdiction::AB,
        Jurisdiction::BC,
        Jurisdiction::MB,
        Jurisdiction::NB,
        Jurisdiction::NL,
        Jurisdiction::NS,
        Jurisdiction::NT,
        Jurisdiction::NU,
        Jurisdiction::ON,
        Jurisdiction::PE,
        Jurisdiction::QC,
        Jurisdiction::SK,
        Jurisdiction::YT,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Jurisdiction::AB => "AB",
            Jurisdiction::BC => "BC",
            Jurisdiction::MB => "MB",
            Jurisdiction::NB => "NB",
            Jurisdiction::NL => "NL",
            Jurisdiction::NS => "NS",
            Jurisdiction::NT => "NT",
            Jurisdiction::NU => "NU",
            Jurisdiction::ON => "ON",
            Jurisdiction::PE => "PE",
            Jurisdiction::QC => "QC",
            Jurisdiction::SK => "SK",
            Jurisdiction::YT => "YT",
        }
    }

    /// Full registry name, as reported in `systemsChecked`.
    pub fn registry_name(&self) -> &'static str {
        match self {
            Jurisdiction::AB => "Alberta Corporate Registry",
            Jurisdiction::BC => "BC Registries",
            Jurisdiction::MB => "Manitoba Companies Office",
            Jurisdiction::NB => "Service New Brunswick Registry",
            Jurisdiction::NL => "NL Registry of Companies",
            Jurisdiction::NS => "Nova Scotia Registry of Joint Stock Companies",
            Jurisdiction::NT => "NWT Corporate Registries",
            Jurisdiction::NU => "Nunavut Legal Registries",
            Jurisdiction::ON => "Ontario Business Registry",
            Jurisdiction::PE => "PEI Corporate Registry",
            Jurisdiction::QC => "Registraire des entreprises du Québec",
            Jurisdiction::SK => "Saskatchewan Corporate Registry",
            Jurisdiction::YT => "Yukon Corporate Affairs",
        }
    }
}

impl FromStr for Jurisdiction {
    type Err = CredenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "AB" => Ok(Jurisdiction::AB),
            "BC" => Ok(Jurisdiction::BC),
            "MB" => Ok(Jurisdiction::MB),
            "NB" => Ok(Jurisdiction::NB),
            "NL" => Ok(Jurisdiction::NL),
            "NS" => Ok(Jurisdiction::NS),
            "NT" => Ok(Jurisdiction::NT),
            "NU" => Ok(Jurisdiction::NU),
            "ON" => Ok(Jurisdiction::ON),
            "PE" => Ok(Jurisdiction::PE),
            "QC" => Ok(Jurisdiction::QC),
            "SK" => Ok(Jurisdiction::SK),
            "YT" => Ok(Jurisdiction::YT),
            other => Err(CredenceError::InvalidJurisdiction(other.to_string())),
        }
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
