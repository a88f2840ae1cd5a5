//! Service and company catalogs.
//!
//! Both catalogs are closed sets. Each variant displays (and parses, case-insensitively)
//! as the human-readable name shown on the page, and serializes to that same name.
//! `ALL` lists the variants in catalog order so the generator can draw uniformly.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::error::QuoteError;
use crate::result::Result;

/// Installation service a quote is for.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, Display, EnumString, Hash, Eq, PartialEq, Ord, PartialOrd,
)]
#[strum(ascii_case_insensitive)]
pub enum Service {
    /// Heat-pump hot water systems.
    #[strum(serialize = "Hot Water Heat Pumps")]
    #[serde(rename = "Hot Water Heat Pumps")]
    HotWaterHeatPumps,
    /// Rooftop solar panels.
    #[strum(serialize = "Solar Installation")]
    #[serde(rename = "Solar Installation")]
    SolarInstallation,
    /// Home battery storage.
    #[strum(serialize = "Home Battery Installations")]
    #[serde(rename = "Home Battery Installations")]
    HomeBatteryInstallations,
    /// Reverse cycle split-system air conditioning.
    #[strum(serialize = "Reverse Cycle Split System Installations")]
    #[serde(rename = "Reverse Cycle Split System Installations")]
    ReverseCycleSplitSystemInstallations,
}

impl Service {
    /// Every service, in catalog order.
    pub const ALL: [Service; 4] = [
        Service::HotWaterHeatPumps,
        Service::SolarInstallation,
        Service::HomeBatteryInstallations,
        Service::ReverseCycleSplitSystemInstallations,
    ];

    /// Parse a catalog name, mapping failures to `QuoteError::UnknownService`.
    pub fn from_name(name: &str) -> Result<Self> {
        name.trim()
            .parse()
            .map_err(|_| QuoteError::UnknownService(name.to_string()))
    }
}

/// Installer company that issued a quote.
#[allow(missing_docs)]
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, Display, EnumString, Hash, Eq, PartialEq, Ord, PartialOrd,
)]
#[strum(ascii_case_insensitive)]
pub enum Company {
    SolarTech,
    EcoEnergy,
    GreenPower,
    SustainableSolutions,
    EnergyWise,
}

impl Company {
    /// Every company, in catalog order.
    pub const ALL: [Company; 5] = [
        Company::SolarTech,
        Company::EcoEnergy,
        Company::GreenPower,
        Company::SustainableSolutions,
        Company::EnergyWise,
    ];

    /// Parse a catalog name, mapping failures to `QuoteError::UnknownCompany`.
    pub fn from_name(name: &str) -> Result<Self> {
        name.trim()
            .parse()
            .map_err(|_| QuoteError::UnknownCompany(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_round_trips_through_display_name() {
        for service in Service::ALL {
            assert_eq!(Service::from_name(&service.to_string()).unwrap(), service);
        }
    }

    #[test]
    fn service_parse_ignores_case() {
        assert_eq!(
            Service::from_name("solar installation").unwrap(),
            Service::SolarInstallation
        );
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert!(matches!(
            Service::from_name("Wind Farm"),
            Err(QuoteError::UnknownService(_))
        ));
        assert!(matches!(
            Company::from_name("Acme"),
            Err(QuoteError::UnknownCompany(_))
        ));
    }

    #[test]
    fn service_serializes_as_display_name() {
        let json = serde_json::to_string(&Service::HomeBatteryInstallations).unwrap();
        assert_eq!(json, "\"Home Battery Installations\"");
    }
}
