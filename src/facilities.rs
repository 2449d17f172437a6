//! Static catalog of buildable city facilities.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facility {
    Farm,
    Barracks,
    Market,
}

#[derive(Debug, Clone, Copy)]
pub struct FacilityDefinition {
    pub facility: Facility,
    pub display: &'static str,
    pub required_population: u32,
    pub effect: &'static str,
}

/// Build order in the ui follows catalog order. The market's income effect
/// is display metadata only; no income model exists yet.
pub const CATALOG: &[FacilityDefinition] = &[
    FacilityDefinition {
        facility: Facility::Farm,
        display: "Farm",
        required_population: 2,
        effect: "+1 population per turn",
    },
    FacilityDefinition {
        facility: Facility::Barracks,
        display: "Barracks",
        required_population: 4,
        effect: "enables warrior training",
    },
    FacilityDefinition {
        facility: Facility::Market,
        display: "Market",
        required_population: 6,
        effect: "increased income",
    },
];

pub fn definition(facility: Facility) -> &'static FacilityDefinition {
    CATALOG
        .iter()
        .find(|def| def.facility == facility)
        .expect("every facility variant is cataloged")
}
