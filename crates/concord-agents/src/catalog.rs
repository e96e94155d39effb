//! Static scenario and country profile data.
//!
//! Nothing here changes during a run. Profile list order is the order shown
//! in prompts; it carries no ranking.

use serde::Serialize;

use concord_types::{ScenarioId, ScenarioKind};

use crate::error::AgentError;

// ---------------------------------------------------------------------------
// Country profiles
// ---------------------------------------------------------------------------

/// Strengths, weaknesses and interests of one nation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryProfile {
    /// Nation name as used on the roster.
    pub name: &'static str,
    /// National strengths.
    pub strengths: &'static [&'static str],
    /// National weaknesses.
    pub weaknesses: &'static [&'static str],
    /// National interests.
    pub interests: &'static [&'static str],
    /// Display colour as a hex string.
    pub color: &'static str,
}

/// Every nation that can join a roster.
pub static COUNTRY_PROFILES: [CountryProfile; 9] = [
    CountryProfile {
        name: "USA",
        strengths: &["Military", "Economy", "Technology", "Diplomatic Influence"],
        weaknesses: &["Political Polarization", "National Debt", "Infrastructure Gaps"],
        interests: &[
            "Global Stability",
            "Free Trade",
            "Democracy Promotion",
            "Counter-terrorism",
        ],
        color: "#0033A0",
    },
    CountryProfile {
        name: "China",
        strengths: &[
            "Manufacturing",
            "Infrastructure",
            "Population",
            "Economic Growth Rate",
        ],
        weaknesses: &["Aging Population", "Environmental Issues", "Regional Tensions"],
        interests: &[
            "Regional Dominance",
            "Technological Supremacy",
            "Economic Partnerships",
            "One China Policy",
        ],
        color: "#DE2910",
    },
    CountryProfile {
        name: "India",
        strengths: &[
            "Large Workforce",
            "IT Sector",
            "Strategic Location",
            "Democratic System",
        ],
        weaknesses: &[
            "Infrastructure Deficits",
            "Poverty & Inequality",
            "Bureaucracy",
        ],
        interests: &[
            "Economic Development",
            "Regional Security",
            "Climate Action",
            "Non-alignment",
        ],
        color: "#FF9933",
    },
    CountryProfile {
        name: "Russia",
        strengths: &[
            "Vast Natural Resources",
            "Military Power",
            "Cyber Capabilities",
            "UN Security Council Veto",
        ],
        weaknesses: &[
            "Economic Sanctions",
            "Demographic Decline",
            "Technological Lag (non-military)",
        ],
        interests: &[
            "Regional Sphere of Influence",
            "Energy Markets",
            "National Security",
            "Multipolar World Order",
        ],
        color: "#0039A6",
    },
    CountryProfile {
        name: "Germany",
        strengths: &[
            "Strong Industry",
            "Engineering Excellence",
            "EU Leadership",
            "Export Economy",
        ],
        weaknesses: &[
            "Energy Dependence",
            "Aging Population",
            "Military Underfunding (historical)",
        ],
        interests: &[
            "EU Stability & Integration",
            "Climate Policy Leadership",
            "International Trade",
            "Human Rights",
        ],
        color: "#FFCC00",
    },
    CountryProfile {
        name: "Brazil",
        strengths: &[
            "Agriculture Powerhouse",
            "Natural Resources",
            "Regional Influence (LatAm)",
            "Biodiversity",
        ],
        weaknesses: &[
            "Political Instability",
            "Infrastructure Bottlenecks",
            "Deforestation",
        ],
        interests: &[
            "Economic Growth",
            "South American Integration",
            "Environmental Sustainability",
            "Social Equality",
        ],
        color: "#009B3A",
    },
    CountryProfile {
        name: "South Africa",
        strengths: &[
            "Mineral Wealth",
            "Developed Infrastructure (regional context)",
            "Constitutional Democracy",
            "Regional Hub",
        ],
        weaknesses: &[
            "High Unemployment",
            "Inequality",
            "Energy Crisis (Eskom)",
            "Corruption",
        ],
        interests: &[
            "African Development",
            "Regional Stability",
            "Trade Partnerships (BRICS, etc.)",
            "Addressing Inequality",
        ],
        color: "#007A4D",
    },
    CountryProfile {
        name: "Pakistan",
        strengths: &[
            "Strategic Location",
            "Nuclear Capability",
            "Large Population",
            "Military Experience",
        ],
        weaknesses: &[
            "Economic Volatility",
            "Political Instability",
            "Water Scarcity",
            "Regional Security Challenges",
        ],
        interests: &[
            "National Security",
            "Economic Stability",
            "Kashmir Issue",
            "Regional Influence",
            "Counter-terrorism",
        ],
        color: "#006600",
    },
    CountryProfile {
        name: "EU",
        strengths: &[
            "Large Single Market",
            "Regulatory Power",
            "Diplomatic Network",
            "Economic Aid",
        ],
        weaknesses: &[
            "Internal Divisions",
            "Bureaucracy",
            "Military Dependence (on members/NATO)",
            "Demographic Challenges",
        ],
        interests: &[
            "European Integration",
            "Economic Prosperity",
            "Climate Action",
            "Rule of Law",
            "Neighborhood Stability",
        ],
        color: "#003399",
    },
];

/// Look up a nation's profile by exact name.
pub fn profile(name: &str) -> Result<&'static CountryProfile, AgentError> {
    COUNTRY_PROFILES
        .iter()
        .find(|p| p.name == name)
        .ok_or_else(|| AgentError::UnknownCountry(name.to_owned()))
}

/// Names of every nation in the catalog, sorted alphabetically.
pub fn available_countries() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = COUNTRY_PROFILES.iter().map(|p| p.name).collect();
    names.sort_unstable();
    names
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

/// A crisis scenario and its framing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scenario {
    /// Catalog key.
    pub id: ScenarioId,
    /// Display name.
    pub name: &'static str,
    /// Which secondary metric this scenario drives.
    pub kind: ScenarioKind,
    /// What is happening.
    pub description: &'static str,
    /// Issues on the negotiating table.
    pub key_issues: &'static [&'static str],
    /// Historical precedent for the crisis.
    pub historical: &'static str,
}

static SCENARIOS: [Scenario; 6] = [
    Scenario {
        id: ScenarioId::ClimateCollapse,
        name: "Climate Collapse",
        kind: ScenarioKind::Climate,
        description: "Rapid sea-level rise, extreme weather events (heatwaves, floods, storms), and failing agricultural yields threaten global stability and resource access.",
        key_issues: &[
            "Coastal city inundation",
            "Food security crisis",
            "Mass climate migration",
            "Water resource conflicts",
            "Carbon reduction targets",
        ],
        historical: "Amplified effects seen in events like the 1930s Dust Bowl, Hurricane Katrina, or recent global heatwaves, but occurring simultaneously and globally.",
    },
    Scenario {
        id: ScenarioId::GlobalPandemic,
        name: "Global Pandemic MkII",
        kind: ScenarioKind::General,
        description: "A novel airborne pathogen emerges with high transmissibility, significant morbidity/mortality across age groups, and resistance to initial treatments.",
        key_issues: &[
            "Healthcare system collapse",
            "Global supply chain disruption",
            "Vaccine development & equitable distribution",
            "Border closures & travel restrictions",
            "Economic recession",
        ],
        historical: "Combines lessons from COVID-19 (global spread, economic impact) and historical plagues (higher mortality potential), plus potential for faster mutation.",
    },
    Scenario {
        id: ScenarioId::EnergyCrisis,
        name: "Gridlock Energy Crisis",
        kind: ScenarioKind::Energy,
        description: "Simultaneous disruption of major fossil fuel supplies (geopolitics, infrastructure failure) and slow renewable rollout leads to critical global energy shortages.",
        key_issues: &[
            "Skyrocketing fuel prices",
            "Industrial production halts",
            "Energy rationing",
            "Renewable transition acceleration pressures",
            "Geopolitical tensions over remaining resources",
        ],
        historical: "Severity exceeding the 1970s oil crises due to higher global energy dependence and interconnectedness, coupled with transition challenges.",
    },
    Scenario {
        id: ScenarioId::WaterWars,
        name: "Multi-Regional Water Wars",
        kind: ScenarioKind::General,
        description: "Severe droughts exacerbated by climate change and poor management lead to critical freshwater shortages in multiple densely populated/agricultural regions simultaneously.",
        key_issues: &[
            "Agricultural collapse & famine risk",
            "Cross-border water disputes escalating to conflict",
            "Urban water supply failure",
            "Investment in desalination/water tech",
            "Hydro-diplomacy needs",
        ],
        historical: "Scaling up regional crises like those seen around the Nile, Jordan River, or Indus basins, or Cape Town's 'Day Zero' threat, to multiple global hotspots at once.",
    },
    Scenario {
        id: ScenarioId::RefugeeCrisis,
        name: "Cascading Refugee Crisis",
        kind: ScenarioKind::Refugee,
        description: "A confluence of conflict, economic collapse, and climate disasters triggers unprecedented mass displacement across several continents.",
        key_issues: &[
            "Overwhelmed border security",
            "Humanitarian aid funding gaps",
            "Host country integration challenges",
            "Political destabilization in receiving nations",
            "Addressing root causes of displacement",
        ],
        historical: "Magnitude significantly larger than the 2015 European migrant crisis or Syrian refugee crisis, involving more diverse origins and destinations.",
    },
    Scenario {
        id: ScenarioId::AiColdWar,
        name: "AI Cold War",
        kind: ScenarioKind::General,
        description: "Rapid, unregulated advances in Artificial General Intelligence (AGI) research by competing blocs triggers intense geopolitical rivalry, mistrust, and fears of autonomous weapons or societal control.",
        key_issues: &[
            "AI arms race (autonomous weapons)",
            "Economic disruption (job displacement)",
            "AI safety and ethics agreements",
            "Control over critical AI infrastructure/data",
            "Risk of accidental escalation",
        ],
        historical: "Analogous to the Nuclear Cold War, but focused on AI dominance, with faster development cycles and potentially more unpredictable outcomes.",
    },
];

/// Look up a scenario. Every [`ScenarioId`] has an entry.
pub fn scenario(id: ScenarioId) -> &'static Scenario {
    match id {
        ScenarioId::ClimateCollapse => &SCENARIOS[0],
        ScenarioId::GlobalPandemic => &SCENARIOS[1],
        ScenarioId::EnergyCrisis => &SCENARIOS[2],
        ScenarioId::WaterWars => &SCENARIOS[3],
        ScenarioId::RefugeeCrisis => &SCENARIOS[4],
        ScenarioId::AiColdWar => &SCENARIOS[5],
    }
}
