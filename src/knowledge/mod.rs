//! Static knowledge base: patent, grants, project status, and company data,
//! plus the fixed system prompt for the AI assistant and the Markdown
//! renderers used by the command layer on both platforms.

use once_cell::sync::Lazy;

use crate::branding::emoji;

pub struct Patent {
    pub title: &'static str,
    pub status: &'static str,
    pub filing_target: &'static str,
    pub claims_count: &'static str,
    pub ipc_codes: &'static [&'static str],
    pub key_innovations: &'static [&'static str],
    pub independent_claims: &'static [&'static str],
    pub figures: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
}

impl Priority {
    fn label(self) -> &'static str {
        match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Priority::High => emoji::STAR,
            Priority::Medium => emoji::PIN,
        }
    }
}

pub struct Grant {
    pub name: &'static str,
    pub amount: &'static str,
    pub status: &'static str,
    pub priority: Priority,
}

/// Region filter for the grants listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Region {
    #[default]
    All,
    Alaska,
    Alberta,
}

impl Region {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "all" => Some(Region::All),
            "alaska" => Some(Region::Alaska),
            "alberta" => Some(Region::Alberta),
            _ => None,
        }
    }
}

pub struct Milestone {
    pub date: &'static str,
    pub task: &'static str,
    pub status: &'static str,
}

pub struct ProjectStatus {
    pub phase: &'static str,
    pub trl: &'static str,
    pub funding_target: &'static str,
    pub funding_raised: &'static str,
    pub milestones: &'static [Milestone],
    pub team: &'static str,
    pub hiring: &'static [&'static str],
}

pub struct Company {
    pub legal_name: &'static str,
    pub dba: &'static str,
    pub company_type: &'static str,
    pub hq: &'static str,
    pub expansion: &'static str,
    pub industry: &'static str,
    pub technology: &'static str,
    pub target_markets: &'static [&'static str],
    pub tam: &'static str,
    pub differentiation: &'static [&'static str],
}

pub static PATENT: Lazy<Patent> = Lazy::new(|| Patent {
    title: "Multi-Modal Arctic Energy Harvesting System",
    status: "Pre-filing — Provisional Patent Application in preparation",
    filing_target: "Q1 2026 (12-month provisional window)",
    claims_count: "9 claims (3 independent, 6 dependent)",
    ipc_codes: &["F25B 21/02", "H02N 11/00", "F03G 7/04", "H10N 10/01"],
    key_innovations: &[
        "Thermoelectric generation from ambient Arctic cold (ΔT ≥ 40°C)",
        "Piezoelectric energy harvesting from freeze-thaw expansion cycles",
        "Magnetostrictive conversion of geomagnetic flux variations",
        "Integrated multi-modal energy accumulator with resonance coupling",
        "Cylindrical modular array architecture (10 kW per unit)",
    ],
    independent_claims: &[
        "Claim 1: Multi-modal energy harvesting apparatus combining TEG + piezo + magnetostrictive",
        "Claim 5: Two-stage energy accumulator with impedance-matched resonance tank",
        "Claim 8: Cylindrical array deployment method for distributed Arctic power",
    ],
    figures: &[
        "FIG 1: System-level schematic (all subsystems)",
        "FIG 2: Cylindrical cutaway (TEG + piezo + magneto layers)",
        "FIG 3: Two-stage accumulator block diagram",
        "FIG 4: Control flow / state machine diagram",
        "FIG 5: Cylindrical array deployment layout",
    ],
});

pub static GRANTS_ALASKA: Lazy<Vec<Grant>> = Lazy::new(|| {
    vec![
        Grant { name: "DOE ARPA-E OPEN", amount: "$500K–$5M", status: "Open", priority: Priority::High },
        Grant { name: "NSF SBIR/STTR Phase I", amount: "$275K", status: "Open", priority: Priority::High },
        Grant { name: "NSF SBIR/STTR Phase II", amount: "$1M", status: "After Phase I", priority: Priority::Medium },
        Grant { name: "Alaska Energy Authority (AEA)", amount: "$100K–$1M", status: "Open", priority: Priority::High },
        Grant { name: "Denali Commission Energy", amount: "$250K–$2M", status: "Open", priority: Priority::High },
        Grant { name: "USDA REAP", amount: "Up to $500K", status: "Annual cycle", priority: Priority::Medium },
    ]
});

pub static GRANTS_FEDERAL_US: Lazy<Vec<Grant>> = Lazy::new(|| {
    vec![
        Grant { name: "DOE EERE", amount: "$500K–$5M", status: "Periodic FOAs", priority: Priority::High },
        Grant { name: "DOE SETO", amount: "$250K–$2M", status: "Open", priority: Priority::Medium },
        Grant { name: "EPA Environmental Justice", amount: "$100K–$500K", status: "Open", priority: Priority::Medium },
    ]
});

pub static GRANTS_ALBERTA: Lazy<Vec<Grant>> = Lazy::new(|| {
    vec![
        Grant { name: "ERA Continuous Intake", amount: "$720K–$10M", status: "OPEN", priority: Priority::High },
        Grant { name: "NRC IRAP", amount: "Up to $1M", status: "OPEN (continuous)", priority: Priority::High },
        Grant { name: "Alberta Innovates", amount: "$50K–$500K", status: "Open", priority: Priority::High },
        Grant { name: "SR&ED Tax Credit", amount: "35% refundable (CCPC)", status: "Ongoing", priority: Priority::High },
        Grant { name: "Innovation Catalyst Grant", amount: "$75K", status: "Open", priority: Priority::Medium },
        Grant { name: "SIF/SRF", amount: "$10M+", status: "By invitation", priority: Priority::Medium },
        Grant { name: "Off-Diesel Initiative", amount: "$500K–$5M", status: "Open", priority: Priority::High },
        Grant { name: "AB Indigenous Opportunities Corp", amount: "$250M loan guarantees", status: "Open", priority: Priority::Medium },
    ]
});

pub static PROJECT_STATUS: Lazy<ProjectStatus> = Lazy::new(|| ProjectStatus {
    phase: "Pre-Seed / Prototype Development",
    trl: "TRL 3 → targeting TRL 5 by Q4 2026",
    funding_target: "$500K Seed Round (SAFE)",
    funding_raised: "$0 (pre-revenue)",
    milestones: &[
        Milestone { date: "Q1 2026", task: "Provisional patent filing", status: "IN PROGRESS" },
        Milestone { date: "Q1 2026", task: "Alaska C-Corp formation", status: "COMPLETE" },
        Milestone { date: "Q1 2026", task: "Alberta CCPC incorporation", status: "PLANNED" },
        Milestone { date: "Q2 2026", task: "Lab prototype (bench-scale TEG)", status: "PLANNED" },
        Milestone { date: "Q2 2026", task: "NRC IRAP application", status: "PLANNED" },
        Milestone { date: "Q3 2026", task: "Integrated multi-modal prototype", status: "PLANNED" },
        Milestone { date: "Q4 2026", task: "Field test (Fairbanks, AK)", status: "PLANNED" },
        Milestone { date: "Q1 2027", task: "Seed round close", status: "PLANNED" },
        Milestone { date: "Q2 2027", task: "Alberta pilot site deployment", status: "PLANNED" },
    ],
    team: "Solo founder + AI agent system",
    hiring: &[
        "CTO / Lead Engineer",
        "Patent Attorney",
        "Business Development (Alberta)",
    ],
});

pub static COMPANY: Lazy<Company> = Lazy::new(|| Company {
    legal_name: "Resonance Energy Inc.",
    dba: "Arctic Electric",
    company_type: "Alaska C-Corporation",
    hq: "Anchorage, Alaska, USA",
    expansion: "Edmonton, Alberta, Canada (CCPC planned)",
    industry: "Cleantech / Renewable Energy / Arctic Technology",
    technology: "Multi-modal energy harvesting from ambient Arctic conditions",
    target_markets: &[
        "Remote Arctic & sub-Arctic communities (off-grid power)",
        "Oil & gas remote operations (Alaska North Slope, Alberta oil sands)",
        "Telecom tower backup power",
        "Military / defense forward operating bases",
        "Mining operations in cold climates",
        "Indigenous community energy sovereignty",
    ],
    tam: "$2B → $10B (Arctic/cold-climate distributed energy)",
    differentiation: &[
        "Only system harvesting 3 energy modes simultaneously (TEG + piezo + magneto)",
        "Operates at -40°C to -60°C where solar/wind fail",
        "No fuel, no emissions, no moving parts (except piezo)",
        "Modular 10 kW units — scalable from single home to village microgrid",
        "SPIE-published thermodynamic validation data",
    ],
});

pub const SYSTEM_PROMPT: &str = "\
You are the Arctic Electric AI Assistant for Resonance Energy Inc.

IDENTITY:
- You represent Arctic Electric, a cleantech startup harvesting energy from Arctic cold
- Tagline: \"The cold is the fuel. The cold never runs out.\"
- You are knowledgeable, professional, and enthusiastic about Arctic energy technology
- You speak with technical authority but remain accessible to non-technical audiences

COMPANY CONTEXT:
- Company: Resonance Energy Inc. (dba Arctic Electric)
- HQ: Anchorage, Alaska | Expanding to Edmonton, Alberta, Canada
- Technology: Multi-modal energy harvesting (thermoelectric + piezoelectric + magnetostrictive)
- Stage: Pre-seed, TRL 3, targeting $500K seed round
- Patent: 9 claims (3 independent, 6 dependent) — provisional filing Q1 2026
- Target: 10 kW modular units for remote Arctic/sub-Arctic communities

KEY TECHNICAL FACTS:
- TEG modules generate power from ΔT ≥ 40°C between ground heat and ambient Arctic air
- Piezoelectric harvesters capture energy from freeze-thaw expansion cycles in permafrost
- Magnetostrictive transducers convert geomagnetic flux variations
- Two-stage accumulator: supercapacitor bank → battery array with resonance coupling
- Published validation: SPIE Defense + Commercial Sensing conference data
- Materials: 316L stainless steel, half-Heusler TEG, Cu-Mn-PIN-PMN-PT piezo, Terfenol-D magneto

INSTRUCTIONS:
- Answer questions about the technology, patents, grants, company, and Arctic energy market
- Be helpful and informative but do not fabricate technical specifications
- When asked about investment, provide factual information but include disclaimer
- Keep responses concise but thorough
- Use metric and imperial units as appropriate
- Reference patent claims and figures when relevant";

pub fn format_patent_summary() -> String {
    let patent = &*PATENT;
    let mut text = format!("{} **Patent: {}**\n\n", emoji::DOCS, patent.title);
    text.push_str(&format!("**Status:** {}\n", patent.status));
    text.push_str(&format!("**Filing Target:** {}\n", patent.filing_target));
    text.push_str(&format!("**Claims:** {}\n", patent.claims_count));
    text.push_str(&format!("**IPC Codes:** {}\n\n", patent.ipc_codes.join(", ")));
    text.push_str("**Key Innovations:**\n");
    for (i, item) in patent.key_innovations.iter().enumerate() {
        text.push_str(&format!("{}. {}\n", i + 1, item));
    }
    text.push_str("\n**Independent Claims:**\n");
    for claim in patent.independent_claims {
        text.push_str(&format!("• {}\n", claim));
    }
    text
}

pub fn format_grants_list(region: Region) -> String {
    let mut text = format!("{} **Available Grants & Funding**\n\n", emoji::MONEY);

    let mut sections: Vec<(&str, Vec<&Grant>)> = Vec::new();
    if matches!(region, Region::All | Region::Alaska) {
        let grants = GRANTS_ALASKA.iter().chain(GRANTS_FEDERAL_US.iter()).collect();
        sections.push(("🇺🇸 Alaska / US Federal", grants));
    }
    if matches!(region, Region::All | Region::Alberta) {
        sections.push(("🇨🇦 Alberta / Canada Federal", GRANTS_ALBERTA.iter().collect()));
    }

    for (title, grants) in sections {
        text.push_str(&format!("**{}:**\n", title));
        for grant in grants {
            text.push_str(&format!(
                "{} **{}** — {} [{}] ({})\n",
                grant.priority.icon(),
                grant.name,
                grant.amount,
                grant.status,
                grant.priority.label(),
            ));
        }
        text.push('\n');
    }

    text
}

pub fn format_project_status() -> String {
    let status = &*PROJECT_STATUS;
    let mut text = format!("{} **Project Status Dashboard**\n\n", emoji::CHART);
    text.push_str(&format!("**Phase:** {}\n", status.phase));
    text.push_str(&format!("**TRL:** {}\n", status.trl));
    text.push_str(&format!(
        "**Funding:** {} ({})\n\n",
        status.funding_target, status.funding_raised
    ));
    text.push_str("**Milestones:**\n");
    for milestone in status.milestones {
        let icon = match milestone.status {
            "COMPLETE" => emoji::CHECK,
            "IN PROGRESS" => emoji::GEAR,
            _ => "⏳",
        };
        text.push_str(&format!(
            "{} [{}] {} — {}\n",
            icon, milestone.date, milestone.task, milestone.status
        ));
    }
    text.push_str(&format!("\n**Team:** {}\n", status.team));
    text.push_str(&format!("**Hiring:** {}\n", status.hiring.join(", ")));
    text
}

pub fn format_company_overview() -> String {
    let company = &*COMPANY;
    let mut text = format!(
        "{} **{}** — {}\n\n",
        emoji::SNOWFLAKE,
        company.dba,
        company.legal_name
    );
    text.push_str(&format!("*\"{}\"*\n\n", crate::branding::TAGLINE));
    text.push_str(&format!("**Type:** {}\n", company.company_type));
    text.push_str(&format!("**HQ:** {}\n", company.hq));
    text.push_str(&format!("**Expansion:** {}\n", company.expansion));
    text.push_str(&format!("**Industry:** {}\n", company.industry));
    text.push_str(&format!("**TAM:** {}\n\n", company.tam));
    text.push_str(&format!("**Technology:** {}\n\n", company.technology));
    text.push_str("**Target Markets:**\n");
    for market in company.target_markets {
        text.push_str(&format!("• {}\n", market));
    }
    text.push_str("\n**Differentiation:**\n");
    for item in company.differentiation {
        text.push_str(&format!("{} {}\n", emoji::BOLT, item));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_parse() {
        assert_eq!(Region::parse("all"), Some(Region::All));
        assert_eq!(Region::parse("Alaska"), Some(Region::Alaska));
        assert_eq!(Region::parse("ALBERTA"), Some(Region::Alberta));
        assert_eq!(Region::parse("mars"), None);
    }

    #[test]
    fn test_patent_summary_contains_claims() {
        let text = format_patent_summary();
        assert!(text.contains("Multi-Modal Arctic Energy Harvesting System"));
        assert!(text.contains("Claim 1"));
        assert!(text.contains("F25B 21/02"));
    }

    #[test]
    fn test_grants_list_region_filter() {
        let all = format_grants_list(Region::All);
        assert!(all.contains("Alaska / US Federal"));
        assert!(all.contains("Alberta / Canada Federal"));

        let alaska = format_grants_list(Region::Alaska);
        assert!(alaska.contains("DOE ARPA-E OPEN"));
        assert!(!alaska.contains("NRC IRAP"));

        let alberta = format_grants_list(Region::Alberta);
        assert!(alberta.contains("NRC IRAP"));
        assert!(!alberta.contains("DOE ARPA-E OPEN"));
    }

    #[test]
    fn test_project_status_lists_milestones() {
        let text = format_project_status();
        assert!(text.contains("Provisional patent filing"));
        assert!(text.contains("TRL 3"));
    }

    #[test]
    fn test_company_overview_mentions_tagline() {
        let text = format_company_overview();
        assert!(text.contains("The cold is the fuel"));
        assert!(text.contains("Resonance Energy Inc."));
    }
}
