//! Company records and sector classification.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Industry sector a listed company is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Sector {
    Semiconductor,
    Internet,
    Game,
    Battery,
    Automotive,
    Steel,
    Chemical,
    Bio,
}

impl Sector {
    pub const ALL: [Sector; 8] = [
        Sector::Semiconductor,
        Sector::Internet,
        Sector::Game,
        Sector::Battery,
        Sector::Automotive,
        Sector::Steel,
        Sector::Chemical,
        Sector::Bio,
    ];

    /// Display label used by the dashboard.
    pub fn label(&self) -> &'static str {
        match self {
            Sector::Semiconductor => "반도체",
            Sector::Internet => "인터넷",
            Sector::Game => "게임",
            Sector::Battery => "배터리",
            Sector::Automotive => "자동차",
            Sector::Steel => "철강",
            Sector::Chemical => "화학",
            Sector::Bio => "바이오",
        }
    }

    fn ascii_name(&self) -> &'static str {
        match self {
            Sector::Semiconductor => "semiconductor",
            Sector::Internet => "internet",
            Sector::Game => "game",
            Sector::Battery => "battery",
            Sector::Automotive => "automotive",
            Sector::Steel => "steel",
            Sector::Chemical => "chemical",
            Sector::Bio => "bio",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sector: {0}")]
pub struct UnknownSector(pub String);

impl FromStr for Sector {
    type Err = UnknownSector;

    /// Accepts either the display label or the lowercase ASCII name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lower = trimmed.to_lowercase();
        Sector::ALL
            .into_iter()
            .find(|sector| sector.label() == trimmed || sector.ascii_name() == lower)
            .ok_or_else(|| UnknownSector(trimmed.to_string()))
    }
}

/// Sector predicate for directory filtering. `All` is the wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SectorFilter {
    #[default]
    All,
    Only(Sector),
}

impl SectorFilter {
    pub const WILDCARD_LABEL: &'static str = "전체";

    pub fn matches(&self, sector: Sector) -> bool {
        match self {
            SectorFilter::All => true,
            SectorFilter::Only(wanted) => *wanted == sector,
        }
    }
}

impl FromStr for SectorFilter {
    type Err = UnknownSector;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed == Self::WILDCARD_LABEL || trimmed.eq_ignore_ascii_case("all") {
            return Ok(SectorFilter::All);
        }
        trimmed.parse().map(SectorFilter::Only)
    }
}

/// One selectable company. Defined once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyRecord {
    pub id: String,
    pub name: String,
    pub ticker_code: String,
    pub sector: Sector,
    pub category: String,
}

impl CompanyRecord {
    pub fn new(id: &str, name: &str, ticker_code: &str, sector: Sector, category: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            ticker_code: ticker_code.to_string(),
            sector,
            category: category.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sector_parses_label_and_ascii_name() {
        assert_eq!("반도체".parse::<Sector>().unwrap(), Sector::Semiconductor);
        assert_eq!("Battery".parse::<Sector>().unwrap(), Sector::Battery);
        assert_eq!(" bio ".parse::<Sector>().unwrap(), Sector::Bio);
    }

    #[test]
    fn sector_rejects_unknown() {
        let err = "shipping".parse::<Sector>().unwrap_err();
        assert_eq!(err, UnknownSector("shipping".into()));
    }

    #[test]
    fn sector_filter_wildcard() {
        assert_eq!("전체".parse::<SectorFilter>().unwrap(), SectorFilter::All);
        assert_eq!("ALL".parse::<SectorFilter>().unwrap(), SectorFilter::All);
        assert!(SectorFilter::All.matches(Sector::Steel));
    }

    #[test]
    fn sector_filter_exact_match() {
        let filter: SectorFilter = "게임".parse().unwrap();
        assert!(filter.matches(Sector::Game));
        assert!(!filter.matches(Sector::Internet));
    }
}
