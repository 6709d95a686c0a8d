//! Registry of selectable companies.
//!
//! Results keep declaration order (large caps first). Nothing here re-sorts.

use crate::domain::company::{CompanyRecord, Sector, SectorFilter};

#[derive(Debug, Clone)]
pub struct CompanyDirectory {
    companies: Vec<CompanyRecord>,
}

impl CompanyDirectory {
    pub fn new(companies: Vec<CompanyRecord>) -> Self {
        Self { companies }
    }

    /// The fourteen KOSPI companies the dashboard ships with.
    pub fn builtin() -> Self {
        use Sector::*;
        let rows = [
            ("samsung", "삼성전자", "005930", Semiconductor, "대기업"),
            ("sk_hynix", "SK하이닉스", "000660", Semiconductor, "대기업"),
            ("lg_energy", "LG에너지솔루션", "373220", Battery, "대기업"),
            ("hyundai_motor", "현대차", "005380", Automotive, "대기업"),
            ("posco", "POSCO홀딩스", "005490", Steel, "대기업"),
            ("naver", "NAVER", "035420", Internet, "IT/테크"),
            ("kakao", "카카오", "035720", Internet, "IT/테크"),
            ("ncsoft", "엔씨소프트", "036570", Game, "IT/테크"),
            ("nexon", "넥슨게임즈", "225570", Game, "IT/테크"),
            ("lg_chem", "LG화학", "051910", Chemical, "화학/바이오"),
            ("celltrion", "셀트리온", "068270", Bio, "화학/바이오"),
            ("samsung_bio", "삼성바이오로직스", "207940", Bio, "화학/바이오"),
            ("kia", "기아", "000270", Automotive, "기타"),
            ("hanwha_solutions", "한화솔루션", "009830", Chemical, "기타"),
        ];
        Self::new(
            rows.iter()
                .map(|(id, name, code, sector, category)| {
                    CompanyRecord::new(id, name, code, *sector, category)
                })
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.companies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }

    pub fn all(&self) -> &[CompanyRecord] {
        &self.companies
    }

    pub fn lookup(&self, id: &str) -> Option<&CompanyRecord> {
        self.companies.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lookup(id).is_some()
    }

    /// Company name for legends and chips, or the bare id when unregistered.
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.lookup(id).map(|c| c.name.as_str()).unwrap_or(id)
    }

    /// Case-insensitive substring match on name or ticker code, ANDed with
    /// the sector predicate. An empty search matches everything.
    pub fn filter(&self, search_text: &str, sector: SectorFilter) -> Vec<&CompanyRecord> {
        let needle = search_text.trim().to_lowercase();
        self.companies
            .iter()
            .filter(|c| {
                let matches_search = needle.is_empty()
                    || c.name.to_lowercase().contains(&needle)
                    || c.ticker_code.to_lowercase().contains(&needle);
                matches_search && sector.matches(c.sector)
            })
            .collect()
    }
}

impl Default for CompanyDirectory {
    fn default() -> Self {
        Self::builtin()
    }
}
