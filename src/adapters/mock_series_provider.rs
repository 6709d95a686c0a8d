//! Built-in series provider backed by static tables and random daily prices.
//!
//! Daily prices are `base ± spread` with independent uniform noise per date;
//! there is no drift between consecutive points. With a seed, each company's
//! series is a pure function of `(seed, id, as_of)`.

use crate::domain::series::{
    MetricRecord, NewsItem, SeriesPoint, TargetPriceTable, CURRENT_PRICE_DISCOUNT,
};
use crate::domain::settings::{DEFAULT_PRICE_WINDOW_DAYS, MAX_PRICE_WINDOW_DAYS};
use crate::ports::series_port::SeriesProvider;
use chrono::{Days, Local, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Base (fair) price for companies with no entry in the table.
pub const FALLBACK_BASE_PRICE: f64 = 100_000.0;

/// Half-width of the noise band for companies with no price profile,
/// as a fraction of their current price.
pub const FALLBACK_SPREAD_RATIO: f64 = 0.05;

const BASE_PRICES: &[(&str, f64)] = &[
    ("samsung", 75_000.0),
    ("sk_hynix", 125_000.0),
    ("naver", 180_000.0),
    ("kakao", 65_000.0),
    ("lg_energy", 520_000.0),
    ("hyundai_motor", 195_000.0),
    ("posco", 290_000.0),
    ("lg_chem", 480_000.0),
    ("celltrion", 175_000.0),
    ("kia", 95_000.0),
    ("ncsoft", 220_000.0),
    ("nexon", 24_000.0),
    ("samsung_bio", 750_000.0),
    ("hanwha_solutions", 32_000.0),
];

/// (id, centre, half-width) of the daily price band.
const PRICE_PROFILES: &[(&str, f64, f64)] = &[
    ("samsung", 70_000.0, 5_000.0),
    ("sk_hynix", 120_000.0, 10_000.0),
    ("naver", 190_000.0, 7_500.0),
    ("kakao", 50_000.0, 4_000.0),
    ("lg_energy", 400_000.0, 25_000.0),
    ("hyundai_motor", 180_000.0, 7_500.0),
    ("posco", 250_000.0, 15_000.0),
    ("lg_chem", 350_000.0, 20_000.0),
    ("celltrion", 160_000.0, 10_000.0),
    ("kia", 85_000.0, 5_000.0),
];

/// EPS, ROE, ROA, BPS, EV/EBITDA, PER, PBR, debt ratio.
const METRICS: &[(&str, [f64; 8])] = &[
    ("samsung", [5420.0, 9.8, 6.2, 55280.0, 8.5, 13.2, 1.3, 45.2]),
    ("sk_hynix", [8950.0, 15.2, 8.9, 58900.0, 6.8, 14.1, 2.1, 38.7]),
    ("naver", [12500.0, 11.5, 7.8, 108750.0, 12.3, 15.6, 1.8, 22.1]),
    ("kakao", [3200.0, 6.8, 4.2, 47050.0, 18.9, 16.5, 1.1, 31.5]),
    ("lg_energy", [15600.0, 18.5, 12.3, 84300.0, 9.2, 27.0, 5.0, 58.9]),
    ("hyundai_motor", [18900.0, 8.9, 3.8, 212400.0, 5.6, 9.5, 0.8, 72.3]),
    ("posco", [22100.0, 12.4, 6.8, 178200.0, 4.2, 11.3, 1.4, 42.8]),
    ("lg_chem", [16800.0, 7.2, 4.1, 233100.0, 7.8, 20.8, 1.5, 49.7]),
    ("celltrion", [8950.0, 14.6, 9.8, 61300.0, 11.5, 17.9, 2.6, 28.4]),
    ("kia", [12400.0, 11.8, 4.9, 105100.0, 3.8, 6.9, 0.8, 65.1]),
];

/// (id, title, summary, relative time, source, category)
const NEWS: &[(&str, &str, &str, &str, &str, &str)] = &[
    (
        "samsung",
        "삼성전자, 3분기 반도체 업황 회복세로 매출 증가 전망",
        "메모리 반도체 가격 상승과 수요 회복으로 3분기 실적 개선 기대",
        "2시간 전",
        "한국경제",
        "실적",
    ),
    (
        "samsung",
        "삼성전자, AI 반도체 경쟁력 강화를 위한 대규모 투자 발표",
        "차세대 AI 칩 개발에 10조원 규모 투자 계획 공개",
        "5시간 전",
        "전자신문",
        "투자",
    ),
    (
        "samsung",
        "삼성 갤럭시 S24, 글로벌 시장에서 호조세 지속",
        "프리미엄 스마트폰 시장 점유율 확대로 모바일 부문 실적 향상",
        "8시간 전",
        "디지털타임스",
        "제품",
    ),
    (
        "sk_hynix",
        "SK하이닉스, HBM3E 양산 본격화로 AI 메모리 시장 선점",
        "고대역폭 메모리 HBM3E 양산 라인 가동으로 AI 반도체 공급망 강화",
        "1시간 전",
        "매일경제",
        "기술",
    ),
    (
        "sk_hynix",
        "SK하이닉스 3분기 실적 전망, 메모리 업황 회복으로 흑자 전환 기대",
        "DRAM과 NAND 플래시 가격 상승으로 분기 흑자 달성 전망",
        "4시간 전",
        "서울경제",
        "실적",
    ),
    (
        "naver",
        "네이버, 생성형 AI '하이퍼클로바X' 기업 서비스 확대",
        "B2B 시장 진출 가속화로 AI 사업 매출 성장 기대",
        "3시간 전",
        "IT조선",
        "서비스",
    ),
    (
        "naver",
        "네이버페이, 간편결제 시장 점유율 2위 달성",
        "핀테크 사업 확장으로 플랫폼 경쟁력 강화",
        "6시간 전",
        "파이낸셜뉴스",
        "사업",
    ),
    (
        "kakao",
        "카카오, 택시·대리 통합 플랫폼 출시로 모빌리티 사업 강화",
        "통합 모빌리티 서비스로 이용자 편의성 향상 및 시장 확대",
        "2시간 전",
        "아시아경제",
        "서비스",
    ),
    (
        "kakao",
        "카카오뱅크, 대출 포트폴리오 다각화로 수익성 개선",
        "개인신용대출 외 주택담보대출 등으로 사업 영역 확장",
        "7시간 전",
        "연합뉴스",
        "금융",
    ),
    (
        "lg_energy",
        "LG에너지솔루션, 북미 배터리 공장 증설로 생산 능력 확대",
        "테슬라·GM 등 주요 고객사 대응을 위한 대규모 투자",
        "1시간 전",
        "조선비즈",
        "투자",
    ),
    (
        "hyundai_motor",
        "현대차, 전기차 아이오닉 시리즈 글로벌 판매 호조",
        "유럽·북미 시장에서 전기차 판매량 전년 대비 50% 증가",
        "4시간 전",
        "오토헤럴드",
        "판매",
    ),
];

pub struct MockSeriesProvider {
    seed: Option<u64>,
    as_of: Option<NaiveDate>,
    window_days: usize,
}

impl MockSeriesProvider {
    pub fn new() -> Self {
        Self {
            seed: None,
            as_of: None,
            window_days: DEFAULT_PRICE_WINDOW_DAYS,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Last date of the price window. Defaults to today.
    pub fn with_as_of(mut self, as_of: NaiveDate) -> Self {
        self.as_of = Some(as_of);
        self
    }

    /// Number of trailing days in the price window, capped at
    /// [`MAX_PRICE_WINDOW_DAYS`].
    pub fn with_window_days(mut self, days: usize) -> Self {
        self.window_days = days.min(MAX_PRICE_WINDOW_DAYS);
        self
    }

    pub fn base_price(id: &str) -> f64 {
        BASE_PRICES
            .iter()
            .find(|(k, _)| *k == id)
            .map(|(_, p)| *p)
            .unwrap_or(FALLBACK_BASE_PRICE)
    }

    /// Centre and half-width of a company's daily price band. Companies
    /// without a profile centre on their current price.
    pub fn price_profile(id: &str) -> (f64, f64) {
        PRICE_PROFILES
            .iter()
            .find(|(k, _, _)| *k == id)
            .map(|(_, base, spread)| (*base, *spread))
            .unwrap_or_else(|| {
                let base = Self::base_price(id) * CURRENT_PRICE_DISCOUNT;
                (base, base * FALLBACK_SPREAD_RATIO)
            })
    }

    fn rng_for(&self, id: &str) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed ^ fnv1a(id)),
            None => StdRng::from_entropy(),
        }
    }

    fn window_end(&self) -> NaiveDate {
        self.as_of.unwrap_or_else(|| Local::now().date_naive())
    }
}

impl Default for MockSeriesProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Stable 64-bit FNV-1a, used to derive per-company seeds.
fn fnv1a(s: &str) -> u64 {
    s.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, b| {
        (hash ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3)
    })
}

impl SeriesProvider for MockSeriesProvider {
    fn daily_prices(&self, id: &str) -> Vec<SeriesPoint> {
        let (base, spread) = Self::price_profile(id);
        let mut rng = self.rng_for(id);
        let end = self.window_end();
        let days = self.window_days as u64;

        // Dates before the calendar minimum are dropped.
        (0..days)
            .rev()
            .filter_map(|back| end.checked_sub_days(Days::new(back)))
            .map(|date| {
                let noise = if spread > 0.0 {
                    rng.gen_range(-spread..spread)
                } else {
                    0.0
                };
                SeriesPoint::new(date, base + noise)
            })
            .collect()
    }

    fn target_price_scenarios(&self, id: &str) -> TargetPriceTable {
        TargetPriceTable::from_base_price(Self::base_price(id))
    }

    fn financial_metrics(&self, id: &str) -> MetricRecord {
        METRICS
            .iter()
            .find(|(k, _)| *k == id)
            .map(|(_, values)| MetricRecord::from_values(*values))
            .unwrap_or_default()
    }

    fn news(&self, id: &str) -> Vec<NewsItem> {
        NEWS.iter()
            .filter(|(company, ..)| *company == id)
            .map(|(company, title, summary, time, source, category)| NewsItem {
                title: title.to_string(),
                summary: summary.to_string(),
                relative_time_label: time.to_string(),
                source: source.to_string(),
                category: category.to_string(),
                company_id: company.to_string(),
            })
            .collect()
    }
}
