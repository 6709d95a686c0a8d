//! Headings and summary lines shown above each view.

use crate::domain::aggregation::DashboardView;

pub fn view_title(view: DashboardView) -> &'static str {
    match view {
        DashboardView::Daily => "일별 주식 차트",
        DashboardView::Target => "적정주가 분석",
        DashboardView::Metrics => "재무지표 비교 분석",
        DashboardView::News => "기업 뉴스",
        DashboardView::All => "기업 분석 대시보드",
    }
}

/// Daily chart heading with the length of its price window.
pub fn daily_title(window_days: usize) -> String {
    format!("{} (최근 {window_days}일)", view_title(DashboardView::Daily))
}

/// Shown in place of a view when nothing is selected.
pub fn empty_prompt(view: DashboardView) -> &'static str {
    match view {
        DashboardView::News => "뉴스를 확인할 기업을 선택해주세요.",
        DashboardView::Target => "기업을 선택해주세요",
        _ => "분석할 기업을 선택해주세요.",
    }
}

pub fn selected_summary(count: usize) -> String {
    format!("선택된 기업 ({count}개)")
}

pub fn target_summary(count: usize) -> String {
    format!("선택된 {count}개 기업의 시나리오별 적정주가 분석")
}

pub fn news_summary(count: usize) -> String {
    format!("기업 뉴스 ({count}건)")
}
