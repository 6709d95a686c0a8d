//! Colour assignment for company series and news category badges.

/// Company series colours, assigned by selection position.
pub const COMPANY_PALETTE: [&str; 10] = [
    "#3b82f6", "#ef4444", "#10b981", "#f59e0b", "#8b5cf6", "#ec4899", "#06b6d4", "#84cc16",
    "#f97316", "#6366f1",
];

pub fn color_index(position: usize) -> usize {
    position % COMPANY_PALETTE.len()
}

pub fn color_for_position(position: usize) -> &'static str {
    COMPANY_PALETTE[color_index(position)]
}

pub const DEFAULT_CATEGORY_COLOR: &str = "gray";

/// Badge colour for a news category.
pub fn category_color(category: &str) -> &'static str {
    match category {
        "실적" => "blue",
        "투자" => "green",
        "제품" => "purple",
        "기술" => "orange",
        "서비스" => "cyan",
        "사업" => "gray",
        "금융" => "yellow",
        "판매" => "pink",
        _ => DEFAULT_CATEGORY_COLOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_index_wraps() {
        assert_eq!(color_index(0), 0);
        assert_eq!(color_index(9), 9);
        assert_eq!(color_index(10), 0);
        assert_eq!(color_index(23), 3);
    }

    #[test]
    fn color_for_position_matches_palette() {
        assert_eq!(color_for_position(1), "#ef4444");
        assert_eq!(color_for_position(11), "#ef4444");
    }

    #[test]
    fn category_color_known_and_default() {
        assert_eq!(category_color("실적"), "blue");
        assert_eq!(category_color("판매"), "pink");
        assert_eq!(category_color("공시"), DEFAULT_CATEGORY_COLOR);
    }
}
