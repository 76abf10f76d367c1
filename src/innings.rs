//! Innings pitched travel through the data source as text like `3回1/3`
//! (three and a third innings). Thirds are widened to the upstream
//! five-digit decimals rather than exact fractions, so sums and rate
//! denominators reproduce the published numbers digit for digit.

use crate::percentage::PLACEHOLDER;

const ONE_THIRD: f64 = 0.33333;
const TWO_THIRDS: f64 = 0.66667;

/// Parses `N回F/3` text into decimal innings. Returns `None` when the
/// text is missing or not in the recorded format.
pub fn parse_innings(text: Option<&str>) -> Option<f64> {
    let (whole, frac) = text?.split_once('回')?;
    let whole: u32 = whole.trim().parse().ok()?;
    let frac = match frac.trim() {
        "" | "0" | "0/3" => 0.0,
        "1" | "1/3" => ONE_THIRD,
        "2" | "2/3" => TWO_THIRDS,
        _ => return None,
    };
    Some(f64::from(whole) + frac)
}

/// Renders decimal innings back to `N回F/3`. Zero or unusable totals
/// render as the placeholder dash.
pub fn format_innings(innings: f64) -> String {
    if !innings.is_finite() || innings == 0.0 {
        return PLACEHOLDER.into();
    }
    let mut whole = innings.floor() as u32;
    let frac = innings - innings.floor();
    // Sums of widened thirds drift: eighteen 1/3 stints come to 5.99994,
    // not 6. Snap to the nearest third, carrying a full inning if needed.
    let thirds = if frac < 0.01 {
        0
    } else if (frac - ONE_THIRD).abs() < 0.01 {
        1
    } else if (frac - TWO_THIRDS).abs() < 0.01 {
        2
    } else if frac > 0.99 {
        whole += 1;
        0
    } else {
        0
    };
    format!("{}回{}/3", whole, thirds)
}
