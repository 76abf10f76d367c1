//! Rate formulas shared by every aggregate view. Each one guards its
//! denominator and returns `None` instead of `NaN` or infinity; callers
//! render `None` as the placeholder dash.

/// hits / atBats.
pub fn batting_average(hits: u32, at_bats: u32) -> Option<f64> {
    (at_bats > 0).then(|| f64::from(hits) / f64::from(at_bats))
}

/// (hits + walks + hitByPitch) / (atBats + walks + hitByPitch + sacrificeFlies).
pub fn on_base_percentage(
    hits: u32,
    walks: u32,
    hit_by_pitch: u32,
    at_bats: u32,
    sacrifice_flies: u32,
) -> Option<f64> {
    let denominator = at_bats + walks + hit_by_pitch + sacrifice_flies;
    (denominator > 0).then(|| f64::from(hits + walks + hit_by_pitch) / f64::from(denominator))
}

/// totalBases / atBats.
pub fn slugging(total_bases: u32, at_bats: u32) -> Option<f64> {
    (at_bats > 0).then(|| f64::from(total_bases) / f64::from(at_bats))
}

/// OBP + SLG, defined only when both parts are.
pub fn ops(on_base: Option<f64>, slugging: Option<f64>) -> Option<f64> {
    Some(on_base? + slugging?)
}

/// Earned runs per seven innings. League games go seven innings, so the
/// per-game and grouped tables scale by 7; the ×3 on both sides is the
/// out-count form the source publishes.
pub fn era7(earned_runs: u32, innings: f64) -> Option<f64> {
    (innings > 0.0).then(|| (f64::from(earned_runs) * 7.0 * 3.0) / (innings * 3.0))
}

/// Earned runs per nine innings. Season and career rows keep the
/// conventional nine-inning factor; the two factors are never mixed
/// within one table.
pub fn era9(earned_runs: u32, innings: f64) -> Option<f64> {
    (innings > 0.0).then(|| f64::from(earned_runs) * 9.0 / innings)
}

/// (hitsAllowed + walksAllowed) / innings.
pub fn whip(hits_allowed: u32, walks_allowed: u32, innings: f64) -> Option<f64> {
    (innings > 0.0).then(|| f64::from(hits_allowed + walks_allowed) / innings)
}

/// Strikeouts per seven innings.
pub fn strikeout_rate(strikeouts: u32, innings: f64) -> Option<f64> {
    (innings > 0.0).then(|| f64::from(strikeouts) * 7.0 / innings)
}

/// strikeouts / walksAllowed.
pub fn strikeouts_per_walk(strikeouts: u32, walks_allowed: u32) -> Option<f64> {
    (walks_allowed > 0).then(|| f64::from(strikeouts) / f64::from(walks_allowed))
}

/// wins / (wins + losses); draws do not count as decisions.
pub fn winning_percentage(wins: u32, losses: u32) -> Option<f64> {
    (wins + losses > 0).then(|| f64::from(wins) / f64::from(wins + losses))
}

/// Round half away from zero at `digits` decimal places. The career
/// synthesis stores its ERA and WHIP pre-rounded, and batting-average
/// leaderboards compare at four digits.
pub fn round_to(value: f64, digits: u32) -> f64 {
    let mult = 10.0_f64.powi(digits as i32);
    (value * mult).round() / mult
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn zero_denominators() {
        assert_eq!(batting_average(0, 0), None);
        assert_eq!(on_base_percentage(0, 0, 0, 0, 0), None);
        assert_eq!(slugging(0, 0), None);
        assert_eq!(ops(None, Some(0.4)), None);
        assert_eq!(era7(5, 0.0), None);
        assert_eq!(era9(5, 0.0), None);
        assert_eq!(whip(3, 2, 0.0), None);
        assert_eq!(strikeout_rate(9, 0.0), None);
        assert_eq!(strikeouts_per_walk(9, 0), None);
        assert_eq!(winning_percentage(0, 0), None);
    }

    #[test]
    fn batting() {
        assert_approx_eq!(f64, batting_average(3, 12).unwrap(), 0.25);
        assert_approx_eq!(
            f64,
            on_base_percentage(256, 70, 10, 597, 5).unwrap(),
            336.0 / 682.0
        );
        assert_approx_eq!(f64, slugging(300, 488).unwrap(), 300.0 / 488.0);
        assert_approx_eq!(
            f64,
            ops(Some(0.429), Some(0.615)).unwrap(),
            1.044,
            epsilon = 1e-9
        );
    }

    #[test]
    fn era_factors_diverge() {
        // the two conventions agree only when there is nothing to scale
        assert_approx_eq!(f64, era7(7, 7.0).unwrap(), 7.0);
        assert_approx_eq!(f64, era9(7, 7.0).unwrap(), 9.0);
        assert_approx_eq!(f64, era7(7, 3.5).unwrap(), 14.0);
        assert_approx_eq!(f64, era9(7, 3.5).unwrap(), 18.0);
        assert_eq!(era7(0, 5.0), Some(0.0));
    }

    #[test]
    fn pitching() {
        assert_approx_eq!(f64, whip(5, 3, 6.66667).unwrap(), 8.0 / 6.66667);
        assert_approx_eq!(f64, strikeout_rate(9, 7.0).unwrap(), 9.0);
        assert_approx_eq!(f64, strikeouts_per_walk(9, 4).unwrap(), 2.25);
        assert_approx_eq!(f64, winning_percentage(3, 2).unwrap(), 0.6);
        assert_eq!(winning_percentage(0, 4), Some(0.0));
    }

    #[test]
    fn rounding() {
        assert_approx_eq!(f64, round_to(2.449, 2), 2.45);
        assert_approx_eq!(f64, round_to(0.3456789, 4), 0.3457);
        assert_approx_eq!(f64, round_to(1.0 / 3.0, 3), 0.333);
    }
}
