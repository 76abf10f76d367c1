use std::fmt::{self, Display};

/// Cell text for stats that do not exist yet (no at-bats, no decisions,
/// no innings). Everything that renders a missing number uses this dash.
pub const PLACEHOLDER: &str = "—";

/// Batting-average style rate: rounds to `PRECISION` digits and drops the
/// leading zero below 1, so .429 renders as `.429` and an OPS-like value
/// renders as `1.044`. `None` renders as the placeholder dash.
#[derive(Debug, Clone, Copy)]
pub struct Pct<const PRECISION: u8>(pub Option<f64>);

impl<const PRECISION: u8> Display for Pct<PRECISION> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) if value.is_finite() => {
                let mult_f = 10.0_f64.powi(PRECISION.into());
                let mult_i = 10_u64.pow(PRECISION.into());
                let frac = (value * mult_f).round() as u64;
                if PRECISION < 3 || frac >= mult_i {
                    write!(f, "{}", frac / mult_i)?;
                }
                write!(f, ".{:0>width$}", frac % mult_i, width = PRECISION.into())
            }
            _ => f.write_str(PLACEHOLDER),
        }
    }
}

/// ERA/WHIP style rate: plain fixed-point with the leading zero kept,
/// `2.45` or `0.733`. `None` renders as the placeholder dash.
#[derive(Debug, Clone, Copy)]
pub struct Fixed<const PRECISION: u8>(pub Option<f64>);

impl<const PRECISION: u8> Display for Fixed<PRECISION> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) if value.is_finite() => {
                let mult_f = 10.0_f64.powi(PRECISION.into());
                let mult_i = 10_u64.pow(PRECISION.into());
                let frac = (value * mult_f).round() as u64;
                write!(
                    f,
                    "{}.{:0>width$}",
                    frac / mult_i,
                    frac % mult_i,
                    width = PRECISION.into()
                )
            }
            _ => f.write_str(PLACEHOLDER),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Fixed, Pct};

    #[test]
    fn pct() {
        assert_eq!(Pct::<3>(Some(256.0 / 597.0)).to_string(), ".429");
        assert_eq!(Pct::<3>(Some(0.0)).to_string(), ".000");
        assert_eq!(Pct::<3>(Some(1.0)).to_string(), "1.000");
        assert_eq!(Pct::<3>(Some(1.0446)).to_string(), "1.045");
        assert_eq!(Pct::<3>(None).to_string(), "—");
        assert_eq!(Pct::<3>(Some(f64::NAN)).to_string(), "—");
    }

    #[test]
    fn fixed() {
        assert_eq!(Fixed::<2>(Some(22.0 * 9.0 / 80.66666)).to_string(), "2.45");
        assert_eq!(Fixed::<2>(Some(10.5)).to_string(), "10.50");
        assert_eq!(Fixed::<2>(Some(0.0)).to_string(), "0.00");
        assert_eq!(Fixed::<3>(Some(0.7334)).to_string(), "0.733");
        assert_eq!(Fixed::<3>(None).to_string(), "—");
        assert_eq!(Fixed::<2>(Some(f64::INFINITY)).to_string(), "—");
    }
}
