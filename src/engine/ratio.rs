use crate::config::{OpenPrice, PriceLike};
use crate::domain::PriceSeries;

/// Target open / reference open. Undefined unless both opens are strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OpenRatio {
    Defined(f64),
    Undefined,
}

impl OpenRatio {
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Defined(r) => Some(r),
            Self::Undefined => None,
        }
    }
}

impl std::fmt::Display for OpenRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Defined(r) => write!(f, "{:.4}", r),
            Self::Undefined => write!(f, "n/a"),
        }
    }
}

/// Open of the most recent bar, if any.
#[inline]
pub fn latest_open(series: &PriceSeries) -> Option<OpenPrice> {
    series.latest_open()
}

pub fn open_ratio(reference_open: Option<OpenPrice>, target_open: Option<OpenPrice>) -> OpenRatio {
    match (reference_open, target_open) {
        (Some(reference), Some(target)) if reference.is_positive() && target.is_positive() => {
            let ratio = target / reference;
            if ratio.is_finite() {
                OpenRatio::Defined(ratio)
            } else {
                OpenRatio::Undefined
            }
        }
        _ => OpenRatio::Undefined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Bar;

    fn series(opens: &[f64]) -> PriceSeries {
        let bars = opens
            .iter()
            .enumerate()
            .map(|(i, &o)| Bar::flat(i as i64 * 60_000, o))
            .collect();
        PriceSeries::from_bars("X", 60_000, bars)
    }

    #[test]
    fn latest_open_reads_last_bar() {
        assert_eq!(latest_open(&series(&[1.0, 2.0, 3.0])).unwrap().value(), 3.0);
        assert!(latest_open(&series(&[])).is_none());
    }

    #[test]
    fn ratio_of_positive_opens() {
        let ratio = open_ratio(Some(OpenPrice::new(500.0)), Some(OpenPrice::new(5750.0)));
        assert_eq!(ratio, OpenRatio::Defined(11.5));
    }

    #[test]
    fn ratio_undefined_without_both_opens() {
        assert_eq!(open_ratio(None, Some(OpenPrice::new(1.0))), OpenRatio::Undefined);
        assert_eq!(open_ratio(Some(OpenPrice::new(1.0)), None), OpenRatio::Undefined);
        assert_eq!(
            open_ratio(Some(OpenPrice::new(0.0)), Some(OpenPrice::new(1.0))),
            OpenRatio::Undefined
        );
        assert_eq!(OpenRatio::Undefined.to_string(), "n/a");
    }
}
