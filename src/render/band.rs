use serde::{Deserialize, Serialize};

/// Style bin of a bucket's availability percentage, in steps of 25.
///
/// `Empty` marks overbooked buckets (negative availability); `Full` is kept
/// for bins above 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AvailabilityBand {
    Empty,
    Bin(u8),
    Full,
}

impl AvailabilityBand {
    #[must_use]
    pub fn classify(availability_pct: f64) -> Self {
        if !availability_pct.is_finite() {
            return Self::Empty;
        }
        let bin = (availability_pct / 25.0).floor() * 25.0;
        if bin > 100.0 {
            Self::Full
        } else if bin < 0.0 {
            Self::Empty
        } else {
            Self::Bin(bin as u8)
        }
    }

    /// Stable style key, e.g. `workload_50`.
    #[must_use]
    pub fn css_key(self) -> String {
        match self {
            Self::Empty => "workload_empty".to_owned(),
            Self::Bin(bin) => format!("workload_{bin}"),
            Self::Full => "workload_full".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AvailabilityBand;

    #[test]
    fn bins_floor_to_quarters() {
        assert_eq!(AvailabilityBand::classify(100.0), AvailabilityBand::Bin(100));
        assert_eq!(AvailabilityBand::classify(66.7), AvailabilityBand::Bin(50));
        assert_eq!(AvailabilityBand::classify(0.0), AvailabilityBand::Bin(0));
        assert_eq!(AvailabilityBand::classify(-0.5), AvailabilityBand::Empty);
        assert_eq!(AvailabilityBand::classify(125.0), AvailabilityBand::Full);
        assert_eq!(AvailabilityBand::Bin(25).css_key(), "workload_25");
    }
}
