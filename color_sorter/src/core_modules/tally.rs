use crate::core_modules::color::ColorLabel;
use std::fmt;

/// Running count of matched detections, one slot per `ColorLabel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortTally {
    counts: [u64; ColorLabel::ALL.len()],
}

impl SortTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, label: ColorLabel) {
        self.counts[label.index()] += 1;
    }

    pub fn count(&self, label: ColorLabel) -> u64 {
        self.counts[label.index()]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ColorLabel, u64)> + '_ {
        ColorLabel::ALL.into_iter().map(|label| (label, self.count(label)))
    }
}

impl fmt::Display for SortTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (label, count)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{label}: {count}")?;
        }
        f.write_str("}")
    }
}
