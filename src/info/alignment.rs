// Thu Feb 12 2026 - Alex

use crate::utils::MathUtils;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Alignment {
    value: usize,
}

impl Alignment {
    pub const BYTE: Alignment = Alignment { value: 1 };

    pub fn new(value: usize) -> Self {
        assert!(value > 0 && value.is_power_of_two());
        Self { value }
    }

    pub fn as_usize(&self) -> usize {
        self.value
    }

    pub fn align_up(&self, value: usize) -> usize {
        MathUtils::align_up(value, self.value)
    }

    pub fn is_aligned(&self, value: usize) -> bool {
        MathUtils::is_aligned(value, self.value)
    }

    pub fn max(self, other: Self) -> Self {
        if other.value > self.value {
            other
        } else {
            self
        }
    }
}

impl Default for Alignment {
    fn default() -> Self {
        Self::BYTE
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_up() {
        let a = Alignment::new(8);
        assert_eq!(a.align_up(1), 8);
        assert_eq!(a.align_up(8), 8);
        assert!(a.is_aligned(16));
        assert!(!a.is_aligned(12));
    }

    #[test]
    fn test_max() {
        assert_eq!(Alignment::new(4).max(Alignment::new(8)), Alignment::new(8));
        assert_eq!(Alignment::new(8).max(Alignment::new(2)), Alignment::new(8));
    }

    #[test]
    #[should_panic]
    fn test_non_power_of_two_rejected() {
        Alignment::new(6);
    }
}
