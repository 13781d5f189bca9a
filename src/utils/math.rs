// Thu Feb 12 2026 - Alex

pub struct MathUtils;

impl MathUtils {
    pub fn align_up(value: usize, alignment: usize) -> usize {
        if alignment <= 1 {
            return value;
        }
        (value + alignment - 1) & !(alignment - 1)
    }

    pub fn align_down(value: usize, alignment: usize) -> usize {
        if alignment <= 1 {
            return value;
        }
        value & !(alignment - 1)
    }

    pub fn is_aligned(value: usize, alignment: usize) -> bool {
        if alignment <= 1 {
            return true;
        }
        (value & (alignment - 1)) == 0
    }

    pub fn is_power_of_two(n: usize) -> bool {
        n != 0 && (n & (n - 1)) == 0
    }

    pub fn padding_for(value: usize, alignment: usize) -> usize {
        Self::align_up(value, alignment) - value
    }
}
