//! Element types storable in an [`Array`](super::Array)

use std::fmt::Debug;

/// A numeric (or boolean) element value
///
/// Ordering comes from [`PartialOrd`]; reconstruction and labeling only ever
/// compare values, never do arithmetic on them. `MIN_VALUE` and `MAX_VALUE`
/// bound the representable range and are used to build neutral markers
/// (for example the "everything full" marker of hole filling).
pub trait Sample: Copy + PartialOrd + Default + Debug + Send + Sync + 'static {
    /// Smallest representable value
    const MIN_VALUE: Self;
    /// Largest representable value
    const MAX_VALUE: Self;

    /// The larger of two values (`a` on ties or unordered values)
    #[inline]
    fn max_of(a: Self, b: Self) -> Self {
        if b > a { b } else { a }
    }

    /// The smaller of two values (`a` on ties or unordered values)
    #[inline]
    fn min_of(a: Self, b: Self) -> Self {
        if b < a { b } else { a }
    }

    /// Whether the value differs from the type's zero/false value
    #[inline]
    fn is_foreground(self) -> bool {
        self != Self::default()
    }
}

macro_rules! impl_sample {
    ($($t:ty => $min:expr, $max:expr);* $(;)?) => {
        $(
            impl Sample for $t {
                const MIN_VALUE: Self = $min;
                const MAX_VALUE: Self = $max;
            }
        )*
    };
}

impl_sample! {
    bool => false, true;
    u8 => u8::MIN, u8::MAX;
    u16 => u16::MIN, u16::MAX;
    u32 => u32::MIN, u32::MAX;
    i32 => i32::MIN, i32::MAX;
    f32 => f32::MIN, f32::MAX;
    f64 => f64::MIN, f64::MAX;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_ordering() {
        assert!(bool::max_of(false, true));
        assert!(!bool::min_of(false, true));
        assert!(true.is_foreground());
        assert!(!false.is_foreground());
    }

    #[test]
    fn test_numeric_extremes() {
        assert_eq!(u8::max_of(3, 7), 7);
        assert_eq!(i32::min_of(-3, 7), -3);
        assert_eq!(f32::max_of(0.5, -1.0), 0.5);
        assert_eq!(<u16 as Sample>::MAX_VALUE, 65535);
    }
}
