//! Numeric element types accepted by `PointSet` construction

/// A numeric value that can be coerced to the f32 working precision.
pub trait Scalar: Copy {
    fn to_f32(self) -> f32;
}

macro_rules! impl_scalar {
    ($($t:ty),* $(,)?) => {
        $(
            impl Scalar for $t {
                #[inline]
                fn to_f32(self) -> f32 {
                    self as f32
                }
            }
        )*
    };
}

impl_scalar!(f32, f64, i8, i16, i32, i64, u8, u16, u32, u64, usize);
