use crate::error::StoneError;
use crate::validators::NumericValidator;
use crate::wire::{WireNode, WireNumberValue};

mod sealed {
    pub trait Sealed {}

    impl Sealed for i32 {}
    impl Sealed for u32 {}
    impl Sealed for i64 {}
    impl Sealed for u64 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// Native numeric types with a wire representation.
///
/// Integer widths follow the API's `Int32`/`UInt32`/`Int64`/`UInt64`
/// primitives, floats its `Float32`/`Float64`.
pub trait WireNumber: Copy + PartialOrd + std::fmt::Display + sealed::Sealed {
    /// Type name used in error messages
    const NAME: &'static str;

    /// `None` when the value has no wire form (NaN, infinities)
    fn to_wire(self) -> Option<WireNumberValue>;

    fn from_wire(number: &WireNumberValue) -> Result<Self, String>;
}

macro_rules! impl_wire_integer {
    ($ty:ty, $name:literal, $as_wide:ident) => {
        impl WireNumber for $ty {
            const NAME: &'static str = $name;

            fn to_wire(self) -> Option<WireNumberValue> {
                Some(WireNumberValue::from(self))
            }

            fn from_wire(number: &WireNumberValue) -> Result<Self, String> {
                if number.is_f64() {
                    return Err(format!("{} is not a valid {}", number, $name));
                }
                number
                    .$as_wide()
                    .and_then(|wide| <$ty>::try_from(wide).ok())
                    .ok_or_else(|| {
                        format!(
                            "{} is not within range [{}, {}]",
                            number,
                            <$ty>::MIN,
                            <$ty>::MAX
                        )
                    })
            }
        }
    };
}

impl_wire_integer!(i32, "int32", as_i64);
impl_wire_integer!(u32, "uint32", as_u64);
impl_wire_integer!(i64, "int64", as_i64);
impl_wire_integer!(u64, "uint64", as_u64);

impl WireNumber for f64 {
    const NAME: &'static str = "float64";

    fn to_wire(self) -> Option<WireNumberValue> {
        WireNumberValue::from_f64(self)
    }

    fn from_wire(number: &WireNumberValue) -> Result<Self, String> {
        number
            .as_f64()
            .ok_or_else(|| format!("{} is not a valid float64", number))
    }
}

impl WireNumber for f32 {
    const NAME: &'static str = "float32";

    fn to_wire(self) -> Option<WireNumberValue> {
        WireNumberValue::from_f64(f64::from(self))
    }

    fn from_wire(number: &WireNumberValue) -> Result<Self, String> {
        let wide = number
            .as_f64()
            .ok_or_else(|| format!("{} is not a valid float32", number))?;
        if wide.abs() > f64::from(f32::MAX) {
            return Err(format!("{} is outside the float32 range", number));
        }
        Ok(wide as f32)
    }
}

/// Identity serializer over the numeric domain
pub struct NumberSerializer;

impl NumberSerializer {
    /// Integers are carried exactly; floats pass through unrounded.
    ///
    /// NaN and infinities cannot be represented and are written as `null`.
    pub fn serialize<N: WireNumber>(value: N) -> WireNode {
        match value.to_wire() {
            Some(number) => WireNode::Number(number),
            None => {
                tracing::warn!("{} value {} has no wire form, writing null", N::NAME, value);
                WireNode::Null
            }
        }
    }

    /// Rejects non-numbers (including numeric strings), fractional values for
    /// integer types, and values outside the target width.
    pub fn deserialize<N: WireNumber>(node: &WireNode) -> Result<N, StoneError> {
        match node {
            WireNode::Number(number) => N::from_wire(number).map_err(StoneError::malformed),
            other => Err(StoneError::unexpected_kind(N::NAME, other)),
        }
    }

    /// Deserialize, then check the value against `validator`
    pub fn deserialize_with<N: WireNumber>(
        node: &WireNode,
        validator: &NumericValidator<N>,
    ) -> Result<N, StoneError> {
        let value = Self::deserialize(node)?;
        validator.validate(value).map_err(StoneError::into_malformed)?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer_round_trip() {
        for value in [i64::MIN, -1, 0, 1, 9_007_199_254_740_993, i64::MAX] {
            let node = NumberSerializer::serialize(value);
            assert_eq!(NumberSerializer::deserialize::<i64>(&node).unwrap(), value);
        }
        for value in [0u64, u64::MAX] {
            let node = NumberSerializer::serialize(value);
            assert_eq!(NumberSerializer::deserialize::<u64>(&node).unwrap(), value);
        }
        for value in [i32::MIN, i32::MAX] {
            let node = NumberSerializer::serialize(value);
            assert_eq!(NumberSerializer::deserialize::<i32>(&node).unwrap(), value);
        }
        assert_eq!(NumberSerializer::deserialize::<u32>(&json!(u32::MAX)).unwrap(), u32::MAX);
    }

    #[test]
    fn test_float_round_trip() {
        for value in [0.0f64, -0.5, 0.1, 1e300, f64::MIN_POSITIVE, f64::MAX] {
            let node = NumberSerializer::serialize(value);
            assert_eq!(NumberSerializer::deserialize::<f64>(&node).unwrap(), value);
        }
        for value in [0.1f32, -3.25, f32::MAX] {
            let node = NumberSerializer::serialize(value);
            assert_eq!(NumberSerializer::deserialize::<f32>(&node).unwrap(), value);
        }
    }

    #[test]
    fn test_float_accepts_integers() {
        assert_eq!(NumberSerializer::deserialize::<f64>(&json!(3)).unwrap(), 3.0);
    }

    #[test]
    fn test_rejects_non_numeric() {
        for node in [json!("abc"), json!("42"), json!(true), json!(null), json!([1])] {
            let err = NumberSerializer::deserialize::<i64>(&node).unwrap_err();
            assert!(err.is_malformed(), "{node} should be rejected");
        }
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(NumberSerializer::deserialize::<i32>(&json!(2_147_483_648i64)).is_err());
        assert!(NumberSerializer::deserialize::<u32>(&json!(-1)).is_err());
        assert!(NumberSerializer::deserialize::<u64>(&json!(-1)).is_err());
        assert!(NumberSerializer::deserialize::<i64>(&json!(u64::MAX)).is_err());
        assert!(NumberSerializer::deserialize::<f32>(&json!(1e300)).is_err());
    }

    #[test]
    fn test_rejects_fraction_for_integers() {
        let err = NumberSerializer::deserialize::<i64>(&json!(1.5)).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_non_finite_serializes_to_null() {
        assert_eq!(NumberSerializer::serialize(f64::NAN), json!(null));
        assert_eq!(NumberSerializer::serialize(f32::INFINITY), json!(null));
    }

    #[test]
    fn test_deserialize_with_validator() {
        let validator = NumericValidator::new().with_min_value(1u32).with_max_value(10);
        assert_eq!(NumberSerializer::deserialize_with(&json!(10), &validator).unwrap(), 10u32);
        let err = NumberSerializer::deserialize_with(&json!(11), &validator).unwrap_err();
        assert!(err.is_malformed());
    }
}
