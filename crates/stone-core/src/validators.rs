//! Value constraints attached to API fields.
//!
//! Generated constructors run these before a value is accepted; the
//! `deserialize_with` serializer variants run them on decoded data and report
//! violations as malformed wire data.

use crate::error::StoneError;
use crate::serializers::WireNumber;
use regex::Regex;

/// Length and pattern constraints on a string. Lengths count characters.
#[derive(Debug, Clone, Default)]
pub struct StringValidator {
    min_length: Option<usize>,
    max_length: Option<usize>,
    pattern: Option<Regex>,
}

impl StringValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// The pattern must match the whole string.
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self, StoneError> {
        let anchored = format!(r"\A(?:{})\z", pattern);
        let compiled = Regex::new(&anchored)
            .map_err(|e| StoneError::Config(format!("Invalid pattern '{}': {}", pattern, e)))?;
        self.pattern = Some(compiled);
        Ok(self)
    }

    pub fn validate(&self, value: &str) -> Result<(), StoneError> {
        let length = value.chars().count();
        if let Some(max) = self.max_length {
            if length > max {
                return Err(StoneError::Validation(format!(
                    "'{}' has more than {} characters",
                    value, max
                )));
            }
        }
        if let Some(min) = self.min_length {
            if length < min {
                return Err(StoneError::Validation(format!(
                    "'{}' has fewer than {} characters",
                    value, min
                )));
            }
        }
        if let Some(ref pattern) = self.pattern {
            if !pattern.is_match(value) {
                return Err(StoneError::Validation(format!(
                    "'{}' did not match pattern '{}'",
                    value,
                    pattern.as_str()
                )));
            }
        }
        Ok(())
    }
}

/// Bounds on a number, tighter than the range of its type
#[derive(Debug, Clone, Copy)]
pub struct NumericValidator<N> {
    min_value: Option<N>,
    max_value: Option<N>,
}

impl<N> Default for NumericValidator<N> {
    fn default() -> Self {
        Self {
            min_value: None,
            max_value: None,
        }
    }
}

impl<N: WireNumber> NumericValidator<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_value(mut self, min_value: N) -> Self {
        self.min_value = Some(min_value);
        self
    }

    pub fn with_max_value(mut self, max_value: N) -> Self {
        self.max_value = Some(max_value);
        self
    }

    pub fn validate(&self, value: N) -> Result<(), StoneError> {
        if let Some(min) = self.min_value {
            if value < min {
                return Err(StoneError::Validation(format!("{} is less than {}", value, min)));
            }
        }
        if let Some(max) = self.max_value {
            if value > max {
                return Err(StoneError::Validation(format!("{} is greater than {}", value, max)));
            }
        }
        Ok(())
    }
}

/// Item-count constraints on a list
#[derive(Debug, Clone, Copy, Default)]
pub struct ListValidator {
    min_items: Option<usize>,
    max_items: Option<usize>,
}

impl ListValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_items(mut self, min_items: usize) -> Self {
        self.min_items = Some(min_items);
        self
    }

    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = Some(max_items);
        self
    }

    pub fn validate<T>(&self, items: &[T]) -> Result<(), StoneError> {
        if let Some(max) = self.max_items {
            if items.len() > max {
                return Err(StoneError::Validation(format!("list has more than {} items", max)));
            }
        }
        if let Some(min) = self.min_items {
            if items.len() < min {
                return Err(StoneError::Validation(format!("list has fewer than {} items", min)));
            }
        }
        Ok(())
    }

    /// Check the count, then every item with `item`
    pub fn validate_each<T, F>(&self, items: &[T], item: F) -> Result<(), StoneError>
    where
        F: Fn(&T) -> Result<(), StoneError>,
    {
        self.validate(items)?;
        for (index, value) in items.iter().enumerate() {
            item(value).map_err(|err| match err {
                StoneError::Validation(reason) => {
                    StoneError::Validation(format!("item {}: {}", index, reason))
                }
                other => other,
            })?;
        }
        Ok(())
    }
}

/// Skip validation for absent values
pub fn nullable<T: ?Sized, F>(value: Option<&T>, validate: F) -> Result<(), StoneError>
where
    F: FnOnce(&T) -> Result<(), StoneError>,
{
    match value {
        Some(value) => validate(value),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_lengths() {
        let validator = StringValidator::new().with_min_length(1).with_max_length(4);
        assert!(validator.validate("a").is_ok());
        assert!(validator.validate("ünï✓").is_ok());
        assert!(matches!(validator.validate(""), Err(StoneError::Validation(_))));
        assert!(matches!(validator.validate("abcde"), Err(StoneError::Validation(_))));
    }

    #[test]
    fn test_string_pattern_matches_whole_value() {
        let validator = StringValidator::new().with_pattern(r"/.*|id:.*").unwrap();
        assert!(validator.validate("/Homework/math").is_ok());
        assert!(validator.validate("id:abc").is_ok());
        assert!(validator.validate("Homework/math").is_err());

        let digits = StringValidator::new().with_pattern(r"[0-9]+").unwrap();
        assert!(digits.validate("123").is_ok());
        assert!(digits.validate("123abc").is_err());
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(
            StringValidator::new().with_pattern("(unclosed"),
            Err(StoneError::Config(_))
        ));
    }

    #[test]
    fn test_numeric_bounds() {
        let validator = NumericValidator::new().with_min_value(-1i64).with_max_value(1);
        assert!(validator.validate(0).is_ok());
        assert!(validator.validate(-2).is_err());
        assert!(validator.validate(2).is_err());

        let open: NumericValidator<f64> = NumericValidator::new();
        assert!(open.validate(f64::MAX).is_ok());
    }

    #[test]
    fn test_list_items() {
        let validator = ListValidator::new().with_min_items(1).with_max_items(2);
        assert!(validator.validate(&[1]).is_ok());
        assert!(validator.validate::<i32>(&[]).is_err());
        assert!(validator.validate(&[1, 2, 3]).is_err());

        let names = StringValidator::new().with_max_length(2);
        let items = vec!["ab".to_string(), "abc".to_string()];
        let err = validator.validate_each(&items, |s| names.validate(s)).unwrap_err();
        assert!(err.to_string().contains("item 1"));
    }

    #[test]
    fn test_nullable() {
        let validator = StringValidator::new().with_min_length(2);
        assert!(nullable(None, |s: &str| validator.validate(s)).is_ok());
        assert!(nullable(Some("a"), |s: &str| validator.validate(s)).is_err());
    }
}
