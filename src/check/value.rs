// src/check/value.rs
use std::fmt;

/// What a check's work hands back when it does not fail outright.
///
/// `Bool(false)` is the work's own way of saying "unhealthy"; `Nil` passes
/// but has nothing to report.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckValue {
    Nil,
    Bool(bool),
    Text(String),
}

impl CheckValue {
    pub fn is_truthy(&self) -> bool {
        !matches!(self, CheckValue::Nil | CheckValue::Bool(false))
    }

    /// Stringified form for the status document, `None` when falsy.
    pub fn render(&self) -> Option<String> {
        if self.is_truthy() {
            Some(self.to_string())
        } else {
            None
        }
    }
}

impl fmt::Display for CheckValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckValue::Nil => Ok(()),
            CheckValue::Bool(b) => write!(f, "{}", b),
            CheckValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<()> for CheckValue {
    fn from(_: ()) -> Self {
        CheckValue::Nil
    }
}

impl From<bool> for CheckValue {
    fn from(b: bool) -> Self {
        CheckValue::Bool(b)
    }
}

impl From<&str> for CheckValue {
    fn from(s: &str) -> Self {
        CheckValue::Text(s.to_string())
    }
}

impl From<String> for CheckValue {
    fn from(s: String) -> Self {
        CheckValue::Text(s)
    }
}

impl<T: Into<CheckValue>> From<Option<T>> for CheckValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CheckValue::Nil)
    }
}

macro_rules! numeric_check_value {
    ($($t:ty),*) => {
        $(
            impl From<$t> for CheckValue {
                fn from(n: $t) -> Self {
                    CheckValue::Text(n.to_string())
                }
            }
        )*
    };
}

numeric_check_value!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(CheckValue::from("up").is_truthy());
        assert!(CheckValue::from(true).is_truthy());
        assert!(CheckValue::from(0u32).is_truthy());
        assert!(!CheckValue::from(false).is_truthy());
        assert!(!CheckValue::from(()).is_truthy());
        assert!(!CheckValue::from(None::<String>).is_truthy());
    }

    #[test]
    fn test_render() {
        assert_eq!(CheckValue::from("up").render().as_deref(), Some("up"));
        assert_eq!(CheckValue::from(true).render().as_deref(), Some("true"));
        assert_eq!(CheckValue::from(42i64).render().as_deref(), Some("42"));
        assert_eq!(CheckValue::Nil.render(), None);
        assert_eq!(CheckValue::Bool(false).render(), None);
    }
}
