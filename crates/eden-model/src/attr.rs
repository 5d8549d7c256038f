//! Attribute values carried by source features.

use std::fmt;

/// A single value from an external source's attribute table.
///
/// Missing and null fields are an explicit [`AttrValue::Null`] variant;
/// reading an absent attribute never silently coerces to a default.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Text(String),
    Number(f64),
    Null,
}

impl AttrValue {
    pub fn is_null(&self) -> bool {
        matches!(self, AttrValue::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Render the value for code normalization. `Null` yields the empty
    /// string, which never matches a wanted code.
    pub fn to_code_string(&self) -> String {
        match self {
            AttrValue::Text(text) => text.clone(),
            AttrValue::Number(value) => {
                if value.fract() == 0.0 && value.is_finite() {
                    format!("{}", *value as i64)
                } else {
                    value.to_string()
                }
            }
            AttrValue::Null => String::new(),
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Text(text) => f.write_str(text),
            AttrValue::Number(value) => write!(f, "{value}"),
            AttrValue::Null => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_numbers_render_without_fraction() {
        assert_eq!(AttrValue::Number(7.0).to_code_string(), "7");
        assert_eq!(AttrValue::Number(7.5).to_code_string(), "7.5");
    }

    #[test]
    fn null_renders_empty() {
        assert_eq!(AttrValue::Null.to_code_string(), "");
        assert!(AttrValue::Null.is_null());
    }
}
