use serde::{Deserialize, Serialize};

/// One untrusted cell of an upstream market table.
///
/// Providers deliver prices as JSON numbers, but exports and scraped
/// tables routinely carry strings ("100", "bad", "") or nulls. The cell
/// keeps whatever arrived; [`RawCell::to_numeric`] applies the coercion
/// policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum RawCell {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl RawCell {
    /// Coerce the cell to a number.
    ///
    /// A cell that cannot be read as a finite number is missing, never an
    /// error — mirroring a lenient `to_numeric(errors="coerce")` pass.
    pub fn to_numeric(&self) -> Option<f64> {
        match self {
            Self::Number(value) if value.is_finite() => Some(*value),
            Self::Number(_) => None,
            Self::Text(text) => text.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            Self::Missing => None,
        }
    }

    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl From<f64> for RawCell {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RawCell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<Option<f64>> for RawCell {
    fn from(value: Option<f64>) -> Self {
        value.map(Self::Number).unwrap_or(Self::Missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_pass_through() {
        assert_eq!(RawCell::Number(101.5).to_numeric(), Some(101.5));
    }

    #[test]
    fn parseable_text_coerces() {
        assert_eq!(RawCell::from(" 100 ").to_numeric(), Some(100.0));
    }

    #[test]
    fn unparseable_text_becomes_missing() {
        assert_eq!(RawCell::from("bad").to_numeric(), None);
        assert_eq!(RawCell::from("").to_numeric(), None);
    }

    #[test]
    fn non_finite_values_become_missing() {
        assert_eq!(RawCell::Number(f64::NAN).to_numeric(), None);
        assert_eq!(RawCell::from("nan").to_numeric(), None);
        assert_eq!(RawCell::from("inf").to_numeric(), None);
    }

    #[test]
    fn deserializes_number_text_and_null() {
        let cells: Vec<RawCell> =
            serde_json::from_str(r#"[12.5, "13.5", "bad", null]"#).expect("must deserialize");
        assert_eq!(cells[0].to_numeric(), Some(12.5));
        assert_eq!(cells[1].to_numeric(), Some(13.5));
        assert_eq!(cells[2].to_numeric(), None);
        assert!(cells[3].is_missing());
    }
}
