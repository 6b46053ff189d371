use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::db::Collection;
use crate::models::Record;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Testimonial {
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default = "default_rating")]
    pub rating: u8,
    pub text: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub is_approved: bool,
}

fn default_rating() -> u8 {
    MAX_RATING
}

impl Testimonial {
    /// Public submissions always wait for moderation.
    pub fn new(
        name: String,
        location: Option<String>,
        rating: u8,
        text: String,
        service: Option<String>,
    ) -> Self {
        Self {
            name,
            location: location.unwrap_or_default(),
            rating: rating.clamp(MIN_RATING, MAX_RATING),
            text,
            service: service.unwrap_or_default(),
            is_approved: false,
        }
    }

    pub fn stars(&self) -> String {
        "★".repeat(self.rating as usize)
    }
}

impl Record for Testimonial {
    const COLLECTION: Collection = Collection::Testimonials;
}

/// Accepts a number or a numeric string; absent means the top rating.
/// Fractions are truncated toward zero.
/// Out-of-range values are clamped into 1..=5.
pub fn parse_rating(value: Option<&Value>) -> anyhow::Result<u8> {
    let raw = match value {
        None | Some(Value::Null) => return Ok(default_rating()),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(i) => i,
            None => n.as_f64().map(|f| f.trunc() as i64).unwrap_or_default(),
        },
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(default_rating()),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| anyhow::anyhow!("rating must be a whole number, got {s:?}"))?,
        Some(other) => anyhow::bail!("rating must be a number, got {other}"),
    };
    Ok(raw.clamp(MIN_RATING as i64, MAX_RATING as i64) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_testimonial_is_unapproved() {
        let t = Testimonial::new("A".into(), None, 4, "great".into(), None);
        assert!(!t.is_approved);
        assert_eq!(t.rating, 4);
        assert_eq!(t.location, "");
    }

    #[test]
    fn test_rating_is_clamped() {
        assert_eq!(Testimonial::new("A".into(), None, 0, "x".into(), None).rating, 1);
        assert_eq!(Testimonial::new("A".into(), None, 9, "x".into(), None).rating, 5);
    }

    #[test]
    fn test_parse_rating() {
        assert_eq!(parse_rating(None).unwrap(), 5);
        assert_eq!(parse_rating(Some(&json!(null))).unwrap(), 5);
        assert_eq!(parse_rating(Some(&json!(3))).unwrap(), 3);
        assert_eq!(parse_rating(Some(&json!("4"))).unwrap(), 4);
        assert_eq!(parse_rating(Some(&json!(" 2 "))).unwrap(), 2);
        assert_eq!(parse_rating(Some(&json!(""))).unwrap(), 5);
        assert_eq!(parse_rating(Some(&json!(4.6))).unwrap(), 4);
        assert_eq!(parse_rating(Some(&json!(1.9))).unwrap(), 1);
        assert_eq!(parse_rating(Some(&json!(0.5))).unwrap(), 1);
        assert_eq!(parse_rating(Some(&json!(11))).unwrap(), 5);
        assert_eq!(parse_rating(Some(&json!(-3))).unwrap(), 1);
        assert!(parse_rating(Some(&json!("five"))).is_err());
        assert!(parse_rating(Some(&json!([5]))).is_err());
    }

    #[test]
    fn test_stars() {
        let t = Testimonial::new("A".into(), None, 3, "x".into(), None);
        assert_eq!(t.stars(), "★★★");
    }
}
