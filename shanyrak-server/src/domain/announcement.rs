use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::validation::{normalize_required, validate_positive_i64};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum AnnouncementType {
    Sell,
    Rent,
}

impl AnnouncementType {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            AnnouncementType::Sell => "sell",
            AnnouncementType::Rent => "rent",
        }
    }
}

impl fmt::Display for AnnouncementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnnouncementType {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "sell" => Ok(AnnouncementType::Sell),
            "rent" => Ok(AnnouncementType::Rent),
            _ => Err(DomainError::Validation {
                field: "type",
                message: "must be 'sell' or 'rent'",
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Announcement {
    pub(crate) id: i64,
    pub(crate) kind: AnnouncementType,
    pub(crate) price: f64,
    pub(crate) address: String,
    pub(crate) area: f64,
    pub(crate) rooms_count: i32,
    pub(crate) description: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) user_id: i64,
    pub(crate) total_comments: i32,
}

/// Mutable fields of an announcement, used both for creation and full replace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct AnnouncementRequest {
    pub(crate) kind: AnnouncementType,
    pub(crate) price: f64,
    pub(crate) address: String,
    pub(crate) area: f64,
    pub(crate) rooms_count: i32,
    pub(crate) description: String,
}

impl AnnouncementRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            kind: self.kind,
            price: validate_price("price", self.price)?,
            address: normalize_required("address", &self.address, 255, "must be 1..255 chars")?,
            area: validate_area(self.area)?,
            rooms_count: validate_rooms_count(self.rooms_count)?,
            description: normalize_description(&self.description)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct SearchFilter {
    pub(crate) kind: Option<AnnouncementType>,
    pub(crate) rooms_count: Option<i32>,
    pub(crate) price_from: Option<f64>,
    pub(crate) price_until: Option<f64>,
}

impl SearchFilter {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            kind: self.kind,
            rooms_count: self.rooms_count.map(validate_rooms_count).transpose()?,
            price_from: self
                .price_from
                .map(|price| validate_price("price_from", price))
                .transpose()?,
            price_until: self
                .price_until
                .map(|price| validate_price("price_until", price))
                .transpose()?,
        })
    }
}

impl Announcement {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: i64,
        kind: &str,
        price: f64,
        address: impl Into<String>,
        area: f64,
        rooms_count: i32,
        description: impl Into<String>,
        created_at: DateTime<Utc>,
        user_id: i64,
        total_comments: i32,
    ) -> Result<Self, DomainError> {
        validate_positive_i64("id", id)?;
        validate_positive_i64("user_id", user_id)?;
        if total_comments < 0 {
            return Err(DomainError::Validation {
                field: "total_comments",
                message: "must be >= 0",
            });
        }

        Ok(Self {
            id,
            kind: kind.parse()?,
            price: validate_price("price", price)?,
            address: address.into(),
            area: validate_area(area)?,
            rooms_count: validate_rooms_count(rooms_count)?,
            description: description.into(),
            created_at,
            user_id,
            total_comments,
        })
    }
}

fn validate_price(field: &'static str, price: f64) -> Result<f64, DomainError> {
    if !price.is_finite() || price < 0.0 {
        return Err(DomainError::Validation {
            field,
            message: "must be a finite number >= 0",
        });
    }
    Ok(price)
}

fn validate_area(area: f64) -> Result<f64, DomainError> {
    if !area.is_finite() || area <= 0.0 {
        return Err(DomainError::Validation {
            field: "area",
            message: "must be a finite number > 0",
        });
    }
    Ok(area)
}

fn validate_rooms_count(rooms_count: i32) -> Result<i32, DomainError> {
    if rooms_count <= 0 {
        return Err(DomainError::Validation {
            field: "rooms_count",
            message: "must be > 0",
        });
    }
    Ok(rooms_count)
}

fn normalize_description(description: &str) -> Result<String, DomainError> {
    let description = description.trim();
    if description.chars().count() > 5000 {
        return Err(DomainError::Validation {
            field: "description",
            message: "must be at most 5000 chars",
        });
    }
    Ok(description.to_string())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{Announcement, AnnouncementRequest, AnnouncementType, SearchFilter};
    use crate::domain::error::DomainError;

    #[test]
    fn announcement_type_parses_known_values_only() {
        assert_eq!("sell".parse::<AnnouncementType>().ok(), Some(AnnouncementType::Sell));
        assert_eq!("rent".parse::<AnnouncementType>().ok(), Some(AnnouncementType::Rent));
        assert!("lease".parse::<AnnouncementType>().is_err());
        assert_eq!(AnnouncementType::Rent.to_string(), "rent");
    }

    #[test]
    fn request_validate_normalizes_text_fields() {
        let validated = sample_request().validate().expect("must validate");
        assert_eq!(validated.address, "Abay ave 10");
        assert_eq!(validated.description, "Sunny flat");
    }

    #[test]
    fn request_validate_rejects_negative_price() {
        let req = AnnouncementRequest {
            price: -1.0,
            ..sample_request()
        };
        assert_validation_field(req.validate().expect_err("must fail"), "price");
    }

    #[test]
    fn request_validate_rejects_zero_rooms_and_area() {
        let req = AnnouncementRequest {
            rooms_count: 0,
            ..sample_request()
        };
        assert_validation_field(req.validate().expect_err("must fail"), "rooms_count");

        let req = AnnouncementRequest {
            area: 0.0,
            ..sample_request()
        };
        assert_validation_field(req.validate().expect_err("must fail"), "area");
    }

    #[test]
    fn search_filter_rejects_non_finite_price_bound() {
        let filter = SearchFilter {
            price_until: Some(f64::NAN),
            ..SearchFilter::default()
        };
        assert_validation_field(filter.validate().expect_err("must fail"), "price_until");
    }

    #[test]
    fn announcement_new_rejects_unknown_type() {
        let err = Announcement::new(1, "swap", 10.0, "addr", 40.0, 2, "", Utc::now(), 1, 0)
            .expect_err("unknown type must be rejected");
        assert_validation_field(err, "type");
    }

    fn sample_request() -> AnnouncementRequest {
        AnnouncementRequest {
            kind: AnnouncementType::Sell,
            price: 150_000.0,
            address: "  Abay ave 10 ".to_string(),
            area: 54.5,
            rooms_count: 2,
            description: " Sunny flat ".to_string(),
        }
    }

    fn assert_validation_field(err: DomainError, expected_field: &'static str) {
        match err {
            DomainError::Validation { field, .. } => assert_eq!(field, expected_field),
            other => panic!("expected DomainError::Validation, got {other:?}"),
        }
    }
}
