//! `GET /home` filter construction.
//!
//! Only constraints the caller actually supplied end up in the filter; an
//! empty filter means "every home".

use sea_orm::{ColumnTrait, Condition};
use serde::Serialize;

use models::home::{self, PropertyType};

use super::domain::HomeQuery;
use crate::validation::{require_one_of, ValidationErrors, Violation};

/// Inclusive price bounds; each side is independent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PriceRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gte: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lte: Option<f64>,
}

impl PriceRange {
    pub fn contains(&self, price: f64) -> bool {
        self.gte.map_or(true, |min| price >= min) && self.lte.map_or(true, |max| price <= max)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_type: Option<PropertyType>,
}

impl HomeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn min_price(mut self, min: f64) -> Self {
        self.price.get_or_insert_with(PriceRange::default).gte = Some(min);
        self
    }

    pub fn max_price(mut self, max: f64) -> Self {
        self.price.get_or_insert_with(PriceRange::default).lte = Some(max);
        self
    }

    pub fn property_type(mut self, property_type: PropertyType) -> Self {
        self.property_type = Some(property_type);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.city.is_none() && self.price.is_none() && self.property_type.is_none()
    }

    /// SeaORM condition equivalent of this filter (AND of present constraints).
    pub fn to_condition(&self) -> Condition {
        let mut cond = Condition::all();
        if let Some(city) = &self.city {
            cond = cond.add(home::Column::City.eq(city.clone()));
        }
        if let Some(price) = &self.price {
            if let Some(min) = price.gte {
                cond = cond.add(home::Column::Price.gte(min));
            }
            if let Some(max) = price.lte {
                cond = cond.add(home::Column::Price.lte(max));
            }
        }
        if let Some(p) = self.property_type {
            cond = cond.add(home::Column::PropertyType.eq(p));
        }
        cond
    }

    /// In-process evaluation, same semantics as [`HomeFilter::to_condition`].
    pub fn matches(&self, h: &home::Model) -> bool {
        self.city.as_ref().map_or(true, |c| &h.city == c)
            && self.price.map_or(true, |r| r.contains(h.price))
            && self.property_type.map_or(true, |p| h.property_type == p)
    }
}

/// Blank values count as absent, mirroring an omitted query parameter.
fn present(raw: &Option<String>) -> Option<&str> {
    raw.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_price(raw: &str, field: &str) -> Result<f64, Violation> {
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(Violation::new(field, format!("`{raw}` is not a number"))),
    }
}

impl TryFrom<&HomeQuery> for HomeFilter {
    type Error = ValidationErrors;

    fn try_from(q: &HomeQuery) -> Result<Self, Self::Error> {
        let mut filter = HomeFilter::new();
        let mut checks: Vec<Result<(), Violation>> = Vec::new();

        if let Some(city) = present(&q.city) {
            filter = filter.city(city);
        }
        if let Some(raw) = present(&q.min_price) {
            match parse_price(raw, "minPrice") {
                Ok(v) => filter = filter.min_price(v),
                Err(e) => checks.push(Err(e)),
            }
        }
        if let Some(raw) = present(&q.max_price) {
            match parse_price(raw, "maxPrice") {
                Ok(v) => filter = filter.max_price(v),
                Err(e) => checks.push(Err(e)),
            }
        }
        if let Some(raw) = present(&q.property_type) {
            match require_one_of(raw, &PropertyType::ALL, "propertyType") {
                Ok(p) => filter = filter.property_type(p),
                Err(e) => checks.push(Err(e)),
            }
        }

        ValidationErrors::collect(checks)?;
        Ok(filter)
    }
}
