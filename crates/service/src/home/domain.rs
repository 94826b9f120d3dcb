use serde::{Deserialize, Serialize};

use models::home::{self, HomeChanges, NewHome, PropertyType};
use models::user;

use crate::validation::{
    require_non_empty, require_one_of, require_positive, require_positive_int, Validate, ValidationErrors, Violation,
};

/// Raw `GET /home` query string. Values stay strings so that bad numbers
/// are reported as violations rather than rejected by the extractor.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeQuery {
    pub city: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub property_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageInput {
    pub url: String,
}

/// `POST /home` body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHomeInput {
    pub address: String,
    pub number_of_bedrooms: i32,
    pub number_of_bathrooms: f64,
    pub city: String,
    pub price: f64,
    pub land_size: f64,
    /// Kept raw so an unknown value is reported as a violation.
    pub property_type: String,
    #[serde(default)]
    pub images: Vec<ImageInput>,
}

impl CreateHomeInput {
    pub fn into_parts(self) -> Result<(NewHome, Vec<String>), ValidationErrors> {
        let property_type = require_one_of(&self.property_type, &PropertyType::ALL, "propertyType")?;
        let urls = self.images.into_iter().map(|i| i.url).collect();
        let new = NewHome {
            address: self.address,
            city: self.city,
            price: self.price,
            land_size: self.land_size,
            number_of_bedrooms: self.number_of_bedrooms,
            number_of_bathrooms: self.number_of_bathrooms,
            property_type,
        };
        Ok((new, urls))
    }
}

impl Validate for CreateHomeInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut rules = vec![
            require_non_empty(&self.address, "address"),
            require_non_empty(&self.city, "city"),
            require_positive_int(self.number_of_bedrooms, "numberOfBedrooms"),
            require_positive(self.number_of_bathrooms, "numberOfBathrooms"),
            require_positive(self.price, "price"),
            require_positive(self.land_size, "landSize"),
            require_one_of(&self.property_type, &PropertyType::ALL, "propertyType").map(drop),
        ];
        for (i, img) in self.images.iter().enumerate() {
            rules.push(require_non_empty(&img.url, &format!("images[{i}].url")));
        }
        ValidationErrors::collect(rules)
    }
}

/// `PUT /home/:id` body; every field optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHomeInput {
    pub address: Option<String>,
    pub number_of_bedrooms: Option<i32>,
    pub number_of_bathrooms: Option<f64>,
    pub city: Option<String>,
    pub price: Option<f64>,
    pub land_size: Option<f64>,
    pub property_type: Option<String>,
}

impl UpdateHomeInput {
    pub fn into_changes(self) -> Result<HomeChanges, ValidationErrors> {
        let property_type = self
            .property_type
            .map(|p| require_one_of(&p, &PropertyType::ALL, "propertyType"))
            .transpose()?;
        Ok(HomeChanges {
            address: self.address,
            city: self.city,
            price: self.price,
            land_size: self.land_size,
            number_of_bedrooms: self.number_of_bedrooms,
            number_of_bathrooms: self.number_of_bathrooms,
            property_type,
        })
    }
}

impl Validate for UpdateHomeInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        fn opt<T>(v: Option<T>, rule: impl FnOnce(T) -> Result<(), Violation>) -> Result<(), Violation> {
            v.map_or(Ok(()), rule)
        }
        ValidationErrors::collect([
            opt(self.address.as_deref(), |v| require_non_empty(v, "address")),
            opt(self.city.as_deref(), |v| require_non_empty(v, "city")),
            opt(self.number_of_bedrooms, |v| require_positive_int(v, "numberOfBedrooms")),
            opt(self.number_of_bathrooms, |v| require_positive(v, "numberOfBathrooms")),
            opt(self.price, |v| require_positive(v, "price")),
            opt(self.land_size, |v| require_positive(v, "landSize")),
            opt(self.property_type.as_deref(), |v| require_one_of(v, &PropertyType::ALL, "propertyType").map(drop)),
        ])
    }
}

/// Outbound listing. Carries at most one representative `image` URL and
/// never the image list or realtor/timestamp columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeResponse {
    pub id: i32,
    pub address: String,
    pub city: String,
    pub price: f64,
    pub land_size: f64,
    pub number_of_bedrooms: i32,
    pub number_of_bathrooms: f64,
    pub property_type: PropertyType,
    pub listed_date: chrono::DateTime<chrono::FixedOffset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl HomeResponse {
    pub fn from_model(m: home::Model, image: Option<String>) -> Self {
        Self {
            id: m.id,
            address: m.address,
            city: m.city,
            price: m.price,
            land_size: m.land_size,
            number_of_bedrooms: m.number_of_bedrooms,
            number_of_bathrooms: m.number_of_bathrooms,
            property_type: m.property_type,
            listed_date: m.listed_date,
            image,
        }
    }
}

/// Public view of the realtor owning a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealtorView {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl From<user::Model> for RealtorView {
    fn from(u: user::Model) -> Self {
        Self { id: u.id, name: u.name, email: u.email, phone: u.phone }
    }
}

/// `GET /home/:id` body: the listing, all its image URLs and its realtor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeDetail {
    #[serde(flatten)]
    pub home: HomeResponse,
    pub images: Vec<String>,
    pub realtor: Option<RealtorView>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_create() -> CreateHomeInput {
        CreateHomeInput {
            address: "2345 William Str".into(),
            number_of_bedrooms: 3,
            number_of_bathrooms: 2.0,
            city: "Toronto".into(),
            price: 1_500_000.0,
            land_size: 4444.0,
            property_type: "RESIDENTIAL".into(),
            images: vec![ImageInput { url: "https://img/1.png".into() }],
        }
    }

    #[test]
    fn create_input_valid() {
        assert!(valid_create().validate().is_ok());
    }

    #[test]
    fn create_input_reports_each_field() {
        let input = CreateHomeInput {
            address: " ".into(),
            price: -1.0,
            images: vec![ImageInput { url: "ok".into() }, ImageInput { url: "".into() }],
            ..valid_create()
        };
        let errs = input.validate().unwrap_err();
        assert_eq!(errs.fields(), vec!["address", "price", "images[1].url"]);
    }

    #[test]
    fn create_input_images_default_to_empty() {
        let input: CreateHomeInput = serde_json::from_value(json!({
            "address": "1 Main", "numberOfBedrooms": 1, "numberOfBathrooms": 1,
            "city": "Toronto", "price": 10, "landSize": 20, "propertyType": "CONDO"
        }))
        .unwrap();
        assert!(input.images.is_empty());
        let (new, urls) = input.into_parts().unwrap();
        assert_eq!(new.property_type, PropertyType::Condo);
        assert!(urls.is_empty());
    }

    #[test]
    fn unknown_property_type_is_a_violation() {
        let input: CreateHomeInput = serde_json::from_value(json!({
            "address": "1 Main", "numberOfBedrooms": 1, "numberOfBathrooms": 1,
            "city": "Toronto", "price": 10, "landSize": 20, "propertyType": "CASTLE"
        }))
        .unwrap();
        assert_eq!(input.validate().unwrap_err().fields(), vec!["propertyType"]);
        assert!(input.into_parts().is_err());

        let update = UpdateHomeInput { property_type: Some("castle".into()), ..Default::default() };
        assert_eq!(update.validate().unwrap_err().fields(), vec!["propertyType"]);
    }

    #[test]
    fn update_input_checks_only_present_fields() {
        assert!(UpdateHomeInput::default().validate().is_ok());
        let input = UpdateHomeInput { price: Some(0.0), city: Some("Ottawa".into()), ..Default::default() };
        assert_eq!(input.validate().unwrap_err().fields(), vec!["price"]);
    }

    #[test]
    fn update_input_maps_to_changes() {
        let changes = UpdateHomeInput { land_size: Some(12.0), ..Default::default() }.into_changes().unwrap();
        assert_eq!(changes, HomeChanges { land_size: Some(12.0), ..Default::default() });
        let changes = UpdateHomeInput { property_type: Some("CONDO".into()), ..Default::default() }.into_changes().unwrap();
        assert_eq!(changes.property_type, Some(PropertyType::Condo));
    }

    #[test]
    fn response_has_single_image_field() {
        let now = chrono::Utc::now().into();
        let model = home::Model {
            id: 7,
            address: "1 Main".into(),
            city: "Toronto".into(),
            price: 10.0,
            land_size: 20.0,
            number_of_bedrooms: 1,
            number_of_bathrooms: 1.0,
            property_type: PropertyType::Condo,
            listed_date: now,
            realtor_id: 3,
            created_at: now,
            updated_at: now,
        };
        let v = serde_json::to_value(HomeResponse::from_model(model, Some("https://img/1.png".into()))).unwrap();
        assert_eq!(v["image"], json!("https://img/1.png"));
        assert_eq!(v["propertyType"], json!("CONDO"));
        assert!(v.get("images").is_none());
        assert!(v.get("realtorId").is_none());
    }
}
