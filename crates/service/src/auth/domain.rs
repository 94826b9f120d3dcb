use serde::{Deserialize, Serialize};

use models::user::{self, UserType};

use crate::validation::{
    require_email, require_min_length, require_non_empty, require_non_empty_if_present, require_one_of, Validate,
    ValidationErrors,
};

pub const MIN_PASSWORD_LEN: usize = 5;

/// `POST /auth/signup/:userType` body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupInput {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub product_key: Option<String>,
}

impl Validate for SignupInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        ValidationErrors::collect([
            require_non_empty(&self.name, "name"),
            require_email(&self.email, "email"),
            require_min_length(&self.password, MIN_PASSWORD_LEN, "password"),
            require_non_empty_if_present(&self.product_key, "productKey"),
        ])
    }
}

/// Signin input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SigninInput {
    pub email: String,
    pub password: String,
}

impl Validate for SigninInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        ValidationErrors::collect([require_email(&self.email, "email")])
    }
}

/// Admin request for a signup product key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateProductKeyInput {
    pub email: String,
    pub user_type: String,
}

impl GenerateProductKeyInput {
    pub fn parsed_user_type(&self) -> Result<UserType, ValidationErrors> {
        Ok(require_one_of(&self.user_type, &UserType::ALL, "userType")?)
    }
}

impl Validate for GenerateProductKeyInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        ValidationErrors::collect([
            require_email(&self.email, "email"),
            require_one_of(&self.user_type, &UserType::ALL, "userType").map(drop),
        ])
    }
}

/// Authenticated caller, as carried by a verified token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: i32,
    pub name: String,
    pub user_type: UserType,
}

impl AuthUser {
    pub fn is(&self, user_type: UserType) -> bool {
        self.user_type == user_type
    }
}

impl From<&user::Model> for AuthUser {
    fn from(u: &user::Model) -> Self {
        Self { id: u.id, name: u.name.clone(), user_type: u.user_type }
    }
}

/// Signup/signin result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductKey {
    pub product_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup() -> SignupInput {
        SignupInput {
            name: "Laith".into(),
            phone: "555 555 5555".into(),
            email: "laith@realty.com".into(),
            password: "secret".into(),
            product_key: None,
        }
    }

    #[test]
    fn valid_signup_passes() {
        assert!(signup().validate().is_ok());
    }

    #[test]
    fn signup_reports_one_violation_per_broken_rule() {
        let input = SignupInput {
            name: " ".into(),
            email: "not-an-email".into(),
            password: "abc".into(),
            product_key: Some(String::new()),
            ..signup()
        };
        let errs = input.validate().unwrap_err();
        assert_eq!(errs.fields(), vec!["name", "email", "password", "productKey"]);
    }

    #[test]
    fn signin_checks_email_only() {
        let ok = SigninInput { email: "a@b.co".into(), password: String::new() };
        assert!(ok.validate().is_ok());
        let bad = SigninInput { email: "a@b".into(), password: "whatever".into() };
        assert_eq!(bad.validate().unwrap_err().fields(), vec!["email"]);
    }

    #[test]
    fn product_key_input_reports_unknown_user_type() {
        let parsed: GenerateProductKeyInput =
            serde_json::from_value(serde_json::json!({"email": "a@b", "userType": "LANDLORD"})).unwrap();
        let errs = parsed.validate().unwrap_err();
        assert_eq!(errs.fields(), vec!["email", "userType"]);
        assert!(errs.to_string().contains("must be one of BUYER, REALTOR, ADMIN"), "{errs}");

        let parsed: GenerateProductKeyInput =
            serde_json::from_value(serde_json::json!({"email": "a@b.co", "userType": "REALTOR"})).unwrap();
        assert!(parsed.validate().is_ok());
        assert_eq!(parsed.parsed_user_type().unwrap(), UserType::Realtor);
    }

    #[test]
    fn signup_wire_names_are_camel_case() {
        let parsed: SignupInput = serde_json::from_value(serde_json::json!({
            "name": "N", "phone": "1", "email": "n@x.io", "password": "12345", "productKey": "k"
        }))
        .unwrap();
        assert_eq!(parsed.product_key.as_deref(), Some("k"));
    }
}
