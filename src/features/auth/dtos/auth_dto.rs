use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::users::models::User;
use crate::shared::constants::MIN_PASSWORD_LENGTH;
use crate::shared::validation::{not_blank, PHONE_REGEX};

/// Request DTO for login
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[validate(email(message = "Format email tidak valid"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password wajib diisi"))]
    pub password: String,
}

/// Request DTO for resident registration
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequestDto {
    #[validate(custom(function = "not_blank"))]
    pub name: String,

    #[validate(email(message = "Format email tidak valid"))]
    pub email: String,

    #[validate(length(min = MIN_PASSWORD_LENGTH, message = "Password minimal 6 karakter"))]
    pub password: String,

    #[validate(must_match(other = "password", message = "Password tidak sama"))]
    pub confirm_password: String,

    #[validate(regex(path = *PHONE_REGEX, message = "Nomor telepon tidak valid"))]
    pub no_telp: Option<String>,

    pub alamat: Option<String>,
}

/// Body sent to the backend register endpoint (confirmation stays local)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendRegisterBody<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_telp: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alamat: Option<&'a str>,
}

impl<'a> From<&'a RegisterRequestDto> for BackendRegisterBody<'a> {
    fn from(dto: &'a RegisterRequestDto) -> Self {
        Self {
            name: dto.name.trim(),
            email: dto.email.trim(),
            password: &dto.password,
            no_telp: dto.no_telp.as_deref(),
            alamat: dto.alamat.as_deref(),
        }
    }
}

/// Payload returned by the backend login/register endpoints
#[derive(Debug, Deserialize)]
pub struct BackendAuthPayload {
    #[serde(default)]
    pub token: Option<String>,
    pub user: User,
}

/// Session handed to the client after login
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    /// Bearer token for subsequent portal requests
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: User,
}

/// Registration result; `session` is present when the backend logs the user in directly
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponseDto {
    pub user: User,
    pub session: Option<SessionDto>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::validation::first_message;
    use serde_json::json;

    fn register(password: &str, confirm: &str) -> RegisterRequestDto {
        serde_json::from_value(json!({
            "name": "Budi Santoso",
            "email": "budi@desa.id",
            "password": password,
            "confirmPassword": confirm
        }))
        .unwrap()
    }

    #[test]
    fn test_mismatched_passwords() {
        let errors = register("rahasia1", "rahasia2").validate().unwrap_err();
        assert_eq!(first_message(&errors), "Password tidak sama");
    }

    #[test]
    fn test_mismatch_reported_even_when_password_short() {
        let errors = register("abc", "abd").validate().unwrap_err();
        assert_eq!(first_message(&errors), "Password tidak sama");
    }

    #[test]
    fn test_short_password() {
        let errors = register("abc", "abc").validate().unwrap_err();
        assert_eq!(first_message(&errors), "Password minimal 6 karakter");
    }

    #[test]
    fn test_password_length_boundary() {
        let limit = MIN_PASSWORD_LENGTH as usize;
        let short = "a".repeat(limit - 1);
        let exact = "a".repeat(limit);
        assert!(register(&short, &short).validate().is_err());
        assert!(register(&exact, &exact).validate().is_ok());
    }

    #[test]
    fn test_valid_registration() {
        assert!(register("rahasia", "rahasia").validate().is_ok());
    }

    #[test]
    fn test_backend_body_omits_confirmation() {
        let dto = register("rahasia", "rahasia");
        let body = serde_json::to_value(BackendRegisterBody::from(&dto)).unwrap();
        assert_eq!(
            body,
            json!({"name": "Budi Santoso", "email": "budi@desa.id", "password": "rahasia"})
        );
    }
}
