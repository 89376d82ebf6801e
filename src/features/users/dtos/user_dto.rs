use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::users::models::UserRole;
use crate::shared::constants::MIN_PASSWORD_LENGTH;
use crate::shared::validation::{not_blank, PHONE_REGEX};

/// Admin form for creating a user
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDto {
    #[validate(custom(function = "not_blank"))]
    pub name: String,

    #[validate(email(message = "Format email tidak valid"))]
    pub email: String,

    #[validate(length(min = MIN_PASSWORD_LENGTH, message = "Password minimal 6 karakter"))]
    pub password: String,

    pub role: UserRole,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(regex(path = *PHONE_REGEX, message = "Nomor telepon tidak valid"))]
    pub no_telp: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub alamat: Option<String>,
}

/// Admin form for editing a user; omitted fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "not_blank"))]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Format email tidak valid"))]
    pub email: Option<String>,

    /// Empty password keeps the current one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = MIN_PASSWORD_LENGTH, message = "Password minimal 6 karakter"))]
    pub password: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(regex(path = *PHONE_REGEX, message = "Nomor telepon tidak valid"))]
    pub no_telp: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub alamat: Option<String>,
}

impl UpdateUserDto {
    /// Drop a blank password so the edit form can leave it empty
    pub fn normalized(mut self) -> Self {
        if self.password.as_deref().is_some_and(|p| p.is_empty()) {
            self.password = None;
        }
        self
    }
}
