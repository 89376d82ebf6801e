use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use crate::shared::filter::{Facet, Filterable};
use crate::shared::serde_helpers;

/// Portal roles. Visitors browse, warga (residents) submit reports, admins manage content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Visitor,
    Warga,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Visitor => "VISITOR",
            UserRole::Warga => "WARGA",
            UserRole::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(deserialize_with = "serde_helpers::id")]
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    #[serde(default)]
    pub no_telp: Option<String>,
    #[serde(default)]
    pub alamat: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

impl Filterable for User {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str()]
    }

    fn facet(&self, facet: Facet) -> Option<&str> {
        match facet {
            Facet::Role => Some(self.role.as_str()),
            _ => None,
        }
    }
}
