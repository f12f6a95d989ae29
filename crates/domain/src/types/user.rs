//! Backend user accounts

use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};

use super::default_true;
use crate::impl_wire_enum_conversions;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, SerializeDisplay, DeserializeFromStr)]
pub enum UserRole {
    Admin,
    Seller,
}

impl_wire_enum_conversions!(UserRole {
    Admin => "ADMIN",
    Seller => "VENDEDOR",
});

/// Staff account as listed by `/user`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(rename = "nombre", alias = "name", default)]
    pub name: String,
    pub email: String,
    #[serde(rename = "rol", default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(rename = "activo", default = "default_true")]
    pub active: bool,
}

/// Query string for `/user/paginated`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPageQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// Body for `PATCH /user/{id}/status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStatusUpdate {
    pub status: bool,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn role_uses_backend_spelling() {
        assert_eq!(serde_json::to_value(UserRole::Seller).unwrap(), json!("VENDEDOR"));
        let user: User = serde_json::from_value(json!({
            "id": 1, "name": "Ana", "email": "ana@example.com", "rol": "admin"
        }))
        .unwrap();
        assert_eq!(user.role, Some(UserRole::Admin));
        assert_eq!(user.name, "Ana");
    }

    #[test]
    fn page_query_omits_unset_fields() {
        let query = UserPageQuery { limit: Some(20), ..Default::default() };
        assert_eq!(serde_json::to_value(query).unwrap(), json!({ "limit": 20 }));
    }
}
