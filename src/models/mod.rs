use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Visibility mode of a wishlist. Crosses the wire and the database
/// boundary as a plain integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum DisplayType {
    None = 0,
    Public = 1,
    FriendsOnly = 2,
    ByLink = 3,
}

#[derive(Debug, Error)]
#[error("invalid display type: {0}")]
pub struct InvalidDisplayType(pub i64);

impl TryFrom<i64> for DisplayType {
    type Error = InvalidDisplayType;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Public),
            2 => Ok(Self::FriendsOnly),
            3 => Ok(Self::ByLink),
            other => Err(InvalidDisplayType(other)),
        }
    }
}

impl From<DisplayType> for i64 {
    fn from(value: DisplayType) -> Self {
        value as i64
    }
}

/// Wishlist is a named collection owned by one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wishlist {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub description: String,
    pub display_type: DisplayType,
}

// Request/Response types for API

#[derive(Debug, Deserialize)]
pub struct CreateWishlistRequest {
    /// Accepted for wire compatibility; the actual owner is always resolved
    /// from the bearer token.
    #[serde(default)]
    pub owner_id: Option<i64>,
    pub name: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub display_type: i64,
}

/// Response envelope shared by every endpoint: `{"status":"OK"}` on
/// success, `{"status":"Error","error":"..."}` on logical failure.
#[derive(Debug, Serialize)]
pub struct Status {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Status {
    pub fn ok() -> Self {
        Self {
            status: "OK",
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            status: "Error",
            error: Some(msg.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateWishlistResponse {
    #[serde(flatten)]
    pub status: Status,
    pub wishlist_id: i64,
}

#[derive(Debug, Serialize)]
pub struct GetWishlistResponse {
    #[serde(flatten)]
    pub status: Status,
    pub wishlist: Wishlist,
}

#[derive(Debug, Serialize)]
pub struct GetWishlistsResponse {
    #[serde(flatten)]
    pub status: Status,
    pub wishlists: Vec<Wishlist>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_type_mapping() {
        assert_eq!(DisplayType::try_from(0).unwrap(), DisplayType::None);
        assert_eq!(DisplayType::try_from(1).unwrap(), DisplayType::Public);
        assert_eq!(DisplayType::try_from(2).unwrap(), DisplayType::FriendsOnly);
        assert_eq!(DisplayType::try_from(3).unwrap(), DisplayType::ByLink);
    }

    #[test]
    fn test_display_type_rejects_unknown_values() {
        for n in [-1, 4, 9, 100, i64::MIN, i64::MAX] {
            let err = DisplayType::try_from(n).unwrap_err();
            assert_eq!(err.0, n);
        }
    }

    #[test]
    fn test_display_type_roundtrips_through_i64() {
        for n in 0..=3 {
            let dt = DisplayType::try_from(n).unwrap();
            assert_eq!(i64::from(dt), n);
        }
    }

    #[test]
    fn test_wishlist_serializes_display_type_as_integer() {
        let wishlist = Wishlist {
            id: 1,
            owner_id: 42,
            name: "Birthday".to_string(),
            description: String::new(),
            display_type: DisplayType::Public,
        };

        let json = serde_json::to_value(&wishlist).unwrap();
        assert_eq!(json["display_type"], 1);
        assert_eq!(json["owner_id"], 42);
    }

    #[test]
    fn test_create_request_defaults() {
        let req: CreateWishlistRequest =
            serde_json::from_str(r#"{"name": "Birthday"}"#).unwrap();
        assert_eq!(req.name.as_deref(), Some("Birthday"));
        assert_eq!(req.description, "");
        assert_eq!(req.display_type, 0);
        assert!(req.owner_id.is_none());
    }

    #[test]
    fn test_status_envelope_shape() {
        let ok = serde_json::to_value(Status::ok()).unwrap();
        assert_eq!(ok, serde_json::json!({"status": "OK"}));

        let err = serde_json::to_value(Status::error("boom")).unwrap();
        assert_eq!(err, serde_json::json!({"status": "Error", "error": "boom"}));
    }
}
