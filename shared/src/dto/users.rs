//! # User Data Transfer Objects
//!
//! Profiles returned by `/users/*` and the follow endpoints.

use serde::{Deserialize, Serialize};

/// Public profile of a social user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub wallet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

impl User {
    /// Name to show for this user: username when set, otherwise the
    /// truncated wallet, otherwise the raw id.
    pub fn display_name(&self) -> String {
        match (&self.username, &self.wallet) {
            (Some(name), _) if !name.is_empty() => name.clone(),
            (_, Some(wallet)) => crate::utils::truncate_address(wallet),
            _ => self.id.clone(),
        }
    }
}

/// Body of follow/unfollow calls
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FollowRequest {
    pub follower_id: String,
}

/// Error body returned by the backend on non-2xx responses
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorResponse {
    /// First non-empty human-readable message in the body.
    pub fn reason(&self) -> Option<&str> {
        non_empty(&self.error).or_else(|| non_empty(&self.message))
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_from_backend_json() {
        let json = r#"{
            "_id": "652f0c1e9b",
            "username": "moo",
            "wallet": "0x3f5ce5fbfe3e9af3971dd833d26ba9b5c936f0be",
            "profileImage": "/assets/moo.png",
            "followers": []
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "652f0c1e9b");
        assert_eq!(user.profile_image.as_deref(), Some("/assets/moo.png"));
        assert_eq!(user.display_name(), "moo");
    }

    #[test]
    fn test_display_name_falls_back_to_wallet() {
        let user = User {
            id: "1".to_string(),
            username: None,
            wallet: Some("0x3f5ce5fbfe3e9af3971dd833d26ba9b5c936f0be".to_string()),
            profile_image: None,
        };
        assert_eq!(user.display_name(), "0x3f5c...f0be");
    }

    #[test]
    fn test_follow_request_uses_camel_case() {
        let body = serde_json::to_value(FollowRequest { follower_id: "abc".to_string() }).unwrap();
        assert_eq!(body, serde_json::json!({ "followerId": "abc" }));
    }

    #[test]
    fn test_error_reason() {
        let err: ErrorResponse = serde_json::from_str(r#"{"message":"Already following"}"#).unwrap();
        assert_eq!(err.reason(), Some("Already following"));
        assert_eq!(ErrorResponse::default().reason(), None);
    }

    #[test]
    fn test_empty_error_falls_through_to_message() {
        let err: ErrorResponse =
            serde_json::from_str(r#"{"error":"","message":"Already following"}"#).unwrap();
        assert_eq!(err.reason(), Some("Already following"));

        let err: ErrorResponse = serde_json::from_str(r#"{"error":"  ","message":""}"#).unwrap();
        assert_eq!(err.reason(), None);
    }
}
