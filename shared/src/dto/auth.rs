//! # Authentication Data Transfer Objects
//!
//! Users, login/registration payloads and the wallet binding sent to `/users/*`.

use serde::{Deserialize, Serialize};

/// Wallet families the marketplace accepts as login identities.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WalletType {
    Phantom,
    Solflare,
}

impl WalletType {
    pub fn name(&self) -> &'static str {
        match self {
            WalletType::Phantom => "Phantom",
            WalletType::Solflare => "Solflare",
        }
    }
}

impl std::fmt::Display for WalletType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for WalletType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "phantom" => Ok(WalletType::Phantom),
            "solflare" => Ok(WalletType::Solflare),
            other => Err(format!("unknown wallet type: {}", other)),
        }
    }
}

/// Wallet binding (`{ "type": "phantom", "address": "..." }`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WalletBinding {
    #[serde(rename = "type")]
    pub wallet_type: WalletType,
    pub address: String,
}

/// Authenticated user as held by the client session.
///
/// The backend names the identifier `_id` (sometimes alongside an `id`
/// virtual) and the display name `displayName`, `username` or `name`
/// depending on the endpoint. Input goes through [`RawUser`]; output always
/// uses the camelCase names below.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", try_from = "RawUser")]
pub struct User {
    pub id: String,
    pub email: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,
}

/// Every spelling of a user record the backend (or an older session file)
/// may produce. Unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawUser {
    #[serde(rename = "_id")]
    mongo_id: Option<String>,
    id: Option<String>,
    email: Option<String>,
    display_name: Option<String>,
    username: Option<String>,
    name: Option<String>,
    bio: Option<String>,
    wallet_address: Option<String>,
}

impl TryFrom<RawUser> for User {
    type Error = String;

    fn try_from(raw: RawUser) -> Result<Self, Self::Error> {
        let id = raw
            .mongo_id
            .or(raw.id)
            .ok_or_else(|| "user record has neither `_id` nor `id`".to_string())?;

        Ok(Self {
            id,
            email: raw.email.unwrap_or_default(),
            display_name: raw.display_name.or(raw.username).or(raw.name).unwrap_or_default(),
            bio: raw.bio,
            wallet_address: raw.wallet_address,
        })
    }
}

impl User {
    /// Copy of this user bound to `address`.
    pub fn with_wallet_address(&self, address: impl Into<String>) -> Self {
        Self {
            wallet_address: Some(address.into()),
            ..self.clone()
        }
    }

    /// Copy of this user with the wallet binding removed.
    pub fn without_wallet_address(&self) -> Self {
        Self {
            wallet_address: None,
            ..self.clone()
        }
    }
}

/// Email/password login request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Account creation request, shared by `/users`, `/users/register`
/// and `/users/complete-registration`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet: Option<WalletBinding>,
}

/// Email verification request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerifyEmailRequest {
    pub email: String,
    pub code: String,
}

/// Resend verification code request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResendVerificationRequest {
    pub email: String,
}

/// Generic acknowledgement returned by the registration steps
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
}

/// Error body returned by the backend on non-2xx responses
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_accepts_backend_field_names() {
        let json = r#"{"_id":"64f1","email":"a@b.com","name":"alice"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "64f1");
        assert_eq!(user.display_name, "alice");
        assert_eq!(user.wallet_address, None);

        let json = r#"{"id":"7","email":"b@c.com","username":"bob","walletAddress":"abc"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.display_name, "bob");
        assert_eq!(user.wallet_address.as_deref(), Some("abc"));
    }

    #[test]
    fn test_user_accepts_both_id_forms() {
        let json = r#"{"_id":"64f1","id":"64f1","email":"a@b.com","username":"alice","__v":0}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "64f1");
        assert_eq!(user.display_name, "alice");
    }

    #[test]
    fn test_user_prefers_username_over_name() {
        let json = r#"{"_id":"1","name":"Alice","username":"alice"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.display_name, "alice");
        assert_eq!(user.email, "");

        let json = r#"{"id":"1","displayName":"Al","name":"Alice","username":"alice"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.display_name, "Al");
    }

    #[test]
    fn test_user_without_name_or_id() {
        let user: User = serde_json::from_str(r#"{"_id":"1","walletAddress":"abc"}"#).unwrap();
        assert_eq!(user.display_name, "");
        assert_eq!(user.wallet_address.as_deref(), Some("abc"));

        let err = serde_json::from_str::<User>(r#"{"email":"a@b.com"}"#).unwrap_err();
        assert!(err.to_string().contains("neither `_id` nor `id`"));
    }

    #[test]
    fn test_user_round_trips_through_session_form() {
        let user: User = serde_json::from_str(r#"{"_id":"1","name":"alice","walletAddress":"abc"}"#).unwrap();
        let stored = serde_json::to_string(&user).unwrap();
        assert_eq!(serde_json::from_str::<User>(&stored).unwrap(), user);
    }

    #[test]
    fn test_user_serializes_camel_case_without_empty_wallet() {
        let user = User {
            id: "1".to_string(),
            email: "a@b.com".to_string(),
            display_name: "alice".to_string(),
            bio: None,
            wallet_address: None,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["displayName"], "alice");
        assert!(json.get("walletAddress").is_none());
        assert!(json.get("bio").is_none());
    }

    #[test]
    fn test_wallet_binding_wire_format() {
        let binding = WalletBinding {
            wallet_type: WalletType::Phantom,
            address: "addr".to_string(),
        };
        let json = serde_json::to_value(&binding).unwrap();
        assert_eq!(json, serde_json::json!({"type": "phantom", "address": "addr"}));
    }

    #[test]
    fn test_wallet_type_from_str() {
        assert_eq!("Phantom".parse::<WalletType>(), Ok(WalletType::Phantom));
        assert_eq!("solflare".parse::<WalletType>(), Ok(WalletType::Solflare));
        assert!("metamask".parse::<WalletType>().is_err());
    }

    #[test]
    fn test_create_user_request_omits_missing_fields() {
        let req = CreateUserRequest {
            email: Some("a@b.com".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({"email": "a@b.com"}));
    }
}
