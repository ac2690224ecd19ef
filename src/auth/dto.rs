use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for login. Fields are optional so that an absent field and a
/// JSON null both read as missing credentials rather than a deserialization
/// error; the pipeline owns that classification.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Response returned after a successful login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
}

impl PublicUser {
    pub fn from_user(user: &crate::auth::repo::User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_null_fields_deserialize_as_missing() {
        let empty: LoginRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.email.is_none());
        assert!(empty.password.is_none());

        let nulls: LoginRequest =
            serde_json::from_str(r#"{"email":null,"password":null}"#).unwrap();
        assert!(nulls.email.is_none());
        assert!(nulls.password.is_none());
    }

    #[test]
    fn public_user_serializes_id_and_email_only() {
        let public = PublicUser {
            id: Uuid::new_v4(),
            email: "a@x.com".to_string(),
        };
        let value = serde_json::to_value(&public).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object["email"], "a@x.com");
    }
}
