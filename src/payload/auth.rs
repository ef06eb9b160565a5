use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Deserialize, Serialize, Validate, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6, max = 32))]
    pub password: String,
    #[validate(custom = "validate_action")]
    pub action: String,
    pub name: Option<String>,
    pub store_name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AuthResponse {
    pub email: String,
    pub token: String,
}

fn validate_action(action: &str) -> Result<(), validator::ValidationError> {
    if action != "create" && action != "login" {
        return Err(validator::ValidationError::new("Invalid action"));
    }
    Ok(())
}
