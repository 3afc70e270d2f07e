use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use dv_core::domain::value_objects::{ProfileChanges, UserProfile};
use dv_core::services::Registration;
use dv_core::validation::{ObjectSchema, Rule};

use crate::middleware::RequestSchema;

static SIGNUP_SCHEMA: Lazy<ObjectSchema> = Lazy::new(|| {
    ObjectSchema::new()
        .field("name", Rule::string().trim().min(1, "Name is required"))
        .field(
            "email",
            Rule::string().trim().lowercase().email("Invalid email address"),
        )
        .field(
            "password",
            Rule::string().min(6, "Password must be at least 6 characters"),
        )
        .optional("bio", Rule::string().trim())
});

static LOGIN_SCHEMA: Lazy<ObjectSchema> = Lazy::new(|| {
    ObjectSchema::new()
        .field(
            "email",
            Rule::string().trim().lowercase().email("Invalid email address"),
        )
        .field(
            "password",
            Rule::string().min(6, "Password must be at least 6 characters"),
        )
});

static UPDATE_PROFILE_SCHEMA: Lazy<ObjectSchema> = Lazy::new(|| {
    ObjectSchema::new()
        .optional("name", Rule::string().trim().min(1, "Name is required"))
        .optional("bio", Rule::string().trim())
        .optional("profileImage", Rule::string().trim().url("Invalid url"))
});

#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub bio: Option<String>,
}

impl RequestSchema for SignupRequest {
    fn schema() -> &'static ObjectSchema {
        &SIGNUP_SCHEMA
    }
}

impl From<SignupRequest> for Registration {
    fn from(request: SignupRequest) -> Self {
        Registration {
            name: request.name,
            email: request.email,
            password: request.password,
            bio: request.bio,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl RequestSchema for LoginRequest {
    fn schema() -> &'static ObjectSchema {
        &LOGIN_SCHEMA
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
}

impl RequestSchema for UpdateProfileRequest {
    fn schema() -> &'static ObjectSchema {
        &UPDATE_PROFILE_SCHEMA
    }
}

impl From<UpdateProfileRequest> for ProfileChanges {
    fn from(request: UpdateProfileRequest) -> Self {
        ProfileChanges {
            name: request.name,
            bio: request.bio,
            profile_image: request.profile_image,
        }
    }
}

/// Registration result; never carries the password
#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
    pub user: UserProfile,
}
