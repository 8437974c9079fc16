pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::PublicUser;

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{generate_token, verify_token, Claims};

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// User's email address.
    /// Must be a valid email format.
    #[validate(email)]
    pub email: String,
    /// User's password. Only checked for presence here; the stored hash
    /// decides whether it is correct.
    #[validate(length(min = 1))]
    pub password: String,
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired username for the new account.
    /// Must be between 2 and 20 characters.
    #[validate(length(min = 2, max = 20))]
    pub username: String,
    /// Email address for the new account.
    /// Must be a valid email format.
    #[validate(email)]
    pub email: String,
    /// Password for the new account.
    /// Must be between 6 and 50 characters long.
    #[validate(length(min = 6, max = 50))]
    pub password: String,
}

/// Response structure after successful authentication (login or registration).
/// Contains the JWT access token and the public profile of the user.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The JWT (JSON Web Token) for session authentication.
    pub token: String,
    /// The authenticated user, without credential fields.
    pub user: PublicUser,
}
