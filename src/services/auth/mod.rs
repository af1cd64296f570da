pub mod access_jwt;

pub use access_jwt::{
    AccessJwtError, AccessTokenClaims, AuthError, AuthService, Authenticator,
    BEARER_AUTHENTICATION_TYPE,
};
