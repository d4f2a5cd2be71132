pub mod claims;
pub mod error;
pub mod health;
pub mod openapi;
