pub mod credentials;
pub mod gcal;
pub mod oauth;
