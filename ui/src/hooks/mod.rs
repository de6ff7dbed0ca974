mod use_authentication;

pub use use_authentication::use_authentication;
