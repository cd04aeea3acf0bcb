mod login;
mod manager;
mod mfa;

pub use manager::SessionManager;
