pub mod api;
pub mod credential;

pub mod dtos {
    pub mod ban;
    pub mod key;
    pub mod message;
    pub mod metrics;
    pub mod reply;
}

pub mod views {
    pub mod metrics;
    pub mod permissions;
}

pub use api::DashClient;
pub use credential::CredentialStore;
