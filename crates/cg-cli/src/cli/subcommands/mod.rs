pub mod auth;
pub mod farm;

pub use auth::AuthCommands;
pub use farm::FarmCommands;
