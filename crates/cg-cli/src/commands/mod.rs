pub mod alerts;
pub mod auth;
pub mod dispatch;
pub mod farm;
pub mod health;
pub mod predict;
pub mod preview;
pub mod shared;
