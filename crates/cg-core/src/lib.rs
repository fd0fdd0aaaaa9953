//! # cg-core
//!
//! Pure logic behind the CropGuard client's auth-gated predict workflow.
//!
//! Nothing in this crate touches the network or persistent storage. Session
//! state comes in as a [`SessionState`] snapshot and decisions come out as
//! values ([`GuardDecision`], [`SessionMarker`], [`AuthRequest`],
//! [`PredictRequest`], [`FarmRequest`]); `cg-session` and `cg-client` apply them.

pub mod auth;
pub mod control;
pub mod endpoint;
pub mod errors;
pub mod farm;
pub mod predict;
pub mod recent;
pub mod render;
pub mod session;

pub use auth::{AuthForm, AuthMode, AuthPanel, AuthRequest, AuthResponse, TokenPolicy};
pub use control::{BusyGuard, SubmitControl};
pub use endpoint::{ResponseSchema, SessionScheme, Variant};
pub use errors::FlowError;
pub use farm::{FarmForm, FarmRequest};
pub use predict::{
    Diagnosis, ImageFile, PredictForm, PredictPanel, PredictRequest, PreviewState, Severity,
};
pub use recent::{RecentResult, RecentResults};
pub use session::{GuardDecision, GuardOutcome, Page, SessionMarker, SessionState};
