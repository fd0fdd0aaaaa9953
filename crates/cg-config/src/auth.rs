//! Auth behaviour configuration.

use cg_core::TokenPolicy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// What to store when a successful login carries no token.
    #[serde(default)]
    pub token_policy: TokenPolicy,
}
