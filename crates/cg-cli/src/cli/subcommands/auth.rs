use clap::{Args, Subcommand};

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Log in with email and password.
    Login(AuthLoginArgs),
    /// Create an account and log in.
    Register(AuthRegisterArgs),
    /// Clear the stored session.
    Logout,
    /// Show the current session.
    Status,
}

#[derive(Clone, Debug, Args)]
pub struct AuthLoginArgs {
    #[arg(long)]
    pub email: Option<String>,
    /// Password. Falls back to `CROPGUARD_PASSWORD`.
    #[arg(long)]
    pub password: Option<String>,
    /// Log in again even when a session exists.
    #[arg(long)]
    pub force: bool,
}

#[derive(Clone, Debug, Args)]
pub struct AuthRegisterArgs {
    #[command(flatten)]
    pub credentials: AuthLoginArgs,
    /// Display name for the new account.
    #[arg(long)]
    pub name: Option<String>,
}
