//! Token command - Issue and verify auth tokens.
//!
//! ## Usage
//!
//! ```bash
//! job-board token issue --email jon@calhoun.io
//! job-board token verify "Bearer eyJ..."
//! ```

use std::sync::Arc;

use crate::api::middleware::bearer_token;
use crate::cli::args::{TokenAction, TokenArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::SystemClock;
use crate::services::{JwtSigner, TokenIssuer, TokenService};

use super::print_json;

/// Execute the token command
pub async fn execute(args: TokenArgs, config: Config) -> AppResult<()> {
    let signer = Arc::new(JwtSigner::new(config.jwt_secret_bytes())?);
    let tokens = TokenIssuer::new(signer, Arc::new(SystemClock), config.token_issuer.clone());

    match args.action {
        TokenAction::Issue { email } => {
            let token = tokens.issue(&email).await?;
            println!("{}", token);
        }
        TokenAction::Verify { token } => {
            let token = bearer_token(&token).ok_or(AppError::Unauthorized)?;
            let claims = tokens.verify(token).await?;
            print_json(&claims)?;
        }
    }

    Ok(())
}
