//! Mint an access token for local testing.
//!
//! Usage: `JWT_PRIVATE_KEY=<base64 pem> cargo run --example issue_token -- <role> [user-id]`

use anyhow::{Context, Result};
use uuid::Uuid;

use court_server::auth::jwt::generate_access_token;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let mut args = std::env::args().skip(1);
    let role = args.next().context("Usage: issue_token <role> [user-id]")?;
    let user_id = match args.next() {
        Some(id) => id.parse().context("user-id must be a UUID")?,
        None => Uuid::now_v7(),
    };

    let private_key = std::env::var("JWT_PRIVATE_KEY").context("JWT_PRIVATE_KEY must be set")?;
    let expiry = std::env::var("JWT_ACCESS_EXPIRY")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(900);

    let token = generate_access_token(user_id, &role, &private_key, expiry)?;
    println!("{token}");
    Ok(())
}
