//! Example: Checking who a set of user tokens belongs to
//!
//! App credentials come from the usual config sources (see
//! `twitkit_infra::config`). The user's tokens are read from the
//! environment.
//!
//! ```bash
//! export TWITKIT_CONSUMER_KEY=...
//! export TWITKIT_CONSUMER_SECRET=...
//! export TWITTER_ACCESS_TOKEN=...
//! export TWITTER_ACCESS_SECRET=...
//! cargo run -p twitkit-infra --example verify_credentials
//! ```

use anyhow::Context;
use twitkit_core::{TimelineQuery, VerifyCredentials};
use twitkit_domain::{AuthToken, Session};
use twitkit_infra::{config, TwitterApiClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = config::load()?;
    let token = std::env::var("TWITTER_ACCESS_TOKEN").context("TWITTER_ACCESS_TOKEN not set")?;
    let secret = std::env::var("TWITTER_ACCESS_SECRET").context("TWITTER_ACCESS_SECRET not set")?;

    // The id and name are filled in from the verify call below.
    let session = Session::user(AuthToken::oauth1a(token, secret), 0, "");
    let client = TwitterApiClient::from_defaults(&config, session)?;

    let options = VerifyCredentials { skip_status: Some(true), ..Default::default() };
    let user = client.account()?.verify_credentials(options).await?;
    tracing::info!(id = user.id, screen_name = ?user.screen_name, "credentials verified");

    let timeline = client.statuses()?.home_timeline(&TimelineQuery::new().count(5)).await?;
    for tweet in timeline {
        tracing::info!(id = tweet.id, text = ?tweet.text, "home timeline");
    }

    Ok(())
}
