//! Run with: cargo run -p tvst-api --example checkin -- <filename>
//!
//! Authenticates with an existing access token, fetches the user profile,
//! and checks in the given episode file. Reads TVST_CLIENT_ID,
//! TVST_CLIENT_SECRET, and TVST_ACCESS_TOKEN from the environment.

use tvst_api::TvstClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client_id = std::env::var("TVST_CLIENT_ID")?;
    let client_secret = std::env::var("TVST_CLIENT_SECRET")?;
    let access_token = std::env::var("TVST_ACCESS_TOKEN")?;
    let filename = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "show.s01e01.mp4".into());

    let mut client = TvstClient::new(client_id, client_secret)?;
    client.authenticate(&access_token)?;

    let user = client.get_authenticated_user().await?;
    println!("User: {}", user.text().await?);

    let resp = client
        .set_watched_by_filename(&filename, false, false)
        .await?;
    println!("Checkin: {}", resp.status());
    println!("{}", resp.text().await?);

    Ok(())
}
