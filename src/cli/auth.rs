use anyhow::{Context, Result, anyhow};
use std::io::{self, Write};

use crate::core::AppConfig;
use crate::core::db::{async_db, initialize_db};
use crate::google::credentials::{HOST_ACCOUNT_ID, save_refresh_token};
use crate::google::oauth::GoogleOAuth;

const OOB_REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";

pub async fn run() -> Result<()> {
    let config = AppConfig::from_env("3000")?;
    let redirect_uri =
        std::env::var("SLOTBOOK_GOOGLE_REDIRECT_URI").unwrap_or_else(|_| OOB_REDIRECT_URI.to_string());
    let oauth = GoogleOAuth::new(reqwest::Client::new(), &config).with_redirect_uri(redirect_uri);

    println!(
        "\nPlease open the following URL in your browser and authorize access:\n\n{}\n",
        oauth.authorization_url()
    );
    print!("Paste the authorization code shown by Google here: ");
    io::stdout().flush()?;
    let mut code = String::new();
    io::stdin()
        .read_line(&mut code)
        .context("Failed to read code")?;
    let code = code.trim();

    let token = oauth.exchange_code(code).await?;

    // Store the refresh token in the DB and use that to fetch an access token from now on.
    let db = async_db(&config.storage_path)
        .await
        .context("Failed to connect to db")?;
    db.call(|conn| {
        initialize_db(conn)?;
        Ok(())
    })
    .await?;
    let refresh_token = token
        .refresh_token
        .ok_or(anyhow!("No refresh token in response"))?;
    save_refresh_token(&db, HOST_ACCOUNT_ID, &refresh_token).await?;
    println!("Refresh token for {} saved to DB.", HOST_ACCOUNT_ID);

    Ok(())
}
