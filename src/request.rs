use chrono::Local;
use reqwest::{Client, Response};

use crate::config::Config;
use crate::{info_time, Error, Result};

/// Cookie-carrying HTTP session for one crawl.
///
/// The site only serves the worksheet to clients holding the cookies set by the start page,
/// so every request of a crawl goes through the same `Session`.
#[derive(Clone, Debug)]
pub struct Session {
    // Client uses Arc so we can clone cheaply
    client: Client,
}

impl Session {
    /// Builds the client and fetches the start page to establish the session cookies.
    pub async fn open(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;
        let session = Self { client };

        let start_time = Local::now();
        let res = session.client.get(&config.start_url).send().await?;
        check_status(res).await?;
        info_time!(start_time, "Opened session at {}", config.start_url);

        Ok(session)
    }
}

/// Submits the APEX worksheet form and returns the results page HTML.
/// The row count comes from `num_responses`, so a large value fetches everything at once.
pub async fn request_worksheet(session: &Session, config: &Config) -> Result<String> {
    info_time!("Running for {} start rows", config.num_responses);
    let start_time = Local::now();

    let res = session
        .client
        .post(&config.form_url)
        .form(&config.form.params(config.num_responses))
        .send()
        .await?;
    let html = check_status(res).await?;

    info_time!(start_time, "Fetched worksheet: {} bytes", html.len());
    Ok(html)
}

/// Requests a registrant's page and returns the HTML.
pub async fn request_detail(session: &Session, url: &str) -> Result<String> {
    tracing::debug!(url, "Requesting detail page");
    let res = session.client.get(url).send().await?;
    check_status(res).await
}

async fn check_status(res: Response) -> Result<String> {
    let status = res.status();
    if !status.is_success() {
        return Err(Error::HttpStatus {
            url: res.url().to_string(),
            status,
        });
    }
    Ok(res.text().await?)
}
