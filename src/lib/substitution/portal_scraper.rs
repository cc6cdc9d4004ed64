use std::time::Duration;

use chrono::NaiveDate;
use log::{debug, info};
use reqwest::{Client, StatusCode};

use super::{
    entry_source::{EntrySource, PlanDay},
    errors::FetchError,
    helpers::{build_plan_url, url_without_query},
    models::{Config, PortalConfig, SubstitutionEntry},
    plan_parser::{parse_plan_document, parse_tiles, select_tile},
};

/// Scrapes the web portal: login, pick the day tile, fetch and parse its plan.
///
/// Every fetch builds its own cookie-holding client, so concurrent requests
/// never share a session.
#[derive(Clone, Debug)]
pub struct ScrapingSource {
    pub portal: PortalConfig,
    pub school_id: String,
    pub username: String,
    pub password: String,
    pub timeout: Duration,
}

impl ScrapingSource {
    pub fn from_config(config: &Config) -> Self {
        Self {
            portal: config.portal.clone(),
            school_id: config.school_id.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
            timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }

    fn label_for(&self, day: PlanDay) -> &str {
        match day {
            PlanDay::Today => &self.portal.today_label,
            PlanDay::Tomorrow => &self.portal.tomorrow_label,
        }
    }

    fn new_session(&self) -> Result<Client, FetchError> {
        Ok(Client::builder()
            .cookie_store(true)
            .timeout(self.timeout)
            .build()?)
    }

    pub async fn login(&self, session: &Client) -> Result<(), FetchError> {
        info!("Logging into {} as {}", self.portal.login_url, self.username);
        let response = session
            .get(&self.portal.login_url)
            .query(&[
                ("user", self.username.as_str()),
                ("password", self.password.as_str()),
            ])
            .send()
            .await?;
        let status = response.status();
        let landed_on = url_without_query(response.url());
        debug!("Login answered {} at {}", status, landed_on);

        if status == StatusCode::OK && landed_on.starts_with(&self.portal.landing_url) {
            Ok(())
        } else {
            Err(FetchError::AuthenticationFailed {
                status: status.as_u16(),
                url: landed_on,
            })
        }
    }

    pub async fn find_tile_id(&self, session: &Client, label: &str) -> Result<String, FetchError> {
        let landing_page = session
            .get(&self.portal.landing_url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let tiles = parse_tiles(&landing_page, &self.portal)?;
        Ok(select_tile(&tiles, label)?.id.clone())
    }

    pub async fn fetch_plan(
        &self,
        session: &Client,
        tile_id: &str,
    ) -> Result<Vec<SubstitutionEntry>, FetchError> {
        let url = build_plan_url(&self.portal.plan_url_template, &self.school_id, tile_id);
        info!("Getting plan document from {}", url);
        let response = session.get(&url).send().await?;
        if response.status() != StatusCode::OK {
            return Err(FetchError::PlanFetchFailed {
                status: response.status().as_u16(),
            });
        }
        let document = response.text().await?;
        parse_plan_document(&document)
    }
}

impl EntrySource for ScrapingSource {
    async fn fetch_all(
        &self,
        day: PlanDay,
        _today: NaiveDate,
    ) -> Result<Vec<Vec<SubstitutionEntry>>, FetchError> {
        let session = self.new_session()?;
        self.login(&session).await?;
        let tile_id = self.find_tile_id(&session, self.label_for(day)).await?;
        let entries = self.fetch_plan(&session, &tile_id).await?;
        info!("Collected {} entries from the portal", entries.len());
        Ok(vec![entries])
    }
}
