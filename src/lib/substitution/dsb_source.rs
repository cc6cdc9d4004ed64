use std::{error::Error, future::Future, time::Duration};

use chrono::NaiveDate;
use futures::future;
use log::{info, warn};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use super::{
    entry_source::{EntrySource, PlanDay},
    errors::FetchError,
    models::{
        dsb_model::{Timetable, EMPTY_AUTH_ID},
        Config, DsbApiConfig, SubstitutionEntry,
    },
    plan_parser::parse_plan_document,
};

pub type ClientError = Box<dyn Error + Send + Sync>;

/* the authid request carries the password in its query */
fn without_url(err: reqwest::Error) -> ClientError {
    Box::new(err.without_url())
}

async fn get_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, reqwest::Error> {
    request.send().await?.error_for_status()?.json().await
}

async fn get_text(request: RequestBuilder) -> Result<String, reqwest::Error> {
    request.send().await?.error_for_status()?.text().await
}

/// A trait, necessary for every timetable client the delegated source can wrap.
/// Returns one group of entries per plan day.
pub trait TimetableClient: Send + Sync + 'static {
    fn fetch_entries(
        &self,
    ) -> impl Future<Output = Result<Vec<Vec<SubstitutionEntry>>, ClientError>> + Send;
}

/// Entry source that hands the whole job to a [`TimetableClient`].
#[derive(Clone, Debug)]
pub struct DsbSource<C> {
    pub client: C,
}

impl<C: TimetableClient> DsbSource<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }
}

impl<C: TimetableClient> EntrySource for DsbSource<C> {
    async fn fetch_all(
        &self,
        _day: PlanDay,
        _today: NaiveDate,
    ) -> Result<Vec<Vec<SubstitutionEntry>>, FetchError> {
        let groups = self.client.fetch_entries().await.map_err(|err| {
            warn!("Timetable client failed: {}", err);
            FetchError::UpstreamFailure(err.to_string())
        })?;
        info!("Timetable client returned {} day groups", groups.len());
        Ok(groups)
    }
}

/// Client for the DSBmobile JSON API. Plan pages it links to are parsed with
/// the same parser the scraper uses.
#[derive(Clone, Debug)]
pub struct DsbMobileClient {
    pub api: DsbApiConfig,
    pub username: String,
    pub password: String,
    http_client: Client,
}

impl DsbMobileClient {
    pub fn new(
        api: DsbApiConfig,
        username: String,
        password: String,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            api,
            username,
            password,
            http_client,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Self::new(
            config.dsb.clone(),
            config.username.clone(),
            config.password.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub async fn auth_id(&self) -> Result<String, ClientError> {
        let request_url = format!("{}/authid", self.api.api_url.trim_end_matches('/'));
        let request = self.http_client.get(request_url).query(&[
            ("bundleid", self.api.bundle_id.as_str()),
            ("appversion", self.api.app_version.as_str()),
            ("osversion", self.api.os_version.as_str()),
            ("pushid", ""),
            ("user", self.username.as_str()),
            ("password", self.password.as_str()),
        ]);
        let auth_id: String = get_json(request).await.map_err(without_url)?;

        if auth_id.is_empty() || auth_id == EMPTY_AUTH_ID {
            return Err(format!("credentials for {} were rejected", self.username).into());
        }
        Ok(auth_id)
    }

    pub async fn timetables(&self, auth_id: &str) -> Result<Vec<Timetable>, ClientError> {
        let request_url = format!("{}/dsbtimetables", self.api.api_url.trim_end_matches('/'));
        let request = self
            .http_client
            .get(request_url)
            .query(&[("authid", auth_id)]);
        let timetables: Vec<Timetable> = get_json(request).await.map_err(without_url)?;
        info!("Got {} timetables from DSB", timetables.len());
        Ok(timetables)
    }

    async fn fetch_plan_group(&self, url: &str) -> Result<Vec<SubstitutionEntry>, ClientError> {
        info!("Getting plan document from {}", url);
        let request = self.http_client.get(url);
        let document = get_text(request).await.map_err(without_url)?;
        Ok(parse_plan_document(&document)?)
    }
}

impl TimetableClient for DsbMobileClient {
    async fn fetch_entries(&self) -> Result<Vec<Vec<SubstitutionEntry>>, ClientError> {
        let auth_id = self.auth_id().await?;
        let timetables = self.timetables(&auth_id).await?;
        let detail_urls = timetables
            .iter()
            .flat_map(|timetable| &timetable.childs)
            .map(|child| child.detail.as_str())
            .filter(|detail| !detail.is_empty())
            .collect::<Vec<_>>();

        future::try_join_all(detail_urls.into_iter().map(|url| self.fetch_plan_group(url))).await
    }
}
