//! HTTP client for the remote event store.

use calgrid_core::{CalendarEvent, EventDraft, MonthCursor, StoreError, StoreResult};
use chrono::NaiveDate;

/// Base URL of the event store service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Thin client over the store's endpoints.
///
/// One method per remote call; no caching, no retries, no request
/// de-duplication. Callers decide what to do with a failure.
#[derive(Clone)]
pub struct StoreClient {
    http: reqwest::Client,
    base_url: String,
}

impl StoreClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        StoreClient {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// GET /list?date=YYYY-MM-01&specificDay=false - every event in the month.
    pub async fn list_month(&self, cursor: MonthCursor) -> StoreResult<Vec<CalendarEvent>> {
        let resp = self
            .http
            .get(format!("{}/list", self.base_url))
            .query(&[("date", cursor.anchor().as_str()), ("specificDay", "false")])
            .send()
            .await
            .map_err(network)?;

        let resp = checked(resp).await?;
        resp.json().await.map_err(network)
    }

    /// GET /list?date=YYYY-MM-DD&specificDay=true - events on exactly one day.
    pub async fn list_day(&self, date: NaiveDate) -> StoreResult<Vec<CalendarEvent>> {
        let date = date.format("%Y-%m-%d").to_string();
        let resp = self
            .http
            .get(format!("{}/list", self.base_url))
            .query(&[("date", date.as_str()), ("specificDay", "true")])
            .send()
            .await
            .map_err(network)?;

        let resp = checked(resp).await?;
        resp.json().await.map_err(network)
    }

    /// POST /save - persist a new entry.
    ///
    /// The store assigns the id; its response body is not documented, so a
    /// 2xx is success and the reconciling month fetch observes the id.
    pub async fn create(&self, draft: &EventDraft) -> StoreResult<()> {
        let resp = self
            .http
            .post(format!("{}/save", self.base_url))
            .json(draft)
            .send()
            .await
            .map_err(network)?;

        checked(resp).await?;
        Ok(())
    }

    /// PUT /update/{id} - replace title/description/date of an entry.
    pub async fn update(&self, id: i64, draft: &EventDraft) -> StoreResult<()> {
        let resp = self
            .http
            .put(format!("{}/update/{}", self.base_url, id))
            .json(draft)
            .send()
            .await
            .map_err(network)?;

        checked(resp).await?;
        Ok(())
    }

    /// DELETE /delete/{id} - remove an entry. An id the store no longer
    /// holds comes back as a server rejection.
    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        let resp = self
            .http
            .delete(format!("{}/delete/{}", self.base_url, id))
            .send()
            .await
            .map_err(network)?;

        checked(resp).await?;
        Ok(())
    }
}

fn network(err: reqwest::Error) -> StoreError {
    StoreError::Network(err.to_string())
}

/// Turn a non-2xx response into `StoreError::Server`, carrying the body as
/// detail when the store sent one.
async fn checked(resp: reqwest::Response) -> StoreResult<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let detail = resp.text().await.ok().filter(|body| !body.is_empty());
    Err(StoreError::Server {
        status: status.as_u16(),
        detail,
    })
}
