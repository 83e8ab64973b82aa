//! PostgREST queries against the ads database.

use crate::config::SupabaseConfig;
use crate::records::{AdRecord, CompanyRecord, sample_descriptions};
use adgen_core::{AdExampleSource, AdGenError, Result};
use adgen_telemetry::{http_call_span, record_http_status};
use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::Instrument;

const AD_COLUMNS: &str = "meta_ad_id,eu_total_reach,\
facebook_pages!inner(page_name,company_id),\
facebook_ad_image_links(ad_images(detailed_description,image_url))";

pub struct SupabaseAdSource {
    client: Client,
    config: SupabaseConfig,
}

impl SupabaseAdSource {
    pub fn new(config: SupabaseConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AdGenError::Config(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &SupabaseConfig {
        &self.config
    }

    async fn select<T: DeserializeOwned>(&self, table: &str, query: &[(&str, String)]) -> Result<T> {
        let response = self
            .client
            .get(self.config.table_url(table))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&self.config.anon_key)
            .query(query)
            .send()
            .await
            .map_err(|e| AdGenError::DataSource(format!("{table} query failed: {e}")))?;

        let status = response.status();
        record_http_status(status.as_u16());
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdGenError::DataSource(format!("{table} query returned {status}: {body}")));
        }

        response
            .json()
            .await
            .map_err(|e| AdGenError::DataSource(format!("{table} returned malformed rows: {e}")))
    }

    async fn fetch_top_ads(&self, company_id: i64) -> Result<Vec<AdRecord>> {
        self.select(
            "facebook_ads",
            &[
                ("select", AD_COLUMNS.to_string()),
                ("facebook_pages.company_id", format!("eq.{company_id}")),
                ("eu_total_reach", "not.is.null".to_string()),
                ("order", "eu_total_reach.desc".to_string()),
                ("limit", self.config.fetch_limit.to_string()),
            ],
        )
        .await
    }

    async fn fetch_company(&self, company_id: i64) -> Result<Vec<CompanyRecord>> {
        self.select(
            "companies",
            &[
                ("select", "name".to_string()),
                ("company_id", format!("eq.{company_id}")),
                ("limit", "1".to_string()),
            ],
        )
        .await
    }
}

#[async_trait]
impl AdExampleSource for SupabaseAdSource {
    async fn top_ad_descriptions(&self, company_id: i64) -> Result<Vec<String>> {
        let records = self
            .fetch_top_ads(company_id)
            .instrument(http_call_span("supabase", "top_ads"))
            .await?;

        let mut rng = match self.config.sample_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let descriptions = sample_descriptions(&records, self.config.sample_size, &mut rng);
        tracing::info!(
            company_id,
            fetched = records.len(),
            descriptions = descriptions.len(),
            "Loaded example ad descriptions"
        );
        Ok(descriptions)
    }

    async fn company_name(&self, company_id: i64) -> Result<Option<String>> {
        let rows = self
            .fetch_company(company_id)
            .instrument(http_call_span("supabase", "company_name"))
            .await?;
        Ok(rows.into_iter().next().and_then(|row| row.name).filter(|name| !name.is_empty()))
    }
}
