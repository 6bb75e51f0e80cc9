//! Explicit context object for directory lookups.
//!
//! [`DirectoryContext`] owns the configured [`RestClient`], the table
//! names, and a memo of biographies keyed by person id. Create it once at
//! startup and pass it where needed; tests build as many as they like.

use cabinet_bio::{group_entries, normalize_entries, BiographyGroup, NormalizedCareerEntry};
use cabinet_core::CabinetConfig;
use cabinet_rest::{RestClient, RestConfig};

use crate::config::DirectoryConfig;
use crate::error::DirectoryError;
use crate::memo::Memo;
use crate::minister::{normalize_ministers, Minister};
use crate::page::Page;
use crate::search::{search, DirectoryQuery};

/// Clonable handle to the directory backend with memoized biographies.
///
/// Clones share the client and the memo.
///
/// # Example
///
/// ```no_run
/// use cabinet_directory::{DirectoryConfig, DirectoryContext, DirectoryQuery};
/// use cabinet_rest::RestConfig;
///
/// # async fn run() -> Result<(), cabinet_directory::DirectoryError> {
/// let context = DirectoryContext::new(
///     &RestConfig::new("https://project.example.co", "anon-key"),
///     DirectoryConfig::new().with_careers_table("parcours"),
/// )?;
///
/// let page = context.search(&DirectoryQuery::new().with_search("santé")).await?;
/// if let Some(id) = page.content.first().and_then(|m| m.id.clone()) {
///     for group in context.biography_groups(&id).await? {
///         println!("{} ({} entries)", group.label, group.entries.len());
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct DirectoryContext {
    client: RestClient,
    config: DirectoryConfig,
    biographies: Memo<String, Vec<NormalizedCareerEntry>>,
}

impl DirectoryContext {
    /// Build the client from `rest` and wrap it.
    pub fn new(rest: &RestConfig, config: DirectoryConfig) -> Result<Self, DirectoryError> {
        let client = RestClient::new(rest)?;
        Ok(Self::with_client(client, config))
    }

    /// Wrap an existing client.
    pub fn with_client(client: RestClient, config: DirectoryConfig) -> Self {
        let biographies = Memo::new(config.memo_ttl());
        Self {
            client,
            config,
            biographies,
        }
    }

    /// Read the `cabinet.backend` and `cabinet.directory` sections.
    pub fn from_config(config: &CabinetConfig) -> Result<Self, DirectoryError> {
        let rest: RestConfig = config.section()?;
        let directory: DirectoryConfig = config.section()?;
        Self::new(&rest, directory)
    }

    pub fn client(&self) -> &RestClient {
        &self.client
    }

    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    /// Every minister in the persons table.
    pub async fn ministers(&self) -> Result<Vec<Minister>, DirectoryError> {
        let request = self.client.from(&self.config.persons_table).build();
        let payload = self.client.execute(&request).await?;
        Ok(normalize_ministers(payload.rows()))
    }

    /// Fetch ministers, then filter, sort and page them.
    pub async fn search(&self, query: &DirectoryQuery) -> Result<Page<Minister>, DirectoryError> {
        let ministers = self.ministers().await?;
        Ok(search(&ministers, query))
    }

    /// Normalized career entries of one person, memoized per id.
    ///
    /// Empty when no careers table is configured. Failures are not
    /// memoized.
    pub async fn biography(
        &self,
        person_id: &str,
    ) -> Result<Vec<NormalizedCareerEntry>, DirectoryError> {
        let Some(table) = self.config.careers_table.as_deref() else {
            return Ok(Vec::new());
        };

        let key = person_id.to_string();
        if let Some(cached) = self.biographies.get(&key) {
            tracing::trace!(person_id, entries = cached.len(), "biography memo hit");
            return Ok(cached);
        }

        let request = self
            .client
            .from(table)
            .where_eq(&self.config.owner_column, person_id)
            .build();
        let payload = self.client.execute(&request).await?;
        let entries = normalize_entries(payload.rows());
        self.biographies.insert(key, entries.clone());
        tracing::debug!(
            person_id,
            entries = entries.len(),
            memoized = self.biographies.len(),
            "biography loaded"
        );
        Ok(entries)
    }

    /// Biography grouped by section, rebuilt on every call.
    pub async fn biography_groups(
        &self,
        person_id: &str,
    ) -> Result<Vec<BiographyGroup>, DirectoryError> {
        Ok(group_entries(self.biography(person_id).await?))
    }

    /// Number of biographies currently held in the memo.
    pub fn memoized_biographies(&self) -> usize {
        self.biographies.len()
    }

    /// Forget the memoized biography of one person.
    pub fn invalidate(&self, person_id: &str) {
        self.biographies.remove(&person_id.to_string());
    }

    /// Forget every memoized biography.
    pub fn clear_cache(&self) {
        self.biographies.clear();
    }
}
