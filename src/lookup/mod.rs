//! @acp:module "Lookup Cache"
//! @acp:summary "Fetch-once-per-session region and topic lists"
//! @acp:domain client
//! @acp:layer service
//!
//! Lists are kept only once fetched successfully; a failed fetch is retried
//! on the next call. The two lists load concurrently and independently.

use tracing::debug;

use crate::api::{LookupEntry, ScenarioBackend};
use crate::error::ApiError;

/// Which lookup list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Regions,
    Topics,
}

impl LookupKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupKind::Regions => "regions",
            LookupKind::Topics => "topics",
        }
    }
}

/// @acp:summary "Session cache of the read-only lookup lists"
#[derive(Debug, Default)]
pub struct LookupCache {
    regions: Option<Vec<LookupEntry>>,
    topics: Option<Vec<LookupEntry>>,
}

impl LookupCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// @acp:summary "Fetch whichever lists are not cached yet"
    ///
    /// Both fetches run even if one fails; the first error is returned.
    pub async fn ensure_loaded(&mut self, backend: &dyn ScenarioBackend) -> Result<(), ApiError> {
        let need_regions = self.regions.is_none();
        let need_topics = self.topics.is_none();
        if !need_regions && !need_topics {
            return Ok(());
        }

        let (regions, topics) = tokio::join!(
            async {
                if need_regions {
                    Some(backend.get_regions().await)
                } else {
                    None
                }
            },
            async {
                if need_topics {
                    Some(backend.get_topics().await)
                } else {
                    None
                }
            }
        );

        let mut first_error = None;
        for (kind, fetched) in [(LookupKind::Regions, regions), (LookupKind::Topics, topics)] {
            match fetched {
                Some(Ok(entries)) => {
                    debug!("cached {} {}", entries.len(), kind.as_str());
                    *self.slot_mut(kind) = Some(entries);
                }
                Some(Err(err)) => {
                    debug!("fetching {} failed: {}", kind.as_str(), err);
                    first_error.get_or_insert(err);
                }
                None => {}
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Cached list, fetching it first if needed
    pub async fn get(
        &mut self,
        kind: LookupKind,
        backend: &dyn ScenarioBackend,
    ) -> Result<&[LookupEntry], ApiError> {
        if self.slot(kind).is_none() {
            let entries = match kind {
                LookupKind::Regions => backend.get_regions().await?,
                LookupKind::Topics => backend.get_topics().await?,
            };
            debug!("cached {} {}", entries.len(), kind.as_str());
            *self.slot_mut(kind) = Some(entries);
        }
        Ok(self.slot(kind).map(Vec::as_slice).unwrap_or_default())
    }

    pub fn regions(&self) -> Option<&[LookupEntry]> {
        self.regions.as_deref()
    }

    pub fn topics(&self) -> Option<&[LookupEntry]> {
        self.topics.as_deref()
    }

    /// Label for an id, if the list is cached and contains it
    pub fn label(&self, kind: LookupKind, id: &str) -> Option<&str> {
        self.slot(kind)?
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.label.as_str())
    }

    /// Forget both lists so the next access refetches
    pub fn invalidate(&mut self) {
        self.regions = None;
        self.topics = None;
    }

    fn slot(&self, kind: LookupKind) -> Option<&Vec<LookupEntry>> {
        match kind {
            LookupKind::Regions => self.regions.as_ref(),
            LookupKind::Topics => self.topics.as_ref(),
        }
    }

    fn slot_mut(&mut self, kind: LookupKind) -> &mut Option<Vec<LookupEntry>> {
        match kind {
            LookupKind::Regions => &mut self.regions,
            LookupKind::Topics => &mut self.topics,
        }
    }
}
