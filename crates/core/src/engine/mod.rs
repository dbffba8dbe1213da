//! The link engine: owns the index, applies document events, and answers
//! suggestion and immediate-link requests.
//!
//! All methods take `&self` so a host can share one engine (for example as
//! `Rc<LinkEngine>`) between its document-event callbacks and its editor
//! callbacks. Every call completes its index mutation before returning, and a
//! full rebuild swaps in a fresh index at the end, so lookups never observe a
//! half-applied change.
//!
//! Time is passed in explicitly; hosts call [`LinkEngine::tick`] from their
//! own timer to run debounced re-indexing and the startup retry.

mod debounce;
mod flow;

pub use debounce::Debouncer;
pub use flow::{LinkOutcome, Suggestion};

use std::cell::{Cell, RefCell};
use std::fmt;
use std::time::{Duration, Instant};

use crate::config::LinkerConfig;
use crate::index::{
    DocumentMetadata, DocumentSource, IndexBuilder, IndexStats, LinkIndex, Match,
    SourceError, find_matches,
};

/// Runtime settings of the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Literal text that must precede the cursor for suggestions to run.
    /// Empty means suggestions run on every request.
    pub trigger_key: String,
    /// Coalescing window for change events of one document.
    pub debounce: Duration,
    /// Delay before retrying a startup build that produced nothing.
    pub retry_delay: Duration,
    /// Total startup build attempts, including the first.
    pub max_init_attempts: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from(&LinkerConfig::default())
    }
}

impl From<&LinkerConfig> for EngineConfig {
    fn from(cfg: &LinkerConfig) -> Self {
        Self {
            trigger_key: cfg.trigger_key.clone(),
            debounce: Duration::from_millis(cfg.debounce_ms),
            retry_delay: Duration::from_millis(cfg.retry_delay_ms),
            max_init_attempts: cfg.max_init_attempts,
        }
    }
}

/// User-facing messages raised by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// An immediate-link request found nothing to link.
    NoMatch,
    /// Startup builds kept producing an empty index.
    InitializationFailed { attempts: u32 },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMatch => write!(f, "No matching note found"),
            Self::InitializationFailed { attempts } => write!(
                f,
                "Failed to build the link index after {attempts} attempt(s); \
                 no link targets are available"
            ),
        }
    }
}

/// Startup progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitState {
    NotStarted,
    /// A retry is scheduled at `retry_at`; `attempts` builds have run so far.
    Retrying { attempts: u32, retry_at: Instant },
    Ready,
    Failed,
}

/// Result of a rebuild request.
#[derive(Debug, Clone)]
pub enum RebuildOutcome {
    Built(IndexStats),
    /// Another rebuild was already running.
    Skipped,
}

/// What a call to [`LinkEngine::tick`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Documents re-indexed from debounced change events.
    pub reindexed: Vec<String>,
    /// Whether a startup retry ran.
    pub retried: bool,
}

pub struct LinkEngine {
    config: EngineConfig,
    index: RefCell<LinkIndex>,
    pending: RefCell<Debouncer<String, DocumentMetadata>>,
    rebuilding: Cell<bool>,
    init: Cell<InitState>,
    notices: RefCell<Vec<Notice>>,
}

/// Clears the in-progress flag even when the build fails.
struct RebuildGuard<'a>(&'a Cell<bool>);

impl Drop for RebuildGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl LinkEngine {
    pub fn new(config: EngineConfig) -> Self {
        let pending = Debouncer::new(config.debounce);
        Self {
            config,
            index: RefCell::new(LinkIndex::new()),
            pending: RefCell::new(pending),
            rebuilding: Cell::new(false),
            init: Cell::new(InitState::NotStarted),
            notices: RefCell::new(Vec::new()),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // --- Lifecycle ---

    /// Clear the index and rebuild it from `source`.
    ///
    /// A request made while a rebuild is running (for example from inside
    /// the source's listing) is dropped and reported as `Skipped`.
    pub fn rebuild_all(
        &self,
        source: &dyn DocumentSource,
    ) -> Result<RebuildOutcome, SourceError> {
        if self.rebuilding.replace(true) {
            tracing::debug!("rebuild already in progress, request dropped");
            return Ok(RebuildOutcome::Skipped);
        }
        let _guard = RebuildGuard(&self.rebuilding);

        let mut fresh = LinkIndex::new();
        let stats = IndexBuilder::new(source).full_rebuild(&mut fresh, None)?;
        *self.index.borrow_mut() = fresh;

        if stats.entries > 0 && matches!(self.init.get(), InitState::Retrying { .. }) {
            self.init.set(InitState::Ready);
        }
        Ok(RebuildOutcome::Built(stats))
    }

    /// Run the startup build. If it fails or yields no entries, a retry is
    /// scheduled for [`tick`](Self::tick) until the attempt budget runs out.
    pub fn initialize(&self, source: &dyn DocumentSource, now: Instant) -> InitState {
        self.attempt_init(source, 1, now)
    }

    fn attempt_init(&self, source: &dyn DocumentSource, attempt: u32, now: Instant) -> InitState {
        let built = match self.rebuild_all(source) {
            Ok(RebuildOutcome::Built(stats)) => stats.entries > 0,
            Ok(RebuildOutcome::Skipped) => false,
            Err(e) => {
                tracing::warn!(attempt, "link index build failed: {e}");
                false
            }
        };

        let state = if built {
            InitState::Ready
        } else if attempt < self.config.max_init_attempts {
            tracing::info!(
                attempt,
                retry_in_ms = self.config.retry_delay.as_millis() as u64,
                "link index is empty, retry scheduled"
            );
            InitState::Retrying { attempts: attempt, retry_at: now + self.config.retry_delay }
        } else {
            tracing::warn!(attempts = attempt, "link index initialization failed");
            self.notices.borrow_mut().push(Notice::InitializationFailed { attempts: attempt });
            InitState::Failed
        };

        self.init.set(state);
        state
    }

    pub fn init_state(&self) -> InitState {
        self.init.get()
    }

    pub fn is_rebuilding(&self) -> bool {
        self.rebuilding.get()
    }

    /// Run work that has come due: debounced re-indexing and, during
    /// startup, a scheduled retry.
    pub fn tick(&self, source: &dyn DocumentSource, now: Instant) -> TickReport {
        let mut report = TickReport::default();

        let due = self.pending.borrow_mut().take_due(now);
        if !due.is_empty() {
            let mut index = self.index.borrow_mut();
            for (id, metadata) in due {
                index.upsert_document(&id, &metadata);
                tracing::debug!(id = %id, "re-indexed after debounce");
                report.reindexed.push(id);
            }
        }

        if let InitState::Retrying { attempts, retry_at } = self.init.get()
            && now >= retry_at
        {
            self.attempt_init(source, attempts + 1, now);
            report.retried = true;
        }

        report
    }

    /// Apply every pending change immediately.
    pub fn flush_pending(&self) -> usize {
        let all = self.pending.borrow_mut().drain();
        let mut index = self.index.borrow_mut();
        for (id, metadata) in &all {
            index.upsert_document(id, metadata);
        }
        all.len()
    }

    /// Earliest instant at which [`tick`](Self::tick) has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        let debounce = self.pending.borrow().next_deadline();
        let retry = match self.init.get() {
            InitState::Retrying { retry_at, .. } => Some(retry_at),
            _ => None,
        };
        match (debounce, retry) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    // --- Document events ---

    pub fn on_document_created(&self, id: &str, metadata: &DocumentMetadata) {
        self.pending.borrow_mut().cancel(&id.to_string());
        let added = self.index.borrow_mut().upsert_document(id, metadata);
        tracing::debug!(id, added, "document created");
    }

    /// Queue a re-index of `id`; repeated changes inside the debounce window
    /// collapse into one.
    pub fn on_document_changed(&self, id: &str, metadata: DocumentMetadata, now: Instant) {
        let replaced = self.pending.borrow_mut().schedule(id.to_string(), metadata, now);
        if replaced {
            tracing::trace!(id, "pending re-index replaced");
        }
    }

    pub fn on_document_deleted(&self, id: &str) {
        self.pending.borrow_mut().cancel(&id.to_string());
        let removed = self.index.borrow_mut().remove_document(id);
        tracing::debug!(id, removed, "document deleted");
    }

    pub fn on_document_renamed(&self, id: &str, new_title: &str) {
        if let Some(pending) = self.pending.borrow_mut().get_mut(&id.to_string()) {
            pending.title = new_title.to_string();
        }
        let updated = self.index.borrow_mut().rename_document(id, new_title);
        tracing::debug!(id, new_title, updated, "document renamed");
    }

    /// The document's identifier changed (e.g. its path moved).
    pub fn on_document_moved(&self, old_id: &str, new_id: &str) {
        self.pending.borrow_mut().rekey(&old_id.to_string(), new_id.to_string());
        let updated = self.index.borrow_mut().relocate_document(old_id, new_id);
        tracing::debug!(old_id, new_id, updated, "document moved");
    }

    // --- Queries ---

    /// Ranked lookup of a raw query.
    pub fn search(&self, query: &str) -> Vec<Match> {
        find_matches(&self.index.borrow(), query)
    }

    /// Read access to the index.
    pub fn with_index<R>(&self, f: impl FnOnce(&LinkIndex) -> R) -> R {
        f(&self.index.borrow())
    }

    /// Notices raised since the last call.
    pub fn take_notices(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.notices.borrow_mut())
    }

    fn push_notice(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }
}

impl Default for LinkEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{EntryKind, SourceDocument};
    use std::rc::Rc;

    fn doc(id: &str, title: &str) -> SourceDocument {
        SourceDocument::new(id, DocumentMetadata::titled(title))
    }

    fn no_docs() -> Vec<SourceDocument> {
        Vec::new()
    }

    fn engine() -> LinkEngine {
        LinkEngine::new(EngineConfig {
            debounce: Duration::from_millis(300),
            retry_delay: Duration::from_secs(2),
            max_init_attempts: 2,
            ..Default::default()
        })
    }

    #[test]
    fn test_initialize_ready() {
        let e = engine();
        let state = e.initialize(&vec![doc("paris.md", "Paris")], Instant::now());
        assert_eq!(state, InitState::Ready);
        assert_eq!(e.search("paris").len(), 1);
        assert!(e.take_notices().is_empty());
    }

    #[test]
    fn test_initialize_retries_once_then_fails() {
        let e = engine();
        let t0 = Instant::now();
        let empty = no_docs();

        let state = e.initialize(&empty, t0);
        assert!(matches!(state, InitState::Retrying { attempts: 1, .. }));
        assert_eq!(e.next_deadline(), Some(t0 + Duration::from_secs(2)));

        // Not due yet.
        assert!(!e.tick(&empty, t0 + Duration::from_secs(1)).retried);

        let report = e.tick(&empty, t0 + Duration::from_secs(2));
        assert!(report.retried);
        assert_eq!(e.init_state(), InitState::Failed);
        assert_eq!(e.take_notices(), vec![Notice::InitializationFailed { attempts: 2 }]);

        // Failure is reported once and nothing else is scheduled.
        assert!(!e.tick(&empty, t0 + Duration::from_secs(10)).retried);
        assert!(e.take_notices().is_empty());
        assert_eq!(e.next_deadline(), None);
    }

    #[test]
    fn test_initialize_recovers_on_retry() {
        let e = engine();
        let t0 = Instant::now();
        e.initialize(&no_docs(), t0);

        let docs = vec![doc("paris.md", "Paris")];
        e.tick(&docs, t0 + Duration::from_secs(3));
        assert_eq!(e.init_state(), InitState::Ready);
        assert_eq!(e.search("par").len(), 1);
    }

    struct Reentrant {
        engine: Rc<LinkEngine>,
        nested: RefCell<Option<bool>>,
    }

    impl DocumentSource for Reentrant {
        fn list_all_documents(&self) -> Result<Vec<SourceDocument>, SourceError> {
            let nested = self.engine.rebuild_all(self)?;
            *self.nested.borrow_mut() = Some(matches!(nested, RebuildOutcome::Skipped));
            Ok(vec![doc("rome.md", "Rome")])
        }
    }

    #[test]
    fn test_concurrent_rebuild_is_dropped() {
        let engine = Rc::new(engine());
        let source = Reentrant { engine: Rc::clone(&engine), nested: RefCell::new(None) };

        let outcome = engine.rebuild_all(&source).unwrap();
        assert!(matches!(outcome, RebuildOutcome::Built(_)));
        assert_eq!(*source.nested.borrow(), Some(true));
        assert!(!engine.is_rebuilding());
        assert_eq!(engine.search("rome").len(), 1);
    }

    #[test]
    fn test_failed_rebuild_clears_flag_and_keeps_index() {
        struct Down;
        impl DocumentSource for Down {
            fn list_all_documents(&self) -> Result<Vec<SourceDocument>, SourceError> {
                Err(SourceError::Unavailable("down".into()))
            }
        }

        let e = engine();
        e.rebuild_all(&vec![doc("paris.md", "Paris")]).unwrap();
        assert!(e.rebuild_all(&Down).is_err());
        assert!(!e.is_rebuilding());
        assert_eq!(e.search("paris").len(), 1);
    }

    #[test]
    fn test_changes_are_debounced() {
        let e = engine();
        let t0 = Instant::now();
        let none = no_docs();

        for (i, title) in ["Par", "Pari", "Paris"].iter().enumerate() {
            let at = t0 + Duration::from_millis(100 * i as u64);
            e.on_document_changed("paris.md", DocumentMetadata::titled(*title), at);
        }
        assert!(e.search("paris").is_empty());

        // 300ms after the first event, but the window restarted at 200ms.
        assert!(e.tick(&none, t0 + Duration::from_millis(300)).reindexed.is_empty());

        let report = e.tick(&none, t0 + Duration::from_millis(500));
        assert_eq!(report.reindexed, vec!["paris.md".to_string()]);
        let matches = e.search("paris");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].entry.target, "Paris");
    }

    #[test]
    fn test_delete_cancels_pending_change() {
        let e = engine();
        let t0 = Instant::now();
        e.on_document_created("a.md", &DocumentMetadata::titled("Alpha"));
        e.on_document_changed("a.md", DocumentMetadata::titled("Alphabet"), t0);
        e.on_document_deleted("a.md");

        assert!(e.tick(&no_docs(), t0 + Duration::from_secs(1)).reindexed.is_empty());
        assert!(e.search("alpha").is_empty());
    }

    #[test]
    fn test_rename_updates_index_and_pending_change() {
        let e = engine();
        let t0 = Instant::now();
        let mut meta = DocumentMetadata::titled("Paris");
        meta.headings = vec!["Museums".into()];
        e.on_document_created("paris.md", &meta);

        e.on_document_renamed("paris.md", "Paris Trip");
        let title = &e.search("paristrip")[0].entry;
        assert_eq!(title.kind, EntryKind::Title);
        assert_eq!(title.target, "Paris Trip");
        assert_eq!(e.search("museums")[0].entry.source_title, "Paris Trip");

        e.on_document_changed("paris.md", meta.clone(), t0);
        e.on_document_renamed("paris.md", "Lyon");
        e.tick(&no_docs(), t0 + Duration::from_secs(1));
        assert_eq!(e.search("lyon")[0].entry.target, "Lyon");
    }

    #[test]
    fn test_rename_through_alias_keeps_alias() {
        let e = engine();
        let meta = DocumentMetadata {
            title: "Paris".into(),
            aliases: vec!["Lutetia".into()],
            ..Default::default()
        };
        e.on_document_created("p.md", &meta);

        e.on_document_renamed("p.md", "Lutetia");
        e.on_document_renamed("p.md", "Paris");

        let alias = &e.search("lutetia")[0].entry;
        assert_eq!(alias.target, "Paris");
        assert_eq!(alias.display_text, "Lutetia");
        assert_eq!(e.search("paris")[0].entry.display_text, "Paris");
    }

    #[test]
    fn test_move_keeps_pending_change() {
        let e = engine();
        let t0 = Instant::now();
        e.on_document_created("old.md", &DocumentMetadata::titled("Note"));
        e.on_document_changed("old.md", DocumentMetadata::titled("Note Two"), t0);
        e.on_document_moved("old.md", "new.md");

        let report = e.tick(&no_docs(), t0 + Duration::from_secs(1));
        assert_eq!(report.reindexed, vec!["new.md".to_string()]);
        let matches = e.search("notetwo");
        assert_eq!(matches[0].entry.source_id, "new.md");
        assert!(e.with_index(|idx| !idx.contains_key("note")));
    }

    #[test]
    fn test_flush_pending() {
        let e = engine();
        e.on_document_changed("a.md", DocumentMetadata::titled("Alpha"), Instant::now());
        assert_eq!(e.flush_pending(), 1);
        assert_eq!(e.search("alpha").len(), 1);
    }

    #[test]
    fn test_notice_text() {
        assert_eq!(Notice::NoMatch.to_string(), "No matching note found");
        assert!(
            Notice::InitializationFailed { attempts: 2 }.to_string().contains("2 attempt(s)")
        );
    }
}
