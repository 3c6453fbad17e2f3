//! Session lifecycle and notification fan-out.
//!
//! The host talks to a [`SessionManager`]: it opens a session when a document opens, routes
//! that document's edit and diagnostics events to it, and closes it with the document. Every
//! detected pattern is returned to the caller and also pushed to the subscribed callbacks as a
//! [`PatternNotification`].
//!
//! The workspace save signal is not tied to a document, so it is handled here rather than in a
//! session: the manager asks each open session whether it still carries an unused import.

use crate::buffer::EditBuffer;
use crate::config::DetectorConfig;
use crate::declarations::DeclarationParserFactory;
use crate::diagnostics::DiagnosticSnapshot;
use crate::error::SessionError;
use crate::event::EditEvent;
use crate::pattern::PatternId;
use crate::session::Session;
use nudge_lang::LanguageProfile;
use std::collections::{BTreeMap, HashMap};

/// Opaque identifier for a document tracked by a [`SessionManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(u64);

impl DocumentId {
    /// Get the underlying numeric id.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Handle returned by [`SessionManager::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Get the underlying numeric id.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// "Pattern X completed in document Y."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternNotification {
    /// Document the pattern was detected in.
    pub document: DocumentId,
    /// The detected pattern.
    pub pattern: PatternId,
}

/// Callback invoked for every pattern notification.
pub type PatternCallback = Box<dyn FnMut(&PatternNotification) + Send>;

struct DocumentEntry {
    uri: String,
    session: Session,
}

/// Tracks one [`Session`] per open document.
pub struct SessionManager {
    config: DetectorConfig,
    language: LanguageProfile,
    parser_factory: Option<DeclarationParserFactory>,

    next_document_id: u64,
    documents: BTreeMap<DocumentId, DocumentEntry>,
    uri_to_document: HashMap<String, DocumentId>,

    next_subscription_id: u64,
    subscribers: Vec<(SubscriptionId, PatternCallback)>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("config", &self.config)
            .field("document_count", &self.documents.len())
            .field("subscriber_count", &self.subscribers.len())
            .field("has_parser_factory", &self.parser_factory.is_some())
            .finish()
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(DetectorConfig::default(), LanguageProfile::default())
    }
}

impl SessionManager {
    /// Create a manager with no open documents.
    pub fn new(config: DetectorConfig, language: LanguageProfile) -> Self {
        Self {
            config,
            language,
            parser_factory: None,
            next_document_id: 0,
            documents: BTreeMap::new(),
            uri_to_document: HashMap::new(),
            next_subscription_id: 0,
            subscribers: Vec::new(),
        }
    }

    /// Install the factory that gives each new session its declaration parser.
    ///
    /// Sessions opened earlier keep what they had.
    pub fn set_parser_factory(&mut self, factory: DeclarationParserFactory) {
        self.parser_factory = Some(factory);
    }

    /// The configuration new sessions are built from.
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Returns the number of open documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns `true` if no document is open.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Start a session for the document at `uri`.
    pub fn open_document(&mut self, uri: impl Into<String>) -> Result<DocumentId, SessionError> {
        let uri = uri.into();
        if !self.language.tracks_uri(&uri) {
            return Err(SessionError::UnsupportedDocument(uri));
        }
        if self.uri_to_document.contains_key(&uri) {
            return Err(SessionError::AlreadyOpen(uri));
        }

        let id = DocumentId(self.next_document_id);
        self.next_document_id = self.next_document_id.saturating_add(1);

        let parser = self.parser_factory.as_ref().map(|factory| factory());
        let session = Session::new(&self.config, &self.language, parser);
        tracing::info!(document = id.get(), %uri, "session opened");

        self.uri_to_document.insert(uri.clone(), id);
        self.documents.insert(id, DocumentEntry { uri, session });
        Ok(id)
    }

    /// Stop and drop the session for `id`.
    pub fn close_document(&mut self, id: DocumentId) -> Result<(), SessionError> {
        let Some(mut entry) = self.documents.remove(&id) else {
            return Err(SessionError::DocumentNotFound(id));
        };
        entry.session.stop();
        self.uri_to_document.remove(&entry.uri);
        tracing::info!(document = id.get(), uri = %entry.uri, "session closed");
        Ok(())
    }

    /// Look up the document opened for `uri`.
    pub fn document_id_for_uri(&self, uri: &str) -> Option<DocumentId> {
        self.uri_to_document.get(uri).copied()
    }

    /// The uri a document was opened with.
    pub fn document_uri(&self, id: DocumentId) -> Option<&str> {
        self.documents.get(&id).map(|entry| entry.uri.as_str())
    }

    /// Deliver an edit to `id` while `buffer` still holds the pre-edit text.
    pub fn before_edit(
        &mut self,
        id: DocumentId,
        buffer: &dyn EditBuffer,
        event: &EditEvent,
    ) -> Result<Vec<PatternId>, SessionError> {
        let patterns = self.session_mut(id)?.before_edit(buffer, event);
        self.notify_all(id, &patterns);
        Ok(patterns)
    }

    /// Deliver an edit to `id` after it has been applied to `buffer`.
    pub fn after_edit(
        &mut self,
        id: DocumentId,
        buffer: &dyn EditBuffer,
        event: &EditEvent,
    ) -> Result<Vec<PatternId>, SessionError> {
        let patterns = self.session_mut(id)?.after_edit(buffer, event);
        self.notify_all(id, &patterns);
        Ok(patterns)
    }

    /// Deliver the complete current diagnostics set of `id`.
    pub fn diagnostics_changed(
        &mut self,
        id: DocumentId,
        snapshot: &DiagnosticSnapshot,
    ) -> Result<Vec<PatternId>, SessionError> {
        let patterns = self.session_mut(id)?.diagnostics_changed(snapshot);
        self.notify_all(id, &patterns);
        Ok(patterns)
    }

    /// Handle a workspace save.
    ///
    /// Reports `remove-unused-import-statements` at most once per save, for the earliest-opened
    /// document that still has an unused import.
    pub fn workspace_saved(&mut self) -> Option<PatternNotification> {
        let document = self
            .documents
            .iter()
            .find(|(_, entry)| entry.session.has_active_unused_import())
            .map(|(id, _)| *id)?;

        let notification = PatternNotification {
            document,
            pattern: PatternId::RemoveUnusedImportStatements,
        };
        self.notify(&notification);
        Some(notification)
    }

    /// Register a callback for every pattern notification.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&PatternNotification) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription_id);
        self.next_subscription_id = self.next_subscription_id.saturating_add(1);
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Stop and drop every session.
    pub fn shutdown(&mut self) {
        for (id, mut entry) in std::mem::take(&mut self.documents) {
            entry.session.stop();
            tracing::info!(document = id.get(), uri = %entry.uri, "session closed");
        }
        self.uri_to_document.clear();
    }

    fn session_mut(&mut self, id: DocumentId) -> Result<&mut Session, SessionError> {
        self.documents
            .get_mut(&id)
            .map(|entry| &mut entry.session)
            .ok_or(SessionError::DocumentNotFound(id))
    }

    fn notify_all(&mut self, document: DocumentId, patterns: &[PatternId]) {
        for &pattern in patterns {
            self.notify(&PatternNotification { document, pattern });
        }
    }

    fn notify(&mut self, notification: &PatternNotification) {
        tracing::debug!(
            document = notification.document.get(),
            pattern = %notification.pattern,
            subscribers = self.subscribers.len(),
            "notifying subscribers"
        );
        for (_, callback) in &mut self.subscribers {
            callback(notification);
        }
    }
}
