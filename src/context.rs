//! Service context bundling all port trait objects.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::adapters::live::{LiveFileSystem, LiveIdGenerator, StubBodyGenerator};
use crate::adapters::recording::{RecordingFileSystem, RecordingIdGenerator};
use crate::adapters::replaying::{ReplayingFileSystem, ReplayingIdGenerator};
use crate::cassette::config::CassetteConfig;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::ports::{BodyGenerator, FileSystem, IdGenerator};
use crate::workspace::DocumentId;

/// Bundles the port trait objects a synthesis run reaches the outside through.
///
/// Constructors wire up different adapter sets (live, replaying, recording).
pub struct ServiceContext {
    /// Filesystem for snapshots, configuration and rendered sources.
    pub fs: Box<dyn FileSystem>,
    /// Identity source for forked documents.
    pub id_gen: Box<dyn IdGenerator>,
    /// Generator for the body of the mapping method.
    pub body: Box<dyn BodyGenerator>,
}

impl ServiceContext {
    /// Creates a live context: real disk, random ids, placeholder bodies.
    #[must_use]
    pub fn live() -> Self {
        Self {
            fs: Box::new(LiveFileSystem),
            id_gen: Box::new(LiveIdGenerator::new()),
            body: Box::new(StubBodyGenerator),
        }
    }

    /// Replaces the body generator.
    #[must_use]
    pub fn with_body_generator(mut self, body: Box<dyn BodyGenerator>) -> Self {
        self.body = body;
        self
    }

    /// Replaces the id generator.
    #[must_use]
    pub fn with_id_generator(mut self, id_gen: Box<dyn IdGenerator>) -> Self {
        self.id_gen = id_gen;
        self
    }

    /// Creates a recording context that delegates to live adapters and
    /// captures every port call under `dir`.
    ///
    /// The returned session must be finished after the context is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the session directory cannot be created.
    pub fn recording_at(dir: PathBuf) -> Result<(Self, RecordingSession), String> {
        let session = RecordingSession::new(&dir)?;
        let ctx = Self {
            fs: Box::new(RecordingFileSystem::new(
                Box::new(LiveFileSystem),
                Arc::clone(&session.fs),
            )),
            id_gen: Box::new(RecordingIdGenerator::new(
                Box::new(LiveIdGenerator::new()),
                Arc::clone(&session.id_gen),
            )),
            body: Box::new(StubBodyGenerator),
        };
        Ok((ctx, session))
    }

    /// Creates a replaying context from a single cassette holding every port.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let cassette = CassetteConfig::load_cassette(path)?;
        // Each port gets its own replayer so cursors stay independent.
        Ok(Self {
            fs: Box::new(ReplayingFileSystem::new(CassetteReplayer::new(&cassette))),
            id_gen: Box::new(ReplayingIdGenerator::new(CassetteReplayer::new(&cassette))),
            body: Box::new(StubBodyGenerator),
        })
    }

    /// Creates a replaying context from per-port cassettes.
    ///
    /// Ports without a cassette get an adapter that panics with a clear
    /// message when called.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured cassette cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self, String> {
        let replayers = config.load_all()?;
        Ok(Self {
            fs: match replayers.fs {
                Some(r) => Box::new(ReplayingFileSystem::new(r)),
                None => Box::new(PanickingFileSystem),
            },
            id_gen: match replayers.id_gen {
                Some(r) => Box::new(ReplayingIdGenerator::new(r)),
                None => Box::new(PanickingIdGenerator),
            },
            body: Box::new(StubBodyGenerator),
        })
    }
}

// --- Panicking adapters for unspecified ports ---

struct PanickingFileSystem;
impl FileSystem for PanickingFileSystem {
    fn read_to_string(
        &self,
        _path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        panic!("FileSystem port not configured in CassetteConfig (no cassette loaded for fs)");
    }
    fn write(
        &self,
        _path: &Path,
        _contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        panic!("FileSystem port not configured in CassetteConfig (no cassette loaded for fs)");
    }
    fn exists(&self, _path: &Path) -> bool {
        panic!("FileSystem port not configured in CassetteConfig (no cassette loaded for fs)");
    }}

struct PanickingIdGenerator;
impl IdGenerator for PanickingIdGenerator {
    fn new_document_id(&self) -> DocumentId {
        panic!("IdGenerator port not configured in CassetteConfig (no cassette loaded for id_gen)");
    }
}
