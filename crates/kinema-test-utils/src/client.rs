use std::sync::Arc;

use kinema_core::LevelSelection;
use kinema_engine::{AttachmentId, ClientTuning, SegmentClient, SegmentClientFactory};
use kinema_platform::{Mutex, MutexGuard};
use url::Url;

/// Everything the fake clients were asked to do.
#[derive(Debug, Default)]
pub struct ClientLog {
    pub created: Vec<AttachmentId>,
    pub tunings: Vec<ClientTuning>,
    pub loaded: Vec<Url>,
    pub destroyed: Vec<AttachmentId>,
    pub start_loads: usize,
    pub media_recoveries: usize,
    pub levels: Vec<LevelSelection>,
}

#[derive(Debug)]
pub struct FakeClient {
    id: AttachmentId,
    log: Arc<Mutex<ClientLog>>,
}

impl SegmentClient for FakeClient {
    fn load_source(&mut self, url: &Url) {
        self.log.lock().loaded.push(url.clone());
    }

    fn start_load(&mut self) {
        self.log.lock().start_loads += 1;
    }

    fn recover_media_error(&mut self) {
        self.log.lock().media_recoveries += 1;
    }

    fn set_level(&mut self, selection: LevelSelection) {
        self.log.lock().levels.push(selection);
    }

    fn destroy(&mut self) {
        self.log.lock().destroyed.push(self.id);
    }
}

#[derive(Clone, Debug)]
pub struct FakeClientFactory {
    supported: bool,
    log: Arc<Mutex<ClientLog>>,
}

impl FakeClientFactory {
    #[must_use]
    pub fn new(supported: bool) -> Self {
        Self {
            supported,
            log: Arc::default(),
        }
    }

    pub fn log(&self) -> MutexGuard<'_, ClientLog> {
        self.log.lock()
    }

    /// Clients alive right now.
    #[must_use]
    pub fn live_clients(&self) -> usize {
        let log = self.log.lock();
        log.created.len() - log.destroyed.len()
    }
}

impl Default for FakeClientFactory {
    fn default() -> Self {
        Self::new(true)
    }
}

impl SegmentClientFactory for FakeClientFactory {
    type Client = FakeClient;

    fn is_supported(&self) -> bool {
        self.supported
    }

    fn create(&mut self, attachment: AttachmentId, tuning: &ClientTuning) -> FakeClient {
        let mut log = self.log.lock();
        log.created.push(attachment);
        log.tunings.push(tuning.clone());
        FakeClient {
            id: attachment,
            log: Arc::clone(&self.log),
        }
    }
}
