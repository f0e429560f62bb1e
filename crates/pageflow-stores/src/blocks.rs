//! Block-manager factories.
//!
//! Block plugin execution is out of scope; the context only drives the
//! manager through its lifecycle. `NullBlockFactory` serves pages without
//! block regions, `RecordingBlockFactory` lets tests assert the calls the
//! context makes.

use std::sync::Arc;

use parking_lot::Mutex;

use pageflow_model::{PageResult, PageUrl, Scope};

use crate::{BlockManager, BlockManagerFactory};

/// Factory producing managers that do nothing.
#[derive(Default)]
pub struct NullBlockFactory;

struct NullBlockManager;

impl BlockManager for NullBlockManager {
    fn load_blocks(&mut self) -> PageResult<()> {
        Ok(())
    }

    fn process_url_actions(&mut self, _url: &PageUrl) -> PageResult<bool> {
        Ok(false)
    }

    fn create_all_instances(&mut self) {}
}

impl BlockManagerFactory for NullBlockFactory {
    fn create(&self, _scope: &Scope, _layout: &str) -> Box<dyn BlockManager> {
        Box::new(NullBlockManager)
    }
}

/// Factory whose managers record every lifecycle call into a shared log.
#[derive(Default)]
pub struct RecordingBlockFactory {
    calls: Arc<Mutex<Vec<String>>>,
}

impl RecordingBlockFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The calls recorded so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

struct RecordingBlockManager {
    calls: Arc<Mutex<Vec<String>>>,
}

impl BlockManager for RecordingBlockManager {
    fn load_blocks(&mut self) -> PageResult<()> {
        self.calls.lock().push("load_blocks".to_string());
        Ok(())
    }

    fn process_url_actions(&mut self, url: &PageUrl) -> PageResult<bool> {
        self.calls.lock().push(format!("process_url_actions {url}"));
        Ok(false)
    }

    fn create_all_instances(&mut self) {
        self.calls.lock().push("create_all_instances".to_string());
    }
}

impl BlockManagerFactory for RecordingBlockFactory {
    fn create(&self, scope: &Scope, layout: &str) -> Box<dyn BlockManager> {
        self.calls
            .lock()
            .push(format!("create scope={} layout={layout}", scope.id));
        Box::new(RecordingBlockManager {
            calls: self.calls.clone(),
        })
    }
}
