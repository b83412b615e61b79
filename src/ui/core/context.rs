use std::sync::Arc;

use crate::bus::MessageBus;
use crate::config::Config;
use crate::logger::Logger;
use crate::service::{CatalogService, QueryService, RecordLoader};

use super::task_manager::TaskManager;

/// Services and shared handles every component is built from.
#[derive(Clone)]
pub struct AppContext {
    pub config: Config,
    pub bus: MessageBus,
    pub tasks: TaskManager,
    pub query: Arc<dyn QueryService>,
    pub records: Arc<dyn RecordLoader>,
    pub catalogs: Arc<dyn CatalogService>,
    pub logger: Option<Logger>,
}

impl AppContext {
    pub fn new(
        config: Config,
        tasks: TaskManager,
        query: Arc<dyn QueryService>,
        records: Arc<dyn RecordLoader>,
        catalogs: Arc<dyn CatalogService>,
    ) -> Self {
        Self {
            config,
            bus: MessageBus::new(),
            tasks,
            query,
            records,
            catalogs,
            logger: None,
        }
    }

    #[must_use]
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }
}
