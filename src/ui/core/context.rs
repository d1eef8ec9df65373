use crate::backend::CourseApi;
use crate::config::Config;
use crate::logger::Logger;
use crate::ui::core::actions::MountId;

/// Services and settings shared by every page.
#[derive(Clone)]
pub struct AppContext {
    pub api: CourseApi,
    pub config: Config,
    pub logger: Logger,
}

impl AppContext {
    pub fn new(api: CourseApi, config: Config, logger: Logger) -> Self {
        Self { api, config, logger }
    }
}

/// Hands out increasing mount ids.
#[derive(Debug, Default)]
pub struct MountCounter {
    last: MountId,
}

impl MountCounter {
    pub fn next(&mut self) -> MountId {
        self.last += 1;
        self.last
    }
}
