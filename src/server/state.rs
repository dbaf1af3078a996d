use std::sync::Arc;
use std::time::Instant;

use crate::config::Settings;
use crate::page::PageService;
use crate::renderer::{DataBindRenderer, FragmentRenderer};
use crate::template::Template;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub pages: Arc<PageService>,
    pub start_time: Instant,
}

impl AppState {
    /// Build application state around an already-loaded document shell,
    /// using the built-in data-binding renderer.
    pub fn new(settings: Settings, shell: Template) -> Self {
        Self::with_renderer(settings, shell, Arc::new(DataBindRenderer::new()))
    }

    /// Build application state with an injected fragment renderer.
    pub fn with_renderer(
        settings: Settings,
        shell: Template,
        renderer: Arc<dyn FragmentRenderer>,
    ) -> Self {
        let pages = Arc::new(PageService::new(
            Arc::new(shell),
            renderer,
            settings.site.clone(),
            settings.component.clone(),
        ));

        Self {
            settings: Arc::new(settings),
            pages,
            start_time: Instant::now(),
        }
    }
}
