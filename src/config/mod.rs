mod settings;

pub use settings::{
    ComponentConfig, OtelConfig, ServerConfig, Settings, SiteConfig, TemplateConfig,
};
