//! Startup loading of the process-lifetime document shell.

use thiserror::Error;

use crate::config::TemplateConfig;

use super::parse::TemplateBuilder;
use super::types::{Template, TemplateError};

/// Shell loading error type
#[derive(Debug, Error)]
pub enum ShellLoadError {
    #[error("Failed to read shell template {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] TemplateError),
}

/// Read and compile the document shell from disk.
///
/// Called once at startup; the returned template is shared read-only for
/// the rest of the process. A malformed shell is a configuration error and
/// aborts startup.
pub fn load_shell(config: &TemplateConfig) -> Result<Template, ShellLoadError> {
    let source = std::fs::read_to_string(&config.path).map_err(|e| ShellLoadError::Read {
        path: config.path.clone(),
        source: e,
    })?;

    let mut builder = TemplateBuilder::new(source);
    for name in &config.mandatory {
        builder = builder.mandatory(name);
    }
    let template = builder.build()?;

    tracing::info!(
        path = %config.path,
        placeholders = template.placeholder_count(),
        mandatory = template.mandatory_names().len(),
        "Document shell loaded"
    );

    Ok(template)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp_shell(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("shell-{}-{}.html", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_shell_from_file() {
        let path = write_temp_shell("ok", "<head>{{title}}</head><body>{{body}}</body>");
        let config = TemplateConfig {
            path: path.to_string_lossy().into_owned(),
            mandatory: vec!["title".to_string()],
        };

        let template = load_shell(&config).unwrap();
        assert!(template.has_body_outlet());
        assert_eq!(template.mandatory_names(), vec!["title"]);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_load_shell_missing_file() {
        let config = TemplateConfig {
            path: "/nonexistent/shell.html".to_string(),
            mandatory: vec![],
        };

        let err = load_shell(&config).unwrap_err();
        assert!(matches!(err, ShellLoadError::Read { .. }));
    }

    #[test]
    fn test_load_shell_malformed_file() {
        let path = write_temp_shell("bad", "<head>{{title</head>");
        let config = TemplateConfig {
            path: path.to_string_lossy().into_owned(),
            mandatory: vec![],
        };

        let err = load_shell(&config).unwrap_err();
        assert!(matches!(
            err,
            ShellLoadError::Parse(TemplateError::MalformedTemplate(_))
        ));

        let _ = std::fs::remove_file(path);
    }
}
