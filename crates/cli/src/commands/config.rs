use rigquote_core::config::{AppConfig, CatalogSourceKind, LoadOptions, LogFormat};

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let source = match config.catalog.source {
        CatalogSourceKind::Embedded => "embedded",
        CatalogSourceKind::Snapshot => "snapshot",
    };
    let format = match config.logging.format {
        LogFormat::Compact => "compact",
        LogFormat::Pretty => "pretty",
        LogFormat::Json => "json",
    };

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];
    lines.push(render_line("catalog.source", source, "RIGQUOTE_CATALOG_SOURCE"));
    lines.push(render_line(
        "catalog.snapshot_path",
        &config
            .catalog
            .snapshot_path
            .as_deref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "(unset)".to_string()),
        "RIGQUOTE_CATALOG_SNAPSHOT",
    ));
    lines.push(render_line("logging.level", &config.logging.level, "RIGQUOTE_LOG_LEVEL"));
    lines.push(render_line("logging.format", format, "RIGQUOTE_LOG_FORMAT"));
    lines.join("\n")
}

fn render_line(key: &str, value: &str, env_var: &str) -> String {
    format!("  {key} = {value} (env override: {env_var})")
}
