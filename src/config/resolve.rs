use crate::config::schema::FileConfig;
use crate::config::ResolvedConfig;
use crate::errors::{DepAtlasError, Result};
use crate::output::OutputFormat;
use crate::walk::Language;
use std::path::{Path, PathBuf};

pub const PROJECT_CONFIG: &str = ".depatlas.toml";

/// CLI overrides extracted from command arguments.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub format: Option<OutputFormat>,
    pub quiet: bool,
    pub languages: Vec<Language>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

/// Resolve configuration by applying layers bottom-up:
/// 1. Built-in defaults
/// 2. User config (`<config_dir>/depatlas/config.toml`)
/// 3. Project config (nearest `.depatlas.toml` walking up from `working_dir`)
/// 4. Environment variables
/// 5. CLI overrides
pub fn resolve_config(working_dir: &Path, cli: &CliOverrides) -> Result<ResolvedConfig> {
    resolve_with(
        working_dir,
        find_user_config().as_deref(),
        |key| std::env::var(key).ok(),
        cli,
    )
}

fn resolve_with<E>(
    working_dir: &Path,
    user_config: Option<&Path>,
    env: E,
    cli: &CliOverrides,
) -> Result<ResolvedConfig>
where
    E: Fn(&str) -> Option<String>,
{
    let mut config = ResolvedConfig::default();

    if let Some(path) = user_config.filter(|p| p.is_file()) {
        let file_config = load_file(path, "user")?;
        apply_file_config(&mut config, &file_config)?;
        config.loaded_files.push(path.to_path_buf());
    }

    if let Some(path) = find_project_config(working_dir) {
        let file_config = load_file(&path, "project")?;
        apply_file_config(&mut config, &file_config)?;
        config.loaded_files.push(path);
    }

    apply_env_vars(&mut config, env)?;
    apply_cli_overrides(&mut config, cli);

    tracing::debug!("Loaded config files: {:?}", config.loaded_files);
    Ok(config)
}

fn load_file(path: &Path, layer: &str) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path).map_err(|_| {
        DepAtlasError::Config(format!("Could not read {layer} config: {}", path.display()))
    })?;
    FileConfig::from_toml(&content).map_err(|e| {
        DepAtlasError::Config(format!("Invalid {layer} config {}: {e}", path.display()))
    })
}

fn find_user_config() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("depatlas").join("config.toml"))
}

fn find_project_config(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let config_path = dir.join(PROJECT_CONFIG);
        if config_path.is_file() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

fn parse_format(value: &str) -> Result<OutputFormat> {
    value.parse().map_err(DepAtlasError::Config)
}

fn apply_file_config(config: &mut ResolvedConfig, file: &FileConfig) -> Result<()> {
    if let Some(ref format) = file.defaults.format {
        config.format = parse_format(format)?;
    }
    if let Some(quiet) = file.defaults.quiet {
        config.quiet = quiet;
    }

    if !file.targeting.include.is_empty() {
        config.include = file.targeting.include.clone();
    }
    if !file.targeting.exclude.is_empty() {
        config.exclude = file.targeting.exclude.clone();
    }

    if !file.languages.enabled.is_empty() {
        config.languages = file
            .languages
            .enabled
            .iter()
            .map(|l| l.parse::<Language>().map_err(DepAtlasError::Config))
            .collect::<Result<_>>()?;
    }
    Ok(())
}

fn apply_env_vars<E>(config: &mut ResolvedConfig, env: E) -> Result<()>
where
    E: Fn(&str) -> Option<String>,
{
    if let Some(val) = env("DEPATLAS_FORMAT") {
        config.format = parse_format(&val)?;
    }
    if let Some(val) = env("DEPATLAS_QUIET") {
        config.quiet = val == "1" || val.eq_ignore_ascii_case("true");
    }
    Ok(())
}

fn apply_cli_overrides(config: &mut ResolvedConfig, cli: &CliOverrides) {
    if let Some(format) = cli.format {
        config.format = format;
    }
    if cli.quiet {
        config.quiet = true;
    }
    if !cli.languages.is_empty() {
        config.languages = cli.languages.clone();
    }
    if !cli.include.is_empty() {
        config.include = cli.include.clone();
    }
    if !cli.exclude.is_empty() {
        config.exclude = cli.exclude.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_only() {
        let tmp = tempfile::tempdir().unwrap();
        let config = resolve_with(tmp.path(), None, no_env, &CliOverrides::default()).unwrap();
        assert_eq!(config.format, OutputFormat::Json);
        assert!(!config.quiet);
        assert!(config.languages.is_empty());
        assert!(config.loaded_files.is_empty());
    }

    #[test]
    fn project_config_found_walking_up() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join(PROJECT_CONFIG),
            r#"
[defaults]
format = "text"
quiet = true

[targeting]
exclude = ["vendor/**"]

[languages]
enabled = ["py", "go"]
"#,
        )
        .unwrap();
        let nested = tmp.path().join("services/api");
        std::fs::create_dir_all(&nested).unwrap();

        let config = resolve_with(&nested, None, no_env, &CliOverrides::default()).unwrap();
        assert_eq!(config.format, OutputFormat::Text);
        assert!(config.quiet);
        assert_eq!(config.exclude, vec!["vendor/**"]);
        assert_eq!(config.languages, vec![Language::Python, Language::Go]);
        assert_eq!(config.loaded_files.len(), 1);
    }

    #[test]
    fn layers_apply_in_order() {
        let tmp = tempfile::tempdir().unwrap();
        let user = tmp.path().join("user.toml");
        std::fs::write(&user, "[defaults]\nformat = \"dot\"\nquiet = true\n").unwrap();
        let project = tmp.path().join("repo");
        std::fs::create_dir(&project).unwrap();
        std::fs::write(project.join(PROJECT_CONFIG), "[defaults]\nformat = \"text\"\n").unwrap();

        // Project beats user; quiet survives from the user layer
        let config = resolve_with(&project, Some(&user), no_env, &CliOverrides::default()).unwrap();
        assert_eq!(config.format, OutputFormat::Text);
        assert!(config.quiet);
        assert_eq!(config.loaded_files, vec![user.clone(), project.join(PROJECT_CONFIG)]);

        // Environment beats project
        let env = |key: &str| (key == "DEPATLAS_FORMAT").then(|| "json".to_string());
        let config = resolve_with(&project, Some(&user), env, &CliOverrides::default()).unwrap();
        assert_eq!(config.format, OutputFormat::Json);

        // CLI beats environment
        let cli = CliOverrides {
            format: Some(OutputFormat::Dot),
            ..Default::default()
        };
        let config = resolve_with(&project, Some(&user), env, &cli).unwrap();
        assert_eq!(config.format, OutputFormat::Dot);
    }

    #[test]
    fn cli_lists_replace_config_lists() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join(PROJECT_CONFIG),
            "[targeting]\ninclude = [\"src/**\"]\n",
        )
        .unwrap();
        let cli = CliOverrides {
            include: vec!["lib/**".into()],
            languages: vec![Language::Rust],
            ..Default::default()
        };
        let config = resolve_with(tmp.path(), None, no_env, &cli).unwrap();
        assert_eq!(config.include, vec!["lib/**"]);
        assert_eq!(config.languages, vec![Language::Rust]);
    }

    #[test]
    fn invalid_format_is_a_config_error() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(PROJECT_CONFIG), "[defaults]\nformat = \"xml\"\n").unwrap();
        let err = resolve_with(tmp.path(), None, no_env, &CliOverrides::default()).unwrap_err();
        assert!(matches!(err, DepAtlasError::Config(_)));
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(PROJECT_CONFIG), "[defaults\n").unwrap();
        let err = resolve_with(tmp.path(), None, no_env, &CliOverrides::default()).unwrap_err();
        assert!(matches!(err, DepAtlasError::Config(_)));
    }

    #[test]
    fn unknown_language_is_a_config_error() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join(PROJECT_CONFIG),
            "[languages]\nenabled = [\"cobol\"]\n",
        )
        .unwrap();
        let err = resolve_with(tmp.path(), None, no_env, &CliOverrides::default()).unwrap_err();
        assert!(matches!(err, DepAtlasError::Config(_)));
    }
}
