//! # Service Configuration
//!
//! Configuration for the mirror service, built either programmatically
//! through [`MirrorConfig::builder`] or from the process environment via
//! [`MirrorConfig::from_env`].
//!
//! The builder enforces fail-fast validation: a config that builds is a
//! config the service can start with.
//!
//! ## Environment variables
//!
//! | Variable                | Meaning                                   | Default   |
//! |-------------------------|-------------------------------------------|-----------|
//! | `MIRROR_SOURCE_OWNER`   | Source repository owner (required)        |           |
//! | `MIRROR_SOURCE_REPO`    | Source repository name (required)         |           |
//! | `MIRROR_SOURCE_BRANCH`  | Source branch to read from                | `main`    |
//! | `MIRROR_SOURCE_PATHS`   | Comma-separated remote directories        | `videos`  |
//! | `MIRROR_DIR`            | Local mirror directory                    | `videos`  |
//! | `MIRROR_INTERVAL_SECS`  | Seconds between sync cycles               | `300`     |
//! | `MIRROR_EXTENSIONS`     | Comma-separated extension allow-list      | built-in  |
//! | `MIRROR_USER_AGENT`     | User-Agent for outbound requests          | built-in  |
//! | `MIRROR_PUBLISH`        | `true`/`1` to commit and push additions   | off       |
//! | `MIRROR_REPO_DIR`       | Git repository root for publishing        | `.`       |
//! | `MIRROR_PUBLISH_REMOTE` | Remote to push to                         | `origin`  |
//! | `MIRROR_PUBLISH_BRANCH` | Branch to push to                         | `main`    |

use crate::error::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_SOURCE_BRANCH: &str = "main";
const DEFAULT_SOURCE_PATH: &str = "videos";
const DEFAULT_MIRROR_DIR: &str = "videos";
const DEFAULT_INTERVAL: Duration = Duration::from_secs(300);

/// Publishing settings: where and how downloaded additions are committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishConfig {
    /// Git repository root containing the mirror directory
    pub repo_dir: PathBuf,

    /// Remote to push to
    pub remote: String,

    /// Branch to push to
    pub branch: String,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            repo_dir: PathBuf::from("."),
            remote: "origin".to_string(),
            branch: "main".to_string(),
        }
    }
}

/// Full mirror service configuration.
///
/// Use [`MirrorConfig::builder`] to construct instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorConfig {
    /// Source repository owner
    pub source_owner: String,

    /// Source repository name
    pub source_repo: String,

    /// Source branch to read from
    pub source_branch: String,

    /// Remote directories to mirror, fetched in order each cycle
    pub source_paths: Vec<String>,

    /// Local mirror directory
    pub mirror_dir: PathBuf,

    /// Time between sync cycles
    pub sync_interval: Duration,

    /// Extension allow-list override; `None` uses the engine default
    pub media_extensions: Option<Vec<String>>,

    /// User-Agent override for outbound requests
    pub user_agent: Option<String>,

    /// Commit-and-push settings; `None` disables publishing
    pub publish: Option<PublishConfig>,
}

impl MirrorConfig {
    pub fn builder() -> MirrorConfigBuilder {
        MirrorConfigBuilder::default()
    }

    /// Build a configuration from the process environment.
    ///
    /// See the module docs for the variable table. Unset optional
    /// variables fall back to their defaults; a missing required
    /// variable or an unparseable value is a configuration error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| -> Result<String> {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| Error::Config(format!("{} must be set", key)))
        };

        let mut builder = Self::builder()
            .source_owner(required("MIRROR_SOURCE_OWNER")?)
            .source_repo(required("MIRROR_SOURCE_REPO")?);

        if let Some(branch) = lookup("MIRROR_SOURCE_BRANCH") {
            builder = builder.source_branch(branch);
        }

        if let Some(paths) = lookup("MIRROR_SOURCE_PATHS") {
            builder = builder.source_paths(split_list(&paths));
        }

        if let Some(dir) = lookup("MIRROR_DIR") {
            builder = builder.mirror_dir(dir);
        }

        if let Some(secs) = lookup("MIRROR_INTERVAL_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                Error::Config(format!(
                    "MIRROR_INTERVAL_SECS must be a number of seconds, got {:?}",
                    secs
                ))
            })?;
            builder = builder.sync_interval(Duration::from_secs(secs));
        }

        if let Some(extensions) = lookup("MIRROR_EXTENSIONS") {
            builder = builder.media_extensions(split_list(&extensions));
        }

        if let Some(user_agent) = lookup("MIRROR_USER_AGENT") {
            builder = builder.user_agent(user_agent);
        }

        if parse_flag(lookup("MIRROR_PUBLISH").as_deref()) {
            let mut publish = PublishConfig::default();
            if let Some(repo_dir) = lookup("MIRROR_REPO_DIR") {
                publish.repo_dir = PathBuf::from(repo_dir);
            }
            if let Some(remote) = lookup("MIRROR_PUBLISH_REMOTE") {
                publish.remote = remote;
            }
            if let Some(branch) = lookup("MIRROR_PUBLISH_BRANCH") {
                publish.branch = branch;
            }
            builder = builder.publish(publish);
        }

        builder.build()
    }

    /// Validates the configuration and returns an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.source_owner.trim().is_empty() {
            return Err(Error::Config("Source owner cannot be empty".to_string()));
        }

        if self.source_repo.trim().is_empty() {
            return Err(Error::Config(
                "Source repository cannot be empty".to_string(),
            ));
        }

        if self.source_branch.trim().is_empty() {
            return Err(Error::Config("Source branch cannot be empty".to_string()));
        }

        if self.source_paths.is_empty() {
            return Err(Error::Config(
                "At least one source path is required".to_string(),
            ));
        }

        if self.source_paths.iter().any(|p| p.trim().is_empty()) {
            return Err(Error::Config("Source paths cannot be empty".to_string()));
        }

        if self.mirror_dir.as_os_str().is_empty() {
            return Err(Error::Config(
                "Mirror directory cannot be empty".to_string(),
            ));
        }

        if self.sync_interval.is_zero() {
            return Err(Error::Config(
                "Sync interval must be greater than zero".to_string(),
            ));
        }

        if let Some(extensions) = &self.media_extensions {
            if extensions.is_empty() {
                return Err(Error::Config(
                    "Extension allow-list cannot be empty; omit it to use the default".to_string(),
                ));
            }
        }

        if let Some(publish) = &self.publish {
            if publish.repo_dir.as_os_str().is_empty() {
                return Err(Error::Config(
                    "Publish repository directory cannot be empty".to_string(),
                ));
            }
            if publish.remote.trim().is_empty() {
                return Err(Error::Config("Publish remote cannot be empty".to_string()));
            }
            if publish.branch.trim().is_empty() {
                return Err(Error::Config("Publish branch cannot be empty".to_string()));
            }
        }

        Ok(())
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_flag(raw: Option<&str>) -> bool {
    matches!(
        raw.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1") | Some("true") | Some("yes")
    )
}

/// Builder for [`MirrorConfig`] instances.
#[derive(Default)]
pub struct MirrorConfigBuilder {
    source_owner: Option<String>,
    source_repo: Option<String>,
    source_branch: Option<String>,
    source_paths: Option<Vec<String>>,
    mirror_dir: Option<PathBuf>,
    sync_interval: Option<Duration>,
    media_extensions: Option<Vec<String>>,
    user_agent: Option<String>,
    publish: Option<PublishConfig>,
}

impl MirrorConfigBuilder {
    /// Sets the source repository owner (required).
    pub fn source_owner(mut self, owner: impl Into<String>) -> Self {
        self.source_owner = Some(owner.into());
        self
    }

    /// Sets the source repository name (required).
    pub fn source_repo(mut self, repo: impl Into<String>) -> Self {
        self.source_repo = Some(repo.into());
        self
    }

    /// Sets the source branch. Default: `main`.
    pub fn source_branch(mut self, branch: impl Into<String>) -> Self {
        self.source_branch = Some(branch.into());
        self
    }

    /// Sets the remote directories to mirror. Default: `videos`.
    pub fn source_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.source_paths = Some(paths.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the local mirror directory. Default: `videos`.
    pub fn mirror_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.mirror_dir = Some(dir.into());
        self
    }

    /// Sets the time between sync cycles. Default: 5 minutes.
    pub fn sync_interval(mut self, interval: Duration) -> Self {
        self.sync_interval = Some(interval);
        self
    }

    /// Overrides the extension allow-list.
    ///
    /// If never called, the engine's built-in media extension list is
    /// used.
    pub fn media_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.media_extensions = Some(extensions.into_iter().map(Into::into).collect());
        self
    }

    /// Overrides the User-Agent sent on outbound requests.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Enables publishing with the given settings.
    pub fn publish(mut self, publish: PublishConfig) -> Self {
        self.publish = Some(publish);
        self
    }

    /// Builds and validates the final [`MirrorConfig`].
    pub fn build(self) -> Result<MirrorConfig> {
        let source_owner = self.source_owner.ok_or_else(|| {
            Error::Config("Source owner is required. Use .source_owner() to set it.".to_string())
        })?;

        let source_repo = self.source_repo.ok_or_else(|| {
            Error::Config(
                "Source repository is required. Use .source_repo() to set it.".to_string(),
            )
        })?;

        let config = MirrorConfig {
            source_owner,
            source_repo,
            source_branch: self
                .source_branch
                .unwrap_or_else(|| DEFAULT_SOURCE_BRANCH.to_string()),
            source_paths: self
                .source_paths
                .unwrap_or_else(|| vec![DEFAULT_SOURCE_PATH.to_string()]),
            mirror_dir: self
                .mirror_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MIRROR_DIR)),
            sync_interval: self.sync_interval.unwrap_or(DEFAULT_INTERVAL),
            media_extensions: self.media_extensions,
            user_agent: self.user_agent,
            publish: self.publish,
        };

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn from_map(map: &HashMap<String, String>) -> Result<MirrorConfig> {
        MirrorConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_builder_with_defaults() {
        let config = MirrorConfig::builder()
            .source_owner("octocat")
            .source_repo("media")
            .build()
            .unwrap();

        assert_eq!(config.source_branch, "main");
        assert_eq!(config.source_paths, vec!["videos".to_string()]);
        assert_eq!(config.mirror_dir, PathBuf::from("videos"));
        assert_eq!(config.sync_interval, Duration::from_secs(300));
        assert!(config.media_extensions.is_none());
        assert!(config.publish.is_none());
    }

    #[test]
    fn test_builder_requires_owner_and_repo() {
        let err = MirrorConfig::builder()
            .source_repo("media")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("Source owner is required"));

        let err = MirrorConfig::builder()
            .source_owner("octocat")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("Source repository is required"));
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let err = MirrorConfig::builder()
            .source_owner("octocat")
            .source_repo("media")
            .sync_interval(Duration::ZERO)
            .build()
            .unwrap_err();

        assert!(err.to_string().contains("Sync interval"));
    }

    #[test]
    fn test_validate_rejects_empty_source_paths() {
        let err = MirrorConfig::builder()
            .source_owner("octocat")
            .source_repo("media")
            .source_paths(Vec::<String>::new())
            .build()
            .unwrap_err();

        assert!(err.to_string().contains("source path"));
    }

    #[test]
    fn test_validate_rejects_empty_extension_override() {
        let err = MirrorConfig::builder()
            .source_owner("octocat")
            .source_repo("media")
            .media_extensions(Vec::<String>::new())
            .build()
            .unwrap_err();

        assert!(err.to_string().contains("allow-list"));
    }

    #[test]
    fn test_from_env_minimal() {
        let map = env(&[
            ("MIRROR_SOURCE_OWNER", "octocat"),
            ("MIRROR_SOURCE_REPO", "media"),
        ]);

        let config = from_map(&map).unwrap();

        assert_eq!(config.source_owner, "octocat");
        assert_eq!(config.source_repo, "media");
        assert_eq!(config.sync_interval, Duration::from_secs(300));
        assert!(config.publish.is_none());
    }

    #[test]
    fn test_from_env_missing_required() {
        let map = env(&[("MIRROR_SOURCE_REPO", "media")]);
        let err = from_map(&map).unwrap_err();
        assert!(err.to_string().contains("MIRROR_SOURCE_OWNER"));
    }

    #[test]
    fn test_from_env_full() {
        let map = env(&[
            ("MIRROR_SOURCE_OWNER", "octocat"),
            ("MIRROR_SOURCE_REPO", "media"),
            ("MIRROR_SOURCE_BRANCH", "release"),
            ("MIRROR_SOURCE_PATHS", "videos, apps/site/videos"),
            ("MIRROR_DIR", "/srv/mirror/videos"),
            ("MIRROR_INTERVAL_SECS", "60"),
            ("MIRROR_EXTENSIONS", "mp4,webm"),
            ("MIRROR_USER_AGENT", "mirror-test/1.0"),
            ("MIRROR_PUBLISH", "true"),
            ("MIRROR_REPO_DIR", "/srv/mirror"),
            ("MIRROR_PUBLISH_REMOTE", "upstream"),
            ("MIRROR_PUBLISH_BRANCH", "release"),
        ]);

        let config = from_map(&map).unwrap();

        assert_eq!(config.source_branch, "release");
        assert_eq!(
            config.source_paths,
            vec!["videos".to_string(), "apps/site/videos".to_string()]
        );
        assert_eq!(config.mirror_dir, PathBuf::from("/srv/mirror/videos"));
        assert_eq!(config.sync_interval, Duration::from_secs(60));
        assert_eq!(
            config.media_extensions,
            Some(vec!["mp4".to_string(), "webm".to_string()])
        );
        assert_eq!(config.user_agent.as_deref(), Some("mirror-test/1.0"));

        let publish = config.publish.unwrap();
        assert_eq!(publish.repo_dir, PathBuf::from("/srv/mirror"));
        assert_eq!(publish.remote, "upstream");
        assert_eq!(publish.branch, "release");
    }

    #[test]
    fn test_from_env_invalid_interval() {
        let map = env(&[
            ("MIRROR_SOURCE_OWNER", "octocat"),
            ("MIRROR_SOURCE_REPO", "media"),
            ("MIRROR_INTERVAL_SECS", "soon"),
        ]);

        let err = from_map(&map).unwrap_err();
        assert!(err.to_string().contains("MIRROR_INTERVAL_SECS"));
    }

    #[test]
    fn test_from_env_publish_flag_off_ignores_publish_vars() {
        let map = env(&[
            ("MIRROR_SOURCE_OWNER", "octocat"),
            ("MIRROR_SOURCE_REPO", "media"),
            ("MIRROR_PUBLISH", "false"),
            ("MIRROR_PUBLISH_REMOTE", "upstream"),
        ]);

        let config = from_map(&map).unwrap();
        assert!(config.publish.is_none());
    }

    #[test]
    fn test_parse_flag_variants() {
        assert!(parse_flag(Some("1")));
        assert!(parse_flag(Some("true")));
        assert!(parse_flag(Some("YES")));
        assert!(!parse_flag(Some("0")));
        assert!(!parse_flag(Some("off")));
        assert!(!parse_flag(None));
    }

    #[test]
    fn test_split_list_trims_and_drops_empties() {
        assert_eq!(
            split_list(" a , b ,, c "),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
        assert!(split_list(" , ").is_empty());
    }
}
