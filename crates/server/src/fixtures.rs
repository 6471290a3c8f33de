use std::fs;

use anyhow::Context;
use shared::{
    domain::RepositoryId,
    protocol::{Repository, RepositoryOwner},
};

pub fn default_repositories() -> Vec<Repository> {
    vec![Repository {
        id: RepositoryId(33397954),
        name: "qt5reactor".into(),
        owner: RepositoryOwner {
            avatar_url: "https://avatars.githubusercontent.com/u/716546?v=4".into(),
        },
        html_url: "https://github.com/twisted/qt5reactor".into(),
        updated_at: "2022-04-11".into(),
        stargazers_count: 43,
        forks_count: 18,
        open_issues_count: 18,
    }]
}

/// Reads a JSON array of repositories, or the built-in fixture when no path is set.
pub fn load_repositories(path: Option<&str>) -> anyhow::Result<Vec<Repository>> {
    let Some(path) = path else {
        return Ok(default_repositories());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read repository fixtures from '{path}'"))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("repository fixtures in '{path}' are not a JSON array"))
}

pub fn filter_repositories(repositories: &[Repository], query: Option<&str>) -> Vec<Repository> {
    let needle = query.map(str::trim).unwrap_or_default().to_ascii_lowercase();
    repositories
        .iter()
        .filter(|repo| needle.is_empty() || repo.name.to_ascii_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use std::{
        env,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::*;

    #[test]
    fn filter_matches_name_case_insensitively() {
        let repos = default_repositories();
        assert_eq!(filter_repositories(&repos, Some("QT5")).len(), 1);
        assert!(filter_repositories(&repos, Some("django")).is_empty());
        assert_eq!(filter_repositories(&repos, Some("  ")).len(), 1);
        assert_eq!(filter_repositories(&repos, None).len(), 1);
    }

    #[test]
    fn loads_fixture_file() {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let path = env::temp_dir().join(format!("store_fixtures_{suffix}.json"));
        let raw = serde_json::to_string(&default_repositories()).expect("serialize");
        fs::write(&path, raw).expect("write fixture");

        let loaded = load_repositories(path.to_str()).expect("load");
        assert_eq!(loaded, default_repositories());

        fs::remove_file(path).expect("cleanup");
    }

    #[test]
    fn missing_fixture_file_is_an_error() {
        let err = load_repositories(Some("/nonexistent/fixtures.json")).expect_err("missing");
        assert!(err.to_string().contains("failed to read repository fixtures"));
    }
}
