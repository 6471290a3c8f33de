use serde::{Deserialize, Serialize};

use crate::domain::{ProductType, RepositoryId};

/// Payload of `POST /products`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub size: String,
    #[serde(rename = "type", default)]
    pub product_type: ProductType,
}

/// Query string of `GET /search/repositories`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
}

impl SearchQuery {
    pub fn new(filter: &str) -> Self {
        let filter = filter.trim();
        Self {
            q: (!filter.is_empty()).then(|| filter.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryOwner {
    pub avatar_url: String,
}

/// One row of a repository search. Fields are passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: RepositoryId,
    pub name: String,
    pub owner: RepositoryOwner,
    pub html_url: String,
    pub updated_at: String,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub open_issues_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySearchResponse {
    pub total_count: u64,
    #[serde(default)]
    pub items: Vec<Repository>,
}
