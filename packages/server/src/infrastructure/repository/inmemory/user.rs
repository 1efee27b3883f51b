//! InMemory UserDirectory 実装
//!
//! プロフィールは起動時に JSON ファイルから読み込むか、テストで直接与える。

use std::{collections::HashMap, path::Path};

use async_trait::async_trait;
use thiserror::Error;

use crate::{
    domain::{RepositoryError, UserDirectory, UserId, UserProfile, ValueObjectError},
    infrastructure::dto::seed::UserSeed,
};

/// プロフィールの読み込みエラー
#[derive(Debug, Error)]
pub enum UserSeedError {
    #[error("failed to read user seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse user seed file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid user seed entry: {0}")]
    Invalid(#[from] ValueObjectError),
}

/// インメモリ UserDirectory 実装
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    profiles: HashMap<UserId, UserProfile>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profiles(profiles: impl IntoIterator<Item = UserProfile>) -> Self {
        Self {
            profiles: profiles.into_iter().map(|p| (p.id.clone(), p)).collect(),
        }
    }

    /// JSON 配列（`[{"id","displayName","handle","avatarUrl"}]`）から読み込む
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, UserSeedError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, UserSeedError> {
        let seeds: Vec<UserSeed> = serde_json::from_str(raw)?;
        let profiles = seeds
            .into_iter()
            .map(UserProfile::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::with_profiles(profiles))
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn get(&self, id: &UserId) -> Result<UserProfile, RepositoryError> {
        self.profiles
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(id.as_str().to_string()))
    }
}
