//! IdentityVerifier trait 定義

use super::{IdentityError, UserId};

/// Bearer 認証情報を検証し、ユーザー ID を返す
pub trait IdentityVerifier: Send + Sync {
    fn verify(&self, credential: &str) -> Result<UserId, IdentityError>;
}
