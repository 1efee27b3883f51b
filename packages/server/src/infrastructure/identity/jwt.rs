//! JWT (HS256) を使った IdentityVerifier 実装
//!
//! トークンの `id` クレームをユーザー ID として扱います。`exp` は必須。

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::domain::{IdentityError, IdentityVerifier, UserId};

/// JWT のクレーム
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// ユーザー ID
    pub id: String,
    /// 有効期限（Unix 秒）
    pub exp: u64,
}

/// JWT を検証する IdentityVerifier
pub struct JwtIdentityVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtIdentityVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }
}

impl IdentityVerifier for JwtIdentityVerifier {
    fn verify(&self, credential: &str) -> Result<UserId, IdentityError> {
        if credential.is_empty() {
            return Err(IdentityError::MissingCredential);
        }
        let data = decode::<Claims>(credential, &self.key, &self.validation)
            .map_err(|e| IdentityError::InvalidCredential(e.to_string()))?;
        UserId::new(data.claims.id).map_err(|e| IdentityError::InvalidCredential(e.to_string()))
    }
}
