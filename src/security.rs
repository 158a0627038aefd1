/*
 * Copyright (2024) Volcengine
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 * http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */
use std::fmt::{Debug, Formatter};

use crate::error::FpError;
use crate::internal::{hex, hmac_sha256};
use crate::policy::{Policy, PolicyOptions};

/// Signs an encoded policy with the application secret, returning lowercase hex HMAC-SHA256.
pub fn sign(secret: impl AsRef<[u8]>, encoded_policy: impl AsRef<[u8]>) -> Result<String, FpError> {
    Ok(hex(hmac_sha256(encoded_policy, secret)?))
}

/// An encoded policy together with its signature, sent as the `policy` and
/// `signature` parameters of a request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Security {
    pub(crate) policy: Policy,
    pub(crate) signature: String,
}

impl Security {
    pub fn new(secret: impl AsRef<[u8]>, policy: Policy) -> Result<Self, FpError> {
        let signature = sign(secret, policy.as_str())?;
        Ok(Self { policy, signature })
    }

    /// Encodes `options` and signs the result. Nothing is signed when the options lack an expiry.
    pub fn with_options(secret: impl AsRef<[u8]>, options: &PolicyOptions) -> Result<Self, FpError> {
        let policy = Policy::new(options)?;
        Self::new(secret, policy)
    }

    /// Wraps a policy and signature produced elsewhere, e.g. by a backend that owns the secret.
    pub fn from_parts(policy: impl Into<Policy>, signature: impl Into<String>) -> Self {
        Self {
            policy: policy.into(),
            signature: signature.into(),
        }
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn is_empty(&self) -> bool {
        self.policy.is_empty() || self.signature.is_empty()
    }
}

impl From<&Security> for Security {
    fn from(value: &Security) -> Self {
        value.to_owned()
    }
}

/// Holds an application secret and issues [`Security`] tokens with it.
#[derive(Clone)]
pub struct Signer {
    secret: Vec<u8>,
}

impl Debug for Signer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer").field("secret", &"***").finish()
    }
}

impl Signer {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
        }
    }

    pub fn sign(&self, policy: Policy) -> Result<Security, FpError> {
        Security::new(&self.secret, policy)
    }

    pub fn sign_options(&self, options: &PolicyOptions) -> Result<Security, FpError> {
        Security::with_options(&self.secret, options)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::enumeration::CallType::{CallStore, CallWrite};

    #[test]
    fn test_sign_handle_policy() {
        let mut options = PolicyOptions::new(Utc.timestamp_opt(1508141504, 0).unwrap());
        options.set_handle("KW9EJhYtS6y48Whm2S6D");
        let security = Security::with_options("Z3IYZSH2UJA7VN3QYFVSVCF7PI", &options).unwrap();
        assert_eq!(security.policy().as_str(), "eyJoYW5kbGUiOiJLVzlFSmhZdFM2eTQ4V2htMlM2RCIsImV4cGlyeSI6MTUwODE0MTUwNH0=");
        assert_eq!(security.signature(), "4098f262b9dba23e4766ce127353aaf4f37fde0fd726d164d944e031fd862c18");
    }

    #[test]
    fn test_sign_call_policy() {
        let mut options = PolicyOptions::new(Utc.timestamp_opt(1508154321, 0).unwrap());
        options.set_call(vec![CallStore, CallWrite]);
        let security = Signer::new("S4IXZSH2UJA7VN3QYFVSVCF7PI").sign_options(&options).unwrap();
        assert_eq!(security.policy().as_str(), "eyJjYWxsIjpbInN0b3JlIiwid3JpdGUiXSwiZXhwaXJ5IjoxNTA4MTU0MzIxfQ==");
        assert_eq!(security.signature(), "d458b7c957080835815d5394d84b85522e9964dc9853a615a7c3651cf96768e3");
    }

    #[test]
    fn test_signature_shape() {
        let signature = sign("secret", "policy").unwrap();
        assert_eq!(signature.len(), 64);
        assert!(signature.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        assert_eq!(signature, sign("secret", "policy").unwrap());
        assert_ne!(signature, sign("secret", "policz").unwrap());
        assert_ne!(signature, sign("secreu", "policy").unwrap());
    }

    #[test]
    fn test_missing_expiry_is_not_signed() {
        let result = Security::with_options("secret", &PolicyOptions::default());
        assert!(matches!(result, Err(FpError::InvalidPolicy { .. })));
    }

    #[test]
    fn test_signer_hides_secret() {
        let signer = Signer::new("Z3IYZSH2UJA7VN3QYFVSVCF7PI");
        let debug = format!("{:?}", signer);
        assert!(!debug.contains("Z3IYZSH2UJA7VN3QYFVSVCF7PI"));
    }
}
