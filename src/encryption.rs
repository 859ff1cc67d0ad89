// In: src/encryption.rs

//! This module defines the encryption metadata model and the ciphertext
//! framing arithmetic: given a cipher and a module kind, how many bytes of
//! framing (length field, nonce, authentication tag) surround a payload.
//!
//! No cryptography happens here. The sizing contract lets readers and
//! writers size their buffers exactly without touching key material, and the
//! key itself is wiped from memory when the owning properties are dropped.

use crate::error::LaminaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroizing;

//==================================================================================
// 1. Framing Constants
//==================================================================================

/// Nonce width for GCM-framed modules.
pub const NONCE_LENGTH: usize = 12;
/// Authentication tag width appended by GCM.
pub const GCM_TAG_LENGTH: usize = 16;
/// Nonce width for CTR-framed modules.
pub const CTR_NONCE_LENGTH: usize = 16;
/// Width of the little-endian length field that prefixes every ciphertext.
pub const LENGTH_FIELD_SIZE: usize = 4;

//==================================================================================
// 2. Ciphers
//==================================================================================

/// The cipher configured for a file.
///
/// The choice only affects data pages. Metadata modules are always framed
/// with GCM regardless of the configured cipher, so their integrity is
/// authenticated even under the CTR configuration.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cipher {
    AesGcmV1 = 0,
    AesGcmCtrV1 = 1,
}

impl Default for Cipher {
    fn default() -> Self {
        Self::AesGcmV1
    }
}

impl Cipher {
    /// Total on-disk size of a module holding `plaintext_len` payload bytes.
    pub fn ciphertext_size(&self, plaintext_len: usize, is_metadata: bool) -> usize {
        plaintext_len + self.overhead(is_metadata)
    }

    /// Payload size recovered from a module of `ciphertext_len` total bytes.
    ///
    /// # Errors
    /// A ciphertext shorter than its own framing cannot have come from this
    /// cipher; the call fails with `Underflow` instead of wrapping around.
    pub fn plaintext_size(
        &self,
        ciphertext_len: usize,
        is_metadata: bool,
    ) -> Result<usize, LaminaError> {
        let overhead = self.overhead(is_metadata);
        ciphertext_len.checked_sub(overhead).ok_or_else(|| {
            LaminaError::Underflow(format!(
                "ciphertext of {} bytes is shorter than the {}-byte framing overhead",
                ciphertext_len, overhead
            ))
        })
    }

    fn overhead(&self, is_metadata: bool) -> usize {
        match (is_metadata, self) {
            (true, _) | (_, Cipher::AesGcmV1) => NONCE_LENGTH + GCM_TAG_LENGTH + LENGTH_FIELD_SIZE,
            (false, Cipher::AesGcmCtrV1) => CTR_NONCE_LENGTH + LENGTH_FIELD_SIZE,
        }
    }
}

//==================================================================================
// 3. Algorithm Metadata
//==================================================================================

/// The additional-authenticated-data identifiers stored in file metadata.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct AadMetadata {
    pub aad_prefix: String,
    pub aad_file_unique: String,
    /// When set, the reader must supply the prefix out of band; it is not
    /// stored in the file.
    pub supply_aad_prefix: bool,
}

impl AadMetadata {
    pub fn new(aad_prefix: String, aad_file_unique: String, supply_aad_prefix: bool) -> Self {
        Self {
            aad_prefix,
            aad_file_unique,
            supply_aad_prefix,
        }
    }
}

/// The encryption algorithm block of a file's metadata: the cipher plus the
/// AAD identifiers it authenticates modules with.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct EncryptionAlgorithm {
    pub algorithm: Cipher,
    pub aad: AadMetadata,
}

//==================================================================================
// 4. Encryption Properties
//==================================================================================

/// The runtime encryption state for one file: algorithm metadata, the key,
/// and the module AAD currently in effect.
///
/// The key is held in a wiping container and zeroed when the properties are
/// dropped. It is deliberately excluded from `Debug` output and from
/// serialization; only the algorithm metadata ever leaves this struct.
pub struct EncryptionProperties {
    algorithm: EncryptionAlgorithm,
    key: Zeroizing<Vec<u8>>,
    aad: String,
}

impl EncryptionProperties {
    pub fn new(algorithm: EncryptionAlgorithm, key: Vec<u8>, aad: String) -> Self {
        Self {
            algorithm,
            key: Zeroizing::new(key),
            aad,
        }
    }

    pub fn algorithm(&self) -> &EncryptionAlgorithm {
        &self.algorithm
    }

    pub fn key(&self) -> &[u8] {
        &self.key
    }

    pub fn key_length(&self) -> usize {
        self.key.len()
    }

    pub fn aad(&self) -> &str {
        &self.aad
    }

    pub fn aad_length(&self) -> usize {
        self.aad.len()
    }

    /// Replaces the module AAD, e.g. when moving between modules of the
    /// same file.
    pub fn set_aad(&mut self, aad: String) {
        self.aad = aad;
    }

    /// Total on-disk size of a module holding `plaintext_len` payload bytes.
    pub fn calculate_cipher_size(&self, plaintext_len: usize, is_metadata: bool) -> usize {
        self.algorithm
            .algorithm
            .ciphertext_size(plaintext_len, is_metadata)
    }

    /// Payload size recovered from a module of `ciphertext_len` total bytes.
    pub fn calculate_plain_size(
        &self,
        ciphertext_len: usize,
        is_metadata: bool,
    ) -> Result<usize, LaminaError> {
        self.algorithm
            .algorithm
            .plaintext_size(ciphertext_len, is_metadata)
    }
}

impl fmt::Debug for EncryptionProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptionProperties")
            .field("algorithm", &self.algorithm)
            .field("key", &"<redacted>")
            .field("aad", &self.aad)
            .finish()
    }
}
