//! Signature schemes over secp256k1.
//!
//! This library builds on the `curve` crate and provides:
//! - Signing and verifying keys, with SEC1, WIF and P2PKH address encodings
//! - Plain ECDSA over a message digest, with RFC 6979 nonces, low-s
//!   normalization and DER encoding
//! - Address-bound message signatures, verified by public key recovery
//! - Schnorr signatures with deterministic nonces
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use signing::{PublicKeyFormat, SigningKey, verify_message};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let signing_key = SigningKey::random(&mut rng);
//! let verifying_key = signing_key.verifying_key();
//!
//! // Schnorr: deterministic, 64 bytes.
//! let signature = signing_key.sign_schnorr(b"hello").expect("signing failed");
//! assert!(verifying_key.verify_schnorr(b"hello", &signature));
//!
//! // Message signature: checked against an address, no public key needed.
//! let address = verifying_key.address(PublicKeyFormat::Compressed).to_string();
//! let signature = signing_key
//!     .sign_message(b"hello", PublicKeyFormat::Compressed, &mut rng)
//!     .expect("signing failed");
//! assert!(verify_message(&address, b"hello", &signature.to_base64()));
//! ```
//!
//! # Security Considerations
//!
//! - Scalar multiplication is not constant time
//! - Pass a cryptographically secure generator wherever an `rng` is taken
//! - Verification returns `false` for any malformed input and never panics

mod address;
mod constants;
mod ecdsa;
mod encoding;
mod errors;
mod hash;
mod keys;
mod message;
mod schnorr;


pub use address::Address;
pub use constants::{
    DIGEST_SIZE, MESSAGE_SIG_SIZE, PK_COMPRESSED_SIZE, PK_UNCOMPRESSED_SIZE, SCHNORR_SIG_SIZE, SK_SIZE,
};
pub use ecdsa::{EcdsaSignature, sign_prehash, sign_prehash_rfc6979, verify_prehash};
pub use encoding::{base58check_decode, base58check_encode};
pub use errors::SignatureError;
pub use hash::{double_sha256, hash160, int_from_hash, sha256, sha256_concat};
pub use keys::{PublicKeyFormat, SigningKey, VerifyingKey};
pub use message::{MessageSignature, message_digest, sign_message, verify_message, verify_message_on};
pub use schnorr::SchnorrSignature;
