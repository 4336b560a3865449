//! Sizes and protocol bytes for keys, addresses and signatures.

/// Size of a serialized secret signing key in bytes.
pub const SK_SIZE: usize = 32;

/// Size of a compressed SEC1 public key: parity prefix and x.
pub const PK_COMPRESSED_SIZE: usize = 33;

/// Size of an uncompressed SEC1 public key: `0x04`, x and y.
pub const PK_UNCOMPRESSED_SIZE: usize = 65;

/// Size of a Schnorr signature, `r || s`.
pub const SCHNORR_SIG_SIZE: usize = 64;

/// Size of a message signature, `header || r || s`.
pub const MESSAGE_SIG_SIZE: usize = 65;

/// Size of a SHA-256 digest, and of the prehash taken by deterministic ECDSA.
pub const DIGEST_SIZE: usize = 32;

/// Prefix hashed in front of every signed message. The leading byte is the
/// length of the text that follows it.
pub(crate) const MESSAGE_MAGIC: &[u8] = b"\x18Bitcoin Signed Message:\n";

/// Header byte of a message signature for an uncompressed key with even R.y.
pub(crate) const HEADER_BASE: u8 = 27;

/// Added to the header byte when the signer's key is compressed.
pub(crate) const HEADER_COMPRESSED_OFFSET: u8 = 4;

/// Largest header byte accepted when parsing.
pub(crate) const HEADER_MAX: u8 = 34;

/// Version byte of a mainnet pay-to-pubkey-hash address.
pub(crate) const P2PKH_VERSION: u8 = 0x00;

/// Version byte of a mainnet Wallet Import Format key.
pub(crate) const WIF_VERSION: u8 = 0x80;

/// Trailing WIF byte marking a key whose public key is used compressed.
pub(crate) const WIF_COMPRESSED_FLAG: u8 = 0x01;

/// Length of the double-SHA-256 checksum appended by base58check.
pub(crate) const CHECKSUM_SIZE: usize = 4;
