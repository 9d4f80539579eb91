use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use trust_canonical::{to_canonical_string, KeyId};

use crate::algorithm::{HashId, SignatureAlgorithm};
use crate::ec_key::{Curve, EcPrivateKey, EcPublicKey};
use crate::errors::KeyError;
use crate::jwk::{required_str, JwkMap};
use crate::reader::ChunkReader;
use crate::rsa_key::{RsaPrivateKey, RsaPublicKey};

const PKCS1_RSA_LABEL: &str = "-----BEGIN RSA ";
const SEC1_EC_LABEL: &str = "-----BEGIN EC ";

/// JWK `kty` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    /// Elliptic curve.
    Ec,
    /// RSA.
    Rsa,
}

impl KeyType {
    /// The `kty` string.
    pub fn as_str(self) -> &'static str {
        match self {
            KeyType::Ec => "EC",
            KeyType::Rsa => "RSA",
        }
    }

    /// Parses a `kty` string.
    pub fn from_kty(kty: &str) -> Result<Self, KeyError> {
        match kty {
            "EC" => Ok(KeyType::Ec),
            "RSA" => Ok(KeyType::Rsa),
            other => Err(KeyError::UnsupportedKeyType(other.to_string())),
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Behaviour shared by every key: identity, JWK form and PEM export.
pub trait JsonWebKey {
    /// `EC` or `RSA`.
    fn key_type(&self) -> KeyType;

    /// Fingerprint of the public half.
    fn key_id(&self) -> &KeyId;

    /// JWK members, `kty` and `kid` included.
    fn to_jwk_map(&self) -> JwkMap;

    /// PKCS#8 PEM for private keys, SubjectPublicKeyInfo PEM for public keys.
    fn to_pem(&self) -> Result<String, KeyError>;

    /// Canonical (sorted, compact) JSON of [`to_jwk_map`](Self::to_jwk_map).
    fn marshal_json(&self) -> Result<String, KeyError> {
        Ok(to_canonical_string(&self.to_jwk_map())?)
    }
}

/// Keys that check signatures.
pub trait SignatureVerifier: JsonWebKey {
    /// Checks `signature` over everything `message` yields, under the algorithm token `alg`.
    fn verify<R: ChunkReader + ?Sized>(
        &self,
        message: &mut R,
        alg: &str,
        signature: &[u8],
    ) -> Result<(), KeyError>;

    /// [`verify`](Self::verify) over an in-memory message.
    fn verify_bytes(&self, message: &[u8], alg: &str, signature: &[u8]) -> Result<(), KeyError> {
        let mut reader = message;
        self.verify(&mut reader, alg, signature)
    }
}

/// Keys that produce signatures.
pub trait SignatureSigner: JsonWebKey {
    /// Public counterpart type.
    type Public: SignatureVerifier;

    /// Public half of this key pair.
    fn public_key(&self) -> Self::Public;

    /// Signs everything `message` yields and reports the algorithm used.
    ///
    /// RSA keys honour `hash` (SHA-384 and SHA-512 select RS384/RS512, anything
    /// else RS256); EC keys always use their curve's hash.
    fn sign<R: ChunkReader + ?Sized>(
        &self,
        message: &mut R,
        hash: HashId,
    ) -> Result<(Vec<u8>, SignatureAlgorithm), KeyError>;

    /// [`sign`](Self::sign) over an in-memory message.
    fn sign_bytes(
        &self,
        message: &[u8],
        hash: HashId,
    ) -> Result<(Vec<u8>, SignatureAlgorithm), KeyError> {
        let mut reader = message;
        self.sign(&mut reader, hash)
    }
}

/// A public key of either family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicKey {
    /// EC public key.
    Ec(EcPublicKey),
    /// RSA public key.
    Rsa(RsaPublicKey),
}

impl PublicKey {
    /// Parses a public JWK, dispatching on `kty`.
    pub fn from_jwk_map(jwk: &JwkMap) -> Result<Self, KeyError> {
        match KeyType::from_kty(required_str(jwk, "kty")?)? {
            KeyType::Ec => Ok(Self::Ec(EcPublicKey::from_jwk_map(jwk)?)),
            KeyType::Rsa => Ok(Self::Rsa(RsaPublicKey::from_jwk_map(jwk)?)),
        }
    }

    /// Parses a JWK from JSON text.
    pub fn from_jwk_json(json: &str) -> Result<Self, KeyError> {
        Self::from_jwk_map(&parse_jwk_json(json)?)
    }

    /// Reads a public key PEM block of either family.
    pub fn from_pem(pem: &str) -> Result<Self, KeyError> {
        if pem.contains(PKCS1_RSA_LABEL) {
            return Ok(Self::Rsa(RsaPublicKey::from_pem(pem)?));
        }
        match EcPublicKey::from_pem(pem) {
            Ok(key) => Ok(Self::Ec(key)),
            Err(_) => Ok(Self::Rsa(RsaPublicKey::from_pem(pem)?)),
        }
    }
}

impl JsonWebKey for PublicKey {
    fn key_type(&self) -> KeyType {
        match self {
            Self::Ec(key) => key.key_type(),
            Self::Rsa(key) => key.key_type(),
        }
    }

    fn key_id(&self) -> &KeyId {
        match self {
            Self::Ec(key) => key.key_id(),
            Self::Rsa(key) => key.key_id(),
        }
    }

    fn to_jwk_map(&self) -> JwkMap {
        match self {
            Self::Ec(key) => key.to_jwk_map(),
            Self::Rsa(key) => key.to_jwk_map(),
        }
    }

    fn to_pem(&self) -> Result<String, KeyError> {
        match self {
            Self::Ec(key) => key.to_pem(),
            Self::Rsa(key) => key.to_pem(),
        }
    }
}

impl SignatureVerifier for PublicKey {
    fn verify<R: ChunkReader + ?Sized>(
        &self,
        message: &mut R,
        alg: &str,
        signature: &[u8],
    ) -> Result<(), KeyError> {
        match self {
            Self::Ec(key) => key.verify(message, alg, signature),
            Self::Rsa(key) => key.verify(message, alg, signature),
        }
    }
}

impl From<EcPublicKey> for PublicKey {
    fn from(key: EcPublicKey) -> Self {
        Self::Ec(key)
    }
}

impl From<RsaPublicKey> for PublicKey {
    fn from(key: RsaPublicKey) -> Self {
        Self::Rsa(key)
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_jwk_map().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let jwk = JwkMap::deserialize(deserializer)?;
        Self::from_jwk_map(&jwk).map_err(serde::de::Error::custom)
    }
}

/// A private key of either family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrivateKey {
    /// EC key pair.
    Ec(EcPrivateKey),
    /// RSA key pair.
    Rsa(RsaPrivateKey),
}

impl PrivateKey {
    /// Parses a private JWK, dispatching on `kty`.
    pub fn from_jwk_map(jwk: &JwkMap) -> Result<Self, KeyError> {
        match KeyType::from_kty(required_str(jwk, "kty")?)? {
            KeyType::Ec => Ok(Self::Ec(EcPrivateKey::from_jwk_map(jwk)?)),
            KeyType::Rsa => Ok(Self::Rsa(RsaPrivateKey::from_jwk_map(jwk)?)),
        }
    }

    /// Parses a private JWK from JSON text.
    pub fn from_jwk_json(json: &str) -> Result<Self, KeyError> {
        Self::from_jwk_map(&parse_jwk_json(json)?)
    }

    /// Reads a private key PEM block: PKCS#8, SEC1 or PKCS#1.
    pub fn from_pem(pem: &str) -> Result<Self, KeyError> {
        if pem.contains(SEC1_EC_LABEL) {
            return Ok(Self::Ec(EcPrivateKey::from_pem(pem)?));
        }
        if pem.contains(PKCS1_RSA_LABEL) {
            return Ok(Self::Rsa(RsaPrivateKey::from_pem(pem)?));
        }
        match EcPrivateKey::from_pem(pem) {
            Ok(key) => Ok(Self::Ec(key)),
            Err(_) => Ok(Self::Rsa(RsaPrivateKey::from_pem(pem)?)),
        }
    }

    /// Generates an EC key pair on `curve`.
    pub fn generate_ec(curve: Curve) -> Result<Self, KeyError> {
        Ok(Self::Ec(EcPrivateKey::generate(curve)?))
    }

    /// Generates an RSA key pair with a `bits`-bit modulus.
    pub fn generate_rsa(bits: usize) -> Result<Self, KeyError> {
        Ok(Self::Rsa(RsaPrivateKey::generate(bits)?))
    }
}

impl JsonWebKey for PrivateKey {
    fn key_type(&self) -> KeyType {
        match self {
            Self::Ec(key) => key.key_type(),
            Self::Rsa(key) => key.key_type(),
        }
    }

    fn key_id(&self) -> &KeyId {
        match self {
            Self::Ec(key) => key.key_id(),
            Self::Rsa(key) => key.key_id(),
        }
    }

    fn to_jwk_map(&self) -> JwkMap {
        match self {
            Self::Ec(key) => key.to_jwk_map(),
            Self::Rsa(key) => key.to_jwk_map(),
        }
    }

    fn to_pem(&self) -> Result<String, KeyError> {
        match self {
            Self::Ec(key) => key.to_pem(),
            Self::Rsa(key) => key.to_pem(),
        }
    }
}

impl SignatureSigner for PrivateKey {
    type Public = PublicKey;

    fn public_key(&self) -> PublicKey {
        match self {
            Self::Ec(key) => PublicKey::Ec(key.public_key()),
            Self::Rsa(key) => PublicKey::Rsa(key.public_key()),
        }
    }

    fn sign<R: ChunkReader + ?Sized>(
        &self,
        message: &mut R,
        hash: HashId,
    ) -> Result<(Vec<u8>, SignatureAlgorithm), KeyError> {
        match self {
            Self::Ec(key) => key.sign(message, hash),
            Self::Rsa(key) => key.sign(message, hash),
        }
    }
}

impl From<EcPrivateKey> for PrivateKey {
    fn from(key: EcPrivateKey) -> Self {
        Self::Ec(key)
    }
}

impl From<RsaPrivateKey> for PrivateKey {
    fn from(key: RsaPrivateKey) -> Self {
        Self::Rsa(key)
    }
}

fn parse_jwk_json(json: &str) -> Result<JwkMap, KeyError> {
    serde_json::from_str(json).map_err(|err| KeyError::InvalidJwk(err.to_string()))
}
