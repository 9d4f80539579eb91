use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ec_key::Curve;
use crate::errors::KeyError;

/// Hash primitives a signer can be asked to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HashId {
    /// SHA-224.
    Sha224,
    /// SHA-256.
    #[default]
    Sha256,
    /// SHA-384.
    Sha384,
    /// SHA-512.
    Sha512,
}

/// Key families a signature algorithm applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyFamily {
    /// Elliptic-curve keys (ECDSA).
    Ec,
    /// RSA keys (PKCS#1 v1.5).
    Rsa,
}

/// JOSE signature algorithms understood by this library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SignatureAlgorithm {
    /// RSASSA-PKCS1-v1_5 with SHA-256.
    RS256,
    /// RSASSA-PKCS1-v1_5 with SHA-384.
    RS384,
    /// RSASSA-PKCS1-v1_5 with SHA-512.
    RS512,
    /// ECDSA on P-256 with SHA-256.
    ES256,
    /// ECDSA on P-384 with SHA-384.
    ES384,
    /// ECDSA on P-521 with SHA-512.
    ES512,
}

struct AlgorithmSpec {
    alg: SignatureAlgorithm,
    token: &'static str,
    hash: HashId,
    family: KeyFamily,
}

const ALGORITHMS: [AlgorithmSpec; 6] = [
    AlgorithmSpec {
        alg: SignatureAlgorithm::RS256,
        token: "RS256",
        hash: HashId::Sha256,
        family: KeyFamily::Rsa,
    },
    AlgorithmSpec {
        alg: SignatureAlgorithm::RS384,
        token: "RS384",
        hash: HashId::Sha384,
        family: KeyFamily::Rsa,
    },
    AlgorithmSpec {
        alg: SignatureAlgorithm::RS512,
        token: "RS512",
        hash: HashId::Sha512,
        family: KeyFamily::Rsa,
    },
    AlgorithmSpec {
        alg: SignatureAlgorithm::ES256,
        token: "ES256",
        hash: HashId::Sha256,
        family: KeyFamily::Ec,
    },
    AlgorithmSpec {
        alg: SignatureAlgorithm::ES384,
        token: "ES384",
        hash: HashId::Sha384,
        family: KeyFamily::Ec,
    },
    AlgorithmSpec {
        alg: SignatureAlgorithm::ES512,
        token: "ES512",
        hash: HashId::Sha512,
        family: KeyFamily::Ec,
    },
];

impl SignatureAlgorithm {
    fn spec(self) -> &'static AlgorithmSpec {
        // Table order follows declaration order.
        &ALGORITHMS[self as usize]
    }

    /// Looks up an algorithm by its header token (`"ES256"`, `"RS512"`, ...).
    pub fn from_token(token: &str) -> Result<Self, KeyError> {
        ALGORITHMS
            .iter()
            .find(|spec| spec.token == token)
            .map(|spec| spec.alg)
            .ok_or_else(|| KeyError::UnsupportedAlgorithm(token.to_string()))
    }

    /// Header token for this algorithm.
    pub fn token(self) -> &'static str {
        self.spec().token
    }

    /// Hash the algorithm signs over.
    pub fn hash(self) -> HashId {
        self.spec().hash
    }

    /// Key family able to produce and check this algorithm.
    pub fn family(self) -> KeyFamily {
        self.spec().family
    }

    /// RSA algorithm for a requested hash; anything but SHA-384/512 is RS256.
    pub fn for_rsa_hash(hash: HashId) -> Self {
        match hash {
            HashId::Sha512 => Self::RS512,
            HashId::Sha384 => Self::RS384,
            HashId::Sha224 | HashId::Sha256 => Self::RS256,
        }
    }

    /// The single algorithm defined for a curve.
    pub fn for_curve(curve: Curve) -> Self {
        match curve {
            Curve::P256 => Self::ES256,
            Curve::P384 => Self::ES384,
            Curve::P521 => Self::ES512,
        }
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for SignatureAlgorithm {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s)
    }
}

impl TryFrom<String> for SignatureAlgorithm {
    type Error = KeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_token(&value)
    }
}

impl From<SignatureAlgorithm> for String {
    fn from(value: SignatureAlgorithm) -> Self {
        value.token().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_declaration_order() {
        for spec in &ALGORITHMS {
            assert_eq!(spec.alg.token(), spec.token);
        }
    }

    #[test]
    fn tokens_round_trip() {
        for token in ["RS256", "RS384", "RS512", "ES256", "ES384", "ES512"] {
            assert_eq!(SignatureAlgorithm::from_token(token).unwrap().token(), token);
        }
    }

    #[test]
    fn unknown_token_is_unsupported() {
        assert!(matches!(
            SignatureAlgorithm::from_token("HS256"),
            Err(KeyError::UnsupportedAlgorithm(token)) if token == "HS256"
        ));
        assert!(SignatureAlgorithm::from_token("ES521").is_err());
    }

    #[test]
    fn rsa_hash_mapping_defaults_to_rs256() {
        assert_eq!(SignatureAlgorithm::for_rsa_hash(HashId::Sha512), SignatureAlgorithm::RS512);
        assert_eq!(SignatureAlgorithm::for_rsa_hash(HashId::Sha384), SignatureAlgorithm::RS384);
        assert_eq!(SignatureAlgorithm::for_rsa_hash(HashId::Sha256), SignatureAlgorithm::RS256);
        assert_eq!(SignatureAlgorithm::for_rsa_hash(HashId::Sha224), SignatureAlgorithm::RS256);
    }

    #[test]
    fn curves_map_one_to_one() {
        assert_eq!(SignatureAlgorithm::for_curve(Curve::P256), SignatureAlgorithm::ES256);
        assert_eq!(SignatureAlgorithm::for_curve(Curve::P384), SignatureAlgorithm::ES384);
        assert_eq!(SignatureAlgorithm::for_curve(Curve::P521), SignatureAlgorithm::ES512);
        assert_eq!(SignatureAlgorithm::ES512.hash(), HashId::Sha512);
        assert_eq!(SignatureAlgorithm::ES384.family(), KeyFamily::Ec);
    }

    #[test]
    fn serde_uses_token() {
        let json = serde_json::to_string(&SignatureAlgorithm::ES256).unwrap();
        assert_eq!(json, r#""ES256""#);
        let alg: SignatureAlgorithm = serde_json::from_str(r#""RS384""#).unwrap();
        assert_eq!(alg, SignatureAlgorithm::RS384);
    }
}
