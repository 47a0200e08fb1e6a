//!
//! Strict PHC codec for scrypt credentials.
//!
//! Grammar (exact, order-dependent):
//!
//! ```text
//! $scrypt$N=<decimal>$r=<decimal>$p=<decimal>$<salt>$<key>
//! ```
//!
//! Decoding is an anchored-literal scan, the precise inverse of encoding:
//! the `$N=`, `$r=`, `$p=` anchors must appear in that order with nothing
//! between the fields. Reordered, repeated or missing anchors are grammar
//! errors, not tolerated input. Salt and key are opaque text here; base64
//! validity of the key field is the verifier's concern.

use base64::Engine;

use crate::kdf::DerivedKey;
use crate::params::CostParams;

/// Literal tag opening every encoded credential.
const ALG_TAG: &str = "$scrypt";

const N_ANCHOR: &str = "$N=";
const R_ANCHOR: &str = "$r=";
const P_ANCHOR: &str = "$p=";

/// A decoded (or about-to-be-encoded) scrypt PHC credential.
///
/// `salt` and `key` hold the text fields exactly as they appear between the
/// `$` separators.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhcHash {
    pub params: CostParams,
    pub salt: String,
    pub key: String,
}

impl PhcHash {
    /// Builds the credential value for a finished derivation, encoding the
    /// key bytes as url-safe unpadded base64.
    pub fn new(params: CostParams, salt: impl Into<String>, key: &DerivedKey) -> Self {
        Self {
            params,
            salt: salt.into(),
            key: base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(key.as_bytes()),
        }
    }

    /// Renders the exact grammar. The salt text must not contain `$`; the
    /// generator never produces one that does.
    pub fn encode(&self) -> String {
        format!(
            "{}{}{}{}{}{}{}${}${}",
            ALG_TAG,
            N_ANCHOR,
            self.params.n(),
            R_ANCHOR,
            self.params.r(),
            P_ANCHOR,
            self.params.p(),
            self.salt,
            self.key
        )
    }

    /// Parses an encoded credential with the strict anchored scan.
    pub fn decode(encoded: &str) -> Result<Self, ParseError> {
        let rest = encoded
            .strip_prefix(ALG_TAG)
            .ok_or(ParseError::MalformedGrammar)?;

        let (n_text, rest) = take_anchored_value(rest, N_ANCHOR)?;
        let (r_text, rest) = take_anchored_value(rest, R_ANCHOR)?;
        let (p_text, rest) = take_anchored_value(rest, P_ANCHOR)?;

        let n = parse_cost_value(n_text, "N")?;
        let r = parse_cost_value(r_text, "r")?;
        let p = parse_cost_value(p_text, "p")?;
        let params =
            CostParams::new(n, r, p).map_err(|e| ParseError::InvalidCostParameter(e.to_string()))?;

        // rest starts at the `$` that introduces the salt.
        let rest = &rest[1..];
        let Some(terminator) = rest.find('$') else {
            return Err(ParseError::MalformedGrammar);
        };
        let salt = &rest[..terminator];
        let key = &rest[terminator + 1..];

        if salt.is_empty() {
            return Err(ParseError::EmptySalt);
        }
        if key.is_empty() {
            return Err(ParseError::EmptyKey);
        }

        Ok(Self {
            params,
            salt: salt.to_string(),
            key: key.to_string(),
        })
    }
}

/// Strips `anchor` and returns the value up to (excluding) the next `$`,
/// leaving that `$` in the remainder for the next anchor.
fn take_anchored_value<'a>(s: &'a str, anchor: &str) -> Result<(&'a str, &'a str), ParseError> {
    let s = s.strip_prefix(anchor).ok_or(ParseError::MalformedGrammar)?;
    match s.find('$') {
        Some(idx) => Ok((&s[..idx], &s[idx..])),
        None => Err(ParseError::MalformedGrammar),
    }
}

/// Parses one cost value as a plain decimal integer. Signs, whitespace and
/// empty values are rejected; encoding never emits them.
fn parse_cost_value<T>(text: &str, field: &str) -> Result<T, ParseError>
where
    T: std::str::FromStr,
{
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidCostParameter(format!(
            "{field}={text:?} is not a decimal integer"
        )));
    }
    text.parse().map_err(|_| {
        ParseError::InvalidCostParameter(format!("{field}={text} is out of range"))
    })
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("malformed PHC grammar")]
    MalformedGrammar,

    #[error("empty salt field")]
    EmptySalt,

    #[error("empty derived-key field")]
    EmptyKey,

    #[error("invalid cost parameter: {0}")]
    InvalidCostParameter(String),
}
