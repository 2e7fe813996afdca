//! Structural parser for SSH authorized-key records.
//!
//! Checks that a record is a well-formed `[options] algorithm base64-blob [comment]`
//! line whose blob follows the SSH wire layout for its key type. Plain keys
//! and OpenSSH certificates are accepted. Nothing is verified
//! cryptographically.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

const CERT_SUFFIX: &str = "-cert-v01@openssh.com";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    #[error("no public key record found")]
    Empty,
    #[error("expected exactly one public key record, found {0}")]
    MultipleRecords(usize),
    #[error("unknown key algorithm '{0}'")]
    UnknownAlgorithm(String),
    #[error("missing key data after algorithm '{0}'")]
    MissingKeyData(String),
    #[error("key data is not valid base64")]
    Base64,
    #[error("key data is truncated")]
    Truncated,
    #[error("key data is for algorithm '{inner}' but the record is tagged '{outer}'")]
    AlgorithmMismatch { outer: String, inner: String },
    #[error("{0}")]
    Malformed(&'static str),
    #[error("key data has {0} trailing bytes")]
    TrailingBytes(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAlgorithm {
    Rsa,
    Dsa,
    Ed25519,
    EcdsaP256,
    EcdsaP384,
    EcdsaP521,
    SkEd25519,
    SkEcdsaP256,
}

impl KeyAlgorithm {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ssh-rsa" => Some(KeyAlgorithm::Rsa),
            "ssh-dss" => Some(KeyAlgorithm::Dsa),
            "ssh-ed25519" => Some(KeyAlgorithm::Ed25519),
            "ecdsa-sha2-nistp256" => Some(KeyAlgorithm::EcdsaP256),
            "ecdsa-sha2-nistp384" => Some(KeyAlgorithm::EcdsaP384),
            "ecdsa-sha2-nistp521" => Some(KeyAlgorithm::EcdsaP521),
            "sk-ssh-ed25519@openssh.com" => Some(KeyAlgorithm::SkEd25519),
            "sk-ecdsa-sha2-nistp256@openssh.com" => Some(KeyAlgorithm::SkEcdsaP256),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            KeyAlgorithm::Rsa => "ssh-rsa",
            KeyAlgorithm::Dsa => "ssh-dss",
            KeyAlgorithm::Ed25519 => "ssh-ed25519",
            KeyAlgorithm::EcdsaP256 => "ecdsa-sha2-nistp256",
            KeyAlgorithm::EcdsaP384 => "ecdsa-sha2-nistp384",
            KeyAlgorithm::EcdsaP521 => "ecdsa-sha2-nistp521",
            KeyAlgorithm::SkEd25519 => "sk-ssh-ed25519@openssh.com",
            KeyAlgorithm::SkEcdsaP256 => "sk-ecdsa-sha2-nistp256@openssh.com",
        }
    }

    /// Curve identifier and uncompressed point length for ECDSA keys.
    fn curve(self) -> Option<(&'static str, usize)> {
        match self {
            KeyAlgorithm::EcdsaP256 | KeyAlgorithm::SkEcdsaP256 => Some(("nistp256", 65)),
            KeyAlgorithm::EcdsaP384 => Some(("nistp384", 97)),
            KeyAlgorithm::EcdsaP521 => Some(("nistp521", 133)),
            _ => None,
        }
    }

    fn is_security_key(self) -> bool {
        matches!(self, KeyAlgorithm::SkEd25519 | KeyAlgorithm::SkEcdsaP256)
    }
}

/// Key type named by a record's tag: an algorithm, optionally wrapped in an
/// OpenSSH certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyType {
    pub algorithm: KeyAlgorithm,
    pub certificate: bool,
}

impl KeyType {
    pub fn from_tag(tag: &str) -> Option<Self> {
        let Some(base) = tag.strip_suffix(CERT_SUFFIX) else {
            return KeyAlgorithm::from_name(tag).map(|algorithm| KeyType {
                algorithm,
                certificate: false,
            });
        };
        // `sk-ssh-ed25519@openssh.com` certifies as `sk-ssh-ed25519-cert-v01@openssh.com`.
        let algorithm = KeyAlgorithm::from_name(base)
            .or_else(|| KeyAlgorithm::from_name(&format!("{base}@openssh.com")))?;
        Some(KeyType {
            algorithm,
            certificate: true,
        })
    }

    pub fn tag(self) -> String {
        let name = self.algorithm.name();
        if self.certificate {
            format!("{}{}", name.trim_end_matches("@openssh.com"), CERT_SUFFIX)
        } else {
            name.to_string()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    pub key_type: KeyType,
    pub comment: Option<String>,
}

impl PublicKey {
    pub fn algorithm(&self) -> KeyAlgorithm {
        self.key_type.algorithm
    }
}

/// Parse one authorized-key record.
///
/// Accepts either the record text itself or the standard base64 encoding of
/// it, which is how manifests carry the key. The encoded form may be wrapped
/// across lines.
pub fn parse_authorized_key(input: &str) -> Result<PublicKey, KeyError> {
    let unwrapped = decode_wrapped(input);
    parse_authorized_text(unwrapped.as_deref().unwrap_or(input))
}

fn decode_wrapped(input: &str) -> Option<String> {
    let compact: String = input.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD.decode(compact).ok()?;
    String::from_utf8(bytes).ok()
}

fn parse_authorized_text(text: &str) -> Result<PublicKey, KeyError> {
    let records: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();

    match records.as_slice() {
        [] => Err(KeyError::Empty),
        [record] => parse_record(record),
        many => Err(KeyError::MultipleRecords(many.len())),
    }
}

fn parse_record(record: &str) -> Result<PublicKey, KeyError> {
    let first = record.split_whitespace().next().ok_or(KeyError::Empty)?;
    if KeyType::from_tag(first).is_some() {
        return parse_key_fields(record);
    }

    // Leading options field, e.g. `no-pty,command="echo hi"`.
    let rest = skip_options(record);
    match rest.split_whitespace().next() {
        Some(tag) if KeyType::from_tag(tag).is_some() => parse_key_fields(rest),
        _ => Err(KeyError::UnknownAlgorithm(first.into())),
    }
}

/// Everything after the options field. Whitespace inside double quotes does
/// not end the field; `\"` escapes a quote.
fn skip_options(record: &str) -> &str {
    let mut in_quotes = false;
    let mut escaped = false;
    for (i, c) in record.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            ' ' | '\t' if !in_quotes => return record[i..].trim_start(),
            _ => {}
        }
    }
    ""
}

fn parse_key_fields(text: &str) -> Result<PublicKey, KeyError> {
    let mut fields = text.split_whitespace();
    let tag = fields.next().ok_or(KeyError::Empty)?;
    let key_type = KeyType::from_tag(tag).ok_or_else(|| KeyError::UnknownAlgorithm(tag.into()))?;

    let blob = fields
        .next()
        .ok_or_else(|| KeyError::MissingKeyData(tag.into()))?;
    let data = STANDARD.decode(blob).map_err(|_| KeyError::Base64)?;
    check_wire_layout(key_type, &data)?;

    let comment = fields.collect::<Vec<_>>().join(" ");
    Ok(PublicKey {
        key_type,
        comment: (!comment.is_empty()).then_some(comment),
    })
}

fn check_wire_layout(key_type: KeyType, data: &[u8]) -> Result<(), KeyError> {
    let mut reader = WireReader { buf: data };
    let tag = key_type.tag();

    let inner = reader.read_str()?;
    if inner != tag {
        return Err(KeyError::AlgorithmMismatch {
            outer: tag,
            inner: inner.into(),
        });
    }

    if key_type.certificate {
        reader.read_string()?; // nonce
    }
    read_key_fields(key_type.algorithm, &mut reader)?;
    if key_type.certificate {
        read_certificate_fields(&mut reader)?;
    }

    if !reader.buf.is_empty() {
        return Err(KeyError::TrailingBytes(reader.buf.len()));
    }
    Ok(())
}

fn read_key_fields(algorithm: KeyAlgorithm, reader: &mut WireReader<'_>) -> Result<(), KeyError> {
    match algorithm {
        KeyAlgorithm::Rsa => {
            let exponent = reader.read_string()?;
            let modulus = reader.read_string()?;
            if exponent.is_empty() || modulus.is_empty() {
                return Err(KeyError::Malformed("RSA key has an empty exponent or modulus"));
            }
        }
        KeyAlgorithm::Dsa => {
            for _ in 0..4 {
                if reader.read_string()?.is_empty() {
                    return Err(KeyError::Malformed("DSA key has an empty parameter"));
                }
            }
        }
        KeyAlgorithm::Ed25519 | KeyAlgorithm::SkEd25519 => {
            if reader.read_string()?.len() != 32 {
                return Err(KeyError::Malformed("Ed25519 key must be 32 bytes"));
            }
        }
        KeyAlgorithm::EcdsaP256
        | KeyAlgorithm::EcdsaP384
        | KeyAlgorithm::EcdsaP521
        | KeyAlgorithm::SkEcdsaP256 => {
            let Some((curve, point_len)) = algorithm.curve() else {
                return Err(KeyError::Malformed("ECDSA key without a curve"));
            };
            if reader.read_str()? != curve {
                return Err(KeyError::Malformed("ECDSA curve does not match the key algorithm"));
            }
            let point = reader.read_string()?;
            if point.len() != point_len || point.first() != Some(&0x04) {
                return Err(KeyError::Malformed(
                    "ECDSA public point is not an uncompressed curve point",
                ));
            }
        }
    }

    // Security-key variants carry the application string last.
    if algorithm.is_security_key() {
        reader.read_str()?;
    }
    Ok(())
}

/// Certificate body after the certified key, up to and including the CA
/// signature.
fn read_certificate_fields(reader: &mut WireReader<'_>) -> Result<(), KeyError> {
    reader.read_u64()?; // serial
    let cert_type = reader.read_u32()?;
    if !matches!(cert_type, 1 | 2) {
        return Err(KeyError::Malformed("certificate type must be user or host"));
    }
    reader.read_str()?; // key id
    reader.read_string()?; // valid principals
    let valid_after = reader.read_u64()?;
    let valid_before = reader.read_u64()?;
    if valid_after > valid_before {
        return Err(KeyError::Malformed("certificate validity window is inverted"));
    }
    reader.read_string()?; // critical options
    reader.read_string()?; // extensions
    reader.read_string()?; // reserved
    if reader.read_string()?.is_empty() {
        return Err(KeyError::Malformed("certificate has no signing key"));
    }
    if reader.read_string()?.is_empty() {
        return Err(KeyError::Malformed("certificate has no signature"));
    }
    Ok(())
}

/// Reader over SSH wire encoding: big-endian integers and u32
/// length-prefixed strings.
struct WireReader<'a> {
    buf: &'a [u8],
}

impl<'a> WireReader<'a> {
    fn read_u32(&mut self) -> Result<u32, KeyError> {
        let (head, rest) = self.buf.split_first_chunk::<4>().ok_or(KeyError::Truncated)?;
        self.buf = rest;
        Ok(u32::from_be_bytes(*head))
    }

    fn read_u64(&mut self) -> Result<u64, KeyError> {
        let (head, rest) = self.buf.split_first_chunk::<8>().ok_or(KeyError::Truncated)?;
        self.buf = rest;
        Ok(u64::from_be_bytes(*head))
    }

    fn read_string(&mut self) -> Result<&'a [u8], KeyError> {
        let len = self.read_u32()? as usize;
        if self.buf.len() < len {
            return Err(KeyError::Truncated);
        }
        let (value, rest) = self.buf.split_at(len);
        self.buf = rest;
        Ok(value)
    }

    fn read_str(&mut self) -> Result<&'a str, KeyError> {
        std::str::from_utf8(self.read_string()?)
            .map_err(|_| KeyError::Malformed("key data contains a non-UTF-8 name"))
    }
}
