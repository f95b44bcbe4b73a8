//! Images carried inline as base64 data URIs.
//!
//! Recipe photos and user avatars share this type. Binary storage is out of
//! scope, so the validated URI is stored and served as is.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// Raised when a value is not a decodable `data:image/...;base64,` URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("image must be a base64 data URI such as data:image/png;base64,...")]
pub struct InvalidImageData;

/// Image payload `data:image/<subtype>;base64,<data>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData(String);

impl ImageData {
    /// Validate the data URI shape and that the payload decodes.
    ///
    /// # Examples
    /// ```
    /// use cookbook::domain::ImageData;
    ///
    /// assert!(ImageData::parse("data:image/png;base64,iVBORw0KGgo=".to_owned()).is_ok());
    /// assert!(ImageData::parse("https://example.test/cake.png".to_owned()).is_err());
    /// ```
    pub fn parse(value: String) -> Result<Self, InvalidImageData> {
        let rest = value.strip_prefix("data:image/").ok_or(InvalidImageData)?;
        let (subtype, payload) = rest.split_once(";base64,").ok_or(InvalidImageData)?;
        let subtype_ok = !subtype.is_empty()
            && subtype
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '+' | '-' | '.'));
        if !subtype_ok {
            return Err(InvalidImageData);
        }
        match STANDARD.decode(payload) {
            Ok(bytes) if !bytes.is_empty() => Ok(Self(value)),
            _ => Err(InvalidImageData),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<ImageData> for String {
    fn from(value: ImageData) -> Self {
        value.0
    }
}
