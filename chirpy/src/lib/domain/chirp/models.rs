use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::chirp::errors::ChirpBodyError;
use crate::chirp::errors::ChirpError;
use crate::chirp::errors::ChirpIdError;
use crate::user::models::UserId;

/// Chirp aggregate entity.
///
/// A short message posted by a single author.
#[derive(Debug, Clone)]
pub struct Chirp {
    pub id: ChirpId,
    pub body: ChirpBody,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Chirp unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChirpId(pub Uuid);

impl ChirpId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a chirp ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ChirpIdError> {
        Uuid::parse_str(s)
            .map(ChirpId)
            .map_err(|e| ChirpIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for ChirpId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChirpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Chirp body value object.
///
/// At most 140 bytes of UTF-8; a fixed set of banned words is masked with `****`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChirpBody(String);

impl ChirpBody {
    const MAX_LENGTH: usize = 140;
    const MASK: &'static str = "****";
    const PROFANITIES: [&'static str; 3] = ["kerfuffle", "sharbert", "fornax"];

    /// Validate and clean a raw chirp body.
    ///
    /// Length is checked on the raw input, before masking. Only whole
    /// space-separated words are masked, compared case-insensitively, so
    /// `Sharbert!` is left alone.
    ///
    /// # Errors
    /// * `TooLong` - Body exceeds 140 bytes
    pub fn new(body: String) -> Result<Self, ChirpBodyError> {
        let length = body.len();
        if length > Self::MAX_LENGTH {
            return Err(ChirpBodyError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(Self::mask_profanities(&body)))
    }

    /// Wrap a body read back from storage, which was validated on write.
    pub fn from_stored(body: String) -> Self {
        Self(body)
    }

    fn mask_profanities(body: &str) -> String {
        body.split(' ')
            .map(|word| {
                let lowered = word.to_lowercase();
                if Self::PROFANITIES.iter().any(|banned| *banned == lowered) {
                    Self::MASK
                } else {
                    word
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Ordering of chirp listings by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = ChirpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(ChirpError::InvalidSortOrder(other.to_string())),
        }
    }
}

/// Command to post a new chirp
#[derive(Debug)]
pub struct CreateChirpCommand {
    pub author: UserId,
    pub body: ChirpBody,
}

/// Filter and ordering for chirp listings
#[derive(Debug, Default)]
pub struct ListChirpsQuery {
    pub author: Option<UserId>,
    pub sort: SortOrder,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_within_limit() {
        let body = ChirpBody::new("I'm the one who knocks!".to_string()).unwrap();
        assert_eq!(body.as_str(), "I'm the one who knocks!");
    }

    #[test]
    fn test_body_exactly_at_limit() {
        let raw = "a".repeat(140);
        assert!(ChirpBody::new(raw).is_ok());
    }

    #[test]
    fn test_body_too_long() {
        let raw = "a".repeat(141);
        assert_eq!(
            ChirpBody::new(raw),
            Err(ChirpBodyError::TooLong {
                max: 140,
                actual: 141
            })
        );
    }

    #[test]
    fn test_body_length_counts_bytes() {
        assert!(ChirpBody::new("é".repeat(70)).is_ok());
        assert_eq!(
            ChirpBody::new("é".repeat(140)),
            Err(ChirpBodyError::TooLong {
                max: 140,
                actual: 280
            })
        );
    }

    #[test]
    fn test_body_masks_profanities() {
        let body = ChirpBody::new(
            "I really need a kerfuffle to go to bed sooner, Fornax !".to_string(),
        )
        .unwrap();
        assert_eq!(
            body.as_str(),
            "I really need a **** to go to bed sooner, **** !"
        );
    }

    #[test]
    fn test_body_ignores_profanity_with_punctuation() {
        let body = ChirpBody::new("This is a Sharbert! moment".to_string()).unwrap();
        assert_eq!(body.as_str(), "This is a Sharbert! moment");
    }

    #[test]
    fn test_body_preserves_spacing() {
        let body = ChirpBody::new("  SHARBERT  ok".to_string()).unwrap();
        assert_eq!(body.as_str(), "  ****  ok");
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!("".parse::<SortOrder>().unwrap(), SortOrder::Asc);
        assert_eq!("asc".parse::<SortOrder>().unwrap(), SortOrder::Asc);
        assert_eq!("desc".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert!(matches!(
            "random".parse::<SortOrder>(),
            Err(ChirpError::InvalidSortOrder(_))
        ));
    }
}
