//! Outcomes shared by the favorite, shopping-cart and subscription registries.
//!
//! Repositories report what a single conditional write did; services turn
//! the "nothing happened" cases into domain errors.

use super::Error;

/// Result of inserting a membership row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipAdd {
    Created,
    AlreadyExists,
}

/// Result of deleting a membership row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipRemoval {
    Removed,
    NotFound,
}

impl MembershipAdd {
    /// Map a duplicate to [`Error::already_exists`] with `message`.
    pub fn require_created(self, message: &str) -> Result<(), Error> {
        match self {
            Self::Created => Ok(()),
            Self::AlreadyExists => Err(Error::already_exists(message)),
        }
    }
}

impl MembershipRemoval {
    /// Map a missing row to [`Error::not_found`] with `message`.
    pub fn require_removed(self, message: &str) -> Result<(), Error> {
        match self {
            Self::Removed => Ok(()),
            Self::NotFound => Err(Error::not_found(message)),
        }
    }
}
