use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Strongly typed ID for platform users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

/// Strongly typed ID for filmmaker accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FilmmakerId(pub Uuid);

/// Strongly typed ID for platform-native movie records (admin side).
///
/// Catalog movies decoded through the normalization adapter keep their
/// backend-provided string id because the TMDB-flavored shape uses numeric
/// ids; see [`crate::movie::Movie`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MovieId(pub Uuid);

/// Strongly typed ID for flagged-content reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FlagId(pub Uuid);

/// Strongly typed ID for payment/payout records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PaymentId(pub Uuid);

macro_rules! impl_id {
    ($name:ident) => {
        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            pub fn to_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl AsRef<Uuid> for $name {
            fn as_ref(&self) -> &Uuid {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

impl_id!(UserId);
impl_id!(FilmmakerId);
impl_id!(MovieId);
impl_id!(FlagId);
impl_id!(PaymentId);

/// The kind of entity an admin action targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    User,
    Filmmaker,
    Movie,
    FlaggedItem,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::User => "user",
            EntityKind::Filmmaker => "filmmaker",
            EntityKind::Movie => "movie",
            EntityKind::FlaggedItem => "flagged item",
        }
    }
}

/// A `(kind, id)` pair identifying the target of an admin action.
///
/// The admin busy gate holds one of these while an action is in flight so
/// a second trigger against the same target can be rejected before any
/// network traffic happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: Uuid,
}

impl EntityRef {
    pub fn user(id: UserId) -> Self {
        Self {
            kind: EntityKind::User,
            id: id.0,
        }
    }

    pub fn filmmaker(id: FilmmakerId) -> Self {
        Self {
            kind: EntityKind::Filmmaker,
            id: id.0,
        }
    }

    pub fn movie(id: MovieId) -> Self {
        Self {
            kind: EntityKind::Movie,
            id: id.0,
        }
    }

    pub fn flagged(id: FlagId) -> Self {
        Self {
            kind: EntityKind::FlaggedItem,
            id: id.0,
        }
    }
}

impl std::fmt::Display for EntityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind.as_str(), self.id)
    }
}
