//! The authorization level lattice.

use serde::{Deserialize, Serialize};

/// An authorization level.
///
/// Levels form a small closed ordered set represented as ascending integers,
/// so that "level A satisfies requirement R" is exactly `A >= R`.
///
/// Lifecycle of each level:
///
/// - [`Level::Superuser`] — a single trusted identity from static configuration
/// - [`Level::Owner`] — derived per guild from transport ownership metadata
/// - [`Level::Moderator`] / [`Level::Admin`] — persisted per (guild, role) pair
///   in the external [`RoleStore`](crate::RoleStore), mutated only through the
///   engine's privileged role command
/// - [`Level::None`] — everyone else
///
/// Owner and Superuser are never persisted, only derived.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// No privileges.
    #[default]
    None = 0,
    /// Moderator privileges, persisted per guild role.
    Moderator = 1,
    /// Administrator privileges, persisted per guild role.
    Admin = 2,
    /// The guild owner, derived from transport metadata.
    Owner = 3,
    /// The single configured trusted identity.
    Superuser = 4,
}

impl Level {
    /// Returns the canonical lowercase name of this level.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Moderator => "moderator",
            Self::Admin => "admin",
            Self::Owner => "owner",
            Self::Superuser => "superuser",
        }
    }

    /// Parses a level name against the full closed table.
    ///
    /// Matching is case-insensitive. Returns `None` for anything outside the
    /// table; user-supplied text is validated here, never through reflection
    /// on the enum.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "none" => Some(Self::None),
            "moderator" => Some(Self::Moderator),
            "admin" => Some(Self::Admin),
            "owner" => Some(Self::Owner),
            "superuser" => Some(Self::Superuser),
            _ => None,
        }
    }

    /// Parses a level name against the *assignable* subset.
    ///
    /// Only moderator and admin can be persisted through the role command;
    /// owner and superuser are derived and rejected here by construction.
    pub fn from_assignable_name(name: &str) -> Option<Self> {
        match Self::from_name(name)? {
            level @ (Self::Moderator | Self::Admin) => Some(level),
            _ => None,
        }
    }

    /// Returns `true` if this level satisfies the given requirement.
    pub fn satisfies(self, required: Level) -> bool {
        self >= required
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_monotonic() {
        assert!(Level::None < Level::Moderator);
        assert!(Level::Moderator < Level::Admin);
        assert!(Level::Admin < Level::Owner);
        assert!(Level::Owner < Level::Superuser);
    }

    #[test]
    fn test_satisfies_is_gte() {
        assert!(Level::Superuser.satisfies(Level::Moderator));
        assert!(Level::Admin.satisfies(Level::Admin));
        assert!(!Level::Moderator.satisfies(Level::Admin));
        assert!(Level::None.satisfies(Level::None));
    }

    #[test]
    fn test_from_name_closed_table() {
        assert_eq!(Level::from_name("ADMIN"), Some(Level::Admin));
        assert_eq!(Level::from_name("Owner"), Some(Level::Owner));
        assert_eq!(Level::from_name("root"), None);
        assert_eq!(Level::from_name(""), None);
    }

    #[test]
    fn test_assignable_excludes_derived_levels() {
        assert_eq!(
            Level::from_assignable_name("moderator"),
            Some(Level::Moderator)
        );
        assert_eq!(Level::from_assignable_name("Admin"), Some(Level::Admin));
        assert_eq!(Level::from_assignable_name("owner"), None);
        assert_eq!(Level::from_assignable_name("superuser"), None);
        assert_eq!(Level::from_assignable_name("none"), None);
    }
}
