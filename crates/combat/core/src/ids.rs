//! Identifier newtypes for reference data and runtime records.
//!
//! All ids are opaque strings owned by the surrounding subsystems (content
//! catalogs, account service, location service). Newtypes keep them from
//! being swapped for one another at call sites.

use core::fmt;

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(String);

        impl $name {
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self(raw.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self(raw)
            }
        }
    };
}

string_id!(
    /// Enemy type template identifier.
    EnemyTypeId
);
string_id!(
    /// Difficulty tier identifier.
    TierId
);
string_id!(
    /// Craftable material identifier.
    MaterialId
);
string_id!(
    /// Inventory item identifier.
    ItemId
);
string_id!(
    /// Cosmetic style identifier carried by styled enemies.
    StyleId
);
string_id!(
    /// Player account identifier, passed explicitly through every call.
    PlayerId
);
string_id!(
    /// Discovered location identifier.
    LocationId
);
string_id!(
    /// Combat session identifier.
    SessionId
);
