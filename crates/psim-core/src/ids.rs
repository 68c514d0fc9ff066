//! Strongly typed identifier wrappers.
//!
//! Parcel, route, incident, and hub identifiers are opaque strings assigned
//! by the backend (UUIDs in practice, but nothing here assumes a format).
//! Wrapping them keeps a `ParcelId` from ever being passed where a
//! `RouteId` is expected, at zero runtime cost beyond the `String` itself.
//! All IDs are `Eq + Hash + Ord` so they work as map keys and sorted
//! collection elements without ceremony.

use std::fmt;

/// Generate a typed ID wrapper around an owned string.
macro_rules! typed_str_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            #[inline]
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
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

typed_str_id! {
    /// Backend identifier of a parcel.
    pub struct ParcelId;
}

typed_str_id! {
    /// Backend identifier of a computed route.
    pub struct RouteId;
}

typed_str_id! {
    /// Identifier of an operator-declared incident.
    pub struct IncidentId;
}

typed_str_id! {
    /// Backend identifier of a hub (static origin/destination point).
    pub struct HubId;
}
