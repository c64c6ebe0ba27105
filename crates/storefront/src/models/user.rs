//! User identity and address book records.
//!
//! These mirror the JSON shape of the remote user-directory endpoint
//! (camelCase field names), which owns persistence and business rules.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use sunstone_core::{AddressId, Email, UserId};

/// Address kind. The UI offers one form per kind; the data layer itself
/// does not enforce at most one of each (known gap, preserved).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddressKind {
    Home,
    Work,
}

/// A shipping address owned by a [`User`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: AddressId,
    /// Recipient name.
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub phone: String,
    #[serde(rename = "type")]
    pub kind: AddressKind,
    /// The first address added is implicitly the default. This flag is
    /// never re-validated after edits (latent invariant, preserved).
    pub is_default: bool,
}

/// Input for creating an address. The id and default flag are assigned by
/// the session store.
#[derive(Debug, Clone)]
pub struct AddressDraft {
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub phone: String,
    pub kind: AddressKind,
}

/// Partial address update; `None` fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct AddressPatch {
    pub name: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub phone: Option<String>,
    pub kind: Option<AddressKind>,
}

impl Address {
    /// Materialize a draft into an address.
    #[must_use]
    pub fn from_draft(id: AddressId, draft: AddressDraft, is_default: bool) -> Self {
        Self {
            id,
            name: draft.name,
            street: draft.street,
            city: draft.city,
            state: draft.state,
            zip: draft.zip,
            phone: draft.phone,
            kind: draft.kind,
            is_default,
        }
    }

    /// Apply a partial update in place.
    pub fn apply(&mut self, patch: AddressPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(street) = patch.street {
            self.street = street;
        }
        if let Some(city) = patch.city {
            self.city = city;
        }
        if let Some(state) = patch.state {
            self.state = state;
        }
        if let Some(zip) = patch.zip {
            self.zip = zip;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
    }
}

/// The authenticated user identity.
///
/// Owned exclusively by the session store; mutated only through explicit
/// operations and cleared on logout. The `password` field travels with
/// the record because the remote endpoint is a plain JSON store with no
/// server-side auth (out of scope per the project's non-goals).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub password: String,
    pub avatar: String,
    pub joined_date: NaiveDate,
    #[serde(default)]
    pub shipping_addresses: Vec<Address>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Partial profile update; `None` fields keep their current value.
///
/// Applied locally only - profile edits are not synced to the remote
/// endpoint (divergence risk, preserved and documented).
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub phone: Option<String>,
}

impl User {
    /// Apply a partial profile update in place.
    pub fn apply_profile(&mut self, patch: ProfilePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(avatar) = patch.avatar {
            self.avatar = avatar;
        }
        if let Some(phone) = patch.phone {
            self.phone = Some(phone);
        }
    }
}
