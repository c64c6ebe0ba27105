//! Domain records shared across stores.

pub mod product;
pub mod user;

pub use product::{Category, Product};
pub use user::{Address, AddressDraft, AddressKind, AddressPatch, ProfilePatch, User};
