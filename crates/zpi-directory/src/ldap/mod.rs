//! LDAP snapshot provider
//!
//! Supports:
//! - LDAP, LDAPS and STARTTLS connections
//! - Simple bind with an admin DN
//! - One subtree search returning the attributes the inspector reads

mod client;
mod types;

pub use client::LdapClient;
pub use types::*;
