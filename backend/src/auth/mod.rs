//! Admin authentication.
//!
//! Credentials live in a JSON file and are compared as-is. A successful
//! login creates a server-side session; the cookie only carries the opaque
//! session token, so nothing the client sends is trusted beyond the lookup.

pub mod credentials;
pub mod guard;
pub mod session;
