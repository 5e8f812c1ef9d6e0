//! Authentication for the shelfdesk SDK.
//!
//! A [`Session`] wraps a bearer token. It is either issued through
//! [`Client::sign_in`](crate::Client::sign_in) or
//! [`Client::register`](crate::Client::register), or handed over by whoever
//! signed the user in, together with the subject id and role claims they
//! extracted. The token itself is never decoded:
//!
//! ```rust,ignore
//! use shelfdesk::{Client, Role, Session};
//!
//! let session = Session::new(token)
//!     .with_subject_id(user_id)
//!     .with_role(Role::Admin);
//!
//! let client = Client::builder()
//!     .url("https://library.example.com")
//!     .session(session)
//!     .build()?;
//! ```
//!
//! Requests made without a session carry no `Authorization` header, which is
//! what the public catalog endpoints expect.

mod account;
mod session;

pub use account::{Credentials, Registration, REGISTER_PATH, SIGN_IN_PATH};
pub use session::{Role, Session};
