//! # jujulens-types
//!
//! The decoded shape of a single `juju status` export, as consumed by
//! jujulens. These types sit between the decoder (YAML or JSON text) and the
//! entity graph builder: they describe exactly which keys each entity kind
//! carries and which of them are optional.
//!
//! Nested entity maps (units, subordinates, containers, network interfaces)
//! are kept as undecoded [`Payload`] values so the builder can decode each
//! child on its own and report failures against the child's name.
//!
//! ## Example
//!
//! ```rust
//! use jujulens_types::{PlatformVersion, StatusDocument};
//!
//! let doc: StatusDocument = serde_json::from_str(r#"{
//!     "model": { "name": "default" },
//!     "controller": { "timestamp": "09:00:00Z" }
//! }"#).unwrap();
//! assert_eq!(doc.controller.unwrap().timestamp.as_deref(), Some("09:00:00Z"));
//!
//! let v: PlatformVersion = "2.5.1".parse().unwrap();
//! assert!(v > "2.5-beta1".parse().unwrap());
//! ```

mod status;
mod version;

pub use status::*;
pub use version::*;
