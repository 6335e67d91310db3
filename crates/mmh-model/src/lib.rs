//! Data model for the moderator message composer.
//!
//! This crate holds the plain data shared by every other crate in the workspace:
//!
//! - [`template`]: custom message templates and the host deployment they are scoped to
//! - [`reason`]: the set of reason ids the host form understands natively
//! - [`defaults`]: the payload returned by the host's template-fetch endpoint
//! - [`bounds`]: inclusive text length bounds
//! - [`field`]: the logical fields of the host's message form
//!
//! Nothing here performs I/O.

pub mod bounds;
pub mod defaults;
pub mod field;
pub mod reason;
pub mod template;

pub use bounds::ValidationBounds;
pub use defaults::{FieldDefaults, ModelError};
pub use field::FormField;
pub use reason::{BLANK_REASON_ID, FALLBACK_REASON_ID, SystemReasonIds};
pub use template::{HostScope, STACK_OVERFLOW_URL, Template};
