//! Entity structs for the Roster domain objects.
//!
//! Each entity maps to a table in the libSQL database. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema` for JSON roundtrip and
//! schema generation.

mod organization;
mod profile;

pub use organization::Organization;
pub use profile::{Profile, ProfilePatch};
