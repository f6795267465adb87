//! Actor wrapper giving each profile a single writer when sessions are shared
//! across tasks.

pub mod messages;
pub mod profile;
pub mod traits;

pub use messages::{ActorError, ProfileMessage, ProfileSnapshot};
pub use profile::ProfileActorHandle;
pub use traits::ProfileService;
