pub mod error;
pub mod result;
pub mod traits;

pub use error::BoardError;
pub use result::BoardResult;
pub use traits::{ConfigStore, MutationService, TrashOutcome, TrashService};
