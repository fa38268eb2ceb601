pub mod hydrate;
pub mod migration;
pub mod serialization;
pub mod session;
pub mod store;
pub mod traits;

pub use hydrate::{hydrate, Hydrated, HydrationSource};
pub use migration::*;
pub use serialization::*;
pub use session::{BoardSession, SaveWorker};
pub use store::*;
pub use traits::*;
