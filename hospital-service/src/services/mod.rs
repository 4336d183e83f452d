pub mod metrics;
pub mod store;
pub mod validation;

pub use self::metrics::{get_metrics, init_metrics};
pub use store::{EntityStore, Filter, MongoStore, OpScope, Repository, StoreError};
pub use validation::{validate_appointment, ReferenceError, ReferenceKind, ResolvedReferences};
