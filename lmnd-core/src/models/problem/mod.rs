//! Problem domain models: facilities, delivery zones and vehicle types.

mod builders;
pub use self::builders::*;

mod facility;
pub use self::facility::*;

mod vehicle;
pub use self::vehicle::*;

mod zone;
pub use self::zone::*;
