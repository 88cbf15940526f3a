pub mod destination;
pub mod listing;
pub mod preferences;
pub mod turn;

pub use destination::{City, Destination};
pub use listing::Listing;
pub use preferences::DetectedPreferences;
pub use turn::{ChatTurn, Role};
