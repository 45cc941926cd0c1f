//! Rewards unlocked by finishing a focus cycle.
//!
//! The timer never talks to this module directly: the calling layer sees a
//! completed cycle in the status snapshot and asks the store for a package.

mod media;
mod package;
pub mod quotes;
mod store;

pub use media::save_photo_locally;
pub use package::{CustomQuote, Photo, Quote, RewardPackage};
pub use store::{Preferences, RewardStore, UserData, TEMPLATE_IDS, USER_DATA_FILE};
