pub mod identity;
pub mod map_entry;
pub mod profile;
pub mod relation;
pub mod validation;

pub use identity::Identity;
pub use map_entry::{Comment, MapEntry, NewMapEntry, SortCriterion, fold_case};
pub use profile::{ProfileTab, ProfileView};
pub use relation::RelationSet;
pub use validation::ValidationError;
