//! Domain logic - pure rules for selecting tags and building the publish list

pub mod fetch;
pub mod publish_list;
pub mod replacement;
pub mod tag;

pub use fetch::{FetchOutcome, FetchResult};
pub use publish_list::merge_publish_list;
pub use replacement::{compute_replacements, Replacement, ReplacementPlan};
pub use tag::{Tag, TagPattern};
