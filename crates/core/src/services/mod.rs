pub mod detect;
pub mod regions;
#[cfg(feature = "goblin-formats")]
pub mod resolvers;
