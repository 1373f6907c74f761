pub mod analysis;
pub mod controller;
pub mod messages;
pub mod traits;
