pub mod config;
pub mod error;
pub mod model;

pub use config::*;
pub use error::*;
pub use model::annotation::*;
pub use model::document::*;
pub use model::ids::*;
pub use model::linguistic_type::*;
pub use model::opaque::*;
pub use model::tier::*;
pub use model::time_order::*;
