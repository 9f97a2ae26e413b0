pub mod collection;
pub mod models;
pub mod utils;

pub use collection::SongCollection;
pub use models::SongRecord;
