mod row;
mod table;

pub use row::*;
pub use table::SongTable;
