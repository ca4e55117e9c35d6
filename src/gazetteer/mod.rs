pub mod error;
pub mod lookup;
pub mod place_index;
