pub mod cover_type;
pub mod history;
pub mod input;

pub use cover_type::*;
pub use history::*;
pub use input::*;
