pub use self::{card::*, marked_cells::*, win_type::*};

pub(crate) mod card;
pub(crate) mod marked_cells;
pub(crate) mod win_type;
