mod contest;
mod match_state;
mod player;
mod points;
mod team;

pub use contest::*;
pub use match_state::*;
pub use player::*;
pub use points::*;
pub use team::*;
