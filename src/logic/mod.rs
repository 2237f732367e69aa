//! Bracket business logic: registration, draw, bracket construction, advancement.

mod advance;
mod bracket;
mod draw;
mod registry;

pub use advance::record_winner;
pub use bracket::{bracket_view, build_bracket};
pub use draw::draw_teams;
pub use registry::{clear_teams, register_team, remove_team};
