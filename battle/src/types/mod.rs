//! Domain types for battle state tracking

mod conditions;
mod field;
mod pokemon;
mod side;
mod stats;
mod volatile;

pub use conditions::{PseudoWeather, SideConditionState, Weather};
pub use field::FieldState;
pub use pokemon::{PokemonState, RevealedMove, StatusData};
pub use side::SideState;
pub use stats::BoostTable;
pub use volatile::Volatile;
