pub mod request_state;
pub mod stock;
pub mod transition;

pub use request_state::*;
pub use stock::*;
pub use transition::*;
