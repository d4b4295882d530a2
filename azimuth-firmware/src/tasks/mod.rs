//! Embassy task definitions

pub mod compass;
pub mod controller;
pub mod display_tx;

pub use compass::compass_task;
pub use controller::controller_task;
pub use display_tx::display_tx_task;
