pub mod logging;
pub mod parameter;
