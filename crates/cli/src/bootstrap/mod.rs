pub mod config;
pub mod logging;
pub mod output;

pub use config::load_config;
pub use logging::init_logging;
pub use output::open_sink;
