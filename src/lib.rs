mod appliance;
mod applianceset;
mod args;
mod constants;
mod demo;

pub use appliance::{
    random_value, Appliance, ApplianceError, ApplianceKind, LogPlugListener, NoopPlugListener,
    PlugListener,
};
pub use applianceset::{ApplianceSet, Iter, SetError};
pub use args::Args;
pub use constants::INITIAL_CAPACITY;
pub use demo::run_demo;
