use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Seed for the appliance measurements. Fresh entropy when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Don't log plug in / unplug notifications.
    #[arg(long)]
    pub quiet_plugs: bool,
}

impl Args {
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
