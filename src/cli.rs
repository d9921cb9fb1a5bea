use clap::Parser;

/// Command-line arguments. Everything else (poll interval, base URL,
/// leaderboard size) comes from the environment, see `config`.
#[derive(Parser, Debug)]
#[command(name = "floorwatch", about = "Watch marketplace floor prices for a set of NFT collections")]
pub struct Cli {
    /// Collection identifiers to watch, as the marketplace knows them
    #[arg(required = true, num_args = 1.., value_name = "COLLECTION")]
    pub collections: Vec<String>,
}
