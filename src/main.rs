//! OHDR · draw a digit, let a pretrained network guess it.
//!
//! Run with:
//!   cargo run --release -- mnist
//!   cargo run --release -- nist
//!
//! Expects `trained_models/<dataset>.json` and `icons/{dark,light}.png`
//! relative to the working directory.

use anyhow::Context;
use clap::Parser;

use ohdr::assets::IconSet;
use ohdr::{AppConfig, DatasetProfile, Network, NetworkClassifier};

#[derive(Parser, Debug)]
#[command(name = "ohdr", about = "Optical handwritten digit recognition")]
struct Cli {
    /// Dataset the classifier was trained on.
    #[arg(value_enum)]
    dataset: DatasetProfile,
}

fn main() -> anyhow::Result<()> {
    // Invalid arguments exit here, before anything is loaded.
    let cli = Cli::parse();
    ohdr::logging::init();

    let config = AppConfig::for_profile(cli.dataset);
    tracing::info!(
        profile = %config.profile,
        resolution = config.profile.resolution(),
        model = %config.model_path.display(),
        "starting"
    );

    let network = Network::load_json(&config.model_path)
        .with_context(|| format!("loading the {} classifier", config.profile))?;
    if let Some(description) = network.metadata.as_ref().and_then(|m| m.description.as_deref()) {
        tracing::info!(description, "model loaded");
    }
    let classifier = NetworkClassifier::new(network, config.profile.resolution())
        .with_context(|| format!("model does not fit the {} canvas", config.profile))?;
    let icons = IconSet::load(&config).context("loading theme icons")?;

    ohdr::gui::run(config, icons, classifier)?;
    Ok(())
}
