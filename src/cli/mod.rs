// ============================================================
// Layer 1 - CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// clap and hands every command off to Layer 2 (application).
//
//   1. `train`   - fit the forest on a CSV and save the model
//   2. `serve`   - load the model once, answer HTTP requests
//   3. `predict` - load the model, answer one sample, exit
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{Commands, PredictArgs, ServeArgs, TrainArgs};
use std::sync::Arc;

use crate::application::predict_use_case::PredictUseCase;
use crate::application::train_use_case::TrainUseCase;
use crate::domain::traits::CropRecommender;
use crate::http::{ApiState, ServerConfig};

#[derive(Parser, Debug)]
#[command(
    name = "crop-advisor",
    version,
    about = "Train a random-forest crop recommender on soil data, then serve predictions."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)   => run_train(args),
            Commands::Serve(args)   => run_serve(args),
            Commands::Predict(args) => run_predict(args),
        }
    }
}

fn run_train(args: TrainArgs) -> Result<()> {
    tracing::info!("Starting training on: {}", args.dataset.display());

    let report = TrainUseCase::new(args.into()).execute()?;

    println!(
        "Trained {} trees on {} rows ({} crops). Model saved to {}",
        report.trees,
        report.train_rows,
        report.labels.len(),
        report.model_path.display()
    );
    if let Some(acc) = report.holdout_accuracy {
        println!("Holdout accuracy: {:.2}% ({} rows)", acc * 100.0, report.test_rows);
    }
    println!(
        "Example prediction for {}: {}",
        serde_json::to_string(&report.example_sample)?,
        report.example_crop
    );
    Ok(())
}

/// Loads the model before starting the runtime, so a bad model
/// file fails the process without ever binding the port.
fn run_serve(args: ServeArgs) -> Result<()> {
    let cfg: ServerConfig = args.into();
    let use_case = PredictUseCase::load(&cfg.model_path)?;
    tracing::info!(
        "Model ready: {} trees, {} crops",
        use_case.ensemble_size(),
        use_case.labels().len()
    );

    let state   = ApiState::new(Arc::new(use_case));
    let runtime = tokio::runtime::Runtime::new().context("Cannot start async runtime")?;
    runtime.block_on(crate::http::serve(&cfg, state))
}

fn run_predict(args: PredictArgs) -> Result<()> {
    let use_case = PredictUseCase::load(&args.model)?;
    let crop     = use_case.recommend(&args.sample())?;
    println!("Recommended crop: {crop}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::train_use_case::TrainConfig;
    use std::path::PathBuf;

    #[test]
    fn test_train_defaults() {
        let cli = Cli::try_parse_from(["crop-advisor", "train"]).unwrap();
        let Commands::Train(args) = cli.command else { panic!("expected train") };
        let cfg: TrainConfig = args.into();
        assert_eq!(cfg, TrainConfig::default());
    }

    #[test]
    fn test_serve_flags() {
        let cli = Cli::try_parse_from([
            "crop-advisor", "serve",
            "--port", "8080",
            "--cors-origin", "http://a.test",
            "--cors-origin", "http://b.test",
        ]).unwrap();
        let Commands::Serve(args) = cli.command else { panic!("expected serve") };
        let cfg: ServerConfig = args.into();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.model_path, PathBuf::from("crop_model.bin"));
        assert_eq!(cfg.cors_origins, ["http://a.test", "http://b.test"]);
    }

    #[test]
    fn test_predict_requires_every_feature() {
        assert!(Cli::try_parse_from(["crop-advisor", "predict", "--nitrogen", "30"]).is_err());

        let cli = Cli::try_parse_from([
            "crop-advisor", "predict",
            "--nitrogen", "30", "--phosphorus", "20", "--potassium", "10",
            "--temperature", "-2.5", "--humidity", "65", "--ph", "6.5", "--rainfall", "200",
        ]).unwrap();
        let Commands::Predict(args) = cli.command else { panic!("expected predict") };
        assert_eq!(args.sample().to_vector(), [30.0, 20.0, 10.0, -2.5, 65.0, 6.5, 200.0]);
    }
}
