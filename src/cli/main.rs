use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use reqwest::{header, Client, RequestBuilder, Response};
use serde_json::json;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "forest-cover-cli")]
#[command(about = "Forest Cover Type Predictor CLI", long_about = None)]
struct Cli {
    #[arg(short, long, env = "FCP_ENDPOINT", default_value = "http://localhost:8501")]
    endpoint: String,

    /// Session id returned by an earlier `predict`
    #[arg(long, env = "FCP_SESSION")]
    session: Option<String>,

    /// Session cookie name configured on the server
    #[arg(long, default_value = "fcp_session")]
    cookie_name: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict the cover type for a land patch
    Predict {
        #[arg(long, default_value_t = 2500)]
        elevation: i32,

        #[arg(long, default_value_t = 90)]
        aspect: i32,

        #[arg(long, default_value_t = 15)]
        slope: i32,

        #[arg(long = "hd-hydrology", default_value_t = 120)]
        hd_hydrology: i32,

        #[arg(long = "vd-hydrology", default_value_t = 50, allow_hyphen_values = true)]
        vd_hydrology: i32,

        #[arg(long = "hd-roadways", default_value_t = 300)]
        hd_roadways: i32,

        #[arg(long = "hillshade-9am", default_value_t = 200)]
        hillshade_9am: i32,

        #[arg(long = "hillshade-noon", default_value_t = 220)]
        hillshade_noon: i32,

        #[arg(long = "hillshade-3pm", default_value_t = 180)]
        hillshade_3pm: i32,

        #[arg(long = "hd-fire", default_value_t = 250)]
        hd_fire: i32,

        /// Wilderness area (0-3)
        #[arg(short, long, default_value_t = 0)]
        wilderness: u8,

        /// Soil type (0-39)
        #[arg(short = 'S', long, default_value_t = 0)]
        soil: u8,
    },

    /// Show prediction history, most recent first
    History,

    /// Download prediction history as CSV
    Export {
        #[arg(short, long, default_value = "forest_cover_history.csv")]
        output: PathBuf,
    },

    /// Clear prediction history
    Clear,

    /// List the cover type label table
    CoverTypes,

    /// Check server health
    Health,
}

impl Cli {
    fn with_session(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.session {
            Some(id) => request.header(header::COOKIE, format!("{}={}", self.cookie_name, id)),
            None => request,
        }
    }
}

async fn print_json(response: Response) -> anyhow::Result<()> {
    let status = response.status();
    let body: serde_json::Value = response.json().await.context("invalid JSON response")?;
    println!("{}", serde_json::to_string_pretty(&body)?);
    if !status.is_success() {
        bail!("request failed with status {}", status);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = Client::new();

    match &cli.command {
        Commands::Predict {
            elevation,
            aspect,
            slope,
            hd_hydrology,
            vd_hydrology,
            hd_roadways,
            hillshade_9am,
            hillshade_noon,
            hillshade_3pm,
            hd_fire,
            wilderness,
            soil,
        } => {
            let request = client
                .post(format!("{}/v1/predictions", cli.endpoint))
                .json(&json!({
                    "elevation": elevation,
                    "aspect": aspect,
                    "slope": slope,
                    "horizontal_distance_to_hydrology": hd_hydrology,
                    "vertical_distance_to_hydrology": vd_hydrology,
                    "horizontal_distance_to_roadways": hd_roadways,
                    "hillshade_9am": hillshade_9am,
                    "hillshade_noon": hillshade_noon,
                    "hillshade_3pm": hillshade_3pm,
                    "horizontal_distance_to_fire_points": hd_fire,
                    "wilderness_area": wilderness,
                    "soil_type": soil,
                }));

            let response = cli.with_session(request).send().await?;
            print_json(response).await?;
        }

        Commands::History => {
            let request = client.get(format!("{}/v1/history", cli.endpoint));
            let response = cli.with_session(request).send().await?;
            print_json(response).await?;
        }

        Commands::Export { output } => {
            let request = client.get(format!("{}/v1/history/export", cli.endpoint));
            let response = cli.with_session(request).send().await?;

            let status = response.status();
            if !status.is_success() {
                bail!("export failed with status {}", status);
            }

            let csv = response.bytes().await?;
            tokio::fs::write(output, &csv)
                .await
                .with_context(|| format!("failed to write {}", output.display()))?;
            println!("History written to {}", output.display());
        }

        Commands::Clear => {
            let request = client.delete(format!("{}/v1/history", cli.endpoint));
            let response = cli.with_session(request).send().await?;
            print_json(response).await?;
        }

        Commands::CoverTypes => {
            let response = client
                .get(format!("{}/v1/cover-types", cli.endpoint))
                .send()
                .await?;
            print_json(response).await?;
        }

        Commands::Health => {
            let response = client
                .get(format!("{}/health", cli.endpoint))
                .send()
                .await?;
            print_json(response).await?;
        }
    }

    Ok(())
}
