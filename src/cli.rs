use clap::{Parser, Subcommand};

use crate::domain::CellFeatures;

#[derive(Parser)]
#[command(name = "cytoclass")]
#[command(version)]
#[command(about = "Breast cancer cytology classifier served through a web form", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config directory (default.toml, then $CYTOCLASS_ENV)
    #[arg(short, long, default_value = "config")]
    pub config: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the form (default)
    Serve {
        /// Override server.host
        #[arg(long)]
        host: Option<String>,
        /// Override server.port
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Classify one set of measurements and print the label
    Predict(PredictArgs),
}

/// The nine measurements, each an integer in [1, 10].
#[derive(clap::Args, Debug, Clone)]
pub struct PredictArgs {
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub clump_thickness: u8,
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub cell_size: u8,
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub cell_shape: u8,
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub marginal_adhesion: u8,
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub epithelial_size: u8,
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub bare_nuclei: u8,
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub bland_chromatin: u8,
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub normal_nucleoli: u8,
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub mitoses: u8,
}

impl PredictArgs {
    pub fn to_features(&self) -> CellFeatures {
        CellFeatures::from_array([
            self.clump_thickness as f64,
            self.cell_size as f64,
            self.cell_shape as f64,
            self.marginal_adhesion as f64,
            self.epithelial_size as f64,
            self.bare_nuclei as f64,
            self.bland_chromatin as f64,
            self.normal_nucleoli as f64,
            self.mitoses as f64,
        ])
    }
}
