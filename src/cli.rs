use std::path::PathBuf;

use clap::Parser;

use crate::config::AppConfig;
use crate::pipeline::ChartKind;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Path to config TOML
    #[arg(long, default_value = "hanoi-plots.toml")]
    pub config: PathBuf,

    /// Results CSV (overrides config)
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Directory for the PNG files (overrides config)
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Chart to render; repeat for several. Renders all when omitted.
    #[arg(long = "chart", value_enum)]
    pub charts: Vec<ChartKind>,
}

impl Args {
    /// Config file values with command-line overrides applied.
    pub fn resolve_config(&self) -> AppConfig {
        let mut cfg = AppConfig::load_or_default(&self.config);
        if let Some(input) = &self.input {
            cfg.paths.input = input.clone();
        }
        if let Some(out_dir) = &self.out_dir {
            cfg.paths.output_dir = out_dir.clone();
        }
        cfg
    }

    pub fn selected_charts(&self) -> Vec<ChartKind> {
        if self.charts.is_empty() {
            ChartKind::ALL.to_vec()
        } else {
            self.charts.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_select_every_chart() {
        let args = Args::parse_from(["hanoi-plots"]);
        assert_eq!(args.config, PathBuf::from("hanoi-plots.toml"));
        assert_eq!(args.selected_charts(), ChartKind::ALL.to_vec());
    }

    #[test]
    fn repeated_chart_flags_keep_order() {
        let args = Args::parse_from([
            "hanoi-plots",
            "--chart",
            "table",
            "--chart",
            "time",
            "--input",
            "runs.csv",
        ]);
        assert_eq!(
            args.selected_charts(),
            vec![ChartKind::Table, ChartKind::TimeGrowth]
        );
        assert_eq!(args.input, Some(PathBuf::from("runs.csv")));
    }

    #[test]
    fn unknown_chart_is_rejected() {
        assert!(Args::try_parse_from(["hanoi-plots", "--chart", "pie"]).is_err());
    }
}
