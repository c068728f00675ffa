//! dotview
//!
//! Loads a point-list file and shows it in an interactive window.
//!
//! Controls:
//!   Arrow keys  rotate the model
//!   W/A/S/D     move the camera
//!   Scroll      zoom
//!   P / L       draw points / line segments
//!   Escape      quit

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;

use dotview_core::PrimitiveMode;
use dotview_io::read_point_set;
use dotview_visualization::{show_point_set, ViewerConfig};

#[derive(Parser, Debug)]
#[command(name = "dotview", version, about = "Interactive 3D point cloud viewer")]
struct Args {
    /// Point-list file to display
    data: Option<PathBuf>,

    /// Start in line segment mode instead of point mode
    #[arg(long)]
    lines: bool,
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut config = ViewerConfig::default();
    if let Some(path) = args.data {
        config.data_path = path;
    }
    if args.lines {
        config.initial_mode = PrimitiveMode::Lines;
    }

    let points = read_point_set(&config.data_path)?;
    log::info!("Loaded {} points from {}", points.len(), config.data_path.display());

    show_point_set(points, config).context("viewer terminated with an error")?;
    Ok(())
}

/// Process status for the outcome of a run: 0 on a normal close, 1 otherwise
fn exit_status(result: &anyhow::Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            log::error!("{:#}", e);
            1
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let result = run(Args::parse());
    ExitCode::from(exit_status(&result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_data_file_fails_before_opening_a_window() {
        let dir = tempfile::tempdir().unwrap();
        let args = Args {
            data: Some(dir.path().join("five_y")),
            lines: false,
        };

        let result = run(args);
        assert!(matches!(
            result.as_ref().unwrap_err().downcast_ref::<dotview_core::Error>(),
            Some(dotview_core::Error::FileOpen { .. })
        ));
        assert_eq!(exit_status(&result), 1);
    }

    #[test]
    fn test_malformed_data_file_exits_with_failure() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"3\n0 0 0\n1 0\n").unwrap();
        let args = Args {
            data: Some(file.path().to_path_buf()),
            lines: false,
        };

        let result = run(args);
        assert!(matches!(
            result.as_ref().unwrap_err().downcast_ref::<dotview_core::Error>(),
            Some(dotview_core::Error::MalformedData(_))
        ));
        assert_eq!(exit_status(&result), 1);
    }

    #[test]
    fn test_normal_close_exits_with_success() {
        assert_eq!(exit_status(&Ok(())), 0);
    }

    #[test]
    fn test_args_parse_optional_path_and_mode() {
        let args = Args::parse_from(["dotview", "--lines", "data/other"]);
        assert_eq!(args.data, Some(PathBuf::from("data/other")));
        assert!(args.lines);

        let args = Args::parse_from(["dotview"]);
        assert!(args.data.is_none());
        assert!(!args.lines);
    }
}
