use anyhow::{anyhow, Result};
use clap::Parser;
use renderer::EngineConfig;

#[derive(Parser, Debug)]
#[command(
    name = "meshgradient",
    author,
    version,
    about = "Animated full-viewport gradient mesh"
)]
pub struct Cli {
    /// Window size in physical pixels (e.g. `1280x720`).
    #[arg(long, value_name = "WIDTHxHEIGHT")]
    pub size: Option<String>,

    /// Plane subdivisions (e.g. `1x1` for a single quad).
    #[arg(long, value_name = "COLSxROWS")]
    pub grid: Option<String>,

    /// Seconds added to the animation clock each frame.
    #[arg(long, value_name = "SECONDS")]
    pub speed: Option<f32>,
}

pub fn parse() -> Cli {
    Cli::parse()
}

impl Cli {
    /// Folds the flags over the default engine configuration.
    pub fn engine_config(&self) -> Result<EngineConfig> {
        let mut config = EngineConfig::default();
        if let Some(size) = &self.size {
            config.surface_size = parse_dimensions(size, "--size")?;
        }
        if let Some(grid) = &self.grid {
            let (columns, rows) = parse_dimensions(grid, "--grid")?;
            config.grid_columns = columns;
            config.grid_rows = rows;
        }
        if let Some(speed) = self.speed {
            if speed <= 0.0 {
                return Err(anyhow!("--speed must be positive, got {speed}"));
            }
            config.animation_speed = speed;
        }
        Ok(config)
    }
}

/// Parses `AxB` pairs such as `1920x1080`; both components must be
/// positive integers.
fn parse_dimensions(value: &str, flag: &str) -> Result<(u32, u32)> {
    let (first, second) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| anyhow!("{flag} expects WIDTHxHEIGHT, got '{value}'"))?;
    let first: u32 = first
        .trim()
        .parse()
        .map_err(|_| anyhow!("{flag}: '{first}' is not a valid number"))?;
    let second: u32 = second
        .trim()
        .parse()
        .map_err(|_| anyhow!("{flag}: '{second}' is not a valid number"))?;
    if first == 0 || second == 0 {
        return Err(anyhow!("{flag} components must be non-zero, got '{value}'"));
    }
    Ok((first, second))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dimension_pairs() {
        assert_eq!(parse_dimensions("1920x1080", "--size").unwrap(), (1920, 1080));
        assert_eq!(parse_dimensions("4X4", "--grid").unwrap(), (4, 4));
        assert_eq!(parse_dimensions(" 800 x 600 ", "--size").unwrap(), (800, 600));
    }

    #[test]
    fn rejects_malformed_dimensions() {
        assert!(parse_dimensions("1920", "--size").is_err());
        assert!(parse_dimensions("ax b", "--size").is_err());
        assert!(parse_dimensions("0x600", "--size").is_err());
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli {
            size: Some("800x600".into()),
            grid: Some("2x3".into()),
            speed: Some(0.05),
        };
        let config = cli.engine_config().unwrap();
        assert_eq!(config.surface_size, (800, 600));
        assert_eq!((config.grid_columns, config.grid_rows), (2, 3));
        assert!((config.animation_speed - 0.05).abs() < 1e-6);
    }

    #[test]
    fn non_positive_speed_is_rejected() {
        let cli = Cli {
            size: None,
            grid: None,
            speed: Some(0.0),
        };
        assert!(cli.engine_config().is_err());
    }
}
