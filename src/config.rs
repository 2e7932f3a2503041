use std::fmt::{self, Display};

use log::LevelFilter;

/// Settings of the interactive editor.
///
/// Read from positional arguments: `[width] [height] [thickness] [verbosity]`.
/// Missing arguments keep their defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct EditorConfig {
    pub width: u32,
    pub height: u32,
    pub stroke_thickness: u32,
    pub verbosity: LevelFilter,
    /// Toggled with V.
    pub show_vertices: bool,
    /// New figures get a random colour instead of the default one. Toggled
    /// with K.
    pub random_colors: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
            stroke_thickness: 3,
            verbosity: LevelFilter::Info,
            show_vertices: true,
            random_colors: true,
        }
    }
}

/// Largest surface the editor will allocate along either axis.
pub const MAX_DIMENSION: u32 = u16::MAX as u32;
pub const MAX_THICKNESS: u32 = 64;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    NotANumber { name: &'static str, value: String },
    OutOfRange { name: &'static str, value: u32, min: u32, max: u32 },
    UnknownVerbosity(String),
    TooManyArguments(usize),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotANumber { name, value } => write!(f, "{name}: \"{value}\" is not a number"),
            ConfigError::OutOfRange { name, value, min, max } =>
                write!(f, "{name}: {value} is outside {min}..={max}"),
            ConfigError::UnknownVerbosity(v) =>
                write!(f, "unknown verbosity \"{v}\" (expected off, error, warn, info, debug or trace)"),
            ConfigError::TooManyArguments(n) => write!(f, "expected at most 4 arguments, got {n}"),
        }
    }
}

impl std::error::Error for ConfigError {}

fn parse_bounded(name: &'static str, value: &str, min: u32, max: u32) -> Result<u32, ConfigError> {
    let parsed = value.parse::<u32>().map_err(|_| ConfigError::NotANumber { name, value: value.to_string() })?;
    if parsed < min || parsed > max {
        return Err(ConfigError::OutOfRange { name, value: parsed, min, max });
    }
    Ok(parsed)
}

impl EditorConfig {
    /// Builds a config from command-line arguments, program name excluded.
    pub fn from_args<I, S>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<S> = args.into_iter().collect();
        if args.len() > 4 {
            return Err(ConfigError::TooManyArguments(args.len()));
        }

        let mut config = Self::default();
        let arg = |i: usize| args.get(i).map(|a| a.as_ref());

        if let Some(w) = arg(0) {
            config.width = parse_bounded("width", w, 1, MAX_DIMENSION)?;
        }
        if let Some(h) = arg(1) {
            config.height = parse_bounded("height", h, 1, MAX_DIMENSION)?;
        }
        if let Some(t) = arg(2) {
            config.stroke_thickness = parse_bounded("thickness", t, 1, MAX_THICKNESS)?;
        }
        if let Some(v) = arg(3) {
            config.verbosity = v.parse::<LevelFilter>()
                                .map_err(|_| ConfigError::UnknownVerbosity(v.to_string()))?;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_arguments() {
        let config = EditorConfig::from_args(Vec::<String>::new()).unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn positional_arguments() {
        let config = EditorConfig::from_args(["800", "600", "5", "debug"]).unwrap();
        assert_eq!(config.width, 800);
        assert_eq!(config.height, 600);
        assert_eq!(config.stroke_thickness, 5);
        assert_eq!(config.verbosity, LevelFilter::Debug);
        assert!(config.show_vertices);
    }

    #[test]
    fn partial_arguments_keep_defaults() {
        let config = EditorConfig::from_args(["640"]).unwrap();
        assert_eq!(config.width, 640);
        assert_eq!(config.height, EditorConfig::default().height);
    }

    #[test]
    fn bad_arguments() {
        assert_eq!(
            EditorConfig::from_args(["wide"]),
            Err(ConfigError::NotANumber { name: "width", value: "wide".to_string() })
        );
        assert_eq!(
            EditorConfig::from_args(["800", "600", "0"]),
            Err(ConfigError::OutOfRange { name: "thickness", value: 0, min: 1, max: MAX_THICKNESS })
        );
        assert_eq!(
            EditorConfig::from_args(["800", "600", "2", "loud"]),
            Err(ConfigError::UnknownVerbosity("loud".to_string()))
        );
        assert_eq!(
            EditorConfig::from_args(["1", "2", "3", "info", "extra"]),
            Err(ConfigError::TooManyArguments(5))
        );
    }

    #[test]
    fn errors_read_well() {
        let err = EditorConfig::from_args(["0"]).unwrap_err();
        assert_eq!(err.to_string(), "width: 0 is outside 1..=65535");
    }
}
