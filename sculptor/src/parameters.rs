use hydrology::ErosionParams;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    pub max_height: f64,
    pub octaves: usize,
    pub persistence: f64,
    /// Number of erosion runs, each logged separately.
    pub passes: usize,
    pub erosion: ErosionParams,
}

impl Default for Parameters {
    fn default() -> Parameters {
        Parameters {
            max_height: 1.0,
            octaves: 8,
            persistence: 0.5,
            passes: 4,
            erosion: ErosionParams::default(),
        }
    }
}

#[derive(Debug)]
pub enum LoadError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(error) => write!(f, "could not read parameters: {}", error),
            LoadError::Json(error) => write!(f, "could not parse parameters: {}", error),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LoadError::Io(error) => Some(error),
            LoadError::Json(error) => Some(error),
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(error: io::Error) -> LoadError {
        LoadError::Io(error)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(error: serde_json::Error) -> LoadError {
        LoadError::Json(error)
    }
}

impl Parameters {
    pub fn load(path: &str) -> Result<Parameters, LoadError> {
        let file = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(file)?)
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn partial_json() {
        let actual: Parameters =
            serde_json::from_str(r#"{ "passes": 2, "erosion": { "droplets": 64 } }"#).unwrap();
        assert_eq!(actual.passes, 2);
        assert_eq!(actual.erosion.droplets, 64);
        assert_eq!(actual.erosion.friction, ErosionParams::default().friction);
        assert_eq!(actual.octaves, Parameters::default().octaves);
    }

    #[test]
    fn missing_file() {
        match Parameters::load("/nonexistent/sculptor/parameters.json") {
            Err(LoadError::Io(_)) => (),
            other => panic!("expected io error, got {:?}", other),
        }
    }
}
