use std::path::PathBuf;

/// Environment variable naming the data file when no argument is given.
pub const DATA_ENV_VAR: &str = "SHOPPING_DATA";

/// File loaded when neither the command line nor the environment names one.
pub const DEFAULT_DATA_FILE: &str = "processed_customer_shopping_data.csv";

/// Startup settings, resolved once in `main`.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_path: PathBuf,
    pub window_size: [f32; 2],
}

impl Config {
    /// `shopping-recommender [DATA_FILE]`, falling back to `$SHOPPING_DATA`.
    pub fn from_env() -> Self {
        Self::resolve(
            std::env::args().nth(1),
            std::env::var(DATA_ENV_VAR).ok(),
        )
    }

    fn resolve(arg: Option<String>, env: Option<String>) -> Self {
        let data_path = arg
            .filter(|a| !a.trim().is_empty())
            .or(env.filter(|e| !e.trim().is_empty()))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

        Config {
            data_path,
            window_size: [1100.0, 760.0],
        }
    }
}
