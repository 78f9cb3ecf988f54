//! Runtime settings read from the environment (and an optional `.env` file)

use crate::aggregation::{Limits, DEFAULT_LABEL_WIDTH, DEFAULT_TOP_N};
use crate::error::{DashboardError, Result};
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

pub const DATA_PATH_VAR: &str = "DASHBOARD_DATA_PATH";
pub const TOP_N_VAR: &str = "DASHBOARD_TOP_N";
pub const LABEL_WIDTH_VAR: &str = "DASHBOARD_LABEL_WIDTH";

pub const DEFAULT_DATA_PATH: &str = "data/mobiles.csv";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub data_path: PathBuf,
    pub limits: Limits,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            limits: Limits::default(),
        }
    }
}

impl Settings {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        let vars: HashMap<String, String> = env::vars().collect();
        Self::from_vars(&vars)
    }

    /// Build settings from an explicit variable map.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self> {
        let data_path = vars
            .get(DATA_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        let top_n = parse_var(vars, TOP_N_VAR, DEFAULT_TOP_N)?;
        if top_n == 0 {
            return Err(DashboardError::Config(format!("{} must be greater than 0", TOP_N_VAR)));
        }

        let label_width = parse_var(vars, LABEL_WIDTH_VAR, DEFAULT_LABEL_WIDTH)?;
        if label_width < 4 {
            return Err(DashboardError::Config(format!("{} must be at least 4", LABEL_WIDTH_VAR)));
        }

        Ok(Self {
            data_path,
            limits: Limits { top_n, label_width },
        })
    }
}

fn parse_var(vars: &HashMap<String, String>, name: &str, default: usize) -> Result<usize> {
    match vars.get(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<usize>().map_err(|e| {
            DashboardError::Config(format!("Invalid {} value '{}': {}", name, raw, e))
        }),
    }
}
