use std::collections::HashMap;

use serde::{Serialize, Deserialize};

pub type DatasetId = String;
pub type BackendId = String;

// An integer i represents the percentage value i/PERCENT_F (from 0.0 to 1.0)
pub const PERCENT: u32 = 10000;
pub const PERCENT_F: f64 = PERCENT as f64;

#[derive(Serialize, Deserialize, Debug)]
pub struct Experiment {
    pub experiment: Vec<ExperimentEntry>,
    pub dataset: Vec<DatasetInfo>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ExperimentEntry {
    pub name: String,
    pub title: String,
    pub dataset: DatasetId,
    pub backends: Vec<BackendId>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct DatasetInfo {
    pub name: DatasetId,
    pub width: Width,
    pub vary: Parameter,
    pub to: u32,
    pub step: u32,
    pub gen_count: usize,
    pub seed: u64,
    #[serde(flatten)]
    pub props: ScanInfo,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct ScanInfo {
    // log2 of the sequence length
    pub length: u32,
    // Index of the planted match relative to the length, in PERCENT units
    pub position: u32,
    // Whether a match is planted at all
    #[serde(default = "default_hit")]
    pub hit: bool,
    pub query_bits: u32,
}

fn default_hit() -> bool {
    true
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    Length,
    Position,
    QueryBits,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Width {
    U16,
    U32,
}

impl Width {
    pub fn bits(&self) -> u32 {
        match self {
            Width::U16 => 16,
            Width::U32 => 32,
        }
    }

    pub fn bytes(&self) -> usize {
        self.bits() as usize / 8
    }

    pub fn from_bits(bits: u8) -> Option<Width> {
        match bits {
            16 => Some(Width::U16),
            32 => Some(Width::U32),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct Results {
    pub experiments: Vec<ExperimentEntry>,
    pub datasets: HashMap<DatasetId, DatasetResults>,
}

pub type BackendResults = HashMap<BackendId, Vec<ResultRun>>;

#[derive(Serialize, Deserialize, Debug)]
pub struct DatasetResults {
    pub info: DatasetInfo,
    pub backends: BackendResults,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ResultRun {
    pub x: u32,
    // Nanoseconds
    pub times: Vec<u64>,
}
