use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// One statistical run of the solver under a fixed parameter combination.
/// Field order matches the CSV header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentRun {
    pub ants: u32,
    pub iterations: u32,
    pub evap_coeff: f64,
    pub rand_chance: f64,
    pub pher_weight: f64,
    pub heur_weight: f64,
    pub graph_name: String,
    pub shortest_route: f64,
    pub longest_route: f64,
    pub average_route: f64,
    pub time_for_stat_run: u64,
}

impl ExperimentRun {
    pub fn value(&self, column: Column) -> Value {
        match column {
            Column::Ants => Value::Int(self.ants as i64),
            Column::Iterations => Value::Int(self.iterations as i64),
            Column::EvapCoeff => Value::Float(self.evap_coeff),
            Column::RandChance => Value::Float(self.rand_chance),
            Column::PherWeight => Value::Float(self.pher_weight),
            Column::HeurWeight => Value::Float(self.heur_weight),
            Column::GraphName => Value::Text(self.graph_name.clone()),
            Column::ShortestRoute => Value::Float(self.shortest_route),
            Column::LongestRoute => Value::Float(self.longest_route),
            Column::AverageRoute => Value::Float(self.average_route),
            Column::TimeForStatRun => Value::Int(self.time_for_stat_run as i64),
        }
    }

    /// Numeric cell as f64, `None` for text columns
    pub fn numeric(&self, column: Column) -> Option<f64> {
        match self.value(column) {
            Value::Int(v) => Some(v as f64),
            Value::Float(v) => Some(v),
            Value::Text(_) => None,
        }
    }
}

/// Solver parameters shared by every run of one output directory; the data
/// row of its `run_data.csv`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunParameters {
    pub ants: u32,
    pub iterations: u32,
    pub evap_coeff: f64,
    pub rand_chance: f64,
    pub pher_weight: f64,
    pub heur_weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Ants,
    Iterations,
    EvapCoeff,
    RandChance,
    PherWeight,
    HeurWeight,
    GraphName,
    ShortestRoute,
    LongestRoute,
    AverageRoute,
    TimeForStatRun,
}

impl Column {
    pub const ALL: [Column; 11] = [
        Column::Ants,
        Column::Iterations,
        Column::EvapCoeff,
        Column::RandChance,
        Column::PherWeight,
        Column::HeurWeight,
        Column::GraphName,
        Column::ShortestRoute,
        Column::LongestRoute,
        Column::AverageRoute,
        Column::TimeForStatRun,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Column::Ants => "ants",
            Column::Iterations => "iterations",
            Column::EvapCoeff => "evap_coeff",
            Column::RandChance => "rand_chance",
            Column::PherWeight => "pher_weight",
            Column::HeurWeight => "heur_weight",
            Column::GraphName => "graph_name",
            Column::ShortestRoute => "shortest_route",
            Column::LongestRoute => "longest_route",
            Column::AverageRoute => "average_route",
            Column::TimeForStatRun => "time_for_stat_run",
        }
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self, Column::GraphName)
    }

    pub fn header() -> String {
        Column::ALL.iter().map(Column::name).collect::<Vec<_>>().join(",")
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Column {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::ALL
            .iter()
            .copied()
            .find(|c| c.name() == s)
            .ok_or_else(|| AnalysisError::MissingColumn {
                column: s.to_string(),
                available: Column::header(),
            })
    }
}

/// A single typed cell of the experiment table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Total order used for sorting; a column never mixes variants
    pub fn total_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::Int(a), Value::Float(b)) => (*a as f64).total_cmp(b),
            (Value::Float(a), Value::Int(b)) => a.total_cmp(&(*b as f64)),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::Text(_), _) => Ordering::Greater,
            (_, Value::Text(_)) => Ordering::Less,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Text(v) => f.write_str(v),
        }
    }
}
