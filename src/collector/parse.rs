use csv::ReaderBuilder;
use regex::Regex;

use crate::domain::{ExperimentRun, RunParameters};
use crate::error::{AnalysisError, Result};

// File <graph>: Finished <n> runs. Longest found route is <l>, shortest found route is <s>. The average length is <a>
const STATISTICS_PATTERN: &str =
    r"^File (.+?): .*is ([0-9.eE+-]+), .*is ([0-9.eE+-]+)\. .*is ([0-9.eE+-]+)\s*$";

#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsLine {
    pub graph_name: String,
    pub longest_route: f64,
    pub shortest_route: f64,
    pub average_route: f64,
}

impl StatisticsLine {
    pub fn into_run(self, params: &RunParameters, time_for_stat_run: u64) -> ExperimentRun {
        ExperimentRun {
            ants: params.ants,
            iterations: params.iterations,
            evap_coeff: params.evap_coeff,
            rand_chance: params.rand_chance,
            pher_weight: params.pher_weight,
            heur_weight: params.heur_weight,
            graph_name: self.graph_name,
            shortest_route: self.shortest_route,
            longest_route: self.longest_route,
            average_route: self.average_route,
            time_for_stat_run,
        }
    }
}

/// Parses the second line of `run_data.csv`; the first is a header
pub fn parse_run_data(contents: &str) -> Result<RunParameters> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(contents.as_bytes());

    let record = reader
        .records()
        .next()
        .ok_or_else(|| AnalysisError::MalformedRunData("missing data row".to_string()))??;

    record
        .deserialize::<RunParameters>(None)
        .map_err(|e| AnalysisError::MalformedRunData(e.to_string()))
}

pub struct StatisticsParser {
    pattern: Regex,
}

impl StatisticsParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(STATISTICS_PATTERN)?,
        })
    }

    pub fn parse_line(&self, line: &str) -> Result<StatisticsLine> {
        let malformed = || AnalysisError::MalformedStatistics(line.to_string());
        let captures = self.pattern.captures(line).ok_or_else(malformed)?;
        let number = |i: usize| captures[i].parse::<f64>().map_err(|_| malformed());

        Ok(StatisticsLine {
            graph_name: captures[1].to_string(),
            longest_route: number(2)?,
            shortest_route: number(3)?,
            average_route: number(4)?,
        })
    }

    /// One entry per non-blank line
    pub fn parse(&self, contents: &str) -> Result<Vec<StatisticsLine>> {
        contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| self.parse_line(line))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &str = "File A-n32-k5.txt: Finished 100 runs. Longest found route is 734.0665272183886, shortest found route is 578.8555406057682. The average length is 667.1761024279239";

    #[test]
    fn parses_solver_summary() {
        let parser = StatisticsParser::new().unwrap();
        let stats = parser.parse_line(LINE).unwrap();
        assert_eq!(stats.graph_name, "A-n32-k5.txt");
        assert_eq!(stats.longest_route, 734.0665272183886);
        assert_eq!(stats.shortest_route, 578.8555406057682);
        assert_eq!(stats.average_route, 667.1761024279239);
    }

    #[test]
    fn rejects_unrelated_lines() {
        let parser = StatisticsParser::new().unwrap();
        let err = parser.parse_line("Found solution with length 12.5").unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedStatistics(_)));
    }

    #[test]
    fn skips_blank_lines() {
        let parser = StatisticsParser::new().unwrap();
        let stats = parser.parse(&format!("{}\n\n{}\n", LINE, LINE.replace("A-n32", "B-n31"))).unwrap();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[1].graph_name, "B-n31-k5.txt");
    }

    #[test]
    fn reads_run_parameters_row() {
        let params = parse_run_data("ants,iterations,evap,rand,pher,heur\n10,1000,0.5,0.3,1,1\n").unwrap();
        assert_eq!(
            params,
            RunParameters {
                ants: 10,
                iterations: 1000,
                evap_coeff: 0.5,
                rand_chance: 0.3,
                pher_weight: 1.0,
                heur_weight: 1.0,
            }
        );
    }

    #[test]
    fn run_data_without_row_is_malformed() {
        let err = parse_run_data("ants,iterations,evap,rand,pher,heur\n").unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedRunData(_)));
    }

    #[test]
    fn combines_into_experiment_run() {
        let parser = StatisticsParser::new().unwrap();
        let params = parse_run_data("ants,iterations,evap,rand,pher,heur\n5,10,0.1,0.0,2,3\n").unwrap();
        let run = parser.parse_line(LINE).unwrap().into_run(&params, 42);
        assert_eq!(run.ants, 5);
        assert_eq!(run.heur_weight, 3.0);
        assert_eq!(run.graph_name, "A-n32-k5.txt");
        assert_eq!(run.time_for_stat_run, 42);
    }
}
