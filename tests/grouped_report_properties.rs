//! Partition, ordering and projection properties of the grouped report

use std::collections::HashSet;

use aco_stats::config::constant::{DROP_COLUMNS, GROUP_KEY, SORT_KEY};
use aco_stats::fixtures::data_generator::generate_experiment_table;
use aco_stats::{report, AnalysisError, Column, ExperimentRun, ExperimentTable};
use proptest::prelude::*;

fn arb_run() -> impl Strategy<Value = ExperimentRun> {
    (
        prop::sample::select(vec![5u32, 10, 20]),
        prop::sample::select(vec!["A-n32-k5.txt", "B-n31-k5.txt", "P-n16-k8.txt"]),
        // few distinct averages so ties are common
        0u32..6,
        0.0f64..1000.0,
    )
        .prop_map(|(ants, graph, average, shortest)| ExperimentRun {
            ants,
            iterations: 10,
            evap_coeff: 0.5,
            rand_chance: 0.3,
            pher_weight: 1.0,
            heur_weight: 2.0,
            graph_name: graph.to_string(),
            shortest_route: shortest,
            longest_route: shortest + 100.0,
            average_route: average as f64 * 10.0,
            time_for_stat_run: 7,
        })
}

fn arb_table() -> impl Strategy<Value = ExperimentTable> {
    prop::collection::vec(arb_run(), 1..60).prop_map(ExperimentTable::new)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn groups_partition_the_table(table in arb_table()) {
        let mut seen = Vec::new();
        for group in report(&table, GROUP_KEY, &DROP_COLUMNS, SORT_KEY).unwrap() {
            prop_assert!(!group.is_empty());
            for (index, run) in group.source_indices().zip(group.records()) {
                prop_assert_eq!(&table.runs()[index], run);
                prop_assert_eq!(&run.graph_name, &group.name());
                seen.push(index);
            }
        }
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..table.len()).collect::<Vec<_>>());
    }

    #[test]
    fn groups_are_stably_sorted(table in arb_table()) {
        for group in report(&table, GROUP_KEY, &DROP_COLUMNS, SORT_KEY).unwrap() {
            let rows: Vec<(usize, f64)> = group
                .source_indices()
                .zip(group.records().map(|r| r.average_route))
                .collect();
            for pair in rows.windows(2) {
                let (i, a) = pair[0];
                let (j, b) = pair[1];
                prop_assert!(a <= b);
                if a == b {
                    prop_assert!(i < j);
                }
            }
        }
    }

    #[test]
    fn dropped_columns_never_appear(table in arb_table()) {
        let dropped: HashSet<Column> = DROP_COLUMNS.iter().map(|c| c.parse().unwrap()).collect();
        for group in report(&table, GROUP_KEY, &DROP_COLUMNS, SORT_KEY).unwrap() {
            prop_assert!(group.columns().iter().all(|c| !dropped.contains(c)));
            for row in group.rows() {
                prop_assert_eq!(row.values.len(), group.columns().len());
            }
        }
    }

    #[test]
    fn repeated_reports_are_identical(table in arb_table()) {
        let first: Vec<_> = report(&table, GROUP_KEY, &DROP_COLUMNS, SORT_KEY).unwrap().map(|g| g.to_view()).collect();
        let second: Vec<_> = report(&table, GROUP_KEY, &DROP_COLUMNS, SORT_KEY).unwrap().map(|g| g.to_view()).collect();
        prop_assert_eq!(first, second);
    }
}

#[test]
fn sweep_table_groups_by_graph_in_first_seen_order() {
    let table = generate_experiment_table(64, &["P-n16-k8.txt", "A-n32-k5.txt"], &[5, 10, 20], &[10, 30]);
    let groups: Vec<_> = report(&table, GROUP_KEY, &DROP_COLUMNS, SORT_KEY).unwrap().collect();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].name(), "P-n16-k8.txt");
    assert_eq!(groups[1].name(), "A-n32-k5.txt");
    assert_eq!(groups[0].len() + groups[1].len(), table.len());
}

#[test]
fn loaded_csv_reports_like_in_memory_table() {
    let csv = "\
ants,iterations,evap_coeff,rand_chance,pher_weight,heur_weight,graph_name,shortest_route,longest_route,average_route,time_for_stat_run
10,1000,0.5,0.3,1,1,A,1.0,20.0,10.0,213
10,1000,0.5,0.3,2,1,A,1.0,20.0,5.0,210
10,1000,0.5,0.3,1,2,B,1.0,20.0,7.0,190
";
    let table = ExperimentTable::from_reader(csv.as_bytes()).unwrap();
    let groups: Vec<_> = report(&table, "graph_name", &["graph_name"], "average_route").unwrap().collect();

    let a: Vec<f64> = groups[0].records().map(|r| r.average_route).collect();
    let b: Vec<f64> = groups[1].records().map(|r| r.average_route).collect();
    assert_eq!((groups[0].name(), a), ("A".to_string(), vec![5.0, 10.0]));
    assert_eq!((groups[1].name(), b), ("B".to_string(), vec![7.0]));
}

#[test]
fn unknown_sort_key_and_empty_table_fail() {
    let table = generate_experiment_table(1, &["A"], &[5], &[10]);
    assert!(matches!(
        report(&table, GROUP_KEY, &DROP_COLUMNS, "nonexistent_column").err(),
        Some(AnalysisError::MissingColumn { .. })
    ));
    assert!(matches!(
        report(&ExperimentTable::default(), GROUP_KEY, &DROP_COLUMNS, SORT_KEY).err(),
        Some(AnalysisError::EmptyTable)
    ));
}
