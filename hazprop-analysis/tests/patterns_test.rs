use hazprop_analysis::{get_patterns, get_realization_groups, Analysis};
use hazprop_core::errors::{DataError, HazError};
use hazprop_core::model::{
    LogicTreeHalf, Pattern, RealizationPath, SourceId, SourceResult, Uncertainty,
};
use ndarray::Array3;
use rustc_hash::FxHashMap;

fn source(id: &str, paths: &[&str]) -> SourceResult {
    let n = paths.len();
    let weights = vec![1.0 / n as f64; n];
    SourceResult {
        id: SourceId::from(id),
        investigation_time: 1.0,
        weights,
        paths: paths.iter().map(|p| RealizationPath::parse(p).unwrap()).collect(),
        poes: Array3::from_elem((1, n, 1), 0.1),
    }
}

fn uncertainty(index: usize, half: LogicTreeHalf, sources: &[(&str, usize)]) -> Uncertainty {
    Uncertainty {
        index,
        utype: "maxMagGRAbsolute".to_string(),
        half,
        branch_ids: Vec::new(),
        ipath: sources
            .iter()
            .map(|(s, pos)| (SourceId::from(*s), *pos))
            .collect(),
    }
}

/// 2 SSC branches × 4 GMC branches, full Cartesian product.
fn cartesian_source(id: &str) -> SourceResult {
    let mut paths = Vec::new();
    for ssc in ['A', 'B'] {
        for gmc in ['w', 'x', 'y', 'z'] {
            paths.push(format!("{}~{}", ssc, gmc));
        }
    }
    let refs: Vec<&str> = paths.iter().map(String::as_str).collect();
    source(id, &refs)
}

// ── get_patterns ─────────────────────────────────────────────────────────

#[test]
fn one_pattern_per_distinct_branch_character() {
    let analysis = Analysis::new(
        vec![cartesian_source("s")],
        vec![uncertainty(0, LogicTreeHalf::Ssc, &[("s", 0)])],
        vec![0.1],
    )
    .unwrap();

    let patterns = get_patterns(&analysis);
    assert_eq!(patterns.len(), 1);
    let for_s = &patterns[0][&SourceId::from("s")];
    assert_eq!(
        for_s,
        &vec![
            Pattern::new(LogicTreeHalf::Ssc, 0, 'A'),
            Pattern::new(LogicTreeHalf::Ssc, 0, 'B'),
        ]
    );
}

#[test]
fn gmc_uncertainty_enumerates_the_gmc_branches() {
    let analysis = Analysis::new(
        vec![cartesian_source("s")],
        vec![uncertainty(0, LogicTreeHalf::Gmc, &[("s", 0)])],
        vec![0.1],
    )
    .unwrap();

    let patterns = get_patterns(&analysis);
    let for_s = &patterns[0][&SourceId::from("s")];
    let literals: Vec<char> = for_s.iter().map(|p| p.literal).collect();
    assert_eq!(literals, vec!['w', 'x', 'y', 'z']);
}

// ── get_realization_groups ───────────────────────────────────────────────

#[test]
fn ssc_groups_are_two_disjoint_complete_halves() {
    let analysis = Analysis::new(
        vec![cartesian_source("s")],
        vec![uncertainty(0, LogicTreeHalf::Ssc, &[("s", 0)])],
        vec![0.1],
    )
    .unwrap();

    let patterns = get_patterns(&analysis);
    let groups = get_realization_groups(&analysis, &patterns).unwrap();
    let set = groups.get(0, &SourceId::from("s")).unwrap();

    assert_eq!(set.n_groups(), 2);
    assert_eq!(set.indices[0], vec![0, 1, 2, 3]);
    assert_eq!(set.indices[1], vec![4, 5, 6, 7]);
    assert!((set.weights[0] - 0.5).abs() < 1e-12);
    assert!((set.weights[1] - 0.5).abs() < 1e-12);
}

#[test]
fn groups_partition_the_realization_range() {
    let analysis = Analysis::new(
        vec![cartesian_source("s")],
        vec![uncertainty(0, LogicTreeHalf::Gmc, &[("s", 0)])],
        vec![0.1],
    )
    .unwrap();

    let patterns = get_patterns(&analysis);
    let groups = get_realization_groups(&analysis, &patterns).unwrap();
    let set = groups.get(0, &SourceId::from("s")).unwrap();

    let mut covered: Vec<usize> = set.indices.iter().flatten().copied().collect();
    covered.sort_unstable();
    assert_eq!(covered, (0..8).collect::<Vec<_>>());
}

#[test]
fn zero_match_pattern_fails_loudly() {
    let analysis = Analysis::new(
        vec![cartesian_source("s")],
        vec![uncertainty(0, LogicTreeHalf::Ssc, &[("s", 0)])],
        vec![0.1],
    )
    .unwrap();

    let mut per_source = FxHashMap::default();
    per_source.insert(
        SourceId::from("s"),
        vec![Pattern::new(LogicTreeHalf::Ssc, 0, 'Z')],
    );
    let err = get_realization_groups(&analysis, &vec![per_source]).unwrap_err();
    assert!(matches!(
        err,
        HazError::Data(DataError::EmptyPatternMatch { .. })
    ));
}

#[test]
fn incomplete_patterns_fail_the_partition_check() {
    let analysis = Analysis::new(
        vec![cartesian_source("s")],
        vec![uncertainty(0, LogicTreeHalf::Ssc, &[("s", 0)])],
        vec![0.1],
    )
    .unwrap();

    // Only the 'A' branch: half the realizations are never selected.
    let mut per_source = FxHashMap::default();
    per_source.insert(
        SourceId::from("s"),
        vec![Pattern::new(LogicTreeHalf::Ssc, 0, 'A')],
    );
    let err = get_realization_groups(&analysis, &vec![per_source]).unwrap_err();
    assert!(matches!(
        err,
        HazError::Data(DataError::GroupsNotPartition { .. })
    ));
}

// ── Correlated sources ───────────────────────────────────────────────────

#[test]
fn correlated_sources_each_get_their_own_groups() {
    let analysis = Analysis::new(
        vec![
            source("a", &["A~w", "A~x", "B~w", "B~x"]),
            source("b", &["A~w", "B~w"]),
        ],
        vec![uncertainty(0, LogicTreeHalf::Ssc, &[("a", 0), ("b", 0)])],
        vec![0.1],
    )
    .unwrap();

    let patterns = get_patterns(&analysis);
    let groups = get_realization_groups(&analysis, &patterns).unwrap();

    let for_a = groups.get(0, &SourceId::from("a")).unwrap();
    assert_eq!(for_a.indices, vec![vec![0, 1], vec![2, 3]]);
    let for_b = groups.get(0, &SourceId::from("b")).unwrap();
    assert_eq!(for_b.indices, vec![vec![0], vec![1]]);
}
