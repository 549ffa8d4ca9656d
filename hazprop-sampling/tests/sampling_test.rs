use hazprop_analysis::{cluster, get_patterns, get_realization_groups, Analysis};
use hazprop_core::model::{
    LogicTreeHalf, RealizationPath, SourceId, SourceResult, Uncertainty,
};
use hazprop_hist::poe_to_afe;
use hazprop_sampling::SamplingEngine;
use ndarray::Array3;

fn source(id: &str, paths: &[&str], weights: &[f64], poes: &[f64]) -> SourceResult {
    let n = paths.len();
    let mut arr = Array3::zeros((1, n, 1));
    for (r, &p) in poes.iter().enumerate() {
        arr[[0, r, 0]] = p;
    }
    SourceResult {
        id: SourceId::from(id),
        investigation_time: 1.0,
        weights: weights.to_vec(),
        paths: paths.iter().map(|p| RealizationPath::parse(p).unwrap()).collect(),
        poes: arr,
    }
}

fn uncertainty(index: usize, sources: &[&str]) -> Uncertainty {
    Uncertainty {
        index,
        utype: "maxMagGRAbsolute".to_string(),
        half: LogicTreeHalf::Ssc,
        branch_ids: Vec::new(),
        ipath: sources.iter().map(|s| (SourceId::from(*s), 0)).collect(),
    }
}

/// Two sources correlated on one SSC uncertainty, one uncorrelated.
fn correlated_analysis() -> Analysis {
    Analysis::new(
        vec![
            source("a", &["A~w", "B~w"], &[0.5, 0.5], &[0.1, 0.2]),
            source("b", &["A~w", "B~w"], &[0.5, 0.5], &[0.3, 0.4]),
            source("c", &["A~w", "B~w"], &[0.4, 0.6], &[0.05, 0.5]),
        ],
        vec![uncertainty(0, &["a", "b"])],
        vec![0.1],
    )
    .unwrap()
}

// ── Determinism ──────────────────────────────────────────────────────────

#[test]
fn identical_seeds_reproduce_the_draws_exactly() {
    let analysis = correlated_analysis();
    let clusters = cluster(analysis.uncertainties(), &analysis.source_ids());
    let patterns = get_patterns(&analysis);
    let groups = get_realization_groups(&analysis, &patterns).unwrap();

    let first = SamplingEngine::new(1906)
        .sample(&clusters, &groups, &analysis, 64)
        .unwrap();
    let second = SamplingEngine::new(1906)
        .sample(&clusters, &groups, &analysis, 64)
        .unwrap();

    assert_eq!(first.afes, second.afes);
    assert_eq!(first.weights, second.weights);
}

#[test]
fn different_seeds_diverge() {
    let analysis = correlated_analysis();
    let clusters = cluster(analysis.uncertainties(), &analysis.source_ids());
    let patterns = get_patterns(&analysis);
    let groups = get_realization_groups(&analysis, &patterns).unwrap();

    let first = SamplingEngine::new(1)
        .sample(&clusters, &groups, &analysis, 256)
        .unwrap();
    let second = SamplingEngine::new(2)
        .sample(&clusters, &groups, &analysis, 256)
        .unwrap();
    assert_ne!(first.afes, second.afes);
}

// ── Correlation ──────────────────────────────────────────────────────────

#[test]
fn correlated_sources_always_draw_the_same_branch() {
    let analysis = correlated_analysis();
    let clusters = cluster(analysis.uncertainties(), &analysis.source_ids());
    let patterns = get_patterns(&analysis);
    let groups = get_realization_groups(&analysis, &patterns).unwrap();

    let n_samples = 512;
    let result = SamplingEngine::new(42)
        .sample(&clusters, &groups, &analysis, n_samples)
        .unwrap();

    let a_branch_a = poe_to_afe(0.1, 1.0);
    let b_branch_a = poe_to_afe(0.3, 1.0);
    let b_branch_b = poe_to_afe(0.4, 1.0);

    for k in 0..n_samples {
        let a_val = result.afes[[0, 0, k, 0]];
        let b_val = result.afes[[0, 1, k, 0]];
        if (a_val - a_branch_a).abs() < 1e-12 {
            assert!((b_val - b_branch_a).abs() < 1e-12, "sample {}", k);
        } else {
            assert!((b_val - b_branch_b).abs() < 1e-12, "sample {}", k);
        }
    }
}

#[test]
fn both_branches_appear_across_samples() {
    let analysis = correlated_analysis();
    let clusters = cluster(analysis.uncertainties(), &analysis.source_ids());
    let patterns = get_patterns(&analysis);
    let groups = get_realization_groups(&analysis, &patterns).unwrap();

    let n_samples = 512;
    let result = SamplingEngine::new(7)
        .sample(&clusters, &groups, &analysis, n_samples)
        .unwrap();

    let a_branch_a = poe_to_afe(0.1, 1.0);
    let hits = (0..n_samples)
        .filter(|&k| (result.afes[[0, 0, k, 0]] - a_branch_a).abs() < 1e-12)
        .count();
    // Weighted 0.5/0.5: both branches must show up in 512 draws.
    assert!(hits > 0 && hits < n_samples);
}

// ── Output shape ─────────────────────────────────────────────────────────

#[test]
fn output_matrix_is_sites_sources_samples_levels() {
    let analysis = correlated_analysis();
    let clusters = cluster(analysis.uncertainties(), &analysis.source_ids());
    let patterns = get_patterns(&analysis);
    let groups = get_realization_groups(&analysis, &patterns).unwrap();

    let result = SamplingEngine::new(3)
        .sample(&clusters, &groups, &analysis, 16)
        .unwrap();
    assert_eq!(result.afes.shape(), &[1, 3, 16, 1]);
    assert_eq!(result.weights.len(), 16);
    assert_eq!(result.imls, vec![0.1]);
}

#[test]
fn sample_weights_multiply_the_drawn_realization_weights() {
    let analysis = correlated_analysis();
    let clusters = cluster(analysis.uncertainties(), &analysis.source_ids());
    let patterns = get_patterns(&analysis);
    let groups = get_realization_groups(&analysis, &patterns).unwrap();

    let result = SamplingEngine::new(11)
        .sample(&clusters, &groups, &analysis, 32)
        .unwrap();
    // Three sources with per-realization weights in {0.4, 0.5, 0.6}:
    // every product stays in (0, 1).
    for &w in &result.weights {
        assert!(w > 0.0 && w < 1.0);
    }
}
