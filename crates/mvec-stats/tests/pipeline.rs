use std::fs;
use std::path::Path;

use mvec_stats::{run, Decoder, Estimator, StatsConfig, StatsError};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, body: &str) {
    let p = root.join(rel);
    fs::create_dir_all(p.parent().unwrap()).unwrap();
    fs::write(p, body).unwrap();
}

fn config(tmp: &TempDir) -> StatsConfig {
    StatsConfig {
        root: tmp.path().join("report"),
        filter: String::new(),
        out_dir: tmp.path().join("out"),
    }
}

fn read_rows(path: &Path) -> Vec<Vec<String>> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|l| l.split(',').map(str::to_owned).collect())
        .collect()
}

#[test]
fn single_error_file_produces_one_cell_in_degrees() {
    let tmp = TempDir::new().unwrap();
    let cfg = config(&tmp);
    write(&cfg.root, "av_1/almeida_0.csv", "frame,error\n0,0.1\n1,0.3\n");

    let report = run(&cfg).unwrap();

    let rows = read_rows(&cfg.out_dir.join("err_av.csv"));
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], vec!["", "Almeida-RANSAC"]);
    assert_eq!(rows[1][0], "1");
    let value: f64 = rows[1][1].parse().unwrap();
    assert!((value - 11.459).abs() < 1e-3, "{value}");

    assert!(report.written.contains(&cfg.out_dir.join("perf.csv")));
    assert!(!cfg.out_dir.join("perf_av.csv").exists());
    assert!(!cfg.out_dir.join("err_rlof.csv").exists());
}

#[test]
fn performance_summary_averages_clip_means_across_decoders() {
    let tmp = TempDir::new().unwrap();
    let cfg = config(&tmp);
    write(&cfg.root, "av_1/perf_almeida_0_aa.csv", "1.0\n3.0\n");
    write(&cfg.root, "av_2/perf_almeida_0_aa.csv", "4.0\n");
    write(&cfg.root, "rlof_1/perf_almeida_0_aa.csv", "6.0\n");
    write(&cfg.root, "farneback_1dyn/perf_libmv_6_aa.csv", "0.5\n");

    let report = run(&cfg).unwrap();

    assert_eq!(report.summary.get(Decoder::Av, Estimator::AlmeidaRansac), Some(3.0));
    assert_eq!(report.summary.get(Decoder::Rlof, Estimator::AlmeidaRansac), Some(6.0));
    assert_eq!(report.summary.get(Decoder::Farneback, Estimator::AlmeidaRansac), None);

    let text = fs::read_to_string(cfg.out_dir.join("perf.csv")).unwrap();
    assert_eq!(text, ",Almeida-RANSAC,Libmv-7pt\nav,3.0,\nrlof,6.0,\nfarneback,,0.5\n");

    let av = fs::read_to_string(cfg.out_dir.join("perf_av.csv")).unwrap();
    assert_eq!(av, ",Almeida-RANSAC\n1,2.0\n2,4.0\n");
}

#[test]
fn rows_follow_clip_order_and_columns_follow_catalog_order() {
    let tmp = TempDir::new().unwrap();
    let cfg = config(&tmp);
    for clip in ["2", "1dyn", "1"] {
        write(&cfg.root, &format!("rlof_{clip}/libmv_7.csv"), "frame,error\n0,0.0\n");
        write(&cfg.root, &format!("rlof_{clip}/homography_2.csv"), "frame,error\n0,0.0\n");
    }

    run(&cfg).unwrap();

    let rows = read_rows(&cfg.out_dir.join("err_rlof.csv"));
    assert_eq!(rows[0], vec!["", "Homography-RANSAC", "Libmv-8pt"]);
    let labels: Vec<_> = rows[1..].iter().map(|r| r[0].as_str()).collect();
    assert_eq!(labels, vec!["1", "1dyn", "2"]);
}

#[test]
fn incomplete_coverage_fails_before_writing() {
    let tmp = TempDir::new().unwrap();
    let cfg = config(&tmp);
    write(&cfg.root, "av_1/almeida_0.csv", "frame,error\n0,0.1\n");
    write(&cfg.root, "av_2/almeida_1.csv", "frame,error\n0,0.1\n");

    let err = run(&cfg).unwrap_err();
    let StatsError::Coverage(coverage) = &err else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(coverage.decoder, Decoder::Av);
    assert_eq!(coverage.missing.len(), 2);
    assert!(!cfg.out_dir.exists());
}

#[test]
fn missing_root_is_an_io_error() {
    let tmp = TempDir::new().unwrap();
    let cfg = config(&tmp);
    assert!(matches!(run(&cfg), Err(StatsError::Io { .. })));
}
