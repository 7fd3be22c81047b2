use std::fs;

use approx::assert_relative_eq;
use rra::{beta_cdf, read_dataset, read_dataset_path, Rra, RraConfig, RraError};

/// Two lists of four values; group A ranks first in both lists while group B
/// ranks third and fourth.
const INPUT: &str = "\
item\tgroup\tlist\tvalue
a1\tA\tL1\t0.1
c1\tC\tL1\t0.2
b1\tB\tL1\t0.3
d1\tD\tL1\t0.4
a2\tA\tL2\t-5
d2\tD\tL2\t-4
c2\tC\tL2\t-3
b2\tB\tL2\t-2
";

#[test]
fn end_to_end_example() {
    let config = RraConfig::default();
    let dataset = read_dataset(INPUT.as_bytes(), &config).unwrap();
    let results = Rra::new(dataset, config).run().unwrap();

    let a = results.group("A").unwrap();
    assert_eq!(a.percentiles(), vec![0.125, 0.125]);
    let expected_a = beta_cdf(2.0, 1.0, 0.125).unwrap();
    assert_relative_eq!(a.lo_value, expected_a, epsilon = 1e-12);

    let b = results.group("B").unwrap();
    let mut b_percentiles = b.percentiles();
    b_percentiles.sort_by(f64::total_cmp);
    assert_eq!(b_percentiles, vec![0.625, 0.875]);
    let expected_b = beta_cdf(1.0, 2.0, 0.625).unwrap();
    assert_relative_eq!(b.lo_value, expected_b, epsilon = 1e-12);

    assert!(a.lo_value < b.lo_value);
    assert!(a.fdr <= b.fdr);
    assert_eq!(results.groups()[0].name, "A");

    let fdr = results.groups().iter().map(|g| g.fdr).collect::<Vec<_>>();
    assert!(fdr.windows(2).all(|w| w[0] <= w[1]));
    assert!(*fdr.last().unwrap() <= 1.0);
}

#[test]
fn identical_inputs_are_bit_identical() {
    let run = || {
        let config = RraConfig::default();
        let dataset = read_dataset(INPUT.as_bytes(), &config).unwrap();
        let results = Rra::new(dataset, config).run().unwrap();
        let mut buffer = Vec::new();
        results.write_tsv(&mut buffer).unwrap();
        (results.null_pool().clone(), buffer)
    };
    let (pool_a, out_a) = run();
    let (pool_b, out_b) = run();
    assert_eq!(pool_a, pool_b);
    assert_eq!(out_a, out_b);
}

#[test]
fn file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    let output = dir.path().join("output.txt");
    fs::write(&input, INPUT).unwrap();

    let config = RraConfig::builder().max_percentile(0.5).build();
    let dataset = read_dataset_path(&input, &config).unwrap();
    let results = Rra::new(dataset, config).run().unwrap();
    results.write_tsv_path(&output).unwrap();

    let text = fs::read_to_string(&output).unwrap();
    let lines = text.lines().collect::<Vec<_>>();
    assert_eq!(lines[0], "group_id\t#_items_in_group\tlo_value\tFDR");
    assert_eq!(lines.len(), 5);
    assert!(lines[1].starts_with("A\t2\t"));
    for line in &lines[1..] {
        let fields = line.split('\t').collect::<Vec<_>>();
        assert_eq!(fields.len(), 4);
        assert!(fields[2].contains('e'));
        let fdr = fields[3].parse::<f64>().unwrap();
        assert!((0.0..=1.0).contains(&fdr));
    }
}

#[test]
fn missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_dataset_path(dir.path().join("absent.txt"), &RraConfig::default());
    assert!(matches!(err, Err(RraError::Io(_))));
}
