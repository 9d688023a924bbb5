use hanoi_plots::dataset::{Dataset, ResultRecord};
use hanoi_plots::error::Error;
use hanoi_plots::metrics::{
    DEFAULT_TICK_STEP, RatioBucket, baseline_ratios, buckets, theory_mismatches, tick_subset,
};

fn dataset_with_times(times: &[f64]) -> Dataset {
    Dataset::new(
        times
            .iter()
            .enumerate()
            .map(|(i, &t)| {
                let n = i as u32 + 1;
                let moves = (1u64 << n) - 1;
                ResultRecord::new(n, moves, moves, t).unwrap()
            })
            .collect(),
    )
}

#[test]
fn ratios_and_buckets_follow_fixed_thresholds() {
    let ds = dataset_with_times(&[2.0, 20.0, 250.0]);
    let ratios = baseline_ratios(&ds).unwrap();
    assert_eq!(ratios, vec![1.0, 10.0, 125.0]);
    assert_eq!(
        buckets(&ratios),
        vec![RatioBucket::Low, RatioBucket::Low, RatioBucket::High]
    );

    let ds = dataset_with_times(&[2.0, 50.0, 250.0]);
    let ratios = baseline_ratios(&ds).unwrap();
    assert_eq!(ratios, vec![1.0, 25.0, 125.0]);
    assert_eq!(
        buckets(&ratios),
        vec![RatioBucket::Low, RatioBucket::Mid, RatioBucket::High]
    );
}

#[test]
fn zero_baseline_is_invalid() {
    let ds = dataset_with_times(&[0.0, 1.0]);
    assert!(matches!(baseline_ratios(&ds), Err(Error::InvalidBaseline(_))));
}

#[test]
fn tiny_baseline_with_huge_later_time_is_invalid() {
    let ds = dataset_with_times(&[1e-310, 1e10]);
    assert!(matches!(baseline_ratios(&ds), Err(Error::InvalidBaseline(_))));
}

#[test]
fn ticks_over_one_to_thirty_seven() {
    let ns: Vec<u32> = (1..=37).collect();
    let picked: Vec<u32> = tick_subset(&ns, DEFAULT_TICK_STEP)
        .iter()
        .map(|t| t.n)
        .collect();
    assert_eq!(picked, vec![1, 11, 21, 31]);
}

#[test]
fn tick_index_points_at_bar_position() {
    let ns = [5, 15, 25];
    let ticks = tick_subset(&ns, 10);
    assert_eq!(
        ticks.iter().map(|t| t.index).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
}

#[test]
fn bucket_colors_are_fixed() {
    let rgb = |b: RatioBucket| {
        let c = b.color();
        (c.0, c.1, c.2)
    };
    assert_eq!(rgb(RatioBucket::Low), (0x2e, 0xcc, 0x71));
    assert_eq!(rgb(RatioBucket::Mid), (0xf3, 0x9c, 0x12));
    assert_eq!(rgb(RatioBucket::High), (0xe7, 0x4c, 0x3c));
}

#[test]
fn consistent_runner_output_has_no_theory_mismatch() {
    let ds = dataset_with_times(&[0.1, 0.2, 0.4, 0.8]);
    assert!(theory_mismatches(&ds).is_empty());
}
