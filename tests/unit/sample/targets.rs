use rand::{SeedableRng, rngs::StdRng};

use super::*;

fn mask_with_opaque(width: u32, height: u32, opaque: usize) -> CoverageMask {
    let mut alpha = vec![0u8; width as usize * height as usize];
    for a in alpha.iter_mut().take(opaque) {
        *a = 255;
    }
    CoverageMask::from_alpha(width, height, alpha).unwrap()
}

#[test]
fn scan_uses_strict_threshold_in_row_major_order() {
    let mask = CoverageMask::from_alpha(3, 2, vec![40, 41, 0, 255, 0, 200]).unwrap();
    let pts = scan_candidates(&mask, 40);
    assert_eq!(
        pts,
        vec![
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(2.0, 1.0)
        ]
    );
}

#[test]
fn shuffle_is_a_permutation() {
    let mut rng = StdRng::seed_from_u64(7);
    let original: Vec<Point> = (0..100).map(|i| Point::new(f64::from(i), 0.0)).collect();
    let mut shuffled = original.clone();
    shuffle_points(&mut shuffled, &mut rng);
    assert_ne!(shuffled, original);
    let mut xs: Vec<i64> = shuffled.iter().map(|p| p.x as i64).collect();
    xs.sort_unstable();
    assert_eq!(xs, (0..100).collect::<Vec<_>>());
}

#[test]
fn truncation_yields_exact_count() {
    let mut rng = StdRng::seed_from_u64(1);
    let candidates: Vec<Point> = (0..500).map(|i| Point::new(f64::from(i), 1.0)).collect();
    let out = sample_targets(candidates, 120, &mut rng);
    assert_eq!(out.len(), 120);
    assert!(out.iter().all(|p| p.y == 1.0 && p.x.fract() == 0.0));
}

#[test]
fn scarce_candidates_are_padded_with_jittered_duplicates() {
    // 500x500 surface with exactly 4000 opaque pixels, 6000 requested.
    let mask = mask_with_opaque(500, 500, 4000);
    let candidates = scan_candidates(&mask, DEFAULT_ALPHA_THRESHOLD);
    assert_eq!(candidates.len(), 4000);

    let mut rng = StdRng::seed_from_u64(42);
    let out = sample_targets(candidates, 6000, &mut rng);
    assert_eq!(out.len(), 6000);

    let (head, tail) = out.split_at(4000);
    for (k, p) in tail.iter().enumerate() {
        let src = head[k % head.len()];
        assert!((p.x - src.x).abs() <= PAD_JITTER);
        assert!((p.y - src.y).abs() <= PAD_JITTER);
    }
}

#[test]
fn padding_cycles_more_than_once_when_needed() {
    let mut rng = StdRng::seed_from_u64(3);
    let candidates = vec![Point::new(10.0, 10.0), Point::new(20.0, 20.0)];
    let out = sample_targets(candidates, 7, &mut rng);
    assert_eq!(out.len(), 7);
    for p in &out {
        let near_a = (p.x - 10.0).abs() <= PAD_JITTER && (p.y - 10.0).abs() <= PAD_JITTER;
        let near_b = (p.x - 20.0).abs() <= PAD_JITTER && (p.y - 20.0).abs() <= PAD_JITTER;
        assert!(near_a || near_b);
    }
}

#[test]
fn empty_candidates_stay_empty() {
    let mut rng = StdRng::seed_from_u64(0);
    assert!(sample_targets(Vec::new(), 6000, &mut rng).is_empty());
}

#[test]
fn generated_design_points_match_requested_count() {
    let mut rng = StdRng::seed_from_u64(11);
    let size = SurfaceSize::new(500, 500);
    let pts = generate_design_points(&IconArt::Supplier, size, 6000, 40, &mut rng).unwrap();
    assert_eq!(pts.len(), 6000);
    let lo = -PAD_JITTER;
    let hi = 500.0 + PAD_JITTER;
    assert!(
        pts.iter()
            .all(|p| (lo..=hi).contains(&p.x) && (lo..=hi).contains(&p.y))
    );
}

#[test]
fn no_artwork_means_no_targets() {
    let mut rng = StdRng::seed_from_u64(11);
    let pts = generate_design_points(
        &IconArt::None,
        SurfaceSize::new(100, 100),
        6000,
        40,
        &mut rng,
    )
    .unwrap();
    assert!(pts.is_empty());
}
