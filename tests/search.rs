use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use wordcloud::geometry::BoundingBox;
use wordcloud::mask::Mask;
use wordcloud::search::prelude::*;

fn params() -> SearchParams {
    SearchParams::default()
}

fn no_probe() -> impl FnMut(&BoundingBox) {
    |_: &BoundingBox| {}
}

// ── OccupiedSet ───────────────────────────────────────────────────────────────

#[test]
fn occupied_set_starts_with_mask_only() {
    let mask = Mask::new(vec![BoundingBox::new(0, 0, 5, 5)]);
    let occ = OccupiedSet::new(&mask);
    assert_eq!(occ.len(), 1);
    assert!(occ.placed().is_empty());
    assert!(occ.collides(&BoundingBox::new(2, 2, 5, 5)));
    assert!(!occ.collides(&BoundingBox::new(5, 5, 5, 5)));
}

#[test]
fn occupied_set_grows_and_clears_placed_only() {
    let mask = Mask::new(vec![BoundingBox::new(0, 0, 5, 5)]);
    let mut occ = OccupiedSet::new(&mask);
    occ.insert(BoundingBox::new(20, 20, 5, 5));
    assert_eq!(occ.len(), 2);
    assert!(occ.collides(&BoundingBox::new(22, 22, 1, 1)));

    occ.clear();
    assert_eq!(occ.len(), 1);
    assert!(!occ.collides(&BoundingBox::new(22, 22, 1, 1)));
    assert!(occ.collides(&BoundingBox::new(1, 1, 1, 1)));
}

// ── Spiral ────────────────────────────────────────────────────────────────────

#[test]
fn spiral_first_probe_is_centered() {
    let mask = Mask::default();
    let occ = OccupiedSet::new(&mask);
    let pos = spiral_search(&BoundingBox::sized(10, 10), &occ, 100, 100, &params(), &mut no_probe());
    assert_eq!(pos, Some((45, 45)));
}

#[test]
fn spiral_avoids_central_mask() {
    let mask = Mask::new(vec![BoundingBox::new(40, 40, 20, 20)]);
    let occ = OccupiedSet::new(&mask);
    let bbox = BoundingBox::sized(10, 6);

    let (x, y) = spiral_search(&bbox, &occ, 100, 100, &params(), &mut no_probe()).unwrap();
    let placed = bbox.at(x, y);

    assert!(!mask.overlaps(&placed));
    assert!(placed.contained_in(100, 100));
    // Still hugs the mask rather than landing in a corner.
    assert!(wordcloud::geometry::center_distance(&placed, 50.0, 50.0) < 25.0);
}

#[test]
fn spiral_box_larger_than_canvas_is_unplaceable() {
    let mask = Mask::default();
    let occ = OccupiedSet::new(&mask);
    let mut probes = 0;
    let pos = spiral_search(&BoundingBox::sized(20, 20), &occ, 10, 10, &params(), &mut |_| probes += 1);
    assert_eq!(pos, None);
    assert_eq!(probes, 0);
}

#[test]
fn spiral_fully_masked_canvas_fails() {
    let mask = Mask::new(vec![BoundingBox::new(0, 0, 30, 30)]);
    let occ = OccupiedSet::new(&mask);
    let pos = spiral_search(&BoundingBox::sized(3, 3), &occ, 30, 30, &params(), &mut no_probe());
    assert_eq!(pos, None);
}

#[test]
fn spiral_probes_stay_on_canvas_and_never_repeat_consecutively() {
    let mask = Mask::new(vec![BoundingBox::new(0, 0, 40, 40)]);
    let occ = OccupiedSet::new(&mask);
    let mut seen: Vec<BoundingBox> = Vec::new();
    let _ = spiral_search(&BoundingBox::sized(4, 4), &occ, 40, 40, &params(), &mut |c| seen.push(*c));

    assert!(!seen.is_empty());
    assert!(seen.iter().all(|c| c.contained_in(40, 40)));
    assert!(seen.windows(2).all(|w| w[0] != w[1]));
}

#[test]
fn spiral_is_deterministic() {
    let mask = Mask::new(vec![BoundingBox::new(30, 30, 40, 10)]);
    let occ = OccupiedSet::new(&mask);
    let bbox = BoundingBox::sized(25, 12);
    let a = spiral_search(&bbox, &occ, 100, 80, &params(), &mut no_probe());
    let b = spiral_search(&bbox, &occ, 100, 80, &params(), &mut no_probe());
    assert!(a.is_some());
    assert_eq!(a, b);
}

// ── Random ────────────────────────────────────────────────────────────────────

#[test]
fn random_places_inside_canvas_without_collision() {
    let mask = Mask::new(vec![BoundingBox::new(0, 0, 50, 100)]);
    let occ = OccupiedSet::new(&mask);
    let mut rng = StdRng::seed_from_u64(7);
    let bbox = BoundingBox::sized(10, 10);

    for _ in 0..20 {
        let (x, y) = random_search(&bbox, &occ, 100, 100, 1000, &mut rng, &mut no_probe()).unwrap();
        let placed = bbox.at(x, y);
        assert!(placed.contained_in(100, 100));
        assert!(!occ.collides(&placed));
    }
}

#[test]
fn random_same_seed_same_position() {
    let mask = Mask::default();
    let occ = OccupiedSet::new(&mask);
    let bbox = BoundingBox::sized(10, 10);
    let a = random_search(&bbox, &occ, 200, 200, 10, &mut StdRng::seed_from_u64(99), &mut no_probe());
    let b = random_search(&bbox, &occ, 200, 200, 10, &mut StdRng::seed_from_u64(99), &mut no_probe());
    assert_eq!(a, b);
}

#[test]
fn random_gives_up_after_max_attempts() {
    let mask = Mask::new(vec![BoundingBox::new(0, 0, 50, 50)]);
    let occ = OccupiedSet::new(&mask);
    let mut rng = StdRng::seed_from_u64(1);
    let mut probes = 0;
    let pos = random_search(&BoundingBox::sized(5, 5), &occ, 50, 50, 37, &mut rng, &mut |_| probes += 1);
    assert_eq!(pos, None);
    assert_eq!(probes, 37);
}

#[test]
fn random_oversized_box_does_not_consume_rng() {
    let mask = Mask::default();
    let occ = OccupiedSet::new(&mask);
    let mut used = StdRng::seed_from_u64(3);
    let mut fresh = StdRng::seed_from_u64(3);
    let pos = random_search(&BoundingBox::sized(20, 20), &occ, 10, 10, 100, &mut used, &mut no_probe());
    assert_eq!(pos, None);
    assert_eq!(used.next_u64(), fresh.next_u64());
}

#[test]
fn random_exact_fit_lands_at_origin() {
    let mask = Mask::default();
    let occ = OccupiedSet::new(&mask);
    let mut rng = StdRng::seed_from_u64(5);
    let pos = random_search(&BoundingBox::sized(10, 10), &occ, 10, 10, 5, &mut rng, &mut no_probe());
    assert_eq!(pos, Some((0, 0)));
}

// ── Dispatch ──────────────────────────────────────────────────────────────────

#[test]
fn find_position_dispatches_by_mode() {
    let mask = Mask::default();
    let occ = OccupiedSet::new(&mask);
    let bbox = BoundingBox::sized(10, 10);

    let spiral = find_position(&bbox, &occ, 100, 100, SearchMode::Spiral, &params(), &mut no_probe());
    assert_eq!(spiral, Some((45, 45)));

    let mut rng = StdRng::seed_from_u64(11);
    let random = find_position(&bbox, &occ, 100, 100, SearchMode::Random(&mut rng), &params(), &mut no_probe());
    let (x, y) = random.unwrap();
    assert!(bbox.at(x, y).contained_in(100, 100));
}
