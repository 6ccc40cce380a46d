use proptest::prelude::*;
use wordcloud::engine::{PlacementEngine, Word};
use wordcloud::geometry::BoundingBox;
use wordcloud::palette::{Color, Palette};
use wordcloud::sizing::{compute_size, SizeFunction};
use wordcloud::Config;

fn curve() -> impl Strategy<Value = SizeFunction> {
    prop_oneof![
        Just(SizeFunction::Linear),
        Just(SizeFunction::Sqrt),
        Just(SizeFunction::SqrtInverse),
    ]
}

fn bbox() -> impl Strategy<Value = BoundingBox> {
    (-500i32..500, -500i32..500, 0u32..200, 0u32..200).prop_map(|(x, y, w, h)| BoundingBox::new(x, y, w, h))
}

fn measure(text: &str, font_size: f32) -> BoundingBox {
    BoundingBox::sized((text.len() as f32 * font_size * 0.55).ceil() as u32, font_size.ceil() as u32)
}

proptest! {
    #[test]
    fn translate_round_trips(b in bbox(), dx in -10_000i32..10_000, dy in -10_000i32..10_000) {
        prop_assert_eq!(b.translated(dx, dy).translated(-dx, -dy), b);
    }

    #[test]
    fn intersects_is_symmetric(a in bbox(), b in bbox()) {
        prop_assert_eq!(a.intersects(&b), b.intersects(&a));
    }

    #[test]
    fn size_stays_in_bounds_and_never_grows(
        total in 1usize..300,
        min in 1.0f32..50.0,
        extra in 0.0f32..400.0,
        curve in curve(),
    ) {
        let max = min + extra;
        let mut prev = f32::INFINITY;
        for rank in 0..total {
            let size = compute_size(rank, total, min, max, curve);
            prop_assert!(size >= min && size <= max, "rank {} size {}", rank, size);
            prop_assert!(size <= prev);
            prev = size;
        }
        prop_assert!(compute_size(0, total, min, max, curve) >= compute_size(total - 1, total, min, max, curve));
    }

    #[test]
    fn palette_is_periodic(len in 1usize..8, i in 0usize..1000) {
        let colors: Vec<Color> = (0..len).map(|c| Color::rgb(c as u8, 0, 0)).collect();
        let p = Palette::new(colors).unwrap();
        prop_assert_eq!(p.color_for(i), p.color_for(i + len));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn placements_never_overlap_and_stay_on_canvas(
        width in 40u32..240,
        height in 40u32..240,
        weights in prop::collection::vec(1u32..100, 1..25),
        mask in prop::collection::vec((0i32..200, 0i32..200, 1u32..60, 1u32..60), 0..4),
        random in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let mask: Vec<BoundingBox> = mask.into_iter().map(|(x, y, w, h)| BoundingBox::new(x, y, w, h)).collect();
        let config = Config::builder()
            .width(width)
            .height(height)
            .font_min_size(6.0)
            .font_max_size(30.0)
            .mask(mask.clone())
            .random_placement(random)
            .seed(seed)
            .max_random_attempts(300)
            .build()
            .unwrap();
        let words: Vec<Word> = weights.iter().enumerate().map(|(i, w)| Word::new(format!("w{i}"), *w as f64)).collect();

        let layout = PlacementEngine::new(&config).run(&words, &measure).unwrap();

        prop_assert_eq!(layout.placed.len() + layout.unplaced.len(), words.len());
        for (i, a) in layout.placed.iter().enumerate() {
            prop_assert!(a.bbox.contained_in(width, height));
            prop_assert!(mask.iter().all(|m| !m.intersects(&a.bbox)));
            for b in &layout.placed[i + 1..] {
                prop_assert!(!a.bbox.intersects(&b.bbox));
            }
        }
    }
}
