use image::RgbaImage;
use wordcloud::engine::{Layout, PlacedWord, PlacementEngine, Word};
use wordcloud::geometry::BoundingBox;
use wordcloud::palette::Color;
use wordcloud::renderer::*;
use wordcloud::Config;

// Helper: a layout with the given placed boxes on a 20×20 white canvas.
fn layout(placed: Vec<(BoundingBox, Color)>, debug_outlines: Vec<BoundingBox>) -> Layout {
    Layout {
        width: 20,
        height: 20,
        background: Color::WHITE,
        placed: placed
            .into_iter()
            .enumerate()
            .map(|(rank, (bbox, color))| PlacedWord {
                text: format!("w{rank}"),
                rank,
                bbox,
                font_size: 10.0,
                color,
            })
            .collect(),
        unplaced: Vec::new(),
        debug_outlines,
        cancelled: false,
    }
}

fn px(img: &RgbaImage, x: u32, y: u32) -> [u8; 4] {
    img.get_pixel(x, y).0
}

#[test]
fn render_fills_background() {
    let l = layout(Vec::new(), Vec::new());
    let img = Canvas::for_layout(&l).render(&l, &BlockRasterizer);
    assert_eq!(img.dimensions(), (20, 20));
    assert!(img.pixels().all(|p| p.0 == Color::WHITE.0));
}

#[test]
fn block_rasterizer_fills_each_box_with_its_color() {
    let l = layout(
        vec![(BoundingBox::new(2, 2, 3, 3), Color::RED), (BoundingBox::new(10, 10, 2, 4), Color::BLUE)],
        Vec::new(),
    );
    let img = Canvas::for_layout(&l).render(&l, &BlockRasterizer);

    assert_eq!(px(&img, 2, 2), Color::RED.0);
    assert_eq!(px(&img, 4, 4), Color::RED.0);
    assert_eq!(px(&img, 5, 5), Color::WHITE.0);
    assert_eq!(px(&img, 11, 13), Color::BLUE.0);
    assert_eq!(px(&img, 12, 13), Color::WHITE.0);
}

#[test]
fn canvas_overrides_layout_background() {
    let l = layout(Vec::new(), Vec::new());
    let img = Canvas::new(5, 7, Color::BLACK).render(&l, &BlockRasterizer);
    assert_eq!(img.dimensions(), (5, 7));
    assert_eq!(px(&img, 4, 6), Color::BLACK.0);
}

#[test]
fn debug_outlines_draw_placed_box_edges() {
    let bbox = BoundingBox::new(4, 4, 6, 6);
    let l = layout(vec![(bbox, Color::BLACK)], vec![bbox]);
    let img = Canvas::for_layout(&l).render(&l, &BlockRasterizer);

    // Edge pixels carry the placed-box outline color; the interior keeps the fill.
    assert_eq!(px(&img, 4, 4), DEBUG_PLACED_COLOR.0);
    assert_eq!(px(&img, 9, 9), DEBUG_PLACED_COLOR.0);
    assert_eq!(px(&img, 6, 6), Color::BLACK.0);
}

#[test]
fn outline_draws_only_the_border() {
    let mut img = RgbaImage::from_pixel(10, 10, Color::WHITE.to_rgba());
    draw_outline(&mut img, &BoundingBox::new(1, 1, 5, 4), Color::RED);

    assert_eq!(px(&img, 1, 1), Color::RED.0);
    assert_eq!(px(&img, 5, 1), Color::RED.0);
    assert_eq!(px(&img, 1, 4), Color::RED.0);
    assert_eq!(px(&img, 5, 4), Color::RED.0);
    assert_eq!(px(&img, 3, 2), Color::WHITE.0);
    assert_eq!(px(&img, 6, 1), Color::WHITE.0);
}

#[test]
fn fill_box_clips_to_image() {
    let mut img = RgbaImage::from_pixel(4, 4, Color::WHITE.to_rgba());
    fill_box(&mut img, &BoundingBox::new(-2, -2, 4, 4), Color::GREEN);
    assert_eq!(px(&img, 0, 0), Color::GREEN.0);
    assert_eq!(px(&img, 1, 1), Color::GREEN.0);
    assert_eq!(px(&img, 2, 2), Color::WHITE.0);
}

#[test]
fn engine_output_renders_end_to_end() {
    let config = Config::builder()
        .width(120)
        .height(80)
        .font_min_size(8.0)
        .font_max_size(24.0)
        .colors(vec![Color::RED])
        .build()
        .unwrap();
    let measure = |text: &str, size: f32| BoundingBox::sized(text.len() as u32 * size as u32 / 2, size as u32);
    let words = vec![Word::new("alpha", 3.0), Word::new("beta", 2.0), Word::new("gamma", 1.0)];

    let layout = PlacementEngine::new(&config).run(&words, &measure).unwrap();
    let img = Canvas::for_layout(&layout).render(&layout, &BlockRasterizer);

    let red = img.pixels().filter(|p| p.0 == Color::RED.0).count() as u64;
    let expected: u64 = layout.placed.iter().map(|w| w.bbox.area()).sum();
    assert_eq!(red, expected);
}
