use approx::assert_relative_eq;
use rastery::prelude::*;
use rastery::render::cull::{facing, prepare_face};
use rastery::render::DEPTH_CLEAR;

const BACKGROUND: Color = Color::BLACK;

fn cleared_target(width: u32, height: u32) -> RenderTarget {
    let mut target = RenderTarget::new(width, height).unwrap();
    target.clear(BACKGROUND);
    target
}

fn flat(x: f32, y: f32, z: f32) -> RasterVertex {
    RasterVertex::flat(x, y, z)
}

fn lit_pixels(target: &RenderTarget) -> Vec<(u32, u32)> {
    let width = target.width();
    target
        .frame()
        .pixels()
        .iter()
        .enumerate()
        .filter(|(_, &p)| p != BACKGROUND.to_argb())
        .map(|(i, _)| (i as u32 % width, i as u32 / width))
        .collect()
}

/// Signed-area point-in-triangle test, widened by `margin` pixels.
fn inside(p: (f32, f32), tri: [(f32, f32); 3], margin: f32) -> bool {
    let edge = |a: (f32, f32), b: (f32, f32)| {
        let (dx, dy) = (b.0 - a.0, b.1 - a.1);
        let len = (dx * dx + dy * dy).sqrt();
        (dx * (p.1 - a.1) - dy * (p.0 - a.0)) / len
    };
    let d = [edge(tri[0], tri[1]), edge(tri[1], tri[2]), edge(tri[2], tri[0])];
    d.iter().all(|&v| v >= -margin) || d.iter().all(|&v| v <= margin)
}

#[test]
fn single_triangle_fills_its_footprint_at_full_brightness() {
    let mut target = cleared_target(100, 100);
    let written = ScanlineRasterizer::new().fill_triangle(
        [flat(10.0, 10.0, 1.0), flat(50.0, 10.0, 1.0), flat(30.0, 50.0, 1.0)],
        Color::WHITE,
        None,
        &mut target,
    );

    let lit = lit_pixels(&target);
    assert_eq!(written, lit.len());
    assert!(!lit.is_empty());

    let footprint = [(10.0, 10.0), (50.0, 10.0), (30.0, 50.0)];
    for &(x, y) in &lit {
        assert!(
            inside((x as f32, y as f32), footprint, 1.0),
            "({x}, {y}) lies outside the triangle"
        );
        assert_eq!(target.frame().argb(x as i32, y as i32), Some(0xFFFF_FFFF));
        assert_relative_eq!(target.depth().get(x, y).unwrap(), 0.01);
    }
}

#[test]
fn interior_scanlines_have_no_gaps() {
    let mut target = cleared_target(100, 100);
    ScanlineRasterizer::new().fill_triangle(
        [flat(12.0, 8.0, 1.0), flat(88.0, 37.0, 1.0), flat(41.0, 92.0, 1.0)],
        Color::WHITE,
        None,
        &mut target,
    );

    for y in 10..90 {
        let xs: Vec<i32> = (0..100)
            .filter(|&x| target.frame().argb(x, y) != Some(BACKGROUND.to_argb()))
            .collect();
        assert!(!xs.is_empty(), "row {y} is empty");
        let span = (xs[xs.len() - 1] - xs[0] + 1) as usize;
        assert_eq!(span, xs.len(), "row {y} has a gap");
    }
}

#[test]
fn pixel_count_tracks_screen_area() {
    let mut target = cleared_target(100, 100);
    let written = ScanlineRasterizer::new().fill_triangle(
        [flat(5.0, 5.0, 1.0), flat(95.0, 5.0, 1.0), flat(50.0, 95.0, 1.0)],
        Color::WHITE,
        None,
        &mut target,
    );

    let area = 0.5 * 90.0 * 90.0;
    let error = (written as f32 - area).abs() / area;
    assert!(error < 0.05, "{written} pixels for area {area}");
}

#[test]
fn triangle_outside_viewport_writes_nothing() {
    let rasterizer = ScanlineRasterizer::new();
    let mut target = cleared_target(100, 100);

    let below = [flat(200.0, 200.0, 1.0), flat(300.0, 200.0, 1.0), flat(250.0, 300.0, 1.0)];
    let left = [flat(-80.0, 10.0, 1.0), flat(-20.0, 40.0, 1.0), flat(-50.0, 90.0, 1.0)];
    assert_eq!(rasterizer.fill_triangle(below, Color::WHITE, None, &mut target), 0);
    assert_eq!(rasterizer.fill_triangle(left, Color::WHITE, None, &mut target), 0);

    assert!(lit_pixels(&target).is_empty());
    assert!(target.depth().depths().iter().all(|&d| d == DEPTH_CLEAR));
}

#[test]
fn nearer_triangle_wins_regardless_of_order() {
    let far = [flat(10.0, 10.0, 5.0), flat(70.0, 10.0, 5.0), flat(40.0, 70.0, 5.0)];
    let near = [flat(30.0, 20.0, 2.0), flat(90.0, 20.0, 2.0), flat(60.0, 80.0, 2.0)];
    let rasterizer = ScanlineRasterizer::new();

    let mut near_last = cleared_target(100, 100);
    rasterizer.fill_triangle(far, Color::RED, None, &mut near_last);
    rasterizer.fill_triangle(near, Color::GREEN, None, &mut near_last);

    let mut near_first = cleared_target(100, 100);
    rasterizer.fill_triangle(near, Color::GREEN, None, &mut near_first);
    rasterizer.fill_triangle(far, Color::RED, None, &mut near_first);

    // (45, 30) is covered by both.
    assert_eq!(near_last.frame().pixel(45, 30), Some(Color::GREEN));
    assert_eq!(near_first.frame().pixel(45, 30), Some(Color::GREEN));
    assert_relative_eq!(near_last.depth().get(45, 30).unwrap(), 0.02);

    // Only the far triangle covers (20, 15).
    assert_eq!(near_last.frame().pixel(20, 15), Some(Color::RED));

    assert_eq!(near_last.frame().pixels(), near_first.frame().pixels());
    assert_eq!(near_last.depth().depths(), near_first.depth().depths());
}

#[test]
fn depth_write_happens_only_for_strictly_smaller_depth() {
    let mut target = cleared_target(10, 10);
    let d0 = 0.5;
    assert!(target.write(4, 4, d0, Color::RED));

    for (d1, expected) in [(0.6, false), (0.5, false), (0.4, true)] {
        let mut probe = target.clone();
        assert_eq!(probe.write(4, 4, d1, Color::BLUE), expected, "d1 = {d1}");
    }

    // Decreasing depths: the last (smallest) write survives.
    target.write(4, 4, 0.3, Color::GREEN);
    target.write(4, 4, 0.1, Color::BLUE);
    assert_eq!(target.frame().pixel(4, 4), Some(Color::BLUE));
    assert_relative_eq!(target.depth().get(4, 4).unwrap(), 0.1);
}

#[test]
fn clearing_resets_every_cell() {
    let mut target = cleared_target(50, 40);
    ScanlineRasterizer::new().fill_triangle(
        [flat(1.0, 1.0, 3.0), flat(49.0, 1.0, 3.0), flat(25.0, 39.0, 3.0)],
        Color::WHITE,
        None,
        &mut target,
    );
    assert!(!lit_pixels(&target).is_empty());

    let background = Color::from_rgb8([50, 0, 0]);
    target.clear(background);
    assert!(target
        .frame()
        .pixels()
        .iter()
        .all(|&p| p == background.to_argb()));
    assert!(target.depth().depths().iter().all(|&d| d == DEPTH_CLEAR));
}

#[test]
fn cull_boundary_is_exclusive_on_the_negative_side() {
    let normal = Vec3::Z;
    let face = Face::new(
        Vertex::new(Vec3::new(0.0, 0.0, 0.0)).with_normal(normal),
        Vertex::new(Vec3::new(3.0, 0.0, 0.0)).with_normal(normal),
        Vertex::new(Vec3::new(0.0, 3.0, 0.0)).with_normal(normal),
    );
    let light = PointLight::default();

    // Eye in the plane of the face: dot == 0 exactly.
    let edge_on = Vec3::new(-5.0, 1.0, 0.0);
    assert_eq!(facing(&[normal; 3], face.centroid(), edge_on), 0.0);
    assert!(prepare_face(&face, &light, edge_on, CullMode::KeepAwayFacing).is_some());

    // Eye in front of the normal: dot < 0, rejected.
    let in_front = Vec3::new(1.0, 1.0, 5.0);
    assert!(prepare_face(&face, &light, in_front, CullMode::KeepAwayFacing).is_none());
}

#[test]
fn texel_sampling_is_periodic() {
    let texture = Texture::from_fn(4, 4, |x, y| Color::from_rgb8([(x * 60) as u8, (y * 60) as u8, 7])).unwrap();

    for &u in &[0.1, 0.37, 0.62, 0.9, -0.3] {
        for &v in &[0.1, 0.37, 0.62, 0.9] {
            let base = texture.sample(u, v);
            assert_eq!(base, texture.sample(u + 1.0, v), "u = {u}, v = {v}");
            assert_eq!(base, texture.sample(u, v + 1.0), "u = {u}, v = {v}");
        }
    }
}

#[test]
fn engine_renders_cube_to_png() {
    let config = RenderConfig {
        width: 120,
        height: 90,
        ..RenderConfig::default()
    };
    let mut engine = Engine::from_config(&config).unwrap();
    engine.load_cube_mesh();
    engine.update(&InputState::default(), 0.3);
    let stats = engine.render();

    assert_eq!(stats.faces, 12);
    assert_eq!(stats.faces, stats.culled + stats.drawn);
    assert!(stats.pixels > 0);

    let path = std::env::temp_dir().join(format!("rastery-cube-{}.png", std::process::id()));
    engine.frame().save_png(&path).unwrap();
    let image = image::open(&path).unwrap().to_rgb8();
    let _ = std::fs::remove_file(&path);

    assert_eq!(image.dimensions(), (120, 90));
    assert_eq!(image.get_pixel(1, 1).0, config.background);
}

#[test]
fn mismatched_buffers_are_a_configuration_error() {
    let result = RenderTarget::from_buffers(
        FrameBuffer::new(100, 100, BACKGROUND),
        rastery::render::DepthBuffer::new(100, 50),
    );
    assert!(matches!(
        result,
        Err(rastery::render::TargetError::DimensionMismatch { .. })
    ));
}
