use scratch_mask::{BlendMode, BrushSampler, ImageRect, MaskBuffer, MaskTexture, TexelCoord};

const EPS: f32 = 1e-5;

fn grid(res: u32, brush: BrushSampler) -> MaskBuffer {
    MaskBuffer::new(res, brush).unwrap()
}

/// Small deterministic xorshift so property checks cover many strokes.
struct Rng32(u32);

impl Rng32 {
    fn next_u32(&mut self) -> u32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        x
    }

    fn range(&mut self, lo: i32, hi: i32) -> i32 {
        lo + (self.next_u32() % (hi - lo) as u32) as i32
    }
}

#[test]
fn full_opacity_brush_clears_the_stamp_box() {
    let mut m = grid(4, BrushSampler::constant(1.0));
    m.erase(TexelCoord::new(1, 1), 1);
    for y in 0..=2 {
        for x in 0..=2 {
            assert_eq!(m.texel(x, y), Some(0.0), "texel ({x},{y})");
        }
    }
    assert_eq!(m.texel(3, 3), Some(1.0));
    assert_eq!(m.texel(3, 0), Some(1.0));
    assert_eq!(m.texel(0, 3), Some(1.0));
}

#[test]
fn half_opacity_strokes_saturate_at_zero() {
    let mut m = grid(4, BrushSampler::constant(0.5));
    m.erase(TexelCoord::new(1, 1), 1);
    assert_eq!(m.texel(1, 1), Some(0.5));
    m.erase(TexelCoord::new(1, 1), 1);
    assert_eq!(m.texel(1, 1), Some(0.0));
    m.erase(TexelCoord::new(1, 1), 1);
    assert_eq!(m.texel(1, 1), Some(0.0));
}

#[test]
fn repeated_strokes_subtract_rather_than_multiply() {
    let mut m = grid(4, BrushSampler::constant(0.3));
    let expected = [0.7, 0.4, 0.1];
    for want in expected {
        m.erase(TexelCoord::new(1, 1), 1);
        let got = m.texel(1, 1).unwrap();
        assert!((got - want).abs() < EPS, "got {got}, want {want}");
    }
    assert!(m.texel(1, 1).unwrap() > 0.05);
}

#[test]
fn clipped_stamp_keeps_brush_anchored_to_requested_box() {
    // Brush alpha equals its u coordinate, scaled into [0.1, 0.9] so no sample hits the threshold.
    let brush = BrushSampler::from_fn(5, 5, |x, _| 0.1 + 0.2 * x as f32).unwrap();
    let mut m = grid(4, brush.clone());
    m.erase(TexelCoord::new(0, 0), 2);

    // Requested box is [-2, 2]²; texel (0,0) sits at its center: u = v = 0.5.
    let center = brush.sample(0.5, 0.5);
    assert!((m.texel(0, 0).unwrap() - (1.0 - center)).abs() < EPS);
    assert!((center - 0.5).abs() < EPS);

    // (2,0) sits on the far edge of the requested box: u = 1.0.
    assert!((m.texel(2, 0).unwrap() - (1.0 - brush.sample(1.0, 0.5))).abs() < EPS);
    // (3,*) and (*,3) are outside the box.
    assert_eq!(m.texel(3, 0), Some(1.0));
    assert_eq!(m.texel(0, 3), Some(1.0));
}

#[test]
fn stroke_entirely_outside_the_grid_changes_nothing() {
    let mut m = grid(8, BrushSampler::constant(1.0));
    for c in [
        TexelCoord::new(-10, 4),
        TexelCoord::new(20, 4),
        TexelCoord::new(4, -10),
        TexelCoord::new(4, 20),
        TexelCoord::new(-50, -50),
    ] {
        assert_eq!(m.erase(c, 3), 0);
    }
    assert!(m.snapshot().iter().all(|&r| r.to_bits() == 1.0f32.to_bits()));
}

#[test]
fn sub_threshold_brush_is_a_bit_exact_no_op() {
    // Opaque center, faint rim below 0.01.
    let brush = BrushSampler::from_fn(3, 3, |x, y| if x == 1 && y == 1 { 0.8 } else { 0.005 }).unwrap();
    let mut m = grid(16, brush);
    m.erase(TexelCoord::new(8, 8), 1); // 3x3 box maps 1:1 onto the brush pixels
    let touched: usize = m.snapshot().iter().filter(|&&r| r != 1.0).count();
    assert_eq!(touched, 1);
    assert!((m.texel(8, 8).unwrap() - 0.2).abs() < EPS);
    assert_eq!(m.texel(7, 8).unwrap().to_bits(), 1.0f32.to_bits());
}

#[test]
fn random_strokes_are_monotonic_and_bounded() {
    let mut rng = Rng32(0x5EED);
    let brush = BrushSampler::gaussian(6, 3.0).unwrap();
    let mut m = grid(32, brush);
    let mut prev = m.snapshot().to_vec();

    for _ in 0..300 {
        let c = TexelCoord::new(rng.range(-8, 40), rng.range(-8, 40));
        let r = rng.range(1, 10) as u32;
        m.erase(c, r);
        for (i, (&now, &before)) in m.snapshot().iter().zip(&prev).enumerate() {
            assert!((0.0..=1.0).contains(&now), "texel {i} out of bounds: {now}");
            assert!(now <= before, "texel {i} went up: {before} -> {now}");
        }
        prev.copy_from_slice(m.snapshot());
    }
}

#[test]
fn fully_erased_texels_stay_exactly_zero() {
    let mut m = grid(4, BrushSampler::constant(1.0));
    m.erase(TexelCoord::new(2, 2), 1);
    for _ in 0..5 {
        m.erase(TexelCoord::new(2, 2), 2);
        assert_eq!(m.texel(2, 2).unwrap().to_bits(), 0.0f32.to_bits());
    }
}

#[test]
fn cut_mode_is_binary() {
    let brush = BrushSampler::gaussian(4, 2.0).unwrap();
    let mut m = MaskBuffer::with_blend(16, brush, BlendMode::Cut).unwrap();
    m.erase(TexelCoord::new(8, 8), 4);
    assert!(m.snapshot().iter().all(|&r| r == 0.0 || r == 1.0));
    assert_eq!(m.texel(8, 8), Some(0.0));
}

#[test]
fn pointer_drag_to_texture_upload() {
    let rect = ImageRect::new(10.0, 10.0, 100.0, 100.0);
    let mut m = grid(64, BrushSampler::constant(1.0));
    let mut tex = MaskTexture::new(&m);
    tex.refresh(&mut m);

    // Off the image: no stroke, no upload.
    assert!(rect.texel_at(5.0, 50.0, m.resolution()).is_none());
    assert!(!tex.refresh(&mut m));

    let c = rect.texel_at(60.0, 60.0, m.resolution()).unwrap();
    assert_eq!(c, TexelCoord::new(32, 32));
    m.erase(c, 4);
    assert!(tex.refresh(&mut m));
    assert_eq!(tex.sample_nearest(0.5, 0.5), 0);
    assert_eq!(tex.sample_nearest(0.0, 0.0), 255);
}
