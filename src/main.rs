// Scratch-off card demo.
// What you SEE:
// • A foil cover (or your `cover` image) sits over a hidden picture.
// • Hold Left Mouse and drag: the foil wears away under the brush.
// • Passing over the same spot again scratches deeper.
// • C starts a fresh card. ESC quits.
//
// Usage: scratch-mask [config.toml]

mod composite;
mod draw;
mod gamma;

use std::path::Path;
use std::time::{Duration, Instant};

use log::info;
use scratch_mask::types::FrameBuffer;
use scratch_mask::{BlendMode, BrushSampler, Config, Error, ImageRect, MaskBuffer, MaskTexture};

use composite::{checker, composite_masked, foil, frame_from_image};
use draw::{draw_circle, draw_crosshair, draw_text_5x7, Drawer};
use gamma::GammaLut;

const BACKGROUND: u32 = 0x00_20_20_28;
const MARGIN: usize = 24;

fn load_layer(path: Option<&Path>, w: usize, h: usize, fallback: impl FnOnce() -> FrameBuffer) -> Result<FrameBuffer, Error> {
    match path {
        Some(p) => {
            let img = image::open(p).map_err(|source| Error::ImageDecode { path: p.to_path_buf(), source })?;
            Ok(frame_from_image(&img, w, h))
        }
        None => Ok(fallback()),
    }
}

fn new_card(cfg: &Config, brush: &BrushSampler) -> Result<(MaskBuffer, MaskTexture), Error> {
    let mask = MaskBuffer::with_blend(cfg.resolution, brush.clone(), cfg.blend)?;
    let tex = MaskTexture::new(&mask);
    Ok((mask, tex))
}

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    /* --- Config ---
       Defaults unless a TOML path is given. */
    let cfg = match std::env::args().nth(1) {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    cfg.validate()?;

    /* --- Brush ---
       Soft round brush unless an image is configured. */
    let brush = match &cfg.brush {
        Some(path) => BrushSampler::open(path)?,
        None => BrushSampler::gaussian(32, 14.0)?,
    };

    /* --- Layout ---
       Square card centered in the window; the mask is square too. */
    let (win_w, win_h) = (cfg.window_width, cfg.window_height);
    let side = win_w.min(win_h).saturating_sub(2 * MARGIN).max(1);
    let rect = ImageRect::new(
        (win_w.saturating_sub(side) / 2) as f32,
        (win_h.saturating_sub(side) / 2) as f32,
        side as f32,
        side as f32,
    );
    let brush_px = (cfg.erase_radius as f32 * side as f32 / cfg.resolution as f32).round() as i32;

    let cover = load_layer(cfg.cover.as_deref(), side, side, || foil(side, side))?;
    let reveal = load_layer(cfg.reveal.as_deref(), side, side, || checker(side, side, side / 8))?;

    let mut drawer = Drawer::new("Scratch Mask", win_w, win_h)?;
    let mut screen = FrameBuffer::new(win_w, win_h);
    let lut = GammaLut::new();
    let (mut mask, mut tex) = new_card(&cfg, &brush)?;
    info!("card {side}x{side} px, mask {0}x{0}, radius {1} texels", cfg.resolution, cfg.erase_radius);

    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut hud_fps_text = String::from("FPS: 0.0");

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let now = Instant::now();

        if drawer.c_pressed_once() {
            (mask, tex) = new_card(&cfg, &brush)?; // visual: the foil is back
        }

        // One stroke per frame while the button is held over the card.
        let cursor = drawer.mouse_pos();
        if drawer.left_mouse_down() {
            if let Some(center) = cursor.and_then(|(mx, my)| rect.texel_at(mx, my, mask.resolution())) {
                mask.erase(center, cfg.erase_radius);
            }
        }

        // Upload only when the grid changed; compositing reads the R8 copy.
        tex.refresh(&mut mask);

        screen.pixels.fill(BACKGROUND);
        composite_masked(&mut screen, &rect, &cover, &reveal, &tex, &lut)?;

        if let Some((mx, my)) = cursor {
            if rect.contains(mx, my) {
                draw_circle(&mut screen, mx as i32, my as i32, brush_px, 0x00_FF_FF_FF);
                draw_crosshair(&mut screen, mx as i32, my as i32, 6, 0x00_FF_CC_33);
            }
        }

        let mode = match cfg.blend {
            BlendMode::Subtract => "SUBTRACT",
            BlendMode::Cut => "CUT",
        };
        let hud = format!(
            "REVEALED {:.1}% | {} | C: RESET | {}",
            mask.erased_fraction() * 100.0,
            mode,
            hud_fps_text
        );
        draw_text_5x7(&mut screen, 8, 8, &hud, 0x00_FF_FF_FF);

        drawer.present(&screen)?;

        frames_this_second += 1;
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            let fps = frames_this_second as f32 / secs;
            log::debug!("FPS: {fps:.1}");
            hud_fps_text = format!("FPS: {fps:.1}");
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    info!("closed with {:.1}% revealed", mask.erased_fraction() * 100.0);
    Ok(())
}
