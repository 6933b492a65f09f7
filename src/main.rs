//! Shatter demo entry point
//!
//! Headless run of the two main uses: the cinematic ship destruction and an
//! asteroid collapsing into the black hole. Draw statistics are logged per
//! stage; run with `RUST_LOG=debug` to see every stage transition.
//!
//! Usage: `shatter-demo [profile.json] [low|medium|high]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Shatter demo starting...");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => match demo::load_config(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => shatter::DestructionConfig::cinematic(),
    };
    let quality = args
        .next()
        .and_then(|s| shatter::QualityPreset::from_str(&s))
        .unwrap_or(shatter::QualityPreset::High);

    demo::run_cinematic(config, quality);
    demo::run_asteroid();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the host game on the web; nothing to run here
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::sync::Arc;

    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use shatter::consts::{FRAME_DT, VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
    use shatter::renderer::recorder::DrawStats;
    use shatter::renderer::{GlowSprites, MeshSurface, RecordingSurface, colors};
    use shatter::sim::{
        DebrisField, ExplosionEvent, ExplosionSequencer, PolygonSilhouette, Silhouette, Stage, VortexSystem,
    };
    use shatter::{DestructionConfig, Image, QualityPreset, Rgba, Settings};

    fn viewport() -> Vec2 {
        Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT)
    }

    pub fn load_config(path: &str) -> Result<DestructionConfig, Box<dyn std::error::Error>> {
        let json = std::fs::read_to_string(path)?;
        Ok(DestructionConfig::from_json(&json)?)
    }

    /// Arrow-shaped hull, pointing right
    fn ship_hull() -> PolygonSilhouette {
        PolygonSilhouette::new(
            64,
            40,
            vec![
                Vec2::new(62.0, 20.0),
                Vec2::new(8.0, 2.0),
                Vec2::new(18.0, 20.0),
                Vec2::new(8.0, 38.0),
            ],
            Rgba::new(190, 200, 220, 255),
        )
    }

    fn lumpy_rock() -> PolygonSilhouette {
        PolygonSilhouette::new(
            72,
            64,
            vec![
                Vec2::new(36.0, 2.0),
                Vec2::new(60.0, 10.0),
                Vec2::new(70.0, 34.0),
                Vec2::new(56.0, 60.0),
                Vec2::new(24.0, 62.0),
                Vec2::new(4.0, 40.0),
                Vec2::new(10.0, 14.0),
            ],
            Rgba::new(150, 130, 110, 255),
        )
    }

    fn accumulate(total: &mut DrawStats, frame: DrawStats) {
        total.circles += frame.circles;
        total.polylines += frame.polylines;
        total.images += frame.images;
        total.overlays += frame.overlays;
    }

    fn report(stage: Stage, frames: u32, stats: DrawStats) {
        log::info!(
            "  {:<12} {:>4} frames | {:>6} circles {:>5} polylines {:>5} images {:>3} overlays",
            stage.as_str(),
            frames,
            stats.circles,
            stats.polylines,
            stats.images,
            stats.overlays
        );
    }

    pub fn run_cinematic(config: DestructionConfig, quality: QualityPreset) {
        let hull = ship_hull();
        let image = Arc::new(Image::from_silhouette(&hull));
        log::info!(
            "Cinematic: {}x{} hull, {} opaque pixels ({} texture bytes), quality {}",
            hull.width(),
            hull.height(),
            image.opaque_pixel_count(),
            image.as_bytes().len(),
            quality.as_str()
        );

        let mut seq = ExplosionSequencer::new(config, viewport())
            .with_settings(Settings::from_preset(quality))
            .with_resources(Arc::new(GlowSprites::default()));
        seq.start(image, viewport() * 0.5, 20.0);

        let mut recorder = RecordingSurface::new();
        let mut mesh = MeshSurface::new(viewport());
        let mut stage = seq.stage();
        let mut stage_frames = 0;
        let mut stage_stats = DrawStats::default();
        let mut peak_triangles = 0;
        let mut total_frames = 0u32;

        while !seq.is_done() {
            seq.update(FRAME_DT);
            total_frames += 1;

            for event in seq.drain_events() {
                match event {
                    ExplosionEvent::MiniExplosions { count, .. } => {
                        log::debug!("  mini explosions x{}", count)
                    }
                    ExplosionEvent::MainExplosion { pieces, .. } => {
                        log::info!("  BOOM: {} pieces", pieces)
                    }
                    ExplosionEvent::StageEntered(_) | ExplosionEvent::Finished => {}
                }
            }

            if seq.stage() != stage {
                report(stage, stage_frames, stage_stats);
                stage = seq.stage();
                stage_frames = 0;
                stage_stats = DrawStats::default();
            }

            recorder.clear();
            mesh.clear();
            seq.draw(&mut recorder);
            seq.draw(&mut mesh);
            accumulate(&mut stage_stats, recorder.stats());
            peak_triangles = peak_triangles.max(mesh.triangle_count());
            stage_frames += 1;
        }
        report(stage, stage_frames, stage_stats);
        log::info!(
            "Cinematic finished after {} frames (peak {} triangles per frame)",
            total_frames,
            peak_triangles
        );
    }

    pub fn run_asteroid() {
        let mut rng = Pcg32::from_rng(&mut rand::rng());
        let black_hole = viewport() * 0.5;
        let rock = lumpy_rock();
        let spawn = Vec2::new(180.0, 160.0);

        let mut field = DebrisField::shatter(&rock, spawn, 0.0, black_hole, &DestructionConfig::asteroid(), &mut rng)
            .with_tint([1.0, 0.85, 0.7, 1.0]);
        let mut vortex = VortexSystem::new(spawn, black_hole, colors::VORTEX, 60.0, &mut rng);
        log::info!("Asteroid: {} pieces heading for the black hole", field.len());

        let mut recorder = RecordingSurface::new();
        let mut frames = 0u32;
        while !field.is_empty() || !vortex.is_empty() {
            field.update(FRAME_DT);
            vortex.update(FRAME_DT);
            frames += 1;

            recorder.clear();
            field.draw(&mut recorder);
            vortex.draw(&mut recorder);
            if frames % 60 == 0 {
                let stats = recorder.stats();
                log::info!(
                    "  frame {:>4}: {} pieces drawn, {} vortex particles",
                    frames,
                    stats.images,
                    stats.circles
                );
            }
        }
        log::info!("Asteroid fully swallowed after {} frames", frames);
    }
}
