use crate::{
    render::{ColorMode, RenderAdapter},
    shape::{self, Mesh},
    Config, MotionModel, ScrollDirection,
};
use std::fmt;

/// Input understood by [`InteractionController`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    Subdivide,
    Decimate,
    Wheel { delta: f32 },
    PointerDown,
    PointerMove { dx: f32, dy: f32 },
    PointerUp,
    ColorChanged { red: u8, green: u8, blue: u8 },
}

/// Values shown next to the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeshStats {
    pub level: u32,
    pub triangles: usize,
}

impl MeshStats {
    pub fn subdivisions_label(&self) -> String {
        format!("Subdivisions: {}", self.level)
    }

    pub fn triangles_label(&self) -> String {
        format!("Triangles: {}", self.triangles)
    }
}

impl fmt::Display for MeshStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} | {}",
            self.subdivisions_label(),
            self.triangles_label()
        )
    }
}

/// An active pointer drag. Movement is only routed while one exists, and
/// dropping it ends the drag.
pub struct DragSession {
    moves: u32,
}

impl DragSession {
    fn begin() -> Self {
        log::debug!("Drag started");
        Self { moves: 0 }
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }
}

impl Drop for DragSession {
    fn drop(&mut self) {
        log::debug!("Drag released after {} moves", self.moves);
    }
}

/// Owns the session state and turns input events and frame ticks into mesh
/// and motion updates.
pub struct InteractionController {
    config: Config,
    level: u32,
    mesh: Mesh,
    motion: MotionModel,
    color: ColorMode,
    drag: Option<DragSession>,
    last_elapsed_ms: f32,
    mesh_dirty: bool,
    color_dirty: bool,
    vertex_count: u32,
}

impl InteractionController {
    pub fn new(config: Config) -> Self {
        let config = config.sanitize();
        let level = config.initial_level;
        let mesh = shape::generate_level(level);
        log::info!("Generated icosphere: level {}, {} triangles", level, mesh.triangle_count());
        Self {
            motion: MotionModel::new(&config),
            config,
            level,
            mesh,
            color: ColorMode::default(),
            drag: None,
            last_elapsed_ms: 0.0,
            mesh_dirty: true,
            color_dirty: true,
            vertex_count: 0,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn motion(&self) -> &MotionModel {
        &self.motion
    }

    pub fn color(&self) -> ColorMode {
        self.color
    }

    pub fn drag(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub fn stats(&self) -> MeshStats {
        MeshStats {
            level: self.level,
            triangles: shape::triangle_count(self.level),
        }
    }

    /// Vertex count reported by the adapter on the last upload.
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    fn set_level(&mut self, level: u32) {
        self.level = level;
        self.mesh = shape::generate_level(level);
        self.mesh_dirty = true;
        log::info!("Regenerated icosphere: {}", self.stats());
    }

    /// Applies one input event. Returns `false` if the event had no effect.
    pub fn handle(&mut self, event: Event) -> bool {
        match event {
            Event::Subdivide => {
                if self.level >= self.config.max_level {
                    return false;
                }
                self.set_level(self.level + 1);
            }
            Event::Decimate => {
                if self.level <= self.config.min_level {
                    return false;
                }
                self.set_level(self.level - 1);
            }
            Event::Wheel { delta } => match ScrollDirection::from_delta(delta) {
                Some(direction) => self.motion.scroll(direction),
                None => return false,
            },
            Event::PointerDown => {
                self.drag = Some(DragSession::begin());
            }
            Event::PointerMove { dx, dy } => {
                let drag = match self.drag {
                    Some(ref mut drag) => drag,
                    None => return false,
                };
                drag.moves += 1;
                self.motion.apply_impulse(dx, dy);
                if self.config.step_on_drag {
                    self.motion.tick(self.last_elapsed_ms);
                }
            }
            Event::PointerUp => {
                if self.drag.take().is_none() {
                    return false;
                }
            }
            Event::ColorChanged { red, green, blue } => {
                self.color = ColorMode::from_rgb8(red, green, blue);
                self.color_dirty = true;
                log::debug!("Color changed to {:?}", self.color);
            }
        }
        true
    }

    /// Advances the motion model. Called once per frame, with or without input.
    pub fn tick(&mut self, elapsed_ms: f32) {
        if elapsed_ms.is_finite() && elapsed_ms >= 0.0 {
            self.last_elapsed_ms = elapsed_ms;
        }
        self.motion.tick(elapsed_ms);
    }

    /// Pushes pending state to the adapter and draws.
    pub fn sync(&mut self, adapter: &mut impl RenderAdapter) {
        if self.mesh_dirty {
            self.vertex_count = adapter.upload_mesh(&self.mesh);
            self.mesh_dirty = false;
        }
        if self.color_dirty {
            adapter.set_color(self.color);
            self.color_dirty = false;
        }
        adapter.set_transform(self.motion.rotation().into());
        adapter.set_scale(self.motion.scale());
        adapter.draw_frame();
    }

    pub fn frame(&mut self, elapsed_ms: f32, adapter: &mut impl RenderAdapter) {
        self.tick(elapsed_ms);
        self.sync(adapter);
    }
}
