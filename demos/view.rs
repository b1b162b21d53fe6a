#![allow(irrefutable_let_patterns)]

use blade_graphics as gpu;
use blade_icosphere as ico;

const PALETTE: [[u8; 3]; 4] = [[0, 0, 255], [255, 96, 32], [64, 200, 120], [240, 240, 240]];

/// Interactive icosphere viewer.
///
/// S subdivides, D decimates, C cycles colors, drag rotates, wheel scales.
#[derive(argh::FromArgs)]
struct Args {
    /// initial subdivision level
    #[argh(option, default = "2")]
    level: u32,
    /// initial scale
    #[argh(option, default = "1.0")]
    scale: f32,
    /// let the spin oscillate around zero instead of settling
    #[argh(switch)]
    wobble: bool,
    /// cull front faces instead of back faces
    #[argh(switch)]
    cull_front: bool,
}

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Zeroable, bytemuck::Pod)]
pub struct Parameters {
    model: [[f32; 4]; 4],
    view_proj: [[f32; 4]; 4],
    color: [f32; 3],
    scale: f32,
    light_pos: [f32; 3],
    use_custom_color: u32,
    light_color: [f32; 3],
    pad: u32,
}

#[derive(blade_macros::ShaderData)]
struct DrawData {
    g_parameters: Parameters,
    g_vertices: gpu::BufferPiece,
}

struct Renderer {
    camera: ico::Camera,
    model: glam::Mat4,
    scale: f32,
    color: ico::ColorMode,
    light_pos: [f32; 3],
    light_color: [f32; 3],
    draw_pipeline: gpu::RenderPipeline,
    command_encoder: gpu::CommandEncoder,
    prev_sync_point: Option<gpu::SyncPoint>,
    window_size: winit::dpi::PhysicalSize<u32>,
    mesh: Option<ico::MeshBuffer>,
    surface: gpu::Surface,
    context: gpu::Context,
}

impl Renderer {
    fn make_surface_config(size: winit::dpi::PhysicalSize<u32>) -> gpu::SurfaceConfig {
        log::info!("Window size: {:?}", size);
        gpu::SurfaceConfig {
            size: gpu::Extent {
                width: size.width,
                height: size.height,
                depth: 1,
            },
            usage: gpu::TextureUsage::TARGET,
            display_sync: gpu::DisplaySync::Recent,
            ..Default::default()
        }
    }

    fn init(
        window: &winit::window::Window,
        config: &ico::Config,
        cull_face: gpu::Face,
    ) -> Result<Self, ico::InitError> {
        let context = unsafe {
            gpu::Context::init(gpu::ContextDesc {
                presentation: true,
                validation: cfg!(debug_assertions),
                timing: false,
                capture: false,
                overlay: false,
                device_id: 0,
            })
        }
        .map_err(|e| ico::InitError::Context(format!("{:?}", e)))?;
        log::info!("{:?}", context.device_information());
        let window_size = window.inner_size();

        let surface = context
            .create_surface_configured(window, Self::make_surface_config(window_size))
            .map_err(|e| ico::InitError::Surface(format!("{:?}", e)))?;
        let info = surface.info();

        let shader = {
            let source = std::fs::read_to_string("demos/shader.wgsl")?;
            context.create_shader(gpu::ShaderDesc { source: &source })
        };
        let draw_layout = <DrawData as gpu::ShaderData>::layout();
        let draw_pipeline = context.create_render_pipeline(gpu::RenderPipelineDesc {
            name: "icosphere",
            data_layouts: &[&draw_layout],
            primitive: gpu::PrimitiveState {
                topology: gpu::PrimitiveTopology::TriangleList,
                front_face: gpu::FrontFace::Ccw,
                cull_mode: Some(cull_face),
                ..Default::default()
            },
            vertex: shader.at("draw_vs"),
            vertex_fetches: &[],
            fragment: Some(shader.at("draw_fs")),
            color_targets: &[info.format.into()],
            depth_stencil: None,
            multisample_state: Default::default(),
        });

        let command_encoder = context.create_command_encoder(gpu::CommandEncoderDesc {
            name: "main",
            buffer_count: 2,
        });

        Ok(Self {
            camera: ico::Camera::default(),
            model: glam::Mat4::IDENTITY,
            scale: config.initial_scale,
            color: ico::ColorMode::default(),
            light_pos: config.light_position,
            light_color: config.light_color,
            draw_pipeline,
            command_encoder,
            prev_sync_point: None,
            window_size,
            mesh: None,
            surface,
            context,
        })
    }

    fn deinit(&mut self) {
        self.wait_for_gpu();
        if let Some(mut mesh) = self.mesh.take() {
            mesh.deinit(&self.context);
        }
        self.context
            .destroy_render_pipeline(&mut self.draw_pipeline);
        self.context
            .destroy_command_encoder(&mut self.command_encoder);
        self.context.destroy_surface(&mut self.surface);
    }

    fn resize(&mut self, size: winit::dpi::PhysicalSize<u32>) {
        self.window_size = size;
        let config = Self::make_surface_config(size);
        self.context.reconfigure_surface(&mut self.surface, config);
    }

    fn wait_for_gpu(&mut self) {
        if let Some(sp) = self.prev_sync_point.take() {
            self.context.wait_for(&sp, !0);
        }
    }

    fn parameters(&self, aspect: f32) -> Parameters {
        let (color, use_custom_color) = match self.color {
            ico::ColorMode::Rainbow => ([0.0; 3], 0),
            ico::ColorMode::Custom(color) => (color, 1),
        };
        Parameters {
            model: self.model.to_cols_array_2d(),
            view_proj: self
                .camera
                .get_view_projection_matrix(aspect)
                .to_cols_array_2d(),
            color,
            scale: self.scale,
            light_pos: self.light_pos,
            use_custom_color,
            light_color: self.light_color,
            pad: 0,
        }
    }
}

impl ico::RenderAdapter for Renderer {
    fn upload_mesh(&mut self, mesh: &ico::Mesh) -> u32 {
        self.wait_for_gpu();
        if let Some(mut old) = self.mesh.take() {
            old.deinit(&self.context);
        }
        let buffer = ico::MeshBuffer::new(mesh, &self.context, &mut self.command_encoder);
        let vertex_count = buffer.vertex_count;
        self.mesh = Some(buffer);
        vertex_count
    }

    fn set_transform(&mut self, transform: mint::ColumnMatrix4<f32>) {
        self.model = transform.into();
    }

    fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    fn set_color(&mut self, color: ico::ColorMode) {
        self.color = color;
    }

    fn draw_frame(&mut self) {
        if self.window_size == Default::default() {
            return;
        }
        let (vertex_buf, vertex_count) = match self.mesh {
            Some(ref mesh) => (mesh.vertex_buf, mesh.vertex_count),
            None => return,
        };
        let aspect = self.window_size.width as f32 / self.window_size.height as f32;
        let parameters = self.parameters(aspect);
        let frame = self.surface.acquire_frame();

        self.command_encoder.start();
        self.command_encoder.init_texture(frame.texture());

        if let mut pass = self.command_encoder.render(
            "main",
            gpu::RenderTargetSet {
                colors: &[gpu::RenderTarget {
                    view: frame.texture_view(),
                    init_op: gpu::InitOp::Clear(gpu::TextureColor::OpaqueBlack),
                    finish_op: gpu::FinishOp::Store,
                }],
                depth_stencil: None,
            },
        ) {
            let mut pen = pass.with(&self.draw_pipeline);
            pen.bind(
                0,
                &DrawData {
                    g_parameters: parameters,
                    g_vertices: vertex_buf.into(),
                },
            );
            pen.draw(0, vertex_count, 0, 1);
        }
        self.command_encoder.present(frame);
        let sync_point = self.context.submit(&mut self.command_encoder);

        self.wait_for_gpu();
        self.prev_sync_point = Some(sync_point);
    }
}

fn update_title(window: &winit::window::Window, stats: ico::MeshStats) {
    window.set_title(&format!("blade-icosphere | {}", stats));
}

fn main() {
    env_logger::init();
    let args: Args = argh::from_env();

    let config = ico::Config {
        initial_level: args.level,
        initial_scale: args.scale,
        decay_mode: if args.wobble {
            ico::DecayMode::Wobble
        } else {
            ico::DecayMode::Settle
        },
        ..Default::default()
    };
    let cull_face = if args.cull_front {
        gpu::Face::Front
    } else {
        gpu::Face::Back
    };

    let event_loop = winit::event_loop::EventLoop::new().unwrap();
    let window_attributes =
        winit::window::Window::default_attributes().with_title("blade-icosphere");
    let window = event_loop.create_window(window_attributes).unwrap();

    let mut controller = ico::InteractionController::new(config);
    let mut renderer = match Renderer::init(&window, controller.config(), cull_face) {
        Ok(renderer) => renderer,
        Err(e) => {
            log::error!("Unable to start: {}", e);
            eprintln!("Unable to start: {}", e);
            std::process::exit(1);
        }
    };
    update_title(&window, controller.stats());

    let mut clock = ico::FrameClock::new();
    let mut palette_index = 0;

    event_loop
        .run(|event, target| {
            target.set_control_flow(winit::event_loop::ControlFlow::Poll);
            match event {
                winit::event::Event::AboutToWait => {
                    window.request_redraw();
                }
                winit::event::Event::DeviceEvent {
                    event: winit::event::DeviceEvent::MouseMotion { delta: (dx, dy) },
                    ..
                } => {
                    controller.handle(ico::Event::PointerMove {
                        dx: dx as f32,
                        dy: dy as f32,
                    });
                }
                winit::event::Event::WindowEvent { event, .. } => match event {
                    winit::event::WindowEvent::Resized(size) => {
                        renderer.resize(size);
                    }
                    winit::event::WindowEvent::KeyboardInput {
                        event:
                            winit::event::KeyEvent {
                                physical_key: winit::keyboard::PhysicalKey::Code(key_code),
                                state: winit::event::ElementState::Pressed,
                                ..
                            },
                        ..
                    } => {
                        use winit::keyboard::KeyCode as Kc;

                        let event = match key_code {
                            Kc::Escape => {
                                target.exit();
                                return;
                            }
                            Kc::KeyS => ico::Event::Subdivide,
                            Kc::KeyD => ico::Event::Decimate,
                            Kc::KeyC => {
                                let [red, green, blue] = PALETTE[palette_index];
                                palette_index = (palette_index + 1) % PALETTE.len();
                                ico::Event::ColorChanged { red, green, blue }
                            }
                            _ => return,
                        };
                        if controller.handle(event) {
                            update_title(&window, controller.stats());
                        }
                    }
                    winit::event::WindowEvent::MouseWheel { delta, .. } => {
                        let delta = match delta {
                            winit::event::MouseScrollDelta::LineDelta(_, lines) => lines,
                            winit::event::MouseScrollDelta::PixelDelta(position) => {
                                position.y as f32
                            }
                        };
                        controller.handle(ico::Event::Wheel { delta });
                    }
                    winit::event::WindowEvent::MouseInput {
                        state,
                        button: winit::event::MouseButton::Left,
                        ..
                    } => {
                        controller.handle(match state {
                            winit::event::ElementState::Pressed => ico::Event::PointerDown,
                            winit::event::ElementState::Released => ico::Event::PointerUp,
                        });
                    }
                    winit::event::WindowEvent::Focused(false) => {
                        controller.handle(ico::Event::PointerUp);
                    }
                    winit::event::WindowEvent::CloseRequested => {
                        target.exit();
                    }
                    winit::event::WindowEvent::RedrawRequested => {
                        controller.frame(clock.frame(), &mut renderer);
                    }
                    _ => {}
                },
                _ => {}
            }
        })
        .unwrap();

    renderer.deinit();
}
