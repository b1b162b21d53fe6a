use blade_graphics as gpu;

use std::{mem, ptr};

/// Device-local copy of a [`crate::Mesh`], three `f32` positions per vertex.
pub struct MeshBuffer {
    pub vertex_buf: gpu::Buffer,
    pub vertex_count: u32,
}

impl MeshBuffer {
    pub fn new(
        mesh: &crate::Mesh,
        context: &gpu::Context,
        encoder: &mut gpu::CommandEncoder,
    ) -> Self {
        let vertex_data = mesh.vertex_data();
        let vertex_count = mesh.vertex_count() as u32;
        // zero-sized buffers are not allowed
        let data_size = (vertex_data.len() * mem::size_of::<f32>()).max(4) as u64;

        let vertex_buf = context.create_buffer(gpu::BufferDesc {
            name: "icosphere-vertices",
            size: data_size,
            memory: gpu::Memory::Device,
        });
        let stage = context.create_buffer(gpu::BufferDesc {
            name: "icosphere-vertices-stage",
            size: data_size,
            memory: gpu::Memory::Upload,
        });
        unsafe {
            ptr::copy_nonoverlapping(
                vertex_data.as_ptr(),
                stage.data() as *mut f32,
                vertex_data.len(),
            );
        }

        encoder.start();
        if let mut pass = encoder.transfer("upload mesh") {
            pass.copy_buffer_to_buffer(stage.at(0), vertex_buf.at(0), data_size);
        }
        let sync_point = context.submit(encoder);
        context.wait_for(&sync_point, !0);
        context.destroy_buffer(stage);

        log::info!(
            "Uploaded {} vertices ({} bytes)",
            vertex_count,
            data_size
        );
        Self {
            vertex_buf,
            vertex_count,
        }
    }

    pub fn deinit(&mut self, context: &gpu::Context) {
        context.destroy_buffer(self.vertex_buf);
    }
}
