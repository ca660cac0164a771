//! GPU 画布：把渲染器产出的整帧像素作为纹理，在单个 [`egui::PaintCallback`]
//! 里用原生 OpenGL 画满画布，绕开 egui 的逐形状细分路径。

use std::sync::{Arc, Mutex, PoisonError};

use glow::HasContext as _;

// ─── Shader sources ─────────────────────────────────────────────────────

const VERT_SRC: &str = r#"#version 140

in vec2 a_pos;
out vec2 v_uv;

void main() {
    // NDC [-1, 1] -> UV [0, 1]，y=0 在屏幕顶部
    v_uv = vec2(a_pos.x * 0.5 + 0.5, 0.5 - a_pos.y * 0.5);
    gl_Position = vec4(a_pos, 0.0, 1.0);
}
"#;

const FRAG_SRC: &str = r#"#version 140

in vec2 v_uv;
out vec4 frag_color;

uniform float u_has_frame;        // 1.0 = 已有帧
uniform vec3 u_background;        // 尚无帧时的底色
uniform sampler2D u_frame_tex;    // texture unit 0

void main() {
    if (u_has_frame > 0.5) {
        frag_color = vec4(texture(u_frame_tex, v_uv).rgb, 1.0);
    } else {
        frag_color = vec4(u_background, 1.0);
    }
}
"#;

// ─── GL resource bundle ─────────────────────────────────────────────────

struct GlResources {
    program: glow::Program,
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    frame_tex: glow::Texture,
    loc_has_frame: Option<glow::UniformLocation>,
    loc_background: Option<glow::UniformLocation>,
    loc_frame_tex: Option<glow::UniformLocation>,
}

struct PendingTexture {
    rgba: Vec<u8>,
    width: u32,
    height: u32,
}

// ─── Shared state ───────────────────────────────────────────────────────

/// 应用逻辑（提交帧）与 paint callback（上传并绘制）之间共享的状态。
#[derive(Default)]
pub struct GlSurfaceState {
    resources: Option<GlResources>,
    pending: Option<PendingTexture>,
    dirty: bool,
    has_frame: bool,
}

impl GlSurfaceState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 存入新一帧的 RGBA 像素，下次绘制时上传
    pub fn set_frame_pixels(&mut self, rgba: Vec<u8>, width: u32, height: u32) {
        self.pending = Some(PendingTexture { rgba, width, height });
        self.dirty = true;
        self.has_frame = width > 0 && height > 0;
    }

    pub fn has_frame(&self) -> bool {
        self.has_frame
    }

    /// 释放 GL 资源，调用时 GL context 必须为当前
    pub fn destroy(&mut self, gl: &glow::Context) {
        if let Some(res) = self.resources.take() {
            unsafe {
                gl.delete_program(res.program);
                gl.delete_vertex_array(res.vao);
                gl.delete_buffer(res.vbo);
                gl.delete_texture(res.frame_tex);
            }
        }
    }
}

// ─── GL helpers ─────────────────────────────────────────────────────────

fn compile_shader(gl: &glow::Context, kind: u32, source: &str) -> Result<glow::Shader, String> {
    unsafe {
        let shader = gl.create_shader(kind)?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
        if !gl.get_shader_compile_status(shader) {
            let info = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(format!("着色器编译失败: {info}"));
        }
        Ok(shader)
    }
}

fn init_resources(gl: &glow::Context) -> Result<GlResources, String> {
    unsafe {
        let vert = compile_shader(gl, glow::VERTEX_SHADER, VERT_SRC)?;
        let frag = compile_shader(gl, glow::FRAGMENT_SHADER, FRAG_SRC)?;

        let program = gl.create_program()?;
        gl.attach_shader(program, vert);
        gl.attach_shader(program, frag);
        gl.link_program(program);
        if !gl.get_program_link_status(program) {
            return Err(format!("着色器链接失败: {}", gl.get_program_info_log(program)));
        }
        gl.detach_shader(program, vert);
        gl.detach_shader(program, frag);
        gl.delete_shader(vert);
        gl.delete_shader(frag);

        // fullscreen quad (triangle strip)
        let vertices: [f32; 8] = [-1.0, -1.0, 1.0, -1.0, -1.0, 1.0, 1.0, 1.0];
        let vertex_bytes: Vec<u8> = vertices.iter().flat_map(|v| v.to_ne_bytes()).collect();
        let vbo = gl.create_buffer()?;
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, &vertex_bytes, glow::STATIC_DRAW);

        let vao = gl.create_vertex_array()?;
        gl.bind_vertex_array(Some(vao));
        let a_pos = gl
            .get_attrib_location(program, "a_pos")
            .ok_or_else(|| "找不到 a_pos 属性".to_string())?;
        gl.enable_vertex_attrib_array(a_pos);
        gl.vertex_attrib_pointer_f32(a_pos, 2, glow::FLOAT, false, 8, 0);
        gl.bind_vertex_array(None);
        gl.bind_buffer(glow::ARRAY_BUFFER, None);

        let frame_tex = gl.create_texture()?;
        gl.bind_texture(glow::TEXTURE_2D, Some(frame_tex));
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::NEAREST as i32);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::NEAREST as i32);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::CLAMP_TO_EDGE as i32);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::CLAMP_TO_EDGE as i32);
        gl.bind_texture(glow::TEXTURE_2D, None);

        Ok(GlResources {
            program,
            vao,
            vbo,
            frame_tex,
            loc_has_frame: gl.get_uniform_location(program, "u_has_frame"),
            loc_background: gl.get_uniform_location(program, "u_background"),
            loc_frame_tex: gl.get_uniform_location(program, "u_frame_tex"),
        })
    }
}

fn upload_texture(gl: &glow::Context, tex: glow::Texture, data: &PendingTexture) {
    unsafe {
        gl.bind_texture(glow::TEXTURE_2D, Some(tex));
        gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
        gl.tex_image_2d(
            glow::TEXTURE_2D,
            0,
            glow::RGBA as i32,
            data.width as i32,
            data.height as i32,
            0,
            glow::RGBA,
            glow::UNSIGNED_BYTE,
            Some(&data.rgba),
        );
        gl.bind_texture(glow::TEXTURE_2D, None);
    }
}

// ─── Public API ─────────────────────────────────────────────────────────

/// 构建把当前帧画满 `rect` 的 paint callback。
pub fn make_surface_callback(
    state: Arc<Mutex<GlSurfaceState>>,
    rect: egui::Rect,
    background: egui::Color32,
) -> egui::PaintCallback {
    let bg = [
        background.r() as f32 / 255.0,
        background.g() as f32 / 255.0,
        background.b() as f32 / 255.0,
    ];

    let cb = egui_glow::CallbackFn::new(move |_info, painter| {
        let gl = painter.gl();
        let mut st = state.lock().unwrap_or_else(PoisonError::into_inner);

        if st.resources.is_none() {
            match init_resources(gl) {
                Ok(res) => st.resources = Some(res),
                Err(err) => {
                    log::error!("GL 画布初始化失败: {err}");
                    return;
                }
            }
        }
        let Some(res) = st.resources.as_ref() else {
            return;
        };
        let program = res.program;
        let vao = res.vao;
        let frame_tex = res.frame_tex;
        let loc_has_frame = res.loc_has_frame.clone();
        let loc_background = res.loc_background.clone();
        let loc_frame_tex = res.loc_frame_tex.clone();

        if st.dirty {
            if let Some(data) = &st.pending {
                upload_texture(gl, frame_tex, data);
            }
            st.dirty = false;
        }

        unsafe {
            gl.disable(glow::SCISSOR_TEST);
            gl.disable(glow::BLEND);
            gl.use_program(Some(program));

            gl.uniform_1_f32(loc_has_frame.as_ref(), if st.has_frame { 1.0 } else { 0.0 });
            gl.uniform_3_f32(loc_background.as_ref(), bg[0], bg[1], bg[2]);

            gl.active_texture(glow::TEXTURE0);
            gl.bind_texture(glow::TEXTURE_2D, Some(frame_tex));
            gl.uniform_1_i32(loc_frame_tex.as_ref(), 0);

            gl.bind_vertex_array(Some(vao));
            gl.draw_arrays(glow::TRIANGLE_STRIP, 0, 4);
            gl.bind_vertex_array(None);

            gl.bind_texture(glow::TEXTURE_2D, None);
            gl.use_program(None);
        }
    });

    egui::PaintCallback {
        rect,
        callback: Arc::new(cb),
    }
}
