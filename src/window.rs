//! SDL2 presentation layer for the interactive demo.
//!
//! Only compiled with the `window` feature. The renderer never touches SDL;
//! this module turns SDL events into an [`InputState`] plus a few commands
//! and copies finished ARGB8888 frames to the screen.

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::WindowContext;

use crate::input::InputState;

/// Commands produced by the event pump, besides movement input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    None,
    Quit,
    /// Tab: points -> wireframe -> shaded.
    CycleRenderMode,
    /// C: cycle the culling rule.
    CycleCullMode,
    /// X: show or hide the axes overlay.
    ToggleAxes,
}

pub struct FrameLimiter {
    previous_frame_time: u64,
    frame_target_ms: u64,
}

impl FrameLimiter {
    pub fn new(window: &Window, target_fps: u32) -> Self {
        Self {
            previous_frame_time: window.timer().ticks64(),
            frame_target_ms: 1000 / u64::from(target_fps.max(1)),
        }
    }

    /// Waits if necessary to maintain frame rate and returns the delta time in milliseconds.
    pub fn wait_and_get_delta(&mut self, window: &Window) -> u64 {
        let mut current_time = window.timer().ticks64();
        let mut delta_time = current_time - self.previous_frame_time;

        if delta_time < self.frame_target_ms {
            let time_to_wait = self.frame_target_ms - delta_time;
            std::thread::sleep(std::time::Duration::from_millis(time_to_wait));
            current_time = window.timer().ticks64();
            delta_time = current_time - self.previous_frame_time;
        }

        self.previous_frame_time = current_time;
        delta_time
    }
}

/// Averages frame times over roughly half a second.
#[derive(Debug, Default)]
pub struct FpsCounter {
    frames: u32,
    elapsed_ms: u64,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one frame. Returns the average rate once enough time has passed.
    pub fn tick(&mut self, delta_ms: u64) -> Option<f32> {
        self.frames += 1;
        self.elapsed_ms += delta_ms;
        if self.elapsed_ms < 500 {
            return None;
        }
        let fps = self.frames as f32 * 1000.0 / self.elapsed_ms as f32;
        self.frames = 0;
        self.elapsed_ms = 0;
        Some(fps)
    }
}

pub struct Window {
    // Declared first so it is dropped before the creator it borrows from.
    texture: Texture<'static>,
    canvas: Canvas<sdl2::video::Window>,
    texture_creator: Box<TextureCreator<WindowContext>>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    input: InputState,
    /// Size of the frames handed to `present`, not of the window.
    width: u32,
    height: u32,
}

impl Window {
    /// Open a window `scale` times the size of a `width` x `height` frame.
    pub fn new(title: &str, width: u32, height: u32, scale: u32) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;
        let timer_subsystem = sdl_context.timer()?;

        let window = video_subsystem
            .window(title, width * scale, height * scale)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump()?;
        let texture = streaming_texture(&texture_creator, width, height)?;

        log::info!("opened {}x{} window (x{} scale)", width, height, scale);

        Ok(Self {
            texture,
            canvas,
            texture_creator,
            event_pump,
            timer_subsystem,
            input: InputState::default(),
            width,
            height,
        })
    }

    /// Drain pending events into the input state. Returns the first
    /// command seen this frame, if any.
    pub fn poll_events(&mut self) -> WindowEvent {
        let mut command = WindowEvent::None;
        for event in self.event_pump.poll_iter() {
            let next = match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => WindowEvent::Quit,
                Event::KeyDown {
                    keycode: Some(key),
                    repeat: false,
                    ..
                } => match key {
                    Keycode::Tab => WindowEvent::CycleRenderMode,
                    Keycode::C => WindowEvent::CycleCullMode,
                    Keycode::X => WindowEvent::ToggleAxes,
                    _ => {
                        set_key(&mut self.input, key, true);
                        WindowEvent::None
                    }
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    set_key(&mut self.input, key, false);
                    WindowEvent::None
                }
                Event::MouseButtonDown {
                    mouse_btn: MouseButton::Left,
                    ..
                } => {
                    self.input.looking = true;
                    WindowEvent::None
                }
                Event::MouseButtonUp {
                    mouse_btn: MouseButton::Left,
                    ..
                } => {
                    self.input.looking = false;
                    WindowEvent::None
                }
                Event::MouseMotion { xrel, yrel, .. } => {
                    self.input.mouse_delta.0 += xrel;
                    self.input.mouse_delta.1 += yrel;
                    WindowEvent::None
                }
                _ => WindowEvent::None,
            };
            if command == WindowEvent::None || next == WindowEvent::Quit {
                command = next;
            }
        }
        command
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Forget this frame's mouse movement.
    pub fn end_frame(&mut self) {
        self.input.end_frame();
    }

    /// Show a `width` x `height` ARGB8888 frame, stretched to the window.
    ///
    /// The streaming texture is reused between frames and only recreated
    /// when the frame size changes.
    pub fn present(&mut self, buffer: &[u8], width: u32, height: u32) -> Result<(), String> {
        let pitch = frame_pitch(buffer, width, height)?;
        if (width, height) != (self.width, self.height) {
            self.texture = streaming_texture(&self.texture_creator, width, height)?;
            self.width = width;
            self.height = height;
            log::debug!("frame texture resized to {}x{}", width, height);
        }
        self.texture
            .update(None, buffer, pitch)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas.copy(&self.texture, None, None)?;
        self.canvas.present();
        Ok(())
    }

    pub fn set_title(&mut self, title: &str) -> Result<(), String> {
        self.canvas
            .window_mut()
            .set_title(title)
            .map_err(|e| e.to_string())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn timer(&self) -> &sdl2::TimerSubsystem {
        &self.timer_subsystem
    }
}

fn streaming_texture(
    creator: &TextureCreator<WindowContext>,
    width: u32,
    height: u32,
) -> Result<Texture<'static>, String> {
    // SAFETY: the creator is boxed, so its address is stable, and `Window`
    // drops `texture` before `texture_creator`. The texture never outlives it.
    let creator: &'static TextureCreator<WindowContext> = unsafe { &*(creator as *const _) };
    creator
        .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
        .map_err(|e| e.to_string())
}

/// Row pitch in bytes for an ARGB8888 frame, or an error if `buffer` does
/// not hold exactly `width * height` pixels.
fn frame_pitch(buffer: &[u8], width: u32, height: u32) -> Result<usize, String> {
    let pitch = width as usize * 4;
    let expected = pitch * height as usize;
    if buffer.len() != expected {
        return Err(format!(
            "frame is {} bytes, expected {} for {}x{}",
            buffer.len(),
            expected,
            width,
            height
        ));
    }
    Ok(pitch)
}

fn set_key(input: &mut InputState, key: Keycode, pressed: bool) {
    match key {
        Keycode::W => input.forward = pressed,
        Keycode::S => input.back = pressed,
        Keycode::A => input.left = pressed,
        Keycode::D => input.right = pressed,
        Keycode::Space => input.up = pressed,
        Keycode::LShift => input.down = pressed,
        _ => {}
    }
}
