mod ansi;
mod rgb;

pub use ansi::render_ansi;
pub use rgb::render_rgb;

use crate::{FrozenLake, Result};
use image::RgbImage;
use ndarray::Array3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Write};
use std::thread;
use std::time::{Duration, Instant};

/// Frame rate `Human` mode is paced at unless told otherwise.
pub const HUMAN_RENDER_FPS: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    Human,
    Ansi,
    RgbArray,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderFrame {
    Ansi(String),
    /// `height x width x 3` pixels.
    Rgb(Array3<u8>),
}

impl RenderFrame {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RenderFrame::Ansi(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_rgb(&self) -> Option<&Array3<u8>> {
        match self {
            RenderFrame::Rgb(pixels) => Some(pixels),
            _ => None,
        }
    }

    pub fn to_image(&self) -> Option<RgbImage> {
        let pixels = self.as_rgb()?;
        let (h, w, _) = pixels.dim();
        RgbImage::from_raw(w as u32, h as u32, pixels.iter().copied().collect())
    }
}

/// Draws a lake without touching its simulation state.
///
/// `Human` mode writes to a terminal, acquired on first use and released by
/// [`Renderer::close`] or on drop. Its frames are paced at `fps`.
pub struct Renderer {
    mode: RenderMode,
    sink: Option<Box<dyn Write>>,
    fps: Option<u32>,
    last_frame: Option<Instant>,
}

impl Renderer {
    pub fn new(mode: RenderMode) -> Self {
        Self {
            mode,
            sink: None,
            fps: Some(HUMAN_RENDER_FPS),
            last_frame: None,
        }
    }

    /// `None` (or zero) draws `Human` frames as fast as they come.
    pub fn with_fps(mut self, fps: Option<u32>) -> Self {
        self.fps = fps.filter(|&fps| fps > 0);
        self
    }

    pub fn fps(&self) -> Option<u32> {
        self.fps
    }

    pub fn with_sink<W: Write + 'static>(mut self, sink: W) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// `Human` frames go straight to the terminal and return `None`.
    pub fn render(&mut self, env: &FrozenLake) -> Result<Option<RenderFrame>> {
        match self.mode {
            RenderMode::Ansi => Ok(Some(RenderFrame::Ansi(render_ansi(env)))),
            RenderMode::RgbArray => Ok(Some(RenderFrame::Rgb(render_rgb(env)))),
            RenderMode::Human => {
                self.wait_for_next_frame();
                let frame = render_ansi(env);
                let sink = self
                    .sink
                    .get_or_insert_with(|| Box::new(io::stdout()) as Box<dyn Write>);
                write!(sink, "{esc}[2J{esc}[1;1H{frame}", esc = 27 as char)?;
                sink.flush()?;
                Ok(None)
            }
        }
    }

    fn wait_for_next_frame(&mut self) {
        if let (Some(fps), Some(last)) = (self.fps, self.last_frame) {
            let period = Duration::from_secs_f64(1. / fps as f64);
            if let Some(left) = period.checked_sub(last.elapsed()) {
                thread::sleep(left);
            }
        }
        self.last_frame = Some(Instant::now());
    }

    pub fn close(&mut self) -> Result<()> {
        self.last_frame = None;
        if let Some(mut sink) = self.sink.take() {
            sink.flush()?;
        }
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.sink.is_some()
    }
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer")
            .field("mode", &self.mode)
            .field("fps", &self.fps)
            .field("open", &self.is_open())
            .finish()
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
