use macroquad::prelude::*;

/// A named, ordered run of tile indices plus its playback parameters.
///
/// Clips are immutable once registered; configure them with the `with_*`
/// builders or a list of [`ClipOption`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animation {
    name: String,
    frames: Vec<usize>,
    fps: u32,
    layer: i32,
    offset_x: i32,
    offset_y: i32,
}

/// A single clip setting, applied after construction. Later options win.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipOption {
    /// Playback rate in frames per second; `0` holds the first frame.
    Fps(u32),
    /// Draw offset in pixels.
    Offset(i32, i32),
    /// Compositing layer.
    Layer(i32),
}

impl Animation {
    /// New clip at 1 fps on layer 0 with no draw offset.
    pub fn new(name: impl Into<String>, frames: Vec<usize>) -> Self {
        Self {
            name: name.into(),
            frames,
            fps: 1,
            layer: 0,
            offset_x: 0,
            offset_y: 0,
        }
    }

    /// Sets the playback rate.
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    /// Sets the draw offset in pixels.
    pub fn with_offset(mut self, x: i32, y: i32) -> Self {
        self.offset_x = x;
        self.offset_y = y;
        self
    }

    /// Sets the compositing layer.
    pub fn with_layer(mut self, layer: i32) -> Self {
        self.layer = layer;
        self
    }

    /// Applies `opts` in order.
    pub fn with_options(self, opts: &[ClipOption]) -> Self {
        opts.iter().fold(self, |anim, opt| match *opt {
            ClipOption::Fps(fps) => anim.with_fps(fps),
            ClipOption::Offset(x, y) => anim.with_offset(x, y),
            ClipOption::Layer(l) => anim.with_layer(l),
        })
    }

    /// Clip name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tile indices in playback order.
    pub fn frames(&self) -> &[usize] {
        &self.frames
    }

    /// Frames per second.
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Compositing layer. Higher layers draw later.
    pub fn layer(&self) -> i32 {
        self.layer
    }

    /// Draw offset in pixels as `(x, y)`.
    pub fn offset(&self) -> (i32, i32) {
        (self.offset_x, self.offset_y)
    }

    pub(crate) fn offset_vec(&self) -> Vec2 {
        vec2(self.offset_x as f32, self.offset_y as f32)
    }
}
