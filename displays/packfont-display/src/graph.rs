//! Scrolling line/bar graph over a framebuffer region
//!
//! ```text
//!  origin_y - height + 1 ┌──────────────┐  max_value
//!                        │        ▐ ▐▐ ▐│
//!                        │   ▐ ▐▐▐▐▐▐▐▐▐│
//!             origin_y   └──────────────┘  min_value
//!                    origin_x      newest sample
//! ```
//!
//! Samples enter on the right and move left one column per update. The
//! graph only ever sets pixels; call [`Graph2D::clear`] first to redraw on a
//! blank background.

use heapless::Deque;
use packfont_core::Color;

use crate::framebuffer::Framebuffer;

/// Widest region a graph can cover, the SSD1306 column count
pub const MAX_GRAPH_WIDTH: usize = 128;

/// How samples are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GraphMode {
    /// One pixel per sample
    #[default]
    Points,
    /// Column filled from the baseline up to the sample
    Bars,
}

/// Errors defining a graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GraphError {
    /// `min_value` and `max_value` are equal or not finite
    EmptyRange,
    /// Width outside 1..=128 or zero height
    InvalidSize {
        /// Requested width
        width: u16,
        /// Requested height
        height: u16,
    },
}

impl core::fmt::Display for GraphError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GraphError::EmptyRange => f.write_str("graph value range is empty"),
            GraphError::InvalidSize { width, height } => {
                write!(f, "invalid graph size {width}x{height}")
            }
        }
    }
}

impl core::error::Error for GraphError {}

/// A graph bound to a rectangular region
#[derive(Debug, Clone)]
pub struct Graph2D {
    origin_x: i32,
    origin_y: i32,
    width: u16,
    height: u16,
    slope: f32,
    offset: f32,
    color: Color,
    mode: GraphMode,
    /// Newest sample at the front
    history: Deque<f32, MAX_GRAPH_WIDTH>,
}

impl Graph2D {
    /// Create a point graph whose bottom-left corner is (origin_x, origin_y)
    ///
    /// `min_value` maps to the baseline row and `max_value` to the top row.
    pub fn new(
        origin_x: i32,
        origin_y: i32,
        width: u16,
        height: u16,
        min_value: f32,
        max_value: f32,
    ) -> Result<Self, GraphError> {
        if width == 0 || width as usize > MAX_GRAPH_WIDTH || height == 0 {
            return Err(GraphError::InvalidSize { width, height });
        }
        let range = max_value - min_value;
        if range == 0.0 || !range.is_finite() {
            return Err(GraphError::EmptyRange);
        }

        let slope = (1.0 - f32::from(height)) / range;
        Ok(Self {
            origin_x,
            origin_y,
            width,
            height,
            slope,
            offset: origin_y as f32 - slope * min_value,
            color: Color::On,
            mode: GraphMode::Points,
            history: Deque::new(),
        })
    }

    /// A graph covering a whole `width` x `height` framebuffer, values 0..=255
    pub fn full_screen(width: u16, height: u16) -> Result<Self, GraphError> {
        Self::new(0, i32::from(height) - 1, width, height, 0.0, 255.0)
    }

    /// Draw in `color`
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Draw in `mode`
    pub fn with_mode(mut self, mode: GraphMode) -> Self {
        self.mode = mode;
        self
    }

    /// Current draw mode
    pub fn mode(&self) -> GraphMode {
        self.mode
    }

    /// Samples currently shown, newest first
    pub fn samples(&self) -> impl Iterator<Item = f32> + '_ {
        self.history.iter().copied()
    }

    /// Row a value is drawn at, before clipping
    pub fn row_of(&self, value: f32) -> i32 {
        libm::rintf(self.slope * value + self.offset) as i32
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.origin_x
            && x < self.origin_x + i32::from(self.width)
            && y <= self.origin_y
            && y > self.origin_y - i32::from(self.height)
    }

    /// Add a sample and redraw every visible sample
    pub fn update(&mut self, framebuffer: &mut Framebuffer, value: f32) {
        if self.history.len() == self.width as usize {
            self.history.pop_back();
        }
        // Room was made above
        let _ = self.history.push_front(value);

        let top = self.origin_y - i32::from(self.height) + 1;
        let mut x = self.origin_x + i32::from(self.width) - 1;
        for &sample in self.history.iter() {
            let y = self.row_of(sample);
            match self.mode {
                GraphMode::Bars => {
                    // Rows above the region are never drawn
                    for row in y.max(top)..=self.origin_y {
                        if self.contains(x, row) {
                            framebuffer.pixel(x, row, self.color);
                        }
                    }
                }
                GraphMode::Points => {
                    if self.contains(x, y) {
                        framebuffer.pixel(x, y, self.color);
                    }
                }
            }
            x -= 1;
        }
    }

    /// Blank the graph region
    pub fn clear(&self, framebuffer: &mut Framebuffer) {
        let top = self.origin_y - i32::from(self.height) + 1;
        for y in top..=self.origin_y {
            for x in self.origin_x..self.origin_x + i32::from(self.width) {
                framebuffer.pixel(x, y, self.color.inverse());
            }
        }
    }
}
