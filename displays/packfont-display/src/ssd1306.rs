//! SSD1306 OLED adapter
//!
//! Owns a [`Framebuffer`] and a [`FontRegistry`] and pushes the buffer to
//! the controller over any [`DisplayBus`].
//!
//! # Presence
//!
//! ```text
//! Uninitialized ──probe()──▶ Probing ──ok──▶ Ready
//!                               │
//!                               └──bus error──▶ Absent (terminal)
//! ```
//!
//! On an `Absent` (or never probed) adapter every drawing, text, font and
//! panel call returns immediately without touching the buffer or the bus,
//! so firmware keeps running with the panel unplugged.
//!
//! Bus errors while `Ready` do not reach the caller either. They set the
//! fault flag in [`AdapterStatus`], which the next successful write clears.

use alloc::vec::Vec;

use packfont_core::{draw_text, Color, FontRegistry, LoadError, SelectionError, TextBox};
use packfont_format::FormatError;
use packfont_hal::{DisplayBus, FontStore};

use crate::config::DisplayConfig;
use crate::error::DisplayError;
use crate::framebuffer::Framebuffer;
use crate::graph::Graph2D;
use crate::pbm::PbmError;

/// SSD1306 commands
pub mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const ENTIRE_ON: u8 = 0xA4;
    pub const NORM_INV: u8 = 0xA6;
    pub const MEM_ADDR: u8 = 0x20;
    pub const COL_ADDR: u8 = 0x21;
    pub const PAGE_ADDR: u8 = 0x22;
    pub const START_LINE: u8 = 0x40;
    pub const SEG_REMAP: u8 = 0xA0;
    pub const MUX_RATIO: u8 = 0xA8;
    pub const IREF_SELECT: u8 = 0xAD;
    pub const COM_OUT_DIR: u8 = 0xC0;
    pub const DISP_OFFSET: u8 = 0xD3;
    pub const COM_PIN_CFG: u8 = 0xDA;
    pub const CLK_DIV: u8 = 0xD5;
    pub const PRECHARGE: u8 = 0xD9;
    pub const VCOM_DESEL: u8 = 0xDB;
    pub const CHARGE_PUMP: u8 = 0x8D;
}

/// Columns in controller RAM
pub const MAX_COLUMNS: u16 = 128;

/// Rows in controller RAM, also the largest multiplex ratio
pub const MAX_ROWS: u16 = 64;

/// Length of the initialisation command sequence
pub const INIT_SEQUENCE_LEN: usize = 27;

/// Lifecycle of the adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdapterState {
    /// Created, nothing sent yet
    Uninitialized,
    /// Initialisation sequence in flight
    Probing,
    /// Panel answered; commands are sent
    Ready,
    /// Panel did not answer; every call is a no-op
    Absent,
}

/// Volatile panel state as last written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdapterStatus {
    /// Panel detected
    pub present: bool,
    /// Contrast last sent
    pub contrast: u8,
    /// Colors inverted
    pub inverted: bool,
    /// Scan direction flag, see [`Ssd1306::rotate`]
    pub rotated: bool,
    /// Panel powered on
    pub powered: bool,
    /// The last write failed
    pub fault: bool,
}

/// Initialisation commands for `config`, in order
pub fn init_sequence(config: &DisplayConfig) -> [u8; INIT_SEQUENCE_LEN] {
    let rotate = u8::from(config.rotate);
    let com_pins = if config.height == 32 { 0x02 } else { 0x12 };
    [
        cmd::DISPLAY_OFF,
        // Address setting
        cmd::MEM_ADDR,
        0x00, // horizontal
        // Resolution and layout
        cmd::START_LINE,
        cmd::SEG_REMAP | rotate,
        cmd::MUX_RATIO,
        config.height.saturating_sub(1) as u8,
        cmd::COM_OUT_DIR | (rotate << 3),
        cmd::DISP_OFFSET,
        0x00,
        cmd::COM_PIN_CFG,
        com_pins,
        // Timing and driving scheme
        cmd::CLK_DIV,
        0x80,
        cmd::PRECHARGE,
        0xF1,
        cmd::VCOM_DESEL,
        0x30, // 0.83 * Vcc
        // Display
        cmd::SET_CONTRAST,
        config.contrast,
        cmd::ENTIRE_ON, // follow RAM
        cmd::NORM_INV,
        cmd::IREF_SELECT,
        0x30,
        cmd::CHARGE_PUMP,
        0x14,
        cmd::DISPLAY_ON,
    ]
}

/// SSD1306 display with its framebuffer and fonts
pub struct Ssd1306<B> {
    bus: B,
    config: DisplayConfig,
    state: AdapterState,
    status: AdapterStatus,
    framebuffer: Framebuffer,
    fonts: FontRegistry,
}

impl<B: DisplayBus> Ssd1306<B> {
    /// Create an adapter; nothing is sent until [`probe`](Self::probe)
    ///
    /// The panel must fit controller RAM: `column_offset + width` at most
    /// [`MAX_COLUMNS`] and `height` at most [`MAX_ROWS`].
    pub fn new(bus: B, config: DisplayConfig) -> Result<Self, DisplayError> {
        let framebuffer = Framebuffer::new(config.width, config.height)?;
        if u16::from(config.column_offset) + config.width > MAX_COLUMNS
            || config.height > MAX_ROWS
        {
            return Err(DisplayError::UnsupportedGeometry {
                width: config.width,
                height: config.height,
                column_offset: config.column_offset,
            });
        }
        Ok(Self {
            bus,
            config,
            state: AdapterState::Uninitialized,
            status: AdapterStatus {
                present: false,
                contrast: config.contrast,
                inverted: false,
                rotated: config.rotate,
                powered: false,
                fault: false,
            },
            framebuffer,
            fonts: FontRegistry::new(),
        })
    }

    /// Create an adapter and probe for the panel
    pub fn init(bus: B, config: DisplayConfig) -> Result<Self, DisplayError> {
        let mut display = Self::new(bus, config)?;
        display.probe();
        Ok(display)
    }

    /// Initialise the panel, then clear and show the buffer
    ///
    /// Only the first call does anything; the outcome is final.
    pub fn probe(&mut self) -> AdapterState {
        if self.state != AdapterState::Uninitialized {
            return self.state;
        }
        self.state = AdapterState::Probing;

        let sequence = init_sequence(&self.config);
        self.framebuffer.fill(Color::Off);
        let answered = self.bus.write_command(&sequence).is_ok() && self.flush().is_ok();

        if answered {
            self.state = AdapterState::Ready;
            self.status.present = true;
            self.status.powered = true;
            info!(
                "detected display of size {} x {} pixels",
                self.config.width,
                self.config.height
            );
        } else {
            self.state = AdapterState::Absent;
            warn!("display not detected at address {:#x}", self.config.address);
        }
        self.state
    }

    /// Lifecycle state
    pub fn state(&self) -> AdapterState {
        self.state
    }

    /// Panel state as last written
    pub fn status(&self) -> AdapterStatus {
        self.status
    }

    /// Whether the panel answered the probe
    pub fn is_present(&self) -> bool {
        self.state == AdapterState::Ready
    }

    /// Configuration the adapter was built with
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// The framebuffer as last drawn
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Loaded fonts and the current selection
    pub fn fonts(&self) -> &FontRegistry {
        &self.fonts
    }

    /// Give back the bus
    pub fn release(self) -> B {
        self.bus
    }

    fn canvas(&mut self) -> Option<&mut Framebuffer> {
        self.is_present().then_some(&mut self.framebuffer)
    }

    fn flush(&mut self) -> Result<(), B::Error> {
        let first = self.config.column_offset;
        let last = (u16::from(first) + self.config.width - 1) as u8;
        self.bus.write_command(&[
            cmd::COL_ADDR,
            first,
            last,
            cmd::PAGE_ADDR,
            0,
            (self.framebuffer.pages() - 1) as u8,
        ])?;
        self.bus.write_data(self.framebuffer.as_bytes())
    }

    /// Record the outcome of a write while `Ready`
    fn settle<E>(&mut self, result: Result<(), E>) -> bool {
        match result {
            Ok(()) => {
                if self.status.fault {
                    info!("display at {:#x} recovered", self.config.address);
                    self.status.fault = false;
                }
                true
            }
            Err(_) => {
                if !self.status.fault {
                    warn!("display at {:#x} write failed", self.config.address);
                    self.status.fault = true;
                }
                false
            }
        }
    }

    fn command(&mut self, bytes: &[u8]) -> bool {
        if !self.is_present() {
            return false;
        }
        let result = self.bus.write_command(bytes);
        self.settle(result)
    }

    // ── Panel ──────────────────────────────────────────────────────────

    /// Send the framebuffer to the panel
    pub fn show(&mut self) {
        if !self.is_present() {
            return;
        }
        let result = self.flush();
        self.settle(result);
    }

    /// Clear the framebuffer and show it
    pub fn clear(&mut self) {
        if let Some(fb) = self.canvas() {
            fb.fill(Color::Off);
            self.show();
        }
    }

    /// Turn the panel off; RAM contents are kept
    pub fn power_off(&mut self) {
        if self.command(&[cmd::DISPLAY_OFF]) {
            self.status.powered = false;
        }
    }

    /// Turn the panel back on
    pub fn power_on(&mut self) {
        if self.command(&[cmd::DISPLAY_ON]) {
            self.status.powered = true;
        }
    }

    /// Set the contrast, 0 dimmest
    pub fn set_contrast(&mut self, contrast: u8) {
        if self.command(&[cmd::SET_CONTRAST, contrast]) {
            self.status.contrast = contrast;
        }
    }

    /// Swap lit and dark pixels on the panel; the buffer is unchanged
    pub fn invert(&mut self, invert: bool) {
        if self.command(&[cmd::NORM_INV | u8::from(invert)]) {
            self.status.inverted = invert;
        }
    }

    /// Set the scan direction flag
    ///
    /// `true` is the orientation chosen by the default configuration and
    /// `false` turns the image 180 degrees.
    pub fn rotate(&mut self, rotate: bool) {
        let flag = u8::from(rotate);
        if self.command(&[cmd::COM_OUT_DIR | (flag << 3), cmd::SEG_REMAP | flag]) {
            self.status.rotated = rotate;
        }
    }

    // ── Drawing ────────────────────────────────────────────────────────

    /// Set every pixel to `color`
    pub fn fill(&mut self, color: Color) {
        if let Some(fb) = self.canvas() {
            fb.fill(color);
        }
    }

    /// See [`Framebuffer::pixel`]
    pub fn pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(fb) = self.canvas() {
            fb.pixel(x, y, color);
        }
    }

    /// See [`Framebuffer::line`]
    pub fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
        if let Some(fb) = self.canvas() {
            fb.line(x1, y1, x2, y2, color);
        }
    }

    /// Horizontal line of `len + 1` pixels
    pub fn hline(&mut self, x: i32, y: i32, len: i32, color: Color) {
        if let Some(fb) = self.canvas() {
            fb.hline(x, y, len, color);
        }
    }

    /// Vertical line of `len + 1` pixels
    pub fn vline(&mut self, x: i32, y: i32, len: i32, color: Color) {
        if let Some(fb) = self.canvas() {
            fb.vline(x, y, len, color);
        }
    }

    /// Rectangle outline
    pub fn rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        if let Some(fb) = self.canvas() {
            fb.rect(x, y, w, h, color);
        }
    }

    /// Filled rectangle
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        if let Some(fb) = self.canvas() {
            fb.fill_rect(x, y, w, h, color);
        }
    }

    /// See [`Framebuffer::circle`]
    pub fn circle(&mut self, cx: i32, cy: i32, r: i32, thickness: f32, color: Color) {
        if let Some(fb) = self.canvas() {
            fb.circle(cx, cy, r, thickness, color);
        }
    }

    /// See [`Framebuffer::arc`]
    #[allow(clippy::too_many_arguments)]
    pub fn arc(
        &mut self,
        cx: i32,
        cy: i32,
        r: i32,
        start_deg: i32,
        end_deg: i32,
        thickness: f32,
        color: Color,
    ) {
        if let Some(fb) = self.canvas() {
            fb.arc(cx, cy, r, start_deg, end_deg, thickness, color);
        }
    }

    /// Shift the buffer contents; the panel is not scrolled in hardware
    pub fn scroll(&mut self, dx: i32, dy: i32) {
        if let Some(fb) = self.canvas() {
            fb.scroll(dx, dy);
        }
    }

    /// Draw a P4 PBM image at the origin
    pub fn blit(&mut self, pbm_bytes: &[u8], color: Color) -> Result<(), PbmError> {
        match self.canvas() {
            Some(fb) => fb.blit(pbm_bytes, color),
            None => Ok(()),
        }
    }

    /// Add a sample to `graph` and redraw it
    pub fn update_graph(&mut self, graph: &mut Graph2D, value: f32) {
        if let Some(fb) = self.canvas() {
            graph.update(fb, value);
        }
    }

    /// Blank the region covered by `graph`
    pub fn clear_graph(&mut self, graph: &Graph2D) {
        if let Some(fb) = self.canvas() {
            graph.clear(fb);
        }
    }

    /// BMP image of the buffer, `None` without a panel
    pub fn screenshot(&self) -> Option<Vec<u8>> {
        self.is_present().then(|| self.framebuffer.to_bmp())
    }

    // ── Text ───────────────────────────────────────────────────────────

    /// Draw `text` in the selected font
    pub fn text(&mut self, text: &str, text_box: &TextBox, color: Color) {
        if !self.is_present() {
            return;
        }
        draw_text(&mut self.framebuffer, &self.fonts, text, text_box, color);
    }

    /// Rendered size of `text`, (0, 0) without a panel
    pub fn measure(&self, text: &str) -> (u32, u32) {
        if !self.is_present() {
            return (0, 0);
        }
        self.fonts.measure(text)
    }

    /// Load a font from `store`
    pub fn load_font<S: FontStore + ?Sized>(
        &mut self,
        name: &str,
        store: &mut S,
    ) -> Result<(), LoadError> {
        if !self.is_present() {
            return Ok(());
        }
        self.fonts.load(name, store)
    }

    /// Load several fonts, stopping at the first failure
    pub fn load_fonts<S: FontStore + ?Sized>(
        &mut self,
        names: &[&str],
        store: &mut S,
    ) -> Result<(), LoadError> {
        if !self.is_present() {
            return Ok(());
        }
        self.fonts.load_all(names, store)
    }

    /// Register a font already in memory
    pub fn load_font_bytes(&mut self, name: &str, bytes: &[u8]) -> Result<(), FormatError> {
        if !self.is_present() {
            return Ok(());
        }
        self.fonts.load_bytes(name, bytes)
    }

    /// Drop every font and select the built-in font
    pub fn unload_all_fonts(&mut self) {
        if self.is_present() {
            self.fonts.unload_all();
        }
    }

    /// Select a loaded font, or the built-in font with `None`
    pub fn select_font(&mut self, name: Option<&str>) -> Result<(), SelectionError> {
        if !self.is_present() {
            return Ok(());
        }
        self.fonts.select(name)
    }
}
