//! Rasterizes particles and quadtree structure into bitmap frames.
//!
//! World coordinates inside `[-viewport_radius, viewport_radius]²` map onto the
//! whole frame; everything outside is clamped to the frame edges.
use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgb, RgbImage};
use log::debug;

use crate::models::{Particle, Vector2D};
use crate::spatial::{BoundingBox, QuadTree};
use crate::utils::{SimulationError, FRAME_SIZE};

const BACKGROUND: Rgb<u8> = Rgb([0, 0, 0]);
const PARTICLE_COLOR: Rgb<u8> = Rgb([255, 255, 255]);
const OUTLINE_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// Which frames the driver exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum FrameOutputStyle {
    None,
    #[value(name = "final")]
    FinalFrameOnly,
    #[default]
    #[value(name = "all")]
    AllFrames,
}

/// Path of the frame written after `iteration`.
pub fn frame_path(dir: &Path, iteration: usize) -> PathBuf {
    dir.join(format!("{}.bmp", iteration))
}

/// Path of the frame written once the run is over.
pub fn final_frame_path(dir: &Path) -> PathBuf {
    dir.join("final.bmp")
}

/// An axis-aligned rectangle in pixel coordinates, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

/// A frame being drawn.
pub struct Frame {
    image: RgbImage,
}

impl Frame {
    pub fn new(width: u32, height: u32) -> Self {
        let mut frame = Frame {
            image: RgbImage::new(width.max(1), height.max(1)),
        };
        frame.clear();
        frame
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgb<u8> {
        *self.image.get_pixel(x, y)
    }

    pub fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = BACKGROUND;
        }
    }

    fn clamp_x(&self, x: i32) -> u32 {
        x.clamp(0, self.width() as i32 - 1) as u32
    }

    fn clamp_y(&self, y: i32) -> u32 {
        y.clamp(0, self.height() as i32 - 1) as u32
    }

    /// Maps a world position into (unclamped) pixel coordinates.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_quadsim::models::Vector2D;
    /// use rs_quadsim::visualization::Frame;
    ///
    /// let frame = Frame::new(512, 512);
    /// assert_eq!(frame.world_to_pixel(Vector2D::new(0.0, 0.0), 10.0), (256, 256));
    /// assert_eq!(frame.world_to_pixel(Vector2D::new(-10.0, 5.0), 10.0), (0, 384));
    /// ```
    pub fn world_to_pixel(&self, position: Vector2D, viewport_radius: f32) -> (i32, i32) {
        let inv_viewport_size = 0.5 / viewport_radius;
        let x = ((position.x + viewport_radius) * inv_viewport_size * self.width() as f32) as i32;
        let y = ((position.y + viewport_radius) * inv_viewport_size * self.height() as f32) as i32;
        (x, y)
    }

    /// Converts a world-space box into the pixel rectangle outlining it.
    pub fn pixel_rect(&self, bounds: &BoundingBox, viewport_radius: f32) -> PixelRect {
        let (min_x, min_y) = self.world_to_pixel(bounds.min, viewport_radius);
        let (max_x, max_y) = self.world_to_pixel(bounds.max, viewport_radius);
        PixelRect { min_x, min_y, max_x, max_y }
    }

    /// Draws the outline of `rect`, clamped to the frame.
    pub fn draw_rectangle(&mut self, rect: PixelRect) {
        let min_x = self.clamp_x(rect.min_x);
        let min_y = self.clamp_y(rect.min_y);
        let max_x = self.clamp_x(rect.max_x);
        let max_y = self.clamp_y(rect.max_y);
        for x in min_x..=max_x {
            self.image.put_pixel(x, min_y, OUTLINE_COLOR);
            self.image.put_pixel(x, max_y, OUTLINE_COLOR);
        }
        for y in min_y..max_y {
            self.image.put_pixel(min_x, y, OUTLINE_COLOR);
            self.image.put_pixel(max_x, y, OUTLINE_COLOR);
        }
    }

    /// Fills the square of half-width `size` around `(x, y)`, clamped to the frame.
    pub fn fill_rectangle(&mut self, x: i32, y: i32, size: i32) {
        let min_x = self.clamp_x(x - size);
        let min_y = self.clamp_y(y - size);
        let max_x = self.clamp_x(x + size);
        let max_y = self.clamp_y(y + size);
        for py in min_y..=max_y {
            for px in min_x..=max_x {
                self.image.put_pixel(px, py, PARTICLE_COLOR);
            }
        }
    }

    /// Plots every particle as a 3x3 block.
    pub fn plot_particles(&mut self, particles: &[Particle], viewport_radius: f32) {
        for p in particles {
            let (x, y) = self.world_to_pixel(p.position, viewport_radius);
            self.fill_rectangle(x, y, 1);
        }
    }

    /// Outlines the box of every node in `tree`.
    pub fn show_structure(&mut self, tree: &QuadTree, viewport_radius: f32) {
        let mut rects = Vec::new();
        tree.visit_nodes(|node| rects.push(self.pixel_rect(&node.bounds, viewport_radius)));
        for rect in rects {
            self.draw_rectangle(rect);
        }
    }

    /// Writes the frame as an uncompressed BMP.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::ImageExport`] if encoding or writing fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SimulationError> {
        let path = path.as_ref();
        self.image.save_with_format(path, ImageFormat::Bmp)?;
        debug!("wrote frame {}", path.display());
        Ok(())
    }
}

/// Renders `particles` with the structure of a quadtree built over them and saves it to `path`.
pub fn dump_view(
    path: impl AsRef<Path>,
    viewport_radius: f32,
    particles: &[Particle],
) -> Result<(), SimulationError> {
    let mut frame = Frame::new(FRAME_SIZE, FRAME_SIZE);
    frame.plot_particles(particles, viewport_radius);
    let tree = QuadTree::build(particles);
    frame.show_structure(&tree, viewport_radius);
    frame.save(path)
}
