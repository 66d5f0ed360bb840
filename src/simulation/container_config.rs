//! Container configuration.
//!
//! The container is a fixed open box. Besides its dimensions it carries the
//! parameters the layout pass needs: how much of the box gets filled, how far
//! above the floor the stack starts, and how far the liquid boxes stay from
//! the walls. All values are validated once here so the layout pass can stay
//! infallible.

use bevy::prelude::Resource;

use crate::error::{DensityError, Result};

/// Reference values for the container.
pub mod config {
    pub const CONTAINER_WIDTH: f32 = 6.0;
    pub const CONTAINER_HEIGHT: f32 = 8.0;
    pub const CONTAINER_DEPTH: f32 = 4.0;

    /// Share of the container volume filled by the selection as a whole
    pub const FILL_FRACTION: f32 = 0.7;
    /// Gap between the container floor and the lowest layer
    pub const FLOOR_MARGIN: f32 = 0.2;
    /// Amount taken off each layer's width and depth so it clears the walls
    pub const WALL_CLEARANCE: f32 = 0.2;
    /// Wall and floor thickness for drawing
    pub const WALL_THICKNESS: f32 = 0.1;
}

/// Validated container geometry and layout parameters.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct ContainerConfig {
    width: f32,
    height: f32,
    depth: f32,
    fill_fraction: f32,
    floor_margin: f32,
    wall_clearance: f32,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        use config::*;
        Self {
            width: CONTAINER_WIDTH,
            height: CONTAINER_HEIGHT,
            depth: CONTAINER_DEPTH,
            fill_fraction: FILL_FRACTION,
            floor_margin: FLOOR_MARGIN,
            wall_clearance: WALL_CLEARANCE,
        }
    }
}

impl ContainerConfig {
    /// Container with the given dimensions and reference layout parameters.
    pub fn new(width: f32, height: f32, depth: f32) -> Result<Self> {
        let container = Self {
            width,
            height,
            depth,
            ..Self::default()
        };
        container.validate()?;
        Ok(container)
    }

    pub fn with_fill_fraction(self, fill_fraction: f32) -> Result<Self> {
        let container = Self { fill_fraction, ..self };
        container.validate()?;
        Ok(container)
    }

    pub fn with_floor_margin(self, floor_margin: f32) -> Result<Self> {
        let container = Self { floor_margin, ..self };
        container.validate()?;
        Ok(container)
    }

    pub fn with_wall_clearance(self, wall_clearance: f32) -> Result<Self> {
        let container = Self { wall_clearance, ..self };
        container.validate()?;
        Ok(container)
    }

    fn validate(&self) -> Result<()> {
        for (label, value) in [
            ("width", self.width),
            ("height", self.height),
            ("depth", self.depth),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(DensityError::InvalidConfiguration(format!(
                    "{label} must be a positive number, got {value}"
                )));
            }
        }

        if !(self.fill_fraction > 0.0 && self.fill_fraction <= 1.0) {
            return Err(DensityError::InvalidConfiguration(format!(
                "fill fraction must be in (0, 1], got {}",
                self.fill_fraction
            )));
        }

        if !self.floor_margin.is_finite() || self.floor_margin < 0.0 {
            return Err(DensityError::InvalidConfiguration(format!(
                "floor margin must be non-negative, got {}",
                self.floor_margin
            )));
        }

        if self.floor_margin + self.fill_height() > self.height {
            return Err(DensityError::InvalidConfiguration(format!(
                "floor margin {} plus fill height {} exceeds container height {}",
                self.floor_margin,
                self.fill_height(),
                self.height
            )));
        }

        if !self.wall_clearance.is_finite()
            || self.wall_clearance < 0.0
            || self.wall_clearance >= self.width
            || self.wall_clearance >= self.depth
        {
            return Err(DensityError::InvalidConfiguration(format!(
                "wall clearance {} must be non-negative and smaller than width and depth",
                self.wall_clearance
            )));
        }

        Ok(())
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }

    pub fn floor_margin(&self) -> f32 {
        self.floor_margin
    }

    pub fn wall_clearance(&self) -> f32 {
        self.wall_clearance
    }

    /// Horizontal cross-section (width × depth)
    pub fn footprint(&self) -> f32 {
        self.width * self.depth
    }

    /// Full interior volume
    pub fn volume(&self) -> f32 {
        self.footprint() * self.height
    }

    /// Volume shared out between the selected liquids
    pub fn fill_volume(&self) -> f32 {
        self.volume() * self.fill_fraction
    }

    /// Combined height of all layers
    pub fn fill_height(&self) -> f32 {
        self.height * self.fill_fraction
    }

    /// Y coordinate where the lowest layer starts
    pub fn stack_base(&self) -> f32 {
        -self.height / 2.0 + self.floor_margin
    }
}
