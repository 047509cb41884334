//! Orientation ("dice face") classifier.
//!
//! Maps 3-axis gravity samples to the face of the enclosure that points up.
//! A sample only counts when one axis clearly dominates; anything else
//! (device in motion, tilted, resting on an edge) leaves the confirmed face
//! untouched.
//!
//! # Example
//!
//! ```
//! use pushbutton::{Dice, Face, Sample};
//!
//! let mut dice = Dice::new(Face::Unknown);
//! assert_eq!(dice.feed(Sample::new(0.0, 0.0, 1.0)), Face::Top);
//! assert_eq!(dice.feed(Sample::new(0.1, 0.1, 0.05)), Face::Top);
//! assert_eq!(dice.feed(Sample::new(0.0, 0.0, -0.98)), Face::Bottom);
//! ```

use crate::config::{DICE_MAX_MAGNITUDE, DICE_THRESHOLD};

/// One accelerometer reading in units of standard gravity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Sample {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Face of the device pointing up.
///
/// The numeric value is the one reported over the serial transport. Faces
/// are numbered like a die: opposite faces add up to 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Face {
    /// No face confirmed yet
    #[default]
    Unknown = 0,
    Top = 1,
    Front = 2,
    Left = 3,
    Right = 4,
    Back = 5,
    Bottom = 6,
}

impl Face {
    /// Wire code of the face.
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// Signed axis of a [`Sample`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

/// Rejected calibration table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationError {
    /// An axis was mapped to [`Face::Unknown`]
    UnknownFace(Axis),
    /// The same face was mapped to two axes
    DuplicateFace(Face),
}

/// Rejected classifier settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Threshold not finite, not positive, or above [`DICE_MAX_MAGNITUDE`]
    InvalidThreshold,
}

/// Axis-to-face table for the physical enclosure.
///
/// Set once for the hardware; the classifier only ever reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    pos_x: Face,
    neg_x: Face,
    pos_y: Face,
    neg_y: Face,
    pos_z: Face,
    neg_z: Face,
}

impl Calibration {
    /// Builds a table after checking that it names each physical face once.
    ///
    /// # Arguments
    ///
    /// * `pos_x` .. `neg_z` - Face shown when the given signed axis points up
    ///
    /// # Errors
    ///
    /// [`CalibrationError::UnknownFace`] if an axis maps to `Unknown`,
    /// [`CalibrationError::DuplicateFace`] if a face is used twice.
    pub fn new(
        pos_x: Face,
        neg_x: Face,
        pos_y: Face,
        neg_y: Face,
        pos_z: Face,
        neg_z: Face,
    ) -> Result<Self, CalibrationError> {
        let entries = [
            (Axis::PosX, pos_x),
            (Axis::NegX, neg_x),
            (Axis::PosY, pos_y),
            (Axis::NegY, neg_y),
            (Axis::PosZ, pos_z),
            (Axis::NegZ, neg_z),
        ];

        for (i, (axis, face)) in entries.iter().enumerate() {
            if *face == Face::Unknown {
                return Err(CalibrationError::UnknownFace(*axis));
            }
            if entries[..i].iter().any(|(_, seen)| seen == face) {
                return Err(CalibrationError::DuplicateFace(*face));
            }
        }

        Ok(Self {
            pos_x,
            neg_x,
            pos_y,
            neg_y,
            pos_z,
            neg_z,
        })
    }

    /// Face shown when `axis` points up.
    pub fn face(&self, axis: Axis) -> Face {
        match axis {
            Axis::PosX => self.pos_x,
            Axis::NegX => self.neg_x,
            Axis::PosY => self.pos_y,
            Axis::NegY => self.neg_y,
            Axis::PosZ => self.pos_z,
            Axis::NegZ => self.neg_z,
        }
    }
}

impl Default for Calibration {
    /// Accelerometer mounted flat with +z out of the top cover and +x
    /// towards the button.
    fn default() -> Self {
        Self {
            pos_x: Face::Front,
            neg_x: Face::Back,
            pos_y: Face::Left,
            neg_y: Face::Right,
            pos_z: Face::Top,
            neg_z: Face::Bottom,
        }
    }
}

/// Orientation classifier.
///
/// Holds the confirmed face and moves it only when a sample has a single
/// dominant axis whose magnitude reaches the threshold. The threshold is
/// inclusive: a dominant axis at exactly 0.75 g is recognized. Samples with
/// an axis beyond [`DICE_MAX_MAGNITUDE`] (the accelerometer's ±2 g full
/// scale) are out of range and never recognized.
///
/// ```text
/// sample ──► dominant axis ──► |a| >= threshold? ──no──► keep confirmed face
///                                    │
///                                   yes
///                                    ▼
///                        calibration table ──► confirmed face
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Dice {
    face: Face,
    threshold: f32,
    calibration: Calibration,
}

impl Dice {
    /// Creates a classifier with the default threshold and calibration.
    pub fn new(initial_face: Face) -> Self {
        Self {
            face: initial_face,
            threshold: DICE_THRESHOLD,
            calibration: Calibration::default(),
        }
    }

    /// Creates a classifier with an explicit threshold (g) and axis table.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidThreshold`] unless `0 < threshold <=
    /// DICE_MAX_MAGNITUDE`. A NaN or non-positive threshold would let
    /// near-zero samples through; one above the range would never match.
    pub fn with_config(
        initial_face: Face,
        threshold: f32,
        calibration: Calibration,
    ) -> Result<Self, ConfigError> {
        if !(threshold > 0.0 && threshold <= DICE_MAX_MAGNITUDE) {
            return Err(ConfigError::InvalidThreshold);
        }
        Ok(Self {
            face: initial_face,
            threshold,
            calibration,
        })
    }

    /// Forgets the confirmed face and starts over from `initial_face`.
    pub fn reset(&mut self, initial_face: Face) {
        self.face = initial_face;
    }

    /// Confirmed face.
    pub fn face(&self) -> Face {
        self.face
    }

    /// Feeds one sample and returns the confirmed face.
    ///
    /// Ambiguous samples leave the confirmed face as it was. A sample is
    /// ambiguous when no axis reaches the threshold, when any component is
    /// not finite or out of range, or when the two largest magnitudes are
    /// equal.
    pub fn feed(&mut self, sample: Sample) -> Face {
        if let Some(axis) = self.dominant_axis(sample) {
            self.face = self.calibration.face(axis);
        }
        self.face
    }

    fn dominant_axis(&self, sample: Sample) -> Option<Axis> {
        let Sample { x, y, z } = sample;
        if !(x.is_finite() && y.is_finite() && z.is_finite()) {
            return None;
        }

        let candidates = [
            (x.abs(), if x > 0.0 { Axis::PosX } else { Axis::NegX }),
            (y.abs(), if y > 0.0 { Axis::PosY } else { Axis::NegY }),
            (z.abs(), if z > 0.0 { Axis::PosZ } else { Axis::NegZ }),
        ];

        let mut best = candidates[0];
        let mut tied = false;
        for candidate in &candidates[1..] {
            if candidate.0 > best.0 {
                best = *candidate;
                tied = false;
            } else if candidate.0 == best.0 {
                tied = true;
            }
        }

        if tied || best.0 < self.threshold || best.0 > DICE_MAX_MAGNITUDE {
            return None;
        }
        Some(best.1)
    }
}

impl Default for Dice {
    fn default() -> Self {
        Self::new(Face::Unknown)
    }
}
