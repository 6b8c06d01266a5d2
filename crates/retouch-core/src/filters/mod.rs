//! Named filter presets.
//!
//! A [`FilterCatalog`] maps case-sensitive names to [`FilterRecipe`]s. A
//! recipe is an ordered list of color steps; every step is deterministic and
//! leaves alpha untouched.
//!
//! ## Built-in Recipes
//!
//! | name          | steps                                               |
//! |---------------|-----------------------------------------------------|
//! | `sepia`       | `ColorMatrix::SEPIA`                                |
//! | `vintage`     | `ColorMatrix::VINTAGE`, fade curve, vignette (0.25) |
//! | `grayscale`   | `ColorMatrix::GRAYSCALE`                            |
//! | `invert`      | `ColorMatrix::INVERT`                               |
//! | `brownie`     | `ColorMatrix::BROWNIE`                              |
//! | `kodachrome`  | `ColorMatrix::KODACHROME`                           |
//! | `technicolor` | `ColorMatrix::TECHNICOLOR`                          |
//! | `polaroid`    | `ColorMatrix::POLAROID`                             |
//!
//! The vintage fade curve passes through (0, 0.08), (0.5, 0.5) and
//! (1, 0.92), lifting blacks and pulling down whites.

mod matrix;
mod vignette;

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::adjustments::apply_brightness_contrast_in_place;
use crate::buffer::PixelBuffer;
use crate::curve::{apply_tone_curve, ToneCurveLut};
use crate::error::{EditError, Result};
use crate::{ColorAdjustment, CurvePoint, ToneCurve};

pub use matrix::ColorMatrix;
pub use vignette::{apply_vignette_in_place, smootherstep, vignette_factor};

/// One stage of a filter recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FilterStep {
    /// Mix RGB channels through a color matrix
    Matrix(ColorMatrix),
    /// Remap each RGB channel through a tone curve
    Curve(ToneCurve),
    /// Contrast then brightness, as in `adjust_brightness_contrast`
    BrightnessContrast(ColorAdjustment),
    /// Darken toward the corners
    Vignette { strength: f32 },
}

impl FilterStep {
    /// Return a copy ready to apply: adjustments clamped, curve points
    /// sorted, vignette strength clamped to [0, 1].
    ///
    /// Fails on any NaN or infinite parameter.
    pub fn validated(&self) -> Result<Self> {
        match self {
            FilterStep::Matrix(matrix) if !matrix.is_finite() => Err(EditError::invalid(
                "matrix",
                "coefficients and offsets must be finite",
            )),
            FilterStep::Matrix(matrix) => Ok(FilterStep::Matrix(*matrix)),
            FilterStep::Curve(curve) => {
                curve.validate()?;
                Ok(FilterStep::Curve(ToneCurve::from_points(curve.points.clone())))
            }
            FilterStep::BrightnessContrast(adj) => {
                adj.validated().map(FilterStep::BrightnessContrast)
            }
            FilterStep::Vignette { strength } if !strength.is_finite() => Err(EditError::invalid(
                "vignette.strength",
                format!("expected a finite value in [0, 1], got {strength}"),
            )),
            FilterStep::Vignette { strength } => Ok(FilterStep::Vignette {
                strength: strength.clamp(0.0, 1.0),
            }),
        }
    }

    fn apply_in_place(&self, image: &mut PixelBuffer) {
        match self {
            FilterStep::Matrix(matrix) => matrix.apply_in_place(&mut image.pixels),
            FilterStep::Curve(curve) => {
                apply_tone_curve(&mut image.pixels, &ToneCurveLut::from_curve(curve))
            }
            FilterStep::BrightnessContrast(adj) => {
                apply_brightness_contrast_in_place(&mut image.pixels, adj)
            }
            FilterStep::Vignette { strength } => apply_vignette_in_place(image, *strength),
        }
    }
}

/// An ordered list of steps applied as one filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterRecipe {
    pub steps: Vec<FilterStep>,
}

impl FilterRecipe {
    pub fn new(steps: Vec<FilterStep>) -> Self {
        Self { steps }
    }

    /// A recipe consisting of a single color matrix.
    pub fn matrix(matrix: ColorMatrix) -> Self {
        Self::new(vec![FilterStep::Matrix(matrix)])
    }

    /// Validate every step. See [`FilterStep::validated`].
    pub fn validated(&self) -> Result<Self> {
        let steps = self
            .steps
            .iter()
            .map(FilterStep::validated)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { steps })
    }

    /// Apply every step in order to a copy of `image`.
    ///
    /// Steps are validated first, so a malformed recipe fails before any
    /// pixels are touched.
    pub fn apply(&self, image: &PixelBuffer) -> Result<PixelBuffer> {
        let recipe = self.validated()?;
        let mut output = image.clone();
        recipe.apply_in_place(&mut output);
        Ok(output)
    }

    pub(crate) fn apply_in_place(&self, image: &mut PixelBuffer) {
        for step in &self.steps {
            step.apply_in_place(image);
        }
    }
}

/// Registry of named filter recipes.
///
/// Lookups are case-sensitive. Extend with [`FilterCatalog::register`]
/// instead of adding match arms at call sites.
#[derive(Debug, Clone)]
pub struct FilterCatalog {
    recipes: BTreeMap<String, FilterRecipe>,
}

impl FilterCatalog {
    /// An empty catalog.
    pub fn empty() -> Self {
        Self {
            recipes: BTreeMap::new(),
        }
    }

    /// The built-in presets listed in the module docs.
    pub fn builtin() -> Self {
        let recipes = [
            ("sepia", FilterRecipe::matrix(ColorMatrix::SEPIA)),
            ("vintage", vintage_recipe()),
            ("grayscale", FilterRecipe::matrix(ColorMatrix::GRAYSCALE)),
            ("invert", FilterRecipe::matrix(ColorMatrix::INVERT)),
            ("brownie", FilterRecipe::matrix(ColorMatrix::BROWNIE)),
            ("kodachrome", FilterRecipe::matrix(ColorMatrix::KODACHROME)),
            ("technicolor", FilterRecipe::matrix(ColorMatrix::TECHNICOLOR)),
            ("polaroid", FilterRecipe::matrix(ColorMatrix::POLAROID)),
        ];
        Self {
            recipes: recipes
                .into_iter()
                .map(|(name, recipe)| (name.to_string(), recipe))
                .collect(),
        }
    }

    /// Process-wide built-in catalog, created on first use.
    pub fn shared() -> &'static FilterCatalog {
        static BUILTIN: OnceLock<FilterCatalog> = OnceLock::new();
        BUILTIN.get_or_init(FilterCatalog::builtin)
    }

    /// Add or replace a recipe. Returns the previous recipe for that name.
    ///
    /// The recipe is validated and normalized on the way in; a malformed
    /// recipe is rejected and the catalog is left unchanged.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        recipe: FilterRecipe,
    ) -> Result<Option<FilterRecipe>> {
        let recipe = recipe.validated()?;
        Ok(self.recipes.insert(name.into(), recipe))
    }

    /// Look up a recipe by name.
    pub fn get(&self, name: &str) -> Result<&FilterRecipe> {
        self.recipes.get(name).ok_or_else(|| {
            warn!(filter = name, "unknown filter requested");
            EditError::UnknownFilter(name.to_string())
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.recipes.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.recipes.keys().map(String::as_str)
    }

    /// Apply the named recipe to `image`, returning a new buffer.
    ///
    /// An unknown name fails before any pixels are touched.
    pub fn apply(&self, image: &PixelBuffer, name: &str) -> Result<PixelBuffer> {
        let mut output = image.clone();
        self.get(name)?.apply_in_place(&mut output);
        Ok(output)
    }
}

impl Default for FilterCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn vintage_recipe() -> FilterRecipe {
    FilterRecipe::new(vec![
        FilterStep::Matrix(ColorMatrix::VINTAGE),
        FilterStep::Curve(ToneCurve::from_points(vec![
            CurvePoint::new(0.0, 0.08),
            CurvePoint::new(0.5, 0.5),
            CurvePoint::new(1.0, 0.92),
        ])),
        FilterStep::Vignette { strength: 0.25 },
    ])
}
