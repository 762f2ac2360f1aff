// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry shared by every stage of a drag: transforms and droppable slots.

use kurbo::{Affine, Rect, Vec2};

/// A 2D translation with an optional per-axis scale.
///
/// This is what a rendering layer applies to an item's visual node while a drag
/// is in progress. The scale is only ever produced by grid sorting, where a slot
/// may have a different size than the item moving into it.
///
/// The translation is applied after the scale, matching
/// `translate3d(x, y, 0) scaleX(sx) scaleY(sy)` with a top-left origin.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform {
    /// Translation in world units.
    pub translate: Vec2,
    /// Horizontal scale factor.
    pub scale_x: f64,
    /// Vertical scale factor.
    pub scale_y: f64,
}

impl Transform {
    /// No translation, unit scale.
    pub const IDENTITY: Self = Self {
        translate: Vec2::ZERO,
        scale_x: 1.0,
        scale_y: 1.0,
    };

    /// A pure translation.
    pub const fn translate(translate: Vec2) -> Self {
        Self {
            translate,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }

    /// A pure translation from components.
    pub const fn from_xy(x: f64, y: f64) -> Self {
        Self::translate(Vec2::new(x, y))
    }

    /// Returns `true` if this transform leaves a node where it is.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Returns `true` if every component is finite.
    pub fn is_finite(&self) -> bool {
        self.translate.is_finite() && self.scale_x.is_finite() && self.scale_y.is_finite()
    }

    /// Returns the same transform with a new translation.
    #[must_use]
    pub const fn with_translate(self, translate: Vec2) -> Self {
        Self { translate, ..self }
    }

    /// Convert to a Kurbo affine (scale, then translate).
    pub fn to_affine(self) -> Affine {
        Affine::translate(self.translate) * Affine::scale_non_uniform(self.scale_x, self.scale_y)
    }

    /// Apply to a rectangle anchored at its top-left corner.
    pub fn apply_to_rect(self, rect: Rect) -> Rect {
        Rect::from_origin_size(
            rect.origin() + self.translate,
            (rect.width() * self.scale_x, rect.height() * self.scale_y),
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A candidate drop slot: an item id and its measured bounds.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Droppable<K> {
    /// Item identifier.
    pub id: K,
    /// Measured world-space bounds.
    pub rect: Rect,
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn identity_is_default_and_finite() {
        let t = Transform::default();
        assert!(t.is_identity());
        assert!(t.is_finite());
        assert_eq!(t.to_affine(), Affine::IDENTITY);
    }

    #[test]
    fn non_finite_components_are_detected() {
        assert!(!Transform::from_xy(f64::NAN, 0.0).is_finite());
        assert!(!Transform::from_xy(0.0, f64::INFINITY).is_finite());
        let scaled = Transform {
            scale_x: f64::NAN,
            ..Transform::IDENTITY
        };
        assert!(!scaled.is_finite());
    }

    #[test]
    fn apply_to_rect_translates_origin_and_scales_size() {
        let t = Transform {
            translate: Vec2::new(10.0, -5.0),
            scale_x: 2.0,
            scale_y: 0.5,
        };
        let r = t.apply_to_rect(Rect::new(0.0, 10.0, 30.0, 50.0));
        assert_eq!(r, Rect::new(10.0, 5.0, 70.0, 25.0));
    }

    #[test]
    fn affine_matches_rect_application_for_origin() {
        let t = Transform {
            translate: Vec2::new(3.0, 4.0),
            scale_x: 2.0,
            scale_y: 2.0,
        };
        assert_eq!(t.to_affine() * Point::new(1.0, 1.0), Point::new(5.0, 6.0));
    }
}
