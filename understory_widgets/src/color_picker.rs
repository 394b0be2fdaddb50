// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! HSLA color picker.
//!
//! Every channel edit recomputes one packed `#rrggbbaa` value and reports it. Conversion to
//! sRGB goes through the [`color`] crate.

use std::rc::Rc;

use color::{AlphaColor, Hsl, Srgb};
use kurbo::{Point, Rect};
use understory_overlay::{Measure, OverlayConfig, OverlayController, OverlayEvent, OverlayStack};
use understory_responder::controllable::Controllable;
use understory_responder::input::{Key, Outcome};
use understory_responder::listener::ListenerHost;

use crate::error::InputError;
use crate::select::list_overlay_config;
use crate::selection::OnValueChange;
use crate::trigger::TriggerState;

/// A color as hue, saturation, lightness and alpha.
///
/// Hue is in degrees `[0, 360)`; the other channels are in `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hsla {
    /// Hue in degrees.
    pub hue: f32,
    /// Saturation.
    pub saturation: f32,
    /// Lightness.
    pub lightness: f32,
    /// Opacity.
    pub alpha: f32,
}

impl Default for Hsla {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }
}

impl Hsla {
    /// Build a color. Values are not normalized; see [`Hsla::normalized`].
    pub const fn new(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Self {
        Self {
            hue,
            saturation,
            lightness,
            alpha,
        }
    }

    /// Wrap hue into `[0, 360)` and clamp the other channels into `[0, 1]`. Non-finite values
    /// become zero.
    pub fn normalized(self) -> Self {
        let finite = |v: f32| if v.is_finite() { v } else { 0.0 };
        Self {
            hue: finite(self.hue).rem_euclid(360.0),
            saturation: finite(self.saturation).clamp(0.0, 1.0),
            lightness: finite(self.lightness).clamp(0.0, 1.0),
            alpha: finite(self.alpha).clamp(0.0, 1.0),
        }
    }

    /// Convert to sRGB.
    pub fn to_srgb(self) -> AlphaColor<Srgb> {
        let c = self.normalized();
        AlphaColor::<Hsl>::new([c.hue, c.saturation * 100.0, c.lightness * 100.0, c.alpha])
            .convert()
    }

    /// Convert from sRGB.
    pub fn from_srgb(color: AlphaColor<Srgb>) -> Self {
        let hsl: AlphaColor<Hsl> = color.convert();
        let [h, s, l, a] = hsl.components;
        Self::new(h, s / 100.0, l / 100.0, a).normalized()
    }

    /// Parse any CSS color (`#rgb`, `#rrggbbaa`, `rgb()`, `hsl()`, named colors).
    pub fn parse(text: &str) -> Result<Self, InputError> {
        let parsed = color::parse_color(text.trim()).map_err(|e| InputError::InvalidColor {
            input: text.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self::from_srgb(parsed.to_alpha_color::<Srgb>()))
    }

    /// 8-bit RGBA channels.
    pub fn to_rgba8(self) -> [u8; 4] {
        self.to_srgb().components.map(|c| {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "The value is clamped to [0, 255] before the cast."
            )]
            let byte = (c.clamp(0.0, 1.0) * 255.0).round() as u8;
            byte
        })
    }

    /// Packed `0xRRGGBBAA`.
    pub fn packed(self) -> u32 {
        u32::from_be_bytes(self.to_rgba8())
    }

    /// `#rrggbbaa`.
    pub fn to_hex(self) -> String {
        format!("#{:08x}", self.packed())
    }

    /// CSS `hsl()` text, used as the human-readable label.
    pub fn to_css(self) -> String {
        let c = self.normalized();
        format!(
            "hsl({:.0} {:.0}% {:.0}% / {:.2})",
            c.hue,
            c.saturation * 100.0,
            c.lightness * 100.0,
            c.alpha
        )
    }
}

/// A color editor in an overlay.
///
/// Reports `(hex, css)` through [`ColorPicker::on_value_change`] whenever an edit changes the
/// color. Free-text entry that fails to parse only clears [`ColorPicker::is_text_valid`].
pub struct ColorPicker {
    overlay: OverlayController,
    color: Controllable<Hsla>,
    on_value_change: Option<OnValueChange>,
    text: String,
    text_valid: bool,
    disabled: bool,
}

impl core::fmt::Debug for ColorPicker {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ColorPicker")
            .field("overlay", &self.overlay)
            .field("color", &self.color)
            .field("text", &self.text)
            .field("text_valid", &self.text_valid)
            .field("disabled", &self.disabled)
            .finish_non_exhaustive()
    }
}

impl ColorPicker {
    /// Create a closed, uncontrolled picker starting at opaque black.
    pub fn new(host: Rc<dyn ListenerHost>) -> Self {
        let color = Hsla::default();
        Self {
            overlay: OverlayController::new(host).with_config(list_overlay_config()),
            color: Controllable::uncontrolled(color),
            on_value_change: None,
            text: color.to_hex(),
            text_valid: true,
            disabled: false,
        }
    }

    /// Initial color for uncontrolled use.
    #[must_use]
    pub fn default_value(mut self, color: Hsla) -> Self {
        let color = color.normalized();
        self.color.sync(color);
        self.text = color.to_hex();
        self
    }

    /// Hand the color to the caller.
    #[must_use]
    pub fn controlled_value(mut self, color: Hsla) -> Self {
        let color = color.normalized();
        self.color.set_controlled(color);
        self.text = color.to_hex();
        self
    }

    /// Report `(hex, css)` on every change.
    #[must_use]
    pub fn on_value_change(mut self, f: impl FnMut(&str, &str) + 'static) -> Self {
        self.on_value_change = Some(Box::new(f));
        self
    }

    /// Replace the overlay configuration.
    #[must_use]
    pub fn with_config(mut self, config: OverlayConfig) -> Self {
        self.overlay = self.overlay.with_config(config);
        self
    }

    /// Participate in a shared stacking order.
    #[must_use]
    pub fn with_stack(mut self, stack: OverlayStack) -> Self {
        self.overlay = self.overlay.with_stack(stack);
        self
    }

    /// Disable or enable the trigger.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Current color.
    pub fn value(&self) -> Hsla {
        *self.color.get()
    }

    /// Current color as `#rrggbbaa`.
    pub fn hex(&self) -> String {
        self.value().to_hex()
    }

    /// Text in the entry field.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// False after text entry that did not parse.
    pub fn is_text_valid(&self) -> bool {
        self.text_valid
    }

    /// Trigger rendering bundle; the text is the current hex value.
    pub fn trigger(&self) -> TriggerState {
        let hex = self.hex();
        TriggerState::new(self.is_open(), Some(&hex), "", self.disabled)
    }

    /// Whether the editor is open.
    pub fn is_open(&self) -> bool {
        self.overlay.is_open()
    }

    /// Editor origin.
    pub fn position(&self) -> Point {
        self.overlay.position()
    }

    /// Push the caller's color.
    pub fn sync_value(&mut self, color: Hsla) -> bool {
        let color = color.normalized();
        let changed = self.color.sync(color);
        if changed {
            self.text = color.to_hex();
            self.text_valid = true;
        }
        changed
    }

    /// Set the hue in degrees.
    pub fn set_hue(&mut self, hue: f32) -> bool {
        self.edit(|c| c.hue = hue)
    }

    /// Set the saturation.
    pub fn set_saturation(&mut self, saturation: f32) -> bool {
        self.edit(|c| c.saturation = saturation)
    }

    /// Set the lightness.
    pub fn set_lightness(&mut self, lightness: f32) -> bool {
        self.edit(|c| c.lightness = lightness)
    }

    /// Set the opacity.
    pub fn set_alpha(&mut self, alpha: f32) -> bool {
        self.edit(|c| c.alpha = alpha)
    }

    /// Pointer on the saturation/lightness surface: saturation grows to the right, lightness
    /// grows upward. Points outside `surface` are clamped onto it.
    pub fn pick_surface(&mut self, pt: Point, surface: Rect) -> bool {
        let surface = surface.abs();
        let fraction = |v: f64, lo: f64, extent: f64| {
            if extent > 0.0 {
                ((v - lo) / extent).clamp(0.0, 1.0)
            } else {
                0.0
            }
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Fractions in [0, 1] fit in f32."
        )]
        let (s, l) = (
            fraction(pt.x, surface.x0, surface.width()) as f32,
            (1.0 - fraction(pt.y, surface.y0, surface.height())) as f32,
        );
        self.edit(|c| {
            c.saturation = s;
            c.lightness = l;
        })
    }

    /// Free-text entry. On success the color is reported; on failure the validity flag is
    /// cleared and nothing is reported.
    pub fn set_text(&mut self, text: &str) -> Result<(), InputError> {
        text.clone_into(&mut self.text);
        match Hsla::parse(text) {
            Ok(color) => {
                self.text_valid = true;
                self.apply(color);
                Ok(())
            }
            Err(err) => {
                log::debug!("rejected color entry: {err}");
                self.text_valid = false;
                Err(err)
            }
        }
    }

    /// Trigger pressed.
    pub fn activate_trigger(&mut self, layout: &impl Measure) -> Option<OverlayEvent> {
        if self.disabled {
            return None;
        }
        self.overlay.toggle(layout)
    }

    /// Key press.
    pub fn handle_key(&mut self, key: Key) -> Outcome {
        self.overlay.handle_key(key)
    }

    /// Global pointer press.
    pub fn handle_pointer_down(
        &mut self,
        pt: Point,
        layout: &impl Measure,
    ) -> Option<OverlayEvent> {
        self.overlay.handle_pointer_down(pt, layout)
    }

    /// Viewport resize or scroll.
    pub fn handle_viewport_change(&mut self, layout: &impl Measure) -> bool {
        self.overlay.handle_viewport_change(layout)
    }

    fn edit(&mut self, f: impl FnOnce(&mut Hsla)) -> bool {
        let mut next = self.value();
        f(&mut next);
        self.apply(next)
    }

    fn apply(&mut self, next: Hsla) -> bool {
        let next = next.normalized();
        if next == self.value() {
            return false;
        }
        let hex = next.to_hex();
        if let Some(f) = self.on_value_change.as_mut() {
            f(&hex, &next.to_css());
        }
        if self.color.set(next) {
            self.text = hex;
        }
        true
    }
}
