//! Geometry Configuration
//!
//! Live-tunable dimensional parameters for the block decompositions.
//!
//! A [`GeometryConfig`] is created once at startup and shared as
//! `Rc<GeometryConfig>` with everything that decomposes blocks. Each geometry
//! call reads [`GeometryConfig::params`] at call time, so a value changed by a
//! tuning slider is visible to the very next collision or snap query.
//! Views that cache geometry subscribe for change notifications.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

// ============================================================================
// KEYS AND METADATA
// ============================================================================

/// Name of a single tunable parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GeoKey {
    ColTolerance,
    ColHShrink,
    ColArmThick,
    Col1dThick,
    Col1dTipCenter,
    ColTipWidth,
    ColTipLen,
    ColTipCenter,
    ColPillarSize,
    VisTipWidth,
    VisHubThick,
    VisArmLong,
    VisArmShort,
    VisBaseSlabHeight,
    VisPillarSize,
    VisPillarOffset,
    VisTerminalPlateZ,
    VisTerminalStemZ,
    VisTerminalPlateDepth,
}

/// Tuning-UI metadata for one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoParamMeta {
    pub label: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

const fn meta(
    label: &'static str,
    description: &'static str,
    category: &'static str,
    min: f32,
    max: f32,
    step: f32,
) -> GeoParamMeta {
    GeoParamMeta {
        label,
        description,
        category,
        min,
        max,
        step,
    }
}

const COLLISION_GLOBAL: &str = "Collision: Global";
const COLLISION_1D: &str = "Collision: 1D Special";
const VISUAL_CONNECTORS: &str = "Visual: Connectors";
const VISUAL_STRUCTURAL: &str = "Visual: Base/Double";
const VISUAL_TERMINAL: &str = "Visual: Terminal";

impl GeoKey {
    pub const ALL: [GeoKey; 19] = [
        GeoKey::ColTolerance,
        GeoKey::ColHShrink,
        GeoKey::ColArmThick,
        GeoKey::Col1dThick,
        GeoKey::Col1dTipCenter,
        GeoKey::ColTipWidth,
        GeoKey::ColTipLen,
        GeoKey::ColTipCenter,
        GeoKey::ColPillarSize,
        GeoKey::VisTipWidth,
        GeoKey::VisHubThick,
        GeoKey::VisArmLong,
        GeoKey::VisArmShort,
        GeoKey::VisBaseSlabHeight,
        GeoKey::VisPillarSize,
        GeoKey::VisPillarOffset,
        GeoKey::VisTerminalPlateZ,
        GeoKey::VisTerminalStemZ,
        GeoKey::VisTerminalPlateDepth,
    ];

    /// Snake-case name used by tuning dashboards and JSON overrides.
    pub fn name(self) -> &'static str {
        match self {
            GeoKey::ColTolerance => "col_tolerance",
            GeoKey::ColHShrink => "col_h_shrink",
            GeoKey::ColArmThick => "col_arm_thick",
            GeoKey::Col1dThick => "col_1d_thick",
            GeoKey::Col1dTipCenter => "col_1d_tip_center",
            GeoKey::ColTipWidth => "col_tip_width",
            GeoKey::ColTipLen => "col_tip_len",
            GeoKey::ColTipCenter => "col_tip_center",
            GeoKey::ColPillarSize => "col_pillar_size",
            GeoKey::VisTipWidth => "vis_tip_width",
            GeoKey::VisHubThick => "vis_hub_thick",
            GeoKey::VisArmLong => "vis_arm_long",
            GeoKey::VisArmShort => "vis_arm_short",
            GeoKey::VisBaseSlabHeight => "vis_base_slab_height",
            GeoKey::VisPillarSize => "vis_pillar_size",
            GeoKey::VisPillarOffset => "vis_pillar_offset",
            GeoKey::VisTerminalPlateZ => "vis_terminal_plate_z",
            GeoKey::VisTerminalStemZ => "vis_terminal_stem_z",
            GeoKey::VisTerminalPlateDepth => "vis_terminal_plate_depth",
        }
    }

    pub fn from_name(name: &str) -> Option<GeoKey> {
        GeoKey::ALL.into_iter().find(|k| k.name() == name)
    }

    pub fn meta(self) -> GeoParamMeta {
        match self {
            GeoKey::ColTolerance => meta(
                "Tolerance (Gap)",
                "The global safety gap between colliding blocks. Increase this if blocks feel too tight.",
                COLLISION_GLOBAL,
                0.0,
                0.05,
                0.001,
            ),
            GeoKey::ColHShrink => meta(
                "Height Shrink",
                "Reduces collision height to prevent top/bottom friction.",
                COLLISION_GLOBAL,
                0.0,
                0.1,
                0.01,
            ),
            GeoKey::ColArmThick => meta(
                "Arm Thickness",
                "Thickness of standard connector arms.",
                COLLISION_GLOBAL,
                0.1,
                0.33,
                0.01,
            ),
            GeoKey::Col1dThick => meta(
                "1D Web Thickness",
                "Thickness of the central web of the 1D block.",
                COLLISION_1D,
                0.1,
                0.5,
                0.01,
            ),
            GeoKey::Col1dTipCenter => meta(
                "1D Tip Center",
                "Distance from center to the locking tip for 1D blocks.",
                COLLISION_1D,
                0.3,
                0.6,
                0.001,
            ),
            GeoKey::ColTipWidth => meta(
                "Tip Width",
                "Width of the interlocking tip (shared).",
                COLLISION_GLOBAL,
                0.05,
                0.2,
                0.01,
            ),
            GeoKey::ColTipLen => meta(
                "Tip Length",
                "Length of the interlocking tip (shared).",
                COLLISION_GLOBAL,
                0.5,
                1.0,
                0.05,
            ),
            GeoKey::ColTipCenter => meta(
                "Tip Center (2D/3D)",
                "Distance to tip for long-arm blocks (2D, 3D, 4D).",
                COLLISION_GLOBAL,
                0.6,
                1.0,
                0.01,
            ),
            GeoKey::ColPillarSize => meta(
                "Pillar Collision Size",
                "Size of pillars on Base/Double blocks.",
                COLLISION_GLOBAL,
                0.1,
                0.35,
                0.01,
            ),
            GeoKey::VisTipWidth => meta(
                "Visual Tip Width",
                "Visible width of connector tips.",
                VISUAL_CONNECTORS,
                0.1,
                0.25,
                0.001,
            ),
            GeoKey::VisHubThick => meta(
                "Hub Thickness",
                "Thickness of the central hub.",
                VISUAL_CONNECTORS,
                0.2,
                0.4,
                0.001,
            ),
            GeoKey::VisArmLong => meta(
                "Long Arm Reach",
                "Extension of long arms (2D/3D/4D).",
                VISUAL_CONNECTORS,
                0.6,
                1.0,
                0.01,
            ),
            GeoKey::VisArmShort => meta(
                "Short Arm Reach",
                "Extension of short arms.",
                VISUAL_CONNECTORS,
                0.3,
                0.7,
                0.01,
            ),
            GeoKey::VisBaseSlabHeight => meta(
                "Slab Height",
                "Height of the base slab.",
                VISUAL_STRUCTURAL,
                0.1,
                0.9,
                0.05,
            ),
            GeoKey::VisPillarSize => meta(
                "Pillar Size",
                "Width of visual pillars.",
                VISUAL_STRUCTURAL,
                0.2,
                0.4,
                0.01,
            ),
            GeoKey::VisPillarOffset => meta(
                "Pillar Offset",
                "Offset of pillars from center.",
                VISUAL_STRUCTURAL,
                0.2,
                0.45,
                0.01,
            ),
            GeoKey::VisTerminalPlateZ => meta(
                "Plate Position Z",
                "Z pos of terminal plate.",
                VISUAL_TERMINAL,
                0.3,
                0.5,
                0.001,
            ),
            GeoKey::VisTerminalStemZ => meta(
                "Stem Position Z",
                "Z pos of terminal stem.",
                VISUAL_TERMINAL,
                0.1,
                0.3,
                0.001,
            ),
            GeoKey::VisTerminalPlateDepth => meta(
                "Plate Depth/Size",
                "Size of terminal plate.",
                VISUAL_TERMINAL,
                0.5,
                1.2,
                0.01,
            ),
        }
    }
}

impl fmt::Display for GeoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// PARAMETER SNAPSHOT
// ============================================================================

/// A complete snapshot of every tunable value.
///
/// Plain `Copy` data: decomposition functions take a snapshot by reference
/// and never hold on to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryParams {
    // Collision (interlocking)
    pub col_tolerance: f32,
    pub col_h_shrink: f32,
    pub col_arm_thick: f32,
    pub col_1d_thick: f32,
    pub col_1d_tip_center: f32,
    pub col_tip_width: f32,
    pub col_tip_len: f32,
    pub col_tip_center: f32,
    pub col_pillar_size: f32,

    // Visual: connectors
    pub vis_tip_width: f32,
    pub vis_hub_thick: f32,
    pub vis_arm_long: f32,
    pub vis_arm_short: f32,

    // Visual: structural
    pub vis_base_slab_height: f32,
    pub vis_pillar_size: f32,
    pub vis_pillar_offset: f32,

    // Visual: terminal
    pub vis_terminal_plate_z: f32,
    pub vis_terminal_stem_z: f32,
    pub vis_terminal_plate_depth: f32,
}

impl Default for GeometryParams {
    fn default() -> Self {
        Self {
            col_tolerance: 0.01,
            col_h_shrink: 0.04,
            col_arm_thick: 0.28,
            col_1d_thick: 0.30,
            col_1d_tip_center: 0.42,
            col_tip_width: 0.12,
            col_tip_len: 0.8,
            col_tip_center: 0.85,
            col_pillar_size: 0.25,

            vis_tip_width: 1.0 / 6.0,
            vis_hub_thick: 1.0 / 3.0,
            vis_arm_long: 0.85,
            vis_arm_short: 0.5,

            vis_base_slab_height: 0.5,
            vis_pillar_size: 0.34,
            vis_pillar_offset: 0.33,

            vis_terminal_plate_z: 0.4,
            vis_terminal_stem_z: 0.166,
            vis_terminal_plate_depth: 1.0,
        }
    }
}

impl GeometryParams {
    pub fn get(&self, key: GeoKey) -> f32 {
        *self.slot(key)
    }

    pub fn set(&mut self, key: GeoKey, value: f32) {
        *self.slot_mut(key) = value;
    }

    fn slot(&self, key: GeoKey) -> &f32 {
        match key {
            GeoKey::ColTolerance => &self.col_tolerance,
            GeoKey::ColHShrink => &self.col_h_shrink,
            GeoKey::ColArmThick => &self.col_arm_thick,
            GeoKey::Col1dThick => &self.col_1d_thick,
            GeoKey::Col1dTipCenter => &self.col_1d_tip_center,
            GeoKey::ColTipWidth => &self.col_tip_width,
            GeoKey::ColTipLen => &self.col_tip_len,
            GeoKey::ColTipCenter => &self.col_tip_center,
            GeoKey::ColPillarSize => &self.col_pillar_size,
            GeoKey::VisTipWidth => &self.vis_tip_width,
            GeoKey::VisHubThick => &self.vis_hub_thick,
            GeoKey::VisArmLong => &self.vis_arm_long,
            GeoKey::VisArmShort => &self.vis_arm_short,
            GeoKey::VisBaseSlabHeight => &self.vis_base_slab_height,
            GeoKey::VisPillarSize => &self.vis_pillar_size,
            GeoKey::VisPillarOffset => &self.vis_pillar_offset,
            GeoKey::VisTerminalPlateZ => &self.vis_terminal_plate_z,
            GeoKey::VisTerminalStemZ => &self.vis_terminal_stem_z,
            GeoKey::VisTerminalPlateDepth => &self.vis_terminal_plate_depth,
        }
    }

    fn slot_mut(&mut self, key: GeoKey) -> &mut f32 {
        match key {
            GeoKey::ColTolerance => &mut self.col_tolerance,
            GeoKey::ColHShrink => &mut self.col_h_shrink,
            GeoKey::ColArmThick => &mut self.col_arm_thick,
            GeoKey::Col1dThick => &mut self.col_1d_thick,
            GeoKey::Col1dTipCenter => &mut self.col_1d_tip_center,
            GeoKey::ColTipWidth => &mut self.col_tip_width,
            GeoKey::ColTipLen => &mut self.col_tip_len,
            GeoKey::ColTipCenter => &mut self.col_tip_center,
            GeoKey::ColPillarSize => &mut self.col_pillar_size,
            GeoKey::VisTipWidth => &mut self.vis_tip_width,
            GeoKey::VisHubThick => &mut self.vis_hub_thick,
            GeoKey::VisArmLong => &mut self.vis_arm_long,
            GeoKey::VisArmShort => &mut self.vis_arm_short,
            GeoKey::VisBaseSlabHeight => &mut self.vis_base_slab_height,
            GeoKey::VisPillarSize => &mut self.vis_pillar_size,
            GeoKey::VisPillarOffset => &mut self.vis_pillar_offset,
            GeoKey::VisTerminalPlateZ => &mut self.vis_terminal_plate_z,
            GeoKey::VisTerminalStemZ => &mut self.vis_terminal_stem_z,
            GeoKey::VisTerminalPlateDepth => &mut self.vis_terminal_plate_depth,
        }
    }
}

// ============================================================================
// ERROR TYPE
// ============================================================================

/// Errors raised by the tuning surface. Geometry itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown geometry parameter '{0}'")]
    UnknownKey(String),
    #[error("geometry parameter '{key}' must be finite, got {value}")]
    NonFinite { key: GeoKey, value: f32 },
    #[error("invalid geometry override JSON: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// LIVE CONFIG STORE
// ============================================================================

/// Handle returned by [`GeometryConfig::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Listener = Rc<dyn Fn(&GeometryParams)>;

/// Process-scoped, mutable geometry configuration with change notification.
///
/// Single-threaded by construction (`Rc`/`Cell`); share it as
/// `Rc<GeometryConfig>`.
pub struct GeometryConfig {
    params: Cell<GeometryParams>,
    listeners: RefCell<Vec<(Subscription, Listener)>>,
    next_subscription: Cell<u64>,
}

impl fmt::Debug for GeometryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeometryConfig")
            .field("params", &self.params.get())
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GeometryConfig {
    /// Create a config holding the default values.
    pub fn new() -> Self {
        Self::with_params(GeometryParams::default())
    }

    pub fn with_params(params: GeometryParams) -> Self {
        Self {
            params: Cell::new(params),
            listeners: RefCell::new(Vec::new()),
            next_subscription: Cell::new(0),
        }
    }

    /// Convenience constructor for the usual shared handle.
    pub fn shared() -> Rc<Self> {
        Rc::new(Self::new())
    }

    /// The current snapshot. Call this at the start of every computation.
    pub fn params(&self) -> GeometryParams {
        self.params.get()
    }

    pub fn get(&self, key: GeoKey) -> f32 {
        self.params.get().get(key)
    }

    /// Update one parameter and notify subscribers.
    ///
    /// Values outside the metadata range are accepted but logged.
    pub fn set(&self, key: GeoKey, value: f32) -> Result<(), ConfigError> {
        check_value(key, value)?;
        let mut params = self.params.get();
        params.set(key, value);
        self.params.set(params);
        self.notify();
        Ok(())
    }

    /// Same as [`set`](Self::set) but addressed by snake-case name.
    pub fn set_by_name(&self, name: &str, value: f32) -> Result<(), ConfigError> {
        let key = GeoKey::from_name(name).ok_or_else(|| ConfigError::UnknownKey(name.to_string()))?;
        self.set(key, value)
    }

    /// Restore every default and notify subscribers once.
    pub fn reset(&self) {
        self.params.set(GeometryParams::default());
        tracing::info!("geometry configuration reset to defaults");
        self.notify();
    }

    /// Register a change listener. It receives the new snapshot after every
    /// `set`, `apply_json` or `reset`.
    pub fn subscribe(&self, listener: impl Fn(&GeometryParams) + 'static) -> Subscription {
        let id = Subscription(self.next_subscription.get());
        self.next_subscription.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was already gone.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(id, _)| *id != subscription);
        listeners.len() != before
    }

    pub fn metadata(&self, key: GeoKey) -> GeoParamMeta {
        key.meta()
    }

    /// Export the current values as a JSON object keyed by parameter name.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(&self.params.get())?)
    }

    /// Apply a JSON object of `name -> value` overrides.
    ///
    /// All entries are validated before anything is applied; subscribers are
    /// notified once.
    pub fn apply_json(&self, json: &str) -> Result<(), ConfigError> {
        let overrides: BTreeMap<String, f32> = serde_json::from_str(json)?;
        let mut params = self.params.get();
        for (name, value) in overrides {
            let key = GeoKey::from_name(&name).ok_or(ConfigError::UnknownKey(name))?;
            check_value(key, value)?;
            params.set(key, value);
        }
        self.params.set(params);
        self.notify();
        Ok(())
    }

    fn notify(&self) {
        // Clone the list so listeners may subscribe or read the config.
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        let snapshot = self.params.get();
        for listener in listeners {
            listener(&snapshot);
        }
    }
}

/// Reject non-finite values; log values outside the tuning range.
///
/// Returns whether `value` lies inside the key's metadata range.
fn check_value(key: GeoKey, value: f32) -> Result<bool, ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { key, value });
    }
    let range = key.meta();
    let in_range = value >= range.min && value <= range.max;
    if !in_range {
        tracing::warn!(
            key = key.name(),
            value,
            min = range.min,
            max = range.max,
            "geometry parameter outside tuning range"
        );
    }
    Ok(in_range)
}
