//! Sweep enumeration over the runtime configuration space
//!
//! A sweep is the Cartesian product of a preset's axes, flattened into an
//! ordered list of discrete configurations. Enumeration is decoupled from
//! execution so a harness can log the total count up front and replay the
//! list one configuration at a time.

use serde::{Deserialize, Serialize};

use crate::error::{AfinarError, Result};

/// Named sweep preset selecting the axis set to enumerate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SweepPreset {
    /// CPU image-classification sweep: two vision models, channels-last axis
    CpuVision,
    /// CPU sequence-model sweep: fixed model, quantization axis
    CpuText,
}

impl SweepPreset {
    /// Parse from the preset's CLI name
    ///
    /// # Errors
    ///
    /// Returns [`AfinarError::UnknownPreset`] for unrecognized names.
    /// Fail-fast: an unknown preset is a caller bug, not an empty sweep.
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "cpu_vision" => Ok(Self::CpuVision),
            "cpu_text" => Ok(Self::CpuText),
            _ => Err(AfinarError::UnknownPreset {
                name: s.to_string(),
            }),
        }
    }

    /// All defined presets
    #[must_use]
    pub fn all() -> Vec<Self> {
        vec![Self::CpuVision, Self::CpuText]
    }
}

impl std::fmt::Display for SweepPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CpuVision => write!(f, "cpu_vision"),
            Self::CpuText => write!(f, "cpu_text"),
        }
    }
}

/// One point in the sweep space
///
/// Stateless; consumed exactly once by a harness, which adds its own
/// run-level constants (iteration count, warmup count) before execution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Model identifier
    pub model: String,
    /// Target device
    pub device: String,
    /// Items per request
    pub batch_size: u32,
    /// Worker thread count
    pub threads: u32,
    /// Engage the optimizing compiler
    pub compile: bool,
    /// Use channels-last memory layout
    pub channels_last: bool,
    /// Use quantized weights
    pub quantize: bool,
}

/// Compile-mode axis values offered by the build
///
/// The `on` value only exists when the `compiler` feature is enabled, so a
/// sweep never schedules configurations the runtime cannot execute.
fn compile_modes() -> Vec<bool> {
    if cfg!(feature = "compiler") {
        vec![false, true]
    } else {
        vec![false]
    }
}

/// Enumerate the full ordered configuration list for a preset
///
/// Deterministic in `(preset, quick)`: no randomness, stable product order
/// (outermost axis varies slowest). `quick` shrinks axis cardinality for
/// fast iteration but never changes which axes exist.
#[must_use]
pub fn get_sweep_configs(preset: SweepPreset, quick: bool) -> Vec<SweepConfig> {
    match preset {
        SweepPreset::CpuVision => vision_configs(quick),
        SweepPreset::CpuText => text_configs(quick),
    }
}

fn vision_configs(quick: bool) -> Vec<SweepConfig> {
    let models = ["resnet18", "mobilenet_v3_small"];
    let batch_sizes: &[u32] = if quick { &[1, 4, 16] } else { &[1, 2, 4, 8, 16] };
    let threads: &[u32] = if quick { &[2, 8] } else { &[1, 2, 4, 8] };
    let compile = compile_modes();

    let mut configs = Vec::new();
    for model in models {
        for &bs in batch_sizes {
            for &t in threads {
                for &comp in &compile {
                    for channels_last in [false, true] {
                        configs.push(SweepConfig {
                            model: model.to_string(),
                            device: "cpu".to_string(),
                            batch_size: bs,
                            threads: t,
                            compile: comp,
                            channels_last,
                            quantize: false,
                        });
                    }
                }
            }
        }
    }
    configs
}

fn text_configs(quick: bool) -> Vec<SweepConfig> {
    let batch_sizes: &[u32] = if quick {
        &[1, 8, 32]
    } else {
        &[1, 2, 4, 8, 16, 32]
    };
    let threads: &[u32] = if quick { &[2, 8] } else { &[1, 2, 4, 8] };
    let compile = compile_modes();

    let mut configs = Vec::new();
    for &bs in batch_sizes {
        for &t in threads {
            for &comp in &compile {
                for quantize in [false, true] {
                    configs.push(SweepConfig {
                        model: "tiny_transformer".to_string(),
                        device: "cpu".to_string(),
                        batch_size: bs,
                        threads: t,
                        compile: comp,
                        channels_last: false,
                        quantize,
                    });
                }
            }
        }
    }
    configs
}
