//! Static descriptions of each module kind's ports and parameters.
//!
//! Hosts enumerate these once at construction to build their own widgets and
//! cable endpoints. Parameters are addressed by their index in `params`.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamInfo {
    pub name: &'static str,
    pub min: f32,
    pub max: f32,
    pub default: f32,
    pub unit: &'static str,
}

impl ParamInfo {
    pub const fn new(name: &'static str, min: f32, max: f32, default: f32) -> Self {
        Self {
            name,
            min,
            max,
            default,
            unit: "",
        }
    }

    pub const fn with_unit(mut self, unit: &'static str) -> Self {
        self.unit = unit;
        self
    }

    /// Clamp a host-supplied value into range.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortInfo {
    pub name: &'static str,
}

impl PortInfo {
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModuleDescriptor {
    pub kind: &'static str,
    pub params: &'static [ParamInfo],
    pub inputs: &'static [PortInfo],
    pub outputs: &'static [PortInfo],
}

impl ModuleDescriptor {
    pub fn param(&self, index: usize) -> Option<&ParamInfo> {
        self.params.get(index)
    }
}
